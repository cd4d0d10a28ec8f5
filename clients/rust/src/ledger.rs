//! Capabilities the client needs from the outside world. Neither is ever
//! reached through a global; both are injected into [`crate::SunpathClient`].

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
    transaction::TransactionError,
};

use crate::errors::Result;

/// Raw account as returned by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureStatus {
    /// Not yet seen, or seen but below the requested commitment.
    Pending,
    Confirmed,
    Failed(TransactionError),
}

/// Read-only view of the ledger.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// `Ok(None)` when the account does not exist.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>>;

    /// Ledger clock in unix seconds. Lifecycle checks use this, never the
    /// local wall clock.
    async fn unix_timestamp(&self) -> Result<i64>;

    async fn signature_status(&self, signature: &Signature) -> Result<SignatureStatus>;
}

/// Holds the requester's key. The private key never leaves the signer.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign an assembled transaction and submit it, returning the signature.
    /// A ledger-side refusal is reported as a remote rejection.
    async fn sign_and_send(&self, transaction: Transaction) -> Result<Signature>;
}
