//! Network-backed capabilities over a JSON-RPC node.

use async_trait::async_trait;
use solana_client::{client_error::ClientError, nonblocking::rpc_client::RpcClient};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::{debug, info};

/// Offset of `unix_timestamp` in the Clock sysvar: slot, epoch start
/// timestamp, epoch and leader schedule epoch come first.
const CLOCK_UNIX_TIMESTAMP_OFFSET: usize = 32;

use crate::codec::{decode_i64_le, I64_LEN};
use crate::config::ClientConfig;
use crate::errors::{EncodingError, Result, SunpathClientError};
use crate::ledger::{AccountSnapshot, LedgerReader, SignatureStatus, WalletSigner};

/// Ledger reads through `RpcClient`.
pub struct RpcLedger {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(rpc_url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.into(), commitment),
            commitment,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.rpc_url.clone(), config.commitment.into())
    }
}

#[async_trait]
impl LedgerReader for RpcLedger {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| SunpathClientError::network("latest_blockhash", e))
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|e| SunpathClientError::network("get_account", e))?;
        Ok(response.value.map(|account| AccountSnapshot {
            owner: account.owner,
            lamports: account.lamports,
            data: account.data,
        }))
    }

    /// The program compares against `Clock::unix_timestamp`, so read the
    /// same sysvar rather than a block time.
    async fn unix_timestamp(&self) -> Result<i64> {
        let clock = self
            .get_account(&solana_sdk_ids::sysvar::clock::ID)
            .await?
            .ok_or_else(|| SunpathClientError::network("get_clock", "clock sysvar not found"))?;
        Ok(clock_unix_timestamp(&clock.data)?)
    }

    async fn signature_status(&self, signature: &Signature) -> Result<SignatureStatus> {
        let status = self
            .rpc
            .get_signature_status_with_commitment(signature, self.commitment)
            .await
            .map_err(|e| SunpathClientError::network("signature_status", e))?;
        Ok(match status {
            None => SignatureStatus::Pending,
            Some(Ok(())) => SignatureStatus::Confirmed,
            Some(Err(err)) => SignatureStatus::Failed(err),
        })
    }
}

/// A local keypair that submits through RPC. Meant for scripts and
/// operator tooling; browser wallets implement [`WalletSigner`] themselves.
pub struct KeypairWallet {
    keypair: Keypair,
    rpc: RpcClient,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, rpc_url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            keypair,
            rpc: RpcClient::new_with_commitment(rpc_url.into(), commitment),
        }
    }

    pub fn from_config(keypair: Keypair, config: &ClientConfig) -> Self {
        Self::new(keypair, config.rpc_url.clone(), config.commitment.into())
    }
}

#[async_trait]
impl WalletSigner for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_and_send(&self, mut transaction: Transaction) -> Result<Signature> {
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_sign(&[&self.keypair], blockhash)
            .map_err(|e| SunpathClientError::Signing(e.to_string()))?;
        debug!(signer = %self.keypair.pubkey(), %blockhash, "submitting transaction");

        let signature = self
            .rpc
            .send_transaction(&transaction)
            .await
            .map_err(submission_error)?;
        info!(%signature, "transaction submitted");
        Ok(signature)
    }
}

fn clock_unix_timestamp(data: &[u8]) -> std::result::Result<i64, EncodingError> {
    let end = CLOCK_UNIX_TIMESTAMP_OFFSET + I64_LEN;
    let field = data.get(CLOCK_UNIX_TIMESTAMP_OFFSET..end).ok_or(EncodingError::Truncated {
        expected: end,
        found: data.len(),
    })?;
    decode_i64_le(field)
}

/// Preflight simulation failures come back as a transaction error and are
/// remote rejections. Everything else is transport.
fn submission_error(err: ClientError) -> SunpathClientError {
    match err.get_transaction_error() {
        Some(tx_err) => SunpathClientError::rejection(tx_err, None),
        None => SunpathClientError::network("send_transaction", err),
    }
}
