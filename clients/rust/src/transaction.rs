use solana_sdk::{
    hash::Hash, instruction::Instruction, message::Message, pubkey::Pubkey,
    transaction::Transaction,
};
use tracing::debug;

use crate::errors::{EncodingError, Result};
use crate::ledger::LedgerReader;

/// Wraps instructions in an unsigned transaction carrying a fresh blockhash.
///
/// The assembler never retries: a stale blockhash surfaces as a remote
/// rejection and the caller decides whether to assemble again.
pub struct TransactionAssembler<'a> {
    ledger: &'a dyn LedgerReader,
}

impl<'a> TransactionAssembler<'a> {
    pub fn new(ledger: &'a dyn LedgerReader) -> Self {
        Self { ledger }
    }

    /// Fetch the latest blockhash and build the unsigned transaction with
    /// `fee_payer` as the first signer.
    pub async fn assemble(
        &self,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
    ) -> Result<Transaction> {
        if instructions.is_empty() {
            return Err(EncodingError::MissingField("instructions").into());
        }
        let blockhash = self.ledger.latest_blockhash().await?;
        Ok(assemble_with_blockhash(instructions, fee_payer, blockhash))
    }
}

pub fn assemble_with_blockhash(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    blockhash: Hash,
) -> Transaction {
    let message = Message::new_with_blockhash(instructions, Some(fee_payer), &blockhash);
    debug!(
        %fee_payer,
        %blockhash,
        instructions = instructions.len(),
        "assembled transaction"
    );
    Transaction::new_unsigned(message)
}
