use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use super::ProgramAccount;

/// Status byte as stored by the program.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Open,
    Approved,
    Rejected,
    /// Declared by the program but never written; expiry is computed from
    /// `expires_at`.
    Expired,
    Reclaimed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskAccount {
    pub task_id: u64,
    pub requester: Pubkey,
    pub reward_amount_locked: u64,
    pub created_at: i64,
    pub duration_seconds: i64,
    pub expires_at: i64,
    pub status: TaskStatus,
    pub status_updated_at: i64,
    pub recipient: Option<Pubkey>,
    pub report_account: Option<Pubkey>,
    pub is_initialized: bool,
}

impl TaskAccount {
    /// Allocated size including the discriminator.
    pub const LEN: usize = 8 + 8 + 32 + 8 + 8 + 8 + 8 + 1 + 8 + (1 + 32) + (1 + 32) + 1;

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }
}

impl ProgramAccount for TaskAccount {
    const NAME: &'static str = "TaskAccount";
    const DISCRIMINATOR: [u8; 8] = [235, 32, 10, 23, 81, 60, 170, 203];
}
