use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use super::ProgramAccount;

/// Program-wide policy, one per deployment.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramConfig {
    pub admin: Pubkey,
    pub dao_treasury_address: Pubkey,
    pub governance_token_mint: Pubkey,
    pub minimum_reward_amount: u64,
    pub dao_fee_percentage: u8,
    /// Seconds a rejected task's funds stay locked before reclaim.
    pub denial_penalty_duration: i64,
    pub patroller_governance_token_amount: u64,
    pub is_initialized: bool,
}

impl ProgramConfig {
    pub const LEN: usize = 8 + 32 + 32 + 32 + 8 + 1 + 8 + 8 + 1;
}

impl ProgramAccount for ProgramConfig {
    const NAME: &'static str = "ProgramConfig";
    const DISCRIMINATOR: [u8; 8] = [196, 210, 90, 231, 144, 149, 140, 63];
}
