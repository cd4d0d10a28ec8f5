use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use super::ProgramAccount;

/// Per-requester tally of accept and reject decisions.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminActionCounter {
    pub admin: Pubkey,
    pub accept_count: u64,
    pub reject_count: u64,
}

impl AdminActionCounter {
    pub const LEN: usize = 8 + 32 + 8 + 8;
}

impl ProgramAccount for AdminActionCounter {
    const NAME: &'static str = "AdminActionCounter";
    const DISCRIMINATOR: [u8; 8] = [47, 50, 119, 78, 208, 185, 184, 230];
}
