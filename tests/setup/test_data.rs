use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};
use sunpath_client::instructions::InitializeProgramInstructionArgs;

// Funding
pub const DEFAULT_AIRDROP: u64 = 10 * LAMPORTS_PER_SOL;

// Program config
pub const DEFAULT_MINIMUM_REWARD_AMOUNT: u64 = 1_000_000;
pub const DEFAULT_DAO_FEE_PERCENTAGE: u8 = 5;
pub const DEFAULT_DENIAL_PENALTY_DURATION: i64 = 0;
pub const LOCKUP_DENIAL_PENALTY_DURATION: i64 = 600;
pub const DEFAULT_PATROLLER_TOKEN_AMOUNT: u64 = 10;

// Tasks
pub const DEFAULT_TASK_ID: u64 = 1;
pub const DEFAULT_REWARD_AMOUNT: u64 = 100_000_000;
pub const DEFAULT_DURATION_SECONDS: i64 = 3600;

pub fn initialize_program_args(admin: Pubkey, denial_penalty_duration: i64) -> InitializeProgramInstructionArgs {
    InitializeProgramInstructionArgs {
        admin,
        dao_treasury_address: Pubkey::new_from_array([2u8; 32]),
        governance_token_mint: Pubkey::new_from_array([3u8; 32]),
        minimum_reward_amount: DEFAULT_MINIMUM_REWARD_AMOUNT,
        dao_fee_percentage: DEFAULT_DAO_FEE_PERCENTAGE,
        denial_penalty_duration,
        patroller_governance_token_amount: DEFAULT_PATROLLER_TOKEN_AMOUNT,
    }
}
