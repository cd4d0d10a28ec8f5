//! Program-derived addresses.
//!
//! Seed order is part of the wire contract: the program re-derives each
//! address from the same seeds and rejects any account that does not match.

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::codec::encode_u64_le;
use crate::errors::DerivationError;

pub const CONFIG_SEED: &[u8] = b"config_v2";
pub const TASK_ACCOUNT_SEED: &[u8] = b"task_account";
pub const ADMIN_COUNTER_SEED: &[u8] = b"admin_counter";

/// Seeds per derivation, including the bump byte appended by the search.
pub const MAX_SEEDS: usize = 16;
pub const MAX_SEED_LEN: usize = 32;

/// The accounts this client derives, keyed by purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSeeds {
    Config,
    TaskAccount { requester: Pubkey, task_id: u64 },
    AdminCounter { requester: Pubkey },
}

impl AccountSeeds {
    pub fn seed_bytes(&self) -> Vec<Vec<u8>> {
        match self {
            Self::Config => vec![CONFIG_SEED.to_vec()],
            Self::TaskAccount { requester, task_id } => vec![
                TASK_ACCOUNT_SEED.to_vec(),
                requester.to_bytes().to_vec(),
                encode_u64_le(*task_id).to_vec(),
            ],
            Self::AdminCounter { requester } => vec![
                ADMIN_COUNTER_SEED.to_vec(),
                requester.to_bytes().to_vec(),
            ],
        }
    }

    pub fn derive(&self, program_id: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
        let owned = self.seed_bytes();
        let seeds: Vec<&[u8]> = owned.iter().map(Vec::as_slice).collect();
        let derived = derive_address(&seeds, program_id)?;
        debug!(seeds = ?self, address = %derived.0, bump = derived.1, "derived address");
        Ok(derived)
    }
}

/// Canonical bump search: try bumps from 255 down and return the first
/// candidate that falls off the ed25519 curve.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
    if seeds.len() >= MAX_SEEDS {
        return Err(DerivationError::TooManySeeds {
            count: seeds.len(),
            max: MAX_SEEDS - 1,
        });
    }
    if let Some((index, seed)) = seeds.iter().enumerate().find(|(_, s)| s.len() > MAX_SEED_LEN) {
        return Err(DerivationError::SeedTooLong {
            index,
            len: seed.len(),
            max: MAX_SEED_LEN,
        });
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut candidate: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        candidate.extend_from_slice(seeds);
        candidate.push(&bump_seed);
        if let Ok(address) = Pubkey::create_program_address(&candidate, program_id) {
            return Ok((address, bump));
        }
    }
    Err(DerivationError::NoViableBump)
}

pub fn find_config_pda(program_id: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
    AccountSeeds::Config.derive(program_id)
}

pub fn find_task_account_pda(
    requester: &Pubkey,
    task_id: u64,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    AccountSeeds::TaskAccount {
        requester: *requester,
        task_id,
    }
    .derive(program_id)
}

pub fn find_admin_counter_pda(
    requester: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    AccountSeeds::AdminCounter {
        requester: *requester,
    }
    .derive(program_id)
}
