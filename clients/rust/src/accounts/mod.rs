pub mod admin_action_counter;
pub mod program_config;
pub mod task_account;

pub use admin_action_counter::*;
pub use program_config::*;
pub use task_account::*;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::codec::{self, DISCRIMINATOR_LEN};
use crate::errors::EncodingError;

/// An account owned by the Sunpath program: an Anchor discriminator followed
/// by the borsh-encoded fields.
pub trait ProgramAccount: BorshSerialize + BorshDeserialize + Sized {
    const NAME: &'static str;
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];

    /// Decode account data. Trailing bytes are allocation padding and are
    /// ignored.
    fn from_bytes(data: &[u8]) -> Result<Self, EncodingError> {
        let (discriminator, mut body) = codec::split_discriminator(data)?;
        if discriminator != Self::DISCRIMINATOR {
            return Err(EncodingError::DiscriminatorMismatch {
                account: Self::NAME,
            });
        }
        codec::decode_prefix(&mut body)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let mut data = Self::DISCRIMINATOR.to_vec();
        data.extend(codec::encode(self)?);
        Ok(data)
    }
}
