//! Wire codec for the Sunpath program.
//!
//! Everything is little-endian with no padding and no framing: the schema is
//! implied by the instruction selector or account discriminator. Integers and
//! keys are laid out exactly as borsh lays them out, so composite layouts are
//! derived with `BorshSerialize`/`BorshDeserialize` and the helpers here cover
//! the fixed-width scalars plus range checks for values arriving from wider or
//! textual sources.

use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::errors::EncodingError;

pub const U64_LEN: usize = 8;
pub const I64_LEN: usize = 8;
pub const PUBKEY_LEN: usize = 32;
pub const DISCRIMINATOR_LEN: usize = 8;

pub fn encode_u64_le(value: u64) -> [u8; U64_LEN] {
    value.to_le_bytes()
}

pub fn encode_i64_le(value: i64) -> [u8; I64_LEN] {
    value.to_le_bytes()
}

pub fn encode_pubkey(key: &Pubkey) -> [u8; PUBKEY_LEN] {
    key.to_bytes()
}

pub fn decode_u64_le(bytes: &[u8]) -> Result<u64, EncodingError> {
    Ok(u64::from_le_bytes(fixed::<U64_LEN>(bytes)?))
}

pub fn decode_i64_le(bytes: &[u8]) -> Result<i64, EncodingError> {
    Ok(i64::from_le_bytes(fixed::<I64_LEN>(bytes)?))
}

pub fn decode_pubkey(bytes: &[u8]) -> Result<Pubkey, EncodingError> {
    Ok(Pubkey::new_from_array(fixed::<PUBKEY_LEN>(bytes)?))
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], EncodingError> {
    match bytes.len() {
        len if len < N => Err(EncodingError::Truncated {
            expected: N,
            found: len,
        }),
        len if len > N => Err(EncodingError::TrailingBytes(len - N)),
        _ => {
            let mut out = [0u8; N];
            out.copy_from_slice(bytes);
            Ok(out)
        }
    }
}

/// Narrow a wider integer into an unsigned 64-bit argument.
pub fn u64_from_wide(value: i128) -> Result<u64, EncodingError> {
    u64::try_from(value).map_err(|_| EncodingError::OutOfRange {
        value,
        target: "u64",
    })
}

/// Narrow a wider integer into a signed 64-bit argument.
pub fn i64_from_wide(value: i128) -> Result<i64, EncodingError> {
    i64::try_from(value).map_err(|_| EncodingError::OutOfRange {
        value,
        target: "i64",
    })
}

/// Parse a decimal literal (as typed into a form) into a u64 argument.
pub fn parse_u64(literal: &str) -> Result<u64, EncodingError> {
    u64_from_wide(parse_wide(literal)?)
}

pub fn parse_i64(literal: &str) -> Result<i64, EncodingError> {
    i64_from_wide(parse_wide(literal)?)
}

fn parse_wide(literal: &str) -> Result<i128, EncodingError> {
    let trimmed = literal.trim();
    trimmed
        .replace('_', "")
        .parse::<i128>()
        .map_err(|_| EncodingError::InvalidLiteral(literal.to_string()))
}

pub fn parse_pubkey(literal: &str) -> Result<Pubkey, EncodingError> {
    Pubkey::from_str(literal.trim()).map_err(|_| EncodingError::InvalidPublicKey(literal.to_string()))
}

pub fn encode<T: BorshSerialize>(value: &T) -> Result<Vec<u8>, EncodingError> {
    borsh::to_vec(value).map_err(|e| EncodingError::InvalidField {
        field: std::any::type_name::<T>(),
        reason: e.to_string(),
    })
}

/// Decode a value that must consume `bytes` entirely.
pub fn decode_exact<T: BorshDeserialize>(bytes: &[u8]) -> Result<T, EncodingError> {
    let mut cursor = bytes;
    let value = decode_prefix(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(EncodingError::TrailingBytes(cursor.len()));
    }
    Ok(value)
}

/// Decode a value from the front of `cursor`, advancing it.
pub fn decode_prefix<T: BorshDeserialize>(cursor: &mut &[u8]) -> Result<T, EncodingError> {
    T::deserialize(cursor).map_err(|e| EncodingError::InvalidField {
        field: std::any::type_name::<T>(),
        reason: e.to_string(),
    })
}

/// Split an 8-byte selector or discriminator off the front of `bytes`.
pub fn split_discriminator(bytes: &[u8]) -> Result<([u8; DISCRIMINATOR_LEN], &[u8]), EncodingError> {
    if bytes.len() < DISCRIMINATOR_LEN {
        return Err(EncodingError::Truncated {
            expected: DISCRIMINATOR_LEN,
            found: bytes.len(),
        });
    }
    let (head, rest) = bytes.split_at(DISCRIMINATOR_LEN);
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(head);
    Ok((discriminator, rest))
}
