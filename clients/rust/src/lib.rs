//! Client-side transaction construction for the Sunpath task-reward program.
//!
//! A requester locks a reward in a program-owned task account; the program
//! later pays it to a fulfiller (accept), freezes it (reject) or returns it
//! (reclaim). This crate builds the byte-exact instructions for that program,
//! derives its account addresses, assembles transactions around a fresh
//! blockhash and mirrors the task lifecycle for pre-flight checks.

pub mod accounts;
pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod instructions;
pub mod ledger;
pub mod lifecycle;
pub mod pda;
pub mod rpc;
pub mod transaction;

pub use client::{Receipt, SunpathClient, SunpathClientBuilder, TaskCacheRecord};
pub use config::{ClientConfig, Commitment, ConfigError};
pub use errors::{
    DerivationError, EncodingError, PreconditionError, Result, SunpathClientError,
    SunpathProgramError,
};
pub use ledger::{AccountSnapshot, LedgerReader, SignatureStatus, WalletSigner};
pub use lifecycle::{TaskAction, TaskPhase};

use solana_sdk::pubkey::Pubkey;

/// Address of the deployed Sunpath program.
pub const SUNPATH_ID: Pubkey = Pubkey::from_str_const("Drr2eM6yoGXL2QZHdaFzXzUDDPQarV8acbbYWTBAtNyE");
