use solana_sdk::{
    instruction::InstructionError, pubkey::Pubkey, signature::Signature,
    transaction::TransactionError,
};
use thiserror::Error;

use crate::errors::sunpath::{describe_custom_error, SunpathProgramError};
use crate::lifecycle::TaskPhase;

pub type Result<T, E = SunpathClientError> = std::result::Result<T, E>;

/// Malformed or out-of-range wire data. Raised before any network I/O on the
/// write side, and when decoding account or instruction bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: i128, target: &'static str },
    #[error("invalid integer literal {0:?}")]
    InvalidLiteral(String),
    #[error("invalid public key {0:?}")]
    InvalidPublicKey(String),
    #[error("expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("{0} trailing bytes after decoding")]
    TrailingBytes(usize),
    #[error("unknown instruction selector {0:02x?}")]
    UnknownSelector([u8; 8]),
    #[error("account discriminator mismatch for {account}")]
    DiscriminatorMismatch { account: &'static str },
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("{0} is not set")]
    MissingField(&'static str),
}

/// Seed or program id misconfiguration. Never a user-recoverable condition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DerivationError {
    #[error("{count} seeds given, at most {max} are allowed")]
    TooManySeeds { count: usize, max: usize },
    #[error("seed {index} is {len} bytes, at most {max} are allowed")]
    SeedTooLong { index: usize, len: usize, max: usize },
    #[error("no bump in 0..=255 yields an off-curve address")]
    NoViableBump,
    #[error("account {address} is owned by {owner}, expected program {program_id}")]
    ForeignOwner {
        address: Pubkey,
        owner: Pubkey,
        program_id: Pubkey,
    },
}

/// A local lifecycle check failed; the instruction was never sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("task account {address} already exists")]
    TaskAlreadyExists { address: Pubkey },
    #[error("task account {address} does not exist")]
    TaskNotFound { address: Pubkey },
    #[error("task is {phase}, expected {expected}")]
    InvalidPhase {
        phase: TaskPhase,
        expected: &'static str,
    },
    #[error("task expired at {expires_at} (ledger time {now})")]
    TaskExpired { expires_at: i64, now: i64 },
    #[error("task is available until {expires_at} (ledger time {now}), nothing to reclaim yet")]
    NotYetExpired { expires_at: i64, now: i64 },
    #[error("rejection lockup active until {until} (ledger time {now})")]
    DenialLockupActive { until: i64, now: i64 },
    #[error("signer {signer} is not the requester {requester} of this task")]
    NotRequester { signer: Pubkey, requester: Pubkey },
    #[error("admin action counter {address} is not initialized")]
    AdminCounterMissing { address: Pubkey },
    #[error("admin action counter {address} is already initialized")]
    AdminCounterExists { address: Pubkey },
    #[error("program config {address} is not initialized")]
    ConfigMissing { address: Pubkey },
    #[error("program config {address} is already initialized")]
    ConfigExists { address: Pubkey },
    #[error("reward must be greater than zero")]
    ZeroReward,
    #[error("reward {requested} is below the program minimum {minimum}")]
    RewardTooLow { requested: u64, minimum: u64 },
    #[error("ledger time {now} plus duration {duration_seconds}s overflows")]
    TimestampOverflow { now: i64, duration_seconds: i64 },
}

#[derive(Debug, Error)]
pub enum SunpathClientError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("program rejected transaction: {message}")]
    RemoteRejection {
        signature: Option<Signature>,
        error: TransactionError,
        program_error: Option<SunpathProgramError>,
        message: String,
    },

    #[error("network error during {operation}: {message}")]
    Network {
        operation: &'static str,
        message: String,
    },

    #[error("transaction {signature} submitted but not confirmed in time; re-query state before retrying")]
    Unconfirmed { signature: Signature },

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("no {0} configured")]
    MissingCapability(&'static str),
}

impl SunpathClientError {
    pub fn network(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Network {
            operation,
            message: err.to_string(),
        }
    }

    /// Map a ledger-reported failure into a typed rejection, naming the
    /// program error when the custom code is one of ours.
    pub fn rejection(error: TransactionError, signature: Option<Signature>) -> Self {
        let (program_error, message) = match &error {
            TransactionError::InstructionError(index, InstructionError::Custom(code)) => (
                SunpathProgramError::from_code(*code),
                format!(
                    "instruction {index}: {} (custom error {code})",
                    describe_custom_error(*code)
                ),
            ),
            TransactionError::InstructionError(index, other) => {
                (None, format!("instruction {index}: {other}"))
            }
            other => (None, other.to_string()),
        };
        Self::RemoteRejection {
            signature,
            error,
            program_error,
            message,
        }
    }

    /// Only transport failures are safe to retry blindly.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// True when the target account was already created, either caught
    /// locally or reported by the system program. A duplicate create is an
    /// idempotency signal, not a failure to hide.
    pub fn is_already_initialized(&self) -> bool {
        match self {
            Self::Precondition(
                PreconditionError::TaskAlreadyExists { .. }
                | PreconditionError::AdminCounterExists { .. }
                | PreconditionError::ConfigExists { .. },
            ) => true,
            Self::RemoteRejection { error, .. } => matches!(
                error,
                TransactionError::InstructionError(_, InstructionError::Custom(0))
            ),
            _ => false,
        }
    }

    pub fn program_error(&self) -> Option<SunpathProgramError> {
        match self {
            Self::RemoteRejection { program_error, .. } => *program_error,
            _ => None,
        }
    }
}
