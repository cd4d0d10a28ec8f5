use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;
use thiserror::Error;

/// Custom errors raised by the Sunpath program, keyed by Anchor error code.
#[derive(Clone, Copy, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum SunpathProgramError {
    /// 6000 - Reward amount is too low.
    #[error("Reward amount is too low.")]
    RewardAmountTooLow = 0x1770,
    /// 6001 - Timestamp calculation resulted in an overflow.
    #[error("Timestamp calculation resulted in an overflow.")]
    TimestampOverflow = 0x1771,
    /// 6002 - The signer is not the admin.
    #[error("The signer is not the admin.")]
    NotAdmin = 0x1772,
    /// 6003 - The task is not in an open state for this operation.
    #[error("The task is not in an open state for this operation.")]
    TaskNotOpen = 0x1773,
    /// 6004 - The task has already expired.
    #[error("The task has already expired.")]
    TaskExpired = 0x1774,
    /// 6005 - The signer is not the consigner of this task.
    #[error("The signer is not the consigner of this task.")]
    NotConsigner = 0x1775,
    /// 6006 - Funds cannot be reclaimed yet.
    #[error("Funds cannot be reclaimed yet.")]
    CannotReclaimFunds = 0x1776,
    /// 6007 - Denial lockup period is still active.
    #[error("Denial lockup period is still active.")]
    DenialLockupActive = 0x1777,
    /// 6008 - Counter overflow.
    #[error("Counter overflow.")]
    CounterOverflow = 0x1778,
    /// 6009 - The signer is not the task consigner.
    #[error("The signer is not the task consigner.")]
    NotTaskConsigner = 0x1779,
}

impl SunpathProgramError {
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_u32(code)
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Human-readable text for a custom instruction error code.
///
/// Covers the program's own table, the Anchor framework codes an account
/// constraint failure produces, and the system program's "already in use"
/// error that a second `create_task` for the same task id runs into.
pub fn describe_custom_error(code: u32) -> String {
    if let Some(err) = SunpathProgramError::from_code(code) {
        return err.to_string();
    }
    let text = match code {
        0 => "account already in use",
        100 => "instruction discriminator not provided",
        101 => "instruction fallback not found",
        102 => "instruction did not deserialize",
        2000 => "a mut constraint was violated",
        2001 => "a has_one constraint was violated",
        2002 => "a signer constraint was violated",
        2006 => "a seeds constraint was violated",
        3001 => "account discriminator not found",
        3002 => "account discriminator mismatch",
        3003 => "failed to deserialize the account",
        3005 => "not enough account keys given to the instruction",
        3006 => "the given account is not mutable",
        3007 => "the given account is owned by a different program",
        3008 => "program ID was not as expected",
        3010 => "the given account did not sign",
        3012 => "the program expected this account to be already initialized",
        _ => return format!("unknown custom error {code}"),
    };
    text.to_string()
}
