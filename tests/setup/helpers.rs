use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
use sunpath_client::{PreconditionError, SunpathClientError, SunpathProgramError};

pub struct Helpers;

impl Helpers {
    /// Unwrap a remote rejection carrying the given custom error code.
    pub fn expect_custom_code(err: &SunpathClientError, code: u32) {
        match err {
            SunpathClientError::RemoteRejection {
                error: TransactionError::InstructionError(_, InstructionError::Custom(found)),
                ..
            } => assert_eq!(*found, code, "unexpected custom code: {err}"),
            other => panic!("expected custom error {code}, got {other:?}"),
        }
    }

    pub fn expect_program_error(err: &SunpathClientError, expected: SunpathProgramError) {
        assert_eq!(
            err.program_error(),
            Some(expected),
            "expected {expected:?}, got {err:?}"
        );
    }

    pub fn expect_precondition(err: SunpathClientError) -> PreconditionError {
        match err {
            SunpathClientError::Precondition(precondition) => precondition,
            other => panic!("expected a precondition error, got {other:?}"),
        }
    }
}
