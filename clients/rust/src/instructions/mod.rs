pub mod accept_task;
pub mod create_task;
pub mod initialize_admin_counter;
pub mod initialize_program;
pub mod reclaim_task_funds;
pub mod reject_task;
pub mod selectors;

pub use accept_task::*;
pub use create_task::*;
pub use initialize_admin_counter::*;
pub use initialize_program::*;
pub use reclaim_task_funds::*;
pub use reject_task::*;
pub use selectors::*;

use solana_sdk::pubkey::Pubkey;

use crate::codec;
use crate::errors::EncodingError;

/// Decoded instruction data: selector plus typed arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SunpathInstruction {
    InitializeProgram(InitializeProgramInstructionArgs),
    InitializeAdminCounter,
    CreateTask(CreateTaskInstructionArgs),
    AcceptTask(AcceptTaskInstructionArgs),
    RejectTask,
    ReclaimTaskFunds,
}

impl SunpathInstruction {
    pub fn kind(&self) -> InstructionKind {
        match self {
            Self::InitializeProgram(_) => InstructionKind::InitializeProgram,
            Self::InitializeAdminCounter => InstructionKind::InitializeAdminCounter,
            Self::CreateTask(_) => InstructionKind::CreateTask,
            Self::AcceptTask(_) => InstructionKind::AcceptTask,
            Self::RejectTask => InstructionKind::RejectTask,
            Self::ReclaimTaskFunds => InstructionKind::ReclaimTaskFunds,
        }
    }

    /// `selector ‖ borsh(args)`.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        let mut data = self.kind().selector().to_vec();
        match self {
            Self::InitializeProgram(args) => data.extend(codec::encode(args)?),
            Self::CreateTask(args) => data.extend(codec::encode(args)?),
            Self::AcceptTask(args) => data.extend(codec::encode(args)?),
            Self::InitializeAdminCounter | Self::RejectTask | Self::ReclaimTaskFunds => {}
        }
        Ok(data)
    }

    pub fn decode(data: &[u8]) -> Result<Self, EncodingError> {
        let (selector, args) = codec::split_discriminator(data)?;
        let kind =
            InstructionKind::from_selector(&selector).ok_or(EncodingError::UnknownSelector(selector))?;
        let decoded = match kind {
            InstructionKind::InitializeProgram => Self::InitializeProgram(codec::decode_exact(args)?),
            InstructionKind::CreateTask => Self::CreateTask(codec::decode_exact(args)?),
            InstructionKind::AcceptTask => Self::AcceptTask(codec::decode_exact(args)?),
            InstructionKind::InitializeAdminCounter
            | InstructionKind::RejectTask
            | InstructionKind::ReclaimTaskFunds => {
                if !args.is_empty() {
                    return Err(EncodingError::TrailingBytes(args.len()));
                }
                match kind {
                    InstructionKind::InitializeAdminCounter => Self::InitializeAdminCounter,
                    InstructionKind::RejectTask => Self::RejectTask,
                    _ => Self::ReclaimTaskFunds,
                }
            }
        };
        Ok(decoded)
    }
}

pub(crate) fn required<T: Copy>(value: Option<T>, field: &'static str) -> Result<T, EncodingError> {
    value.ok_or(EncodingError::MissingField(field))
}

pub(crate) fn system_program() -> Pubkey {
    solana_sdk_ids::system_program::ID
}
