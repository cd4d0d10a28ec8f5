//! Task lifecycle as enforced by the program, mirrored for pre-flight checks.
//!
//! ```text
//! create ──> Available ──accept──> Approved
//!                │  │
//!                │  └──reject──> Rejected ──reclaim (after lockup)──> Reclaimed
//!                └──reclaim (only once expired)──────────────────────> Reclaimed
//! ```
//!
//! Expiry is computed from `expires_at` against ledger time; it is never a
//! stored transition. The program re-validates everything, these checks only
//! spare a round trip.

use std::fmt;

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::accounts::{ProgramConfig, TaskAccount, TaskStatus};
use crate::errors::PreconditionError;
use crate::instructions::InstructionKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskPhase {
    Available,
    Approved,
    Rejected,
    Reclaimed,
}

impl TaskPhase {
    pub fn from_status(status: TaskStatus) -> Self {
        match status {
            // never written by the program; expiry stays a computed predicate
            TaskStatus::Open | TaskStatus::Expired => Self::Available,
            TaskStatus::Approved => Self::Approved,
            TaskStatus::Rejected => Self::Rejected,
            TaskStatus::Reclaimed => Self::Reclaimed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Reclaimed)
    }

    /// Whether the program still holds the reward for this task.
    pub fn holds_reward(self) -> bool {
        matches!(self, Self::Available | Self::Rejected)
    }
}

impl fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskAction {
    Accept,
    Reject,
    Reclaim,
}

impl TaskAction {
    pub fn instruction_kind(self) -> InstructionKind {
        match self {
            Self::Accept => InstructionKind::AcceptTask,
            Self::Reject => InstructionKind::RejectTask,
            Self::Reclaim => InstructionKind::ReclaimTaskFunds,
        }
    }

    /// Accept and reject tally on the requester's admin counter.
    pub fn requires_admin_counter(self) -> bool {
        matches!(self, Self::Accept | Self::Reject)
    }
}

/// Phase reached by `action` from `phase`, ignoring time. `None` means the
/// program will refuse regardless of the clock.
pub fn next_phase(phase: TaskPhase, action: TaskAction) -> Option<TaskPhase> {
    match (phase, action) {
        (TaskPhase::Available, TaskAction::Accept) => Some(TaskPhase::Approved),
        (TaskPhase::Available, TaskAction::Reject) => Some(TaskPhase::Rejected),
        (TaskPhase::Available | TaskPhase::Rejected, TaskAction::Reclaim) => {
            Some(TaskPhase::Reclaimed)
        }
        _ => None,
    }
}

/// Time-dependent policy read from the program config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifecyclePolicy {
    pub minimum_reward_amount: u64,
    pub denial_penalty_duration: i64,
}

impl From<&ProgramConfig> for LifecyclePolicy {
    fn from(config: &ProgramConfig) -> Self {
        Self {
            minimum_reward_amount: config.minimum_reward_amount,
            denial_penalty_duration: config.denial_penalty_duration,
        }
    }
}

/// Validate a create and return the resulting `expires_at`.
pub fn check_create(
    reward_amount: u64,
    duration_seconds: i64,
    now: i64,
    policy: &LifecyclePolicy,
) -> Result<i64, PreconditionError> {
    if reward_amount == 0 {
        return Err(PreconditionError::ZeroReward);
    }
    if reward_amount < policy.minimum_reward_amount {
        return Err(PreconditionError::RewardTooLow {
            requested: reward_amount,
            minimum: policy.minimum_reward_amount,
        });
    }
    now.checked_add(duration_seconds)
        .ok_or(PreconditionError::TimestampOverflow {
            now,
            duration_seconds,
        })
}

/// Validate `action` by `signer` against the current task state at ledger
/// time `now`, returning the phase the task will move to.
pub fn check_transition(
    task: &TaskAccount,
    action: TaskAction,
    signer: &Pubkey,
    now: i64,
    policy: &LifecyclePolicy,
) -> Result<TaskPhase, PreconditionError> {
    if task.requester != *signer {
        return Err(PreconditionError::NotRequester {
            signer: *signer,
            requester: task.requester,
        });
    }
    let phase = TaskPhase::from_status(task.status);
    let next = next_phase(phase, action).ok_or(PreconditionError::InvalidPhase {
        phase,
        expected: match action {
            TaskAction::Accept | TaskAction::Reject => "Available",
            TaskAction::Reclaim => "Rejected or expired Available",
        },
    })?;

    match (phase, action) {
        (TaskPhase::Available, TaskAction::Accept | TaskAction::Reject) => {
            if task.is_expired(now) {
                return Err(PreconditionError::TaskExpired {
                    expires_at: task.expires_at,
                    now,
                });
            }
        }
        (TaskPhase::Available, TaskAction::Reclaim) => {
            if !task.is_expired(now) {
                return Err(PreconditionError::NotYetExpired {
                    expires_at: task.expires_at,
                    now,
                });
            }
        }
        (TaskPhase::Rejected, TaskAction::Reclaim) => {
            let until = task
                .status_updated_at
                .checked_add(policy.denial_penalty_duration)
                .ok_or(PreconditionError::TimestampOverflow {
                    now: task.status_updated_at,
                    duration_seconds: policy.denial_penalty_duration,
                })?;
            if now < until {
                return Err(PreconditionError::DenialLockupActive { until, now });
            }
        }
        _ => {}
    }
    Ok(next)
}
