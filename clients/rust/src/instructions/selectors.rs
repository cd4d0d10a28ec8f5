//! Method selectors published by the deployed program.
//!
//! These are recorded values, not derived ones. A wrong entry fails only
//! when the program refuses the instruction, so every row is pinned by a
//! golden-byte test.

use serde::Serialize;

use crate::codec::DISCRIMINATOR_LEN;

/// Bump when the deployed program's interface changes.
pub const SELECTOR_TABLE_VERSION: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InstructionKind {
    InitializeProgram,
    InitializeAdminCounter,
    CreateTask,
    AcceptTask,
    RejectTask,
    ReclaimTaskFunds,
}

/// `(kind, program method name, selector)`.
pub const SELECTORS: [(InstructionKind, &str, [u8; DISCRIMINATOR_LEN]); 6] = [
    (
        InstructionKind::InitializeProgram,
        "initialize_program",
        [176, 107, 205, 168, 24, 157, 175, 103],
    ),
    (
        InstructionKind::InitializeAdminCounter,
        "initialize_admin_counter",
        [75, 91, 216, 32, 21, 249, 169, 251],
    ),
    (
        InstructionKind::CreateTask,
        "create_task",
        [194, 80, 6, 180, 232, 127, 48, 171],
    ),
    (
        InstructionKind::AcceptTask,
        "accept_task",
        [222, 196, 79, 165, 120, 30, 38, 120],
    ),
    (
        InstructionKind::RejectTask,
        "reject_task",
        [152, 59, 207, 37, 222, 254, 28, 106],
    ),
    (
        InstructionKind::ReclaimTaskFunds,
        "reclaim_task_funds",
        [117, 112, 75, 205, 124, 103, 96, 192],
    ),
];

impl InstructionKind {
    pub const ALL: [InstructionKind; 6] = [
        InstructionKind::InitializeProgram,
        InstructionKind::InitializeAdminCounter,
        InstructionKind::CreateTask,
        InstructionKind::AcceptTask,
        InstructionKind::RejectTask,
        InstructionKind::ReclaimTaskFunds,
    ];

    fn row(self) -> &'static (InstructionKind, &'static str, [u8; DISCRIMINATOR_LEN]) {
        // every variant has exactly one row
        &SELECTORS[self as usize]
    }

    pub fn method_name(self) -> &'static str {
        self.row().1
    }

    pub fn selector(self) -> [u8; DISCRIMINATOR_LEN] {
        self.row().2
    }

    pub fn from_selector(selector: &[u8; DISCRIMINATOR_LEN]) -> Option<Self> {
        SELECTORS
            .iter()
            .find(|(_, _, s)| s == selector)
            .map(|(kind, _, _)| *kind)
    }
}
