use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::{required, system_program, SunpathInstruction};
use crate::errors::{EncodingError, Result};
use crate::pda;

/// Accounts.
#[derive(Debug, Clone)]
pub struct AcceptTask {
    pub task_account: Pubkey,
    pub requester: Pubkey,
    pub recipient: Pubkey,
    pub config: Pubkey,
    pub admin_counter: Pubkey,
    pub system_program: Pubkey,
}

impl AcceptTask {
    pub fn instruction(
        &self,
        program_id: Pubkey,
        args: AcceptTaskInstructionArgs,
    ) -> Result<Instruction> {
        let accounts = vec![
            AccountMeta::new(self.task_account, false),
            AccountMeta::new(self.requester, true),
            AccountMeta::new(self.recipient, false),
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new(self.admin_counter, false),
            AccountMeta::new_readonly(self.system_program, false),
        ];
        Ok(Instruction {
            program_id,
            accounts,
            data: SunpathInstruction::AcceptTask(args).encode()?,
        })
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AcceptTaskInstructionArgs {
    pub recipient: Pubkey,
}

/// Instruction builder for `AcceptTask`.
///
/// ### Accounts:
///
///   0. `[writable]` task_account (set directly, or derived from requester and `task_id`)
///   1. `[writable, signer]` requester
///   2. `[writable]` recipient (also the instruction argument)
///   3. `[]` config (derived when unset)
///   4. `[writable]` admin_counter (derived from requester when unset)
///   5. `[]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct AcceptTaskBuilder {
    program_id: Option<Pubkey>,
    task_account: Option<Pubkey>,
    task_id: Option<u64>,
    requester: Option<Pubkey>,
    recipient: Option<Pubkey>,
    config: Option<Pubkey>,
    admin_counter: Option<Pubkey>,
    system_program: Option<Pubkey>,
}

impl AcceptTaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    #[inline(always)]
    pub fn program_id(&mut self, program_id: Pubkey) -> &mut Self {
        self.program_id = Some(program_id);
        self
    }
    #[inline(always)]
    pub fn task_account(&mut self, task_account: Pubkey) -> &mut Self {
        self.task_account = Some(task_account);
        self
    }
    /// Used only to derive `task_account`; not part of the instruction data.
    #[inline(always)]
    pub fn task_id(&mut self, task_id: u64) -> &mut Self {
        self.task_id = Some(task_id);
        self
    }
    #[inline(always)]
    pub fn requester(&mut self, requester: Pubkey) -> &mut Self {
        self.requester = Some(requester);
        self
    }
    #[inline(always)]
    pub fn recipient(&mut self, recipient: Pubkey) -> &mut Self {
        self.recipient = Some(recipient);
        self
    }
    #[inline(always)]
    pub fn config(&mut self, config: Pubkey) -> &mut Self {
        self.config = Some(config);
        self
    }
    #[inline(always)]
    pub fn admin_counter(&mut self, admin_counter: Pubkey) -> &mut Self {
        self.admin_counter = Some(admin_counter);
        self
    }
    #[inline(always)]
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    pub fn instruction(&self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or(crate::SUNPATH_ID);
        let requester = required(self.requester, "requester")?;
        let recipient = required(self.recipient, "recipient")?;
        let accounts = AcceptTask {
            task_account: task_account_for(self.task_account, self.task_id, &requester, &program_id)?,
            requester,
            recipient,
            config: match self.config {
                Some(address) => address,
                None => pda::find_config_pda(&program_id)?.0,
            },
            admin_counter: match self.admin_counter {
                Some(address) => address,
                None => pda::find_admin_counter_pda(&requester, &program_id)?.0,
            },
            system_program: self.system_program.unwrap_or_else(system_program),
        };
        accounts.instruction(program_id, AcceptTaskInstructionArgs { recipient })
    }
}

/// Explicit address wins; otherwise derive from the requester and task id.
pub(crate) fn task_account_for(
    explicit: Option<Pubkey>,
    task_id: Option<u64>,
    requester: &Pubkey,
    program_id: &Pubkey,
) -> Result<Pubkey> {
    match (explicit, task_id) {
        (Some(address), _) => Ok(address),
        (None, Some(task_id)) => Ok(pda::find_task_account_pda(requester, task_id, program_id)?.0),
        (None, None) => Err(EncodingError::MissingField("task_account").into()),
    }
}
