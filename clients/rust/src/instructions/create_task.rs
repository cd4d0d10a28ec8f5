use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::{required, system_program, SunpathInstruction};
use crate::errors::Result;
use crate::pda;

/// Accounts.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub task_account: Pubkey,
    pub requester: Pubkey,
    pub config: Pubkey,
    pub system_program: Pubkey,
}

impl CreateTask {
    pub fn instruction(
        &self,
        program_id: Pubkey,
        args: CreateTaskInstructionArgs,
    ) -> Result<Instruction> {
        let accounts = vec![
            AccountMeta::new(self.task_account, false),
            AccountMeta::new(self.requester, true),
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new_readonly(self.system_program, false),
        ];
        Ok(Instruction {
            program_id,
            accounts,
            data: SunpathInstruction::CreateTask(args).encode()?,
        })
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateTaskInstructionArgs {
    pub task_id: u64,
    pub reward_amount: u64,
    pub duration_seconds: i64,
}

/// Instruction builder for `CreateTask`.
///
/// ### Accounts:
///
///   0. `[writable]` task_account (derived from requester and task id when unset)
///   1. `[writable, signer]` requester
///   2. `[]` config (derived when unset)
///   3. `[]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct CreateTaskBuilder {
    program_id: Option<Pubkey>,
    task_account: Option<Pubkey>,
    requester: Option<Pubkey>,
    config: Option<Pubkey>,
    system_program: Option<Pubkey>,
    task_id: Option<u64>,
    reward_amount: Option<u64>,
    duration_seconds: Option<i64>,
}

impl CreateTaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    /// `[optional]` defaults to the deployed program id.
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
    #[inline(always)]
    pub fn requester(&mut self, requester: Pubkey) -> &mut Self {
        self.requester = Some(requester);
        self
    }
    #[inline(always)]
    pub fn config(&mut self, config: Pubkey) -> &mut Self {
        self.config = Some(config);
        self
    }
    #[inline(always)]
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }
    #[inline(always)]
    pub fn task_id(&mut self, task_id: u64) -> &mut Self {
        self.task_id = Some(task_id);
        self
    }
    #[inline(always)]
    pub fn reward_amount(&mut self, reward_amount: u64) -> &mut Self {
        self.reward_amount = Some(reward_amount);
        self
    }
    #[inline(always)]
    pub fn duration_seconds(&mut self, duration_seconds: i64) -> &mut Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }

    pub fn instruction(&self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or(crate::SUNPATH_ID);
        let requester = required(self.requester, "requester")?;
        let task_id = required(self.task_id, "task_id")?;
        let task_account = match self.task_account {
            Some(address) => address,
            None => pda::find_task_account_pda(&requester, task_id, &program_id)?.0,
        };
        let config = match self.config {
            Some(address) => address,
            None => pda::find_config_pda(&program_id)?.0,
        };
        let accounts = CreateTask {
            task_account,
            requester,
            config,
            system_program: self.system_program.unwrap_or_else(system_program),
        };
        let args = CreateTaskInstructionArgs {
            task_id,
            reward_amount: required(self.reward_amount, "reward_amount")?,
            duration_seconds: required(self.duration_seconds, "duration_seconds")?,
        };
        accounts.instruction(program_id, args)
    }
}
