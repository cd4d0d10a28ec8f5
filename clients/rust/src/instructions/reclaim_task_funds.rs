use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::accept_task::task_account_for;
use super::{required, system_program, SunpathInstruction};
use crate::errors::Result;
use crate::pda;

/// Accounts.
#[derive(Debug, Clone)]
pub struct ReclaimTaskFunds {
    pub task_account: Pubkey,
    pub requester: Pubkey,
    pub config: Pubkey,
    pub system_program: Pubkey,
}

impl ReclaimTaskFunds {
    pub fn instruction(&self, program_id: Pubkey) -> Result<Instruction> {
        let accounts = vec![
            AccountMeta::new(self.task_account, false),
            AccountMeta::new(self.requester, true),
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new_readonly(self.system_program, false),
        ];
        Ok(Instruction {
            program_id,
            accounts,
            data: SunpathInstruction::ReclaimTaskFunds.encode()?,
        })
    }
}

/// Instruction builder for `ReclaimTaskFunds`.
///
/// ### Accounts:
///
///   0. `[writable]` task_account
///   1. `[writable, signer]` requester
///   2. `[]` config
///   3. `[]` system_program
///
/// The admin counter is deliberately absent: reclaiming never counts as an
/// admin decision.
#[derive(Clone, Debug, Default)]
pub struct ReclaimTaskFundsBuilder {
    program_id: Option<Pubkey>,
    task_account: Option<Pubkey>,
    task_id: Option<u64>,
    requester: Option<Pubkey>,
    config: Option<Pubkey>,
    system_program: Option<Pubkey>,
}

impl ReclaimTaskFundsBuilder {
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
    pub fn config(&mut self, config: Pubkey) -> &mut Self {
        self.config = Some(config);
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
        let accounts = ReclaimTaskFunds {
            task_account: task_account_for(self.task_account, self.task_id, &requester, &program_id)?,
            requester,
            config: match self.config {
                Some(address) => address,
                None => pda::find_config_pda(&program_id)?.0,
            },
            system_program: self.system_program.unwrap_or_else(system_program),
        };
        accounts.instruction(program_id)
    }
}
