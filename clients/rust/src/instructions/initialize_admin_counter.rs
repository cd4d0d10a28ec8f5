use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::{required, system_program, SunpathInstruction};
use crate::errors::Result;
use crate::pda;

/// Accounts.
#[derive(Debug, Clone)]
pub struct InitializeAdminCounter {
    pub admin_counter: Pubkey,
    pub admin: Pubkey,
    pub system_program: Pubkey,
}

impl InitializeAdminCounter {
    pub fn instruction(&self, program_id: Pubkey) -> Result<Instruction> {
        let accounts = vec![
            AccountMeta::new(self.admin_counter, false),
            AccountMeta::new(self.admin, true),
            AccountMeta::new_readonly(self.system_program, false),
        ];
        Ok(Instruction {
            program_id,
            accounts,
            data: SunpathInstruction::InitializeAdminCounter.encode()?,
        })
    }
}

/// Instruction builder for `InitializeAdminCounter`.
///
/// ### Accounts:
///
///   0. `[writable]` admin_counter (derived from admin when unset)
///   1. `[writable, signer]` admin
///   2. `[]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct InitializeAdminCounterBuilder {
    program_id: Option<Pubkey>,
    admin_counter: Option<Pubkey>,
    admin: Option<Pubkey>,
    system_program: Option<Pubkey>,
}

impl InitializeAdminCounterBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    #[inline(always)]
    pub fn program_id(&mut self, program_id: Pubkey) -> &mut Self {
        self.program_id = Some(program_id);
        self
    }
    #[inline(always)]
    pub fn admin_counter(&mut self, admin_counter: Pubkey) -> &mut Self {
        self.admin_counter = Some(admin_counter);
        self
    }
    /// The requester whose accept/reject decisions the counter tallies.
    #[inline(always)]
    pub fn admin(&mut self, admin: Pubkey) -> &mut Self {
        self.admin = Some(admin);
        self
    }
    #[inline(always)]
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    pub fn instruction(&self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or(crate::SUNPATH_ID);
        let admin = required(self.admin, "admin")?;
        let accounts = InitializeAdminCounter {
            admin_counter: match self.admin_counter {
                Some(address) => address,
                None => pda::find_admin_counter_pda(&admin, &program_id)?.0,
            },
            admin,
            system_program: self.system_program.unwrap_or_else(system_program),
        };
        accounts.instruction(program_id)
    }
}
