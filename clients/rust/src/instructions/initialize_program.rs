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
pub struct InitializeProgram {
    pub config: Pubkey,
    pub payer: Pubkey,
    pub system_program: Pubkey,
}

impl InitializeProgram {
    pub fn instruction(
        &self,
        program_id: Pubkey,
        args: InitializeProgramInstructionArgs,
    ) -> Result<Instruction> {
        let accounts = vec![
            AccountMeta::new(self.config, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.system_program, false),
        ];
        Ok(Instruction {
            program_id,
            accounts,
            data: SunpathInstruction::InitializeProgram(args).encode()?,
        })
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct InitializeProgramInstructionArgs {
    pub admin: Pubkey,
    pub dao_treasury_address: Pubkey,
    pub governance_token_mint: Pubkey,
    pub minimum_reward_amount: u64,
    pub dao_fee_percentage: u8,
    pub denial_penalty_duration: i64,
    pub patroller_governance_token_amount: u64,
}

/// Instruction builder for `InitializeProgram`.
///
/// ### Accounts:
///
///   0. `[writable]` config (derived when unset)
///   1. `[writable, signer]` payer
///   2. `[]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct InitializeProgramBuilder {
    program_id: Option<Pubkey>,
    config: Option<Pubkey>,
    payer: Option<Pubkey>,
    system_program: Option<Pubkey>,
    args: InitializeProgramInstructionArgs,
}

impl InitializeProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    #[inline(always)]
    pub fn program_id(&mut self, program_id: Pubkey) -> &mut Self {
        self.program_id = Some(program_id);
        self
    }
    #[inline(always)]
    pub fn config(&mut self, config: Pubkey) -> &mut Self {
        self.config = Some(config);
        self
    }
    #[inline(always)]
    pub fn payer(&mut self, payer: Pubkey) -> &mut Self {
        self.payer = Some(payer);
        self
    }
    #[inline(always)]
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }
    #[inline(always)]
    pub fn args(&mut self, args: InitializeProgramInstructionArgs) -> &mut Self {
        self.args = args;
        self
    }

    pub fn instruction(&self) -> Result<Instruction> {
        let program_id = self.program_id.unwrap_or(crate::SUNPATH_ID);
        let accounts = InitializeProgram {
            config: match self.config {
                Some(address) => address,
                None => pda::find_config_pda(&program_id)?.0,
            },
            payer: required(self.payer, "payer")?,
            system_program: self.system_program.unwrap_or_else(system_program),
        };
        accounts.instruction(program_id, self.args.clone())
    }
}
