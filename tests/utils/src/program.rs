//! The Sunpath program's account rules, re-stated against an in-memory
//! account map. Error codes match what the deployed program and the Anchor
//! framework report, so client-side mapping is exercised end to end.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use solana_sdk::{instruction::InstructionError, pubkey::Pubkey};
use sunpath_client::accounts::{
    AdminActionCounter, ProgramAccount, ProgramConfig, TaskAccount, TaskStatus,
};
use sunpath_client::errors::EncodingError;
use sunpath_client::ledger::AccountSnapshot;

pub const ACCOUNT_ALREADY_IN_USE: u32 = 0;
pub const INSUFFICIENT_FUNDS: u32 = 1;
pub const INSTRUCTION_MISSING: u32 = 100;
pub const INSTRUCTION_FALLBACK_NOT_FOUND: u32 = 101;
pub const INSTRUCTION_DID_NOT_DESERIALIZE: u32 = 102;
pub const CONSTRAINT_MUT: u32 = 2000;
pub const CONSTRAINT_SEEDS: u32 = 2006;
pub const ACCOUNT_DISCRIMINATOR_MISMATCH: u32 = 3002;
pub const ACCOUNT_DID_NOT_DESERIALIZE: u32 = 3003;
pub const ACCOUNT_NOT_ENOUGH_KEYS: u32 = 3005;
pub const ACCOUNT_OWNED_BY_WRONG_PROGRAM: u32 = 3007;
pub const INVALID_PROGRAM_ID: u32 = 3008;
pub const ACCOUNT_NOT_SIGNER: u32 = 3010;
pub const ACCOUNT_NOT_INITIALIZED: u32 = 3012;

pub const REWARD_AMOUNT_TOO_LOW: u32 = 6000;
pub const TIMESTAMP_OVERFLOW: u32 = 6001;
pub const TASK_NOT_OPEN: u32 = 6003;
pub const TASK_EXPIRED: u32 = 6004;
pub const NOT_CONSIGNER: u32 = 6005;
pub const CANNOT_RECLAIM_FUNDS: u32 = 6006;
pub const DENIAL_LOCKUP_ACTIVE: u32 = 6007;
pub const COUNTER_OVERFLOW: u32 = 6008;
pub const NOT_TASK_CONSIGNER: u32 = 6009;

type ProgramResult = Result<(), InstructionError>;

/// Rent-exempt balance for an account of `len` bytes.
pub fn rent_exempt_minimum(len: usize) -> u64 {
    (len as u64 + 128) * 3_480 * 2
}

fn custom(code: u32) -> InstructionError {
    InstructionError::Custom(code)
}

fn anchor_selector(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{name}").as_bytes());
    let mut selector = [0u8; 8];
    selector.copy_from_slice(&digest[..8]);
    selector
}

#[derive(Clone, Copy, Debug)]
pub struct AccountRef {
    pub key: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Little-endian argument cursor. Trailing bytes are ignored, as Anchor does.
struct ArgReader<'a>(&'a [u8]);

impl ArgReader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], InstructionError> {
        if self.0.len() < N {
            return Err(custom(INSTRUCTION_DID_NOT_DESERIALIZE));
        }
        let (head, rest) = self.0.split_at(N);
        self.0 = rest;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, InstructionError> {
        Ok(self.take::<1>()?[0])
    }

    fn u64(&mut self) -> Result<u64, InstructionError> {
        Ok(u64::from_le_bytes(self.take()?))
    }

    fn i64(&mut self) -> Result<i64, InstructionError> {
        Ok(i64::from_le_bytes(self.take()?))
    }

    fn pubkey(&mut self) -> Result<Pubkey, InstructionError> {
        Ok(Pubkey::new_from_array(self.take()?))
    }
}

pub struct MockProgram<'a> {
    pub program_id: Pubkey,
    pub accounts: &'a mut HashMap<Pubkey, AccountSnapshot>,
    pub now: i64,
}

impl MockProgram<'_> {
    pub fn process(&mut self, accounts: &[AccountRef], data: &[u8]) -> ProgramResult {
        if data.len() < 8 {
            return Err(custom(INSTRUCTION_MISSING));
        }
        let (selector, args) = data.split_at(8);
        let mut args = ArgReader(args);
        if selector == anchor_selector("initialize_program") {
            self.initialize_program(accounts, &mut args)
        } else if selector == anchor_selector("initialize_admin_counter") {
            self.initialize_admin_counter(accounts)
        } else if selector == anchor_selector("create_task") {
            self.create_task(accounts, &mut args)
        } else if selector == anchor_selector("accept_task") {
            self.accept_task(accounts, &mut args)
        } else if selector == anchor_selector("reject_task") {
            self.reject_task(accounts)
        } else if selector == anchor_selector("reclaim_task_funds") {
            self.reclaim_task_funds(accounts)
        } else {
            Err(custom(INSTRUCTION_FALLBACK_NOT_FOUND))
        }
    }

    fn initialize_program(&mut self, accounts: &[AccountRef], args: &mut ArgReader) -> ProgramResult {
        let [config, admin, system] = take_accounts::<3>(accounts)?;
        let value = ProgramConfig {
            admin: args.pubkey()?,
            dao_treasury_address: args.pubkey()?,
            governance_token_mint: args.pubkey()?,
            minimum_reward_amount: args.u64()?,
            dao_fee_percentage: args.u8()?,
            denial_penalty_duration: args.i64()?,
            patroller_governance_token_amount: args.u64()?,
            is_initialized: true,
        };
        writable(&config)?;
        self.expect_pda(&config, &[b"config_v2"])?;
        signer(&admin)?;
        writable(&admin)?;
        system_program(&system)?;
        self.init(&admin.key, &config.key, &value, ProgramConfig::LEN)
    }

    fn initialize_admin_counter(&mut self, accounts: &[AccountRef]) -> ProgramResult {
        let [counter, admin, system] = take_accounts::<3>(accounts)?;
        writable(&counter)?;
        self.expect_pda(&counter, &[b"admin_counter", admin.key.as_ref()])?;
        signer(&admin)?;
        writable(&admin)?;
        system_program(&system)?;
        let value = AdminActionCounter {
            admin: admin.key,
            accept_count: 0,
            reject_count: 0,
        };
        self.init(&admin.key, &counter.key, &value, AdminActionCounter::LEN)
    }

    fn create_task(&mut self, accounts: &[AccountRef], args: &mut ArgReader) -> ProgramResult {
        let task_id = args.u64()?;
        let reward_amount = args.u64()?;
        let duration_seconds = args.i64()?;
        let [task, consigner, config, system] = take_accounts::<4>(accounts)?;

        writable(&task)?;
        self.expect_pda(
            &task,
            &[b"task_account", consigner.key.as_ref(), &task_id.to_le_bytes()],
        )?;
        signer(&consigner)?;
        writable(&consigner)?;
        let config_value = self.load_config(&config)?;
        system_program(&system)?;

        let value = TaskAccount {
            task_id,
            requester: consigner.key,
            reward_amount_locked: reward_amount,
            created_at: self.now,
            duration_seconds,
            expires_at: self
                .now
                .checked_add(duration_seconds)
                .ok_or(custom(TIMESTAMP_OVERFLOW))?,
            status: TaskStatus::Open,
            status_updated_at: self.now,
            recipient: None,
            report_account: None,
            is_initialized: true,
        };
        self.init(&consigner.key, &task.key, &value, TaskAccount::LEN)?;

        if reward_amount < config_value.minimum_reward_amount {
            return Err(custom(REWARD_AMOUNT_TOO_LOW));
        }
        self.transfer(&consigner.key, &task.key, reward_amount)
    }

    fn accept_task(&mut self, accounts: &[AccountRef], args: &mut ArgReader) -> ProgramResult {
        let recipient_arg = args.pubkey()?;
        let [task, consigner, recipient, config, counter, system] = take_accounts::<6>(accounts)?;

        let mut task_value = self.load_task(&task, &consigner, NOT_TASK_CONSIGNER)?;
        signer(&consigner)?;
        writable(&consigner)?;
        writable(&recipient)?;
        self.load_config(&config)?;
        let mut counter_value = self.load_counter(&counter, &consigner)?;
        system_program(&system)?;

        self.require_open_and_live(&task_value)?;
        let amount = task_value.reward_amount_locked;
        self.transfer(&task.key, &recipient.key, amount)?;

        task_value.status = TaskStatus::Approved;
        task_value.status_updated_at = self.now;
        task_value.recipient = Some(recipient_arg);
        counter_value.accept_count = counter_value
            .accept_count
            .checked_add(1)
            .ok_or(custom(COUNTER_OVERFLOW))?;
        self.store(&task.key, &task_value, TaskAccount::LEN)?;
        self.store(&counter.key, &counter_value, AdminActionCounter::LEN)
    }

    fn reject_task(&mut self, accounts: &[AccountRef]) -> ProgramResult {
        let [task, consigner, config, counter, system] = take_accounts::<5>(accounts)?;

        let mut task_value = self.load_task(&task, &consigner, NOT_TASK_CONSIGNER)?;
        signer(&consigner)?;
        writable(&consigner)?;
        self.load_config(&config)?;
        let mut counter_value = self.load_counter(&counter, &consigner)?;
        system_program(&system)?;

        self.require_open_and_live(&task_value)?;
        task_value.status = TaskStatus::Rejected;
        task_value.status_updated_at = self.now;
        counter_value.reject_count = counter_value
            .reject_count
            .checked_add(1)
            .ok_or(custom(COUNTER_OVERFLOW))?;
        self.store(&task.key, &task_value, TaskAccount::LEN)?;
        self.store(&counter.key, &counter_value, AdminActionCounter::LEN)
    }

    fn reclaim_task_funds(&mut self, accounts: &[AccountRef]) -> ProgramResult {
        let [task, consigner, config, system] = take_accounts::<4>(accounts)?;

        let mut task_value = self.load_task(&task, &consigner, NOT_CONSIGNER)?;
        signer(&consigner)?;
        writable(&consigner)?;
        let config_value = self.load_config(&config)?;
        system_program(&system)?;

        let reclaimable = match task_value.status {
            TaskStatus::Rejected => {
                let allowed_at = task_value
                    .status_updated_at
                    .checked_add(config_value.denial_penalty_duration)
                    .ok_or(custom(TIMESTAMP_OVERFLOW))?;
                if self.now < allowed_at {
                    return Err(custom(DENIAL_LOCKUP_ACTIVE));
                }
                true
            }
            TaskStatus::Open => self.now > task_value.expires_at,
            _ => false,
        };
        if !reclaimable {
            return Err(custom(CANNOT_RECLAIM_FUNDS));
        }

        let amount = task_value.reward_amount_locked;
        self.transfer(&task.key, &consigner.key, amount)?;
        task_value.status = TaskStatus::Reclaimed;
        task_value.status_updated_at = self.now;
        task_value.reward_amount_locked = 0;
        self.store(&task.key, &task_value, TaskAccount::LEN)
    }

    fn require_open_and_live(&self, task: &TaskAccount) -> ProgramResult {
        if task.status != TaskStatus::Open {
            return Err(custom(TASK_NOT_OPEN));
        }
        if self.now > task.expires_at {
            return Err(custom(TASK_EXPIRED));
        }
        Ok(())
    }

    fn expect_pda(&self, account: &AccountRef, seeds: &[&[u8]]) -> ProgramResult {
        let (expected, _) = Pubkey::find_program_address(seeds, &self.program_id);
        if account.key != expected {
            return Err(custom(CONSTRAINT_SEEDS));
        }
        Ok(())
    }

    fn load<T: ProgramAccount>(&self, key: &Pubkey) -> Result<T, InstructionError> {
        let snapshot = self
            .accounts
            .get(key)
            .ok_or(custom(ACCOUNT_NOT_INITIALIZED))?;
        if snapshot.owner != self.program_id {
            return Err(custom(ACCOUNT_OWNED_BY_WRONG_PROGRAM));
        }
        T::from_bytes(&snapshot.data).map_err(|err| match err {
            EncodingError::DiscriminatorMismatch { .. } => custom(ACCOUNT_DISCRIMINATOR_MISMATCH),
            _ => custom(ACCOUNT_DID_NOT_DESERIALIZE),
        })
    }

    /// Task accounts are re-derived from their own stored fields and must
    /// belong to the signer.
    fn load_task(
        &self,
        task: &AccountRef,
        consigner: &AccountRef,
        not_owner_code: u32,
    ) -> Result<TaskAccount, InstructionError> {
        let value: TaskAccount = self.load(&task.key)?;
        writable(task)?;
        self.expect_pda(
            task,
            &[b"task_account", value.requester.as_ref(), &value.task_id.to_le_bytes()],
        )?;
        if value.requester != consigner.key {
            return Err(custom(not_owner_code));
        }
        Ok(value)
    }

    fn load_config(&self, config: &AccountRef) -> Result<ProgramConfig, InstructionError> {
        let value = self.load(&config.key)?;
        self.expect_pda(config, &[b"config_v2"])?;
        Ok(value)
    }

    fn load_counter(
        &self,
        counter: &AccountRef,
        consigner: &AccountRef,
    ) -> Result<AdminActionCounter, InstructionError> {
        let value = self.load(&counter.key)?;
        writable(counter)?;
        self.expect_pda(counter, &[b"admin_counter", consigner.key.as_ref()])?;
        Ok(value)
    }

    fn init<T: ProgramAccount>(
        &mut self,
        payer: &Pubkey,
        key: &Pubkey,
        value: &T,
        len: usize,
    ) -> ProgramResult {
        if self.accounts.get(key).is_some_and(|a| a.lamports > 0 || !a.data.is_empty()) {
            return Err(custom(ACCOUNT_ALREADY_IN_USE));
        }
        let rent = rent_exempt_minimum(len);
        self.debit(payer, rent)?;
        self.accounts.insert(
            *key,
            AccountSnapshot {
                owner: self.program_id,
                lamports: rent,
                data: vec![0u8; len],
            },
        );
        self.store(key, value, len)
    }

    fn store<T: ProgramAccount>(&mut self, key: &Pubkey, value: &T, len: usize) -> ProgramResult {
        let mut data = value
            .to_bytes()
            .map_err(|_| InstructionError::AccountDataTooSmall)?;
        if data.len() > len {
            return Err(InstructionError::AccountDataTooSmall);
        }
        data.resize(len, 0);
        let account = self
            .accounts
            .get_mut(key)
            .ok_or(custom(ACCOUNT_NOT_INITIALIZED))?;
        account.data = data;
        Ok(())
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> ProgramResult {
        self.debit(from, amount)?;
        let account = self.accounts.entry(*to).or_insert_with(|| AccountSnapshot {
            owner: solana_sdk_ids::system_program::ID,
            lamports: 0,
            data: Vec::new(),
        });
        account.lamports = account
            .lamports
            .checked_add(amount)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        Ok(())
    }

    fn debit(&mut self, from: &Pubkey, amount: u64) -> ProgramResult {
        let account = self
            .accounts
            .get_mut(from)
            .ok_or(custom(INSUFFICIENT_FUNDS))?;
        account.lamports = account
            .lamports
            .checked_sub(amount)
            .ok_or(custom(INSUFFICIENT_FUNDS))?;
        Ok(())
    }
}

fn take_accounts<const N: usize>(accounts: &[AccountRef]) -> Result<[AccountRef; N], InstructionError> {
    if accounts.len() < N {
        return Err(custom(ACCOUNT_NOT_ENOUGH_KEYS));
    }
    let mut out = [accounts[0]; N];
    out.copy_from_slice(&accounts[..N]);
    Ok(out)
}

fn signer(account: &AccountRef) -> ProgramResult {
    if !account.is_signer {
        return Err(custom(ACCOUNT_NOT_SIGNER));
    }
    Ok(())
}

fn writable(account: &AccountRef) -> ProgramResult {
    if !account.is_writable {
        return Err(custom(CONSTRAINT_MUT));
    }
    Ok(())
}

fn system_program(account: &AccountRef) -> ProgramResult {
    if account.key != solana_sdk_ids::system_program::ID {
        return Err(custom(INVALID_PROGRAM_ID));
    }
    Ok(())
}
