//! End-to-end task actions: pre-flight, build, assemble, sign, confirm.

use std::sync::Arc;

use serde::Serialize;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signature};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::accounts::{AdminActionCounter, ProgramAccount, ProgramConfig, TaskAccount};
use crate::config::ClientConfig;
use crate::errors::{DerivationError, PreconditionError, Result, SunpathClientError};
use crate::instructions::{
    AcceptTaskBuilder, CreateTaskBuilder, InitializeAdminCounterBuilder, InitializeProgramBuilder,
    InitializeProgramInstructionArgs, InstructionKind, ReclaimTaskFundsBuilder, RejectTaskBuilder,
    SELECTOR_TABLE_VERSION,
};
use crate::ledger::{LedgerReader, SignatureStatus, WalletSigner};
use crate::lifecycle::{self, LifecyclePolicy, TaskAction, TaskPhase};
use crate::pda;
use crate::transaction::TransactionAssembler;

/// Outcome of a confirmed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub action: InstructionKind,
    pub signature: Signature,
    /// The account the action created or moved.
    pub account: Pubkey,
    /// Task phase after the action, for task instructions.
    pub phase: Option<TaskPhase>,
}

impl Receipt {
    /// Record handed to the off-chain cache so it can correlate its rows
    /// with ledger state.
    pub fn cache_record(&self) -> TaskCacheRecord {
        TaskCacheRecord {
            action: self.action,
            transaction_signature: self.signature.to_string(),
            account: self.account.to_string(),
            phase: self.phase,
            selector_table: SELECTOR_TABLE_VERSION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCacheRecord {
    pub action: InstructionKind,
    pub transaction_signature: String,
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<TaskPhase>,
    /// Interface version the instruction was encoded against.
    pub selector_table: u16,
}

#[derive(Default)]
pub struct SunpathClientBuilder {
    config: Option<ClientConfig>,
    ledger: Option<Arc<dyn LedgerReader>>,
    signer: Option<Arc<dyn WalletSigner>>,
}

impl SunpathClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn ledger(mut self, ledger: Arc<dyn LedgerReader>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn signer(mut self, signer: Arc<dyn WalletSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Both capabilities are mandatory; there is no fallback signer.
    pub fn build(self) -> Result<SunpathClient> {
        Ok(SunpathClient {
            config: self.config.unwrap_or_default(),
            ledger: self
                .ledger
                .ok_or(SunpathClientError::MissingCapability("ledger reader"))?,
            signer: self
                .signer
                .ok_or(SunpathClientError::MissingCapability("wallet signer"))?,
        })
    }
}

/// Drives the Sunpath program on behalf of the signer's key.
///
/// Pre-flight checks read ledger state and ledger time and fail fast with a
/// [`PreconditionError`]; the program re-validates everything on submission.
/// Two clients racing on the same task are ordered by the ledger alone, so a
/// remote rejection after a passing pre-flight is an expected outcome.
pub struct SunpathClient {
    config: ClientConfig,
    ledger: Arc<dyn LedgerReader>,
    signer: Arc<dyn WalletSigner>,
}

impl SunpathClient {
    pub fn builder() -> SunpathClientBuilder {
        SunpathClientBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn program_id(&self) -> Pubkey {
        self.config.program_id
    }

    /// The signer's key, which acts as requester (and admin) for every
    /// action.
    pub fn requester(&self) -> Pubkey {
        self.signer.pubkey()
    }

    pub fn task_address(&self, task_id: u64) -> Result<Pubkey> {
        Ok(pda::find_task_account_pda(&self.requester(), task_id, &self.program_id())?.0)
    }

    pub async fn initialize_program(
        &self,
        args: InitializeProgramInstructionArgs,
    ) -> Result<Receipt> {
        let program_id = self.program_id();
        let (config, _) = pda::find_config_pda(&program_id)?;
        if self.fetch_account::<ProgramConfig>(&config).await?.is_some() {
            return Err(PreconditionError::ConfigExists { address: config }.into());
        }
        let ix = InitializeProgramBuilder::new()
            .program_id(program_id)
            .config(config)
            .payer(self.requester())
            .args(args)
            .instruction()?;
        self.execute(InstructionKind::InitializeProgram, ix, config, None)
            .await
    }

    pub async fn initialize_admin_counter(&self) -> Result<Receipt> {
        let program_id = self.program_id();
        let admin = self.requester();
        let (counter, _) = pda::find_admin_counter_pda(&admin, &program_id)?;
        if self
            .fetch_account::<AdminActionCounter>(&counter)
            .await?
            .is_some()
        {
            return Err(PreconditionError::AdminCounterExists { address: counter }.into());
        }
        let ix = InitializeAdminCounterBuilder::new()
            .program_id(program_id)
            .admin_counter(counter)
            .admin(admin)
            .instruction()?;
        self.execute(InstructionKind::InitializeAdminCounter, ix, counter, None)
            .await
    }

    /// Lock `reward_amount` lamports in a new task account. A second create
    /// with the same `task_id` targets the same address and fails with
    /// `TaskAlreadyExists`, which callers can treat as "already done".
    pub async fn create_task(
        &self,
        task_id: u64,
        reward_amount: u64,
        duration_seconds: i64,
    ) -> Result<Receipt> {
        let program_id = self.program_id();
        let requester = self.requester();
        let (task, _) = pda::find_task_account_pda(&requester, task_id, &program_id)?;
        if self.fetch_account::<TaskAccount>(&task).await?.is_some() {
            return Err(PreconditionError::TaskAlreadyExists { address: task }.into());
        }
        let policy = self.policy().await?;
        let now = self.ledger.unix_timestamp().await?;
        lifecycle::check_create(reward_amount, duration_seconds, now, &policy)?;

        let ix = CreateTaskBuilder::new()
            .program_id(program_id)
            .task_account(task)
            .requester(requester)
            .task_id(task_id)
            .reward_amount(reward_amount)
            .duration_seconds(duration_seconds)
            .instruction()?;
        self.execute(
            InstructionKind::CreateTask,
            ix,
            task,
            Some(TaskPhase::Available),
        )
        .await
    }

    /// Pay the locked reward to `recipient`.
    pub async fn accept_task(&self, task_id: u64, recipient: Pubkey) -> Result<Receipt> {
        let action = TaskAction::Accept;
        let (task, phase) = self.preflight(task_id, action).await?;
        let ix = AcceptTaskBuilder::new()
            .program_id(self.program_id())
            .task_account(task)
            .requester(self.requester())
            .recipient(recipient)
            .instruction()?;
        self.execute(action.instruction_kind(), ix, task, Some(phase))
            .await
    }

    /// Deny the task. Funds stay locked until the denial lockup passes.
    pub async fn reject_task(&self, task_id: u64) -> Result<Receipt> {
        let action = TaskAction::Reject;
        let (task, phase) = self.preflight(task_id, action).await?;
        let ix = RejectTaskBuilder::new()
            .program_id(self.program_id())
            .task_account(task)
            .requester(self.requester())
            .instruction()?;
        self.execute(action.instruction_kind(), ix, task, Some(phase))
            .await
    }

    /// Return the reward of a rejected or expired task to the requester.
    pub async fn reclaim_task_funds(&self, task_id: u64) -> Result<Receipt> {
        let action = TaskAction::Reclaim;
        let (task, phase) = self.preflight(task_id, action).await?;
        let ix = ReclaimTaskFundsBuilder::new()
            .program_id(self.program_id())
            .task_account(task)
            .requester(self.requester())
            .instruction()?;
        self.execute(action.instruction_kind(), ix, task, Some(phase))
            .await
    }

    pub async fn fetch_task(&self, requester: &Pubkey, task_id: u64) -> Result<Option<TaskAccount>> {
        let (address, _) = pda::find_task_account_pda(requester, task_id, &self.program_id())?;
        self.fetch_account(&address).await
    }

    pub async fn fetch_admin_counter(&self, admin: &Pubkey) -> Result<Option<AdminActionCounter>> {
        let (address, _) = pda::find_admin_counter_pda(admin, &self.program_id())?;
        self.fetch_account(&address).await
    }

    pub async fn fetch_config(&self) -> Result<Option<ProgramConfig>> {
        let (address, _) = pda::find_config_pda(&self.program_id())?;
        self.fetch_account(&address).await
    }

    /// Decode a program account. An account at a derived address that the
    /// program does not own is a derivation error, not missing data.
    pub async fn fetch_account<T: ProgramAccount>(&self, address: &Pubkey) -> Result<Option<T>> {
        let Some(snapshot) = self.ledger.get_account(address).await? else {
            return Ok(None);
        };
        if snapshot.owner != self.program_id() {
            return Err(DerivationError::ForeignOwner {
                address: *address,
                owner: snapshot.owner,
                program_id: self.program_id(),
            }
            .into());
        }
        Ok(Some(T::from_bytes(&snapshot.data)?))
    }

    /// Submit an instruction as-is, skipping every pre-flight check. The
    /// program is still the judge; its refusals come back as
    /// `RemoteRejection`.
    pub async fn send_instruction(&self, instruction: Instruction) -> Result<Signature> {
        self.submit(&[instruction]).await
    }

    async fn policy(&self) -> Result<LifecyclePolicy> {
        let (address, _) = pda::find_config_pda(&self.program_id())?;
        self.fetch_account::<ProgramConfig>(&address)
            .await?
            .map(|config| LifecyclePolicy::from(&config))
            .ok_or_else(|| PreconditionError::ConfigMissing { address }.into())
    }

    async fn preflight(&self, task_id: u64, action: TaskAction) -> Result<(Pubkey, TaskPhase)> {
        let program_id = self.program_id();
        let requester = self.requester();
        let (address, _) = pda::find_task_account_pda(&requester, task_id, &program_id)?;
        let task = self
            .fetch_account::<TaskAccount>(&address)
            .await?
            .ok_or(PreconditionError::TaskNotFound { address })?;
        let policy = self.policy().await?;
        let now = self.ledger.unix_timestamp().await?;
        let next = lifecycle::check_transition(&task, action, &requester, now, &policy)?;

        if action.requires_admin_counter() {
            let (counter, _) = pda::find_admin_counter_pda(&requester, &program_id)?;
            if self
                .fetch_account::<AdminActionCounter>(&counter)
                .await?
                .is_none()
            {
                return Err(PreconditionError::AdminCounterMissing { address: counter }.into());
            }
        }
        debug!(task_id, ?action, %next, "pre-flight passed");
        Ok((address, next))
    }

    async fn execute(
        &self,
        action: InstructionKind,
        instruction: Instruction,
        account: Pubkey,
        phase: Option<TaskPhase>,
    ) -> Result<Receipt> {
        let signature = self.submit(&[instruction]).await?;
        info!(action = action.method_name(), %signature, %account, "action confirmed");
        Ok(Receipt {
            action,
            signature,
            account,
            phase,
        })
    }

    /// Assemble with a fresh blockhash and send, retrying transport failures
    /// only, then wait for confirmation.
    async fn submit(&self, instructions: &[Instruction]) -> Result<Signature> {
        let payer = self.requester();
        let max_attempts = self.config.max_network_attempts.max(1);
        let mut backoff = self.config.retry_backoff();
        let mut attempt = 1;

        let signature = loop {
            let sent = async {
                let transaction = TransactionAssembler::new(self.ledger.as_ref())
                    .assemble(instructions, &payer)
                    .await?;
                self.signer.sign_and_send(transaction).await
            }
            .await;

            match sent {
                Ok(signature) => break signature,
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    warn!(attempt, max_attempts, error = %err, "network failure, retrying with a fresh blockhash");
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        };

        self.await_confirmation(signature).await?;
        Ok(signature)
    }

    async fn await_confirmation(&self, signature: Signature) -> Result<()> {
        let deadline = Instant::now() + self.config.confirm_timeout();
        loop {
            match self.ledger.signature_status(&signature).await {
                Ok(SignatureStatus::Confirmed) => return Ok(()),
                Ok(SignatureStatus::Failed(error)) => {
                    return Err(SunpathClientError::rejection(error, Some(signature)))
                }
                Ok(SignatureStatus::Pending) => {}
                Err(err) if err.is_retryable() => {
                    debug!(%signature, error = %err, "status poll failed");
                }
                Err(err) => return Err(err),
            }
            if Instant::now() >= deadline {
                warn!(%signature, "confirmation timed out; state must be re-queried before any resubmission");
                return Err(SunpathClientError::Unconfirmed { signature });
            }
            sleep(self.config.confirm_poll_interval()).await;
        }
    }
}
