use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::store::{AccountStore, StoreError};

use super::{Account, AccountError, AccountId, MoneyError, Operation, Profile, ProfileError};

/// Commit attempts per operation, counting the first try.
pub const MAX_COMMIT_ATTEMPTS: u32 = 5;

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),
    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),
    #[error("Account `{0}` does not exist")]
    AccountNotFound(AccountId),
    #[error("Account error: {0}")]
    AccountError(#[from] AccountError),
    #[error("E-mail `{0}` is already registered")]
    EmailTaken(String),
    #[error("Account `{0}` already exists")]
    AccountExists(AccountId),
    #[error("Gave up on account `{account}` after {attempts} conflicting commits")]
    ConcurrencyExhausted { account: AccountId, attempts: u32 },
    #[error("Store error: {0}")]
    StoreError(StoreError),
    #[error("Io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LedgerError {
    /// Store failures naming a domain condition surface as that condition.
    /// Version conflicts are handled inside `apply` and never pass through here.
    fn from_store(error: StoreError) -> LedgerError {
        match error {
            StoreError::NotFound(account) => LedgerError::AccountNotFound(account),
            StoreError::EmailTaken(email) => LedgerError::EmailTaken(email),
            StoreError::AccountExists(account) => LedgerError::AccountExists(account),
            error => LedgerError::StoreError(error),
        }
    }
}

pub struct Ledger {
    store: Arc<dyn AccountStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn AccountStore>) -> Ledger {
        Ledger { store }
    }

    /// Applies one balance operation optimistically.
    ///
    /// Reads a snapshot, computes the next balance, then asks the store to
    /// commit it against the version the snapshot carried. If another commit
    /// landed in between, the store reports a version conflict and the whole
    /// read-compute-commit cycle starts over, up to [`MAX_COMMIT_ATTEMPTS`]
    /// times in total.
    pub async fn apply(&self, operation: Operation) -> Result<Account, LedgerError> {
        info!(?operation, "Applying");
        let amount = operation.get_amount();
        // Money is never negative, so only zero remains to reject.
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount(MoneyError::NotPositive));
        }

        let account_id = operation.get_account_id();
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let snapshot = self
                .store
                .read(account_id)
                .await
                .map_err(LedgerError::from_store)?;
            let new_balance = match &operation {
                Operation::Deposit { .. } => snapshot.after_deposit(amount)?,
                Operation::Withdraw { .. } => snapshot.after_withdrawal(amount)?,
            };

            match self
                .store
                .compare_and_swap(account_id, snapshot.get_version(), new_balance)
                .await
            {
                Ok(committed) => return Ok(committed),
                Err(StoreError::VersionConflict {
                    expected, actual, ..
                }) => {
                    debug!(
                        account = %account_id,
                        attempt,
                        expected,
                        actual,
                        "Version conflict, retrying"
                    );
                }
                Err(error) => return Err(LedgerError::from_store(error)),
            }
        }

        Err(LedgerError::ConcurrencyExhausted {
            account: account_id.clone(),
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }

    /// Registers an account under a fresh id, holding nothing.
    pub async fn open_account(&self, name: &str, email: &str) -> Result<Account, LedgerError> {
        let id = Uuid::new_v4().to_string();
        self.open_account_with_id(id, name, email).await
    }

    /// Registers an account under a caller-chosen id.
    pub async fn open_account_with_id(
        &self,
        id: AccountId,
        name: &str,
        email: &str,
    ) -> Result<Account, LedgerError> {
        let profile = Profile::new(name, email)?;
        let account = Account::open(id, profile);
        info!(account = %account.get_id(), "Opening account");
        self.store
            .insert(account.clone())
            .await
            .map_err(LedgerError::from_store)?;
        Ok(account)
    }

    pub async fn account(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.store.read(id).await.map_err(LedgerError::from_store)
    }

    pub async fn account_by_email(&self, email: &str) -> Result<Option<Account>, LedgerError> {
        self.store
            .find_by_email(email)
            .await
            .map_err(LedgerError::from_store)
    }

    /// Replaces the holder profile. Balance and version are left untouched.
    pub async fn update_profile(
        &self,
        id: &AccountId,
        name: &str,
        email: &str,
    ) -> Result<Account, LedgerError> {
        let profile = Profile::new(name, email)?;
        self.store
            .update_profile(id, profile)
            .await
            .map_err(LedgerError::from_store)
    }

    /// Deletes an account. Closing an id that was never registered (or is
    /// already gone) reports `Ok(false)`.
    pub async fn close_account(&self, id: &AccountId) -> Result<bool, LedgerError> {
        info!(account = %id, "Closing account");
        self.store.remove(id).await.map_err(LedgerError::from_store)
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.store.list().await.map_err(LedgerError::from_store)
    }

    pub async fn dump_to_writer<W>(&self, w: &mut W) -> Result<(), LedgerError>
    where
        W: std::io::Write,
    {
        let accounts = self.accounts().await?;
        w.write_all("account, name, email, balance, version\n".as_bytes())?;
        for account in accounts.iter() {
            w.write_all(
                format!(
                    "{}, {}, {}, {}, {}\n",
                    account.get_id(),
                    account.get_name(),
                    account.get_email(),
                    account.get_balance(),
                    account.get_version()
                )
                .as_bytes(),
            )?;
        }
        w.flush()?;
        Ok(())
    }
}
