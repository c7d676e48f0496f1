mod memory;

use async_trait::async_trait;

pub use memory::MemoryAccountStore;

use crate::domain::{Account, AccountId, Money, Profile};

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum StoreError {
    #[error("Account `{0}` does not exist")]
    NotFound(AccountId),
    #[error("Version conflict on account `{account}`: expected {expected}, found {actual}")]
    VersionConflict {
        account: AccountId,
        expected: u64,
        actual: u64,
    },
    #[error("Account `{0}` already exists")]
    AccountExists(AccountId),
    #[error("E-mail `{0}` is already registered")]
    EmailTaken(String),
}

/// Storage backend for accounts.
///
/// Balance writes go through [`compare_and_swap`](AccountStore::compare_and_swap)
/// only; there is no blind balance update.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Register a new account. Fails if the id or the holder e-mail is
    /// already present.
    async fn insert(&self, account: Account) -> Result<(), StoreError>;

    /// Fetch a snapshot of one account. Reading never changes the stored
    /// balance or version.
    async fn read(&self, id: &AccountId) -> Result<Account, StoreError>;

    /// Fetch the account registered under `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Commit `new_balance` if the stored version still equals
    /// `expected_version`, advancing the version by one.
    ///
    /// Returns the committed snapshot, or `VersionConflict` with the version
    /// actually found. On conflict nothing is written.
    async fn compare_and_swap(
        &self,
        id: &AccountId,
        expected_version: u64,
        new_balance: Money,
    ) -> Result<Account, StoreError>;

    /// Replace the holder profile, leaving balance and version untouched.
    async fn update_profile(
        &self,
        id: &AccountId,
        profile: Profile,
    ) -> Result<Account, StoreError>;

    /// Delete an account. Returns `Ok(true)` if it existed, `Ok(false)` if
    /// it did not.
    async fn remove(&self, id: &AccountId) -> Result<bool, StoreError>;

    /// All stored accounts, in no particular order.
    async fn list(&self) -> Result<Vec<Account>, StoreError>;
}
