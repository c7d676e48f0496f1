use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Account, AccountId, Money, Profile};

use super::{AccountStore, StoreError};

/// In-memory [`AccountStore`] keeping every account in a `RwLock`ed map.
///
/// Uniqueness checks and the version comparison run under the write lock,
/// so concurrent callers observe each commit as a whole.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> MemoryAccountStore {
        MemoryAccountStore::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write();
        if accounts.contains_key(account.get_id()) {
            return Err(StoreError::AccountExists(account.get_id().clone()));
        }
        if accounts
            .values()
            .any(|existing| existing.get_email() == account.get_email())
        {
            return Err(StoreError::EmailTaken(account.get_email().to_string()));
        }
        accounts.insert(account.get_id().clone(), account);
        Ok(())
    }

    async fn read(&self, id: &AccountId) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .read()
            .values()
            .find(|account| account.get_email() == email)
            .cloned())
    }

    async fn compare_and_swap(
        &self,
        id: &AccountId,
        expected_version: u64,
        new_balance: Money,
    ) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write();
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if account.get_version() != expected_version {
            return Err(StoreError::VersionConflict {
                account: id.clone(),
                expected: expected_version,
                actual: account.get_version(),
            });
        }
        account.commit_balance(new_balance);
        Ok(account.clone())
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        profile: Profile,
    ) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write();
        // The e-mail check runs before the existence check and skips the
        // account being updated, which may keep its own address.
        if accounts
            .values()
            .any(|other| other.get_id() != id && other.get_email() == profile.get_email())
        {
            return Err(StoreError::EmailTaken(profile.get_email().to_string()));
        }
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        account.set_profile(profile);
        Ok(account.clone())
    }

    async fn remove(&self, id: &AccountId) -> Result<bool, StoreError> {
        Ok(self.accounts.write().remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.read().values().cloned().collect())
    }
}
