use crate::domain::{AccountId, Money, Profile};

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum AccountError {
    #[error("Insufficient funds: balance is {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },
    #[error("Balance overflow: balance is {balance}, deposited {deposited}")]
    BalanceOverflow { balance: Money, deposited: Money },
}

/// Snapshot of one account row: holder profile plus the balance and its
/// optimistic-concurrency version.
///
/// Balance and version only ever change together, through
/// [`commit_balance`](Account::commit_balance); everything else reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    profile: Profile,
    balance: Money,
    version: u64,
}

impl Account {
    /// A freshly registered account holds nothing and has seen no commits.
    pub fn open(id: AccountId, profile: Profile) -> Account {
        Account {
            id,
            profile,
            balance: Money::zero(),
            version: 0,
        }
    }

    /// The balance this account would hold after depositing `amount`.
    /// Fails when the sum would leave the representable range.
    pub fn after_deposit(&self, amount: Money) -> Result<Money, AccountError> {
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow {
                balance: self.balance,
                deposited: amount,
            })
    }

    /// The balance this account would hold after withdrawing `amount`.
    /// Checked before any store mutation is attempted.
    pub fn after_withdrawal(&self, amount: Money) -> Result<Money, AccountError> {
        self.balance
            .checked_sub(amount)
            .ok_or(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            })
    }

    /// Record a committed balance, advancing the version by exactly one.
    pub(crate) fn commit_balance(&mut self, new_balance: Money) {
        self.balance = new_balance;
        self.version += 1;
    }

    pub(crate) fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub fn get_id(&self) -> &AccountId {
        &self.id
    }

    pub fn get_profile(&self) -> &Profile {
        &self.profile
    }

    pub fn get_name(&self) -> &str {
        self.profile.get_name()
    }

    pub fn get_email(&self) -> &str {
        self.profile.get_email()
    }

    pub fn get_balance(&self) -> Money {
        self.balance
    }

    pub fn get_version(&self) -> u64 {
        self.version
    }
}
