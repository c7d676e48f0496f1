use crate::domain::AccountId;
use crate::domain::Money;

/// A balance mutation requested against a single account.
#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    Deposit { account: AccountId, amount: Money },
    Withdraw { account: AccountId, amount: Money },
}

impl Operation {
    pub fn get_account_id(&self) -> &AccountId {
        match self {
            Operation::Deposit { account, .. } | Operation::Withdraw { account, .. } => account,
        }
    }
    pub fn get_amount(&self) -> Money {
        match self {
            Operation::Deposit { amount, .. } | Operation::Withdraw { amount, .. } => *amount,
        }
    }
}
