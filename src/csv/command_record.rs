use crate::domain::AccountId;
use crate::domain::Money;
use crate::domain::Operation;

#[derive(thiserror::Error, Debug)]
pub enum CommandRecordError {
    #[error("Missing amount field")]
    MissingAmountError,
    #[error("Missing holder name or e-mail field")]
    MissingProfileError,
    #[error("csv error")]
    CsvError(#[from] csv_async::Error),
}

#[derive(serde::Deserialize, Debug)]
pub struct CommandRecord {
    op: CommandKind,
    account: AccountId,
    name: Option<String>,
    email: Option<String>,
    amount: Option<Money>,
}

#[derive(serde::Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "lowercase")]
enum CommandKind {
    Open,
    Deposit,
    Withdraw,
}

/// One parsed input line: a registration or a balance operation.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Open {
        account: AccountId,
        name: String,
        email: String,
    },
    Apply(Operation),
}

impl Command {
    pub fn get_account_id(&self) -> &AccountId {
        match self {
            Command::Open { account, .. } => account,
            Command::Apply(operation) => operation.get_account_id(),
        }
    }
}

impl TryFrom<CommandRecord> for Command {
    type Error = CommandRecordError;

    fn try_from(value: CommandRecord) -> Result<Self, Self::Error> {
        let account = value.account;
        match value.op {
            CommandKind::Open => {
                let name = value.name.ok_or(CommandRecordError::MissingProfileError)?;
                let email = value.email.ok_or(CommandRecordError::MissingProfileError)?;
                Ok(Self::Open {
                    account,
                    name,
                    email,
                })
            }
            CommandKind::Deposit => {
                let amount = value.amount.ok_or(CommandRecordError::MissingAmountError)?;
                Ok(Self::Apply(Operation::Deposit { account, amount }))
            }
            CommandKind::Withdraw => {
                let amount = value.amount.ok_or(CommandRecordError::MissingAmountError)?;
                Ok(Self::Apply(Operation::Withdraw { account, amount }))
            }
        }
    }
}
