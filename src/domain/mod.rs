mod account;
mod ledger;
mod money;
mod operation;
mod profile;

pub use account::*;
pub use ledger::*;
pub use money::*;
pub use operation::Operation;
pub use profile::*;

pub use rust_decimal::Decimal;

pub type AccountId = String;
