use std::sync::Arc;

use futures::StreamExt;
use tracing::warn;

use crate::csv::{create_command_stream, Command};
use crate::domain::Ledger;

pub async fn run<R>(reader: R, ledger: Arc<Ledger>)
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    let mut command_stream = create_command_stream(reader).await;

    while let Some(command_result) = command_stream.next().await {
        match command_result {
            Ok(command) => {
                let account = command.get_account_id().clone();
                let ledger = ledger.clone();
                // Spawn a separate task to exercise the ledger from another
                // thread, but still .await it so commands land in input order.
                let result = tokio::task::spawn(async move {
                    match command {
                        Command::Open {
                            account,
                            name,
                            email,
                        } => ledger
                            .open_account_with_id(account, &name, &email)
                            .await
                            .map(|_| ()),
                        Command::Apply(operation) => ledger.apply(operation).await.map(|_| ()),
                    }
                })
                .await;

                match result {
                    Ok(ledger_result) => {
                        if let Err(e) = ledger_result {
                            warn!(account = %account, "Error applying command: {e}")
                        }
                    }
                    Err(e) => {
                        warn!("Join error: {e}");
                    }
                }
            }
            Err(e) => warn!(?e, "Error in command stream"),
        }
    }
}
