use futures::StreamExt;

use super::{Command, CommandRecord, CommandRecordError};

pub async fn create_command_stream<R>(
    reader: R,
) -> impl futures::Stream<Item = Result<Command, CommandRecordError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    csv_async::AsyncReaderBuilder::new()
        // trim whitespaces if we encounter them
        .trim(csv_async::Trim::All)
        // so `open` lines may omit the trailing amount column
        .flexible(true)
        .create_deserializer(reader)
        .into_deserialize::<CommandRecord>()
        .map(|r| match r {
            Ok(r) => r.try_into(),
            Err(e) => Err(e.into()),
        })
}
