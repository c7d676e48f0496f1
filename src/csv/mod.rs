mod command_record;
mod command_stream;

pub use command_record::*;
pub use command_stream::*;
