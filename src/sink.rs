mod dispatcher;
mod export;
mod record;
mod remote;

pub use dispatcher::SinkDispatcher;
pub use export::ExportLog;
pub use record::{CSV_HEADER, DispatchRecord};
pub use remote::RemoteSink;
