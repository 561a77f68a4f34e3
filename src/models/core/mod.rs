//! Core domain models shared by the pipeline services.

mod category;
mod record;

pub use category::Category;
pub use record::{ClassifiedRecord, RecordKind, TimestampSource, TransactionStatus};
