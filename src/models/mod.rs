mod batch;
mod errors;
mod mapping;

pub use batch::TransactionBatch;
pub use errors::BatchError;
pub use mapping::CategoryMapping;
