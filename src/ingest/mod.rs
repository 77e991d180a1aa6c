mod errors;
mod locator;
mod reader;
mod validation;

pub use errors::IngestError;
pub use locator::locate_file;
pub use reader::{open_batches, ReadOptions};
pub use validation::validate;
