mod cell;
mod errors;

pub use cell::Cell;
pub use errors::CellError;

/// Placeholder label for rows that no mapping key has matched.
pub const NO_CATEGORY: &str = "NO CATEGORY";

/// Column added by the categoriser.
pub const CATEGORY_FIELD: &str = "category";
