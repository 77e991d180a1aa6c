mod writer;

pub use writer::{write_categorised, write_uncategorised};
