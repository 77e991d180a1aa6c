mod errors;
mod settings;

pub use settings::{load_mapping, Settings};
