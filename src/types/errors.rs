use thiserror::Error;

#[derive(Debug, Error)]
pub enum CellError {
    #[error("Cell error: could not convert '{0}' to a number")]
    InvalidAmount(String)
}
