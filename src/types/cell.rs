use crate::types::errors::CellError;
use rust_decimal::Decimal;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single value in a [`TransactionBatch`](crate::models::TransactionBatch).
///
/// Everything read from a CSV export starts out as `Text`. Amounts become numeric
/// once they pass through the normaliser; integer amounts supplied by a caller are
/// kept integral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Decimal(Decimal)
}

impl Cell {
    /// Returns `true` for text that is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(value) => value.trim().is_empty(),
            Cell::Integer(_) | Cell::Decimal(_) => false
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None
        }
    }

    /// Converts an amount written with a decimal comma into a number.
    ///
    /// Every `,` is read as a decimal point, so grouped values such as `1.234,56`
    /// are rejected rather than silently misread. Numeric cells are returned as they are.
    pub fn normalise_amount(&self) -> Result<Cell, CellError> {
        match self {
            Cell::Text(value) => {
                let unified = value.replace(',', ".");

                Decimal::from_str(unified.trim())
                    .map(Cell::Decimal)
                    .map_err(|_| CellError::InvalidAmount(value.clone()))
            }
            numeric => Ok(numeric.clone())
        }
    }

    /// Returns `true` only for numeric cells strictly below zero.
    pub fn is_negative(&self) -> bool {
        match self {
            Cell::Text(_) => false,
            Cell::Integer(value) => *value < 0,
            Cell::Decimal(value) => *value < Decimal::ZERO
        }
    }
}

impl Display for Cell {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(value) => formatter.write_str(value),
            Cell::Integer(value) => write!(formatter, "{value}"),
            Cell::Decimal(value) => write!(formatter, "{value}")
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Decimal(value)
    }
}
