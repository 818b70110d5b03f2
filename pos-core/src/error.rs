use thiserror::Error;

/// Ledger errors
///
/// Validation variants are raised before any transaction opens; a promotion
/// that fails to resolve is not an error and degrades to zero discount.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Order has no line items")]
    EmptyOrder,

    #[error("Invalid line item at index {index}: {reason}")]
    InvalidLineItem { index: usize, reason: String },

    #[error("Computed total is not a valid amount")]
    InvalidTotal,

    #[error("Persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl LedgerError {
    /// Stable machine-checkable code, paired with the human message above.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::EmptyOrder => "EMPTY_ORDER",
            LedgerError::InvalidLineItem { .. } => "INVALID_LINE_ITEM",
            LedgerError::InvalidTotal => "INVALID_TOTAL",
            LedgerError::Persistence(_) => "PERSISTENCE_FAILURE",
        }
    }

    pub(crate) fn invalid_item(index: usize, reason: impl Into<String>) -> Self {
        LedgerError::InvalidLineItem {
            index,
            reason: reason.into(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(LedgerError::EmptyOrder.code(), "EMPTY_ORDER");
        assert_eq!(
            LedgerError::invalid_item(1, "quantity must be > 0").code(),
            "INVALID_LINE_ITEM"
        );
        assert_eq!(LedgerError::InvalidTotal.code(), "INVALID_TOTAL");
        assert_eq!(
            LedgerError::Persistence(sqlx::Error::PoolClosed).code(),
            "PERSISTENCE_FAILURE"
        );
    }

    #[test]
    fn messages_carry_the_failing_index() {
        let err = LedgerError::invalid_item(2, "price must be >= 0");
        assert_eq!(
            err.to_string(),
            "Invalid line item at index 2: price must be >= 0"
        );
    }
}
