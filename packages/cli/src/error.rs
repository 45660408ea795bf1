//! Operation-level errors, caught at the worker boundary.

use till_store::StoreError;

/// Everything that can go wrong while a worker serves one operation.
///
/// None of these ever reach the user as a raw fault: the worker renders the
/// error into its result message, so the coordinator always has exactly one
/// human-readable thing to print.
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    /// Request payload missing required fields or failing basic validation
    /// (empty name, negative price or balance, unparsable numbers).
    #[error("invalid request: {0}")]
    MalformedRequest(String),

    /// A referenced id is absent from its resource.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Balance too low for a charge; the store is left unmodified.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// The store layer failed underneath the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OpError {
    /// Render into the result message the coordinator will print.
    pub fn into_message(self) -> String {
        match self {
            OpError::Store(err) => format!("operation failed: {}", err),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_thing() {
        assert_eq!(OpError::NotFound("product").into_message(), "product not found");
    }

    #[test]
    fn malformed_message_carries_reason() {
        let msg = OpError::MalformedRequest("empty name".into()).into_message();
        assert!(msg.contains("invalid request"));
        assert!(msg.contains("empty name"));
    }

    #[test]
    fn insufficient_funds_message() {
        assert_eq!(OpError::InsufficientFunds.into_message(), "insufficient funds");
    }
}
