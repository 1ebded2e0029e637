use thiserror::Error;

/// Errors surfaced by the delta algebra. All of them are precondition or
/// bookkeeping failures; none are retried internally.
#[derive(Debug, Error, PartialEq)]
pub enum DeltaError {
    /// `diff` was given a delta containing deletes or retains.
    #[error("diff() called {0} non-document")]
    InvalidOperand(&'static str),
    /// A wire record that is not exactly one of insert/delete/retain, or
    /// carries a non-positive length.
    #[error("malformed operation: {0}")]
    MalformedOperation(String),
    /// The detection repair pass referenced output the merge never produced,
    /// or an embed was asked to split.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}
