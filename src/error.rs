use thiserror::Error;

/// Errors raised while compiling a pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `*` with no literal or `.` directly before it, e.g. `*a` or `a**`.
    #[error("`*` at position {position} has nothing to repeat")]
    NothingToRepeat { position: usize },
}
