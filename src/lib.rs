pub mod automaton;
pub mod compiler;
pub mod error;
pub mod matcher;

use std::str::FromStr;

pub use automaton::{Automaton, Expectation, Node, NodeId};
pub use compiler::compile;
pub use error::PatternError;
pub use matcher::{matches, Matcher, SearchOutcome};

/// Whether `pattern` matches the whole of `input`.
///
/// Patterns are made of literal characters, `.` for any character and `*`
/// repeating the character or `.` right before it.
pub fn is_match(input: &str, pattern: &str) -> Result<bool, PatternError> {
    let automaton = compile(pattern)?;
    Ok(matches(input, &automaton))
}

/// A compiled pattern, reusable across inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    automaton: Automaton,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            automaton: compile(pattern)?,
        })
    }

    pub fn is_match(&self, input: &str) -> bool {
        matches(input, &self.automaton)
    }

    pub fn search(&self, input: &str) -> SearchOutcome {
        Matcher::new(&self.automaton).search(input)
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
