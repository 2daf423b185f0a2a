use crate::automaton::{Automaton, Expectation};
use crate::error::PatternError;

/// Compiles a pattern into an [`Automaton`].
///
/// The pattern is read from right to left so that every new node can point
/// at the already-built remainder of the automaton.
pub struct Compiler {
    pattern: Vec<char>,
    /// Number of characters not yet consumed, counted from the left.
    pos: usize,
    automaton: Automaton,
}

impl Compiler {
    /// Create a new compiler for the given pattern.
    pub fn new(pattern: &str) -> Self {
        let pattern: Vec<char> = pattern.chars().collect();
        Self {
            pos: pattern.len(),
            pattern,
            automaton: Automaton::terminal(),
        }
    }

    /// Peek at the last unconsumed character without retreating.
    fn peek_back(&self) -> Option<char> {
        self.pos.checked_sub(1).map(|i| self.pattern[i])
    }

    /// Consume the last unconsumed character and return it.
    fn retreat(&mut self) -> Option<char> {
        let ch = self.peek_back()?;
        self.pos -= 1;
        Some(ch)
    }

    /// Entry point: consume the whole pattern and return its automaton.
    ///
    /// Example:
    /// - Pattern: `abc.*d` → `Transition(Literal("abc"), Loop(AnyChar, Transition(Literal("d"), Terminal)))`
    /// - Pattern: ``       → `Terminal`
    pub fn compile(mut self) -> Result<Automaton, PatternError> {
        while let Some(ch) = self.peek_back() {
            match ch {
                '*' => self.compile_loop()?,
                '.' => {
                    self.retreat();
                    self.automaton.push_transition(Expectation::AnyChar);
                }
                _ => self.compile_literal_run(),
            }
        }
        Ok(self.automaton)
    }

    /// Compile `x*` or `.*` into a single `Loop`.
    ///
    /// Example:
    /// - Pattern: `a*` → `Loop(Literal("a"), ..)`
    /// - Pattern: `.*` → `Loop(AnyChar, ..)`
    fn compile_loop(&mut self) -> Result<(), PatternError> {
        self.retreat();
        let position = self.pos;
        let expect = match self.retreat() {
            Some('.') => Expectation::AnyChar,
            Some(c) if c != '*' => Expectation::Literal(c.to_string()),
            _ => return Err(PatternError::NothingToRepeat { position }),
        };
        self.automaton.push_loop(expect);
        Ok(())
    }

    /// Compile the longest run of plain characters ending at the cursor.
    ///
    /// The run stops at `.` or `*`; a character followed by `*` is never
    /// reached here because its loop has already been consumed.
    ///
    /// Example:
    /// - Pattern: `ab*cd` → the run `cd`, then `b*`, then the run `a`
    fn compile_literal_run(&mut self) {
        let end = self.pos;
        while let Some(ch) = self.peek_back() {
            if ch == '.' || ch == '*' {
                break;
            }
            self.retreat();
        }
        let literal: String = self.pattern[self.pos..end].iter().collect();
        self.automaton.push_transition(Expectation::Literal(literal));
    }
}

/// Compile `pattern` into its automaton.
pub fn compile(pattern: &str) -> Result<Automaton, PatternError> {
    Compiler::new(pattern).compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Node;

    fn lit(s: &str) -> Expectation {
        Expectation::Literal(s.into())
    }

    #[test]
    fn worked_example() {
        let mut expected = Automaton::terminal();
        expected.push_transition(lit("d"));
        expected.push_loop(Expectation::AnyChar);
        expected.push_transition(lit("abc"));

        assert_eq!(compile("abc.*d").unwrap(), expected);
    }

    #[test]
    fn empty_pattern_is_terminal() {
        let automaton = compile("").unwrap();
        assert_eq!(automaton.node_count(), 1);
        assert_eq!(automaton[automaton.entry()], Node::Terminal);
    }

    #[test]
    fn star_takes_only_one_character() {
        assert_eq!(
            compile("ab*").unwrap().to_string(),
            r#"Transition(Literal("a"), Loop(Literal("b"), Terminal))"#
        );
        assert_eq!(
            compile("xa*b*.*").unwrap().to_string(),
            r#"Transition(Literal("x"), Loop(Literal("a"), Loop(Literal("b"), Loop(AnyChar, Terminal))))"#
        );
    }

    #[test]
    fn dots_break_literal_runs() {
        assert_eq!(
            compile("a..bc.").unwrap().to_string(),
            r#"Transition(Literal("a"), Transition(AnyChar, Transition(AnyChar, Transition(Literal("bc"), Transition(AnyChar, Terminal)))))"#
        );
    }

    #[test]
    fn non_ascii_literals() {
        assert_eq!(
            compile("é*ü").unwrap().to_string(),
            r#"Loop(Literal("é"), Transition(Literal("ü"), Terminal))"#
        );
    }

    #[test]
    fn dangling_star_is_rejected() {
        assert_eq!(
            compile("*a").unwrap_err(),
            PatternError::NothingToRepeat { position: 0 }
        );
        assert_eq!(
            compile("a**").unwrap_err(),
            PatternError::NothingToRepeat { position: 2 }
        );
        assert!(compile("*").is_err());
        assert_eq!(
            compile("ab.**c").unwrap_err(),
            PatternError::NothingToRepeat { position: 4 }
        );
    }

    #[test]
    fn compiling_twice_gives_equal_graphs() {
        let pattern = "mis*is*p*.";
        assert_eq!(compile(pattern).unwrap(), compile(pattern).unwrap());
    }
}
