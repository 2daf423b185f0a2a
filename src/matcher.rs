use std::collections::HashSet;

use crate::automaton::{Automaton, Node, NodeId};

/// A point in the search: how much of the text is consumed, and where in
/// the automaton we stand.
///
/// The remaining input is always a suffix of the text, so the byte offset
/// where it starts identifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct State {
    offset: usize,
    node: NodeId,
}

/// Result of a search, with the number of distinct states it visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub matched: bool,
    pub visited: usize,
}

/// Explores an automaton against whole texts.
pub struct Matcher<'a> {
    automaton: &'a Automaton,
}

impl<'a> Matcher<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        Self { automaton }
    }

    /// Whether the automaton consumes all of `text` and ends on the terminal.
    pub fn matches(&self, text: &str) -> bool {
        self.search(text).matched
    }

    /// Worklist search over `(offset, node)` states.
    ///
    /// Each state enters the frontier at most once, so at most
    /// `(text.len() + 1) * node_count` states are visited.
    pub fn search(&self, text: &str) -> SearchOutcome {
        let entry = self.automaton.entry();
        if self.automaton[entry] == Node::Terminal {
            return SearchOutcome {
                matched: text.is_empty(),
                visited: 0,
            };
        }

        let start = State {
            offset: 0,
            node: entry,
        };
        let mut frontier = vec![start];
        let mut visited = HashSet::from([start]);

        while let Some(state) = frontier.pop() {
            if self.is_accepting(text, state) {
                return SearchOutcome {
                    matched: true,
                    visited: visited.len(),
                };
            }
            for next in self.advance(text, state).into_iter().flatten() {
                if visited.insert(next) {
                    frontier.push(next);
                }
            }
        }

        SearchOutcome {
            matched: false,
            visited: visited.len(),
        }
    }

    fn is_accepting(&self, text: &str, state: State) -> bool {
        state.offset == text.len() && self.automaton[state.node] == Node::Terminal
    }

    /// Successors of `state`: none for the terminal, at most one for a
    /// transition, and for a loop the skip branch plus, when the expectation
    /// matches, the same loop with the input reduced.
    fn advance(&self, text: &str, state: State) -> [Option<State>; 2] {
        let remaining = &text[state.offset..];
        let reduced = |consumed: &str| text.len() - consumed.len();

        match &self.automaton[state.node] {
            Node::Terminal => [None, None],
            Node::Transition { expect, next } => [
                expect.consume(remaining).map(|rest| State {
                    offset: reduced(rest),
                    node: *next,
                }),
                None,
            ],
            Node::Loop { expect, next } => [
                Some(State {
                    offset: state.offset,
                    node: *next,
                }),
                expect.consume(remaining).map(|rest| State {
                    offset: reduced(rest),
                    node: state.node,
                }),
            ],
        }
    }
}

/// Whether `automaton` matches the whole of `text`.
pub fn matches(text: &str, automaton: &Automaton) -> bool {
    Matcher::new(automaton).matches(text)
}
