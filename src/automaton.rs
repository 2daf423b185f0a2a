use std::fmt;
use std::ops::Index;

/// A single-step rule for consuming a prefix of the remaining input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// A run of one or more plain characters, matched exactly.
    Literal(String),
    /// Any single character.
    AnyChar,
}

impl Expectation {
    /// Consume this expectation from the front of `input`.
    ///
    /// Returns the rest of the input on success, `None` if the prefix does
    /// not match.
    ///
    /// Example:
    /// - `Literal("ab")` on `"abc"` → `Some("c")`
    /// - `AnyChar` on `""` → `None`
    pub fn consume<'t>(&self, input: &'t str) -> Option<&'t str> {
        match self {
            Expectation::Literal(literal) => input.strip_prefix(literal.as_str()),
            Expectation::AnyChar => {
                let c = input.chars().next()?;
                Some(&input[c.len_utf8()..])
            }
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Literal(literal) => write!(f, "Literal({literal:?})"),
            Expectation::AnyChar => f.write_str("AnyChar"),
        }
    }
}

/// Index of a node inside its [`Automaton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One state of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Accepting state.
    Terminal,
    /// Consume `expect` once, then go to `next`.
    Transition { expect: Expectation, next: NodeId },
    /// Consume `expect` zero or more times, then go to `next`.
    ///
    /// Repeating re-enters this same node; there is no edge back to it.
    Loop { expect: Expectation, next: NodeId },
}

/// An arena of automaton nodes built suffix-first.
///
/// Every push links the new node to the current entry and makes it the new
/// entry, so each node has exactly one predecessor and `next` always points
/// at a lower index. The terminal node sits at index 0.
#[derive(Debug, Clone)]
pub struct Automaton {
    nodes: Vec<Node>,
    entry: NodeId,
}

impl Automaton {
    /// The automaton of the empty pattern: a lone terminal node.
    pub fn terminal() -> Self {
        Self {
            nodes: vec![Node::Terminal],
            entry: NodeId(0),
        }
    }

    /// Prepend a `Transition` in front of the current entry.
    pub fn push_transition(&mut self, expect: Expectation) -> NodeId {
        let next = self.entry;
        self.push(Node::Transition { expect, next })
    }

    /// Prepend a `Loop` in front of the current entry.
    pub fn push_loop(&mut self, expect: Expectation) -> NodeId {
        let next = self.entry;
        self.push(Node::Loop { expect, next })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.entry = id;
        id
    }

    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Number of nodes, the terminal included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Follow the chain from the entry node down to the terminal.
    pub fn walk(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut cursor = Some(self.entry);
        std::iter::from_fn(move || {
            let node = &self[cursor?];
            cursor = match node {
                Node::Terminal => None,
                Node::Transition { next, .. } | Node::Loop { next, .. } => Some(*next),
            };
            Some(node)
        })
    }
}

impl Default for Automaton {
    fn default() -> Self {
        Self::terminal()
    }
}

impl Index<NodeId> for Automaton {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if `id` was handed out by another automaton and lies past
    /// this one's last node.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Structural isomorphism from the entry node; arena indices are ignored.
impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        let mut ours = self.walk();
        let mut theirs = other.walk();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(Node::Terminal), Some(Node::Terminal)) => {}
                (
                    Some(Node::Transition { expect: a, .. }),
                    Some(Node::Transition { expect: b, .. }),
                )
                | (Some(Node::Loop { expect: a, .. }), Some(Node::Loop { expect: b, .. }))
                    if a == b => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Automaton {}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        for node in self.walk() {
            match node {
                Node::Terminal => f.write_str("Terminal")?,
                Node::Transition { expect, .. } => {
                    write!(f, "Transition({expect}, ")?;
                    depth += 1;
                }
                Node::Loop { expect, .. } => {
                    write!(f, "Loop({expect}, ")?;
                    depth += 1;
                }
            }
        }
        for _ in 0..depth {
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_any_d() -> Automaton {
        let mut automaton = Automaton::terminal();
        automaton.push_transition(Expectation::Literal("d".into()));
        automaton.push_loop(Expectation::AnyChar);
        automaton.push_transition(Expectation::Literal("abc".into()));
        automaton
    }

    #[test]
    fn literal_consumes_exact_prefix() {
        let lit = Expectation::Literal("ab".into());
        assert_eq!(lit.consume("abc"), Some("c"));
        assert_eq!(lit.consume("ab"), Some(""));
        assert_eq!(lit.consume("aB"), None);
        assert_eq!(lit.consume("a"), None);
    }

    #[test]
    fn any_char_consumes_one_scalar() {
        assert_eq!(Expectation::AnyChar.consume("xyz"), Some("yz"));
        assert_eq!(Expectation::AnyChar.consume("éa"), Some("a"));
        assert_eq!(Expectation::AnyChar.consume(""), None);
    }

    #[test]
    fn pushes_link_to_previous_entry() {
        let automaton = abc_any_d();
        assert_eq!(automaton.node_count(), 4);
        assert_eq!(automaton.entry(), NodeId(3));
        match &automaton[automaton.entry()] {
            Node::Transition { next, .. } => assert_eq!(*next, NodeId(2)),
            other => panic!("unexpected entry {other:?}"),
        }
        assert_eq!(automaton.walk().count(), 4);
    }

    #[test]
    #[should_panic]
    fn foreign_node_id_past_the_end_panics() {
        let small = Automaton::terminal();
        let _ = &small[abc_any_d().entry()];
    }

    #[test]
    fn display_nests_the_chain() {
        assert_eq!(
            abc_any_d().to_string(),
            r#"Transition(Literal("abc"), Loop(AnyChar, Transition(Literal("d"), Terminal)))"#
        );
        assert_eq!(Automaton::terminal().to_string(), "Terminal");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(abc_any_d(), abc_any_d());

        let mut looped = Automaton::terminal();
        looped.push_loop(Expectation::Literal("d".into()));
        let mut plain = Automaton::terminal();
        plain.push_transition(Expectation::Literal("d".into()));
        assert_ne!(looped, plain);
        assert_ne!(plain, Automaton::terminal());
    }
}
