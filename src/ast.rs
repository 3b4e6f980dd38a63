use std::fmt;

use crate::error::PatternError;

/// Deepest node nesting [`Pattern::new`] accepts.
pub const MAX_NESTING: usize = 1024;

/// One node of the pattern IR.
///
/// A pattern is an ordered sequence of nodes; sequences appear as the
/// payload of `Concat`, as each alternative of `Union` and as the body of
/// `Star`. The empty sequence matches zero symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S = char> {
    Literal(S),
    Concat(Vec<Node<S>>),
    /// Alternatives are tried in declared order.
    Union(Vec<Vec<Node<S>>>),
    Star(Vec<Node<S>>),
}

impl<S> Node<S> {
    pub fn lit(symbol: S) -> Self {
        Node::Literal(symbol)
    }

    pub fn concat(nodes: impl IntoIterator<Item = Node<S>>) -> Self {
        Node::Concat(nodes.into_iter().collect())
    }

    pub fn union(alternatives: impl IntoIterator<Item = Vec<Node<S>>>) -> Self {
        Node::Union(alternatives.into_iter().collect())
    }

    pub fn star(body: impl IntoIterator<Item = Node<S>>) -> Self {
        Node::Star(body.into_iter().collect())
    }

    /// Check this node and everything below it.
    ///
    /// Node indices in errors are counted in pre-order starting at 0.
    pub fn validate(&self) -> Result<(), PatternError> {
        self.validate_from(&mut 0, 0)
    }

    fn validate_from(&self, next: &mut usize, depth: usize) -> Result<(), PatternError> {
        if depth >= MAX_NESTING {
            return Err(PatternError::TooDeep { limit: MAX_NESTING });
        }
        let index = *next;
        *next += 1;
        match self {
            Node::Literal(_) => Ok(()),
            Node::Concat(nodes) | Node::Star(nodes) => validate_seq(nodes, next, depth + 1),
            Node::Union(alternatives) => {
                if alternatives.is_empty() {
                    return Err(PatternError::EmptyUnion { node: index });
                }
                alternatives
                    .iter()
                    .try_for_each(|alt| validate_seq(alt, next, depth + 1))
            }
        }
    }
}

fn validate_seq<S>(nodes: &[Node<S>], next: &mut usize, depth: usize) -> Result<(), PatternError> {
    nodes.iter().try_for_each(|n| n.validate_from(next, depth))
}

/// A literal sequence, one `Literal` per char.
///
/// - `seq("ab")` → `[Literal('a'), Literal('b')]`
pub fn seq(text: &str) -> Vec<Node> {
    text.chars().map(Node::Literal).collect()
}

/// A validated, immutable pattern.
///
/// Built once and matched against any number of inputs; nothing in it
/// changes during matching, so a `&Pattern` can be shared across threads.
///
/// Nesting deeper than [`MAX_NESTING`] is rejected. Building, cloning and
/// dropping a raw `Node` tree all recurse, so trees far deeper than that
/// can overflow the stack before validation sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern<S = char> {
    nodes: Vec<Node<S>>,
}

impl<S> Pattern<S> {
    pub fn new(nodes: Vec<Node<S>>) -> Result<Self, PatternError> {
        validate_seq(&nodes, &mut 0, 0)?;
        Ok(Self { nodes })
    }

    /// The pattern matching the empty prefix of every input.
    pub fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn nodes(&self) -> &[Node<S>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// Rendering in Kleene notation, e.g. `(ab)*(p|q)(x|y)*z`.

impl fmt::Display for Node<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(c) => write!(f, "{c}"),
            Node::Concat(nodes) => write_seq(f, nodes),
            Node::Union(alternatives) => {
                f.write_str("(")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write_seq(f, alt)?;
                }
                f.write_str(")")
            }
            Node::Star(body) => {
                // A lone literal or union needs no extra grouping.
                match body.as_slice() {
                    [n @ (Node::Literal(_) | Node::Union(_))] => write!(f, "{n}*"),
                    _ => {
                        f.write_str("(")?;
                        write_seq(f, body)?;
                        f.write_str(")*")
                    }
                }
            }
        }
    }
}

impl fmt::Display for Pattern<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_seq(f, &self.nodes)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, nodes: &[Node<char>]) -> fmt::Result {
    nodes.iter().try_for_each(|n| write!(f, "{n}"))
}
