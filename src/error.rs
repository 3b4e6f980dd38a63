use thiserror::Error;

/// Structural problems found while building a [`Pattern`](crate::ast::Pattern).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A union with no alternatives. `node` is the pre-order index of the union.
    #[error("union at node {node} has no alternatives")]
    EmptyUnion { node: usize },
    #[error("pattern nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Failures of a single match call. A plain non-match is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("unsupported construct `{construct}` at input position {pos}")]
    UnsupportedConstruct { construct: &'static str, pos: usize },
    #[error("recursion limit of {limit} exceeded")]
    ResourceExhausted { limit: usize },
}
