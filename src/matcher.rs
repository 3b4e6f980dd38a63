use crate::ast::{Node, Pattern};
use crate::error::MatchError;
use crate::observer::{MatchObserver, NoopObserver};

pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Outcome of matching a pattern against the start of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The pattern consumed this many leading symbols.
    Matched(usize),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn len(&self) -> Option<usize> {
        match self {
            MatchResult::Matched(len) => Some(*len),
            MatchResult::NoMatch => None,
        }
    }
}

/// Backtracking prefix matcher over a borrowed pattern.
///
/// Matching is anchored at the start of the input only. Union alternatives
/// are tried in declared order and the first one whose continuation also
/// succeeds wins; stars are greedy and give back repetitions one at a time.
/// Union alternatives and star bodies are each matched on their own and
/// contribute only the first length they find.
///
/// The search is exponential in the worst case: nothing is memoized
/// between alternatives or repetition counts.
#[derive(Debug, Clone)]
pub struct Matcher<'p, S = char> {
    nodes: &'p [Node<S>],
    max_depth: usize,
}

impl<'p, S: PartialEq> Matcher<'p, S> {
    pub fn new(pattern: &'p Pattern<S>) -> Self {
        Self::from_nodes(pattern.nodes())
    }

    /// Matcher over nodes that have not been through [`Pattern::new`].
    /// Invalid constructs surface as [`MatchError::UnsupportedConstruct`].
    pub fn from_nodes(nodes: &'p [Node<S>]) -> Self {
        Self {
            nodes,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit on nested evaluation; deeper patterns fail with
    /// [`MatchError::ResourceExhausted`] instead of overflowing the stack.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn find(&self, input: &[S]) -> Result<MatchResult, MatchError> {
        self.find_observed(input, &mut NoopObserver)
    }

    pub fn find_observed(
        &self,
        input: &[S],
        observer: &mut dyn MatchObserver,
    ) -> Result<MatchResult, MatchError> {
        let mut search = Search {
            input,
            observer,
            max_depth: self.max_depth,
        };
        let end = search.step(Rest::root(self.nodes), 0, 0)?;
        Ok(end.map_or(MatchResult::NoMatch, MatchResult::Matched))
    }
}

// What is left to match: `nodes` here, then whatever follows the
// enclosing `Concat`s.
struct Rest<'p, 'r, S> {
    nodes: &'p [Node<S>],
    outer: Option<&'r Rest<'p, 'r, S>>,
}

// Manual impls: a derive would require `S: Copy`.
impl<S> Clone for Rest<'_, '_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Rest<'_, '_, S> {}

impl<'p, S> Rest<'p, '_, S> {
    fn root(nodes: &'p [Node<S>]) -> Self {
        Self { nodes, outer: None }
    }
}

struct Search<'i, 'o, S> {
    input: &'i [S],
    observer: &'o mut dyn MatchObserver,
    max_depth: usize,
}

impl<S: PartialEq> Search<'_, '_, S> {
    // Returns the input position where the first successful match of
    // `rest` starting at `pos` ends.
    fn step(
        &mut self,
        mut rest: Rest<'_, '_, S>,
        mut pos: usize,
        depth: usize,
    ) -> Result<Option<usize>, MatchError> {
        if depth > self.max_depth {
            return Err(MatchError::ResourceExhausted {
                limit: self.max_depth,
            });
        }
        loop {
            let Some((node, nodes)) = rest.nodes.split_first() else {
                match rest.outer {
                    Some(outer) => {
                        rest = *outer;
                        continue;
                    }
                    None => return Ok(Some(pos)),
                }
            };
            let tail = Rest {
                nodes,
                outer: rest.outer,
            };
            match node {
                // Literal runs are consumed in place; no recursion.
                Node::Literal(c) => {
                    if self.input.get(pos) != Some(c) {
                        return Ok(None);
                    }
                    pos += 1;
                    rest = tail;
                }
                Node::Concat(inner) => {
                    let spliced = Rest {
                        nodes: inner,
                        outer: Some(&tail),
                    };
                    return self.step(spliced, pos, depth + 1);
                }
                Node::Union(alternatives) => return self.union(alternatives, tail, pos, depth),
                Node::Star(body) => return self.star(body, tail, pos, depth),
            }
        }
    }

    fn union<'p>(
        &mut self,
        alternatives: &'p [Vec<Node<S>>],
        tail: Rest<'p, '_, S>,
        pos: usize,
        depth: usize,
    ) -> Result<Option<usize>, MatchError> {
        if alternatives.is_empty() {
            return Err(MatchError::UnsupportedConstruct {
                construct: "empty union",
                pos,
            });
        }
        for (index, alt) in alternatives.iter().enumerate() {
            self.observer.alternative(index, pos);
            let Some(alt_end) = self.step(Rest::root(alt), pos, depth + 1)? else {
                continue;
            };
            // Not committed until the continuation succeeds too.
            if let Some(end) = self.step(tail, alt_end, depth + 1)? {
                return Ok(Some(end));
            }
            self.observer.alternative_rejected(index, pos);
        }
        Ok(None)
    }

    fn star<'p>(
        &mut self,
        body: &'p [Node<S>],
        tail: Rest<'p, '_, S>,
        pos: usize,
        depth: usize,
    ) -> Result<Option<usize>, MatchError> {
        // ends[k] is where k repetitions stop. A zero-length repetition
        // is never chained, which keeps `()*` and `(a|)*` finite.
        let mut ends = vec![pos];
        let mut last = pos;
        while let Some(end) = self.step(Rest::root(body), last, depth + 1)? {
            if end == last {
                break;
            }
            ends.push(end);
            last = end;
        }
        self.observer.repetitions(ends.len() - 1, pos);

        for (count, &start) in ends.iter().enumerate().rev() {
            self.observer.repetition_chosen(count, pos);
            if let Some(end) = self.step(tail, start, depth + 1)? {
                return Ok(Some(end));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::seq;
    use crate::observer::{Event, Recorder};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn find(nodes: Vec<Node>, input: &str) -> MatchResult {
        let pattern = Pattern::new(nodes).unwrap();
        Matcher::new(&pattern).find(&chars(input)).unwrap()
    }

    #[test]
    fn empty_pattern_matches_zero() {
        assert_eq!(find(vec![], ""), MatchResult::Matched(0));
        assert_eq!(find(vec![], "abc"), MatchResult::Matched(0));
        assert_eq!(find(vec![Node::concat([])], "abc"), MatchResult::Matched(0));
    }

    #[test]
    fn literals_match_exact_prefix() {
        assert_eq!(find(seq("ab"), "ab"), MatchResult::Matched(2));
        assert_eq!(find(seq("ab"), "abzzz"), MatchResult::Matched(2));
        assert_eq!(find(seq("ab"), "a"), MatchResult::NoMatch);
        assert_eq!(find(seq("ab"), "ba"), MatchResult::NoMatch);
        assert_eq!(find(seq("a"), ""), MatchResult::NoMatch);
    }

    #[test]
    fn first_alternative_with_working_continuation_wins() {
        let nodes = vec![Node::union([seq("a"), seq("ab")]), Node::lit('b')];
        let pattern = Pattern::new(nodes).unwrap();
        let mut rec = Recorder::default();
        let result = Matcher::new(&pattern)
            .find_observed(&chars("ab"), &mut rec)
            .unwrap();
        assert_eq!(result, MatchResult::Matched(2));
        // The second alternative is never looked at.
        assert_eq!(rec.events, vec![Event::Alternative { index: 0, pos: 0 }]);
    }

    #[test]
    fn union_backtracks_into_later_alternative() {
        let nodes = vec![Node::union([seq("a"), seq("ab")]), Node::lit('c')];
        let pattern = Pattern::new(nodes).unwrap();
        let mut rec = Recorder::default();
        let result = Matcher::new(&pattern)
            .find_observed(&chars("abc"), &mut rec)
            .unwrap();
        assert_eq!(result, MatchResult::Matched(3));
        assert_eq!(
            rec.events,
            vec![
                Event::Alternative { index: 0, pos: 0 },
                Event::AlternativeRejected { index: 0, pos: 0 },
                Event::Alternative { index: 1, pos: 0 },
            ]
        );
    }

    #[test]
    fn union_prefers_declared_order_over_length() {
        let nodes = vec![Node::union([seq("a"), seq("aa")])];
        assert_eq!(find(nodes, "aa"), MatchResult::Matched(1));
    }

    #[test]
    fn star_gives_back_repetitions() {
        let nodes = vec![Node::star(seq("a")), Node::lit('a')];
        let pattern = Pattern::new(nodes).unwrap();
        let mut rec = Recorder::default();
        let result = Matcher::new(&pattern)
            .find_observed(&chars("aaa"), &mut rec)
            .unwrap();
        assert_eq!(result, MatchResult::Matched(3));
        assert_eq!(
            rec.events,
            vec![
                Event::Repetitions { count: 3, pos: 0 },
                Event::RepetitionChosen { count: 3, pos: 0 },
                Event::RepetitionChosen { count: 2, pos: 0 },
            ]
        );
    }

    #[test]
    fn star_with_zero_repetitions() {
        let nodes = vec![Node::star(seq("a")), Node::lit('a')];
        assert_eq!(find(nodes.clone(), "a"), MatchResult::Matched(1));
        assert_eq!(find(nodes, "b"), MatchResult::NoMatch);
    }

    #[test]
    fn star_of_empty_body_terminates() {
        assert_eq!(find(vec![Node::star([])], "xyz"), MatchResult::Matched(0));
        let nullable = Node::star([Node::union([seq("x"), vec![]])]);
        assert_eq!(find(vec![nullable], "xxy"), MatchResult::Matched(2));
    }

    #[test]
    fn star_body_is_committed_to_first_length() {
        // The union inside the star settles on "a", so the chain stops at
        // offset 1 and "ab" is never used as a repetition.
        let nodes = vec![Node::star([Node::union([seq("a"), seq("ab")])]), Node::lit('c')];
        assert_eq!(find(nodes.clone(), "abc"), MatchResult::NoMatch);
        assert_eq!(find(nodes, "aac"), MatchResult::Matched(3));
    }

    #[test]
    fn union_alternative_is_committed_to_first_length() {
        // The alternative `a*` reports its greedy length only.
        let nodes = vec![Node::union([vec![Node::star(seq("a"))]]), Node::lit('a')];
        assert_eq!(find(nodes, "aa"), MatchResult::NoMatch);
    }

    #[test]
    fn concat_is_spliced_into_continuation() {
        let flat = vec![Node::star(seq("a")), Node::lit('a')];
        let nested = vec![Node::concat([Node::star(seq("a"))]), Node::lit('a')];
        assert_eq!(find(flat, "aa"), MatchResult::Matched(2));
        assert_eq!(find(nested, "aa"), MatchResult::Matched(2));
    }

    #[test]
    fn empty_union_in_raw_nodes_is_an_error() {
        let nodes = vec![Node::lit('a'), Node::Union(vec![])];
        let err = Matcher::from_nodes(&nodes).find(&chars("ab")).unwrap_err();
        assert_eq!(
            err,
            MatchError::UnsupportedConstruct {
                construct: "empty union",
                pos: 1
            }
        );
    }

    #[test]
    fn raw_nodes_that_fail_early_never_reach_bad_construct() {
        let nodes = vec![Node::lit('a'), Node::Union(vec![])];
        let result = Matcher::from_nodes(&nodes).find(&chars("b")).unwrap();
        assert_eq!(result, MatchResult::NoMatch);
    }

    #[test]
    fn deep_nesting_exhausts_depth_limit() {
        let mut node = Node::lit('a');
        for _ in 0..32 {
            node = Node::concat([node]);
        }
        let pattern = Pattern::new(vec![node]).unwrap();
        let err = Matcher::new(&pattern).max_depth(8).find(&['a']).unwrap_err();
        assert_eq!(err, MatchError::ResourceExhausted { limit: 8 });
        let ok = Matcher::new(&pattern).max_depth(64).find(&['a']).unwrap();
        assert_eq!(ok, MatchResult::Matched(1));
    }

    #[test]
    fn long_inputs_do_not_deepen_recursion() {
        let input = vec!['a'; 50_000];
        let literals = Pattern::new(input.iter().copied().map(Node::lit).collect()).unwrap();
        let star = Pattern::new(vec![Node::star(seq("a"))]).unwrap();
        assert_eq!(
            Matcher::new(&literals).max_depth(4).find(&input).unwrap(),
            MatchResult::Matched(50_000)
        );
        assert_eq!(
            Matcher::new(&star).max_depth(4).find(&input).unwrap(),
            MatchResult::Matched(50_000)
        );
    }

    #[test]
    fn result_accessors() {
        assert!(MatchResult::Matched(0).is_match());
        assert!(!MatchResult::NoMatch.is_match());
        assert_eq!(MatchResult::Matched(4).len(), Some(4));
        assert_eq!(MatchResult::NoMatch.len(), None);
    }
}
