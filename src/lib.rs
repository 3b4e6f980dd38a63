pub mod ast;
pub mod error;
pub mod harness;
pub mod matcher;
pub mod observer;
pub mod presets;

pub use ast::{seq, Node, Pattern};
pub use error::{MatchError, PatternError};
pub use matcher::{MatchResult, Matcher};

/// Match `pattern` against the start of `input`.
pub fn match_prefix<S: PartialEq>(
    pattern: &Pattern<S>,
    input: &[S],
) -> Result<MatchResult, MatchError> {
    Matcher::new(pattern).find(input)
}

/// Whether some prefix of `input` matches `pattern`.
pub fn is_match(pattern: &Pattern, input: &str) -> Result<bool, MatchError> {
    let chars: Vec<char> = input.chars().collect();
    Ok(match_prefix(pattern, &chars)?.is_match())
}
