//! Table-driven checking of expected verdicts.

use crate::ast::Pattern;
use crate::error::MatchError;
use crate::matcher::Matcher;

#[derive(Debug, Clone)]
pub struct Case<'a> {
    pub pattern: &'a Pattern,
    pub input: &'a str,
    pub expected: bool,
}

/// A case where the engine's verdict differs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disagreement {
    pub pattern: String,
    pub input: String,
    pub expected: bool,
    pub actual: Result<bool, MatchError>,
}

/// Run every case and collect the ones the engine disagrees with.
/// An engine error always counts as a disagreement.
pub fn run_table(cases: &[Case<'_>]) -> Vec<Disagreement> {
    cases
        .iter()
        .filter_map(|case| {
            let input: Vec<char> = case.input.chars().collect();
            let actual = Matcher::new(case.pattern)
                .find(&input)
                .map(|r| r.is_match());
            if actual == Ok(case.expected) {
                return None;
            }
            Some(Disagreement {
                pattern: case.pattern.to_string(),
                input: case.input.to_string(),
                expected: case.expected,
                actual,
            })
        })
        .collect()
}

/// Expected verdicts for the named presets.
pub const BUILTIN: &[(&str, &str, bool)] = &[
    ("ad_or_ae", "ad", true),
    ("ad_or_ae", "ae", true),
    ("ad_or_ae", "af", false),
    ("f_qp_star", "f", true),
    ("f_qp_star", "fqpqp", true),
    ("f_qp_star", "q", false),
    ("full", "pz", true),
    ("full", "ababqxyxz", true),
    ("full", "abz", false),
    ("full", "", false),
    ("xy_star_z", "z", true),
    ("xy_star_z", "xyyxz", true),
    ("xy_star_z", "xya", false),
    ("ab_star", "", true),
    ("ab_star", "zzz", true),
    ("a_or_b", "b", true),
    ("a_or_b", "c", false),
    ("ab_or_cd_9", "ab9", true),
    ("ab_or_cd_9", "cd9", true),
    ("ab_or_cd_9", "ac9", false),
    ("x_ab_zap_9", "xazap9", true),
    ("x_ab_zap_9", "xbzapzapzapzapzap9", true),
    ("x_ab_zap_9", "xc9", false),
    ("a_star_a", "a", true),
    ("a_star_a", "aaa", true),
    ("a_star_a", "", false),
];
