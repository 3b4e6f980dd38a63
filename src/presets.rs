//! Hand-built patterns available by name.

use crate::ast::{seq, Node, Pattern};
use crate::error::PatternError;

pub const NAMES: &[&str] = &[
    "ad_or_ae",
    "f_qp_star",
    "full",
    "xy_star_z",
    "ab_star",
    "a_or_b",
    "ab_or_cd_9",
    "x_ab_zap_9",
    "a_star_a",
];

/// Build the preset called `name`, or `None` if there is no such preset.
pub fn get(name: &str) -> Option<Result<Pattern, PatternError>> {
    let nodes = match name {
        // a(d|e)
        "ad_or_ae" => vec![Node::lit('a'), Node::union([seq("d"), seq("e")])],
        // f(qp)*
        "f_qp_star" => vec![Node::lit('f'), Node::star(seq("qp"))],
        // (ab)*(p|q)(x|y)*z
        "full" => vec![
            Node::star(seq("ab")),
            Node::union([seq("p"), seq("q")]),
            Node::star([Node::union([seq("x"), seq("y")])]),
            Node::lit('z'),
        ],
        // (x|y)*z
        "xy_star_z" => vec![Node::star([Node::union([seq("x"), seq("y")])]), Node::lit('z')],
        // (ab)*
        "ab_star" => vec![Node::star(seq("ab"))],
        // (a|b)
        "a_or_b" => vec![Node::union([seq("a"), seq("b")])],
        // (ab|cd)9
        "ab_or_cd_9" => vec![Node::union([seq("ab"), seq("cd")]), Node::lit('9')],
        // x(a|b)(zap)*9
        "x_ab_zap_9" => vec![
            Node::lit('x'),
            Node::union([seq("a"), seq("b")]),
            Node::star(seq("zap")),
            Node::lit('9'),
        ],
        // a*a
        "a_star_a" => vec![Node::star(seq("a")), Node::lit('a')],
        _ => return None,
    };
    Some(Pattern::new(nodes))
}
