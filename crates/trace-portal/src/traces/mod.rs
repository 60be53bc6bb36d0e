//! Traces engine: the rubric that turns an activity's classification and size into points.
//!
//! Every function here is pure. An unknown activity type, or a count that falls outside every
//! bracket of its type, earns zero traces instead of an error; intake validation is the place
//! that rejects malformed submissions.

mod rank;
mod rubric;

pub use rank::RankTier;
pub use rubric::{TraceBracket, RUBRIC};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of activity categories recognised by the rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Narrativa,
    Microcuento,
    Drabble,
    Hilo,
    Rol,
    Otro,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::Narrativa,
        ActivityKind::Microcuento,
        ActivityKind::Drabble,
        ActivityKind::Hilo,
        ActivityKind::Rol,
        ActivityKind::Otro,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Narrativa => "narrativa",
            ActivityKind::Microcuento => "microcuento",
            ActivityKind::Drabble => "drabble",
            ActivityKind::Hilo => "hilo",
            ActivityKind::Rol => "rol",
            ActivityKind::Otro => "otro",
        }
    }

    /// Which count the rubric reads for this kind.
    pub const fn measure(&self) -> Measure {
        match self {
            ActivityKind::Hilo | ActivityKind::Rol => Measure::Comments,
            ActivityKind::Narrativa
            | ActivityKind::Microcuento
            | ActivityKind::Drabble
            | ActivityKind::Otro => Measure::Words,
        }
    }

    /// Whether submissions of this kind carry a meaningful comment count.
    pub fn counts_comments(&self) -> bool {
        self.measure() == Measure::Comments
    }

    pub fn award(&self, words: u32, comments: u32) -> u32 {
        self.bracket(words, comments)
            .map(|bracket| bracket.award)
            .unwrap_or(0)
    }

    pub fn bracket(&self, words: u32, comments: u32) -> Option<&'static TraceBracket> {
        let value = self.measure().select(words, comments);
        rubric::brackets_for(*self).find(|bracket| bracket.contains(value))
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity type '{0}'")]
pub struct UnknownActivityKind(pub String);

impl FromStr for ActivityKind {
    type Err = UnknownActivityKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ActivityKind::ALL
            .into_iter()
            .find(|kind| kind.label() == raw)
            .ok_or_else(|| UnknownActivityKind(raw.to_string()))
    }
}

/// Quantity a bracket is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Words,
    Comments,
}

impl Measure {
    pub fn label(&self) -> &'static str {
        match self {
            Measure::Words => "words",
            Measure::Comments => "comments",
        }
    }

    fn select(&self, words: u32, comments: u32) -> u32 {
        match self {
            Measure::Words => words,
            Measure::Comments => comments,
        }
    }
}

/// Award for a submission described by its raw type string.
pub fn compute_traces(kind: &str, words: u32, comments: u32) -> u32 {
    kind.parse::<ActivityKind>()
        .map(|kind| kind.award(words, comments))
        .unwrap_or(0)
}

/// Preview of an award together with the bracket that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceQuote {
    pub kind: String,
    pub words: u32,
    pub comments: u32,
    pub traces: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

pub fn quote(kind: &str, words: u32, comments: u32) -> TraceQuote {
    let bracket = kind
        .parse::<ActivityKind>()
        .ok()
        .and_then(|kind| kind.bracket(words, comments));

    TraceQuote {
        kind: kind.to_string(),
        words,
        comments,
        traces: bracket.map(|bracket| bracket.award).unwrap_or(0),
        condition: bracket.map(TraceBracket::condition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrativa_brackets_follow_word_count() {
        assert_eq!(compute_traces("narrativa", 300, 0), 300);
        assert_eq!(compute_traces("narrativa", 499, 0), 300);
        assert_eq!(compute_traces("narrativa", 500, 0), 400);
        assert_eq!(compute_traces("narrativa", 999, 0), 400);
        assert_eq!(compute_traces("narrativa", 1000, 0), 500);
        assert_eq!(compute_traces("narrativa", 1500, 0), 600);
        assert_eq!(compute_traces("narrativa", 1999, 0), 600);
        assert_eq!(compute_traces("narrativa", 2000, 0), 0);
        assert_eq!(compute_traces("narrativa", 299, 0), 0);
        assert_eq!(compute_traces("narrativa", 0, 0), 0);
    }

    #[test]
    fn microcuento_and_drabble_cap_out() {
        assert_eq!(compute_traces("microcuento", 99, 0), 100);
        assert_eq!(compute_traces("microcuento", 100, 0), 0);
        assert_eq!(compute_traces("drabble", 149, 0), 150);
        assert_eq!(compute_traces("drabble", 150, 0), 200);
        assert_eq!(compute_traces("drabble", 199, 0), 200);
        assert_eq!(compute_traces("drabble", 200, 0), 0);
    }

    #[test]
    fn hilo_and_rol_read_comments_not_words() {
        assert_eq!(compute_traces("hilo", 5000, 4), 100);
        assert_eq!(compute_traces("hilo", 1, 9), 150);
        assert_eq!(compute_traces("hilo", 1, 10), 0);
        assert_eq!(compute_traces("rol", 1, 0), 250);
        assert_eq!(compute_traces("rol", 1, 5), 400);
        assert_eq!(compute_traces("rol", 1, 14), 550);
        assert_eq!(compute_traces("rol", 1, 19), 700);
        assert_eq!(compute_traces("rol", 1, 20), 0);
    }

    #[test]
    fn otro_uses_closed_upper_bounds() {
        assert_eq!(compute_traces("otro", 0, 0), 100);
        assert_eq!(compute_traces("otro", 50, 0), 100);
        assert_eq!(compute_traces("otro", 51, 0), 150);
        assert_eq!(compute_traces("otro", 100, 0), 150);
        assert_eq!(compute_traces("otro", 101, 0), 200);
        assert_eq!(compute_traces("otro", u32::MAX, 0), 200);
    }

    #[test]
    fn unknown_types_earn_nothing() {
        assert_eq!(compute_traces("unknown-type", 500, 0), 0);
        assert_eq!(compute_traces("Narrativa", 500, 0), 0);
        assert_eq!(compute_traces("", 0, 0), 0);
    }

    #[test]
    fn engine_is_total_and_repeatable() {
        let samples = [0, 1, 4, 5, 49, 50, 51, 99, 100, 101, 150, 199, 200, 299, 300, 1999, 2000];
        for kind in ActivityKind::ALL {
            for &words in &samples {
                for &comments in &samples {
                    let first = kind.award(words, comments);
                    assert_eq!(first, kind.award(words, comments));
                    assert_eq!(first, compute_traces(kind.label(), words, comments));
                    assert!(first <= 700, "{kind} {words}/{comments} awarded {first}");
                }
            }
        }
    }

    #[test]
    fn kinds_parse_from_their_labels() {
        for kind in ActivityKind::ALL {
            assert_eq!(kind.label().parse::<ActivityKind>(), Ok(kind));
        }
        assert_eq!(
            "poema".parse::<ActivityKind>(),
            Err(UnknownActivityKind("poema".to_string()))
        );
    }

    #[test]
    fn quote_reports_the_matching_condition() {
        let quote = quote("drabble", 160, 3);
        assert_eq!(quote.traces, 200);
        assert_eq!(quote.condition.as_deref(), Some("150 <= words < 200"));

        let miss = super::quote("narrativa", 120, 0);
        assert_eq!(miss.traces, 0);
        assert!(miss.condition.is_none());
    }
}
