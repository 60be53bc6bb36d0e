use serde::Serialize;

use super::{ActivityKind, Measure};

/// One row of the rubric: `award` traces when `from <= value < until`.
///
/// `until: None` leaves the bracket open upwards. Brackets of the same kind never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceBracket {
    pub kind: ActivityKind,
    pub measure: Measure,
    pub from: u32,
    pub until: Option<u32>,
    pub award: u32,
}

impl TraceBracket {
    const fn new(kind: ActivityKind, from: u32, until: Option<u32>, award: u32) -> Self {
        Self {
            kind,
            measure: kind.measure(),
            from,
            until,
            award,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.from && self.until.map_or(true, |until| value < until)
    }

    /// Human readable form, e.g. `300 <= words < 500`.
    pub fn condition(&self) -> String {
        let measure = self.measure.label();
        match (self.from, self.until) {
            (0, Some(until)) => format!("{measure} < {until}"),
            (from, Some(until)) => format!("{from} <= {measure} < {until}"),
            (0, None) => format!("any {measure}"),
            (from, None) => format!("{measure} >= {from}"),
        }
    }
}

use super::ActivityKind::{Drabble, Hilo, Microcuento, Narrativa, Otro, Rol};

/// The complete rubric, grouped by kind in ascending order.
///
/// `otro` is defined with closed upper bounds (`<= 50`, `<= 100`); over integers those are the
/// half-open intervals `[0, 51)` and `[51, 101)`.
pub const RUBRIC: &[TraceBracket] = &[
    TraceBracket::new(Narrativa, 300, Some(500), 300),
    TraceBracket::new(Narrativa, 500, Some(1000), 400),
    TraceBracket::new(Narrativa, 1000, Some(1500), 500),
    TraceBracket::new(Narrativa, 1500, Some(2000), 600),
    TraceBracket::new(Microcuento, 0, Some(100), 100),
    TraceBracket::new(Drabble, 0, Some(150), 150),
    TraceBracket::new(Drabble, 150, Some(200), 200),
    TraceBracket::new(Hilo, 0, Some(5), 100),
    TraceBracket::new(Hilo, 5, Some(10), 150),
    TraceBracket::new(Rol, 0, Some(5), 250),
    TraceBracket::new(Rol, 5, Some(10), 400),
    TraceBracket::new(Rol, 10, Some(15), 550),
    TraceBracket::new(Rol, 15, Some(20), 700),
    TraceBracket::new(Otro, 0, Some(51), 100),
    TraceBracket::new(Otro, 51, Some(101), 150),
    TraceBracket::new(Otro, 101, None, 200),
];

pub(crate) fn brackets_for(kind: ActivityKind) -> impl Iterator<Item = &'static TraceBracket> {
    RUBRIC.iter().filter(move |bracket| bracket.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_of_a_kind_never_overlap() {
        for kind in ActivityKind::ALL {
            let brackets: Vec<_> = brackets_for(kind).collect();
            assert!(!brackets.is_empty(), "{kind} has no brackets");
            for pair in brackets.windows(2) {
                let until = pair[0].until.expect("only the last bracket is open");
                assert!(until <= pair[1].from, "{kind} brackets overlap");
            }
        }
    }

    #[test]
    fn measure_follows_kind() {
        for bracket in RUBRIC {
            assert_eq!(bracket.measure, bracket.kind.measure());
        }
    }

    #[test]
    fn conditions_render_bounds() {
        assert_eq!(RUBRIC[0].condition(), "300 <= words < 500");
        assert_eq!(RUBRIC[7].condition(), "comments < 5");
        assert_eq!(RUBRIC[15].condition(), "words >= 101");
    }
}
