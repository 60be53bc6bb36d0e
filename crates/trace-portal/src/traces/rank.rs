use serde::Serialize;

/// Standing earned by accumulated traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    AlmaEnTransito,
    VozEnBoceto,
    NarradorDeAtmosferas,
    EscritorDeIntrospecciones,
    ArquitectoDelAlma,
}

impl RankTier {
    const LADDER: [RankTier; 5] = [
        RankTier::AlmaEnTransito,
        RankTier::VozEnBoceto,
        RankTier::NarradorDeAtmosferas,
        RankTier::EscritorDeIntrospecciones,
        RankTier::ArquitectoDelAlma,
    ];

    pub fn for_traces(total_traces: u64) -> Self {
        Self::LADDER
            .into_iter()
            .rev()
            .find(|tier| total_traces >= tier.threshold())
            .unwrap_or(RankTier::AlmaEnTransito)
    }

    /// Minimum total traces for the tier.
    pub fn threshold(&self) -> u64 {
        match self {
            RankTier::AlmaEnTransito => 0,
            RankTier::VozEnBoceto => 500,
            RankTier::NarradorDeAtmosferas => 1000,
            RankTier::EscritorDeIntrospecciones => 1500,
            RankTier::ArquitectoDelAlma => 2000,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RankTier::AlmaEnTransito => "Alma en tránsito",
            RankTier::VozEnBoceto => "Voz en boceto",
            RankTier::NarradorDeAtmosferas => "Narrador de atmósferas",
            RankTier::EscritorDeIntrospecciones => "Escritor de introspecciones",
            RankTier::ArquitectoDelAlma => "Arquitecto del alma",
        }
    }

    pub fn medal(&self) -> Option<&'static str> {
        match self {
            RankTier::AlmaEnTransito => None,
            RankTier::VozEnBoceto => Some("Susurros que germinan"),
            RankTier::NarradorDeAtmosferas => Some("Excelente narrador"),
            RankTier::EscritorDeIntrospecciones => Some("Lector de huellas"),
            RankTier::ArquitectoDelAlma => Some("Arquitecto de Personajes"),
        }
    }

    pub fn next(&self) -> Option<RankTier> {
        let position = Self::LADDER.iter().position(|tier| tier == self)?;
        Self::LADDER.get(position + 1).copied()
    }

    /// Traces still missing to reach the following tier, `None` at the top.
    pub fn traces_to_next(total_traces: u64) -> Option<u64> {
        Self::for_traces(total_traces)
            .next()
            .map(|next| next.threshold().saturating_sub(total_traces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(RankTier::for_traces(0), RankTier::AlmaEnTransito);
        assert_eq!(RankTier::for_traces(499), RankTier::AlmaEnTransito);
        assert_eq!(RankTier::for_traces(500), RankTier::VozEnBoceto);
        assert_eq!(RankTier::for_traces(1000), RankTier::NarradorDeAtmosferas);
        assert_eq!(RankTier::for_traces(1999), RankTier::EscritorDeIntrospecciones);
        assert_eq!(RankTier::for_traces(2000), RankTier::ArquitectoDelAlma);
        assert_eq!(RankTier::for_traces(u64::MAX), RankTier::ArquitectoDelAlma);
    }

    #[test]
    fn entry_tier_has_no_medal() {
        assert!(RankTier::AlmaEnTransito.medal().is_none());
        assert_eq!(
            RankTier::ArquitectoDelAlma.medal(),
            Some("Arquitecto de Personajes")
        );
    }

    #[test]
    fn distance_to_next_tier() {
        assert_eq!(RankTier::traces_to_next(0), Some(500));
        assert_eq!(RankTier::traces_to_next(1200), Some(300));
        assert_eq!(RankTier::traces_to_next(2400), None);
    }
}
