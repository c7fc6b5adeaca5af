use crate::model::{ReasonClass, RiskLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A scoring policy: penalty table, few-ingredient amplifier, admissible
/// score ranges and band labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub amplifier: AmplifierDef,
    pub penalties: Vec<PenaltyRuleDef>,
    pub ranges: RangeTableDef,
    /// Band labels ordered by ascending `min`; a score belongs to the last
    /// band whose `min` it reaches.
    pub bands: Vec<BandDef>,
}

/// Few-ingredient amplifier: with `max_count` or fewer ingredients each
/// one is a larger share of the formulation, so its penalty is scaled up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmplifierDef {
    pub max_count: usize,
    pub factor: Decimal,
}

/// Penalty for one risk level, split by reason class. Only the single
/// highest-penalty reason per ingredient applies, so `systemic` must be
/// at least `local`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyRuleDef {
    pub level: RiskLevel,
    pub systemic: Decimal,
    pub local: Decimal,
}

/// Admissible score ranges keyed by the worst ingredient present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeTableDef {
    /// Any red ingredient present.
    pub red: ScoreRangeDef,
    /// No red, at least one orange.
    pub orange: ScoreRangeDef,
    /// Only green/yellow ingredients.
    pub clean: ScoreRangeDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreRangeDef {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandDef {
    pub label: String,
    pub min: u32,
}

impl PolicyDef {
    /// Base penalty for one ingredient (before amplification).
    pub fn penalty_for(&self, level: RiskLevel, class: ReasonClass) -> Decimal {
        self.penalties
            .iter()
            .find(|p| p.level == level)
            .map(|p| match class {
                ReasonClass::Systemic => p.systemic,
                ReasonClass::Local => p.local,
            })
            .unwrap_or(Decimal::ZERO)
    }

    /// Admissible range given the worst risk level present.
    pub fn range_for(&self, worst: RiskLevel) -> ScoreRangeDef {
        match worst {
            RiskLevel::Red => self.ranges.red,
            RiskLevel::Orange => self.ranges.orange,
            RiskLevel::Green | RiskLevel::Yellow => self.ranges.clean,
        }
    }

    /// Band label for a final score.
    pub fn band_for(&self, score: u32) -> &str {
        self.bands
            .iter()
            .rev()
            .find(|b| score >= b.min)
            .map(|b| b.label.as_str())
            .unwrap_or("")
    }
}
