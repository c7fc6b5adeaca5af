//! Optional scoring trace: a machine-readable record of every penalty
//! lookup and decision behind a score, for audit output and debugging.

use crate::model::{RiskLevel, RiskReason};
use crate::score::outcome::IngredientAssessment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    NormalizeName,
    PenaltyLookup,
    Amplify,
    CeilingDecision,
    SumAndClamp,
    BandAssign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

/// Trace record for one ingredient's penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub entry_id: String,
    pub ingredient: String,
    pub normalized_name: String,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_reason: Option<RiskReason>,
    pub base_penalty: Decimal,
    pub effective_penalty: Decimal,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDecisionTarget {
    Ceiling,
    Score,
    Band,
}

/// Trace record for one scoring decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDecision {
    pub decision_id: String,
    pub target: TraceDecisionTarget,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub trace_schema_version: String,
    pub entries: Vec<TraceEntry>,
    pub decisions: Vec<TraceDecision>,
}

impl Default for ScoreTrace {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            entries: Vec::new(),
            decisions: Vec::new(),
        }
    }
}

pub fn build_entry(
    idx: usize,
    assessment: &IngredientAssessment,
    amplified: bool,
    factor: Decimal,
) -> TraceEntry {
    let mut steps = vec![
        TraceStep {
            step_type: TraceStepType::NormalizeName,
            message: format!(
                "Normalized '{}' -> '{}'",
                assessment.name, assessment.normalized_name
            ),
        },
        TraceStep {
            step_type: TraceStepType::PenaltyLookup,
            message: match assessment.dominant_reason {
                Some(r) => format!(
                    "{} ({}) -> base penalty {}",
                    assessment.risk_level, r, assessment.base_penalty
                ),
                None => format!(
                    "{} (no reason) -> base penalty {}",
                    assessment.risk_level, assessment.base_penalty
                ),
            },
        },
    ];

    if amplified {
        steps.push(TraceStep {
            step_type: TraceStepType::Amplify,
            message: format!(
                "{} x {} = {}",
                assessment.base_penalty, factor, assessment.effective_penalty
            ),
        });
    }

    TraceEntry {
        entry_id: format!("ent_{idx}"),
        ingredient: assessment.name.clone(),
        normalized_name: assessment.normalized_name.clone(),
        risk_level: assessment.risk_level,
        dominant_reason: assessment.dominant_reason,
        base_penalty: assessment.base_penalty,
        effective_penalty: assessment.effective_penalty,
        steps,
    }
}

pub fn build_decision(idx: usize, target: TraceDecisionTarget, message: String) -> TraceDecision {
    TraceDecision {
        decision_id: format!("dec_{idx}"),
        target,
        message,
    }
}
