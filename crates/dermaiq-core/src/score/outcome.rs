use crate::input::InputWarning;
use crate::model::{IngredientCategory, RiskLevel, RiskReason};
use crate::trace::ScoreTrace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Scoring assessment for a single ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientAssessment {
    /// Name as delivered by the classifier.
    pub name: String,
    /// Normalized identity key.
    pub normalized_name: String,
    pub risk_level: RiskLevel,
    pub risk_reasons: BTreeSet<RiskReason>,
    /// The single reason that set this ingredient's penalty, if any.
    pub dominant_reason: Option<RiskReason>,
    /// Penalty from the policy table, before amplification.
    pub base_penalty: Decimal,
    /// Penalty actually charged (after the few-ingredient amplifier).
    pub effective_penalty: Decimal,
    /// Human-readable explanation of the penalty.
    pub reason: String,
}

/// One ingredient inside a display group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedItem {
    pub name: String,
    pub risk_level: RiskLevel,
    /// Benefit text for positive items, concern text for negative ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Ingredients grouped under one vocabulary category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: IngredientCategory,
    pub items: Vec<GroupedItem>,
}

/// The ingredient that bounded the score's admissible range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingCause {
    pub name: String,
    pub risk_level: RiskLevel,
    /// Human-readable explanation of the ceiling.
    pub reason: String,
}

/// The output of scoring one ingredient list. Created fresh per request,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Name of the policy that produced this score.
    pub policy_name: String,
    /// Final score, always within [0, 100].
    pub score: u32,
    /// Qualitative band label derived from the score.
    pub band: String,
    /// Present when a red or orange ingredient capped the range;
    /// `None` when only green/yellow ingredients are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_cause: Option<CeilingCause>,
    /// Trigger for the (external) healthier-alternative suggestion.
    pub needs_alternative: bool,
    /// Sum of effective penalties before clamping.
    pub penalty_total: Decimal,
    /// Whether the few-ingredient amplifier applied.
    pub amplified: bool,
    pub positive_ingredients: Vec<CategoryGroup>,
    pub negative_ingredients: Vec<CategoryGroup>,
    /// Per-ingredient penalty breakdown, sorted by normalized name.
    pub assessments: Vec<IngredientAssessment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<InputWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<ScoreTrace>,
}
