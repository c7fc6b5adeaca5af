//! Wire-shape input from the upstream Risk Classifier and its validation
//! into the typed model.
//!
//! The classifier delivers untyped strings; validation either converts them
//! or fails loudly. A bad risk label is never defaulted -- masking it would
//! corrupt the score's meaning. Invariant violations that do not change the
//! arithmetic (e.g. a green ingredient carrying reason tags) become
//! warnings instead.

use crate::error::ScoreError;
use crate::model::{normalize_name, Ingredient, IngredientCategory, RiskLevel, RiskReason};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

/// One ingredient exactly as the classifier emitted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIngredient {
    pub name: String,
    pub risk_level: String,
    #[serde(default)]
    pub risk_reasons: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub benefit: Option<String>,
    #[serde(default)]
    pub concern: Option<String>,
}

/// A classified product as delivered upstream: identity plus ingredients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifiedInput {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    pub ingredients: Vec<RawIngredient>,
}

/// Non-fatal issue found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputWarning {
    pub ingredient: String,
    pub message: String,
}

/// Validated input: typed ingredients, deduplicated and sorted by
/// normalized name, plus any warnings collected along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedInput {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<InputWarning>,
}

/// Load a classified input file (JSON) from disk.
pub fn load_input(path: &Path) -> Result<ClassifiedInput, ScoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScoreError::InputLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| ScoreError::InputLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Validate classifier output into typed ingredients.
///
/// Duplicate names (after normalization) collapse to the highest-severity
/// entry so one substance never double-counts; the result is sorted by
/// normalized name, which makes everything downstream order-independent.
pub fn validate(input: &ClassifiedInput) -> Result<ValidatedInput, ScoreError> {
    let mut warnings = Vec::new();
    let mut by_name: BTreeMap<String, Ingredient> = BTreeMap::new();

    for raw in &input.ingredients {
        let ingredient = validate_ingredient(raw, &mut warnings)?;

        match by_name.entry(ingredient.normalized_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(ingredient);
            }
            Entry::Occupied(mut slot) => {
                warnings.push(InputWarning {
                    ingredient: ingredient.name.clone(),
                    message: format!(
                        "duplicate of '{}'; keeping the higher-severity entry",
                        slot.get().name
                    ),
                });
                if severity_key(&ingredient) > severity_key(slot.get()) {
                    slot.insert(ingredient);
                }
            }
        }
    }

    Ok(ValidatedInput {
        product_name: input.product_name.clone(),
        product_type: input.product_type.clone(),
        ingredients: by_name.into_values().collect(),
        warnings,
    })
}

fn validate_ingredient(
    raw: &RawIngredient,
    warnings: &mut Vec<InputWarning>,
) -> Result<Ingredient, ScoreError> {
    let risk_level =
        RiskLevel::from_label(&raw.risk_level).ok_or_else(|| ScoreError::InvalidRiskLevel {
            ingredient: raw.name.clone(),
            value: raw.risk_level.clone(),
        })?;

    let mut risk_reasons = std::collections::BTreeSet::new();
    for reason in &raw.risk_reasons {
        // "none" is accepted as an explicit empty marker
        if reason.trim().eq_ignore_ascii_case("none") {
            continue;
        }
        let parsed =
            RiskReason::from_label(reason).ok_or_else(|| ScoreError::InvalidRiskReason {
                ingredient: raw.name.clone(),
                value: reason.clone(),
            })?;
        risk_reasons.insert(parsed);
    }

    if risk_level == RiskLevel::Green && !risk_reasons.is_empty() {
        warnings.push(InputWarning {
            ingredient: raw.name.clone(),
            message: "green ingredient carries risk reasons; reasons are ignored for green".into(),
        });
    }
    if risk_level != RiskLevel::Green && risk_reasons.is_empty() {
        warnings.push(InputWarning {
            ingredient: raw.name.clone(),
            message: format!("{risk_level} ingredient has no risk reason; penalized at the local rate"),
        });
    }

    let category = match raw.category.as_deref() {
        None => None,
        Some(label) => {
            let matched = IngredientCategory::from_label_loose(label);
            if matched.is_none() {
                warnings.push(InputWarning {
                    ingredient: raw.name.clone(),
                    message: format!(
                        "unknown category '{label}'; ingredient is scored but not grouped"
                    ),
                });
            }
            matched
        }
    };

    Ok(Ingredient {
        name: raw.name.clone(),
        normalized_name: normalize_name(&raw.name),
        risk_level,
        risk_reasons,
        category,
        benefit: raw.benefit.clone(),
        concern: raw.concern.clone(),
    })
}

/// Severity key for duplicate collapse: worse risk level wins, then a
/// systemic reason beats a local one.
fn severity_key(ing: &Ingredient) -> (RiskLevel, bool) {
    (
        ing.risk_level,
        ing.reason_class() == crate::model::ReasonClass::Systemic,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, level: &str, reasons: &[&str]) -> RawIngredient {
        RawIngredient {
            name: name.into(),
            risk_level: level.into(),
            risk_reasons: reasons.iter().map(|s| s.to_string()).collect(),
            category: None,
            benefit: None,
            concern: None,
        }
    }

    fn input(ingredients: Vec<RawIngredient>) -> ClassifiedInput {
        ClassifiedInput {
            product_name: None,
            product_type: None,
            ingredients,
        }
    }

    #[test]
    fn test_valid_input_parses() {
        let v = validate(&input(vec![
            raw("Glycerin", "green", &[]),
            raw("Fragrance", "orange", &["allergen"]),
        ]))
        .unwrap();
        assert_eq!(v.ingredients.len(), 2);
        assert!(v.warnings.is_empty());
        // Sorted by normalized name
        assert_eq!(v.ingredients[0].normalized_name, "fragrance");
    }

    #[test]
    fn test_invalid_risk_level_rejected() {
        let err = validate(&input(vec![raw("Parabens", "hazardous", &[])])).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidRiskLevel { .. }));
    }

    #[test]
    fn test_invalid_risk_reason_rejected() {
        let err = validate(&input(vec![raw("Parabens", "red", &["toxic"])])).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidRiskReason { .. }));
    }

    #[test]
    fn test_none_reason_accepted_as_empty() {
        let v = validate(&input(vec![raw("Water", "green", &["none"])])).unwrap();
        assert!(v.ingredients[0].risk_reasons.is_empty());
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn test_green_with_reasons_warns() {
        let v = validate(&input(vec![raw("Water", "green", &["irritant"])])).unwrap();
        assert_eq!(v.warnings.len(), 1);
        assert!(v.warnings[0].message.contains("green"));
    }

    #[test]
    fn test_non_green_without_reasons_warns() {
        let v = validate(&input(vec![raw("Fragrance", "yellow", &[])])).unwrap();
        assert_eq!(v.warnings.len(), 1);
    }

    #[test]
    fn test_duplicates_collapse_to_worse_entry() {
        let v = validate(&input(vec![
            raw("Fragrance", "yellow", &["irritant"]),
            raw("  FRAGRANCE ", "red", &["endocrine"]),
        ]))
        .unwrap();
        assert_eq!(v.ingredients.len(), 1);
        assert_eq!(v.ingredients[0].risk_level, RiskLevel::Red);
        assert!(v.warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn test_unknown_category_dropped_with_warning() {
        let mut r = raw("CI 19140", "yellow", &["allergen"]);
        r.category = Some("Synthetic Chemicals".into());
        let v = validate(&input(vec![r])).unwrap();
        assert!(v.ingredients[0].category.is_none());
        assert!(v.warnings.iter().any(|w| w.message.contains("unknown category")));
    }

    #[test]
    fn test_known_category_matched() {
        let mut r = raw("CI 19140", "yellow", &["allergen"]);
        r.category = Some("colorants & dyes".into());
        let v = validate(&input(vec![r])).unwrap();
        assert_eq!(
            v.ingredients[0].category,
            Some(IngredientCategory::ColorantsDyes)
        );
    }
}
