use crate::error::ScoreError;
use crate::model::{Ingredient, ReasonClass, RiskLevel};
use crate::policy::schema::PolicyDef;
use crate::score::grouping::group_ingredients;
use crate::score::outcome::{CeilingCause, IngredientAssessment, ScoredProduct};
use crate::trace::{self, ScoreTrace, TraceDecisionTarget};
use crate::ScoreOptions;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Score a classified ingredient list against a policy.
///
/// Pure and deterministic: the input is treated as a set (sorted by
/// normalized name, duplicates collapsed to the worst entry), so element
/// order never affects the result.
pub fn score(
    ingredients: &[Ingredient],
    policy: &PolicyDef,
    options: &ScoreOptions,
) -> Result<ScoredProduct, ScoreError> {
    if ingredients.is_empty() {
        return Err(ScoreError::EmptyIngredientList);
    }

    let items = dedup_and_sort(ingredients);
    let count = items.len();
    let amplified = count <= policy.amplifier.max_count;

    // The worst ingredient present dictates the admissible range.
    let worst = items
        .iter()
        .map(|i| i.risk_level)
        .max()
        .unwrap_or(RiskLevel::Green);
    let range = policy.range_for(worst);

    let assessments: Vec<IngredientAssessment> = items
        .iter()
        .map(|i| assess(i, policy, amplified))
        .collect();

    let penalty_total: Decimal = assessments.iter().map(|a| a.effective_penalty).sum();

    let raw = Decimal::from(100u32) - penalty_total;
    let clamped = raw.clamp(Decimal::from(range.min), Decimal::from(range.max));
    let score = clamped
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(range.min);

    let band = policy.band_for(score).to_string();
    let ceiling_cause = find_ceiling_cause(&items, worst, range.max);
    let needs_alternative = score < policy.ranges.clean.min;

    let (positive_ingredients, negative_ingredients) = group_ingredients(&items);

    let score_trace = if options.include_trace {
        Some(build_trace(
            policy,
            &assessments,
            amplified,
            &ceiling_cause,
            penalty_total,
            raw,
            score,
            &band,
        ))
    } else {
        None
    };

    Ok(ScoredProduct {
        product_name: None,
        product_type: None,
        policy_name: policy.name.clone(),
        score,
        band,
        ceiling_cause,
        needs_alternative,
        penalty_total,
        amplified,
        positive_ingredients,
        negative_ingredients,
        assessments,
        warnings: Vec::new(),
        trace: score_trace,
    })
}

/// Sort by normalized name and collapse duplicates, keeping the
/// higher-severity entry so one substance never double-counts.
fn dedup_and_sort(ingredients: &[Ingredient]) -> Vec<Ingredient> {
    let mut items: Vec<Ingredient> = ingredients.to_vec();
    items.sort_by(|a, b| {
        a.normalized_name
            .cmp(&b.normalized_name)
            .then_with(|| severity_key(b).cmp(&severity_key(a)))
    });
    items.dedup_by(|b, a| a.normalized_name == b.normalized_name);
    items
}

fn severity_key(ing: &Ingredient) -> (RiskLevel, bool) {
    (ing.risk_level, ing.reason_class() == ReasonClass::Systemic)
}

/// Compute one ingredient's penalty: only the single highest-penalty
/// reason applies, never a sum over multiple reasons.
fn assess(ingredient: &Ingredient, policy: &PolicyDef, amplified: bool) -> IngredientAssessment {
    let dominant_reason = ingredient.dominant_reason();
    let base_penalty = policy.penalty_for(ingredient.risk_level, ingredient.reason_class());
    let effective_penalty = if amplified {
        base_penalty * policy.amplifier.factor
    } else {
        base_penalty
    };

    let reason = if base_penalty.is_zero() {
        format!("{}: {}, no penalty", ingredient.name, ingredient.risk_level)
    } else {
        let reason_label = match dominant_reason {
            Some(r) => r.to_string(),
            None => "unspecified".to_string(),
        };
        if amplified {
            format!(
                "{}: {} ({}) -> penalty {} x {} = {}",
                ingredient.name,
                ingredient.risk_level,
                reason_label,
                base_penalty,
                policy.amplifier.factor,
                effective_penalty
            )
        } else {
            format!(
                "{}: {} ({}) -> penalty {}",
                ingredient.name, ingredient.risk_level, reason_label, base_penalty
            )
        }
    };

    IngredientAssessment {
        name: ingredient.name.clone(),
        normalized_name: ingredient.normalized_name.clone(),
        risk_level: ingredient.risk_level,
        risk_reasons: ingredient.risk_reasons.clone(),
        dominant_reason,
        base_penalty,
        effective_penalty,
        reason,
    }
}

/// The ingredient that set the ceiling: among worst-level ingredients the
/// first by normalized name, which is stable under input permutation.
fn find_ceiling_cause(
    items: &[Ingredient],
    worst: RiskLevel,
    ceiling: u32,
) -> Option<CeilingCause> {
    if worst < RiskLevel::Orange {
        return None;
    }
    items
        .iter()
        .find(|i| i.risk_level == worst)
        .map(|i| CeilingCause {
            name: i.name.clone(),
            risk_level: worst,
            reason: format!("'{}' is {}, score capped at {}", i.name, worst, ceiling),
        })
}

#[allow(clippy::too_many_arguments)]
fn build_trace(
    policy: &PolicyDef,
    assessments: &[IngredientAssessment],
    amplified: bool,
    ceiling_cause: &Option<CeilingCause>,
    penalty_total: Decimal,
    raw: Decimal,
    score: u32,
    band: &str,
) -> ScoreTrace {
    let entries = assessments
        .iter()
        .enumerate()
        .map(|(i, a)| trace::build_entry(i, a, amplified, policy.amplifier.factor))
        .collect();

    let ceiling_message = match ceiling_cause {
        Some(c) => c.reason.clone(),
        None => format!(
            "only green/yellow ingredients; admissible range [{}, {}]",
            policy.ranges.clean.min, policy.ranges.clean.max
        ),
    };

    let decisions = vec![
        trace::build_decision(0, TraceDecisionTarget::Ceiling, ceiling_message),
        trace::build_decision(
            1,
            TraceDecisionTarget::Score,
            format!(
                "100 - {} = {}, clamped and rounded to {}",
                penalty_total, raw, score
            ),
        ),
        trace::build_decision(
            2,
            TraceDecisionTarget::Band,
            format!("score {score} -> band '{band}'"),
        ),
    ];

    ScoreTrace {
        trace_schema_version: trace::TRACE_SCHEMA_VERSION.to_string(),
        entries,
        decisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskReason;
    use crate::policy::builtin::load_preset;
    use rust_decimal_macros::dec;

    fn policy() -> PolicyDef {
        load_preset("eu").unwrap()
    }

    fn opts() -> ScoreOptions {
        ScoreOptions::default()
    }

    fn ing(name: &str, level: RiskLevel, reasons: &[RiskReason]) -> Ingredient {
        Ingredient::new(name, level).with_reasons(reasons.iter().copied())
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = score(&[], &policy(), &opts()).unwrap_err();
        assert!(matches!(err, ScoreError::EmptyIngredientList));
    }

    #[test]
    fn test_single_green_scores_100() {
        let result = score(&[ing("Glycerin", RiskLevel::Green, &[])], &policy(), &opts()).unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.band, "Excellent");
        assert!(result.ceiling_cause.is_none());
        assert!(!result.needs_alternative);
        assert_eq!(result.penalty_total, dec!(0));
    }

    #[test]
    fn test_single_red_carcinogen_clamps_to_24() {
        // 1 ingredient: amplifier applies, 12 x 1.5 = 18, raw 82, clamp [0,24]
        let result = score(
            &[ing("Formaldehyde", RiskLevel::Red, &[RiskReason::Carcinogen])],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert_eq!(result.score, 24);
        assert_eq!(result.band, "Very Poor");
        assert!(result.needs_alternative);
        assert_eq!(result.penalty_total, dec!(18));
        let cause = result.ceiling_cause.unwrap();
        assert_eq!(cause.name, "Formaldehyde");
        assert_eq!(cause.risk_level, RiskLevel::Red);
    }

    #[test]
    fn test_orange_allergen_among_four_clamps_to_49() {
        // 4 ingredients: no amplifier; raw = 100 - 4 = 96, clamp [0,49]
        let result = score(
            &[
                ing("Fragrance", RiskLevel::Orange, &[RiskReason::Allergen]),
                ing("Glycerin", RiskLevel::Green, &[]),
                ing("Aqua", RiskLevel::Green, &[]),
                ing("Panthenol", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert_eq!(result.score, 49);
        assert_eq!(result.band, "Poor");
        assert!(result.needs_alternative);
        assert!(!result.amplified);
        assert_eq!(result.ceiling_cause.unwrap().name, "Fragrance");
    }

    #[test]
    fn test_clean_floor_never_below_50() {
        // 50 yellow irritants: raw = 100 - 100 = 0, clamped to clean floor 50
        let ingredients: Vec<Ingredient> = (0..50)
            .map(|i| {
                ing(
                    &format!("Ingredient {i:02}"),
                    RiskLevel::Yellow,
                    &[RiskReason::Irritant],
                )
            })
            .collect();
        let result = score(&ingredients, &policy(), &opts()).unwrap();
        assert_eq!(result.score, 50);
        assert_eq!(result.band, "Fair");
        assert!(result.ceiling_cause.is_none());
        assert!(!result.needs_alternative);
    }

    #[test]
    fn test_red_band_floor_never_below_0() {
        // 10 red carcinogens, no amplifier: raw = 100 - 120 = -20, clamp to 0
        let ingredients: Vec<Ingredient> = (0..10)
            .map(|i| {
                ing(
                    &format!("Red {i:02}"),
                    RiskLevel::Red,
                    &[RiskReason::Carcinogen],
                )
            })
            .collect();
        let result = score(&ingredients, &policy(), &opts()).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.band, "Very Poor");
    }

    #[test]
    fn test_range_containment() {
        let with_red = score(
            &[
                ing("A", RiskLevel::Red, &[RiskReason::Pollutant]),
                ing("B", RiskLevel::Green, &[]),
                ing("C", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("D", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert!(with_red.score <= 24);

        let with_orange = score(
            &[
                ing("A", RiskLevel::Orange, &[RiskReason::Endocrine]),
                ing("B", RiskLevel::Green, &[]),
                ing("C", RiskLevel::Yellow, &[RiskReason::Allergen]),
                ing("D", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert!(with_orange.score <= 49);

        let clean = score(
            &[
                ing("A", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("B", RiskLevel::Green, &[]),
                ing("C", RiskLevel::Yellow, &[RiskReason::Allergen]),
                ing("D", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert!((50..=100).contains(&clean.score));
    }

    #[test]
    fn test_permutation_invariance() {
        let mut ingredients = vec![
            ing("Fragrance", RiskLevel::Orange, &[RiskReason::Allergen]),
            ing("Glycerin", RiskLevel::Green, &[]),
            ing("Limonene", RiskLevel::Yellow, &[RiskReason::Allergen]),
            ing("Aqua", RiskLevel::Green, &[]),
            ing("Parabens", RiskLevel::Orange, &[RiskReason::Endocrine]),
        ];
        let forward = score(&ingredients, &policy(), &opts()).unwrap();
        ingredients.reverse();
        let reversed = score(&ingredients, &policy(), &opts()).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_determinism() {
        let ingredients = vec![
            ing("Fragrance", RiskLevel::Orange, &[RiskReason::Allergen]),
            ing("Glycerin", RiskLevel::Green, &[]),
        ];
        let first = score(&ingredients, &policy(), &opts()).unwrap();
        let second = score(&ingredients, &policy(), &opts()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adding_red_never_increases_score() {
        let base = vec![
            ing("A", RiskLevel::Yellow, &[RiskReason::Irritant]),
            ing("B", RiskLevel::Green, &[]),
            ing("C", RiskLevel::Green, &[]),
            ing("D", RiskLevel::Green, &[]),
        ];
        let before = score(&base, &policy(), &opts()).unwrap();

        let mut extended = base.clone();
        extended.push(ing("Z", RiskLevel::Red, &[RiskReason::Carcinogen]));
        let after = score(&extended, &policy(), &opts()).unwrap();
        assert!(after.score <= before.score);

        // Also when crossing the amplifier boundary (3 -> 4 ingredients)
        let small = vec![
            ing("A", RiskLevel::Red, &[RiskReason::Carcinogen]),
            ing("B", RiskLevel::Red, &[RiskReason::Carcinogen]),
            ing("C", RiskLevel::Red, &[RiskReason::Carcinogen]),
        ];
        let before = score(&small, &policy(), &opts()).unwrap();
        let mut extended = small.clone();
        extended.push(ing("Z", RiskLevel::Red, &[RiskReason::Carcinogen]));
        let after = score(&extended, &policy(), &opts()).unwrap();
        assert!(after.score <= before.score);
    }

    #[test]
    fn test_amplifier_is_exactly_1_5x() {
        // Same risk profile: 3 yellow irritants with and without a green
        // filler that lifts the count past the amplifier boundary.
        let amplified = score(
            &[
                ing("A", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("B", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("C", RiskLevel::Yellow, &[RiskReason::Irritant]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert!(amplified.amplified);
        assert_eq!(amplified.penalty_total, dec!(9)); // 3 x (2 x 1.5)
        for a in amplified
            .assessments
            .iter()
            .filter(|a| a.risk_level == RiskLevel::Yellow)
        {
            assert_eq!(a.effective_penalty, a.base_penalty * dec!(1.5));
        }

        let plain = score(
            &[
                ing("A", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("B", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("C", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("D", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert!(!plain.amplified);
        assert_eq!(plain.penalty_total, dec!(6));
        assert_eq!(amplified.penalty_total, plain.penalty_total * dec!(1.5));
    }

    #[test]
    fn test_single_highest_penalty_reason_only() {
        // Red with both systemic and local reasons: penalty is 12, not 12+8
        let result = score(
            &[
                ing(
                    "Triclosan",
                    RiskLevel::Red,
                    &[RiskReason::Endocrine, RiskReason::Pollutant],
                ),
                ing("B", RiskLevel::Green, &[]),
                ing("C", RiskLevel::Green, &[]),
                ing("D", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert_eq!(result.penalty_total, dec!(12));
        let triclosan = &result.assessments[result
            .assessments
            .iter()
            .position(|a| a.normalized_name == "triclosan")
            .unwrap()];
        assert_eq!(triclosan.dominant_reason, Some(RiskReason::Endocrine));
    }

    #[test]
    fn test_duplicates_do_not_double_count() {
        let result = score(
            &[
                ing("Fragrance", RiskLevel::Orange, &[RiskReason::Allergen]),
                ing("  fragrance ", RiskLevel::Orange, &[RiskReason::Allergen]),
                ing("B", RiskLevel::Green, &[]),
                ing("C", RiskLevel::Green, &[]),
                ing("D", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        // 5 raw entries, 4 distinct: no amplifier, one orange penalty
        assert_eq!(result.assessments.len(), 4);
        assert!(!result.amplified);
        assert_eq!(result.penalty_total, dec!(4));
    }

    #[test]
    fn test_duplicate_keeps_worse_classification() {
        let result = score(
            &[
                ing("Fragrance", RiskLevel::Yellow, &[RiskReason::Irritant]),
                ing("Fragrance", RiskLevel::Red, &[RiskReason::Endocrine]),
                ing("B", RiskLevel::Green, &[]),
                ing("C", RiskLevel::Green, &[]),
                ing("D", RiskLevel::Green, &[]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert_eq!(result.assessments.len(), 4);
        assert!(result.score <= 24);
        assert_eq!(result.penalty_total, dec!(12));
    }

    #[test]
    fn test_ceiling_cause_tie_break_is_order_independent() {
        let a_first = score(
            &[
                ing("Alpha", RiskLevel::Red, &[RiskReason::Carcinogen]),
                ing("Beta", RiskLevel::Red, &[RiskReason::Carcinogen]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        let b_first = score(
            &[
                ing("Beta", RiskLevel::Red, &[RiskReason::Carcinogen]),
                ing("Alpha", RiskLevel::Red, &[RiskReason::Carcinogen]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert_eq!(a_first.ceiling_cause.unwrap().name, "Alpha");
        assert_eq!(b_first.ceiling_cause.unwrap().name, "Alpha");
    }

    #[test]
    fn test_yellow_only_band_math() {
        // 2 yellow allergens amplified: 2 x (2 x 1.5) = 6 -> 94
        let result = score(
            &[
                ing("Limonene", RiskLevel::Yellow, &[RiskReason::Allergen]),
                ing("Linalool", RiskLevel::Yellow, &[RiskReason::Allergen]),
            ],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert_eq!(result.score, 94);
        assert_eq!(result.band, "Excellent");
    }

    #[test]
    fn test_trace_included_on_request() {
        let options = ScoreOptions {
            include_trace: true,
        };
        let result = score(
            &[ing("Fragrance", RiskLevel::Orange, &[RiskReason::Allergen])],
            &policy(),
            &options,
        )
        .unwrap();
        let trace = result.trace.unwrap();
        assert_eq!(trace.entries.len(), 1);
        assert_eq!(trace.decisions.len(), 3);
        assert!(trace.entries[0]
            .steps
            .iter()
            .any(|s| matches!(s.step_type, crate::trace::TraceStepType::Amplify)));

        let without = score(
            &[ing("Fragrance", RiskLevel::Orange, &[RiskReason::Allergen])],
            &policy(),
            &opts(),
        )
        .unwrap();
        assert!(without.trace.is_none());
    }
}
