pub mod builtin;
pub mod schema;

use crate::error::ScoreError;
use crate::model::RiskLevel;
use rust_decimal::Decimal;
use schema::PolicyDef;
use std::path::Path;

/// Load a policy from a JSON file.
pub fn load_policy(path: &Path) -> Result<PolicyDef, ScoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScoreError::PolicyLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let policy: PolicyDef = serde_json::from_str(&content).map_err(|e| ScoreError::PolicyLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Parse a policy from a JSON string (no file path context).
pub fn parse_policy_str(json: &str) -> Result<PolicyDef, ScoreError> {
    let policy: PolicyDef = serde_json::from_str(json).map_err(ScoreError::Json)?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Validate that a policy is well-formed.
pub fn validate_policy(policy: &PolicyDef) -> Result<(), ScoreError> {
    if policy.name.is_empty() {
        return Err(ScoreError::PolicyInvalid("name must not be empty".into()));
    }

    if policy.amplifier.factor < Decimal::ONE {
        return Err(ScoreError::PolicyInvalid(format!(
            "amplifier factor {} must be >= 1",
            policy.amplifier.factor
        )));
    }

    for level in [
        RiskLevel::Green,
        RiskLevel::Yellow,
        RiskLevel::Orange,
        RiskLevel::Red,
    ] {
        let matching: Vec<_> = policy
            .penalties
            .iter()
            .filter(|p| p.level == level)
            .collect();
        match matching.as_slice() {
            [] => {
                return Err(ScoreError::PolicyInvalid(format!(
                    "no penalty rule for level '{level}'"
                )))
            }
            [rule] => {
                if rule.systemic < rule.local {
                    return Err(ScoreError::PolicyInvalid(format!(
                        "level '{level}': systemic penalty {} is below local penalty {}",
                        rule.systemic, rule.local
                    )));
                }
                if rule.local < Decimal::ZERO {
                    return Err(ScoreError::PolicyInvalid(format!(
                        "level '{level}': penalties must not be negative"
                    )));
                }
                if level == RiskLevel::Green && !rule.systemic.is_zero() {
                    return Err(ScoreError::PolicyInvalid(
                        "green ingredients must carry zero penalty".into(),
                    ));
                }
            }
            _ => {
                return Err(ScoreError::PolicyInvalid(format!(
                    "duplicate penalty rule for level '{level}'"
                )))
            }
        }
    }

    for (name, range) in [
        ("red", policy.ranges.red),
        ("orange", policy.ranges.orange),
        ("clean", policy.ranges.clean),
    ] {
        if range.min > range.max || range.max > 100 {
            return Err(ScoreError::PolicyInvalid(format!(
                "range '{name}' [{}, {}] must satisfy min <= max <= 100",
                range.min, range.max
            )));
        }
    }

    if policy.bands.is_empty() {
        return Err(ScoreError::PolicyInvalid("bands must not be empty".into()));
    }
    if policy.bands[0].min != 0 {
        return Err(ScoreError::PolicyInvalid(
            "first band must start at 0".into(),
        ));
    }
    for pair in policy.bands.windows(2) {
        if pair[1].min <= pair[0].min {
            return Err(ScoreError::PolicyInvalid(format!(
                "band '{}' (min {}) must start above band '{}' (min {})",
                pair[1].label, pair[1].min, pair[0].label, pair[0].min
            )));
        }
    }
    if let Some(last) = policy.bands.last() {
        if last.min > 100 {
            return Err(ScoreError::PolicyInvalid(format!(
                "band '{}' starts above 100",
                last.label
            )));
        }
    }

    Ok(())
}
