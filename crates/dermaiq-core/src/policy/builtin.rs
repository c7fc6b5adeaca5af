use crate::error::ScoreError;
use crate::policy::schema::PolicyDef;

const EU_PENALTY_JSON: &str = include_str!("../../../../policies/eu-penalty.json");

/// Available predefined policies.
pub const PRESETS: &[&str] = &["eu"];

/// Load a predefined policy by name.
pub fn load_preset(name: &str) -> Result<PolicyDef, ScoreError> {
    match name {
        "eu" => {
            let policy: PolicyDef = serde_json::from_str(EU_PENALTY_JSON)?;
            crate::policy::validate_policy(&policy)?;
            Ok(policy)
        }
        _ => Err(ScoreError::PolicyInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
