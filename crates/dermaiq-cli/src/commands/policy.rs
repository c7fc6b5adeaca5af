use dermaiq_core::model::{ReasonClass, RiskLevel};
use dermaiq_core::policy::builtin;
use std::path::Path;

pub fn list() -> Result<(), dermaiq_core::error::ScoreError> {
    println!("Available predefined policies:\n");
    for name in builtin::PRESETS {
        let policy = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, policy.name, policy.version);
        if let Some(ref desc) = policy.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), dermaiq_core::error::ScoreError> {
    let policy = builtin::load_preset(preset)?;

    println!("{} (version {})\n", policy.name, policy.version);

    if let Some(ref desc) = policy.description {
        println!("{}\n", desc);
    }

    println!("The worst ingredient present sets the admissible score range:\n");
    println!(
        "  any red                  [{:>3}, {:>3}]",
        policy.ranges.red.min, policy.ranges.red.max
    );
    println!(
        "  orange, no red           [{:>3}, {:>3}]",
        policy.ranges.orange.min, policy.ranges.orange.max
    );
    println!(
        "  only green/yellow        [{:>3}, {:>3}]",
        policy.ranges.clean.min, policy.ranges.clean.max
    );

    println!("\nPer-ingredient penalties (one reason per ingredient, the heaviest):\n");
    println!("  Level     Carcinogen/Endocrine   Other reasons");
    println!("  {}", "-".repeat(48));
    for level in [
        RiskLevel::Red,
        RiskLevel::Orange,
        RiskLevel::Yellow,
        RiskLevel::Green,
    ] {
        println!(
            "  {:<8}  {:<21}  {}",
            level.to_string(),
            policy.penalty_for(level, ReasonClass::Systemic),
            policy.penalty_for(level, ReasonClass::Local)
        );
    }

    println!(
        "\nWith {} or fewer ingredients every penalty is multiplied by {}.",
        policy.amplifier.max_count, policy.amplifier.factor
    );
    println!("Penalties are subtracted from 100, then the result is clamped into");
    println!("the admissible range and rounded to the nearest integer.\n");

    println!("Bands:\n");
    for pair in policy.bands.windows(2) {
        println!(
            "  {:<12} {:>3} - {:>3}",
            pair[0].label,
            pair[0].min,
            pair[1].min - 1
        );
    }
    if let Some(last) = policy.bands.last() {
        println!("  {:<12} {:>3} - 100", last.label, last.min);
    }
    println!();

    Ok(())
}

pub fn schema() -> Result<(), dermaiq_core::error::ScoreError> {
    print!(
        r#"JSON Policy Schema
==================

A policy file defines how classified ingredients map to a product score.
When you run `dermaiq score`, each ingredient's risk level and reason tags
are looked up in the penalty table, and the worst ingredient present
determines the admissible score range.

Top-level fields:
  name          (string, required)  Human-readable name of the policy
  description   (string, optional)  What this policy is for
  version       (string, required)  Version identifier (e.g., "2024.1")
  amplifier     (object, required)  Few-ingredient amplifier:
                                      max_count  ingredient count at or below
                                                 which amplification applies
                                      factor     multiplier as a decimal
                                                 string (e.g., "1.5")
  penalties     (array, required)   One entry per risk level (all four of
                                    green, yellow, orange, red):
                                      level      risk level name
                                      systemic   penalty for carcinogen or
                                                 endocrine reasons
                                      local      penalty for all other
                                                 reasons (or none)
                                    Penalty values are decimal strings and
                                    systemic must be >= local. Green must
                                    be zero.
  ranges        (object, required)  Admissible score ranges, each with
                                    integer min/max in [0, 100]:
                                      red     any red ingredient present
                                      orange  orange present, no red
                                      clean   only green/yellow present
  bands         (array, required)   Band labels ordered by ascending min;
                                    a score belongs to the last band whose
                                    min it reaches. First band must start
                                    at 0.

Example:
{{
  "name": "My custom policy",
  "version": "1.0",
  "amplifier": {{ "max_count": 3, "factor": "1.5" }},
  "penalties": [
    {{ "level": "red", "systemic": "12", "local": "8" }},
    {{ "level": "orange", "systemic": "6", "local": "4" }},
    {{ "level": "yellow", "systemic": "3", "local": "2" }},
    {{ "level": "green", "systemic": "0", "local": "0" }}
  ],
  "ranges": {{
    "red": {{ "min": 0, "max": 24 }},
    "orange": {{ "min": 0, "max": 49 }},
    "clean": {{ "min": 50, "max": 100 }}
  }},
  "bands": [
    {{ "label": "Very Poor", "min": 0 }},
    {{ "label": "Poor", "min": 25 }},
    {{ "label": "Fair", "min": 50 }},
    {{ "label": "Good", "min": 75 }},
    {{ "label": "Excellent", "min": 90 }}
  ]
}}

Note: penalty and factor values must be quoted strings, not bare numbers,
to preserve exact decimal precision (e.g., "1.5" not 1.5).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), dermaiq_core::error::ScoreError> {
    let policy = dermaiq_core::policy::load_policy(file)?;

    println!("Policy '{}' (v{}) is valid.", policy.name, policy.version);
    println!(
        "  Penalty levels: {}",
        policy
            .penalties
            .iter()
            .map(|p| p.level.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Bands: {}",
        policy
            .bands
            .iter()
            .map(|b| b.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Amplifier: x{} at <= {} ingredients",
        policy.amplifier.factor, policy.amplifier.max_count
    );

    Ok(())
}
