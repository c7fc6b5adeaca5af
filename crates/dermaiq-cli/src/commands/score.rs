use dermaiq_core::policy::{builtin, load_policy, schema::PolicyDef};
use dermaiq_core::ScoreOptions;
use std::path::PathBuf;

use crate::output;

#[allow(clippy::too_many_arguments)]
pub fn run(
    input_file: PathBuf,
    policy_file: Option<PathBuf>,
    preset: &str,
    output_format: &str,
    show_all: bool,
    verbose: bool,
    trace: bool,
) -> Result<(), dermaiq_core::error::ScoreError> {
    // Custom policy file takes precedence over the preset
    let policy: PolicyDef = match policy_file {
        Some(path) => load_policy(&path)?,
        None => builtin::load_preset(preset)?,
    };

    let options = ScoreOptions {
        include_trace: trace,
    };

    let input = dermaiq_core::input::load_input(&input_file)?;
    let result = dermaiq_core::score_input(&input, &policy, &options)?;

    for w in &result.warnings {
        eprintln!("warning: {}: {}", w.ingredient, w.message);
    }

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result, show_all, verbose),
    }

    Ok(())
}
