use std::path::PathBuf;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), dermaiq_core::error::ScoreError> {
    let input = dermaiq_core::input::load_input(&input_file)?;
    let validated = dermaiq_core::input::validate(&input)?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&validated)?);
        return Ok(());
    }

    if let Some(ref name) = validated.product_name {
        println!("Product: {name}");
    }
    if let Some(ref ptype) = validated.product_type {
        println!("Type:    {ptype}");
    }
    println!("{} ingredient(s)\n", validated.ingredients.len());

    let max_name = validated
        .ingredients
        .iter()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(10);

    for ing in &validated.ingredients {
        let reasons = if ing.risk_reasons.is_empty() {
            "-".to_string()
        } else {
            ing.risk_reasons
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let category = ing
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "(ungrouped)".to_string());
        println!(
            "  {:<width$}  {:<7}  {:<35}  {}",
            ing.name,
            ing.risk_level.to_string(),
            reasons,
            category,
            width = max_name
        );
    }

    if !validated.warnings.is_empty() {
        println!();
        for w in &validated.warnings {
            eprintln!("warning: {}: {}", w.ingredient, w.message);
        }
    }

    Ok(())
}
