use dermaiq_core::score::outcome::{CategoryGroup, ScoredProduct};

pub fn print(result: &ScoredProduct, show_all: bool, verbose: bool) {
    if let Some(ref name) = result.product_name {
        println!("=== {} ===\n", name);
    }

    println!("  Score: {}/100 ({})", result.score, result.band);

    if let Some(ref cause) = result.ceiling_cause {
        println!("  Ceiling: {}", cause.reason);
    }
    if result.needs_alternative {
        println!("  A healthier alternative should be suggested (score below 50).");
    }
    println!();

    print_groups("Positive ingredients", &result.positive_ingredients);
    print_groups("Negative ingredients", &result.negative_ingredients);

    // Per-ingredient penalty breakdown
    if verbose || show_all {
        let to_show: Vec<_> = if show_all {
            result.assessments.iter().collect()
        } else {
            result
                .assessments
                .iter()
                .filter(|a| !a.effective_penalty.is_zero())
                .collect()
        };

        if !to_show.is_empty() {
            println!("  Penalties:");
            let max_name = to_show.iter().map(|a| a.name.len()).max().unwrap_or(10);
            for a in &to_show {
                println!(
                    "    {:<width$}  {:<7}  -{}",
                    a.name,
                    a.risk_level.to_string(),
                    a.effective_penalty,
                    width = max_name
                );
                if verbose {
                    println!("      {}", a.reason);
                }
            }
            println!();
        }
    }

    if verbose {
        println!(
            "  Penalty total: {}{}",
            result.penalty_total,
            if result.amplified {
                " (few-ingredient amplifier applied)"
            } else {
                ""
            }
        );
        println!();
    }
}

fn print_groups(heading: &str, groups: &[CategoryGroup]) {
    if groups.is_empty() {
        return;
    }
    println!("  {heading}:");
    for group in groups {
        println!("    {}", group.category);
        for item in &group.items {
            match &item.note {
                Some(note) => println!("      {} ({}) -- {}", item.name, item.risk_level, note),
                None => println!("      {} ({})", item.name, item.risk_level),
            }
        }
    }
    println!();
}
