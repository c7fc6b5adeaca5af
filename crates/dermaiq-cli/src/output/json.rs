use dermaiq_core::error::ScoreError;
use dermaiq_core::score::outcome::ScoredProduct;

pub fn print(result: &ScoredProduct) -> Result<(), ScoreError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
