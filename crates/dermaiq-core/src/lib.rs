pub mod classifier;
pub mod error;
pub mod input;
pub mod model;
pub mod policy;
pub mod score;
pub mod trace;

use classifier::IngredientClassifier;
use error::ScoreError;
use input::ClassifiedInput;
use policy::schema::PolicyDef;
use score::outcome::ScoredProduct;

/// Options controlling scoring output.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    /// Attach a full per-decision trace to the result.
    pub include_trace: bool,
}

/// Main API entry point: validate classifier output and score it against
/// a policy.
///
/// Validation rejects out-of-vocabulary risk labels and collapses
/// duplicate ingredient names; warnings it collects are carried on the
/// result for the caller to surface.
pub fn score_input(
    input: &ClassifiedInput,
    policy: &PolicyDef,
    options: &ScoreOptions,
) -> Result<ScoredProduct, ScoreError> {
    let validated = input::validate(input)?;
    if validated.ingredients.is_empty() {
        return Err(ScoreError::EmptyIngredientList);
    }

    let mut product = score::engine::score(&validated.ingredients, policy, options)?;
    product.product_name = validated.product_name;
    product.product_type = validated.product_type;
    product.warnings = validated.warnings;
    Ok(product)
}

/// Convenience entry: run the injected classifier over raw ingredient
/// names, then score the annotated result.
pub fn score_product(
    names: &[String],
    classifier: &dyn IngredientClassifier,
    policy: &PolicyDef,
    options: &ScoreOptions,
) -> Result<ScoredProduct, ScoreError> {
    let ingredients = classifier.classify(names)?;
    let input = ClassifiedInput {
        product_name: None,
        product_type: None,
        ingredients,
    };
    score_input(&input, policy, options)
}
