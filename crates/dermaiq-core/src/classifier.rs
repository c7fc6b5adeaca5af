use crate::error::ScoreError;
use crate::input::RawIngredient;

/// The upstream Risk Classifier, behind a trait so the engine never depends
/// on a concrete backend. Production systems wrap a model call or a curated
/// ingredient database; tests substitute a fake.
pub trait IngredientClassifier {
    /// Annotate each ingredient name with a risk level, reason tags and an
    /// optional display category.
    fn classify(&self, names: &[String]) -> Result<Vec<RawIngredient>, ScoreError>;

    /// Short backend identifier for diagnostics.
    fn backend_name(&self) -> &str;
}
