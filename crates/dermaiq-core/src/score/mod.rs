pub mod engine;
pub mod grouping;
pub mod outcome;

pub use engine::score;
pub use outcome::{CategoryGroup, CeilingCause, GroupedItem, IngredientAssessment, ScoredProduct};
