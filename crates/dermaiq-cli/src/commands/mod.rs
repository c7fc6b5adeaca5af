pub mod inspect;
pub mod policy;
pub mod score;
