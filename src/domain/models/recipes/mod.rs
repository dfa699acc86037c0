//! 레시피 조회 모델

pub mod filter;

pub use filter::RecipeFilter;
