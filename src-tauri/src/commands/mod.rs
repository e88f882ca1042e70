pub mod diets;
pub mod foods;
pub mod macros;
