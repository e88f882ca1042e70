pub mod diet;
pub mod food;

pub use diet::{Diet, DietSummary, Meal, MealEntry, MealEntryDetail, MealSummary, NewDiet};
pub use food::{Food, NewFood};
