//! Nutrient arithmetic shared by foods, meals and diets

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::macros::MacroGoals;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
  pub calories: f64,
  pub protein: f64,
  pub carbs: f64,
  pub fat: f64,
}

impl Nutrients {
  pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
    Self {
      calories,
      protein,
      carbs,
      fat,
    }
  }

  /// Scale per-100 g values to a quantity in grams
  pub fn for_grams(per_100g: &Nutrients, grams: f64) -> Self {
    let factor = grams / 100.0;
    Self {
      calories: per_100g.calories * factor,
      protein: per_100g.protein * factor,
      carbs: per_100g.carbs * factor,
      fat: per_100g.fat * factor,
    }
  }
}

impl Add for Nutrients {
  type Output = Nutrients;

  fn add(self, other: Nutrients) -> Nutrients {
    Nutrients {
      calories: self.calories + other.calories,
      protein: self.protein + other.protein,
      carbs: self.carbs + other.carbs,
      fat: self.fat + other.fat,
    }
  }
}

impl AddAssign for Nutrients {
  fn add_assign(&mut self, other: Nutrients) {
    *self = *self + other;
  }
}

impl Sum for Nutrients {
  fn sum<I: Iterator<Item = Nutrients>>(iter: I) -> Self {
    iter.fold(Nutrients::default(), Add::add)
  }
}

/// What is left of the daily goals after `consumed`. Negative means over target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Remaining {
  pub calories: f64,
  pub protein: f64,
  pub carbs: f64,
  pub fat: f64,
}

impl Remaining {
  pub fn between(goals: &MacroGoals, consumed: &Nutrients) -> Self {
    Self {
      calories: goals.calorie_goal as f64 - consumed.calories,
      protein: goals.protein_grams as f64 - consumed.protein,
      carbs: goals.carb_grams as f64 - consumed.carbs,
      fat: goals.fat_grams as f64 - consumed.fat,
    }
  }
}
