//! Macro/calorie goal calculator
//!
//! Mifflin-St Jeor BMR, scaled by an activity multiplier (TDEE) and a goal
//! multiplier (calorie goal). Protein and fat are allocated per kilogram of
//! body weight; carbohydrates take the remaining calories.
//!
//! The calculator is pure: "today" is passed in so age is deterministic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// ---------------------------------------------------------------------------
/// Sex
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
  Male,
  Female,
}

impl Sex {
  /// Mifflin-St Jeor constant term
  pub fn bmr_offset(&self) -> f64 {
    match self {
      Sex::Male => 5.0,
      Sex::Female => -161.0,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Activity Level
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
  Sedentary,
  Light,
  Moderate,
  High,
  Athlete,
}

struct ActivityRow {
  level: ActivityLevel,
  label: &'static str,
  multiplier: f64,
}

static ACTIVITY_TABLE: [ActivityRow; 5] = [
  ActivityRow { level: ActivityLevel::Sedentary, label: "Sedentario", multiplier: 1.20 },
  ActivityRow { level: ActivityLevel::Light, label: "Ligera", multiplier: 1.375 },
  ActivityRow { level: ActivityLevel::Moderate, label: "Moderado", multiplier: 1.55 },
  ActivityRow { level: ActivityLevel::High, label: "Alto", multiplier: 1.725 },
  ActivityRow { level: ActivityLevel::Athlete, label: "Atleta", multiplier: 1.90 },
];

impl ActivityLevel {
  pub const ALL: [ActivityLevel; 5] = [
    ActivityLevel::Sedentary,
    ActivityLevel::Light,
    ActivityLevel::Moderate,
    ActivityLevel::High,
    ActivityLevel::Athlete,
  ];

  fn row(&self) -> &'static ActivityRow {
    // Every variant has exactly one row
    &ACTIVITY_TABLE[*self as usize]
  }

  /// Exact label match against the fixed table
  pub fn from_label(label: &str) -> Option<Self> {
    ACTIVITY_TABLE.iter().find(|r| r.label == label).map(|r| r.level)
  }

  pub fn label(&self) -> &'static str {
    self.row().label
  }

  pub fn multiplier(&self) -> f64 {
    self.row().multiplier
  }
}

/// ---------------------------------------------------------------------------
/// Goal
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
  Gain050,
  Gain035,
  Gain025,
  Maintain,
  Lose025,
  Lose050,
  Lose075,
}

struct GoalRow {
  goal: Goal,
  label: &'static str,
  calorie_multiplier: f64,
  protein_per_kg: f64,
  fat_per_kg: f64,
}

static GOAL_TABLE: [GoalRow; 7] = [
  GoalRow { goal: Goal::Gain050, label: "Ganar 0,5% de peso", calorie_multiplier: 1.15, protein_per_kg: 1.9, fat_per_kg: 0.9 },
  GoalRow { goal: Goal::Gain035, label: "Ganar 0,35% de peso", calorie_multiplier: 1.10, protein_per_kg: 1.9, fat_per_kg: 0.9 },
  GoalRow { goal: Goal::Gain025, label: "Ganar 0,25% de peso", calorie_multiplier: 1.05, protein_per_kg: 1.9, fat_per_kg: 0.9 },
  GoalRow { goal: Goal::Maintain, label: "Mantener peso", calorie_multiplier: 1.00, protein_per_kg: 1.8, fat_per_kg: 0.8 },
  GoalRow { goal: Goal::Lose025, label: "Perder 0,25% de peso", calorie_multiplier: 0.90, protein_per_kg: 2.2, fat_per_kg: 0.7 },
  GoalRow { goal: Goal::Lose050, label: "Perder 0,5% de peso", calorie_multiplier: 0.85, protein_per_kg: 2.2, fat_per_kg: 0.7 },
  GoalRow { goal: Goal::Lose075, label: "Perder 0,75% de peso", calorie_multiplier: 0.80, protein_per_kg: 2.2, fat_per_kg: 0.7 },
];

impl Goal {
  pub const ALL: [Goal; 7] = [
    Goal::Gain050,
    Goal::Gain035,
    Goal::Gain025,
    Goal::Maintain,
    Goal::Lose025,
    Goal::Lose050,
    Goal::Lose075,
  ];

  fn row(&self) -> &'static GoalRow {
    &GOAL_TABLE[*self as usize]
  }

  pub fn from_label(label: &str) -> Option<Self> {
    GOAL_TABLE.iter().find(|r| r.label == label).map(|r| r.goal)
  }

  pub fn label(&self) -> &'static str {
    self.row().label
  }

  pub fn calorie_multiplier(&self) -> f64 {
    self.row().calorie_multiplier
  }

  /// Protein grams per kg of body weight
  pub fn protein_per_kg(&self) -> f64 {
    self.row().protein_per_kg
  }

  /// Fat grams per kg of body weight
  pub fn fat_per_kg(&self) -> f64 {
    self.row().fat_per_kg
  }
}

/// ---------------------------------------------------------------------------
/// Input / Output
/// ---------------------------------------------------------------------------

/// Typed profile. `None` means the field was absent or could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub weight_kg: Option<f64>,
  pub height_cm: Option<f64>,
  pub birth_date: Option<NaiveDate>,
  pub sex: Option<Sex>,
  pub activity_level: Option<ActivityLevel>,
  pub goal: Option<Goal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissingField {
  Weight,
  Height,
  BirthDate,
  Sex,
  ActivityLevel,
  Goal,
}

/// Fields that failed validation, in input order, each at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingData(pub Vec<MissingField>);

impl MissingData {
  pub fn fields(&self) -> &[MissingField] {
    &self.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGoals {
  pub tdee: i64,
  pub calorie_goal: i64,
  pub protein_grams: i64,
  pub carb_grams: i64,
  pub fat_grams: i64,
}

/// ---------------------------------------------------------------------------
/// Calculation
/// ---------------------------------------------------------------------------

/// Compute daily macro goals for `profile` as of `today`
pub fn calculate(profile: &UserProfile, today: NaiveDate) -> Result<MacroGoals, MissingData> {
  let weight = profile.weight_kg.filter(|w| is_positive(*w));
  let height = profile.height_cm.filter(|h| is_positive(*h));
  let birth_date = profile.birth_date.filter(|d| *d <= today);

  let mut missing = Vec::new();
  if weight.is_none() {
    missing.push(MissingField::Weight);
  }
  if height.is_none() {
    missing.push(MissingField::Height);
  }
  if birth_date.is_none() {
    missing.push(MissingField::BirthDate);
  }
  if profile.sex.is_none() {
    missing.push(MissingField::Sex);
  }
  if profile.activity_level.is_none() {
    missing.push(MissingField::ActivityLevel);
  }
  if profile.goal.is_none() {
    missing.push(MissingField::Goal);
  }

  match (weight, height, birth_date, profile.sex, profile.activity_level, profile.goal) {
    (Some(weight), Some(height), Some(birth_date), Some(sex), Some(activity), Some(goal)) => {
      let age = today.years_since(birth_date).unwrap_or(0);
      Ok(compute_goals(weight, height, age, sex, activity, goal))
    }
    _ => Err(MissingData(missing)),
  }
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
  10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + sex.bmr_offset()
}

fn compute_goals(
  weight: f64,
  height: f64,
  age: u32,
  sex: Sex,
  activity: ActivityLevel,
  goal: Goal,
) -> MacroGoals {
  let bmr = mifflin_st_jeor(weight, height, age, sex);
  let tdee = (bmr * activity.multiplier()).max(0.0);
  let calorie_goal = tdee * goal.calorie_multiplier();

  let protein_grams = round_half_up(weight * goal.protein_per_kg());
  let fat_grams = round_half_up(weight * goal.fat_per_kg());

  let fixed_kcal = protein_grams as f64 * KCAL_PER_GRAM_PROTEIN + fat_grams as f64 * KCAL_PER_GRAM_FAT;
  let carb_grams = round_half_up((calorie_goal - fixed_kcal) / KCAL_PER_GRAM_CARBS).max(0);

  MacroGoals {
    tdee: round_half_up(tdee),
    calorie_goal: round_half_up(calorie_goal),
    protein_grams,
    carb_grams,
    fat_grams,
  }
}

fn is_positive(value: f64) -> bool {
  value.is_finite() && value > 0.0
}

fn round_half_up(value: f64) -> i64 {
  (value + 0.5).floor() as i64
}
