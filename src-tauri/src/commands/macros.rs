//! Tauri commands for macro goal calculation

use chrono::Local;
use serde::Serialize;

use crate::macros::{calculate, ActivityLevel, Goal, MacroGoals, MissingData, MissingField};
use crate::profile::ProfileInput;

/// ---------------------------------------------------------------------------
/// Outcome sent to the UI
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MacroGoalsOutcome {
  Success { goals: MacroGoals },
  MissingData { fields: Vec<MissingField> },
}

impl From<Result<MacroGoals, MissingData>> for MacroGoalsOutcome {
  fn from(result: Result<MacroGoals, MissingData>) -> Self {
    match result {
      Ok(goals) => MacroGoalsOutcome::Success { goals },
      Err(MissingData(fields)) => MacroGoalsOutcome::MissingData { fields },
    }
  }
}

impl MacroGoalsOutcome {
  pub fn goals(&self) -> Option<&MacroGoals> {
    match self {
      MacroGoalsOutcome::Success { goals } => Some(goals),
      MacroGoalsOutcome::MissingData { .. } => None,
    }
  }
}

/// Calculate goals for the profile as of today's local date
pub fn goals_for_today(profile: &ProfileInput) -> MacroGoalsOutcome {
  calculate(&profile.to_profile(), Local::now().date_naive()).into()
}

#[tauri::command]
pub fn calculate_macro_goals(profile: ProfileInput) -> MacroGoalsOutcome {
  goals_for_today(&profile)
}

/// ---------------------------------------------------------------------------
/// Label tables for the profile form
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ActivityOption {
  pub label: &'static str,
  pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalOption {
  pub label: &'static str,
  pub calorie_multiplier: f64,
  pub protein_per_kg: f64,
  pub fat_per_kg: f64,
}

#[tauri::command]
pub fn list_activity_levels() -> Vec<ActivityOption> {
  ActivityLevel::ALL
    .iter()
    .map(|level| ActivityOption {
      label: level.label(),
      multiplier: level.multiplier(),
    })
    .collect()
}

#[tauri::command]
pub fn list_goals() -> Vec<GoalOption> {
  Goal::ALL
    .iter()
    .map(|goal| GoalOption {
      label: goal.label(),
      calorie_multiplier: goal.calorie_multiplier(),
      protein_per_kg: goal.protein_per_kg(),
      fat_per_kg: goal.fat_per_kg(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_profile_input;

  #[test]
  fn test_missing_data_outcome_json() {
    let outcome = calculate_macro_goals(ProfileInput {
      height_cm: "".into(),
      sex: "".into(),
      ..mock_profile_input()
    });
    assert_eq!(
      serde_json::to_value(&outcome).unwrap(),
      serde_json::json!({"status": "missing_data", "fields": ["HEIGHT", "SEX"]})
    );
    assert!(outcome.goals().is_none());
  }

  #[test]
  fn test_success_outcome() {
    let outcome = calculate_macro_goals(mock_profile_input());
    let goals = outcome.goals().expect("complete profile");
    assert_eq!(goals.protein_grams, 126);
    assert_eq!(goals.fat_grams, 56);
    assert_eq!(serde_json::to_value(&outcome).unwrap()["status"], "success");
  }

  #[test]
  fn test_label_lists() {
    let levels = list_activity_levels();
    assert_eq!(levels.len(), 5);
    assert_eq!(levels[0].label, "Sedentario");
    assert_eq!(levels[4].multiplier, 1.90);

    let goals = list_goals();
    assert_eq!(goals.len(), 7);
    assert_eq!(goals[3].label, "Mantener peso");
    assert_eq!(goals[6].calorie_multiplier, 0.80);
  }
}
