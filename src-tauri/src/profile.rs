//! Adapter from the free-text profile fields the UI stores to a typed `UserProfile`
//!
//! Anything blank or unparsable becomes `None`; the calculator decides what
//! is missing. Unknown activity/goal labels fall back to Sedentary/Maintain.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::macros::{ActivityLevel, Goal, Sex, UserProfile};

const BIRTH_DATE_FORMAT: &str = "%d%m%Y";
const MALE_LABEL: &str = "Hombre";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileInput {
  pub weight_kg: String,
  pub height_cm: String,
  /// DDMMYYYY
  pub birth_date: String,
  pub sex: String,
  pub activity_level: String,
  pub goal: String,
}

impl ProfileInput {
  pub fn to_profile(&self) -> UserProfile {
    UserProfile {
      weight_kg: parse_decimal(&self.weight_kg),
      height_cm: parse_decimal(&self.height_cm),
      birth_date: parse_birth_date(&self.birth_date),
      sex: parse_sex(&self.sex),
      activity_level: parse_activity_level(&self.activity_level),
      goal: parse_goal(&self.goal),
    }
  }
}

/// Accepts "70.5" and "70,5"
pub fn parse_decimal(raw: &str) -> Option<f64> {
  let trimmed = raw.trim();
  if trimmed.is_empty() || trimmed.matches(',').count() > 1 {
    return None;
  }
  trimmed.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strict DDMMYYYY: exactly eight digits forming a real calendar date
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  NaiveDate::parse_from_str(trimmed, BIRTH_DATE_FORMAT).ok()
}

pub fn parse_sex(raw: &str) -> Option<Sex> {
  match raw.trim() {
    "" => None,
    MALE_LABEL => Some(Sex::Male),
    _ => Some(Sex::Female),
  }
}

pub fn parse_activity_level(raw: &str) -> Option<ActivityLevel> {
  let label = raw.trim();
  if label.is_empty() {
    return None;
  }
  Some(ActivityLevel::from_label(label).unwrap_or_else(|| {
    warn!("Unknown activity level '{}', using {}", label, ActivityLevel::Sedentary.label());
    ActivityLevel::Sedentary
  }))
}

pub fn parse_goal(raw: &str) -> Option<Goal> {
  let label = raw.trim();
  if label.is_empty() {
    return None;
  }
  Some(Goal::from_label(label).unwrap_or_else(|| {
    warn!("Unknown goal '{}', using {}", label, Goal::Maintain.label());
    Goal::Maintain
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::macros::{calculate, MacroGoals, MissingData, MissingField};

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
  }

  fn reference_input() -> ProfileInput {
    ProfileInput {
      weight_kg: "70".into(),
      height_cm: "175".into(),
      birth_date: "01011990".into(),
      sex: "Hombre".into(),
      activity_level: "Moderado".into(),
      goal: "Mantener peso".into(),
    }
  }

  #[test]
  fn test_reference_input_end_to_end() {
    let goals = calculate(&reference_input().to_profile(), today()).unwrap();
    assert_eq!(
      goals,
      MacroGoals {
        tdee: 2525,
        calorie_goal: 2525,
        protein_grams: 126,
        carb_grams: 379,
        fat_grams: 56,
      }
    );
  }

  #[test]
  fn test_all_blank() {
    let input = ProfileInput {
      weight_kg: " ".into(),
      ..Default::default()
    };
    assert_eq!(
      calculate(&input.to_profile(), today()),
      Err(MissingData(vec![
        MissingField::Weight,
        MissingField::Height,
        MissingField::BirthDate,
        MissingField::Sex,
        MissingField::ActivityLevel,
        MissingField::Goal,
      ]))
    );
  }

  #[test]
  fn test_negative_weight_flagged() {
    let input = ProfileInput {
      weight_kg: "-5".into(),
      ..reference_input()
    };
    let missing = calculate(&input.to_profile(), today()).unwrap_err();
    assert!(missing.fields().contains(&MissingField::Weight));
  }

  #[test]
  fn test_invalid_calendar_date_flagged() {
    let input = ProfileInput {
      birth_date: "31021990".into(),
      ..reference_input()
    };
    let missing = calculate(&input.to_profile(), today()).unwrap_err();
    assert!(missing.fields().contains(&MissingField::BirthDate));
  }

  #[test]
  fn test_birth_date_is_strict() {
    assert_eq!(parse_birth_date("01011990"), NaiveDate::from_ymd_opt(1990, 1, 1));
    assert_eq!(parse_birth_date("1011990"), None);
    assert_eq!(parse_birth_date("01/01/1990"), None);
    assert_eq!(parse_birth_date("1990-01-01"), None);
    assert_eq!(parse_birth_date("29022000"), NaiveDate::from_ymd_opt(2000, 2, 29));
    assert_eq!(parse_birth_date("29021999"), None);
  }

  #[test]
  fn test_decimal_comma() {
    assert_eq!(parse_decimal("70,5"), Some(70.5));
    assert_eq!(parse_decimal(" 175.25 "), Some(175.25));
    assert_eq!(parse_decimal("1,2,3"), None);
    assert_eq!(parse_decimal("abc"), None);
    assert_eq!(parse_decimal("inf"), None);
  }

  #[test]
  fn test_sex_mapping() {
    assert_eq!(parse_sex("Hombre"), Some(Sex::Male));
    assert_eq!(parse_sex("Mujer"), Some(Sex::Female));
    assert_eq!(parse_sex("hombre"), Some(Sex::Female));
    assert_eq!(parse_sex(""), None);
  }

  #[test]
  fn test_unknown_labels_fall_back() {
    let input = ProfileInput {
      activity_level: "Muy activo".into(),
      goal: "Volumen".into(),
      ..reference_input()
    };
    let profile = input.to_profile();
    assert_eq!(profile.activity_level, Some(ActivityLevel::Sedentary));
    assert_eq!(profile.goal, Some(Goal::Maintain));

    // 1628.75 * 1.20 = 1954.5
    let goals = calculate(&profile, today()).unwrap();
    assert_eq!(goals.tdee, 1955);
    assert_eq!(goals.protein_grams, 126);
    assert_eq!(goals.fat_grams, 56);
  }

  #[test]
  fn test_deserializes_camel_case_with_missing_keys() {
    let input: ProfileInput =
      serde_json::from_str(r#"{"weightKg":"70","activityLevel":"Alto"}"#).unwrap();
    assert_eq!(input.weight_kg, "70");
    assert_eq!(input.activity_level, "Alto");
    assert!(input.goal.is_empty());
  }
}
