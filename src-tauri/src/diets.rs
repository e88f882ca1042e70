//! Diets, their meals, and the foods eaten in each meal
//!
//! A diet is an ordered list of meals; a meal is a list of (food, grams)
//! entries. Nutrient totals are always computed from the current food
//! values, never stored.

use log::info;
use sqlx::{Row, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::models::{
    Diet, DietSummary, Meal, MealEntry, MealEntryDetail, MealSummary, NewDiet,
};
use crate::nutrition::Nutrients;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn required_name(name: &str, what: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} name is required", what)));
    }
    Ok(trimmed.to_string())
}

fn valid_grams(grams: f64) -> AppResult<f64> {
    if grams.is_finite() && grams > 0.0 {
        Ok(grams)
    } else {
        Err(AppError::Validation("quantity must be greater than zero grams".into()))
    }
}

fn optional_text(text: &Option<String>) -> Option<String> {
    text.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Diets
// ---------------------------------------------------------------------------

pub async fn list_diets(pool: &SqlitePool) -> AppResult<Vec<Diet>> {
    let diets = sqlx::query_as::<_, Diet>(
        "SELECT id, name, description, created_at, updated_at FROM diets ORDER BY name COLLATE NOCASE",
    )
    .fetch_all(pool)
    .await?;

    Ok(diets)
}

pub async fn get_diet(pool: &SqlitePool, id: i64) -> AppResult<Diet> {
    sqlx::query_as::<_, Diet>(
        "SELECT id, name, description, created_at, updated_at FROM diets WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("diet", id))
}

pub async fn create_diet(pool: &SqlitePool, diet: &NewDiet) -> AppResult<Diet> {
    let name = required_name(&diet.name, "diet")?;

    let result = sqlx::query("INSERT INTO diets (name, description) VALUES (?1, ?2)")
        .bind(&name)
        .bind(optional_text(&diet.description))
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    info!("Created diet {} ({})", id, name);
    get_diet(pool, id).await
}

pub async fn update_diet(pool: &SqlitePool, id: i64, diet: &NewDiet) -> AppResult<Diet> {
    let name = required_name(&diet.name, "diet")?;

    let result = sqlx::query(
        r#"
        UPDATE diets SET
            name = ?1,
            description = ?2,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?3
        "#,
    )
    .bind(&name)
    .bind(optional_text(&diet.description))
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("diet", id));
    }

    get_diet(pool, id).await
}

/// Delete a diet together with its meals and their entries
pub async fn delete_diet(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM diets WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("diet", id));
    }

    info!("Deleted diet {}", id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Meals
// ---------------------------------------------------------------------------

pub async fn list_meals(pool: &SqlitePool, diet_id: i64) -> AppResult<Vec<Meal>> {
    let meals = sqlx::query_as::<_, Meal>(
        "SELECT id, diet_id, name, position FROM meals WHERE diet_id = ?1 ORDER BY position, id",
    )
    .bind(diet_id)
    .fetch_all(pool)
    .await?;

    Ok(meals)
}

async fn get_meal(pool: &SqlitePool, meal_id: i64) -> AppResult<Meal> {
    sqlx::query_as::<_, Meal>("SELECT id, diet_id, name, position FROM meals WHERE id = ?1")
        .bind(meal_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("meal", meal_id))
}

/// Append a meal at the end of the diet
pub async fn add_meal(pool: &SqlitePool, diet_id: i64, name: &str) -> AppResult<Meal> {
    let name = required_name(name, "meal")?;
    let mut tx = pool.begin().await?;

    let diet_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM diets WHERE id = ?1")
        .bind(diet_id)
        .fetch_optional(&mut *tx)
        .await?;
    if diet_exists.is_none() {
        return Err(AppError::not_found("diet", diet_id));
    }

    let position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM meals WHERE diet_id = ?1",
    )
    .bind(diet_id)
    .fetch_one(&mut *tx)
    .await?;

    let id = sqlx::query("INSERT INTO meals (diet_id, name, position) VALUES (?1, ?2, ?3)")
        .bind(diet_id)
        .bind(&name)
        .bind(position)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;

    Ok(Meal {
        id,
        diet_id,
        name,
        position,
    })
}

pub async fn rename_meal(pool: &SqlitePool, meal_id: i64, name: &str) -> AppResult<Meal> {
    let name = required_name(name, "meal")?;

    let result = sqlx::query("UPDATE meals SET name = ?1 WHERE id = ?2")
        .bind(&name)
        .bind(meal_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("meal", meal_id));
    }

    get_meal(pool, meal_id).await
}

pub async fn delete_meal(pool: &SqlitePool, meal_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM meals WHERE id = ?1")
        .bind(meal_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("meal", meal_id));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Meal Entries
// ---------------------------------------------------------------------------

async fn get_meal_entry(pool: &SqlitePool, entry_id: i64) -> AppResult<MealEntry> {
    sqlx::query_as::<_, MealEntry>(
        "SELECT id, meal_id, food_id, grams FROM meal_foods WHERE id = ?1",
    )
    .bind(entry_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("meal entry", entry_id))
}

pub async fn add_food_to_meal(
    pool: &SqlitePool,
    meal_id: i64,
    food_id: i64,
    grams: f64,
) -> AppResult<MealEntry> {
    let grams = valid_grams(grams)?;
    let mut tx = pool.begin().await?;

    let meal_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM meals WHERE id = ?1")
        .bind(meal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if meal_exists.is_none() {
        return Err(AppError::not_found("meal", meal_id));
    }

    let food_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM foods WHERE id = ?1")
        .bind(food_id)
        .fetch_optional(&mut *tx)
        .await?;
    if food_exists.is_none() {
        return Err(AppError::not_found("food", food_id));
    }

    let id = sqlx::query("INSERT INTO meal_foods (meal_id, food_id, grams) VALUES (?1, ?2, ?3)")
        .bind(meal_id)
        .bind(food_id)
        .bind(grams)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;

    Ok(MealEntry {
        id,
        meal_id,
        food_id,
        grams,
    })
}

pub async fn update_meal_entry(pool: &SqlitePool, entry_id: i64, grams: f64) -> AppResult<MealEntry> {
    let grams = valid_grams(grams)?;

    let result = sqlx::query("UPDATE meal_foods SET grams = ?1 WHERE id = ?2")
        .bind(grams)
        .bind(entry_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("meal entry", entry_id));
    }

    get_meal_entry(pool, entry_id).await
}

pub async fn remove_meal_entry(pool: &SqlitePool, entry_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM meal_foods WHERE id = ?1")
        .bind(entry_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("meal entry", entry_id));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// A meal entry joined with the food's per-100 g values
#[derive(Debug, Clone)]
struct EntryRow {
    entry_id: i64,
    meal_id: i64,
    food_id: i64,
    food_name: String,
    grams: f64,
    per_100g: Nutrients,
}

/// Load a diet with every meal, entry and computed totals
pub async fn diet_summary(pool: &SqlitePool, diet_id: i64) -> AppResult<DietSummary> {
    let diet = get_diet(pool, diet_id).await?;
    let meals = list_meals(pool, diet_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT
            mf.id AS entry_id, mf.meal_id, mf.food_id, mf.grams,
            f.name AS food_name, f.calories, f.protein, f.carbs, f.fat
        FROM meal_foods mf
        JOIN meals m ON m.id = mf.meal_id
        JOIN foods f ON f.id = mf.food_id
        WHERE m.diet_id = ?1
        ORDER BY mf.id
        "#,
    )
    .bind(diet_id)
    .fetch_all(pool)
    .await?;

    let entries = rows
        .iter()
        .map(|row| EntryRow {
            entry_id: row.get("entry_id"),
            meal_id: row.get("meal_id"),
            food_id: row.get("food_id"),
            food_name: row.get("food_name"),
            grams: row.get("grams"),
            per_100g: Nutrients::new(
                row.get("calories"),
                row.get("protein"),
                row.get("carbs"),
                row.get("fat"),
            ),
        })
        .collect::<Vec<_>>();

    Ok(build_summary(diet, meals, entries))
}

fn build_summary(diet: Diet, meals: Vec<Meal>, entries: Vec<EntryRow>) -> DietSummary {
    let meals: Vec<MealSummary> = meals
        .into_iter()
        .map(|meal| {
            let details: Vec<MealEntryDetail> = entries
                .iter()
                .filter(|e| e.meal_id == meal.id)
                .map(|e| MealEntryDetail {
                    entry_id: e.entry_id,
                    food_id: e.food_id,
                    food_name: e.food_name.clone(),
                    grams: e.grams,
                    nutrients: Nutrients::for_grams(&e.per_100g, e.grams),
                })
                .collect();
            let totals = details.iter().map(|d| d.nutrients).sum();

            MealSummary {
                meal,
                entries: details,
                totals,
            }
        })
        .collect();

    let totals = meals.iter().map(|m| m.totals).sum();

    DietSummary {
        diet,
        meals,
        totals,
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
