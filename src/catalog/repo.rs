use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One row of the reference food table. Loaded by an external batch job,
/// never written by this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub code: i64,
    pub description: String,
    pub calorias_kcal: Option<f64>,
    pub proteinas_g: Option<f64>,
    pub carbo_g: Option<f64>,
    pub gordura_g: Option<f64>,
}

/// A user-authored recipe. Nutrient fields are absolute totals for the
/// whole recipe, not per-gram. The ingredient list is opaque here; only
/// the name and nutrients feed the search.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub ingredients: serde_json::Value,
    pub calorias: Option<f64>,
    pub proteinas: Option<f64>,
    pub carbo: Option<f64>,
    pub gordura: Option<f64>,
}

pub async fn find_food_by_code(db: &PgPool, code: i64) -> anyhow::Result<Option<FoodItem>> {
    let food = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT code, description, calorias_kcal, proteinas_g, carbo_g, gordura_g
        FROM food_catalog
        WHERE code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(db)
    .await
    .context("find food by code")?;
    Ok(food)
}

/// Full scan of the food catalog, capped. The catalogs are small and
/// static, so search runs a linear scan instead of maintaining an index.
pub async fn scan_foods(db: &PgPool, limit: i64) -> anyhow::Result<Vec<FoodItem>> {
    let rows = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT code, description, calorias_kcal, proteinas_g, carbo_g, gordura_g
        FROM food_catalog
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
    .context("scan food catalog")?;
    Ok(rows)
}

/// Full scan of the recipe catalog, capped. Recipes from every user are
/// candidates; ownership only matters for mutation, which lives elsewhere.
pub async fn scan_recipes(db: &PgPool, limit: i64) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT id, user_id, name, ingredients, calorias, proteinas, carbo, gordura
        FROM recipes
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
    .context("scan recipe catalog")?;
    Ok(rows)
}
