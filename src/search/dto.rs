use serde::{Deserialize, Serialize};

use crate::catalog::repo::{FoodItem, Recipe};
use crate::utils::safe_float;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Which catalog a hit came from. "taco" is the reference food table,
/// "recipe" a user-authored dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitSource {
    Taco,
    Recipe,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub source: HitSource,
    pub calorias_kcal: f64,
    pub proteinas_g: f64,
    pub carbo_g: f64,
    pub gordura_g: f64,
}

impl SearchHit {
    pub fn from_food(food: &FoodItem) -> Self {
        Self {
            id: food.code.to_string(),
            description: food.description.clone(),
            source: HitSource::Taco,
            calorias_kcal: safe_float(food.calorias_kcal),
            proteinas_g: safe_float(food.proteinas_g),
            carbo_g: safe_float(food.carbo_g),
            gordura_g: safe_float(food.gordura_g),
        }
    }

    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            description: recipe.name.clone(),
            source: HitSource::Recipe,
            calorias_kcal: safe_float(recipe.calorias),
            proteinas_g: safe_float(recipe.proteinas),
            carbo_g: safe_float(recipe.carbo),
            gordura_g: safe_float(recipe.gordura),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_serialization_shape() {
        let hit = SearchHit {
            id: "118".into(),
            description: "Batata doce cozida".into(),
            source: HitSource::Taco,
            calorias_kcal: 0.77,
            proteinas_g: 0.006,
            carbo_g: 0.184,
            gordura_g: 0.001,
        };

        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["type"], "taco");
        assert_eq!(json["description"], "Batata doce cozida");
        assert_eq!(json["calorias_kcal"], 0.77);
    }

    #[test]
    fn test_hit_coerces_missing_nutrients() {
        let food = FoodItem {
            code: 9,
            description: "Sal".into(),
            calorias_kcal: None,
            proteinas_g: Some(f64::NAN),
            carbo_g: None,
            gordura_g: None,
        };

        let hit = SearchHit::from_food(&food);
        assert_eq!(hit.calorias_kcal, 0.0);
        assert_eq!(hit.proteinas_g, 0.0);
    }
}
