use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of POST /food/add. Nutrients are optional and default to 0.0;
/// the date defaults to today when omitted.
#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    pub user_id: Uuid,
    pub description: String,
    pub grams: f64,
    #[serde(default)]
    pub calorias: Option<f64>,
    #[serde(default)]
    pub proteinas: Option<f64>,
    #[serde(default)]
    pub carbo: Option<f64>,
    #[serde(default)]
    pub gordura: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Body of PUT /food/update/{food_id}. Every field is optional; absent
/// fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFoodRequest {
    pub description: Option<String>,
    pub grams: Option<f64>,
    pub calorias: Option<f64>,
    pub proteinas: Option<f64>,
    pub carbo: Option<f64>,
    pub gordura: Option<f64>,
    pub date: Option<String>,
}

/// Body of POST /intake/add: a quick entry with macros only, logged
/// against today. Quantity is optional because the user often does not
/// know it for an off-plan meal.
#[derive(Debug, Deserialize)]
pub struct QuickAddRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub grams: Option<f64>,
    pub calorias: f64,
    pub proteinas: f64,
    pub carbo: f64,
    pub gordura: f64,
}

#[derive(Debug, Deserialize)]
pub struct UserParams {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub user_id: Uuid,
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    7
}

#[derive(Debug, Serialize)]
pub struct RolloverResponse {
    pub message: &'static str,
    pub moved: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_food_defaults() {
        let req: AddFoodRequest = serde_json::from_value(serde_json::json!({
            "user_id": "7f0d5f36-5d2c-4db5-a2ad-620e11b0b1a5",
            "description": "Batata doce",
            "grams": 150.0
        }))
        .unwrap();

        assert_eq!(req.grams, 150.0);
        assert!(req.calorias.is_none());
        assert!(req.date.is_none());
    }

    #[test]
    fn test_update_request_all_optional() {
        let req: UpdateFoodRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(req.description.is_none());
        assert!(req.grams.is_none());

        let req: UpdateFoodRequest =
            serde_json::from_value(serde_json::json!({ "grams": 80.0 })).unwrap();
        assert_eq!(req.grams, Some(80.0));
    }

    #[test]
    fn test_history_params_default_days() {
        let params: HistoryParams = serde_json::from_value(serde_json::json!({
            "user_id": "7f0d5f36-5d2c-4db5-a2ad-620e11b0b1a5"
        }))
        .unwrap();
        assert_eq!(params.days, 7);
    }

    #[test]
    fn test_rollover_response_shape() {
        let json = serde_json::to_value(RolloverResponse {
            message: "Rollover completed",
            moved: 3,
        })
        .unwrap();
        assert_eq!(json["message"], "Rollover completed");
        assert_eq!(json["moved"], 3);
    }
}
