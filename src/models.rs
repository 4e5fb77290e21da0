//! Wire shapes exchanged with the churn backend.
//!
//! Field names mirror the backend API exactly. The UI never derives
//! `probability` or `label` itself; both are rendered verbatim from
//! whatever the backend returned.

use serde::{Deserialize, Serialize};

/// Label the backend assigns to a customer above the churn threshold.
/// Used only to pick display emphasis, never recomputed client-side.
pub const LIKELY_TO_CHURN: &str = "Likely to Churn";

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

// =========================================================
// Prediction
// =========================================================

/// Input features for a single prediction. One field per column the
/// model was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub customer_id: String,
    pub gender: String,
    pub senior_citizen: i32,
    pub partner: String,
    pub dependents: String,
    pub tenure: i32,
    pub phone_service: String,
    pub multiple_lines: String,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub contract: String,
    pub paperless_billing: String,
    pub payment_method: String,
    pub monthly_charges: f64,
    pub total_charges: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub probability: f64,
    pub label: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A stored prediction as returned by the history and report endpoints.
/// Optional fields cover both the compact history rows and the full
/// per-customer report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub tenure: Option<i32>,
    pub probability: f64,
    pub label: String,
    #[serde(default)]
    pub monthly_charges: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =========================================================
// Batch
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRow {
    #[serde(default)]
    pub row: Option<i64>,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub probability: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub processed: i64,
    #[serde(default)]
    pub results_preview: Vec<BatchRow>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Analytics
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_predictions: i64,
    #[serde(default)]
    pub high_risk_customers: i64,
    pub average_probability: f64,
    pub churn_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityBucket {
    pub bucket: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractChurn {
    pub contract: String,
    pub churn_rate: f64,
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses() {
        let res: TokenResponse = serde_json::from_str(r#"{"access_token":"tok1"}"#).unwrap();
        assert_eq!(res.access_token, "tok1");
    }

    #[test]
    fn report_record_carries_backend_fields_verbatim() {
        let json = r#"{
            "customer_id": "CUST-42",
            "label": "Likely to Churn",
            "probability": 0.82,
            "contract": "Month-to-month",
            "tenure": 3,
            "monthly_charges": 79.5,
            "explanation": "High risk:\n- short tenure",
            "created_at": "2025-11-02T10:15:00"
        }"#;
        let rec: PredictionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.customer_id.as_deref(), Some("CUST-42"));
        assert_eq!(rec.probability, 0.82);
        assert_eq!(rec.label, LIKELY_TO_CHURN);
        assert_eq!(rec.explanation.as_deref(), Some("High risk:\n- short tenure"));
    }

    #[test]
    fn history_row_tolerates_missing_optionals() {
        let json = r#"{"id": 7, "probability": 0.12, "label": "Safe Customer"}"#;
        let rec: PredictionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, Some(7));
        assert!(rec.customer_id.is_none());
        assert_ne!(rec.label, LIKELY_TO_CHURN);
    }

    #[test]
    fn batch_response_parses_preview_and_summary() {
        let json = r#"{
            "processed": 120,
            "results_preview": [
                {"row": 0, "probability": 0.91, "label": "Likely to Churn"},
                {"row": 1, "customer_id": "A-1", "probability": 0.05, "label": "Safe Customer"}
            ],
            "summary": "Retention looks weak for month-to-month contracts.",
            "message": "Batch prediction completed"
        }"#;
        let res: BatchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.processed, 120);
        assert_eq!(res.results_preview.len(), 2);
        assert_eq!(res.results_preview[1].customer_id.as_deref(), Some("A-1"));
        assert!(res.summary.is_some());
    }

    #[test]
    fn analytics_summary_parses() {
        let json = r#"{
            "total_predictions": 340,
            "high_risk_customers": 51,
            "average_probability": 0.314,
            "churn_rate": 15.0
        }"#;
        let sum: AnalyticsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(sum.total_predictions, 340);
        assert_eq!(sum.churn_rate, 15.0);
    }

    #[test]
    fn predict_request_serializes_snake_case_fields() {
        let req = PredictRequest {
            customer_id: "C1".into(),
            gender: "Female".into(),
            senior_citizen: 0,
            partner: "Yes".into(),
            dependents: "No".into(),
            tenure: 12,
            phone_service: "Yes".into(),
            multiple_lines: "No".into(),
            internet_service: "Fiber optic".into(),
            online_security: "No".into(),
            online_backup: "Yes".into(),
            device_protection: "No".into(),
            tech_support: "No".into(),
            streaming_tv: "Yes".into(),
            streaming_movies: "Yes".into(),
            contract: "Month-to-month".into(),
            paperless_billing: "Yes".into(),
            payment_method: "Electronic check".into(),
            monthly_charges: 70.35,
            total_charges: 844.2,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["customer_id"], "C1");
        assert_eq!(value["senior_citizen"], 0);
        assert_eq!(value["monthly_charges"], 70.35);
    }
}
