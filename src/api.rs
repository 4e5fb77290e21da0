//! Typed HTTP client for the churn backend.
//!
//! One `ChurnApi` value is shared by every page. The base URL is fixed
//! per deployment environment at compile time; it is not configurable
//! at runtime. Immediately before each request goes out, the stored
//! credential is read from localStorage and attached as a bearer
//! header; requests without a stored credential go out unauthenticated.
//! There is no response interceptor: a 401 reaches the caller like any
//! other non-2xx status.

use serde::{Serialize, de::DeserializeOwned};

use crate::models::{
    AnalyticsSummary, BatchResponse, ClearResponse, ContractChurn, PredictRequest,
    PredictResponse, PredictionRecord, ProbabilityBucket, RegisterRequest, TokenResponse,
    UserIdentity,
};
use crate::serde_helper;
use crate::session::TOKEN_STORAGE_KEY;
use crate::web::{HttpClient, HttpError, HttpRequestBuilder, HttpResponse, LocalStorage};

#[cfg(debug_assertions)]
const BASE_URL: &str = "http://127.0.0.1:8000";
#[cfg(not(debug_assertions))]
const BASE_URL: &str = "https://churn-backend-7ge1.onrender.com";

/// API failure as surfaced to pages.
#[derive(Debug)]
pub enum ApiError {
    /// No response at all: network failure or abort timeout.
    Network(String),
    /// The backend answered with a non-2xx status. `detail` carries the
    /// backend's own message when the body provided one.
    Status { status: u16, detail: String },
    /// The response body did not match the expected shape.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Status { status, detail } => {
                if detail.is_empty() {
                    write!(f, "request failed with status {}", status)
                } else {
                    write!(f, "{}", detail)
                }
            }
            ApiError::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RequestBuildFailed(msg) | HttpError::NetworkError(msg) => {
                ApiError::Network(msg)
            }
            HttpError::ResponseParseFailed(msg) => ApiError::Decode(msg),
        }
    }
}

// =========================================================
// Pure URL helpers (unit-tested on the native host)
// =========================================================

/// Percent-encode a single value for form bodies and path segments.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{:02X}", byte));
            }
        }
    }
    out
}

/// Encode key/value pairs as an `application/x-www-form-urlencoded` body.
pub(crate) fn form_urlencode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `Authorization` header value for a stored credential.
pub(crate) fn bearer_value(token: &str) -> String {
    format!("Bearer {}", token)
}

pub(crate) fn history_path(page: u32, limit: u32) -> String {
    format!("/history/?page={}&limit={}", page, limit)
}

pub(crate) fn report_path(customer_id: &str) -> String {
    format!("/history/{}", urlencode(customer_id))
}

pub(crate) fn report_pdf_path(customer_id: &str) -> String {
    format!("/report/{}/pdf", urlencode(customer_id))
}

// =========================================================
// Client
// =========================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ChurnApi {
    base_url: String,
}

impl Default for ChurnApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ChurnApi {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Request "interceptor": reads the credential at send time, so the
    /// very next request reflects a login or logout.
    fn with_auth(builder: HttpRequestBuilder) -> HttpRequestBuilder {
        match LocalStorage::get(TOKEN_STORAGE_KEY) {
            Some(token) => builder.header("Authorization", &bearer_value(&token)),
            None => builder,
        }
    }

    /// Reject non-2xx responses, extracting the backend's `detail`
    /// message when the body provides one.
    async fn check(res: HttpResponse) -> Result<HttpResponse, ApiError> {
        if res.ok() {
            return Ok(res);
        }
        let status = res.status();
        let body = res.text().await.unwrap_or_default();

        #[derive(serde::Deserialize)]
        struct DetailBody {
            detail: String,
        }
        let detail = serde_helper::from_json_string::<DetailBody>(&body)
            .map(|b| b.detail)
            .unwrap_or(body);

        Err(ApiError::Status { status, detail })
    }

    async fn decode<T: DeserializeOwned>(res: HttpResponse) -> Result<T, ApiError> {
        let text = res.text().await.map_err(ApiError::from)?;
        serde_helper::from_json_string(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let res = Self::with_auth(HttpClient::get(&self.url(path)))
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::decode(Self::check(res).await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let payload =
            serde_helper::to_json_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let res = Self::with_auth(HttpClient::post(&self.url(path)))
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::decode(Self::check(res).await?).await
    }

    // ---------------------------------------------------------
    // Auth
    // ---------------------------------------------------------

    /// POST /auth/login, form-encoded credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = form_urlencode(&[("username", username), ("password", password)]);
        let res = HttpClient::post(&self.url("/auth/login"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::decode(Self::check(res).await?).await
    }

    /// POST /auth/register. Success only means "now go log in"; nobody
    /// is logged in automatically.
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        let payload =
            serde_helper::to_json_string(req).map_err(|e| ApiError::Decode(e.to_string()))?;
        let res = HttpClient::post(&self.url("/auth/register"))
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::check(res).await?;
        Ok(())
    }

    /// GET /auth/me, exchanges the stored credential for the profile.
    pub async fn me(&self) -> Result<UserIdentity, ApiError> {
        self.get_json("/auth/me").await
    }

    // ---------------------------------------------------------
    // Prediction
    // ---------------------------------------------------------

    pub async fn predict_simple(&self, req: &PredictRequest) -> Result<PredictResponse, ApiError> {
        self.post_json("/predict/simple", req).await
    }

    /// POST /predict/batch, multipart CSV upload.
    pub async fn predict_batch(&self, file: &web_sys::File) -> Result<BatchResponse, ApiError> {
        let res = Self::check(self.post_csv("/predict/batch", file).await?).await?;
        Self::decode(res).await
    }

    /// Same upload with `download=true`: the backend answers with the
    /// scored CSV instead of a JSON preview.
    pub async fn predict_batch_csv(&self, file: &web_sys::File) -> Result<web_sys::Blob, ApiError> {
        let res = Self::check(self.post_csv("/predict/batch?download=true", file).await?).await?;
        res.blob().await.map_err(ApiError::from)
    }

    async fn post_csv(&self, path: &str, file: &web_sys::File) -> Result<HttpResponse, ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::Network(format!("FormData: {:?}", e)))?;
        form.append_with_blob("file", file)
            .map_err(|e| ApiError::Network(format!("FormData append: {:?}", e)))?;
        Self::with_auth(HttpClient::post(&self.url(path)))
            .form_data(form)
            .send()
            .await
            .map_err(ApiError::from)
    }

    // ---------------------------------------------------------
    // History & reports
    // ---------------------------------------------------------

    pub async fn history(&self, page: u32, limit: u32) -> Result<Vec<PredictionRecord>, ApiError> {
        self.get_json(&history_path(page, limit)).await
    }

    /// GET /history/{customer_id}, the full report record.
    pub async fn report(&self, customer_id: &str) -> Result<PredictionRecord, ApiError> {
        self.get_json(&report_path(customer_id)).await
    }

    /// Absolute URL of the PDF rendering, opened in a new tab rather
    /// than fetched.
    pub fn report_pdf_url(&self, customer_id: &str) -> String {
        self.url(&report_pdf_path(customer_id))
    }

    // ---------------------------------------------------------
    // Analytics
    // ---------------------------------------------------------

    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary, ApiError> {
        self.get_json("/analytics/summary").await
    }

    pub async fn probability_distribution(&self) -> Result<Vec<ProbabilityBucket>, ApiError> {
        self.get_json("/analytics/probability_distribution").await
    }

    pub async fn churn_by_contract(&self) -> Result<Vec<ContractChurn>, ApiError> {
        self.get_json("/analytics/churn_by_contract").await
    }

    pub async fn top_risk(&self) -> Result<Vec<PredictionRecord>, ApiError> {
        self.get_json("/analytics/top_risk").await
    }

    // ---------------------------------------------------------
    // Admin
    // ---------------------------------------------------------

    /// DELETE /clear/all. The button is admin-gated in the UI only;
    /// enforcement is the backend's job.
    pub async fn clear_all(&self) -> Result<ClearResponse, ApiError> {
        let res = Self::with_auth(HttpClient::delete(&self.url("/clear/all")))
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::decode(Self::check(res).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_paths() {
        let api = ChurnApi::new();
        assert_eq!(api.url("/auth/me"), format!("{}/auth/me", BASE_URL));
        assert_eq!(api.url("auth/me"), format!("{}/auth/me", BASE_URL));
    }

    #[test]
    fn bearer_value_formats_header() {
        assert_eq!(bearer_value("tok1"), "Bearer tok1");
    }

    #[test]
    fn form_urlencode_escapes_reserved_bytes() {
        assert_eq!(
            form_urlencode(&[("username", "alice"), ("password", "pw123")]),
            "username=alice&password=pw123"
        );
        assert_eq!(
            form_urlencode(&[("password", "p&w =1")]),
            "password=p%26w%20%3D1"
        );
    }

    #[test]
    fn history_path_carries_paging_query() {
        assert_eq!(history_path(2, 50), "/history/?page=2&limit=50");
    }

    #[test]
    fn report_paths_encode_customer_id() {
        assert_eq!(report_path("CUST-42"), "/history/CUST-42");
        assert_eq!(report_path("CUST 42"), "/history/CUST%2042");
        assert_eq!(report_pdf_path("CUST-42"), "/report/CUST-42/pdf");
    }

    #[test]
    fn pdf_url_is_absolute() {
        let api = ChurnApi::new();
        assert_eq!(
            api.report_pdf_url("CUST-42"),
            format!("{}/report/CUST-42/pdf", BASE_URL)
        );
    }
}
