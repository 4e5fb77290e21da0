//! HTTP request wrapper.
//!
//! Builds on `web_sys::fetch` directly instead of pulling in `gloo-net`,
//! keeping the WASM binary small. Every request carries an abort timer:
//! a backend that never answers surfaces as a `NetworkError` instead of
//! hanging the page forever.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

/// Per-request timeout, matching the backend's worst-case cold start.
pub const REQUEST_TIMEOUT_MS: i32 = 15_000;

/// HTTP request method.
#[derive(Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// HTTP failure taxonomy.
#[derive(Debug)]
pub enum HttpError {
    /// The request could not be constructed.
    RequestBuildFailed(String),
    /// No response: network failure, CORS rejection, or abort timeout.
    NetworkError(String),
    /// The response body could not be read or converted.
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "response parse failed: {}", msg),
        }
    }
}

/// Request body variants we actually send.
enum HttpBody {
    /// Text payload: JSON or form-urlencoded, content type set by caller.
    Text(String),
    /// Multipart form data (file uploads). The browser sets the content
    /// type and boundary itself.
    Form(web_sys::FormData),
}

/// Wrapped fetch response.
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 2xx check.
    pub fn ok(&self) -> bool {
        self.inner.ok()
    }

    /// Consume the response body as text.
    pub async fn text(self) -> Result<String, HttpError> {
        let promise = self
            .inner
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ResponseParseFailed("body is not a string".to_string()))
    }

    /// Consume the response body as a binary blob (CSV/PDF downloads).
    pub async fn blob(self) -> Result<web_sys::Blob, HttpError> {
        let promise = self
            .inner
            .blob()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        let blob = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        blob.dyn_into()
            .map_err(|e| HttpError::ResponseParseFailed(format!("not a Blob: {:?}", e)))
    }
}

/// Request builder.
pub struct HttpRequestBuilder {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<HttpBody>,
}

impl HttpRequestBuilder {
    fn new(url: String, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Set a text body (JSON or form-urlencoded).
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(HttpBody::Text(body));
        self
    }

    /// Set a multipart body. Do not set Content-Type alongside this:
    /// the browser must generate the boundary.
    pub fn form_data(mut self, form: web_sys::FormData) -> Self {
        self.body = Some(HttpBody::Form(form));
        self
    }

    /// Send the request. Aborts with a `NetworkError` after
    /// [`REQUEST_TIMEOUT_MS`].
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("Headers::new: {:?}", e)))?;

        for (key, value) in &self.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("set header: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(self.method.as_str());
        opts.set_headers(&headers.into());

        match &self.body {
            Some(HttpBody::Text(text)) => opts.set_body(&JsValue::from_str(text)),
            Some(HttpBody::Form(form)) => opts.set_body(form),
            None => {}
        }

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("no window object".to_string()))?;

        // Abort timer. The closure must stay alive until the fetch
        // resolves, then the pending timeout is cleared.
        let controller = AbortController::new().ok();
        let mut timeout_handle = None;
        let _abort_closure = controller.as_ref().map(|controller| {
            opts.set_signal(Some(&controller.signal()));
            let controller = controller.clone();
            let closure = Closure::<dyn FnMut()>::new(move || controller.abort());
            timeout_handle = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    REQUEST_TIMEOUT_MS,
                )
                .ok();
            closure
        });

        let request = Request::new_with_str_and_init(&self.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await;

        if let Some(handle) = timeout_handle {
            window.clear_timeout_with_handle(handle);
        }

        let resp_value = resp_value.map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseParseFailed(format!("not a Response: {:?}", e)))?;

        Ok(HttpResponse { inner: response })
    }
}

/// Lightweight HTTP client entry points.
pub struct HttpClient;

impl HttpClient {
    pub fn get(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), HttpMethod::Get)
    }

    pub fn post(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), HttpMethod::Post)
    }

    pub fn delete(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), HttpMethod::Delete)
    }
}
