// Native browser API wrappers.
//
// Lightweight replacements for the gloo-* crates, kept in-tree to
// shrink the WASM binary.

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::{HttpClient, HttpError, HttpRequestBuilder, HttpResponse};
pub use storage::LocalStorage;
