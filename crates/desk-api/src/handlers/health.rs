//! Liveness handler.

/// Plain-text liveness probe at the root path.
pub async fn live() -> &'static str {
    "the Dream Desk server is Running."
}
