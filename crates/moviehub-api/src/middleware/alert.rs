//! Renders [`HeaderAlert`] response extensions into alert headers.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::headers::HeaderAlert;
use crate::state::AppState;

/// Move any `HeaderAlert` left on the response into
/// `X-{application}-alert|error|params` headers.
pub async fn alert_headers(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    if let Some(alert) = response.extensions_mut().remove::<HeaderAlert>() {
        alert.apply(state.application_name(), response.headers_mut());
    }
    response
}
