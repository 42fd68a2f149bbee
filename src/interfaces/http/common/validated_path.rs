//! Path extractor that answers with the API envelope

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::ApiResponse;

/// `axum::extract::Path<T>` whose rejection is an [`ApiResponse`] error
/// instead of a plain-text body.
pub struct ValidatedPath<T>(pub T);

pub struct ValidatedPathRejection(PathRejection);

impl IntoResponse for ValidatedPathRejection {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = format!("Invalid path parameter: {}", self.0.body_text());
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ValidatedPathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidatedPathRejection)?;
        Ok(ValidatedPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn handler(ValidatedPath(id): ValidatedPath<Uuid>) -> String {
        id.to_string()
    }

    async fn call(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/items/{id}", get(handler));
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn well_formed_id_passes() {
        let id = Uuid::new_v4();
        let (status, _) = call(&format!("/items/{id}")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_id_gets_the_error_envelope() {
        let (status, body) = call("/items/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid path parameter"));
    }
}
