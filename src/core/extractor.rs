use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor whose rejections use the error envelope
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(AppJsonRejection)
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => {
                format!("Invalid JSON syntax: {}", err.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            _ => "Failed to parse JSON body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

/// Query string extractor whose rejections use the error envelope
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| match rejection {
                QueryRejection::FailedToDeserializeQueryString(err) => {
                    AppError::BadRequest(format!("Invalid query string: {}", err.body_text()))
                }
                _ => AppError::BadRequest("Failed to parse query string".to_string()),
            })
    }
}

/// The principal placed in request extensions by the bearer auth middleware
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Paging {
        page: Option<i64>,
    }

    fn parts_for(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let rejection = AppJson::<Payload>::from_request(json_request("{not json"), &())
            .await
            .err()
            .expect("rejection");
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let rejection = AppJson::<Payload>::from_request(json_request("{}"), &())
            .await
            .err()
            .expect("rejection");
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let AppJson(payload) = AppJson::<Payload>::from_request(json_request(r#"{"name":"x"}"#), &())
            .await
            .ok()
            .expect("payload");
        assert_eq!(payload.name, "x");
    }

    #[tokio::test]
    async fn test_query_is_extracted() {
        let mut parts = parts_for("/items?page=3");
        let AppQuery(paging) = AppQuery::<Paging>::from_request_parts(&mut parts, &())
            .await
            .ok()
            .expect("query");
        assert_eq!(paging.page, Some(3));
    }

    #[tokio::test]
    async fn test_malformed_query_is_bad_request_envelope() {
        let mut parts = parts_for("/items?page=abc");
        let err = AppQuery::<Paging>::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("rejection");
        match &err {
            AppError::BadRequest(msg) => assert!(msg.starts_with("Invalid query string")),
            other => panic!("expected bad request, got {other:?}"),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
