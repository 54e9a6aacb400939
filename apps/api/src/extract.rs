//! Request extractors that reject with `AppError` instead of axum's plain-text bodies.

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// JSON body whose deserialization failures name the offending field.
///
/// A value of the wrong shape reports its path (`start_date`, `links.0`); an
/// absent required field reports its own name. Anything else falls back to `body`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        serde_path_to_error::deserialize(value)
            .map(JsonBody)
            .map_err(field_error)
    }
}

fn field_error(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let path = err.path().to_string();
    let message = err.into_inner().to_string();
    let field = if path == "." {
        missing_field(&message).unwrap_or("body").to_string()
    } else {
        path
    };
    AppError::invalid(&field, message)
}

fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

/// UUID path segment. A segment that does not parse is reported as 404.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| RecordId(id))
            .map_err(|rejection: PathRejection| {
                tracing::debug!("Rejected record id: {}", rejection.body_text());
                AppError::NotFound("Record not found".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    use crate::errors::FieldError;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Entry {
        name: String,
        #[serde(deserialize_with = "crate::models::dates::flexible")]
        start_date: chrono::NaiveDateTime,
        team_size: Option<i32>,
    }

    async fn extract(body: &str) -> Result<JsonBody<Entry>, AppError> {
        let req = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        JsonBody::<Entry>::from_request(req, &()).await
    }

    fn fields(err: AppError) -> Vec<FieldError> {
        match err {
            AppError::Validation(fields) => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_required_field_is_named() {
        let err = extract(r#"{"start_date": "2023-05-14"}"#).await.unwrap_err();
        let fields = fields(err);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "name");
        assert!(fields[0].message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_bad_value_reports_its_path() {
        let err = extract(r#"{"name": "x", "start_date": "soon"}"#).await.unwrap_err();
        assert_eq!(fields(err)[0].field, "start_date");

        let err = extract(r#"{"name": "x", "start_date": "2023-05-14", "team_size": "four"}"#)
            .await
            .unwrap_err();
        assert_eq!(fields(err)[0].field, "team_size");
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back_to_body() {
        let err = extract("{not json").await.unwrap_err();
        assert_eq!(fields(err)[0].field, "body");

        let err = extract(r#""just text""#).await.unwrap_err();
        assert_eq!(fields(err)[0].field, "body");
    }

    #[tokio::test]
    async fn test_valid_body_extracts() {
        let JsonBody(entry) = extract(r#"{"name": "x", "start_date": "2023-05-14"}"#)
            .await
            .unwrap();
        assert_eq!(entry.name, "x");
        assert_eq!(entry.team_size, None);
    }

    #[test]
    fn test_missing_field_parses_serde_message() {
        assert_eq!(missing_field("missing field `platform`"), Some("platform"));
        assert_eq!(missing_field("invalid type: sequence"), None);
    }
}
