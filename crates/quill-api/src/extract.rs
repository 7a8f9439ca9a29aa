//! Request extractors that report failures in the JSON envelope.
//!
//! axum's stock `Json`, `Query` and `Path` rejections answer with plain
//! text; these wrappers keep every failure inside the `{success:false, error}`
//! shape.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::Uri;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, ENDPOINT_NOT_FOUND};

pub const NO_DATA_PROVIDED: &str = "No data provided";
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
pub const INVALID_QUERY: &str = "Invalid query parameters";

/// Unparsed request body.
///
/// Buffering failures keep their own status (413 for an oversized body).
#[derive(Debug)]
pub struct RawBody(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Bytes::from_request(req, state)
            .await
            .map(RawBody)
            .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))
    }
}

/// JSON request body.
///
/// An empty body, `null` or `{}` is rejected with "No data provided";
/// anything that is not a JSON object with "Invalid JSON body".
#[derive(Debug)]
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let RawBody(bytes) = RawBody::from_request(req, state).await?;
        parse_payload(&bytes).map(JsonPayload)
    }
}

/// Query string parameters.
///
/// A repeated key keeps its first value.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_query(&parts.uri).map(QueryParams)
    }
}

/// Decode the query string of `uri` into `T`, first value per key.
pub fn parse_query<T: DeserializeOwned>(uri: &Uri) -> Result<T, ApiError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|_| ApiError::bad_request(INVALID_QUERY))?;

    let mut params = Map::new();
    for (key, value) in pairs {
        params.entry(key).or_insert(Value::String(value));
    }
    serde_json::from_value(Value::Object(params)).map_err(|_| ApiError::bad_request(INVALID_QUERY))
}

/// Decode a request body into `T`, applying the envelope's rejection rules.
pub fn parse_payload<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request(NO_DATA_PROVIDED));
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|_| ApiError::bad_request(INVALID_JSON_BODY))?;

    match &value {
        Value::Null => return Err(ApiError::bad_request(NO_DATA_PROVIDED)),
        Value::Object(map) if map.is_empty() => {
            return Err(ApiError::bad_request(NO_DATA_PROVIDED))
        }
        Value::Object(_) => {}
        _ => return Err(ApiError::bad_request(INVALID_JSON_BODY)),
    }

    serde_json::from_value(value).map_err(|_| ApiError::bad_request(INVALID_JSON_BODY))
}

/// Integer id from the last path segment.
///
/// A segment that is not an integer is treated as an unmatched route.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| IdPath(id))
            .map_err(|_| ApiError::not_found(ENDPOINT_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        title: Option<String>,
    }

    fn rejection_message(result: Result<Body, ApiError>) -> String {
        match result {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_is_no_data() {
        assert_eq!(rejection_message(parse_payload(b"")), NO_DATA_PROVIDED);
        assert_eq!(rejection_message(parse_payload(b"  \n")), NO_DATA_PROVIDED);
    }

    #[test]
    fn test_null_and_empty_object_are_no_data() {
        assert_eq!(rejection_message(parse_payload(b"null")), NO_DATA_PROVIDED);
        assert_eq!(rejection_message(parse_payload(b"{}")), NO_DATA_PROVIDED);
    }

    #[test]
    fn test_malformed_json_is_invalid() {
        assert_eq!(rejection_message(parse_payload(b"{title:")), INVALID_JSON_BODY);
    }

    #[test]
    fn test_non_object_is_invalid() {
        assert_eq!(rejection_message(parse_payload(b"[1, 2]")), INVALID_JSON_BODY);
        assert_eq!(rejection_message(parse_payload(b"\"text\"")), INVALID_JSON_BODY);
    }

    #[test]
    fn test_wrong_field_type_is_invalid() {
        assert_eq!(rejection_message(parse_payload(br#"{"title": 5}"#)), INVALID_JSON_BODY);
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        search: Option<String>,
        tag: Option<String>,
    }

    fn uri(raw: &str) -> Uri {
        raw.parse().unwrap()
    }

    #[test]
    fn test_query_repeated_key_keeps_first_value() {
        let params: Params = parse_query(&uri("/api/notes?search=a&search=b")).unwrap();
        assert_eq!(params.search.as_deref(), Some("a"));
        assert!(params.tag.is_none());
    }

    #[test]
    fn test_query_decodes_percent_escapes() {
        let params: Params = parse_query(&uri("/api/notes?tag=to%20do&search=50%25")).unwrap();
        assert_eq!(params.tag.as_deref(), Some("to do"));
        assert_eq!(params.search.as_deref(), Some("50%"));
    }

    #[test]
    fn test_empty_query_is_all_absent() {
        let params: Params = parse_query(&uri("/api/notes")).unwrap();
        assert!(params.search.is_none() && params.tag.is_none());
    }

    #[test]
    fn test_valid_object_parses() {
        let body: Body = parse_payload(br#"{"title": "Hi", "extra": true}"#).unwrap();
        assert_eq!(body.title.as_deref(), Some("Hi"));
    }
}
