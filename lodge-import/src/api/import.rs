//! Property import endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::import::ImportError;
use crate::models::ImportResult;
use crate::AppState;

/// Header carrying the (already authenticated) tenant id
pub const TENANT_HEADER: &str = "x-tenant-id";

/// POST /properties/import
///
/// Body is the raw import document, passed through undecoded. Responds with an `ImportResult`:
/// - 200 when the property was created (warnings may be listed)
/// - 422 when the document failed validation
/// - 409 when the property row could not be written
pub async fn import_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ImportResult>)> {
    let tenant_id = tenant_from_headers(&headers)?;
    debug!(tenant_id = %tenant_id, bytes = body.len(), "Import request received");

    match state.importer.try_import(tenant_id, &body).await {
        Ok(outcome) => Ok((
            StatusCode::OK,
            Json(ImportResult::imported(outcome.property_id, outcome.message)),
        )),
        Err(e) => {
            let status = match &e {
                ImportError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ImportError::RootInsert(_) => {
                    *state.last_error.write().await = Some(e.to_string());
                    StatusCode::CONFLICT
                }
            };
            Ok((status, Json(e.to_result())))
        }
    }
}

fn tenant_from_headers(headers: &HeaderMap) -> ApiResult<Uuid> {
    let value = headers
        .get(TENANT_HEADER)
        .ok_or_else(|| ApiError::BadRequest(format!("missing {} header", TENANT_HEADER)))?;

    let value = value
        .to_str()
        .map_err(|_| ApiError::BadRequest(format!("{} header is not valid text", TENANT_HEADER)))?;

    Uuid::parse_str(value.trim())
        .map_err(|e| ApiError::BadRequest(format!("{} header is not a UUID: {}", TENANT_HEADER, e)))
}

/// Build import routes
pub fn import_routes() -> Router<AppState> {
    Router::new().route("/properties/import", post(import_property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_tenant_header_parsing() {
        let tenant = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, HeaderValue::from_str(&tenant.to_string()).unwrap());

        assert_eq!(tenant_from_headers(&headers).unwrap(), tenant);
    }

    #[test]
    fn test_tenant_header_missing_or_invalid() {
        assert!(matches!(
            tenant_from_headers(&HeaderMap::new()),
            Err(ApiError::BadRequest(_))
        ));

        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, HeaderValue::from_static("tenant-1"));
        assert!(matches!(tenant_from_headers(&headers), Err(ApiError::BadRequest(_))));
    }
}
