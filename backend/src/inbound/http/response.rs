//! JSON response construction.
//!
//! Bodies are serialised into a buffer first; the status line is only built
//! once serialisation has succeeded, so a failing body becomes a clean 500
//! rather than a committed success status with a truncated payload.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Serialise `body` and wrap it in a response with `status`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use userbase::inbound::http::response::json_response;
///
/// let response = json_response(StatusCode::CREATED, &serde_json::json!({"id": 1}))
///     .expect("serialisable body");
/// assert_eq!(response.status(), StatusCode::CREATED);
/// ```
pub fn json_response<T>(status: StatusCode, body: &T) -> ApiResult<HttpResponse>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(body)
        .map_err(|err| Error::internal(format!("failed to serialise response body: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::json())
        .body(bytes))
}
