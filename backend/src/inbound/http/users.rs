//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users        {"name":"Alice"}
//! GET    /api/users/{id}
//! PUT    /api/users/{id}   {"name":"Alicia"}
//! DELETE /api/users/{id}
//! ```
//!
//! Path identifiers and bodies are decoded here; a decoding failure is a 400
//! and the registry is never called.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::domain::{Error, NewUser, RequestContext, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::response::json_response;
use crate::inbound::http::schemas::{ErrorSchema, NewUserSchema, UserSchema};
use crate::inbound::http::state::HttpState;

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse().map_err(|err| {
        Error::invalid_request(format!("invalid user id: {err}"))
            .with_details(json!({ "field": "id", "value": raw }))
    })
}

fn parse_new_user(body: &[u8]) -> Result<NewUser, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::invalid_request("request body must be a JSON object")
            .with_details(json!({ "field": "body", "code": "empty_body" })));
    }
    serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request(format!("invalid user payload: {err}"))
            .with_details(json!({ "field": "body", "code": "malformed_json" }))
    })
}

/// List every stored user.
///
/// Always answers with a JSON array; an empty store yields `[]`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use userbase::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> ApiResult<HttpResponse> {
    let users = match state.users.list(&ctx).await {
        Ok(users) => users,
        Err(err) if err.is_not_found() => Vec::new(),
        Err(err) => return Err(err),
    };
    json_response(StatusCode::OK, &users)
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let user = state.users.get(&ctx, id).await?;
    json_response(StatusCode::OK, &user)
}

/// Create a user from an arbitrary JSON object.
///
/// Any `id` in the body is ignored; storage assigns the next identifier.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUserSchema,
    responses(
        (status = 201, description = "Created user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Conflict", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let draft = parse_new_user(&body)?;
    let user = state.users.create(&ctx, draft).await?;
    json_response(StatusCode::CREATED, &user)
}

/// Replace every attribute of a user.
///
/// The path identifier is authoritative; an `id` in the body is ignored.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = NewUserSchema,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let draft = parse_new_user(&body)?;
    let user = state.users.update(&ctx, id, draft).await?;
    json_response(StatusCode::OK, &user)
}

/// Delete a user, returning the removed record.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted user", body = UserSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let user = state.users.delete(&ctx, id).await?;
    json_response(StatusCode::OK, &user)
}
