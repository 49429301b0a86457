//! Session establishment handlers.
//!
//! ```text
//! POST /auth/login  {"username":"ada","password":"..."}
//! POST /auth/logout
//! ```
//!
//! Credential verification lives behind the login port; these handlers only
//! validate shape, bind the returned user id to the cookie session, and
//! clear it again on logout.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Unique handle to log in as.
    pub username: String,
    /// Password, verified by the login port.
    pub password: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidUsername(inner) => {
            Error::invalid_request(inner.to_string())
                .with_details(json!({ "field": "username" }))
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password" }))
        }
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed credentials", body = Error),
        (status = 401, description = "Verification failed", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;
    let user = state.login.login(&credentials).await?;
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Clear the session.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}
