//! Author profile and follow handlers.
//!
//! ```text
//! GET  /profile/{username}/           author feed with follow state
//! POST /profile/{username}/follow     create follow edge, idempotent
//! POST /profile/{username}/unfollow   delete follow edge, idempotent
//! ```
//!
//! Follow and unfollow always end in a redirect to the target's profile,
//! whatever happened: created, already present, removed, absent, or a
//! self-follow that was dropped.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, Username};
use crate::inbound::http::schemas::ProfileResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, PageQuery, profile_path, redirect_to, redirect_to_login};

fn parse_username(raw: &str) -> Result<Username, Error> {
    // A string that cannot be a username names nobody.
    Username::new(raw).map_err(|_| Error::not_found("user not found"))
}

/// Author profile: their posts, post count, and the viewer's follow state.
#[utoipa::path(
    get,
    path = "/profile/{username}/",
    responses(
        (status = 200, description = "Profile page", body = ProfileResponse),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "profile"
)]
#[get("/profile/{username}/")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let username = parse_username(&path.into_inner())?;
    let viewer = session.user_id()?;
    let view = state
        .feeds
        .profile_feed(&username, viewer.as_ref(), query.page())
        .await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(view)))
}

/// Follow an author. Self-follows and duplicates are silent no-ops.
#[utoipa::path(
    post,
    path = "/profile/{username}/follow",
    responses(
        (status = 302, description = "Redirect to the target's profile"),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "profileFollow"
)]
#[post("/profile/{username}/follow")]
pub async fn profile_follow(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.user_id()? else {
        return Ok(redirect_to_login());
    };
    let username = parse_username(&path.into_inner())?;
    state.follows.follow(&user, &username).await?;
    Ok(redirect_to(&profile_path(&username)))
}

/// Unfollow an author. Unfollowing a non-edge is a silent no-op.
#[utoipa::path(
    post,
    path = "/profile/{username}/unfollow",
    responses(
        (status = 302, description = "Redirect to the target's profile"),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "profileUnfollow"
)]
#[post("/profile/{username}/unfollow")]
pub async fn profile_unfollow(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.user_id()? else {
        return Ok(redirect_to_login());
    };
    let username = parse_username(&path.into_inner())?;
    state.follows.unfollow(&user, &username).await?;
    Ok(redirect_to(&profile_path(&username)))
}
