//! Feed read handlers.
//!
//! ```text
//! GET /                 global feed, paginated, cached
//! GET /group/{slug}/    group feed, paginated
//! GET /follow/          personalized follow feed, authenticated only
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::domain::{Error, GroupSlug};
use crate::inbound::http::schemas::{FeedPageResponse, GroupFeedResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, PageQuery, redirect_to_login};

fn json_body(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body)
}

/// Global feed: every post, newest first.
///
/// The rendered body is cached under the configured prefix for the policy's
/// TTL; a post created or deleted inside the window is invisible until the
/// window expires or the cache is purged. Cache failures degrade to an
/// uncached render, never an error.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Global feed page", body = FeedPageResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feeds"],
    operation_id = "globalFeed"
)]
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = query.page();
    let policy = state.cache_policy.clone();
    let key = format!("page:{page}");

    match state.page_cache.get(&policy.prefix, &key).await {
        Ok(Some(body)) => return Ok(json_body(body)),
        Ok(None) => {}
        Err(error) => warn!(%error, "page cache read failed; rendering uncached"),
    }

    let feed = state.feeds.global_feed(page).await?;
    let response = FeedPageResponse::from(feed);
    let body = serde_json::to_string(&response)
        .map_err(|error| Error::internal(format!("failed to render feed: {error}")))?;

    if let Err(error) = state
        .page_cache
        .put(&policy.prefix, &key, &body, policy.ttl)
        .await
    {
        warn!(%error, "page cache write failed");
    }

    Ok(json_body(body))
}

/// Group feed: posts in one group plus the group record.
#[utoipa::path(
    get,
    path = "/group/{slug}/",
    responses(
        (status = 200, description = "Group feed page", body = GroupFeedResponse),
        (status = 404, description = "Unknown group", body = Error)
    ),
    tags = ["feeds"],
    operation_id = "groupFeed"
)]
#[get("/group/{slug}/")]
pub async fn group_feed(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    // A string that cannot even be a slug cannot name a group.
    let slug = GroupSlug::new(path.into_inner())
        .map_err(|_| Error::not_found("group not found"))?;
    let view = state.feeds.group_feed(&slug, query.page()).await?;
    Ok(HttpResponse::Ok().json(GroupFeedResponse::from(view)))
}

/// Personalized follow feed: posts by authors the viewer follows.
///
/// Anonymous callers are redirected to the login page.
#[utoipa::path(
    get,
    path = "/follow/",
    responses(
        (status = 200, description = "Follow feed page", body = FeedPageResponse),
        (status = 302, description = "Anonymous viewer redirected to login")
    ),
    tags = ["feeds"],
    operation_id = "followFeed"
)]
#[get("/follow/")]
pub async fn follow_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let Some(viewer) = session.user_id()? else {
        return Ok(redirect_to_login());
    };
    let page = state.feeds.follow_feed(&viewer, query.page()).await?;
    Ok(HttpResponse::Ok().json(FeedPageResponse::from(page)))
}
