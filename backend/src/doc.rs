//! OpenAPI document aggregating the HTTP surface.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::domain::forms::{CommentForm, PostForm};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::schemas::{
    AuthorResponse, CommentResponse, FeedPageResponse, GroupFeedResponse, GroupResponse,
    GroupSummaryResponse, PostDetailResponse, PostFormContextResponse, PostResponse,
    ProfileResponse, UserResponse,
};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::feeds::index,
        crate::inbound::http::feeds::group_feed,
        crate::inbound::http::feeds::follow_feed,
        crate::inbound::http::posts::post_detail,
        crate::inbound::http::posts::create_form,
        crate::inbound::http::posts::post_create,
        crate::inbound::http::posts::edit_form,
        crate::inbound::http::posts::post_edit,
        crate::inbound::http::posts::add_comment,
        crate::inbound::http::profiles::profile,
        crate::inbound::http::profiles::profile_follow,
        crate::inbound::http::profiles::profile_unfollow,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PostForm,
        CommentForm,
        LoginRequest,
        AuthorResponse,
        GroupSummaryResponse,
        PostResponse,
        CommentResponse,
        FeedPageResponse,
        GroupResponse,
        GroupFeedResponse,
        UserResponse,
        ProfileResponse,
        PostDetailResponse,
        PostFormContextResponse,
    )),
    tags(
        (name = "feeds", description = "Feed reads"),
        (name = "posts", description = "Post detail and write paths"),
        (name = "profiles", description = "Author profiles and follow edges"),
        (name = "auth", description = "Session establishment"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;
