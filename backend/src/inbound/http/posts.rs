//! Post detail and write handlers.
//!
//! ```text
//! GET  /posts/{id}/           detail with comments
//! GET  /create/               create-form context, authenticated only
//! POST /create/               create post, authenticated only
//! GET  /posts/{id}/edit/      edit-form context, owner only
//! POST /posts/{id}/edit/      apply edit, owner only
//! POST /posts/{id}/comment    add comment, authenticated only
//! ```
//!
//! Ownership refusals answer with a silent redirect to the detail view, the
//! same response a successful edit ends with; nothing distinguishes "not
//! yours" from "done" beyond the record's contents.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::{EditAccess, EditOutcome};
use crate::domain::{CommentForm, Error, PostForm, PostId};
use crate::inbound::http::schemas::{
    GroupResponse, PostDetailResponse, PostFormContextResponse, PostResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{
    ApiResult, post_detail_path, profile_path, redirect_to, redirect_to_login,
};

fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    // Anything that is not a post id names no post.
    PostId::parse(raw).map_err(|_| Error::not_found("post not found"))
}

/// Post detail: the post, its author's post count, and the comment thread.
#[utoipa::path(
    get,
    path = "/posts/{id}/",
    responses(
        (status = 200, description = "Post detail", body = PostDetailResponse),
        (status = 404, description = "Unknown post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "postDetail"
)]
#[get("/posts/{id}/")]
pub async fn post_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    let view = state.feeds.post_detail(&id).await?;
    Ok(HttpResponse::Ok().json(PostDetailResponse::from(view)))
}

/// Create-form context: group choices for the select field.
#[utoipa::path(
    get,
    path = "/create/",
    responses(
        (status = 200, description = "Form context", body = PostFormContextResponse),
        (status = 302, description = "Anonymous caller redirected to login")
    ),
    tags = ["posts"],
    operation_id = "createPostForm"
)]
#[get("/create/")]
pub async fn create_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_none() {
        return Ok(redirect_to_login());
    }
    let groups = state.feeds.list_groups().await?;
    Ok(HttpResponse::Ok().json(PostFormContextResponse {
        is_edit: false,
        post: None,
        groups: groups.into_iter().map(GroupResponse::from).collect(),
    }))
}

/// Create a post owned by the session user and redirect to their profile.
#[utoipa::path(
    post,
    path = "/create/",
    request_body = PostForm,
    responses(
        (status = 302, description = "Created; redirect to the author's profile"),
        (status = 400, description = "Validation failure with field messages", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/create/")]
pub async fn post_create(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Json<PostForm>,
) -> ApiResult<HttpResponse> {
    let Some(author) = session.user_id()? else {
        return Ok(redirect_to_login());
    };
    let entry = state.posts.create_post(&author, form.into_inner()).await?;
    Ok(redirect_to(&profile_path(&entry.author.username)))
}

/// Edit-form context, pre-filled with the post; owner only.
#[utoipa::path(
    get,
    path = "/posts/{id}/edit/",
    responses(
        (status = 200, description = "Form context", body = PostFormContextResponse),
        (status = 302, description = "Non-owner redirected to the detail view"),
        (status = 404, description = "Unknown post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "editPostForm"
)]
#[get("/posts/{id}/edit/")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    let Some(requester) = session.user_id()? else {
        // Anonymous callers get the same silent redirect as non-owners.
        return Ok(redirect_to(&post_detail_path(&id)));
    };
    match state.posts.load_for_edit(&requester, &id).await? {
        EditAccess::NotOwner => Ok(redirect_to(&post_detail_path(&id))),
        EditAccess::Granted(entry) => {
            let groups = state.feeds.list_groups().await?;
            Ok(HttpResponse::Ok().json(PostFormContextResponse {
                is_edit: true,
                post: Some(PostResponse::from(entry)),
                groups: groups.into_iter().map(GroupResponse::from).collect(),
            }))
        }
    }
}

/// Apply an edit and redirect to the detail view; owner only.
#[utoipa::path(
    post,
    path = "/posts/{id}/edit/",
    request_body = PostForm,
    responses(
        (status = 302, description = "Updated (owner) or silently refused (anyone else)"),
        (status = 400, description = "Validation failure with field messages", body = Error),
        (status = 404, description = "Unknown post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "editPost"
)]
#[post("/posts/{id}/edit/")]
pub async fn post_edit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Json<PostForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    let Some(requester) = session.user_id()? else {
        return Ok(redirect_to(&post_detail_path(&id)));
    };
    match state.posts.edit_post(&requester, &id, form.into_inner()).await? {
        EditOutcome::Updated | EditOutcome::NotOwner => {
            Ok(redirect_to(&post_detail_path(&id)))
        }
    }
}

/// Add a comment and redirect to the detail view.
#[utoipa::path(
    post,
    path = "/posts/{id}/comment",
    request_body = CommentForm,
    responses(
        (status = 302, description = "Created; redirect to the detail view"),
        (status = 400, description = "Validation failure with field messages", body = Error),
        (status = 404, description = "Unknown post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "addComment"
)]
#[post("/posts/{id}/comment")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Json<CommentForm>,
) -> ApiResult<HttpResponse> {
    // Anonymous submissions are turned away before the post lookup or any
    // validation; no comment is ever created for them.
    let Some(author) = session.user_id()? else {
        return Ok(redirect_to_login());
    };
    let id = parse_post_id(&path.into_inner())?;
    state.posts.add_comment(&author, &id, form.into_inner()).await?;
    Ok(redirect_to(&post_detail_path(&id)))
}
