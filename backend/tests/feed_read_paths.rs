//! Feed reads: pagination, placement across feeds, profile context, and
//! not-found surfaces.

#[allow(dead_code)]
mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::ports::FixtureStore;
use support::{PAGE_SIZE, body_json, create_post, init_app, login, state};

#[actix_web::test]
async fn twelve_posts_split_ten_then_two() {
    let store = Arc::new(FixtureStore::new());
    let app = init_app(state(&store)).await;
    let cookie = login(&app, "ada").await;
    for n in 1..=12 {
        create_post(&app, &cookie, &format!("post {n}"), None).await;
    }

    let first = body_json(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;
    assert_eq!(first["items"].as_array().map(Vec::len), Some(PAGE_SIZE));
    assert_eq!(first["page"], 1);
    assert_eq!(first["total_items"], 12);
    assert_eq!(first["total_pages"], 2);
    assert_eq!(first["has_next"], true);
    // Newest first: the latest post leads page one.
    assert_eq!(first["items"][0]["text"], "post 12");

    let second = body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/?page=2").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(second["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(second["page"], 2);
    assert_eq!(second["has_previous"], true);
    assert_eq!(second["items"][1]["text"], "post 1");
}

#[actix_web::test]
async fn out_of_range_pages_clamp_to_the_last_page() {
    let store = Arc::new(FixtureStore::new());
    let app = init_app(state(&store)).await;
    let cookie = login(&app, "ada").await;
    for n in 1..=12 {
        create_post(&app, &cookie, &format!("post {n}"), None).await;
    }

    let clamped = body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/?page=99").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(clamped["page"], 2);
    assert_eq!(clamped["items"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn grouped_posts_appear_exactly_where_they_should() {
    let store = Arc::new(FixtureStore::new());
    store.seed_group("Rust Cafe", "rust-cafe", "systems talk");
    store.seed_group("Poetry", "poetry", "verse");
    let app = init_app(state(&store)).await;
    let cookie = login(&app, "ada").await;
    create_post(&app, &cookie, "grouped post", Some("rust-cafe")).await;

    let global = body_json(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;
    assert_eq!(global["items"][0]["text"], "grouped post");
    assert_eq!(global["items"][0]["group"]["slug"], "rust-cafe");

    let in_group = body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/group/rust-cafe/").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(in_group["group"]["title"], "Rust Cafe");
    assert_eq!(in_group["feed"]["items"].as_array().map(Vec::len), Some(1));

    let other_group = body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/group/poetry/").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(other_group["feed"]["items"].as_array().map(Vec::len), Some(0));

    let profile = body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/profile/ada/").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(profile["post_count"], 1);
    assert_eq!(profile["feed"]["items"][0]["text"], "grouped post");
}

#[actix_web::test]
async fn profile_reports_follow_state_only_when_authenticated() {
    let store = Arc::new(FixtureStore::new());
    let app = init_app(state(&store)).await;
    let _ada = login(&app, "ada").await;
    let grace = login(&app, "grace").await;

    let follow = test::TestRequest::post()
        .uri("/profile/ada/follow")
        .cookie(grace.clone())
        .to_request();
    assert_eq!(
        test::call_service(&app, follow).await.status(),
        StatusCode::FOUND
    );

    let authed = body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile/ada/")
                .cookie(grace)
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(authed["following"], true);

    let anonymous = body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/profile/ada/").to_request(),
        )
        .await,
    )
    .await;
    assert!(anonymous.get("following").is_none());
}

#[actix_web::test]
async fn post_detail_carries_comments_and_author_count() {
    let store = Arc::new(FixtureStore::new());
    let app = init_app(state(&store)).await;
    let cookie = login(&app, "ada").await;
    create_post(&app, &cookie, "first", None).await;
    create_post(&app, &cookie, "second", None).await;

    let profile = body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/profile/ada/").to_request(),
        )
        .await,
    )
    .await;
    let post_id = profile["feed"]["items"][0]["id"]
        .as_str()
        .expect("post id")
        .to_owned();

    let comment = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comment"))
        .cookie(cookie)
        .set_json(serde_json::json!({ "text": "nice" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, comment).await.status(),
        StatusCode::FOUND
    );

    let detail = body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/posts/{post_id}/"))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(detail["author_post_count"], 2);
    assert_eq!(detail["comments"].as_array().map(Vec::len), Some(1));
    assert_eq!(detail["comments"][0]["text"], "nice");
    assert_eq!(detail["comments"][0]["author"]["username"], "ada");
}

#[actix_web::test]
async fn unknown_resources_answer_not_found() {
    let store = Arc::new(FixtureStore::new());
    let app = init_app(state(&store)).await;

    for uri in [
        "/group/ghost-town/",
        "/profile/nobody/",
        "/posts/00000000-0000-0000-0000-000000000000/",
        "/posts/not-a-uuid/",
        "/definitely/not/a/route",
    ] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn follow_feed_redirects_anonymous_viewers_to_login() {
    let store = Arc::new(FixtureStore::new());
    let app = init_app(state(&store)).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/follow/").to_request()).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(support::location(&response), "/auth/login");
}
