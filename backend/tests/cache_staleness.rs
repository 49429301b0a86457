//! Global-feed cache: reads inside the TTL window are eventually consistent
//! with writes, and an explicit purge makes new state visible.

#[allow(dead_code)]
mod support;

use std::sync::Arc;

use actix_web::test;
use backend::domain::ports::{FixtureStore, PageCache};
use support::{create_post, init_app, login, state};

#[actix_web::test]
async fn writes_inside_the_window_stay_invisible_until_purge() {
    let store = Arc::new(FixtureStore::new());
    let http_state = state(&store);
    let app = init_app(http_state.clone()).await;

    // Prime the cache with the empty feed.
    let before = test::read_body(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;

    let cookie = login(&app, "ada").await;
    create_post(&app, &cookie, "invisible for now", None).await;

    let stale = test::read_body(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;
    assert_eq!(before, stale, "cached render must not see the new post");

    http_state
        .page_cache
        .purge(&http_state.cache_policy.prefix)
        .await
        .expect("purge");

    let fresh = test::read_body(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;
    assert_ne!(before, fresh, "purged cache must re-render");
    let fresh_text = String::from_utf8(fresh.to_vec()).expect("utf8 body");
    assert!(fresh_text.contains("invisible for now"));
}

#[actix_web::test]
async fn each_page_caches_under_its_own_key() {
    let store = Arc::new(FixtureStore::new());
    let http_state = state(&store);
    let app = init_app(http_state).await;
    let cookie = login(&app, "ada").await;
    for n in 1..=12 {
        create_post(&app, &cookie, &format!("post {n}"), None).await;
    }

    let first = test::read_body(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;
    let second = test::read_body(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/?page=2").to_request(),
        )
        .await,
    )
    .await;
    assert_ne!(first, second, "pages under the shared prefix stay distinct");
}
