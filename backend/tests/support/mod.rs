//! Shared harness for integration suites: a full app over a fixture store.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{test, web};
use serde_json::{Value, json};

use backend::domain::ports::FixtureStore;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::{FeedCachePolicy, HttpState};
use backend::server::{build_app, fixture_http_state, session_middleware};

/// Page size every suite assumes.
pub const PAGE_SIZE: usize = 10;

/// Build handler state over a shared fixture store.
pub fn state(store: &Arc<FixtureStore>) -> web::Data<HttpState> {
    web::Data::new(fixture_http_state(store, PAGE_SIZE, FeedCachePolicy::default()))
}

/// Initialise the full application for in-process requests.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(build_app(
        state,
        web::Data::new(HealthState::new()),
        session_middleware(Key::generate(), false, SameSite::Lax),
    ))
    .await
}

/// Log in as `username`, returning the session cookie.
///
/// First logins register the user, so suites rarely need to seed users by
/// hand.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": username, "password": "password" }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// POST a new post as the session owner, asserting the redirect contract.
pub async fn create_post<S>(app: &S, cookie: &Cookie<'static>, text: &str, group: Option<&str>)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/create/")
        .cookie(cookie.clone())
        .set_json(json!({ "text": text, "group": group }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND, "create should redirect");
}

/// The `Location` header of a redirect response.
pub fn location(response: &ServiceResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_owned()
}

/// Read a JSON response body.
pub async fn body_json(response: ServiceResponse) -> Value {
    test::read_body_json(response).await
}
