//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{build_http_state, fixture_http_state};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, web};

use crate::domain::Error;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, feeds, posts, profiles};
use crate::middleware::Trace;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the cookie-session middleware used by the app and by tests.
#[must_use]
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Error::not_found("page not found"))
}

/// Assemble the application: middleware, every route of the blog surface,
/// health probes, and the catch-all 404.
pub fn build_app(
    state: web::Data<HttpState>,
    health: web::Data<HealthState>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    #[cfg_attr(not(debug_assertions), expect(unused_mut, reason = "mut used by swagger wiring"))]
    let mut app = App::new()
        .app_data(state)
        .app_data(health)
        .wrap(Trace)
        .wrap(session)
        .service(feeds::index)
        .service(feeds::group_feed)
        .service(feeds::follow_feed)
        .service(posts::create_form)
        .service(posts::post_create)
        .service(posts::edit_form)
        .service(posts::post_edit)
        .service(posts::add_comment)
        .service(posts::post_detail)
        .service(profiles::profile_follow)
        .service(profiles::profile_unfollow)
        .service(profiles::profile)
        .service(auth::login)
        .service(auth::logout)
        .service(ready)
        .service(live)
        .default_service(web::route().to(not_found));

    #[cfg(debug_assertions)]
    {
        app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app
}

/// Build the state and run the server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(build_http_state(&config).await?);
    let health = web::Data::new(HealthState::new());
    let server_health = health.clone();

    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health.clone(),
            session_middleware(key.clone(), cookie_secure, same_site),
        )
    })
    .bind(bind_addr)?;

    health.mark_ready();
    server.run().await
}
