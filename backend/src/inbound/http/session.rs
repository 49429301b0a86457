//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting, reading, or clearing the
//! authenticated user id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every session value, ending the login.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A cookie carrying an unparsable id is treated as anonymous rather
    /// than failing the request.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::parse(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    ///
    /// Write-path handlers that owe the caller a redirect use
    /// [`Self::user_id`] directly instead.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    async fn write_session(session: SessionContext) -> HttpResponse {
        let id = UserId::random();
        match session.persist_user(&id) {
            Ok(()) => HttpResponse::Ok().body(id.to_string()),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn read_session(session: SessionContext) -> HttpResponse {
        match session.user_id() {
            Ok(Some(id)) => HttpResponse::Ok().body(id.to_string()),
            Ok(None) => HttpResponse::NoContent().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn persisted_user_round_trips_through_the_cookie() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/write", web::get().to(write_session))
                .route("/read", web::get().to(read_session)),
        )
        .await;

        let write = test::TestRequest::get().uri("/write").to_request();
        let response = test::call_service(&app, write).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();
        let written = test::read_body(response).await;

        let read = test::TestRequest::get()
            .uri("/read")
            .cookie(cookie)
            .to_request();
        let response = test::call_service(&app, read).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(test::read_body(response).await, written);
    }

    #[actix_web::test]
    async fn missing_session_reads_as_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/read", web::get().to(read_session)),
        )
        .await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/read").to_request())
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
