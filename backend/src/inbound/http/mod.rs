//! HTTP inbound adapter exposing the blog surface.
//!
//! Handlers stay thin: they read the session, call a driving port, and map
//! the result to a JSON body or a redirect. Redirect semantics follow the
//! write-path contracts: success and authorization refusals both answer
//! with `302 Found`, never an error page.

pub mod auth;
pub mod error;
pub mod feeds;
pub mod health;
pub mod posts;
pub mod profiles;
pub mod schemas;
pub mod session;
pub mod state;
pub mod test_utils;

pub use error::ApiResult;

use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Deserialize;

use crate::domain::{PostId, Username};

/// Path the unauthenticated are redirected to before any write.
pub const LOGIN_PATH: &str = "/auth/login";

/// A `302 Found` pointing at `location`.
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// The redirect issued to anonymous callers of gated routes.
pub(crate) fn redirect_to_login() -> HttpResponse {
    redirect_to(LOGIN_PATH)
}

/// Canonical profile path for an author.
pub(crate) fn profile_path(username: &Username) -> String {
    format!("/profile/{username}/")
}

/// Canonical detail path for a post.
pub(crate) fn post_detail_path(id: &PostId) -> String {
    format!("/posts/{id}/")
}

/// `?page=` query parameter shared by every paginated view.
///
/// Missing or unparsable values fall back to the first page; out-of-range
/// values are clamped later by the paginator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// The requested 1-based page number.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::PageQuery;
    use rstest::rstest;

    #[rstest]
    #[case(None, 1)]
    #[case(Some("3"), 3)]
    #[case(Some("0"), 0)]
    #[case(Some("two"), 1)]
    #[case(Some(""), 1)]
    fn page_parsing_falls_back_to_the_first_page(
        #[case] raw: Option<&str>,
        #[case] expected: usize,
    ) {
        let query = PageQuery {
            page: raw.map(str::to_owned),
        };
        assert_eq!(query.page(), expected);
    }
}
