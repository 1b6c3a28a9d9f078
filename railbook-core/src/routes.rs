//! Client-visible page routes.
//!
//! A static, ordered table consumed by whatever renders pages. Matching is
//! exact on normalized paths; a `*` pattern catches everything else. The
//! `requires_auth` flag is carried but not enforced until a login page exists.

use serde::Serialize;

use crate::error::CoreError;

/// Suffix appended to every page title.
pub const SITE_NAME: &str = "火车订票系统";

/// Pattern that matches any path.
pub const CATCH_ALL: &str = "*";

/// Redirect hops followed before resolution gives up.
pub const MAX_REDIRECTS: usize = 8;

/// A page route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Exact path, or [`CATCH_ALL`].
    pub pattern: &'static str,
    /// Identifier of the view to render.
    pub view: &'static str,
    /// Page title.
    pub title: &'static str,
    /// Whether the page needs a session token.
    pub requires_auth: bool,
}

/// A path that forwards to another path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// Exact source path.
    pub from: &'static str,
    /// Destination path.
    pub to: &'static str,
}

/// Ordered route and redirect records.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    redirects: &'static [Redirect],
    routes: &'static [Route],
}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Matched route.
    pub route: &'a Route,
    /// Number of redirects followed.
    pub redirects: usize,
}

/// The booking front end's routes.
pub static ROUTES: RouteTable = RouteTable::new(
    &[
        Redirect { from: "/", to: "/booking/passengers" },
        Redirect { from: "/booking", to: "/booking/passengers" },
    ],
    &[
        Route { pattern: "/test", view: "Test", title: "测试页面", requires_auth: false },
        Route {
            pattern: "/booking/passengers",
            view: "PassengerList",
            title: "乘客管理",
            requires_auth: true,
        },
        Route { pattern: CATCH_ALL, view: "NotFound", title: "页面未找到", requires_auth: false },
    ],
);

impl RouteTable {
    /// Builds a table; earlier routes win.
    #[must_use]
    pub const fn new(redirects: &'static [Redirect], routes: &'static [Route]) -> Self {
        Self { redirects, routes }
    }

    /// Routes in match order.
    #[must_use]
    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }

    /// Redirect records.
    #[must_use]
    pub fn redirects(&self) -> &'static [Redirect] {
        self.redirects
    }

    /// Resolves `path`, following redirects.
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    ///
    /// # Errors
    /// Returns [`CoreError::RedirectLoop`] if redirects do not settle, or
    /// [`CoreError::NoRoute`] if nothing matches and there is no catch-all.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'static>, CoreError> {
        let mut current = normalize(path);
        let mut hops = 0;
        while let Some(redirect) = self.redirects.iter().find(|r| r.from == current) {
            hops += 1;
            if hops > MAX_REDIRECTS {
                return Err(CoreError::RedirectLoop { path: path.to_owned(), hops: MAX_REDIRECTS });
            }
            current = normalize(redirect.to);
        }

        self.routes
            .iter()
            .find(|r| r.pattern == current)
            .or_else(|| self.routes.iter().find(|r| r.pattern == CATCH_ALL))
            .map(|route| Resolved { route, redirects: hops })
            .ok_or_else(|| CoreError::NoRoute { path: path.to_owned() })
    }
}

impl Route {
    /// Browser title for this page.
    #[must_use]
    pub fn document_title(&self) -> String {
        format!("{} - {SITE_NAME}", self.title)
    }
}

fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
