//! Navigation Guard
//!
//! Route table of the client and the check run before every transition.

use serde::Serialize;
use tracing::debug;

use crate::session::SessionStore;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Login/register pages that a signed-in user should not see
    pub hide_for_auth: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

impl Route {
    const fn new(path: &'static str, name: &'static str, requires_auth: bool, hide_for_auth: bool) -> Self {
        Self {
            path,
            name,
            meta: RouteMeta { requires_auth, hide_for_auth },
        }
    }

    /// Segment-wise match; `:name` segments match any single segment
    pub fn matches(&self, path: &str) -> bool {
        let pattern = self.path.split('/').filter(|s| !s.is_empty());
        let mut target = path.split('/').filter(|s| !s.is_empty());

        for expected in pattern {
            match target.next() {
                Some(actual) if expected.starts_with(':') || expected == actual => {}
                _ => return false,
            }
        }
        target.next().is_none()
    }
}

pub const ROUTES: &[Route] = &[
    Route::new("/", "home", false, false),
    Route::new("/about", "about", false, false),
    Route::new("/login", "login", false, true),
    Route::new("/register", "register", false, true),
    Route::new("/dashboard", "dashboard", true, false),
    Route::new("/new-trip", "new-trip", true, false),
    Route::new("/edit-trip/:id", "edit-trip", true, false),
];

/// Result of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    Proceed,
    RedirectToLogin,
    RedirectToHome,
}

impl Navigation {
    /// Where the client ends up; `None` keeps the requested target
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Navigation::Proceed => None,
            Navigation::RedirectToLogin => Some(LOGIN_PATH),
            Navigation::RedirectToHome => Some(HOME_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationGuard {
    routes: &'static [Route],
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(ROUTES)
    }
}

impl NavigationGuard {
    pub fn new(routes: &'static [Route]) -> Self {
        Self { routes }
    }

    /// Route matching `target`, ignoring query and fragment
    pub fn resolve(&self, target: &str) -> Option<&Route> {
        let path = target
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Decide a transition to `target`
    pub async fn before_each(&self, target: &str, store: &SessionStore) -> Navigation {
        // Token restored but profile not loaded yet
        if store.snapshot().needs_hydration() {
            store.check_token_validity().await;
        }

        let meta = self.resolve(target).map(|route| route.meta).unwrap_or_default();
        let decision = decide(meta, store.is_authenticated());
        debug!("Navigation to {} -> {:?}", target, decision);
        decision
    }
}

fn decide(meta: RouteMeta, authenticated: bool) -> Navigation {
    if meta.requires_auth && !authenticated {
        Navigation::RedirectToLogin
    } else if meta.hide_for_auth && authenticated {
        Navigation::RedirectToHome
    } else {
        Navigation::Proceed
    }
}
