//! Navigation Guard
//!
//! Evaluated synchronously before a route renders. The router consumes the
//! `Result`: `Ok` renders the view, `Err` navigates to the returned path.

use super::oracle::SessionOracle;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Access rule attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Requires a session
    Protected,
    /// The login route; only for anonymous users
    LoginOnly,
    /// Anyone
    Public,
}

/// Render the requested route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proceed;

/// Navigate elsewhere instead of rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectTo {
    pub path: &'static str,
}

pub type GuardOutcome = Result<Proceed, RedirectTo>;

#[derive(Clone)]
pub struct NavigationGuard {
    oracle: SessionOracle,
}

impl NavigationGuard {
    pub fn new(oracle: SessionOracle) -> Self {
        Self { oracle }
    }

    /// Decide whether a route with the given access rule may render.
    pub fn evaluate(&self, access: RouteAccess) -> GuardOutcome {
        check(access, self.oracle.is_authenticated())
    }
}

/// The gating table, independent of where the session comes from
pub fn check(access: RouteAccess, authenticated: bool) -> GuardOutcome {
    match (access, authenticated) {
        (RouteAccess::Protected, false) => Err(RedirectTo { path: LOGIN_PATH }),
        (RouteAccess::LoginOnly, true) => Err(RedirectTo { path: HOME_PATH }),
        _ => Ok(Proceed),
    }
}
