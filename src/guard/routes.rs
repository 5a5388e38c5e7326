//! Route table
//!
//! Maps paths to views and the guard protecting them.

use std::fmt;

use super::route_guard::{RouteGuard, Verdict};
use crate::session::{Role, Session};

pub const LOGIN_ROUTE: &str = "/login";
pub const ADMIN_LOGIN_ROUTE: &str = "/admin/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    AdminLogin,
    Dashboard,
    ReportIssue,
    Analytics,
    AdminDashboard,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Home => "home",
            View::Login => "login",
            View::AdminLogin => "admin login",
            View::Dashboard => "dashboard",
            View::ReportIssue => "report issue",
            View::Analytics => "analytics",
            View::AdminDashboard => "admin dashboard",
        };
        f.write_str(name)
    }
}

/// Outcome of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(View),
    Redirect(String),
    NotFound,
}

struct Route {
    path: &'static str,
    view: View,
    guard: Option<RouteGuard>,
}

pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        let user_only = || Some(RouteGuard::new(Role::User, LOGIN_ROUTE));
        let routes = vec![
            Route {
                path: "/",
                view: View::Home,
                guard: None,
            },
            Route {
                path: LOGIN_ROUTE,
                view: View::Login,
                guard: None,
            },
            Route {
                path: ADMIN_LOGIN_ROUTE,
                view: View::AdminLogin,
                guard: None,
            },
            Route {
                path: "/dashboard",
                view: View::Dashboard,
                guard: user_only(),
            },
            Route {
                path: "/report",
                view: View::ReportIssue,
                guard: user_only(),
            },
            Route {
                path: "/analytics",
                view: View::Analytics,
                guard: user_only(),
            },
            Route {
                path: "/admin",
                view: View::AdminDashboard,
                guard: Some(RouteGuard::new(Role::Admin, ADMIN_LOGIN_ROUTE)),
            },
        ];
        Self { routes }
    }

    /// Resolve `path` against the current session. Trailing slashes are ignored.
    pub fn navigate(&self, path: &str, session: &Session) -> Navigation {
        let Some(route) = self.find(path) else {
            return Navigation::NotFound;
        };

        match route.guard.as_ref().map(|guard| guard.check(session)) {
            None | Some(Verdict::Permit) => Navigation::Render(route.view),
            Some(Verdict::Deny { redirect }) => Navigation::Redirect(redirect),
        }
    }

    /// Guard protecting `path`, if any.
    pub fn guard_for(&self, path: &str) -> Option<&RouteGuard> {
        self.find(path).and_then(|route| route.guard.as_ref())
    }

    fn find(&self, path: &str) -> Option<&Route> {
        let normalized = match path.trim().trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        self.routes.iter().find(|route| route.path == normalized)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Identity;

    fn session_with(role: Role) -> Session {
        Session::authenticated(
            Identity {
                id: 1,
                display_name: "n".into(),
                email: "e@x".into(),
                role,
            },
            "tok",
        )
    }

    #[test]
    fn test_public_routes_render_for_anyone() {
        let table = RouteTable::new();
        let anon = Session::anonymous();
        assert_eq!(table.navigate("/", &anon), Navigation::Render(View::Home));
        assert_eq!(table.navigate("", &anon), Navigation::Render(View::Home));
        assert_eq!(
            table.navigate("/admin/login/", &anon),
            Navigation::Render(View::AdminLogin)
        );
    }

    #[test]
    fn test_admin_route_redirects_to_admin_login() {
        let table = RouteTable::new();
        assert_eq!(
            table.navigate("/admin", &session_with(Role::User)),
            Navigation::Redirect(ADMIN_LOGIN_ROUTE.into())
        );
        assert_eq!(
            table.navigate("/admin", &session_with(Role::Admin)),
            Navigation::Render(View::AdminDashboard)
        );
    }

    #[test]
    fn test_user_routes_redirect_anonymous_to_login() {
        let table = RouteTable::new();
        assert_eq!(
            table.navigate("/report", &Session::anonymous()),
            Navigation::Redirect(LOGIN_ROUTE.into())
        );
        assert_eq!(
            table.navigate("/dashboard", &session_with(Role::User)),
            Navigation::Render(View::Dashboard)
        );
    }

    #[test]
    fn test_unknown_path() {
        let table = RouteTable::new();
        assert_eq!(
            table.navigate("/nowhere", &session_with(Role::Admin)),
            Navigation::NotFound
        );
        assert!(table.guard_for("/").is_none());
        assert_eq!(table.guard_for("/admin").unwrap().required_role(), Role::Admin);
    }

    #[test]
    fn test_guard_lookup_ignores_trailing_slash() {
        let table = RouteTable::new();
        let admin = table.guard_for("/admin/").unwrap();
        assert!(admin.check(&session_with(Role::Admin)).is_permit());
        assert!(table.guard_for("/dashboard/").is_some());
        assert!(table.guard_for("/login/").is_none());
        assert!(table.guard_for("/nowhere").is_none());
    }
}
