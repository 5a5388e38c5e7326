//! Navigation guarding
//!
//! Role checks for protected views and the application's route table.

pub mod route_guard;
pub mod routes;

pub use route_guard::{RouteGuard, Verdict, check_access};
pub use routes::{ADMIN_LOGIN_ROUTE, LOGIN_ROUTE, Navigation, RouteTable, View};
