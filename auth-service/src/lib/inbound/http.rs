pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod router;
