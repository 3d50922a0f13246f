pub mod router;
pub mod routes;

pub use router::{MiniAppState, mini_app_router};
