pub mod app;
pub mod page;
pub mod routes;

pub use app::*;
pub use routes::*;
