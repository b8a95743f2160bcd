pub mod controller;
pub mod routes;

pub use routes::metrics_routes;
