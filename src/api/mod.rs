pub mod error;
pub mod reply;
pub mod routes;
