//! HTTP adapter exposing the domain services as a JSON API.

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

#[cfg(test)]
mod tests;
