pub mod events;
pub mod handlers;
pub mod manager;
pub mod routes;

pub use manager::{Channel, ConnectionManager};
