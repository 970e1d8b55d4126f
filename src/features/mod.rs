pub mod admin;
pub mod audit;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod feedback;
pub mod realtime;
