pub mod user;

pub use user::{AuthFailure, User, UserRole};
