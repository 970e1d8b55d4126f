pub mod audit_log;

pub use audit_log::{
    AuditLog, ACTION_CREATE, ACTION_INITIALIZE, ACTION_LOGIN, ACTION_UPDATE,
};
