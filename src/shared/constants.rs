/// Default number of records returned by list endpoints
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum number of records a caller may request per page
pub const MAX_LIST_LIMIT: i64 = 100;
