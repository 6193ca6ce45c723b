//! Shared constants for end-to-end tests

// ============================================================================
// Server lifecycle
// ============================================================================

/// Maximum time to wait for a spawned test server to answer `/health`
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Delay between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Timeout applied to every request made by `TestClient`
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Tool names
// ============================================================================

pub const PG_LIST_TABLES: &str = "postgresql_list_tables";
pub const PG_DESCRIBE_TABLE: &str = "postgresql_describe_table";
pub const PG_DB_STATS: &str = "postgresql_db_stats";
pub const PG_EXPORT_QUERY: &str = "postgresql_export_query";

pub const MDB_LIST_COLLECTIONS: &str = "mongodb_list_collections";
pub const MDB_COLLECTION_SCHEMA: &str = "mongodb_collection_schema";
pub const MDB_DB_STATS: &str = "mongodb_db_stats";
pub const MDB_EXPORT_COLLECTION: &str = "mongodb_export_collection";

/// Error text of a request missing `method` or `params`
pub const MISSING_METHOD_OR_PARAMS: &str = "Missing method or params in request";
