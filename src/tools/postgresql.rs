//! PostgreSQL Tools
//!
//! Simulated tools for the `dvdrental` relational database.

use serde::Serialize;
use serde_json::Value;

use super::params::{display_value, passthrough};
use super::registry::{Params, RegisteredTool, ToolBuilder, ToolRegistry, ToolResult};
use crate::clock::{now_iso8601, now_millis};

pub const LIST_TABLES: &str = "postgresql_list_tables";
pub const DESCRIBE_TABLE: &str = "postgresql_describe_table";
pub const DB_STATS: &str = "postgresql_db_stats";
pub const EXPORT_QUERY: &str = "postgresql_export_query";

const TABLES: [&str; 15] = [
    "actor",
    "address",
    "category",
    "city",
    "country",
    "customer",
    "film",
    "film_actor",
    "film_category",
    "inventory",
    "language",
    "payment",
    "rental",
    "staff",
    "store",
];

// (name, type, nullable)
const CUSTOMER_COLUMNS: [(&str, &str, bool); 10] = [
    ("customer_id", "integer", false),
    ("store_id", "integer", false),
    ("first_name", "character varying", false),
    ("last_name", "character varying", false),
    ("email", "character varying", true),
    ("address_id", "integer", false),
    ("activebool", "boolean", false),
    ("create_date", "date", false),
    ("last_update", "timestamp without time zone", true),
    ("active", "integer", true),
];

/// Register PostgreSQL tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(list_tables_tool());
    registry.register_tool(describe_table_tool());
    registry.register_tool(db_stats_tool());
    registry.register_tool(export_query_tool());
}

// ============================================================================
// postgresql_list_tables
// ============================================================================

#[derive(Debug, Serialize)]
struct ListTablesResult {
    tables: Vec<&'static str>,
    count: usize,
}

fn list_tables_tool() -> RegisteredTool {
    ToolBuilder::new(LIST_TABLES)
        .description("List the tables of the dvdrental database")
        .build(list_tables_handler)
}

async fn list_tables_handler(_params: Params) -> ToolResult {
    let result = ListTablesResult {
        tables: TABLES.to_vec(),
        count: TABLES.len(),
    };
    Ok(serde_json::to_value(result)?)
}

// ============================================================================
// postgresql_describe_table
// ============================================================================

#[derive(Debug, Serialize)]
struct DescribeTableResult {
    table: Value,
    columns: Vec<ColumnDescription>,
    row_count: u64,
}

#[derive(Debug, Serialize)]
struct ColumnDescription {
    name: &'static str,
    #[serde(rename = "type")]
    column_type: &'static str,
    nullable: bool,
}

fn describe_table_tool() -> RegisteredTool {
    ToolBuilder::new(DESCRIBE_TABLE)
        .description("Describe the columns of a table (defaults to 'customer')")
        .build(describe_table_handler)
}

async fn describe_table_handler(params: Params) -> ToolResult {
    let columns = CUSTOMER_COLUMNS
        .iter()
        .map(|&(name, column_type, nullable)| ColumnDescription {
            name,
            column_type,
            nullable,
        })
        .collect();

    let result = DescribeTableResult {
        table: passthrough(&params, "table_name", "customer"),
        columns,
        row_count: 599,
    };
    Ok(serde_json::to_value(result)?)
}

// ============================================================================
// postgresql_db_stats
// ============================================================================

#[derive(Debug, Serialize)]
struct DbStatsResult {
    database: &'static str,
    size: &'static str,
    tables: usize,
    total_rows: u64,
    last_analyzed: String,
}

fn db_stats_tool() -> RegisteredTool {
    ToolBuilder::new(DB_STATS)
        .description("Size and row statistics for the dvdrental database")
        .build(db_stats_handler)
}

async fn db_stats_handler(_params: Params) -> ToolResult {
    let result = DbStatsResult {
        database: "dvdrental",
        size: "15.7 MB",
        tables: TABLES.len(),
        total_rows: 16044,
        last_analyzed: now_iso8601(),
    };
    Ok(serde_json::to_value(result)?)
}

// ============================================================================
// postgresql_export_query
// ============================================================================

#[derive(Debug, Serialize)]
struct ExportQueryResult {
    format: Value,
    filename: String,
    size: &'static str,
    status: &'static str,
}

fn export_query_tool() -> RegisteredTool {
    ToolBuilder::new(EXPORT_QUERY)
        .description("Export query results to a file (format defaults to 'csv')")
        .build(export_query_handler)
}

async fn export_query_handler(params: Params) -> ToolResult {
    let format = passthrough(&params, "format", "csv");
    let result = ExportQueryResult {
        filename: format!("backup_{}.{}", now_millis(), display_value(&format)),
        format,
        size: "2.4 MB",
        status: "completed",
    };
    Ok(serde_json::to_value(result)?)
}
