//! MongoDB Tools
//!
//! Simulated tools for the document database.

use serde::Serialize;
use serde_json::{json, Value};

use super::params::{display_value, passthrough};
use super::registry::{Params, RegisteredTool, ToolBuilder, ToolRegistry, ToolResult};
use crate::clock::{now_iso8601, now_millis};

pub const LIST_COLLECTIONS: &str = "mongodb_list_collections";
pub const COLLECTION_SCHEMA: &str = "mongodb_collection_schema";
pub const DB_STATS: &str = "mongodb_db_stats";
pub const EXPORT_COLLECTION: &str = "mongodb_export_collection";

const DEFAULT_DATABASE: &str = "default";
const DEFAULT_COLLECTION: &str = "users";
const DOCUMENT_COUNT: u64 = 1247;

const COLLECTIONS: [&str; 8] = [
    "users",
    "products",
    "orders",
    "categories",
    "reviews",
    "analytics",
    "logs",
    "settings",
];

/// Register MongoDB tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(list_collections_tool());
    registry.register_tool(collection_schema_tool());
    registry.register_tool(db_stats_tool());
    registry.register_tool(export_collection_tool());
}

// ============================================================================
// mongodb_list_collections
// ============================================================================

#[derive(Debug, Serialize)]
struct ListCollectionsResult {
    database: Value,
    collections: Vec<&'static str>,
    count: usize,
}

fn list_collections_tool() -> RegisteredTool {
    ToolBuilder::new(LIST_COLLECTIONS)
        .description("List the collections of a database (defaults to 'default')")
        .build(list_collections_handler)
}

async fn list_collections_handler(params: Params) -> ToolResult {
    let result = ListCollectionsResult {
        database: passthrough(&params, "database", DEFAULT_DATABASE),
        collections: COLLECTIONS.to_vec(),
        count: COLLECTIONS.len(),
    };
    Ok(serde_json::to_value(result)?)
}

// ============================================================================
// mongodb_collection_schema
// ============================================================================

#[derive(Debug, Serialize)]
struct CollectionSchemaResult {
    collection: Value,
    database: Value,
    document_count: u64,
    indexes: Vec<IndexDescription>,
    sample_document: Value,
}

#[derive(Debug, Serialize)]
struct IndexDescription {
    name: &'static str,
    keys: Value,
    unique: bool,
}

fn collection_schema_tool() -> RegisteredTool {
    ToolBuilder::new(COLLECTION_SCHEMA)
        .description("Indexes and a sample document of a collection (defaults to 'users')")
        .build(collection_schema_handler)
}

async fn collection_schema_handler(params: Params) -> ToolResult {
    let result = CollectionSchemaResult {
        collection: passthrough(&params, "collection", DEFAULT_COLLECTION),
        database: passthrough(&params, "database", DEFAULT_DATABASE),
        document_count: DOCUMENT_COUNT,
        indexes: vec![
            IndexDescription {
                name: "_id_",
                keys: json!({"_id": 1}),
                unique: true,
            },
            IndexDescription {
                name: "email_1",
                keys: json!({"email": 1}),
                unique: true,
            },
        ],
        sample_document: json!({
            "_id": "ObjectId(\"...\")",
            "email": "user@example.com",
            "name": "John Doe",
            "created_at": now_iso8601(),
        }),
    };
    Ok(serde_json::to_value(result)?)
}

// ============================================================================
// mongodb_db_stats
// ============================================================================

#[derive(Debug, Serialize)]
struct DbStatsResult {
    database: &'static str,
    collections: usize,
    indexes: u32,
    storage_size: &'static str,
    data_size: &'static str,
    last_backup: String,
}

fn db_stats_tool() -> RegisteredTool {
    ToolBuilder::new(DB_STATS)
        .description("Storage statistics for the default database")
        .build(db_stats_handler)
}

async fn db_stats_handler(_params: Params) -> ToolResult {
    let result = DbStatsResult {
        database: DEFAULT_DATABASE,
        collections: COLLECTIONS.len(),
        indexes: 24,
        storage_size: "512 MB",
        data_size: "256 MB",
        last_backup: now_iso8601(),
    };
    Ok(serde_json::to_value(result)?)
}

// ============================================================================
// mongodb_export_collection
// ============================================================================

#[derive(Debug, Serialize)]
struct ExportCollectionResult {
    collection: Value,
    format: Value,
    filename: String,
    document_count: u64,
    status: &'static str,
}

fn export_collection_tool() -> RegisteredTool {
    ToolBuilder::new(EXPORT_COLLECTION)
        .description("Export a collection to a file (format defaults to 'json')")
        .build(export_collection_handler)
}

async fn export_collection_handler(params: Params) -> ToolResult {
    let collection = passthrough(&params, "collection", DEFAULT_COLLECTION);
    let format = passthrough(&params, "format", "json");
    let result = ExportCollectionResult {
        filename: format!(
            "export_{}_{}.{}",
            display_value(&collection),
            now_millis(),
            display_value(&format)
        ),
        collection,
        format,
        document_count: DOCUMENT_COUNT,
        status: "completed",
    };
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[tokio::test]
    async fn list_collections_defaults_database() {
        let result = list_collections_handler(Params::new()).await.unwrap();
        assert_eq!(result["database"], "default");
        assert_eq!(result["count"], 8);
        assert_eq!(result["collections"].as_array().unwrap().len(), 8);
        assert_eq!(keys(&result), vec!["collections", "count", "database"]);
    }

    #[tokio::test]
    async fn list_collections_passes_database_through() {
        let result = list_collections_handler(object(json!({"database": "shop"})))
            .await
            .unwrap();
        assert_eq!(result["database"], "shop");
    }

    #[tokio::test]
    async fn collection_schema_has_fixed_shape() {
        let result = collection_schema_handler(object(json!({"collection": "orders"})))
            .await
            .unwrap();
        assert_eq!(result["collection"], "orders");
        assert_eq!(result["database"], "default");
        assert_eq!(result["document_count"], 1247);
        assert_eq!(
            result["indexes"][1],
            json!({"name": "email_1", "keys": {"email": 1}, "unique": true})
        );
        assert_eq!(result["sample_document"]["name"], "John Doe");
        assert_eq!(
            keys(&result),
            vec!["collection", "database", "document_count", "indexes", "sample_document"]
        );
    }

    #[tokio::test]
    async fn db_stats_has_fixed_schema() {
        let result = db_stats_handler(Params::new()).await.unwrap();
        assert_eq!(result["collections"], 8);
        assert_eq!(result["indexes"], 24);
        assert_eq!(
            keys(&result),
            vec!["collections", "data_size", "database", "indexes", "last_backup", "storage_size"]
        );
    }

    #[tokio::test]
    async fn export_collection_uses_params() {
        let result =
            export_collection_handler(object(json!({"collection": "orders", "format": "csv"})))
                .await
                .unwrap();
        assert_eq!(result["collection"], "orders");
        assert_eq!(result["format"], "csv");
        assert_eq!(result["status"], "completed");
        let filename = result["filename"].as_str().unwrap();
        assert!(filename.starts_with("export_orders_"));
        assert!(filename.ends_with(".csv"));
    }

    #[tokio::test]
    async fn export_collection_defaults() {
        let result = export_collection_handler(Params::new()).await.unwrap();
        assert_eq!(result["collection"], "users");
        assert_eq!(result["format"], "json");
    }

    #[tokio::test]
    async fn export_collection_renders_non_string_params_into_filename() {
        let result =
            export_collection_handler(object(json!({"collection": ["a", "b"], "format": 2})))
                .await
                .unwrap();
        assert_eq!(result["collection"], json!(["a", "b"]));
        assert_eq!(result["format"], 2);
        let filename = result["filename"].as_str().unwrap();
        assert!(filename.starts_with("export_a,b_"));
        assert!(filename.ends_with(".2"));
    }

    #[tokio::test]
    async fn list_collections_ignores_unrelated_params() {
        let result = list_collections_handler(object(json!({"format": 1, "database": 0})))
            .await
            .unwrap();
        assert_eq!(result["database"], "default");
        assert_eq!(result["count"], 8);
    }
}
