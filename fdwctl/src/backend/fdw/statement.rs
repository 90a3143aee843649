//! DDL statement generation for foreign server provisioning.

use indexmap::IndexMap;

use fdwctl_config::{ForeignServer, ImportForeignSchema};

/// Render an OPTIONS list: `key 'value'` pairs in configuration order.
///
/// Values go in as single-quoted literals, verbatim. Nothing is escaped;
/// the configuration is trusted input.
fn options_list(options: &IndexMap<String, String>) -> String {
    options
        .iter()
        .map(|(option, value)| format!("{} '{}'", option, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// CREATE SERVER statement for a configured foreign server.
pub fn create_server(name: &str, server: &ForeignServer) -> String {
    format!(
        "CREATE SERVER IF NOT EXISTS {} FOREIGN DATA WRAPPER {} OPTIONS ({})",
        name,
        server.fdw_name,
        options_list(&server.options)
    )
}

/// CREATE USER MAPPING statement binding CURRENT_USER to a foreign server.
pub fn create_user_mapping(name: &str, server: &ForeignServer) -> String {
    format!(
        "CREATE USER MAPPING IF NOT EXISTS FOR CURRENT_USER SERVER {} OPTIONS ({})",
        name,
        options_list(&server.user_mapping)
    )
}

/// Drop and recreate the local schema the import targets. Destructive:
/// everything in the existing local schema goes with it.
pub fn recreate_local_schema(import: &ImportForeignSchema) -> String {
    format!(
        "DROP SCHEMA IF EXISTS {} CASCADE; CREATE SCHEMA IF NOT EXISTS {}",
        import.local_schema, import.local_schema
    )
}

/// IMPORT FOREIGN SCHEMA statement.
pub fn import_foreign_schema(name: &str, import: &ImportForeignSchema) -> String {
    let mut sql = format!(
        "IMPORT FOREIGN SCHEMA \"{}\" FROM SERVER {} INTO {} ",
        import.remote_schema, name, import.local_schema
    );

    if let Some(options) = &import.options {
        // TODO: OPTIONS($...) is not accepted by stock Postgres; check what
        // the deployed wrapper expects before touching the prefix.
        sql.push_str(&format!("OPTIONS(${})", options_list(options)));
    }

    sql
}
