use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A foreign server entry. The table name in the config file is the
/// server name and goes into DDL as-is, so it has to be a valid SQL
/// identifier. Option values end up as single-quoted literals, verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ForeignServer {
    /// Name of the foreign data wrapper extension, e.g. `postgres_fdw`.
    pub fdw_name: String,

    /// `OPTIONS (...)` for `CREATE SERVER`, rendered in configuration order.
    #[serde(default)]
    pub options: IndexMap<String, String>,

    /// `OPTIONS (...)` for `CREATE USER MAPPING`.
    #[serde(default)]
    pub user_mapping: IndexMap<String, String>,

    /// Schema import settings. Required by the `import-foreign-schema`
    /// operation for every configured server.
    pub import_foreign_schema: Option<ImportForeignSchema>,
}

/// Which remote schema to import, and into which local schema.
///
/// The local schema is dropped with `CASCADE` and recreated on every
/// import.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ImportForeignSchema {
    pub remote_schema: String,
    pub local_schema: String,
    pub options: Option<IndexMap<String, String>>,
}
