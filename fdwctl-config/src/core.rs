use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::PathBuf;
use tracing::info;

use super::database::Database;
use super::error::Error;
use super::fdw::ForeignServer;

/// Configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Control connection.
    #[serde(default)]
    pub database: Database,

    /// Foreign servers, keyed by server name, in file order.
    #[serde(default)]
    pub servers: IndexMap<String, ForeignServer>,
}

impl Config {
    /// Load configuration from disk.
    ///
    /// A missing or unreadable file is an error. This tool drops and
    /// recreates schemas, so running against defaults is never intended.
    pub fn load(config_path: &PathBuf) -> Result<Self, Error> {
        let source = read_to_string(config_path)
            .map_err(|err| Error::Io(config_path.to_owned(), err))?;

        let config: Config = toml::from_str(&source)
            .map_err(|err| Error::Parse(config_path.to_owned(), err))?;

        info!("loaded \"{}\"", config_path.display());

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load(source: &str) -> Result<Config, Error> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(source.as_bytes()).unwrap();
        Config::load(&file.path().to_path_buf())
    }

    #[test]
    fn test_load() {
        let config = load(
            r#"
            [database]
            host = "10.0.0.1"
            user = "admin"

            [servers.myserver]
            fdw_name = "postgres_fdw"

            [servers.myserver.options]
            host = "db1"
            port = "5432"

            [servers.myserver.user_mapping]
            user = "alice"

            [servers.myserver.import_foreign_schema]
            remote_schema = "public"
            local_schema = "ext_public"

            [servers.other]
            fdw_name = "mysql_fdw"
        "#,
        )
        .unwrap();

        assert_eq!(config.database.host, "10.0.0.1");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.servers.len(), 2);

        let keys: Vec<_> = config.servers.keys().collect();
        assert_eq!(keys, ["myserver", "other"]);

        let myserver = &config.servers["myserver"];
        assert_eq!(myserver.fdw_name, "postgres_fdw");
        assert_eq!(
            myserver.options.iter().collect::<Vec<_>>(),
            [
                (&"host".to_string(), &"db1".to_string()),
                (&"port".to_string(), &"5432".to_string()),
            ]
        );

        let import = myserver.import_foreign_schema.as_ref().unwrap();
        assert_eq!(import.remote_schema, "public");
        assert_eq!(import.local_schema, "ext_public");
        assert!(import.options.is_none());

        assert!(config.servers["other"].import_foreign_schema.is_none());
    }

    #[test]
    fn test_no_servers() {
        let config = load("").unwrap();
        assert!(config.servers.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(&PathBuf::from("/does/not/exist/fdwctl.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_, _)));
    }

    #[test]
    fn test_malformed() {
        let err = load("servers = 5").unwrap_err();
        assert!(matches!(err, Error::Parse(_, _)));
    }

    #[test]
    fn test_unknown_fields() {
        let err = load(
            r#"
            [servers.myserver]
            fdw_name = "postgres_fdw"
            unknown = "field"
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_, _)));
    }
}
