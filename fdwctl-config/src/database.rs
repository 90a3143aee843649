use serde::{Deserialize, Serialize};

/// Control connection settings. This is the database fdwctl connects to
/// and runs DDL against, not one of the foreign servers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Database {
    /// _Default:_ `127.0.0.1`
    #[serde(default = "Database::host")]
    pub host: String,

    /// _Default:_ `5432`
    #[serde(default = "Database::port")]
    pub port: u16,

    /// Database name. _Default:_ `postgres`
    #[serde(default = "Database::name")]
    pub name: String,

    /// _Default:_ `postgres`
    #[serde(default = "Database::user")]
    pub user: String,

    pub password: Option<String>,
}

impl Database {
    fn host() -> String {
        "127.0.0.1".into()
    }

    fn port() -> u16 {
        5432
    }

    fn name() -> String {
        "postgres".into()
    }

    fn user() -> String {
        "postgres".into()
    }

    /// Keyword/value connection parameters for the driver.
    pub fn params(&self) -> String {
        let mut params = format!(
            "host={} port={} user={} dbname={}",
            self.host, self.port, self.user, self.name
        );

        if let Some(password) = &self.password {
            params.push_str(&format!(" password={}", password));
        }

        params
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            host: Self::host(),
            port: Self::port(),
            name: Self::name(),
            user: Self::user(),
            password: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params() {
        let database = Database::default();
        assert_eq!(
            database.params(),
            "host=127.0.0.1 port=5432 user=postgres dbname=postgres"
        );

        let database = Database {
            password: Some("hunter2".into()),
            ..Database::default()
        };
        assert!(database.params().ends_with(" password=hunter2"));
    }
}
