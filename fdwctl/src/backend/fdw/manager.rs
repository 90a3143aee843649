//! Foreign server provisioning against a live connection.

use indexmap::IndexMap;
use tracing::{error, info};

use fdwctl_config::{Config, ForeignServer};

use super::statement;
use crate::backend::{Error, Executor};

/// Runs the provisioning operations over the configured foreign servers.
///
/// Servers are processed in configuration order and each server's DDL is
/// committed on its own, so a database error leaves earlier servers
/// provisioned, rolls back the failing statement, and skips the rest of
/// the current operation. Operations are independent: a failed
/// `init_servers` doesn't stop a later `create_user_mappings` call.
pub struct FdwManager<E: Executor> {
    config: Config,
    executor: E,
}

impl<E: Executor> FdwManager<E> {
    pub fn new(config: Config, executor: E) -> Self {
        Self { config, executor }
    }

    /// Configured foreign servers, in configuration order.
    pub fn servers(&self) -> &IndexMap<String, ForeignServer> {
        &self.config.servers
    }

    /// CREATE SERVER for every configured foreign server.
    pub async fn init_servers(&mut self) -> Result<(), Error> {
        for (name, server) in &self.config.servers {
            let sql = statement::create_server(name, server);
            Self::run_all(&mut self.executor, &[sql]).await?;
        }

        Ok(())
    }

    /// CREATE USER MAPPING for CURRENT_USER on every configured foreign
    /// server. The servers have to exist already.
    pub async fn create_user_mappings(&mut self) -> Result<(), Error> {
        for (name, server) in &self.config.servers {
            let sql = statement::create_user_mapping(name, server);
            Self::run_all(&mut self.executor, &[sql]).await?;
        }

        Ok(())
    }

    /// Recreate each server's local schema and import the remote schema
    /// into it. Every configured server must carry an
    /// `import_foreign_schema` section.
    pub async fn import_foreign_schema(&mut self) -> Result<(), Error> {
        for (name, server) in &self.config.servers {
            let import = server
                .import_foreign_schema
                .as_ref()
                .ok_or_else(|| Error::MissingImportForeignSchema(name.clone()))?;

            let statements = [
                statement::recreate_local_schema(import),
                statement::import_foreign_schema(name, import),
            ];

            Self::run_all(&mut self.executor, &statements).await?;
        }

        Ok(())
    }

    /// Execute statements in order and commit them together. Each
    /// statement is logged before execution. A database error rolls the
    /// transaction back and ends the current operation.
    async fn run_all(executor: &mut E, statements: &[String]) -> Result<(), Error> {
        let mut result = Ok(());
        let mut last = "";

        for sql in statements {
            last = sql;
            info!("{}", sql);
            result = executor.execute(sql).await;

            if result.is_err() {
                break;
            }
        }

        if result.is_ok() {
            result = executor
                .commit()
                .await
                .map_err(|err| err.with_statement(last));
        }

        if let Err(err) = result {
            if let Err(rollback) = executor.rollback().await {
                error!("rollback failed: {}", rollback);
            }

            return Err(err);
        }

        Ok(())
    }
}
