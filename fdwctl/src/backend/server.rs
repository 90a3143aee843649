//! Control connection to the database.

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};
use tracing::error;

use super::error::{Error, ExecutionError};

/// Statement execution capability the FDW manager runs against.
///
/// Transaction demarcation follows driver conventions: a transaction is
/// opened implicitly by the first `execute` and closed by `commit` or
/// `rollback`.
#[async_trait]
pub trait Executor {
    async fn execute(&mut self, sql: &str) -> Result<(), Error>;
    async fn commit(&mut self) -> Result<(), Error>;
    async fn rollback(&mut self) -> Result<(), Error>;
}

/// Server connection over tokio-postgres.
pub struct Server {
    client: Client,
    in_transaction: bool,
}

impl Server {
    /// Connect using keyword/value parameters or a connection URL.
    pub async fn connect(params: &str) -> Result<Self, Error> {
        let (client, connection) = tokio_postgres::connect(params, NoTls).await?;

        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!("connection error: {}", err);
            }
        });

        Ok(Self {
            client,
            in_transaction: false,
        })
    }

    /// Run statements through the simple query protocol, so multi-statement
    /// strings execute as written.
    async fn batch(&mut self, sql: &str) -> Result<(), Error> {
        self.client
            .batch_execute(sql)
            .await
            .map_err(|err| execution_error(err, sql))
    }
}

fn execution_error(err: tokio_postgres::Error, statement: &str) -> Error {
    match err.as_db_error() {
        Some(db) => Error::Execution(ExecutionError {
            code: db.code().code().to_string(),
            message: db.message().to_string(),
            statement: statement.to_string(),
        }),
        None => Error::Postgres(err),
    }
}

#[async_trait]
impl Executor for Server {
    async fn execute(&mut self, sql: &str) -> Result<(), Error> {
        if !self.in_transaction {
            self.batch("BEGIN").await?;
            self.in_transaction = true;
        }

        self.batch(sql).await
    }

    async fn commit(&mut self) -> Result<(), Error> {
        if self.in_transaction {
            self.batch("COMMIT").await?;
            self.in_transaction = false;
        }

        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), Error> {
        if self.in_transaction {
            self.batch("ROLLBACK").await?;
            self.in_transaction = false;
        }

        Ok(())
    }
}

/// Prints statements instead of executing them.
#[derive(Debug, Default)]
pub struct DryRun;

#[async_trait]
impl Executor for DryRun {
    #[allow(clippy::print_stdout)]
    async fn execute(&mut self, sql: &str) -> Result<(), Error> {
        println!("{}", sql);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), Error> {
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
