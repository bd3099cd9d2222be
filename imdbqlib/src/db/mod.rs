//! Database access: one connection, one statement at a time.
//!
//! This module handles the second stage of the pipeline - executing a
//! `PreparedQuery` and pulling back a bounded number of rows. It provides:
//!
//! - **Database**: A blocking session over a single Postgres connection
//! - **QueryRows**: Column names plus the fetched cells as text
//!
//! The session owns a current-thread Tokio runtime and drives every driver
//! call to completion with `block_on`, so callers see a plain synchronous
//! API. Dropping a `Database` closes its connection on every exit path;
//! `Database::close` does the same and reports errors from the shutdown.
//!
//! Rows are capped with `LIMIT` on the server and every column is cast to
//! text there, so only the rows that can be displayed cross the wire.

use futures_util::TryStreamExt;
use log::{debug, info, trace};
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection, Postgres};
use sqlx::query::Query;
use sqlx::{Column, Connection, Executor, Row};
use tokio::runtime::{Builder, Runtime};

use crate::config::{ConnectionConfig, HOST, PORT};
use crate::error::ImdbqError;
use crate::query::{Param, PreparedQuery};
use crate::Result;

/// Rows fetched for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRows {
    /// Result column names, in select order
    pub columns: Vec<String>,
    /// Cells as text, `None` for SQL NULL
    pub rows: Vec<Vec<Option<String>>>,
}

/// A blocking session over one Postgres connection.
pub struct Database {
    // dropped before the runtime it was opened on
    conn: PgConnection,
    target: String,
    runtime: Runtime,
}

impl Database {
    /// Open a connection with the given settings.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ImdbqError::DriverUnavailable(e.to_string()))?;

        let target = config.target();
        let mut options = PgConnectOptions::new()
            .host(HOST)
            .port(PORT)
            .username(&config.user)
            .database(&config.database);
        if !config.password.is_empty() {
            options = options.password(&config.password);
        }

        debug!("connecting to {} as '{}'", target, config.user);
        let conn = runtime
            .block_on(PgConnection::connect_with(&options))
            .map_err(|source| ImdbqError::ConnectionFailed {
                target: target.clone(),
                source,
            })?;

        Ok(Database {
            conn,
            target,
            runtime,
        })
    }

    /// Connection target this session is attached to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Run `query` and fetch at most `limit + 1` rows.
    ///
    /// Column names come from describing the statement, so they are known
    /// even when the query matches nothing. Cells are the server's text
    /// form of each value.
    pub fn fetch(&mut self, query: &PreparedQuery, limit: usize) -> Result<QueryRows> {
        let wanted = limit.saturating_add(1);
        debug!(
            "running {} with {} (fetching up to {} rows)",
            query.kind.label(),
            describe_params(&query.params),
            wanted
        );

        let conn = &mut self.conn;
        self.runtime.block_on(async move {
            let described = (&mut *conn)
                .describe(query.sql())
                .await
                .map_err(|source| query_failed(query, source))?;
            let columns: Vec<String> = described
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect();

            let sql = query.fetch_sql(columns.len());
            trace!("{}", sql);

            let mut rows = Vec::new();
            let mut stream = bind_params(sqlx::query(&sql), &query.params)
                .bind(row_limit(wanted))
                .fetch(&mut *conn);
            while let Some(row) = stream
                .try_next()
                .await
                .map_err(|source| query_failed(query, source))?
            {
                let cells = (0..row.len())
                    .map(|i| row.try_get::<Option<String>, _>(i))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|source| query_failed(query, source))?;
                trace!("row {}: {} cells", rows.len() + 1, cells.len());
                rows.push(cells);
            }
            drop(stream);

            debug!("{} returned {} row(s)", query.kind.label(), rows.len());
            Ok::<_, ImdbqError>(QueryRows { columns, rows })
        })
    }

    /// Count every row `query` would return.
    pub fn count(&mut self, query: &PreparedQuery) -> Result<u64> {
        let sql = query.count_sql();
        info!("counting all rows for {}", query.kind.label());

        let conn = &mut self.conn;
        let count: i64 = self.runtime.block_on(async {
            let row = bind_params(sqlx::query(&sql), &query.params)
                .fetch_one(&mut *conn)
                .await
                .map_err(|source| query_failed(query, source))?;
            row.try_get::<i64, _>(0)
                .map_err(|source| query_failed(query, source))
        })?;

        Ok(count.max(0) as u64)
    }

    /// Close the connection, reporting any error from the shutdown.
    pub fn close(self) -> Result<()> {
        let Database {
            conn,
            target,
            runtime,
        } = self;
        debug!("closing connection to {}", target);
        runtime
            .block_on(conn.close())
            .map_err(|source| ImdbqError::ConnectionFailed { target, source })
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [Param],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            Param::Int(value) => query.bind(*value),
            Param::Text(value) => query.bind(value.as_str()),
        };
    }
    query
}

/// `LIMIT` value for `wanted` rows; Postgres takes a signed 64-bit bound.
fn row_limit(wanted: usize) -> i64 {
    i64::try_from(wanted).unwrap_or(i64::MAX)
}

fn query_failed(query: &PreparedQuery, source: sqlx::Error) -> ImdbqError {
    ImdbqError::QueryFailed {
        query: query.kind.label().to_string(),
        source,
    }
}

fn describe_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
