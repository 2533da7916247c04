use std::sync::Mutex;
use std::time::Duration;

use log::{debug, error, info};
use rusqlite::params_from_iter;
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqliteValue};
use serde::Deserialize;

use crate::connection::Connection;
use crate::error::Result;
use crate::value::{Row, Value};

/// SQLite connection configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: String,
    /// Ignore `db_path` and open a private in-memory database
    pub in_memory: bool,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout_ms: Option<u64>,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            db_path: "Database.db".to_string(),
            in_memory: false,
            busy_timeout_ms: None,
        }
    }
}

impl SqliteConfig {
    /// Create a new SQLite config for a database file
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => SqliteValue::Null,
            Value::Integer(v) => SqliteValue::Integer(*v),
            Value::Real(v) => SqliteValue::Real(*v),
            Value::Text(v) => SqliteValue::Text(v.clone()),
            Value::Blob(v) => SqliteValue::Blob(v.clone()),
            Value::Boolean(v) => SqliteValue::Integer(i64::from(*v)),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

impl From<SqliteValue> for Value {
    fn from(v: SqliteValue) -> Self {
        match v {
            SqliteValue::Null => Value::Null,
            SqliteValue::Integer(i) => Value::Integer(i),
            SqliteValue::Real(f) => Value::Real(f),
            SqliteValue::Text(s) => Value::Text(s),
            SqliteValue::Blob(b) => Value::Blob(b),
        }
    }
}

/// A single SQLite connection. Statements are serialized through a lock, so
/// one connection can back a mapper shared between threads.
pub struct SqliteConnection {
    connection: Mutex<rusqlite::Connection>,
}

impl SqliteConnection {
    /// Open the database described by `config`.
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        let connection = if config.in_memory {
            info!("opening in-memory sqlite database");
            rusqlite::Connection::open_in_memory()?
        } else {
            info!("opening sqlite database at path: {}", config.db_path);
            rusqlite::Connection::open(&config.db_path)?
        };
        if let Some(ms) = config.busy_timeout_ms {
            connection.busy_timeout(Duration::from_millis(ms))?;
        }
        Ok(Self::from_connection(connection))
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&SqliteConfig::in_memory())
    }

    /// Wrap an already opened rusqlite connection.
    pub fn from_connection(connection: rusqlite::Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    /// Run one or more unparameterized statements, e.g. caller-owned DDL.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!("executing batch: {}", sql);
        let conn = self.connection.lock()?;
        conn.execute_batch(sql).map_err(|e| {
            error!("batch failed: {}", e);
            e.into()
        })
    }

    fn run_query(
        conn: &rusqlite::Connection,
        sql: &str,
        params: &[Value],
    ) -> rusqlite::Result<Vec<Row>> {
        let mut stmt = conn.prepare(sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut mapped = Row::new();
            for (i, name) in names.iter().enumerate() {
                let cell: SqliteValue = row.get(i)?;
                mapped.values.insert(name.clone(), Value::from(cell));
            }
            result.push(mapped);
        }
        Ok(result)
    }
}

impl Connection for SqliteConnection {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        debug!("executing: {} ({} params)", sql, params.len());
        let conn = self.connection.lock()?;
        let outcome = conn
            .prepare(sql)
            .and_then(|mut stmt| stmt.execute(params_from_iter(params.iter())));
        outcome.map_err(|e| {
            error!("statement failed: {}: {}", sql, e);
            e.into()
        })
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        debug!("querying: {} ({} params)", sql, params.len());
        let conn = self.connection.lock()?;
        Self::run_query(&conn, sql, params).map_err(|e| {
            error!("query failed: {}: {}", sql, e);
            e.into()
        })
    }
}
