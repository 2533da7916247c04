//! The mapping engine: turns records into INSERT statements and rows back
//! into records.

use crate::config::OrmConfig;
use crate::connection::Connection;
use crate::error::{OrmError, Result};
use crate::key::{AtomicKeyGenerator, KeyGenerator};
use crate::record::{extract, FieldDescriptor, FieldMetadata, Record};
use crate::sqlite::SqliteConnection;
use crate::value::{FieldType, Row, Value};

/// `INSERT INTO <table> (<pk>,<col1>,...) VALUES (?,?,...);`
///
/// Columns follow declaration order, primary key first.
pub fn insert_sql<R: Record>() -> Result<String> {
    let meta = extract::<R>()?;
    Ok(build_insert(R::table_name(), &meta))
}

/// `SELECT * FROM <table> WHERE <pk> = ?;`
pub fn select_sql<R: Record>() -> Result<String> {
    let meta = extract::<R>()?;
    Ok(build_select(R::table_name(), &meta))
}

fn build_insert<R: 'static>(table: &str, meta: &FieldMetadata<R>) -> String {
    let columns = meta.column_names();
    let placeholders = vec!["?"; columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        columns.join(","),
        placeholders.join(",")
    )
}

fn build_select<R: 'static>(table: &str, meta: &FieldMetadata<R>) -> String {
    format!(
        "SELECT * FROM {} WHERE {} = ?;",
        table,
        meta.primary_key.column_name()
    )
}

fn unsupported<R>(field: &FieldDescriptor<R>) -> OrmError {
    OrmError::UnsupportedType {
        field: field.name,
        field_type: field.field_type,
    }
}

fn check_primary_key<R>(field: &FieldDescriptor<R>) -> Result<()> {
    match field.field_type {
        FieldType::Int64 => Ok(()),
        _ => Err(unsupported(field)),
    }
}

/// Read a column field for binding. Only 32-bit integers and text bind.
fn bind_column<R>(field: &FieldDescriptor<R>, record: &R) -> Result<Value> {
    match field.field_type {
        FieldType::Int32 | FieldType::Text => Ok((field.get)(record)),
        _ => Err(unsupported(field)),
    }
}

/// Cell `column` of `row`. A missing column means the table does not match
/// the record, reported the same way the driver reports it on insert.
fn cell<'a>(table: &str, row: &'a Row, column: &str) -> Result<&'a Value> {
    row.values.get(column).ok_or_else(|| {
        OrmError::persistence(format!("table {} has no column named {}", table, column))
    })
}

/// Copy one named cell of `row` into the matching field of `record`.
///
/// A NULL cell leaves the field at its zero value.
fn load_column<R>(
    table: &str,
    field: &FieldDescriptor<R>,
    row: &Row,
    record: &mut R,
) -> Result<()> {
    match field.field_type {
        FieldType::Int32 | FieldType::Text => {}
        _ => return Err(unsupported(field)),
    }
    match cell(table, row, field.column_name())? {
        Value::Null => Ok(()),
        value => (field.set)(record, value.clone()),
    }
}

/// Maps records onto one connection, assigning primary keys from `K`.
///
/// The mapper holds no per-record state; the key generator is the only
/// thing that changes between calls.
pub struct Mapper<C, K = AtomicKeyGenerator> {
    connection: C,
    keys: K,
}

impl<C: Connection> Mapper<C> {
    /// Mapper with a fresh counter; the first written row gets key 1.
    pub fn new(connection: C) -> Self {
        Self::with_key_generator(connection, AtomicKeyGenerator::new())
    }
}

impl Mapper<SqliteConnection> {
    /// Open the configured SQLite database and seed the key counter.
    pub fn from_config(config: &OrmConfig) -> Result<Self> {
        let connection = SqliteConnection::open(&config.sqlite)?;
        Ok(Self::with_key_generator(
            connection,
            AtomicKeyGenerator::starting_at(config.keys.start),
        ))
    }
}

impl<C: Connection, K: KeyGenerator> Mapper<C, K> {
    pub fn with_key_generator(connection: C, keys: K) -> Self {
        Self { connection, keys }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn key_generator(&self) -> &K {
        &self.keys
    }

    /// Insert `record` as a new row and return the key it was stored under.
    ///
    /// The in-memory primary key of `record` is not read and not updated.
    /// A key is consumed even when the insert itself fails.
    pub fn write<R: Record>(&self, record: &R) -> Result<i64> {
        let meta = extract::<R>()?;
        check_primary_key(meta.primary_key)?;

        let values = meta
            .columns
            .iter()
            .map(|field| bind_column(field, record))
            .collect::<Result<Vec<_>>>()?;
        let sql = build_insert(R::table_name(), &meta);

        let key = self.keys.next_key()?;
        let mut params = Vec::with_capacity(values.len() + 1);
        params.push(Value::Integer(key));
        params.extend(values);
        self.connection.execute(&sql, &params)?;
        Ok(key)
    }

    /// Rebuild the record of type `R` stored under `key`.
    pub fn read<R: Record>(&self, key: i64) -> Result<R> {
        let meta = extract::<R>()?;
        check_primary_key(meta.primary_key)?;

        let sql = build_select(R::table_name(), &meta);
        let rows = self.connection.query(&sql, &[Value::Integer(key)])?;
        let row = rows.first().ok_or(OrmError::NotFound {
            table: R::table_name(),
            key,
        })?;

        let table = R::table_name();
        let mut record = R::default();
        let pk = meta.primary_key;
        let stored_key = i64::try_from(cell(table, row, pk.column_name())?.clone())?;
        (pk.set)(&mut record, Value::Integer(stored_key))?;
        for field in &meta.columns {
            load_column(table, field, row, &mut record)?;
        }
        Ok(record)
    }
}
