//! Record-to-table mapping over SQLite for the Runar ecosystem.
//!
//! # Intention
//!
//! - Persist plain records as single rows and rebuild them by primary key.
//! - Derive every statement and binding from per-field metadata
//!   (`#[derive(Record)]` with `#[primary_key]` / `#[column]`), never from
//!   hand-written queries.
//!
//! # Architectural Boundaries
//!
//! - Single-row insert and lookup by primary key only. No joins,
//!   transactions, batching, schema management or result caching.
//! - The database is reached only through [`Connection`]; tables are
//!   expected to exist already.
//!
//! ```ignore
//! #[derive(Default, Record)]
//! struct Account {
//!     #[primary_key]
//!     id: i64,
//!     #[column]
//!     balance: i32,
//!     #[column]
//!     owner: String,
//! }
//!
//! let mapper = Mapper::new(SqliteConnection::open_in_memory()?);
//! let key = mapper.write(&Account { id: 0, balance: 7000, owner: "Neha".into() })?;
//! let account: Account = mapper.read(key)?;
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod key;
pub mod mapper;
pub mod record;
pub mod sqlite;
pub mod value;

pub use config::{KeyConfig, OrmConfig};
pub use connection::Connection;
pub use error::{OrmError, Result};
pub use key::{AtomicKeyGenerator, KeyGenerator, SequenceKeyGenerator};
pub use mapper::{insert_sql, select_sql, Mapper};
pub use record::{extract, FieldDescriptor, FieldMetadata, Record, Role};
pub use rust_orm_macros::Record;
pub use sqlite::{SqliteConfig, SqliteConnection};
pub use value::{FieldType, Row, Value};
