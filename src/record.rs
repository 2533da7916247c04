//! Record descriptions and the metadata extractor.
//!
//! A record type describes itself through a static accessor table: one
//! [`FieldDescriptor`] per declared field, in declaration order. The table
//! is normally emitted by `#[derive(Record)]`, but can be written by hand.

use crate::error::{OrmError, Result};
use crate::value::{FieldType, Value};

/// Role a field plays in the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    PrimaryKey,
    Column,
    Ignored,
}

/// Accessor table entry for one field of `R`.
pub struct FieldDescriptor<R> {
    pub name: &'static str,
    pub field_type: FieldType,
    pub role: Role,
    pub get: fn(&R) -> Value,
    pub set: fn(&mut R, Value) -> Result<()>,
}

impl<R> FieldDescriptor<R> {
    /// Column name; fields map to columns of the same name.
    pub fn column_name(&self) -> &'static str {
        self.name
    }
}

impl<R> std::fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("role", &self.role)
            .finish()
    }
}

/// A type the mapper can persist to, and rebuild from, a table of the same
/// name.
///
/// `Default` provides the zero-initialized instance a read fills in.
pub trait Record: Default + Sized + 'static {
    fn table_name() -> &'static str;

    /// Described fields in declaration order. `Role::Ignored` entries are
    /// allowed and skipped by the mapper; the derive leaves untagged fields
    /// out altogether.
    fn fields() -> &'static [FieldDescriptor<Self>];
}

/// The mapped view of a record type: its primary key and its columns.
#[derive(Debug)]
pub struct FieldMetadata<R: 'static> {
    pub primary_key: &'static FieldDescriptor<R>,
    pub columns: Vec<&'static FieldDescriptor<R>>,
}

impl<R: 'static> FieldMetadata<R> {
    /// Primary key first, then columns in declaration order.
    pub fn column_names(&self) -> Vec<&'static str> {
        std::iter::once(self.primary_key.column_name())
            .chain(self.columns.iter().map(|c| c.column_name()))
            .collect()
    }
}

/// Partition the fields of `R` into its primary key and mapped columns.
pub fn extract<R: Record>() -> Result<FieldMetadata<R>> {
    let mut primary_key: Option<&'static FieldDescriptor<R>> = None;
    let mut columns = Vec::new();

    for field in R::fields() {
        match field.role {
            Role::PrimaryKey => {
                if let Some(existing) = primary_key {
                    return Err(OrmError::Configuration(format!(
                        "`{}` declares more than one primary key (`{}` and `{}`)",
                        R::table_name(),
                        existing.name,
                        field.name
                    )));
                }
                primary_key = Some(field);
            }
            Role::Column => columns.push(field),
            Role::Ignored => {}
        }
    }

    let primary_key = primary_key.ok_or_else(|| {
        OrmError::Configuration(format!(
            "`{}` has no primary key field",
            R::table_name()
        ))
    })?;

    Ok(FieldMetadata {
        primary_key,
        columns,
    })
}
