use crate::error::Result;
use crate::value::{Row, Value};

/// The database side of the mapper: runs parameterized statements and
/// returns rows. Calls block until the statement completes.
///
/// Parameters are positional and bind to `?` placeholders in order.
pub trait Connection {
    /// Run a mutating statement and return the number of affected rows.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize>;

    /// Run a query and collect every row it yields.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        (**self).execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }
}
