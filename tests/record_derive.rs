use std::cell::Cell;

use rust_orm::{
    extract, insert_sql, select_sql, Connection, FieldType, Mapper, OrmError, Record, Result,
    Role, Row, Value,
};

#[derive(Debug, Default, Record)]
struct Everything {
    #[column]
    label: String,
    #[primary_key]
    id: i64,
    #[column]
    count: i32,
    #[column]
    ratio: f64,
    #[column]
    active: bool,
    #[column]
    payload: Vec<u8>,
    scratch: std::collections::HashMap<String, u8>,
}

#[derive(Debug, Default, Record)]
struct Orphan {
    #[column]
    name: String,
}

#[derive(Debug, Default, Record)]
struct NarrowKey {
    #[primary_key]
    id: i32,
    #[column]
    name: String,
}

#[derive(Debug, Default, Record)]
struct Keyword {
    #[primary_key]
    r#ref: i64,
    #[column]
    r#type: String,
}

/// Counts every call that reaches the database.
#[derive(Default)]
struct Counting {
    calls: Cell<usize>,
}

impl Connection for Counting {
    fn execute(&self, _sql: &str, _params: &[Value]) -> Result<usize> {
        self.calls.set(self.calls.get() + 1);
        Ok(1)
    }

    fn query(&self, _sql: &str, _params: &[Value]) -> Result<Vec<Row>> {
        self.calls.set(self.calls.get() + 1);
        Ok(Vec::new())
    }
}

#[test]
fn derive_describes_tagged_fields_in_declaration_order() {
    assert_eq!(Everything::table_name(), "Everything");
    let described: Vec<_> = Everything::fields()
        .iter()
        .map(|f| (f.name, f.field_type, f.role))
        .collect();
    assert_eq!(
        described,
        vec![
            ("label", FieldType::Text, Role::Column),
            ("id", FieldType::Int64, Role::PrimaryKey),
            ("count", FieldType::Int32, Role::Column),
            ("ratio", FieldType::Real, Role::Column),
            ("active", FieldType::Boolean, Role::Column),
            ("payload", FieldType::Blob, Role::Column),
        ]
    );

    let meta = extract::<Everything>().unwrap();
    assert_eq!(meta.primary_key.name, "id");
    assert_eq!(
        meta.column_names(),
        vec!["id", "label", "count", "ratio", "active", "payload"]
    );
}

#[test]
fn derived_accessors_convert_through_values() {
    let mut record = Everything::default();
    for field in Everything::fields() {
        let value = match field.field_type {
            FieldType::Int64 => Value::Integer(9),
            FieldType::Int32 => Value::Integer(3),
            FieldType::Text => Value::from("x"),
            FieldType::Real => Value::Real(0.25),
            FieldType::Boolean => Value::Integer(1),
            FieldType::Blob => Value::Blob(vec![1, 2]),
        };
        (field.set)(&mut record, value).unwrap();
    }
    assert_eq!(record.id, 9);
    assert_eq!(record.count, 3);
    assert_eq!(record.label, "x");
    assert_eq!(record.ratio, 0.25);
    assert!(record.active);
    assert_eq!(record.payload, vec![1, 2]);
    assert!(record.scratch.is_empty());

    let label = &Everything::fields()[0];
    assert_eq!((label.get)(&record), Value::Text("x".to_string()));
    assert!(matches!(
        (label.set)(&mut record, Value::Integer(1)),
        Err(OrmError::TypeMismatch { .. })
    ));
}

#[test]
fn missing_primary_key_fails_before_any_statement() {
    let mapper = Mapper::new(Counting::default());

    let err = mapper
        .write(&Orphan {
            name: "Neha".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, OrmError::Configuration(_)));

    let err = mapper.read::<Orphan>(1).unwrap_err();
    assert!(matches!(err, OrmError::Configuration(_)));

    assert_eq!(mapper.connection().calls.get(), 0);
    assert_eq!(mapper.key_generator().current(), 0);
}

#[test]
fn non_64_bit_primary_key_is_unsupported() {
    let mapper = Mapper::new(Counting::default());
    let err = mapper
        .write(&NarrowKey {
            id: 1,
            name: "Josh".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        OrmError::UnsupportedType {
            field: "id",
            field_type: FieldType::Int32
        }
    ));
    assert_eq!(mapper.connection().calls.get(), 0);
}

#[test]
fn raw_identifiers_map_to_plain_column_names() {
    let names: Vec<_> = Keyword::fields().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["ref", "type"]);
    assert_eq!(
        insert_sql::<Keyword>().unwrap(),
        "INSERT INTO Keyword (ref,type) VALUES (?,?);"
    );
    assert_eq!(
        select_sql::<Keyword>().unwrap(),
        "SELECT * FROM Keyword WHERE ref = ?;"
    );

    let mut record = Keyword::default();
    (Keyword::fields()[1].set)(&mut record, Value::from("Credit")).unwrap();
    assert_eq!(record.r#type, "Credit");
}
