use crate::card_schema::ConfigurationError;
use crate::value::{Row, Schema, Value};
use tracing::warn;

/// A column named in configuration that the schema does not know.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Column `{0}` is not in the schema")]
pub struct MissingColumn(pub String);

/// Looks up logical card fields in a row by column name.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    row: &'a Row,
    schema: &'a Schema,
}

impl<'a> FieldResolver<'a> {
    pub fn new(row: &'a Row, schema: &'a Schema) -> Self {
        Self { row, schema }
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// `Ok(None)` when no column is configured, or when the schema position
    /// lies past the end of this row.
    pub fn resolve(&self, column: Option<&str>) -> Result<Option<&'a Value>, MissingColumn> {
        let column = match column {
            Some(c) if !c.is_empty() => c,
            _ => return Ok(None),
        };
        let index = self
            .schema
            .index_of(column)
            .ok_or_else(|| MissingColumn(column.to_string()))?;

        let value = self.row.get(index);
        if value.is_none() {
            warn!(column, index, row_len = self.row.len(), "schema index outside row");
        }
        Ok(value)
    }

    /// Resolve a field the card cannot render without.
    pub fn required(&self, field: &'static str, column: &str) -> Result<&'a Value, ConfigurationError> {
        let missing = || ConfigurationError::MissingRequiredField {
            field,
            column: column.to_string(),
        };
        self.resolve(Some(column)).map_err(|_| missing())?.ok_or_else(missing)
    }

    /// Resolve an optional field. An unknown column is logged and treated as absent.
    pub fn optional(&self, field: &str, column: Option<&str>) -> Option<&'a Value> {
        match self.resolve(column) {
            Ok(value) => value,
            Err(MissingColumn(column)) => {
                warn!(field, %column, "configured column missing from schema");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Row, Schema) {
        let row: Row = vec!["Alpha", "syn1"].into_iter().collect();
        let schema = Schema::from_headers(&["name", "id", "extra"]);
        (row, schema)
    }

    #[test]
    fn test_resolve_present() {
        let (row, schema) = fixture();
        let r = FieldResolver::new(&row, &schema);
        assert_eq!(r.resolve(Some("id")), Ok(Some(&Value::from("syn1"))));
    }

    #[test]
    fn test_resolve_unconfigured() {
        let (row, schema) = fixture();
        let r = FieldResolver::new(&row, &schema);
        assert_eq!(r.resolve(None), Ok(None));
        assert_eq!(r.resolve(Some("")), Ok(None));
    }

    #[test]
    fn test_resolve_unknown_column() {
        let (row, schema) = fixture();
        let r = FieldResolver::new(&row, &schema);
        assert_eq!(r.resolve(Some("nope")), Err(MissingColumn("nope".into())));
        assert_eq!(r.optional("description", Some("nope")), None);
    }

    #[test]
    fn test_resolve_index_past_row() {
        let (row, schema) = fixture();
        let r = FieldResolver::new(&row, &schema);
        assert_eq!(r.resolve(Some("extra")), Ok(None));
    }

    #[test]
    fn test_required() {
        let (row, schema) = fixture();
        let r = FieldResolver::new(&row, &schema);
        assert_eq!(r.required("title", "name"), Ok(&Value::from("Alpha")));
        assert_eq!(
            r.required("title", "nope"),
            Err(ConfigurationError::MissingRequiredField {
                field: "title",
                column: "nope".into(),
            })
        );
        assert!(r.required("title", "extra").is_err());
        assert!(r.required("title", "").is_err());
    }
}
