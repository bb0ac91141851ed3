use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static identifier regex"))
}

/// Accept only plain SQL identifiers. Table and column names are spliced
/// into the statement text, so nothing else may pass.
pub fn validate_identifier(name: &str) -> AppResult<&str> {
    if identifier_re().is_match(name) {
        Ok(name)
    } else {
        Err(AppError::InvalidIdentifier(name.to_string()))
    }
}

pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{name}\"")
}

/// `[schema.]table` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let parts: Vec<&str> = raw.trim().split('.').collect();

        match parts.as_slice() {
            [name] => Ok(Self {
                schema: None,
                name: validate_identifier(name)?.to_string(),
            }),
            [schema, name] => Ok(Self {
                schema: Some(validate_identifier(schema)?.to_string()),
                name: validate_identifier(name)?.to_string(),
            }),
            _ => Err(AppError::InvalidIdentifier(raw.to_string())),
        }
    }

    /// Quoted form for use in a statement.
    pub fn to_sql(&self) -> String {
        match &self.schema {
            Some(schema) => format!(
                "{}.{}",
                quote_identifier(schema),
                quote_identifier(&self.name)
            ),
            None => quote_identifier(&self.name),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Closed interval on the completion-date column.
///
/// Bounds are `YYYY-MM-DD` text and both ends are inclusive. The column
/// value is reduced to its calendar date before comparing, so a stored
/// timestamp on the end date still matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInterval {
    pub column: String,
    pub start: String,
    pub end: String,
}

impl DateInterval {
    pub fn new(column: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// WHERE clause with `?1`/`?2` placeholders for the bounds.
    pub fn to_sql(&self) -> AppResult<String> {
        let col = quote_identifier(validate_identifier(&self.column)?);
        Ok(format!("date({col}) BETWEEN ?1 AND ?2"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_qualified_tables() {
        let plain = TableRef::parse("tasks").unwrap();
        assert_eq!(plain.schema, None);
        assert_eq!(plain.to_sql(), "\"tasks\"");

        let qualified = TableRef::parse("main.tasks").unwrap();
        assert_eq!(qualified.schema.as_deref(), Some("main"));
        assert_eq!(qualified.to_sql(), "\"main\".\"tasks\"");
        assert_eq!(qualified.to_string(), "main.tasks");
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(matches!(
            TableRef::parse("tasks; DROP TABLE x"),
            Err(AppError::InvalidIdentifier(_))
        ));
        assert!(TableRef::parse("a.b.c").is_err());
        assert!(TableRef::parse("").is_err());
        assert!(validate_identifier("COMPLETION_DATE").is_ok());
        assert!(validate_identifier("1col").is_err());
        assert!(validate_identifier("na\"me").is_err());
    }

    #[test]
    fn interval_renders_inclusive_between() {
        let p = DateInterval::new("COMPLETION_DATE", "2025-02-01", "2025-02-03");
        assert_eq!(
            p.to_sql().unwrap(),
            "date(\"COMPLETION_DATE\") BETWEEN ?1 AND ?2"
        );
    }

    #[test]
    fn interval_rejects_bad_column() {
        let p = DateInterval::new("x) OR (1=1", "2025-02-01", "2025-02-03");
        assert!(p.to_sql().is_err());
    }
}
