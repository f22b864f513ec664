use std::fmt;

/// A cell from an SF1 file: numeric when it parses, raw text otherwise.
///
/// Numeric geo header fields are blank at coarse summary levels, so a failed
/// parse keeps the original text for that row instead of raising.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Parse `raw` as a number (ignoring surrounding whitespace), falling back to the raw text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}
