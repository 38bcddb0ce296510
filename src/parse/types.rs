//! Types produced by the entry parser and consumed by the rules layer.

/// The target of one `include`/`exclude` configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSpec {
    /// `{"table": "name"}`: a single relation, compared byte for byte.
    Table(String),
    /// `{"tables": "regex"}`: every relation whose name the pattern matches.
    Tables(String),
}

impl TableSpec {
    /// The JSON key this spec was read from.
    pub fn key(&self) -> &'static str {
        match self {
            TableSpec::Table(_) => "table",
            TableSpec::Tables(_) => "tables",
        }
    }

    /// The literal name or pattern source.
    pub fn value(&self) -> &str {
        match self {
            TableSpec::Table(v) | TableSpec::Tables(v) => v,
        }
    }
}
