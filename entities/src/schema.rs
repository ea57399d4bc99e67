use serde::Serialize;
use std::collections::BTreeMap;

/// One column as reported by `information_schema.columns`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ColumnDetails {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: String,
}

pub type TableSchemas = BTreeMap<String, Vec<ColumnDetails>>;
