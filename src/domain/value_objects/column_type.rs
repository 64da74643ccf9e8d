//! Column type value object - the closed set of cell types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type of a column, shared by parsed and declared schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Text borrowed from the current line
    #[default]
    String,
    /// Timestamp stored as a signed 64-bit integer
    Time,
    /// Signed 64-bit integer
    Integer,
    /// 64-bit float
    Double,
}

impl ColumnType {
    /// Every column type, in wire order
    pub const ALL: [ColumnType; 4] = [
        ColumnType::String,
        ColumnType::Time,
        ColumnType::Integer,
        ColumnType::Double,
    ];

    /// Numeric columns treat an empty field as absent
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnType::String)
    }

    /// Tag used in the generated `COLUMN_LIST` declaration
    pub fn decl_name(&self) -> &'static str {
        match self {
            ColumnType::String => "STR",
            ColumnType::Time => "TIME",
            ColumnType::Integer => "INT",
            ColumnType::Double => "DOUBLE",
        }
    }

    /// Parse a `COLUMN_LIST` type tag
    pub fn from_decl_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.decl_name() == name)
    }

    /// Numeric value stored in the `type` field of a declared column
    pub fn as_raw(&self) -> u32 {
        match self {
            ColumnType::String => 0,
            ColumnType::Time => 1,
            ColumnType::Integer => 2,
            ColumnType::Double => 3,
        }
    }

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_raw() == raw)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "String",
            ColumnType::Time => "Time",
            ColumnType::Integer => "Integer",
            ColumnType::Double => "Double",
        };
        f.write_str(name)
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => Ok(ColumnType::String),
            "time" => Ok(ColumnType::Time),
            "integer" | "int" | "long" => Ok(ColumnType::Integer),
            "double" | "float" => Ok(ColumnType::Double),
            other => Err(format!("unknown column type '{}'", other)),
        }
    }
}
