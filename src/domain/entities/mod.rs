//! Domain Entities
//!
//! - `Column` / `Schema` - column descriptors and the parsed header
//! - `Row` - one row of cells with validity flags
//! - `SchemaMapping` - parsed/declared column links

mod column;
mod mapping;
mod row;

pub use column::{Column, Schema, INDEX_COLUMN};
pub use mapping::SchemaMapping;
pub use row::Row;
