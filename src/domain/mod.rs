//! Domain Layer
//!
//! The data machinery of a livid session, free of process and file-system
//! concerns.
//!
//! ## Structure
//!
//! - `entities/` - Columns, the parsed schema, rows, the schema mapping
//! - `value_objects/` - Column types, cells, workspace artifact names
//! - `services/` - Header parsing, declarations, reconciliation, the grid
//! - `ports/` - Host callback contract, execution backends, the editor

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
