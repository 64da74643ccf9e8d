//! Domain Services
//!
//! Pure logic over the domain entities. Nothing here touches the file
//! system; I/O arrives as `BufRead`/`Write` arguments.

pub mod declaration;
pub mod grid;
pub mod numeric;
pub mod reconciler;
pub mod schema_parser;

pub use declaration::{emit_column_list, field_identifiers, parse_column_list, DeclarationError};
pub use grid::{GridRenderer, DEFAULT_MAX_ROWS};
pub use numeric::{parse_double, parse_integer};
pub use reconciler::reconcile;
pub use schema_parser::{parse_delimiter, parse_header, read_header};
