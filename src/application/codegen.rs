//! Program stub generation
//!
//! Runs once per workspace. After the stub is written the source belongs to
//! the user: later cycles compile whatever is on disk.

use crate::domain::entities::Schema;
use crate::domain::services::emit_column_list;
use crate::domain::value_objects::{ArtifactPaths, HEADER_FILE};
use crate::error::LividResult;
use crate::infrastructure::fs::write_atomic;

/// Entry point body the generated stub starts with
pub const DEFAULT_PROCESS_BODY: &str = "\
int process(void)
{
    struct row row;
    struct row_valid valid;

    while (next()) {
        load_all(&row, &valid);
        grid(&row, &valid);
    }
    return 0;
}
";

/// What `ensure_source` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// A fresh stub was written
    Generated,
    /// An existing source was left alone
    Kept,
}

/// Full text of the initial program for `schema`
pub fn generate_source(schema: &Schema) -> String {
    let mut source = String::new();
    source.push_str("/*\n");
    source.push_str(" * Edit and save to rerun. Columns are matched to the input by name;\n");
    source.push_str(" * change a type to INT, TIME or DOUBLE, or SHOW to HIDE.\n");
    source.push_str(" */\n");
    source.push_str(&emit_column_list(schema.columns()));
    source.push('\n');
    source.push_str(&format!("#include \"{}\"\n\n", HEADER_FILE));
    source.push_str(DEFAULT_PROCESS_BODY);
    source
}

/// Write the stub unless a source already exists
pub fn ensure_source(paths: &ArtifactPaths, schema: &Schema) -> LividResult<SourceStatus> {
    if paths.source.exists() {
        tracing::info!(path = %paths.source.display(), "keeping existing program source");
        return Ok(SourceStatus::Kept);
    }

    write_atomic(&paths.source, generate_source(schema).as_bytes())?;
    tracing::info!(
        path = %paths.source.display(),
        columns = schema.len(),
        "generated program source"
    );
    Ok(SourceStatus::Generated)
}
