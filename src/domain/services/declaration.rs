//! Column declaration block
//!
//! The program source declares its columns as a `COLUMN_LIST` X-macro:
//!
//! ```text
//! #define COLUMN_LIST \
//!     COLUMN(_index, "_index", INT, SHOW(6)) \
//!     COLUMN(first_name, "first name", STR, HIDE(10))
//! ```
//!
//! The first argument is the C field identifier, the second the exact column
//! name used for reconciliation. This module writes that block for a parsed
//! schema and reads it back from an edited source.

use std::collections::HashSet;
use std::fmt;

use crate::domain::entities::Column;
use crate::domain::value_objects::ColumnType;

pub const COLUMN_LIST_MACRO: &str = "COLUMN_LIST";

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

/// Object-like macros and typedefs visible to the program through `livid.h`
const HEADER_NAMES: &[&str] = &[
    // livid.h
    "COLUMN", "COLUMN_LIST", "SHOW", "HIDE", "LIVID_H", "LV_STR", "LV_TIME", "LV_INT",
    "LV_DOUBLE", "LV_COLUMN_COUNT",
    // stdbool.h, stddef.h
    "bool", "true", "false", "NULL", "size_t", "ptrdiff_t", "wchar_t", "max_align_t",
    // stdint.h
    "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    "intptr_t", "uintptr_t", "intmax_t", "uintmax_t", "INT8_MIN", "INT16_MIN", "INT32_MIN",
    "INT64_MIN", "INT8_MAX", "INT16_MAX", "INT32_MAX", "INT64_MAX", "UINT8_MAX", "UINT16_MAX",
    "UINT32_MAX", "UINT64_MAX", "INTPTR_MIN", "INTPTR_MAX", "UINTPTR_MAX", "INTMAX_MIN",
    "INTMAX_MAX", "UINTMAX_MAX", "PTRDIFF_MIN", "PTRDIFF_MAX", "SIZE_MAX", "WCHAR_MIN",
    "WCHAR_MAX", "WINT_MIN", "WINT_MAX", "SIG_ATOMIC_MIN", "SIG_ATOMIC_MAX",
    // stdio.h, stdlib.h, stdarg.h
    "FILE", "fpos_t", "va_list", "div_t", "ldiv_t", "lldiv_t", "EOF", "BUFSIZ",
    "FILENAME_MAX", "FOPEN_MAX", "L_tmpnam", "TMP_MAX", "SEEK_SET", "SEEK_CUR", "SEEK_END",
    "stdin", "stdout", "stderr", "EXIT_SUCCESS", "EXIT_FAILURE", "RAND_MAX", "MB_CUR_MAX",
];

/// A problem found while reading a declaration block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationError {
    /// 1-based source line
    pub line: usize,
    pub message: String,
}

impl DeclarationError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    /// Render as a compiler-style diagnostic for `file`
    pub fn diagnostic(&self, file: &str) -> String {
        format!("{}:{}: error: {}", file, self.line, self.message)
    }
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for DeclarationError {}

/// Derive a unique C identifier for every column name
pub fn field_identifiers(columns: &[Column]) -> Vec<String> {
    let mut seen = HashSet::new();
    columns
        .iter()
        .map(|column| {
            let base = sanitize_identifier(column.name());
            let mut candidate = base.clone();
            let mut suffix = 2;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            candidate
        })
        .collect()
}

fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        ident.push_str("col");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    // `__x` and `_X` belong to the implementation
    let mut chars = ident.chars();
    if let (Some('_'), Some(c)) = (chars.next(), chars.next()) {
        if c == '_' || c.is_ascii_uppercase() {
            ident.insert(0, 'f');
        }
    }
    if C_KEYWORDS.contains(&ident.as_str()) || HEADER_NAMES.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Quote `name` as a C string literal
fn c_string(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Emit the `#define COLUMN_LIST` block for `columns`
pub fn emit_column_list(columns: &[Column]) -> String {
    let fields = field_identifiers(columns);
    let mut out = format!("#define {}", COLUMN_LIST_MACRO);
    for (column, field) in columns.iter().zip(&fields) {
        let visibility = if column.is_hidden() { "HIDE" } else { "SHOW" };
        out.push_str(" \\\n");
        out.push_str(&format!(
            "    COLUMN({}, {}, {}, {}({}))",
            field,
            c_string(column.name()),
            column.kind().decl_name(),
            visibility,
            column.width()
        ));
    }
    out.push('\n');
    out
}

/// Read the declared columns back out of a program source
pub fn parse_column_list(source: &str) -> Result<Vec<Column>, DeclarationError> {
    let lines: Vec<&str> = source.lines().collect();
    let start = lines
        .iter()
        .position(|line| is_column_list_define(line))
        .ok_or_else(|| {
            DeclarationError::new(1, format!("no `#define {}` declaration found", COLUMN_LIST_MACRO))
        })?;

    let mut columns = Vec::new();
    let mut index = start;
    loop {
        let line_no = index + 1;
        let raw = lines[index];
        let text = if index == start {
            raw.trim_start()
                .trim_start_matches('#')
                .trim_start()
                .trim_start_matches("define")
                .trim_start()
                .trim_start_matches(COLUMN_LIST_MACRO)
        } else {
            raw
        };

        let continues = text.trim_end().ends_with('\\');
        let body = text.trim_end().trim_end_matches('\\');
        parse_entries(body, line_no, &mut columns)?;

        if !continues {
            break;
        }
        index += 1;
        if index >= lines.len() {
            return Err(DeclarationError::new(
                line_no,
                "line continuation at end of file",
            ));
        }
    }

    if columns.is_empty() {
        return Err(DeclarationError::new(
            start + 1,
            format!("{} declares no columns", COLUMN_LIST_MACRO),
        ));
    }
    Ok(columns)
}

fn is_column_list_define(line: &str) -> bool {
    let mut words = line.trim_start().trim_start_matches('#').split_whitespace();
    line.trim_start().starts_with('#')
        && words.next() == Some("define")
        && words.next() == Some(COLUMN_LIST_MACRO)
}

fn parse_entries(body: &str, line: usize, columns: &mut Vec<Column>) -> Result<(), DeclarationError> {
    let mut scanner = Scanner::new(body, line);
    loop {
        scanner.skip_whitespace();
        if scanner.at_end() {
            return Ok(());
        }
        let word = scanner.identifier()?;
        if word != "COLUMN" {
            return Err(scanner.error(format!("expected COLUMN(...), found `{}`", word)));
        }
        columns.push(scanner.column_entry()?);
    }
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Self { text, pos: 0, line }
    }

    fn error(&self, message: impl Into<String>) -> DeclarationError {
        DeclarationError::new(self.line, message)
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, c: char) -> Result<(), DeclarationError> {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", c)))
        }
    }

    fn identifier(&mut self) -> Result<&'a str, DeclarationError> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected an identifier"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn string_literal(&mut self) -> Result<String, DeclarationError> {
        self.expect('"')?;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((offset, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += offset + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                _ => out.push(c),
            }
        }
        Err(self.error("unterminated string literal"))
    }

    fn number(&mut self) -> Result<usize, DeclarationError> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let value = rest[..len]
            .parse()
            .map_err(|_| self.error("expected a column width"))?;
        self.pos += len;
        Ok(value)
    }

    /// `(field, "name", TYPE, SHOW(width))`, after the `COLUMN` keyword
    fn column_entry(&mut self) -> Result<Column, DeclarationError> {
        self.expect('(')?;
        self.identifier()?;
        self.expect(',')?;
        let name = self.string_literal()?;
        self.expect(',')?;
        let kind_name = self.identifier()?;
        let kind = ColumnType::from_decl_name(kind_name)
            .ok_or_else(|| self.error(format!("unknown column type `{}`", kind_name)))?;
        self.expect(',')?;
        let hidden = match self.identifier()? {
            "SHOW" => false,
            "HIDE" => true,
            other => {
                return Err(self.error(format!("expected SHOW or HIDE, found `{}`", other)));
            }
        };
        self.expect('(')?;
        let width = self.number()?;
        self.expect(')')?;
        self.expect(')')?;

        Ok(Column::new(name, kind)
            .with_hidden(hidden)
            .with_width(width))
    }
}
