//! C side of the host callback contract
//!
//! Layouts here mirror `livid.h`. The loaded program calls back through the
//! `lv_api` table; each callback recovers the [`Bridge`] from the table's
//! context pointer.

use std::borrow::Cow;
use std::ffi::{c_char, c_int, c_void, CStr};
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use crate::domain::entities::{Column, Row};
use crate::domain::ports::{ColumnSelect, Host, LoadReport};
use crate::domain::value_objects::{Cell, ColumnType, Value};
use crate::error::{LividError, LividResult};

/// `struct lv_column`
#[repr(C)]
#[derive(Debug)]
pub struct RawColumn {
    pub name: *const c_char,
    pub index: i64,
    pub kind: u32,
    pub hidden: bool,
    pub width: u64,
}

impl RawColumn {
    /// Decode one table entry
    ///
    /// # Safety
    /// `name` must be null or point to a NUL-terminated string.
    pub unsafe fn to_column(&self, position: usize) -> LividResult<Column> {
        if self.name.is_null() {
            return Err(LividError::MalformedColumn {
                index: position,
                message: "name is null".to_string(),
            });
        }
        let kind = ColumnType::from_raw(self.kind).ok_or_else(|| LividError::MalformedColumn {
            index: position,
            message: format!("unknown type tag {}", self.kind),
        })?;
        let name = CStr::from_ptr(self.name).to_string_lossy().into_owned();
        Ok(Column::new(name, kind)
            .with_hidden(self.hidden)
            .with_width(usize::try_from(self.width).unwrap_or(usize::MAX)))
    }
}

/// `struct lv_api`
#[repr(C)]
pub struct RawApi {
    pub ctx: *mut c_void,
    pub advance: unsafe extern "C" fn(*mut c_void) -> bool,
    pub load: unsafe extern "C" fn(*mut c_void, *mut c_void, *mut bool, i64) -> c_int,
    pub write: unsafe extern "C" fn(*mut c_void, *const c_char),
    pub grid: unsafe extern "C" fn(*mut c_void, *mut RawColumn, usize, *const c_void, *const bool) -> c_int,
}

static EMPTY_STRING: &[u8] = b"\0";

/// Host state reachable from the callbacks during one `process()` call
pub struct Bridge<'a> {
    host: Host<'a>,
    /// Copy of the program's reconciled table
    declared: Vec<Column>,
    row: Row,
    grid_schema: Vec<Column>,
    error: Option<LividError>,
}

impl<'a> Bridge<'a> {
    pub fn new(host: Host<'a>, declared: Vec<Column>) -> Self {
        Self {
            host,
            row: Row::for_columns(&declared),
            declared,
            grid_schema: Vec::new(),
            error: None,
        }
    }

    /// Callback table pointing back at `bridge`
    pub fn api(bridge: *mut Bridge<'a>) -> RawApi {
        RawApi {
            ctx: bridge.cast(),
            advance: lv_advance,
            load: lv_load,
            write: lv_write,
            grid: lv_grid,
        }
    }

    /// First error raised by any callback
    pub fn take_error(&mut self) -> Option<LividError> {
        self.error.take()
    }

    fn fail(&mut self, err: LividError) {
        tracing::error!(error = %err, "host callback failed");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Copy the cells touched by a load into the program's row
    ///
    /// # Safety
    /// `row_out` and `valid_out` must hold one slot per declared column.
    unsafe fn export(&self, report: &LoadReport, row_out: *mut u64, valid_out: *mut bool) {
        let line = self.host.rows.line();
        for (i, column) in self.declared.iter().enumerate() {
            let touched = report.fresh
                || column
                    .reconciled()
                    .is_some_and(|parsed| report.parsed.contains(&parsed));
            if !touched {
                continue;
            }
            let slot = match self.row.cell(i) {
                Some(Cell::Str(span)) if !span.is_empty() && span.start() < line.len() => {
                    line.as_ptr().add(span.start()) as usize as u64
                }
                Some(Cell::Str(_)) | None => EMPTY_STRING.as_ptr() as usize as u64,
                Some(Cell::Int(v)) => *v as u64,
                Some(Cell::Double(v)) => v.to_bits(),
            };
            *row_out.add(i) = slot;
            *valid_out.add(i) = self.row.is_valid(i);
        }
    }

    /// Refresh the cached grid schema from the program's table
    fn sync_grid_schema(&mut self, raw: &[RawColumn]) -> LividResult<()> {
        if self.grid_schema.len() != raw.len() {
            self.grid_schema = raw
                .iter()
                .enumerate()
                .map(|(i, c)| unsafe { c.to_column(i) })
                .collect::<LividResult<_>>()?;
        }
        for (column, raw) in self.grid_schema.iter_mut().zip(raw) {
            column.set_hidden(raw.hidden);
            column.grow_width(usize::try_from(raw.width).unwrap_or(usize::MAX));
        }
        Ok(())
    }
}

/// # Safety
/// `ctx` must be the pointer installed by [`Bridge::api`], still alive.
unsafe fn bridge_from<'a>(ctx: *mut c_void) -> &'a mut Bridge<'a> {
    &mut *ctx.cast::<Bridge<'a>>()
}

/// Run a callback body, turning errors and panics into `failed`
fn guard<'a, T>(
    bridge: &mut Bridge<'a>,
    failed: T,
    body: impl FnOnce(&mut Bridge<'a>) -> LividResult<T>,
) -> T {
    match panic::catch_unwind(AssertUnwindSafe(|| body(&mut *bridge))) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            bridge.fail(err);
            failed
        }
        Err(_) => {
            bridge.fail(LividError::execution("host callback panicked"));
            failed
        }
    }
}

/// Decode one 8-byte slot
///
/// # Safety
/// String slots must be null or point to a NUL-terminated string that
/// outlives the returned value.
unsafe fn decode<'v>(kind: u32, slot: u64) -> Value<'v> {
    match ColumnType::from_raw(kind) {
        Some(ColumnType::String) | None => {
            let ptr = slot as usize as *const c_char;
            if ptr.is_null() {
                Value::Str(Cow::Borrowed(""))
            } else {
                Value::Str(CStr::from_ptr(ptr).to_string_lossy())
            }
        }
        Some(ColumnType::Time | ColumnType::Integer) => Value::Int(slot as i64),
        Some(ColumnType::Double) => Value::Double(f64::from_bits(slot)),
    }
}

unsafe extern "C" fn lv_advance(ctx: *mut c_void) -> bool {
    let bridge = bridge_from(ctx);
    guard(bridge, false, |b| b.host.rows.advance())
}

unsafe extern "C" fn lv_load(ctx: *mut c_void, row: *mut c_void, valid: *mut bool, column: i64) -> c_int {
    let bridge = bridge_from(ctx);
    guard(bridge, -1, |b| {
        let report = b.host.rows.load(&mut b.row, ColumnSelect::from_raw(column))?;
        b.export(&report, row.cast(), valid);
        Ok(0)
    })
}

unsafe extern "C" fn lv_write(ctx: *mut c_void, text: *const c_char) {
    if text.is_null() {
        return;
    }
    let bridge = bridge_from(ctx);
    let text = CStr::from_ptr(text).to_string_lossy();
    guard(bridge, (), |b| b.host.out.write(format_args!("{}", text)))
}

unsafe extern "C" fn lv_grid(
    ctx: *mut c_void,
    columns: *mut RawColumn,
    count: usize,
    row: *const c_void,
    valid: *const bool,
) -> c_int {
    let bridge = bridge_from(ctx);
    if columns.is_null() || row.is_null() || valid.is_null() {
        bridge.fail(LividError::execution("grid called with a null table"));
        return -1;
    }
    let raw = slice::from_raw_parts_mut(columns, count);
    let slots = slice::from_raw_parts(row.cast::<u64>(), count);
    let valid = slice::from_raw_parts(valid, count);

    guard(bridge, -1, |b| {
        b.sync_grid_schema(raw)?;
        let values: Vec<Value<'_>> = raw
            .iter()
            .zip(slots)
            .map(|(column, slot)| decode(column.kind, *slot))
            .collect();
        b.host.out.render_grid(&mut b.grid_schema, &values, valid)?;
        for (raw, column) in raw.iter_mut().zip(&b.grid_schema) {
            raw.width = column.width() as u64;
        }
        Ok(0)
    })
}
