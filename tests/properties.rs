//! Property tests for livid.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "forward-only parsing".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/numeric.rs"]
mod numeric;

#[path = "properties/reconcile.rs"]
mod reconcile;

#[path = "properties/row_parser.rs"]
mod row_parser;
