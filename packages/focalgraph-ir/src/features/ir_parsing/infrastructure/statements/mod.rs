//! Per-family statement parsers
//!
//! Each parser starts right after the instruction keyword and stops before
//! any trailing `, align N` / `, !kind !N` annotation.

pub mod aggregate;
pub mod arithmetic;
pub mod call;
pub mod conversion;
pub mod memory;
pub mod other;
pub mod terminator;
pub mod vector;
