// Per-function data flow
//
// - domain: Provenance records and the per-function table built during the
//   body scan

pub mod domain;

pub use domain::{DataflowTable, Provenance, Use};
