pub mod provenance;

pub use provenance::{DataflowTable, Provenance, Use};
