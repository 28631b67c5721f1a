//! Core data model types for subcontractors, tender documents and form state.

pub mod attachment;
pub mod subcontractor;
