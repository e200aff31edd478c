//! Field descriptors, validation schema and form state

// Re-export all dynaform-forms functionality
pub use dynaform_forms::*;
