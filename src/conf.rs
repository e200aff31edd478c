//! Layered loading of form definitions
//!
//! Form definitions are read from TOML or JSON files, with top-level keys
//! overridable from `DYNAFORM_*` environment variables.

// Re-export all dynaform-conf functionality
pub use dynaform_conf::*;
