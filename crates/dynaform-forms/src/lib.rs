//! Declarative form definitions for Dynaform
//!
//! This crate holds everything about a form that is not rendering:
//! - Field descriptors and the validated, ordered descriptor list
//! - Derivation of a validation schema from the descriptor list
//! - Form state: values, touched fields, errors and submission
//!
//! ## Example
//!
//! ```
//! use dynaform_forms::{FieldDescriptor, FieldList, FieldType, FormState, SubmitOutcome};
//!
//! let fields = FieldList::new(vec![
//!     FieldDescriptor::new(1, "Email", "email", FieldType::Email).required(),
//! ])
//! .unwrap();
//!
//! let mut state = FormState::new(&fields, false).unwrap();
//! state.set_value("email", "ada@example.com").unwrap();
//!
//! let mut submitted = None;
//! let outcome = state.submit(|values| submitted = Some(values.clone()));
//! assert_eq!(outcome, SubmitOutcome::Submitted);
//! assert!(submitted.is_some());
//! ```

pub mod descriptor;
pub mod error;
pub mod schema;
pub mod state;

pub use descriptor::{
	FieldDescriptor, FieldList, FieldOption, FieldType, StyleAttrs, Values, initial_values,
};
pub use error::{DescriptorError, FormError, FormResult};
pub use schema::{FieldRule, FormErrors, RuleKind, ValidationSchema};
pub use state::{FormState, SubmitOutcome};
