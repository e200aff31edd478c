//! # Dynaform
//!
//! Configuration-driven forms: describe fields as data, get validation,
//! state handling and rendered markup.
//!
//! A form is an ordered list of field descriptors. From that list Dynaform
//! derives a validation schema, initial values and the HTML for every
//! field, and tracks values, touched fields and errors while the form is
//! edited and submitted.
//!
//! ## Feature Flags
//!
//! - `forms` - Descriptors, validation schema and form state
//! - `pages` - HTML rendering and the form component (implies `forms`)
//! - `conf` - Loading definitions from TOML/JSON files and the environment
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use dynaform::prelude::*;
//!
//! let fields = FieldList::new(vec![
//!     FieldDescriptor::new(1, "First Name", "firstName", FieldType::Text)
//!         .required()
//!         .with_error_message(),
//!     FieldDescriptor::new(2, "Role", "role", FieldType::Enum)
//!         .required()
//!         .with_options([
//!             FieldOption::new("Admin", "admin"),
//!             FieldOption::new("Guest", "guest"),
//!         ]),
//! ])
//! .unwrap();
//!
//! let mut form = FormComponent::new(fields, FormOptions::default())
//!     .unwrap()
//!     .on_submit(|values| println!("submitted: {:?}", values));
//!
//! // Nothing filled in: the submission is rejected and errors are rendered
//! assert!(!form.submit().is_submitted());
//! assert!(form.render().contains("First Name is required"));
//!
//! form.input("firstName", "Ada").unwrap();
//! form.input("role", "guest").unwrap();
//! assert!(form.submit().is_submitted());
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "forms")]
pub use dynaform_forms::{
	DescriptorError, FieldDescriptor, FieldList, FieldOption, FieldType, FormError, FormErrors,
	FormState, StyleAttrs, SubmitOutcome, ValidationSchema, Values,
};

#[cfg(feature = "pages")]
pub use dynaform_pages::{FormComponent, FormOptions, Theme};

#[cfg(feature = "conf")]
pub use dynaform_conf::{FormSettings, SettingsBuilder, SettingsError};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use crate::{
		FieldDescriptor, FieldList, FieldOption, FieldType, FormError, FormErrors, FormState,
		StyleAttrs, SubmitOutcome, ValidationSchema, Values,
	};

	#[cfg(feature = "pages")]
	pub use crate::{FormComponent, FormOptions, Theme};

	#[cfg(feature = "conf")]
	pub use crate::{FormSettings, SettingsError};
}
