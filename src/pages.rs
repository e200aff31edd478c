//! HTML rendering and the stateful form component
//!
//! ## Example
//!
//! ```rust
//! use dynaform::forms::{FieldDescriptor, FieldList, FieldType};
//! use dynaform::pages::{FormComponent, FormOptions, Theme};
//!
//! let fields = FieldList::new(vec![
//!     FieldDescriptor::new(1, "City", "city", FieldType::Text),
//! ])
//! .unwrap();
//!
//! let form = FormComponent::new(fields, FormOptions::new().with_theme(Theme::plain())).unwrap();
//! assert!(form.render().contains(r#"<label for="city">City</label>"#));
//! ```

// Re-export all dynaform-pages functionality
pub use dynaform_pages::*;
