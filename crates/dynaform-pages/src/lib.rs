//! HTML rendering for Dynaform forms
//!
//! - [`rendering`]: server-side markup for fields, forms and pages
//! - [`theme`]: palette and the class strings the renderer applies
//! - [`component`]: the stateful [`FormComponent`] handling input, blur
//!   and submit events
//!
//! ## Example
//!
//! ```
//! use dynaform_forms::{FieldDescriptor, FieldList, FieldType};
//! use dynaform_pages::{FormComponent, FormOptions};
//!
//! let fields = FieldList::new(vec![
//!     FieldDescriptor::new(1, "Email", "email", FieldType::Email).required(),
//! ])
//! .unwrap();
//!
//! let form = FormComponent::new(fields, FormOptions::default()).unwrap();
//! let html = form.render();
//! assert!(html.starts_with("<form"));
//! assert!(html.contains(r#"placeholder="Enter Email""#));
//! ```

pub mod component;
pub mod rendering;
pub mod theme;

pub use component::{FormComponent, FormOptions, SubmitCallback};
pub use rendering::{Attrs, html_escape, render_field, render_form, render_page, render_widget};
pub use theme::{Palette, Theme};
