//! Form component
//!
//! [`FormComponent`] ties a descriptor list to its [`FormState`], the
//! form-level styles and the caller's submit callback.
//!
//! ## Example
//!
//! ```
//! use dynaform_forms::{FieldDescriptor, FieldList, FieldType, SubmitOutcome};
//! use dynaform_pages::component::{FormComponent, FormOptions};
//! use std::sync::{Arc, Mutex};
//!
//! let fields = FieldList::new(vec![
//!     FieldDescriptor::new(1, "Name", "name", FieldType::Text).required(),
//! ])
//! .unwrap();
//!
//! let received = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&received);
//! let mut form = FormComponent::new(fields, FormOptions::default())
//!     .unwrap()
//!     .on_submit(move |values| sink.lock().unwrap().push(values.clone()));
//!
//! form.input("name", "Ada").unwrap();
//! assert_eq!(form.submit(), SubmitOutcome::Submitted);
//! assert_eq!(received.lock().unwrap().len(), 1);
//! ```

use crate::rendering;
use crate::theme::Theme;
use dynaform_forms::{FieldList, FormResult, FormState, StyleAttrs, SubmitOutcome, Values};
use serde_json::Value;
use std::fmt;

/// Callback invoked with the form values after a successful submission
pub type SubmitCallback = Box<dyn FnMut(&Values) + Send>;

/// Form-level options
#[derive(Debug, Clone)]
pub struct FormOptions {
	/// Seed values from descriptor defaults
	pub edit: bool,
	pub container_styles: StyleAttrs,
	pub button_styles: StyleAttrs,
	pub button_container_styles: StyleAttrs,
	pub submit_label: String,
	pub theme: Theme,
}

impl Default for FormOptions {
	fn default() -> Self {
		Self {
			edit: false,
			container_styles: StyleAttrs::default(),
			button_styles: StyleAttrs::default(),
			button_container_styles: StyleAttrs::default(),
			submit_label: "Submit".to_string(),
			theme: Theme::default(),
		}
	}
}

impl FormOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn edit(mut self, edit: bool) -> Self {
		self.edit = edit;
		self
	}

	pub fn with_container_styles(mut self, styles: StyleAttrs) -> Self {
		self.container_styles = styles;
		self
	}

	pub fn with_button_styles(mut self, styles: StyleAttrs) -> Self {
		self.button_styles = styles;
		self
	}

	pub fn with_button_container_styles(mut self, styles: StyleAttrs) -> Self {
		self.button_container_styles = styles;
		self
	}

	pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
		self.submit_label = label.into();
		self
	}

	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}
}

/// A rendered, stateful form
pub struct FormComponent {
	fields: FieldList,
	options: FormOptions,
	state: FormState,
	on_submit: SubmitCallback,
}

impl fmt::Debug for FormComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormComponent")
			.field("fields", &self.fields)
			.field("options", &self.options)
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

impl FormComponent {
	/// Create a component with a no-op submit callback
	pub fn new(fields: FieldList, options: FormOptions) -> FormResult<Self> {
		let state = FormState::new(&fields, options.edit)?;
		Ok(Self {
			fields,
			options,
			state,
			on_submit: Box::new(|_| {}),
		})
	}

	/// Install the submit callback
	pub fn on_submit<F>(mut self, callback: F) -> Self
	where
		F: FnMut(&Values) + Send + 'static,
	{
		self.on_submit = Box::new(callback);
		self
	}

	pub fn fields(&self) -> &FieldList {
		&self.fields
	}

	pub fn options(&self) -> &FormOptions {
		&self.options
	}

	pub fn state(&self) -> &FormState {
		&self.state
	}

	/// Handle a change event
	pub fn input(&mut self, name: &str, value: impl Into<Value>) -> FormResult<()> {
		tracing::debug!(field = %name, "input");
		self.state.set_value(name, value)
	}

	/// Handle a blur event
	pub fn blur(&mut self, name: &str) -> FormResult<()> {
		tracing::debug!(field = %name, "blur");
		self.state.touch(name)
	}

	/// Handle a submit event
	pub fn submit(&mut self) -> SubmitOutcome {
		let callback = &mut self.on_submit;
		self.state.submit(|values| callback(values))
	}

	pub fn reset(&mut self) {
		self.state.reset();
	}

	/// Replace the descriptor list and reinitialize the state
	pub fn set_fields(&mut self, fields: FieldList) -> FormResult<()> {
		self.state.reinitialize(&fields, self.options.edit)?;
		self.fields = fields;
		Ok(())
	}

	/// Render the form for the current state
	pub fn render(&self) -> String {
		rendering::render_form(&self.fields, &self.state, &self.options)
	}

	/// Render the form inside a standalone page
	pub fn render_page(&self, title: &str) -> String {
		rendering::render_page(title, &self.render(), &self.options.theme)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dynaform_forms::{FieldDescriptor, FieldType, FormError};
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::sync::{Arc, Mutex};

	#[fixture]
	fn fields() -> FieldList {
		FieldList::new(vec![
			FieldDescriptor::new(1, "Email", "email", FieldType::Email)
				.required()
				.with_error_message(),
		])
		.unwrap()
	}

	#[rstest]
	fn test_default_options() {
		let options = FormOptions::default();

		assert_eq!(options.submit_label, "Submit");
		assert!(!options.edit);
		assert_eq!(options.theme, Theme::tailwind());
	}

	#[rstest]
	fn test_submit_forwards_values_to_callback(fields: FieldList) {
		// Arrange
		let received = Arc::new(Mutex::new(None));
		let sink = Arc::clone(&received);
		let mut form = FormComponent::new(fields, FormOptions::default())
			.unwrap()
			.on_submit(move |values| *sink.lock().unwrap() = Some(values.clone()));

		// Act
		form.input("email", "ada@example.com").unwrap();
		let outcome = form.submit();

		// Assert
		assert_eq!(outcome, SubmitOutcome::Submitted);
		let values = received.lock().unwrap().clone().unwrap();
		assert_eq!(values["email"], json!("ada@example.com"));
	}

	#[rstest]
	fn test_rejected_submit_renders_errors(fields: FieldList) {
		// Arrange
		let mut form = FormComponent::new(fields, FormOptions::default()).unwrap();

		// Act
		let outcome = form.submit();
		let html = form.render();

		// Assert
		assert!(!outcome.is_submitted());
		assert!(html.contains("Email is required"));
		assert!(html.contains("!border-[red]"));
	}

	#[rstest]
	fn test_blur_unknown_field(fields: FieldList) {
		let mut form = FormComponent::new(fields, FormOptions::default()).unwrap();

		assert!(matches!(form.blur("nope"), Err(FormError::UnknownField(_))));
	}

	#[rstest]
	fn test_set_fields_reinitializes(fields: FieldList) {
		// Arrange
		let mut form = FormComponent::new(fields, FormOptions::new().edit(true)).unwrap();
		form.blur("email").unwrap();
		let replacement = FieldList::new(vec![
			FieldDescriptor::new(2, "City", "city", FieldType::Text).with_value("Paris"),
		])
		.unwrap();

		// Act
		form.set_fields(replacement).unwrap();

		// Assert
		assert_eq!(form.fields().len(), 1);
		assert_eq!(form.state().value("city"), Some(&json!("Paris")));
		assert!(form.render().contains(r#"value="Paris""#));
	}

	#[rstest]
	fn test_custom_submit_label(fields: FieldList) {
		let form = FormComponent::new(
			fields,
			FormOptions::new().with_submit_label("Sign up").with_theme(Theme::plain()),
		)
		.unwrap();

		assert!(form.render().ends_with(r#"<div><button type="submit">Sign up</button></div></form>"#));
	}
}
