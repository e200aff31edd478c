//! Form state: current values, touched fields, errors and submission

use crate::descriptor::{FieldDescriptor, FieldList, Values, initial_values};
use crate::error::{FormError, FormResult};
use crate::schema::{FormErrors, ValidationSchema};
use indexmap::IndexSet;
use serde_json::Value;

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// All fields passed validation and the callback was invoked
	Submitted,
	/// At least one field failed validation; the callback was not invoked
	Rejected(FormErrors),
}

impl SubmitOutcome {
	pub fn is_submitted(&self) -> bool {
		matches!(self, SubmitOutcome::Submitted)
	}
}

/// Mutable state of one form instance
///
/// Every change revalidates the whole form against the derived schema.
/// Errors are tracked for every field but only surfaced for touched ones.
#[derive(Debug, Clone)]
pub struct FormState {
	schema: ValidationSchema,
	initial: Values,
	values: Values,
	touched: IndexSet<String>,
	errors: FormErrors,
	submit_count: u32,
}

impl FormState {
	/// Create the state for a descriptor list
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{FieldDescriptor, FieldList, FieldType, FormState};
	/// use serde_json::json;
	///
	/// let fields = FieldList::new(vec![
	///     FieldDescriptor::new(1, "Name", "name", FieldType::Text).with_value("Ada"),
	/// ])
	/// .unwrap();
	///
	/// let state = FormState::new(&fields, true).unwrap();
	/// assert_eq!(state.value("name"), Some(&json!("Ada")));
	/// assert!(state.errors().is_empty());
	/// ```
	pub fn new(fields: &FieldList, edit: bool) -> FormResult<Self> {
		let schema = ValidationSchema::from_fields(fields)?;
		let initial = initial_values(fields, edit);
		tracing::debug!(fields = fields.len(), edit, "initialized form state");
		Ok(Self {
			schema,
			values: initial.clone(),
			initial,
			touched: IndexSet::new(),
			errors: FormErrors::new(),
			submit_count: 0,
		})
	}

	/// Rebuild the state for a new descriptor list
	pub fn reinitialize(&mut self, fields: &FieldList, edit: bool) -> FormResult<()> {
		*self = Self::new(fields, edit)?;
		tracing::debug!("reinitialized form state");
		Ok(())
	}

	pub fn schema(&self) -> &ValidationSchema {
		&self.schema
	}

	pub fn values(&self) -> &Values {
		&self.values
	}

	pub fn value(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn errors(&self) -> &FormErrors {
		&self.errors
	}

	pub fn error(&self, name: &str) -> Option<&str> {
		self.errors.get(name).map(String::as_str)
	}

	pub fn is_touched(&self, name: &str) -> bool {
		self.touched.contains(name)
	}

	pub fn submit_count(&self) -> u32 {
		self.submit_count
	}

	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	/// Whether any value differs from its initial value
	pub fn is_dirty(&self) -> bool {
		self.values != self.initial
	}

	fn ensure_known(&self, name: &str) -> FormResult<()> {
		if self.values.contains_key(name) {
			Ok(())
		} else {
			Err(FormError::UnknownField(name.to_string()))
		}
	}

	/// Update one value and revalidate the form
	///
	/// # Errors
	///
	/// Returns [`FormError::UnknownField`] when no descriptor has this name.
	pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> FormResult<()> {
		self.ensure_known(name)?;
		self.values.insert(name.to_string(), value.into());
		tracing::debug!(field = %name, "value changed");
		self.validate();
		Ok(())
	}

	/// Mark a field as touched (blurred) and revalidate the form
	pub fn touch(&mut self, name: &str) -> FormResult<()> {
		self.ensure_known(name)?;
		if self.touched.insert(name.to_string()) {
			tracing::debug!(field = %name, "field touched");
		}
		self.validate();
		Ok(())
	}

	/// Revalidate every field. Returns whether the form is valid.
	pub fn validate(&mut self) -> bool {
		self.errors = self.schema.validate(&self.values);
		self.errors.is_empty()
	}

	/// Attempt a submission.
	///
	/// Every field is marked touched so that all errors become visible.
	/// The callback receives the current values only when validation passes.
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{FieldDescriptor, FieldList, FieldType, FormState, SubmitOutcome};
	///
	/// let fields = FieldList::new(vec![
	///     FieldDescriptor::new(1, "Name", "name", FieldType::Text).required(),
	/// ])
	/// .unwrap();
	/// let mut state = FormState::new(&fields, false).unwrap();
	///
	/// let mut calls = 0;
	/// let outcome = state.submit(|_| calls += 1);
	///
	/// assert!(matches!(outcome, SubmitOutcome::Rejected(ref errors) if errors["name"] == "Name is required"));
	/// assert_eq!(calls, 0);
	/// assert!(state.is_touched("name"));
	/// ```
	pub fn submit<F>(&mut self, callback: F) -> SubmitOutcome
	where
		F: FnOnce(&Values),
	{
		self.touched.extend(self.values.keys().cloned());
		self.submit_count += 1;

		if self.validate() {
			tracing::info!(attempt = self.submit_count, "form submitted");
			callback(&self.values);
			SubmitOutcome::Submitted
		} else {
			tracing::warn!(
				attempt = self.submit_count,
				errors = self.errors.len(),
				"form submission rejected"
			);
			SubmitOutcome::Rejected(self.errors.clone())
		}
	}

	/// The message to display for a field, if any.
	///
	/// A message is shown only for a touched field in error whose
	/// descriptor asks for messages to be displayed.
	pub fn visible_error(&self, field: &FieldDescriptor) -> Option<&str> {
		if !field.display_error_message || !self.is_touched(&field.name) {
			return None;
		}
		self.error(&field.name)
	}

	/// Whether the field should carry the error border
	pub fn has_error_style(&self, name: &str) -> bool {
		self.is_touched(name) && self.errors.contains_key(name)
	}

	/// Restore initial values and clear touched fields, errors and the
	/// submit count
	pub fn reset(&mut self) {
		self.values = self.initial.clone();
		self.touched.clear();
		self.errors.clear();
		self.submit_count = 0;
		tracing::debug!("form state reset");
	}
}
