//! Form lifecycle integration tests
//!
//! Drives a descriptor list through deserialization, editing, blurring and
//! submission the way a page would.

use dynaform_forms::{
	DescriptorError, FieldDescriptor, FieldList, FieldType, FormState, SubmitOutcome,
	ValidationSchema, Values,
};
use proptest::prelude::*;
use rstest::*;
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn signup_fields() -> FieldList {
	let raw = json!([
		{ "id": 1, "label": "First Name", "name": "firstName", "type": "text", "required": true, "displayErrorMessage": true },
		{ "id": 2, "label": "Last Name", "name": "LastName", "type": "text", "required": true, "displayErrorMessage": true },
		{ "id": 3, "label": "Email", "name": "email", "type": "email", "required": true, "displayErrorMessage": true },
		{ "id": 4, "label": "Password", "name": "password", "type": "password", "required": true, "displayErrorMessage": true },
		{
			"id": 5, "label": "Role", "name": "role", "type": "enum", "required": true, "displayErrorMessage": true,
			"options": [
				{ "label": "Admin", "value": "admin" },
				{ "label": "User", "value": "user" },
				{ "label": "Guest", "value": "guest" }
			]
		}
	]);
	let descriptors: Vec<FieldDescriptor> = serde_json::from_value(raw).unwrap();
	FieldList::new(descriptors).unwrap()
}

// ============================================================================
// Lifecycle
// ============================================================================

#[rstest]
fn test_signup_form_full_lifecycle(signup_fields: FieldList) {
	// Arrange
	let mut state = FormState::new(&signup_fields, false).unwrap();
	let email = signup_fields.get("email").unwrap();

	// Act: first submission with nothing filled in
	let first = state.submit(|_| panic!("callback must not run"));

	// Assert
	let SubmitOutcome::Rejected(errors) = first else {
		panic!("expected rejection");
	};
	assert_eq!(
		errors.values().map(String::as_str).collect::<Vec<_>>(),
		vec![
			"First Name is required",
			"Last Name is required",
			"Email is required",
			"Password is required",
			"Role is required",
		]
	);

	// Act: fix the fields one by one
	state.set_value("firstName", "Ada").unwrap();
	state.set_value("LastName", "Lovelace").unwrap();
	state.set_value("email", "ada@").unwrap();
	assert_eq!(state.visible_error(email), Some("Invalid email format"));
	state.set_value("email", "ada@example.com").unwrap();
	state.set_value("password", "analytical").unwrap();
	state.set_value("role", "guest").unwrap();

	let mut submitted = Values::new();
	let second = state.submit(|values| submitted = values.clone());

	// Assert
	assert_eq!(second, SubmitOutcome::Submitted);
	assert_eq!(state.submit_count(), 2);
	assert_eq!(
		serde_json::to_value(&submitted).unwrap(),
		json!({
			"firstName": "Ada",
			"LastName": "Lovelace",
			"email": "ada@example.com",
			"password": "analytical",
			"role": "guest"
		})
	);
}

#[rstest]
fn test_edit_mode_prefills_and_validates(signup_fields: FieldList) {
	// Arrange
	let mut descriptors = signup_fields.as_slice().to_vec();
	descriptors[0].value = Some(json!("Grace"));
	descriptors[4].value = Some(json!("superuser"));
	let fields = FieldList::new(descriptors).unwrap();

	// Act
	let mut state = FormState::new(&fields, true).unwrap();
	state.touch("role").unwrap();

	// Assert
	assert_eq!(state.value("firstName"), Some(&json!("Grace")));
	assert_eq!(state.error("role"), Some("Please select a valid Role"));
}

#[rstest]
fn test_duplicate_names_rejected_before_state_exists() {
	let raw = json!([
		{ "id": 1, "label": "A", "name": "dup", "type": "text" },
		{ "id": 2, "label": "B", "name": "dup", "type": "number" }
	]);
	let descriptors: Vec<FieldDescriptor> = serde_json::from_value(raw).unwrap();

	let result = FieldList::new(descriptors);

	assert_eq!(result, Err(DescriptorError::DuplicateName("dup".to_string())));
}

// ============================================================================
// Properties
// ============================================================================

#[rstest]
fn test_optional_text_fields_accept_anything() {
	let fields = FieldList::new(vec![FieldDescriptor::new(
		1,
		"Notes",
		"notes",
		FieldType::Textarea,
	)])
	.unwrap();
	let schema = ValidationSchema::from_fields(&fields).unwrap();

	proptest!(|(text in ".*")| {
		let errors = schema.validate(&Values::from([("notes".to_string(), json!(text))]));
		prop_assert!(errors.is_empty());
	});
}

#[rstest]
fn test_errors_only_name_known_fields(signup_fields: FieldList) {
	let schema = ValidationSchema::from_fields(&signup_fields).unwrap();

	proptest!(|(name in "[a-zA-Z]{1,10}", value in ".{0,20}")| {
		let values = Values::from([(name, json!(value))]);
		let errors = schema.validate(&values);
		for key in errors.keys() {
			prop_assert!(signup_fields.contains(key));
		}
	});
}
