//! Rendering integration tests
//!
//! Renders the signup page layout end to end and checks escaping
//! properties of the markup.

use dynaform_forms::{FieldDescriptor, FieldList, FieldOption, FieldType, StyleAttrs};
use dynaform_pages::{FormComponent, FormOptions, Theme, html_escape};
use proptest::prelude::*;
use rstest::*;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn signup_form() -> FormComponent {
	let label_styles = StyleAttrs::new()
		.with_style("fontWeight", "500")
		.with_style("color", "black");
	let input_styles = StyleAttrs::new().with_style("borderRadius", "10px");

	let fields = FieldList::new(vec![
		FieldDescriptor::new(1, "First Name", "firstName", FieldType::Text)
			.required()
			.with_error_message()
			.with_label_styles(label_styles.clone())
			.with_input_styles(input_styles.clone()),
		FieldDescriptor::new(2, "Email", "email", FieldType::Email)
			.required()
			.with_label_styles(label_styles)
			.with_input_styles(input_styles),
		FieldDescriptor::new(6, "Role", "role", FieldType::Enum)
			.required()
			.with_options([
				FieldOption::new("Admin", "admin"),
				FieldOption::new("User", "user"),
				FieldOption::new("Guest", "guest"),
			]),
	])
	.unwrap();

	let options = FormOptions::new()
		.with_container_styles(
			StyleAttrs::new()
				.with_style("display", "grid")
				.with_style("gridTemplateColumns", "1fr 1fr")
				.with_style("gap", "5px"),
		)
		.with_button_container_styles(
			StyleAttrs::new()
				.with_style("display", "flex")
				.with_style("justifyContent", "center"),
		);

	FormComponent::new(fields, options).unwrap()
}

// ============================================================================
// Layout
// ============================================================================

#[rstest]
fn test_fields_render_in_descriptor_order(signup_form: FormComponent) {
	// Act
	let html = signup_form.render();

	// Assert
	let first = html.find(r#"for="firstName""#).unwrap();
	let email = html.find(r#"for="email""#).unwrap();
	let role = html.find(r#"for="role""#).unwrap();
	assert!(first < email && email < role);
}

#[rstest]
fn test_form_level_styles_applied(signup_form: FormComponent) {
	let html = signup_form.render();

	assert!(html.starts_with(
		r#"<form method="post" novalidate><div style="display: grid; grid-template-columns: 1fr 1fr; gap: 5px">"#
	));
	assert!(html.contains(
		r#"<div style="display: flex; justify-content: center"><button type="submit" class="px-5 py-2 bg-blue-700 rounded-md text-center font-semibold mt-2">Submit</button></div>"#
	));
}

#[rstest]
fn test_only_flagged_fields_show_messages(mut signup_form: FormComponent) {
	// Act
	signup_form.submit();
	let html = signup_form.render();

	// Assert
	assert!(html.contains("First Name is required"));
	assert!(!html.contains("Email is required"));
	assert!(!html.contains("Role is required"));
	assert_eq!(html.matches("!border-[red]").count(), 3);
}

#[rstest]
fn test_user_values_are_escaped(mut signup_form: FormComponent) {
	signup_form
		.input("firstName", r#""><script>alert(1)</script>"#)
		.unwrap();

	let html = signup_form.render();

	assert!(!html.contains("<script>"));
	assert!(html.contains("&quot;&gt;&lt;script&gt;"));
}

#[rstest]
fn test_plain_theme_drops_framework_classes(signup_form: FormComponent) {
	let fields = signup_form.fields().clone();
	let form = FormComponent::new(fields, FormOptions::new().with_theme(Theme::plain())).unwrap();

	let html = form.render();

	assert!(!html.contains("h-[45px]"));
	assert!(!html.contains("bg-blue-700"));
}

// ============================================================================
// Properties
// ============================================================================

#[rstest]
fn test_escaped_text_has_no_markup_characters() {
	proptest!(|(input in ".*")| {
		let escaped = html_escape(&input);
		prop_assert!(!escaped.contains('<'));
		prop_assert!(!escaped.contains('>'));
		prop_assert!(!escaped.contains('"'));
		prop_assert!(!escaped.contains('\''));
	});
}

#[rstest]
fn test_escape_is_reversible() {
	proptest!(|(input in ".*")| {
		let unescaped = html_escape(&input)
			.replace("&lt;", "<")
			.replace("&gt;", ">")
			.replace("&quot;", "\"")
			.replace("&#x27;", "'")
			.replace("&amp;", "&");
		prop_assert_eq!(unescaped, input);
	});
}
