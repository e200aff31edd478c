//! Server-side HTML rendering
//!
//! Each field renders as a container holding its label, its control and,
//! when the form state says so, its validation message. The control is
//! chosen by the field's type tag.
//!
//! All text content and attribute values pass through [`html_escape`].

use crate::component::FormOptions;
use crate::theme::Theme;
use dynaform_forms::{FieldDescriptor, FieldList, FieldType, FormState, StyleAttrs};
use indexmap::IndexMap;
use serde_json::Value;

/// HTML escape utility
///
/// # Examples
///
/// ```
/// use dynaform_pages::rendering::html_escape;
///
/// assert_eq!(html_escape(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Ordered attribute builder for a single element
///
/// Attributes render in insertion order. Boolean attributes (`disabled`,
/// `checked`, `selected`) render without a value.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
	attrs: IndexMap<String, Option<String>>,
}

impl Attrs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a key/value attribute, replacing any previous value
	pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.insert(key.into(), Some(value.into()));
		self
	}

	/// Add a boolean attribute
	pub fn flag(mut self, key: impl Into<String>) -> Self {
		self.attrs.insert(key.into(), None);
		self
	}

	pub fn flag_if(self, key: impl Into<String>, condition: bool) -> Self {
		if condition { self.flag(key) } else { self }
	}

	/// Append CSS classes. Empty strings are ignored.
	pub fn class(mut self, value: &str) -> Self {
		let value = value.trim();
		if value.is_empty() {
			return self;
		}
		match self.attrs.get_mut("class") {
			Some(Some(existing)) => {
				existing.push(' ');
				existing.push_str(value);
			}
			_ => {
				self.attrs
					.insert("class".to_string(), Some(value.to_string()));
			}
		}
		self
	}

	/// Apply caller-supplied classes and inline styles
	pub fn styles(self, styles: &StyleAttrs) -> Self {
		let with_class = match styles.class_name.as_deref() {
			Some(class_name) => self.class(class_name),
			None => self,
		};
		match styles.to_css() {
			Some(css) => with_class.attr("style", css),
			None => with_class,
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.attrs.get(key).and_then(|value| value.as_deref())
	}

	pub fn contains(&self, key: &str) -> bool {
		self.attrs.contains_key(key)
	}

	/// Render as a leading-space attribute list
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_pages::rendering::Attrs;
	///
	/// let attrs = Attrs::new().attr("name", "email").class("a").class("b").flag("disabled");
	/// assert_eq!(attrs.render(), r#" name="email" class="a b" disabled"#);
	/// ```
	pub fn render(&self) -> String {
		let mut html = String::new();
		for (key, value) in &self.attrs {
			match value {
				Some(value) => html.push_str(&format!(r#" {}="{}""#, key, html_escape(value))),
				None => html.push_str(&format!(" {}", key)),
			}
		}
		html
	}
}

fn value_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

fn is_checked(value: &Value) -> bool {
	match value {
		Value::Bool(b) => *b,
		Value::String(s) => matches!(s.trim(), "true" | "on" | "1"),
		Value::Number(n) => n.as_i64() == Some(1),
		_ => false,
	}
}

/// Classes and attributes shared by every control of a field
fn control_attrs(field: &FieldDescriptor, state: &FormState, theme: &Theme) -> Attrs {
	let border_color = if state.has_error_style(&field.name) {
		theme.error_border
	} else if matches!(field.field_type, FieldType::Textarea | FieldType::Enum) {
		theme.border_color
	} else {
		theme.input_border_color
	};

	let mut attrs = Attrs::new()
		.attr("id", field.name.as_str())
		.attr("name", field.name.as_str())
		.class(theme.control);
	if field.field_type != FieldType::File {
		attrs = attrs.class(theme.border);
	}
	attrs
		.class(border_color)
		.class(theme.control_padding)
		.styles(&field.input_styles)
		.flag_if("disabled", field.disabled)
}

fn render_select(field: &FieldDescriptor, current: &str, attrs: Attrs) -> String {
	let mut html = format!("<select{}>", attrs.render());
	let placeholder = Attrs::new()
		.attr("value", "")
		.flag("disabled")
		.flag_if("selected", current.is_empty());
	html.push_str(&format!(
		"<option{}>Select {}</option>",
		placeholder.render(),
		html_escape(&field.label)
	));
	for option in &field.options {
		let option_attrs = Attrs::new()
			.attr("value", option.value.as_str())
			.flag_if("selected", option.value == current);
		html.push_str(&format!(
			"<option{}>{}</option>",
			option_attrs.render(),
			html_escape(&option.label)
		));
	}
	html.push_str("</select>");
	html
}

fn render_radio_group(field: &FieldDescriptor, current: &str, state: &FormState, theme: &Theme) -> String {
	let mut group = Attrs::new()
		.attr("id", field.name.as_str())
		.attr("role", "radiogroup")
		.class(theme.control_padding);
	if state.has_error_style(&field.name) {
		group = group.class(theme.border).class(theme.error_border);
	}
	let mut html = format!("<div{}>", group.render());
	for (index, option) in field.options.iter().enumerate() {
		let input = Attrs::new()
			.attr("type", "radio")
			.attr("id", format!("{}-{}", field.name, index))
			.attr("name", field.name.as_str())
			.attr("value", option.value.as_str())
			.styles(&field.input_styles)
			.flag_if("checked", option.value == current)
			.flag_if("disabled", field.disabled);
		html.push_str(&format!(
			"<label><input{} /> {}</label>",
			input.render(),
			html_escape(&option.label)
		));
	}
	html.push_str("</div>");
	html
}

/// Render the control for one field
///
/// # Examples
///
/// ```
/// use dynaform_forms::{FieldDescriptor, FieldList, FieldType, FormState};
/// use dynaform_pages::rendering::render_widget;
/// use dynaform_pages::theme::Theme;
///
/// let fields = FieldList::new(vec![FieldDescriptor::new(1, "Email", "email", FieldType::Email)]).unwrap();
/// let state = FormState::new(&fields, false).unwrap();
///
/// let html = render_widget(fields.get("email").unwrap(), &state, &Theme::plain());
/// assert_eq!(html, r#"<input id="email" name="email" type="email" placeholder="Enter Email" value="" />"#);
/// ```
pub fn render_widget(field: &FieldDescriptor, state: &FormState, theme: &Theme) -> String {
	let value = state.value(&field.name).unwrap_or(&Value::Null);
	let text = value_text(value);
	let placeholder = format!("Enter {}", field.label);

	match field.field_type {
		FieldType::Textarea => {
			let attrs = control_attrs(field, state, theme).attr("placeholder", placeholder);
			format!("<textarea{}>{}</textarea>", attrs.render(), html_escape(&text))
		}
		FieldType::Enum => render_select(field, &text, control_attrs(field, state, theme)),
		FieldType::Radio => render_radio_group(field, &text, state, theme),
		FieldType::Checkbox => {
			let attrs = control_attrs(field, state, theme)
				.attr("type", "checkbox")
				.flag_if("checked", is_checked(value));
			format!("<input{} />", attrs.render())
		}
		FieldType::File => {
			let attrs = control_attrs(field, state, theme).attr("type", "file");
			format!("<input{} />", attrs.render())
		}
		other => {
			let attrs = control_attrs(field, state, theme)
				.attr("type", other.html_input_type().unwrap_or("text"))
				.attr("placeholder", placeholder)
				.attr("value", text);
			format!("<input{} />", attrs.render())
		}
	}
}

/// Render one field: container, label, control and visible message
pub fn render_field(field: &FieldDescriptor, state: &FormState, theme: &Theme) -> String {
	let container = Attrs::new()
		.class(theme.field_container)
		.styles(&field.input_container_styles);
	let label = Attrs::new()
		.attr("for", field.name.as_str())
		.class(theme.label)
		.styles(&field.label_styles);

	let mut html = format!("<div{}>", container.render());
	html.push_str(&format!(
		"<label{}>{}</label>",
		label.render(),
		html_escape(&field.label)
	));
	html.push_str(&render_widget(field, state, theme));
	if let Some(message) = state.visible_error(field) {
		let error = Attrs::new().class(theme.error_message);
		html.push_str(&format!("<div{}>{}</div>", error.render(), html_escape(message)));
	}
	html.push_str("</div>");
	html
}

/// Render the complete form, fields in descriptor order followed by the
/// submit button
pub fn render_form(fields: &FieldList, state: &FormState, options: &FormOptions) -> String {
	let theme = &options.theme;
	let container = Attrs::new().styles(&options.container_styles);
	let button_container = Attrs::new().styles(&options.button_container_styles);
	let button = Attrs::new()
		.attr("type", "submit")
		.class(theme.button)
		.styles(&options.button_styles);

	let mut html = String::from(r#"<form method="post" novalidate>"#);
	html.push_str(&format!("<div{}>", container.render()));
	for field in fields {
		html.push_str(&render_field(field, state, theme));
	}
	html.push_str("</div>");
	html.push_str(&format!(
		"<div{}><button{}>{}</button></div>",
		button_container.render(),
		button.render(),
		html_escape(&options.submit_label)
	));
	html.push_str("</form>");
	html
}

/// Wrap rendered form markup in a standalone HTML document with a heading
pub fn render_page(title: &str, form_html: &str, theme: &Theme) -> String {
	let wrapper = Attrs::new().class(theme.page);
	let heading = Attrs::new().class(theme.heading);
	let title = html_escape(title);
	format!(
		"<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{vars}</style>\n</head>\n<body>\n<div{wrapper}><h1{heading}>{title}</h1>{form_html}</div>\n</body>\n</html>\n",
		vars = theme.palette.css_variables(),
		wrapper = wrapper.render(),
		heading = heading.render(),
	)
}
