//! Field descriptors
//!
//! A [`FieldDescriptor`] is the caller-authored description of one input:
//! its key, type tag, constraints and presentation attributes. Descriptors
//! are collected into a [`FieldList`], which is the only form in which the
//! rest of the workspace accepts them. Building a `FieldList` enforces the
//! list invariants (unique names, options present exactly where a type
//! needs them, compilable patterns).

use crate::error::DescriptorError;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Field values keyed by field name, in descriptor order
pub type Values = IndexMap<String, serde_json::Value>;

/// The fixed set of field type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	Text,
	Email,
	Password,
	Textarea,
	Number,
	Enum,
	Time,
	Date,
	Checkbox,
	Radio,
	File,
}

impl FieldType {
	/// Every type tag, in declaration order
	pub const ALL: [FieldType; 11] = [
		FieldType::Text,
		FieldType::Email,
		FieldType::Password,
		FieldType::Textarea,
		FieldType::Number,
		FieldType::Enum,
		FieldType::Time,
		FieldType::Date,
		FieldType::Checkbox,
		FieldType::Radio,
		FieldType::File,
	];

	/// The type tag as written in descriptor data
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::FieldType;
	///
	/// assert_eq!(FieldType::Enum.as_str(), "enum");
	/// assert_eq!(FieldType::Textarea.as_str(), "textarea");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Text => "text",
			FieldType::Email => "email",
			FieldType::Password => "password",
			FieldType::Textarea => "textarea",
			FieldType::Number => "number",
			FieldType::Enum => "enum",
			FieldType::Time => "time",
			FieldType::Date => "date",
			FieldType::Checkbox => "checkbox",
			FieldType::Radio => "radio",
			FieldType::File => "file",
		}
	}

	/// The `type` attribute for types rendered as an `<input>` element.
	///
	/// Returns `None` for `textarea` and `enum`, which render their own
	/// elements.
	pub fn html_input_type(&self) -> Option<&'static str> {
		match self {
			FieldType::Textarea | FieldType::Enum => None,
			other => Some(other.as_str()),
		}
	}

	/// Whether descriptors of this type carry a fixed option set
	pub fn has_options(&self) -> bool {
		matches!(self, FieldType::Enum | FieldType::Radio)
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

impl FromStr for FieldType {
	type Err = DescriptorError;

	/// Parse a type tag
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{DescriptorError, FieldType};
	///
	/// assert_eq!("radio".parse::<FieldType>(), Ok(FieldType::Radio));
	/// assert_eq!(
	///     "color".parse::<FieldType>(),
	///     Err(DescriptorError::UnknownFieldType("color".to_string()))
	/// );
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		FieldType::ALL
			.iter()
			.copied()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| DescriptorError::UnknownFieldType(s.to_string()))
	}
}

/// One label/value pair of an `enum` or `radio` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
	pub label: String,
	pub value: String,
}

impl FieldOption {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

// Properties that take a bare number in inline styles. Every other numeric
// value is a pixel length.
const UNITLESS_PROPERTIES: &[&str] = &[
	"animation-iteration-count",
	"aspect-ratio",
	"column-count",
	"flex",
	"flex-grow",
	"flex-shrink",
	"font-weight",
	"grid-area",
	"grid-column",
	"grid-row",
	"line-clamp",
	"line-height",
	"opacity",
	"order",
	"orphans",
	"tab-size",
	"widows",
	"z-index",
	"zoom",
];

/// Presentation attributes for one element: extra CSS classes and inline
/// style declarations.
///
/// Style property names are stored in kebab-case. Names given in camelCase
/// (`fontWeight`) are converted on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAttrs {
	#[serde(default, alias = "className", skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,

	#[serde(
		default,
		deserialize_with = "deserialize_style",
		skip_serializing_if = "IndexMap::is_empty"
	)]
	pub style: IndexMap<String, String>,
}

impl StyleAttrs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the extra CSS classes
	pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
		self.class_name = Some(class_name.into());
		self
	}

	/// Add one inline style declaration
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::StyleAttrs;
	///
	/// let attrs = StyleAttrs::new()
	///     .with_style("fontWeight", "500")
	///     .with_style("color", "black");
	/// assert_eq!(attrs.to_css().as_deref(), Some("font-weight: 500; color: black"));
	/// ```
	pub fn with_style(mut self, property: &str, value: impl Into<String>) -> Self {
		self.style.insert(css_property_name(property), value.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.class_name.as_deref().is_none_or(str::is_empty) && self.style.is_empty()
	}

	/// Render the inline style declarations, or `None` when there are none
	pub fn to_css(&self) -> Option<String> {
		if self.style.is_empty() {
			return None;
		}
		let declarations: Vec<String> = self
			.style
			.iter()
			.map(|(property, value)| format!("{}: {}", property, value))
			.collect();
		Some(declarations.join("; "))
	}
}

/// Convert a camelCase style key to a CSS property name.
///
/// Custom properties (`--accent`) and names that are already kebab-case
/// pass through unchanged.
fn css_property_name(key: &str) -> String {
	if key.starts_with("--") {
		return key.to_string();
	}
	let mut name = String::with_capacity(key.len() + 4);
	for ch in key.chars() {
		if ch.is_ascii_uppercase() {
			name.push('-');
			name.push(ch.to_ascii_lowercase());
		} else {
			name.push(ch);
		}
	}
	name
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StyleValue {
	Text(String),
	Integer(i64),
	Float(f64),
}

impl StyleValue {
	fn into_css(self, property: &str) -> String {
		let number = match self {
			StyleValue::Text(text) => return text,
			StyleValue::Integer(i) => i.to_string(),
			StyleValue::Float(f) => f.to_string(),
		};
		if number == "0" || UNITLESS_PROPERTIES.contains(&property) {
			number
		} else {
			format!("{}px", number)
		}
	}
}

fn deserialize_style<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = IndexMap::<String, StyleValue>::deserialize(deserializer)?;
	Ok(raw
		.into_iter()
		.map(|(key, value)| {
			let property = css_property_name(&key);
			let css = value.into_css(&property);
			(property, css)
		})
		.collect())
}

/// Description of a single form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	pub id: u32,
	pub label: String,
	pub name: String,

	#[serde(rename = "type")]
	pub field_type: FieldType,

	#[serde(default)]
	pub required: bool,

	#[serde(default)]
	pub disabled: bool,

	/// Whether the validation message element is rendered for this field
	#[serde(default, alias = "displayErrorMessage")]
	pub display_error_message: bool,

	#[serde(default, alias = "regexPattern", skip_serializing_if = "Option::is_none")]
	pub regex_pattern: Option<String>,

	/// Default value, used as the initial value in edit mode
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<serde_json::Value>,

	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<FieldOption>,

	#[serde(default, alias = "labelStyles", skip_serializing_if = "StyleAttrs::is_empty")]
	pub label_styles: StyleAttrs,

	#[serde(default, alias = "inputStyles", skip_serializing_if = "StyleAttrs::is_empty")]
	pub input_styles: StyleAttrs,

	#[serde(
		default,
		alias = "inputContainerStyles",
		skip_serializing_if = "StyleAttrs::is_empty"
	)]
	pub input_container_styles: StyleAttrs,
}

impl FieldDescriptor {
	/// Create a descriptor with no constraints and no styling
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{FieldDescriptor, FieldType};
	///
	/// let field = FieldDescriptor::new(1, "First Name", "firstName", FieldType::Text);
	/// assert_eq!(field.name, "firstName");
	/// assert!(!field.required);
	/// assert!(!field.display_error_message);
	/// ```
	pub fn new(
		id: u32,
		label: impl Into<String>,
		name: impl Into<String>,
		field_type: FieldType,
	) -> Self {
		Self {
			id,
			label: label.into(),
			name: name.into(),
			field_type,
			required: false,
			disabled: false,
			display_error_message: false,
			regex_pattern: None,
			value: None,
			options: Vec::new(),
			label_styles: StyleAttrs::default(),
			input_styles: StyleAttrs::default(),
			input_container_styles: StyleAttrs::default(),
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	/// Render the validation message for this field when it is in error
	pub fn with_error_message(mut self) -> Self {
		self.display_error_message = true;
		self
	}

	pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.regex_pattern = Some(pattern.into());
		self
	}

	/// Set the option set of an `enum` or `radio` field
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{FieldDescriptor, FieldOption, FieldType};
	///
	/// let field = FieldDescriptor::new(6, "Role", "role", FieldType::Enum).with_options([
	///     FieldOption::new("Admin", "admin"),
	///     FieldOption::new("User", "user"),
	/// ]);
	/// assert_eq!(field.options.len(), 2);
	/// ```
	pub fn with_options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
		self.options = options.into_iter().collect();
		self
	}

	pub fn with_value(mut self, value: impl Into<serde_json::Value>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_label_styles(mut self, styles: StyleAttrs) -> Self {
		self.label_styles = styles;
		self
	}

	pub fn with_input_styles(mut self, styles: StyleAttrs) -> Self {
		self.input_styles = styles;
		self
	}

	pub fn with_container_styles(mut self, styles: StyleAttrs) -> Self {
		self.input_container_styles = styles;
		self
	}

	/// Whether `value` is one of this field's option values
	pub fn has_option_value(&self, value: &str) -> bool {
		self.options.iter().any(|option| option.value == value)
	}
}

/// An ordered descriptor list that satisfies the list invariants
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldList {
	fields: Vec<FieldDescriptor>,
}

impl FieldList {
	/// Validate and wrap a descriptor list
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{DescriptorError, FieldDescriptor, FieldList, FieldType};
	///
	/// let result = FieldList::new(vec![
	///     FieldDescriptor::new(1, "Email", "email", FieldType::Email),
	///     FieldDescriptor::new(2, "Backup email", "email", FieldType::Email),
	/// ]);
	/// assert_eq!(result, Err(DescriptorError::DuplicateName("email".to_string())));
	/// ```
	pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, DescriptorError> {
		let mut seen = HashSet::new();
		for field in &fields {
			if field.name.trim().is_empty() {
				return Err(DescriptorError::EmptyName { id: field.id });
			}
			if !seen.insert(field.name.as_str()) {
				return Err(DescriptorError::DuplicateName(field.name.clone()));
			}
			match (field.field_type.has_options(), field.options.is_empty()) {
				(true, true) => return Err(DescriptorError::MissingOptions(field.name.clone())),
				(false, false) => {
					return Err(DescriptorError::UnexpectedOptions {
						name: field.name.clone(),
						field_type: field.field_type,
					});
				}
				_ => {}
			}
			if let Some(pattern) = &field.regex_pattern {
				Regex::new(pattern).map_err(|e| DescriptorError::InvalidPattern {
					name: field.name.clone(),
					message: e.to_string(),
				})?;
			}
		}
		Ok(Self { fields })
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
		self.fields.iter()
	}

	pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|field| field.name.as_str())
	}

	pub fn as_slice(&self) -> &[FieldDescriptor] {
		&self.fields
	}
}

impl TryFrom<Vec<FieldDescriptor>> for FieldList {
	type Error = DescriptorError;

	fn try_from(fields: Vec<FieldDescriptor>) -> Result<Self, Self::Error> {
		Self::new(fields)
	}
}

impl<'a> IntoIterator for &'a FieldList {
	type Item = &'a FieldDescriptor;
	type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.iter()
	}
}

/// Build the initial value map for a descriptor list.
///
/// In edit mode a descriptor's default value is used when present.
/// Otherwise checkboxes start unchecked and every other field starts as
/// the empty string.
///
/// # Examples
///
/// ```
/// use dynaform_forms::{FieldDescriptor, FieldList, FieldType, initial_values};
/// use serde_json::json;
///
/// let fields = FieldList::new(vec![
///     FieldDescriptor::new(1, "Name", "name", FieldType::Text).with_value("Ada"),
///     FieldDescriptor::new(2, "Terms", "terms", FieldType::Checkbox),
/// ])
/// .unwrap();
///
/// let fresh = initial_values(&fields, false);
/// assert_eq!(fresh["name"], json!(""));
/// assert_eq!(fresh["terms"], json!(false));
///
/// let editing = initial_values(&fields, true);
/// assert_eq!(editing["name"], json!("Ada"));
/// ```
pub fn initial_values(fields: &FieldList, edit: bool) -> Values {
	fields
		.iter()
		.map(|field| {
			let value = match (&field.value, field.field_type) {
				(Some(value), _) if edit => value.clone(),
				(_, FieldType::Checkbox) => serde_json::Value::Bool(false),
				_ => serde_json::Value::String(String::new()),
			};
			(field.name.clone(), value)
		})
		.collect()
}
