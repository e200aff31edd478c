//! Validation schema derived from a descriptor list
//!
//! Every descriptor maps to exactly one [`FieldRule`]. The rule's kind is
//! determined by the type tag; its constraints come from the descriptor's
//! `required` flag, optional pattern and option set.

use crate::descriptor::{FieldDescriptor, FieldList, FieldType, Values};
use crate::error::DescriptorError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static DATE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

static TIME_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}(:[0-9]{2})?$").unwrap());

/// First validation message per failing field, in descriptor order
pub type FormErrors = IndexMap<String, String>;

/// What a field's value is checked as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
	Text,
	Email,
	Time,
	Number,
	Date,
	Boolean,
	OneOf,
}

impl From<FieldType> for RuleKind {
	fn from(field_type: FieldType) -> Self {
		match field_type {
			FieldType::Text | FieldType::Textarea | FieldType::Password | FieldType::File => {
				RuleKind::Text
			}
			FieldType::Email => RuleKind::Email,
			FieldType::Time => RuleKind::Time,
			FieldType::Number => RuleKind::Number,
			FieldType::Date => RuleKind::Date,
			FieldType::Checkbox => RuleKind::Boolean,
			FieldType::Enum | FieldType::Radio => RuleKind::OneOf,
		}
	}
}

/// Validation rule for a single field
#[derive(Debug, Clone, Serialize)]
pub struct FieldRule {
	pub label: String,
	pub kind: RuleKind,
	pub required: bool,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub pattern: Option<String>,

	#[serde(skip)]
	compiled: Option<Regex>,

	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub allowed: Vec<String>,
}

impl FieldRule {
	/// Derive the rule for one descriptor.
	///
	/// Fails only when the descriptor's pattern does not compile.
	pub fn from_descriptor(field: &FieldDescriptor) -> Result<Self, DescriptorError> {
		let kind = RuleKind::from(field.field_type);
		let compiled = match (&field.regex_pattern, kind) {
			(Some(_), RuleKind::Number | RuleKind::Boolean) | (None, _) => None,
			(Some(pattern), _) => Some(Regex::new(pattern).map_err(|e| {
				DescriptorError::InvalidPattern {
					name: field.name.clone(),
					message: e.to_string(),
				}
			})?),
		};

		Ok(Self {
			label: field.label.clone(),
			kind,
			required: field.required,
			pattern: compiled.as_ref().map(|re| re.as_str().to_string()),
			compiled,
			allowed: field.options.iter().map(|o| o.value.clone()).collect(),
		})
	}

	/// Check a value against this rule, returning the first failing message.
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{FieldDescriptor, FieldRule, FieldType};
	/// use serde_json::json;
	///
	/// let field = FieldDescriptor::new(3, "Age", "age", FieldType::Number).required();
	/// let rule = FieldRule::from_descriptor(&field).unwrap();
	///
	/// assert_eq!(rule.check(&json!("")), Err("Age is required".to_string()));
	/// assert_eq!(rule.check(&json!("abc")), Err("Age must be a number".to_string()));
	/// assert_eq!(rule.check(&json!("42")), Ok(()));
	/// ```
	pub fn check(&self, value: &Value) -> Result<(), String> {
		if self.kind == RuleKind::Boolean {
			let checked = coerce_bool(value).ok_or_else(|| self.invalid_message())?;
			if self.required && !checked {
				return Err(self.required_message());
			}
			return Ok(());
		}

		let text = coerce_text(value);
		let trimmed = text.trim();
		if trimmed.is_empty() {
			return if self.required {
				Err(self.required_message())
			} else {
				Ok(())
			};
		}

		if self.kind == RuleKind::Number {
			return match trimmed.parse::<f64>() {
				Ok(n) if n.is_finite() => Ok(()),
				_ => Err(format!("{} must be a number", self.label)),
			};
		}

		if let Some(re) = &self.compiled
			&& !re.is_match(&text)
		{
			return Err(self.invalid_message());
		}

		match self.kind {
			RuleKind::Email if !EMAIL_REGEX.is_match(trimmed) => {
				Err("Invalid email format".to_string())
			}
			RuleKind::Time if !is_valid_time(trimmed) => {
				Err(format!("{} must be a valid time", self.label))
			}
			RuleKind::Date if !is_valid_date(trimmed) => {
				Err(format!("{} must be a valid date", self.label))
			}
			RuleKind::OneOf if !self.allowed.iter().any(|v| v == trimmed) => {
				Err(format!("Please select a valid {}", self.label))
			}
			_ => Ok(()),
		}
	}

	fn required_message(&self) -> String {
		format!("{} is required", self.label)
	}

	fn invalid_message(&self) -> String {
		format!("{} is invalid", self.label)
	}
}

/// `YYYY-MM-DD` with zero-padded month and day
fn is_valid_date(s: &str) -> bool {
	DATE_REGEX.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// `HH:MM` or `HH:MM:SS`, zero-padded, without leap seconds
fn is_valid_time(s: &str) -> bool {
	if !TIME_REGEX.is_match(s) {
		return false;
	}
	let format = if s.len() == 5 { "%H:%M" } else { "%H:%M:%S" };
	// chrono represents second 60 as a nanosecond overflow
	NaiveTime::parse_from_str(s, format).is_ok_and(|t| t.nanosecond() < 1_000_000_000)
}

/// Text form of a value as a string-typed input would hold it
fn coerce_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Checkbox state of a value, `None` when it cannot be read as one
fn coerce_bool(value: &Value) -> Option<bool> {
	match value {
		Value::Bool(b) => Some(*b),
		Value::Null => Some(false),
		Value::String(s) => match s.trim() {
			"true" | "on" | "1" => Some(true),
			"false" | "off" | "0" | "" => Some(false),
			_ => None,
		},
		Value::Number(n) => match n.as_i64() {
			Some(1) => Some(true),
			Some(0) => Some(false),
			_ => None,
		},
		_ => None,
	}
}

/// Rules for every field of a form, keyed by field name
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationSchema {
	rules: IndexMap<String, FieldRule>,
}

impl ValidationSchema {
	/// Derive the schema for a descriptor list
	pub fn from_fields(fields: &FieldList) -> Result<Self, DescriptorError> {
		let rules = fields
			.iter()
			.map(|field| Ok((field.name.clone(), FieldRule::from_descriptor(field)?)))
			.collect::<Result<IndexMap<_, _>, DescriptorError>>()?;
		tracing::debug!(fields = rules.len(), "derived validation schema");
		Ok(Self { rules })
	}

	pub fn get(&self, name: &str) -> Option<&FieldRule> {
		self.rules.get(name)
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldRule> {
		self.rules.iter()
	}

	/// Validate a full value map. Missing values count as empty.
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_forms::{FieldDescriptor, FieldList, FieldType, ValidationSchema, Values};
	/// use serde_json::json;
	///
	/// let fields = FieldList::new(vec![
	///     FieldDescriptor::new(1, "First Name", "firstName", FieldType::Text).required(),
	///     FieldDescriptor::new(2, "Email", "email", FieldType::Email).required(),
	/// ])
	/// .unwrap();
	/// let schema = ValidationSchema::from_fields(&fields).unwrap();
	///
	/// let mut values = Values::new();
	/// values.insert("email".to_string(), json!("not-an-email"));
	///
	/// let errors = schema.validate(&values);
	/// assert_eq!(errors["firstName"], "First Name is required");
	/// assert_eq!(errors["email"], "Invalid email format");
	/// ```
	pub fn validate(&self, values: &Values) -> FormErrors {
		self.rules
			.iter()
			.filter_map(|(name, rule)| {
				let value = values.get(name).unwrap_or(&Value::Null);
				rule.check(value).err().map(|message| (name.clone(), message))
			})
			.collect()
	}

	/// Validate one field. Unknown names have no rule and always pass.
	pub fn validate_field(&self, name: &str, value: &Value) -> Option<String> {
		self.rules.get(name)?.check(value).err()
	}
}
