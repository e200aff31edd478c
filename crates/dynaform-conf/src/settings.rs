//! Settings builder and the typed form definition

use crate::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, file_source};
use dynaform_forms::{DescriptorError, FieldDescriptor, FieldList, StyleAttrs};
use dynaform_pages::{FormOptions, Theme};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

/// Error type for settings assembly
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},

	#[error("Invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid form definition: {0}")]
	Descriptor(#[from] DescriptorError),

	#[error(transparent)]
	InvalidSource(#[from] SourceError),
}

/// Builder merging configuration sources by priority
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn add_boxed_source(mut self, source: Box<dyn ConfigSource>) -> Self {
		self.sources.push(source);
		self
	}

	/// Load every source and merge them.
	///
	/// Sources apply in ascending priority; a higher-priority source replaces
	/// whole top-level keys. Sources of equal priority apply in the order
	/// they were added.
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_conf::SettingsBuilder;
	/// use dynaform_conf::sources::DefaultSource;
	/// use serde_json::json;
	///
	/// let merged = SettingsBuilder::new()
	///     .add_source(DefaultSource::new().with_value("submit_label", json!("Submit")))
	///     .build()
	///     .unwrap();
	/// assert_eq!(merged.get("submit_label"), Some(&json!("Submit")));
	/// ```
	pub fn build(mut self) -> Result<MergedSettings, SettingsError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut values = IndexMap::new();
		for source in &self.sources {
			let loaded = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = loaded.len(),
				"loaded configuration source"
			);
			values.extend(loaded);
		}

		Ok(MergedSettings { values })
	}
}

/// Result of merging every source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSettings {
	values: IndexMap<String, Value>,
}

impl MergedSettings {
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	/// Deserialize the merged map into a typed settings struct
	pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, SettingsError> {
		let object: serde_json::Map<String, Value> = self.values.into_iter().collect();
		Ok(serde_json::from_value(Value::Object(object))?)
	}
}

/// Named renderer theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	#[default]
	Tailwind,
	Plain,
}

impl From<ThemeName> for Theme {
	fn from(name: ThemeName) -> Self {
		match name {
			ThemeName::Tailwind => Theme::tailwind(),
			ThemeName::Plain => Theme::plain(),
		}
	}
}

fn default_submit_label() -> String {
	"Submit".to_string()
}

/// A string setting that environment parsing may have turned into a scalar
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarText {
	Text(String),
	Number(serde_json::Number),
	Bool(bool),
}

impl From<ScalarText> for String {
	fn from(value: ScalarText) -> Self {
		match value {
			ScalarText::Text(text) => text,
			ScalarText::Number(number) => number.to_string(),
			ScalarText::Bool(flag) => flag.to_string(),
		}
	}
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	ScalarText::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<ScalarText>::deserialize(deserializer)?.map(String::from))
}

/// A complete form definition as read from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Page heading used when rendering a standalone page
	#[serde(
		deserialize_with = "deserialize_optional_text",
		skip_serializing_if = "Option::is_none"
	)]
	pub title: Option<String>,

	pub fields: Vec<FieldDescriptor>,

	pub edit: bool,

	#[serde(alias = "submitLabel", deserialize_with = "deserialize_text")]
	pub submit_label: String,

	pub theme: ThemeName,

	#[serde(alias = "containerStyles")]
	pub container_styles: StyleAttrs,

	#[serde(alias = "buttonStyles")]
	pub button_styles: StyleAttrs,

	#[serde(alias = "buttonContainerStyles")]
	pub button_container_styles: StyleAttrs,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			title: None,
			fields: Vec::new(),
			edit: false,
			submit_label: default_submit_label(),
			theme: ThemeName::default(),
			container_styles: StyleAttrs::default(),
			button_styles: StyleAttrs::default(),
			button_container_styles: StyleAttrs::default(),
		}
	}
}

impl FormSettings {
	/// Load a form definition file with environment overrides.
	///
	/// The file format is picked from the extension. Environment variables
	/// with `env_prefix` override top-level keys.
	pub fn load(path: impl AsRef<Path>, env_prefix: &str) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let settings: FormSettings = SettingsBuilder::new()
			.add_source(
				DefaultSource::new()
					.with_value("submit_label", Value::String(default_submit_label()))
					.with_value("edit", Value::Bool(false)),
			)
			.add_boxed_source(file_source(path)?)
			.add_source(EnvSource::new().with_prefix(env_prefix))
			.build()?
			.into_typed()?;

		tracing::info!(
			path = %path.display(),
			fields = settings.fields.len(),
			"loaded form definition"
		);
		Ok(settings)
	}

	/// Split into the validated descriptor list and the form options
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_conf::FormSettings;
	/// use serde_json::json;
	///
	/// let settings: FormSettings = serde_json::from_value(json!({
	///     "submitLabel": "Join",
	///     "fields": [
	///         { "id": 1, "label": "Email", "name": "email", "type": "email", "required": true }
	///     ]
	/// }))
	/// .unwrap();
	///
	/// let (fields, options) = settings.into_parts().unwrap();
	/// assert_eq!(fields.len(), 1);
	/// assert_eq!(options.submit_label, "Join");
	/// ```
	pub fn into_parts(self) -> Result<(FieldList, FormOptions), SettingsError> {
		let fields = FieldList::new(self.fields)?;
		let options = FormOptions::new()
			.edit(self.edit)
			.with_submit_label(self.submit_label)
			.with_theme(self.theme.into())
			.with_container_styles(self.container_styles)
			.with_button_styles(self.button_styles)
			.with_button_container_styles(self.button_container_styles);
		Ok((fields, options))
	}
}
