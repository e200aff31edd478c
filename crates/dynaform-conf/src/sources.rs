//! Configuration sources for layered form settings
//!
//! Sources are merged in priority order (environment variables > files >
//! defaults). Each source yields a flat map of top-level keys.

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables read by [`EnvSource::new`]
pub const DEFAULT_ENV_PREFIX: &str = "DYNAFORM_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Configuration file not found: {}", .0.display())]
	NotFound(PathBuf),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid source: {0}")]
	InvalidSource(String),
}

fn object_to_map(value: Value) -> Result<IndexMap<String, Value>, SourceError> {
	match value {
		Value::Object(map) => Ok(map.into_iter().collect()),
		_ => Err(SourceError::Parse("Expected object at root".to_string())),
	}
}

fn read_if_present(path: &Path, optional: bool) -> Result<Option<String>, SourceError> {
	if path.exists() {
		return Ok(Some(fs::read_to_string(path)?));
	}
	if optional {
		tracing::debug!(path = %path.display(), "optional configuration file missing");
		Ok(None)
	} else {
		Err(SourceError::NotFound(path.to_path_buf()))
	}
}

/// Environment variable configuration source
///
/// Reads every variable starting with the prefix, strips the prefix and
/// lowercases the rest: `DYNAFORM_SUBMIT_LABEL` sets `submit_label`.
/// Values that parse as JSON booleans or numbers are stored as such.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading `DYNAFORM_*` variables
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new();
	/// assert_eq!(source.priority(), 100);
	/// ```
	pub fn new() -> Self {
		Self {
			prefix: DEFAULT_ENV_PREFIX.to_string(),
		}
	}

	/// Set the prefix filter for environment variables
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	fn parse_value(raw: String) -> Value {
		match serde_json::from_str::<Value>(raw.trim()) {
			Ok(value @ (Value::Bool(_) | Value::Number(_))) => value,
			_ => Value::String(raw),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars() {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			if clean_key.is_empty() {
				continue;
			}
			config.insert(clean_key.to_lowercase(), Self::parse_value(value));
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source
pub struct TomlFileSource {
	path: PathBuf,
	optional: bool,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_conf::sources::TomlFileSource;
	///
	/// let source = TomlFileSource::new("signup.toml").optional();
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			optional: false,
		}
	}

	/// Treat a missing file as empty instead of an error
	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let Some(content) = read_if_present(&self.path, self.optional)? else {
			return Ok(IndexMap::new());
		};

		let toml_value: toml::Value = toml::from_str(&content)?;
		object_to_map(serde_json::to_value(toml_value)?)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// JSON file configuration source
pub struct JsonFileSource {
	path: PathBuf,
	optional: bool,
}

impl JsonFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			optional: false,
		}
	}

	/// Treat a missing file as empty instead of an error
	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}
}

impl ConfigSource for JsonFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let Some(content) = read_if_present(&self.path, self.optional)? else {
			return Ok(IndexMap::new());
		};

		object_to_map(serde_json::from_str(&content)?)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("JSON file: {}", self.path.display())
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create an empty default values source
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_conf::sources::DefaultSource;
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new()
	///     .with_value("edit", Value::Bool(false))
	///     .with_value("submit_label", Value::String("Send".to_string()));
	/// ```
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	/// Add a default value for a configuration key
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// Pick a file source from the path's extension
///
/// # Examples
///
/// ```
/// use dynaform_conf::sources::{ConfigSource, file_source};
///
/// let source = file_source("forms/signup.json").unwrap();
/// assert_eq!(source.description(), "JSON file: forms/signup.json");
///
/// assert!(file_source("forms/signup.yaml").is_err());
/// ```
pub fn file_source(path: impl AsRef<Path>) -> Result<Box<dyn ConfigSource>, SourceError> {
	let path = path.as_ref();
	let ext = path
		.extension()
		.and_then(|e| e.to_str())
		.ok_or_else(|| SourceError::InvalidSource("No file extension".to_string()))?;

	match ext {
		"toml" => Ok(Box::new(TomlFileSource::new(path))),
		"json" => Ok(Box::new(JsonFileSource::new(path))),
		_ => Err(SourceError::InvalidSource(format!(
			"Unsupported file extension: {}",
			ext
		))),
	}
}
