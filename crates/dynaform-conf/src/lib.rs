//! Layered configuration for Dynaform form definitions
//!
//! A form definition (descriptor list plus form-level options) is read
//! from a TOML or JSON file and can be overridden from the environment:
//!
//! ```text
//! defaults (0) < definition file (50) < DYNAFORM_* variables (100)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dynaform_conf::FormSettings;
//! use dynaform_pages::FormComponent;
//!
//! let settings = FormSettings::load("demos/signup.toml", "DYNAFORM_")?;
//! let (fields, options) = settings.into_parts()?;
//! let form = FormComponent::new(fields, options)?;
//! println!("{}", form.render());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod settings;
pub mod sources;

pub use settings::{FormSettings, MergedSettings, SettingsBuilder, SettingsError, ThemeName};
pub use sources::{
	ConfigSource, DEFAULT_ENV_PREFIX, DefaultSource, EnvSource, JsonFileSource, SourceError,
	TomlFileSource, file_source,
};
