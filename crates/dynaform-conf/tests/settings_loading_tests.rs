//! Settings loading integration tests
//!
//! Loads form definitions from files on disk and applies environment
//! overrides.

use dynaform_conf::{FormSettings, SettingsError, SourceError, ThemeName};
use dynaform_forms::FieldType;
use rstest::*;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SIGNUP_TOML: &str = r#"
title = "Customizable Dynamic Form"
submit_label = "Sign up"

[container_styles.style]
display = "grid"
gridTemplateColumns = "1fr 1fr"
gap = 5

[[fields]]
id = 1
label = "First Name"
name = "firstName"
type = "text"
required = true
display_error_message = true

[fields.label_styles.style]
fontWeight = 500
color = "black"

[[fields]]
id = 6
label = "Role"
name = "role"
type = "enum"
required = true
options = [
	{ label = "Admin", value = "admin" },
	{ label = "User", value = "user" },
]
"#;

#[fixture]
fn config_dir() -> TempDir {
	TempDir::new().unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
	let path = dir.path().join(name);
	fs::write(&path, content).unwrap();
	path
}

#[rstest]
#[serial(env)]
fn test_load_toml_definition(config_dir: TempDir) {
	// Arrange
	let path = write(&config_dir, "signup.toml", SIGNUP_TOML);

	// Act
	let settings = FormSettings::load(&path, "DFLOAD_A_").unwrap();

	// Assert
	assert_eq!(settings.title.as_deref(), Some("Customizable Dynamic Form"));
	assert_eq!(settings.submit_label, "Sign up");
	assert_eq!(settings.fields.len(), 2);
	assert_eq!(settings.fields[1].field_type, FieldType::Enum);
	assert_eq!(
		settings.fields[0].label_styles.to_css().as_deref(),
		Some("font-weight: 500; color: black")
	);
	assert_eq!(
		settings.container_styles.to_css().as_deref(),
		Some("display: grid; grid-template-columns: 1fr 1fr; gap: 5px")
	);
}

#[rstest]
#[serial(env)]
fn test_load_json_definition_with_camel_case_keys(config_dir: TempDir) {
	// Arrange
	let path = write(
		&config_dir,
		"contact.json",
		r#"{
			"submitLabel": "Send",
			"fields": [
				{ "id": 1, "label": "Message", "name": "message", "type": "textarea", "displayErrorMessage": true }
			]
		}"#,
	);

	// Act
	let (fields, options) = FormSettings::load(&path, "DFLOAD_B_")
		.unwrap()
		.into_parts()
		.unwrap();

	// Assert
	assert_eq!(options.submit_label, "Send");
	assert!(fields.get("message").unwrap().display_error_message);
}

#[rstest]
#[serial(env)]
fn test_environment_overrides_file(config_dir: TempDir) {
	// Arrange
	let path = write(&config_dir, "signup.toml", SIGNUP_TOML);
	// SAFETY: #[serial(env)] gives this test exclusive access to the environment.
	unsafe {
		env::set_var("DFLOAD_C_SUBMIT_LABEL", "Register");
		env::set_var("DFLOAD_C_EDIT", "true");
		env::set_var("DFLOAD_C_THEME", "plain");
	}

	// Act
	let settings = FormSettings::load(&path, "DFLOAD_C_");

	// SAFETY: see above.
	unsafe {
		env::remove_var("DFLOAD_C_SUBMIT_LABEL");
		env::remove_var("DFLOAD_C_EDIT");
		env::remove_var("DFLOAD_C_THEME");
	}

	// Assert
	let settings = settings.unwrap();
	assert_eq!(settings.submit_label, "Register");
	assert!(settings.edit);
	assert_eq!(settings.theme, ThemeName::Plain);
	assert_eq!(settings.fields.len(), 2);
}

#[rstest]
#[serial(env)]
fn test_numeric_environment_overrides_for_text_keys(config_dir: TempDir) {
	// Arrange
	let path = write(&config_dir, "signup.toml", SIGNUP_TOML);
	// SAFETY: #[serial(env)] gives this test exclusive access to the environment.
	unsafe {
		env::set_var("DFLOAD_G_TITLE", "2025");
		env::set_var("DFLOAD_G_SUBMIT_LABEL", "1");
	}

	// Act
	let settings = FormSettings::load(&path, "DFLOAD_G_");

	// SAFETY: see above.
	unsafe {
		env::remove_var("DFLOAD_G_TITLE");
		env::remove_var("DFLOAD_G_SUBMIT_LABEL");
	}

	// Assert
	let settings = settings.unwrap();
	assert_eq!(settings.title.as_deref(), Some("2025"));
	assert_eq!(settings.submit_label, "1");
}

#[rstest]
#[serial(env)]
fn test_missing_definition_file(config_dir: TempDir) {
	let path = config_dir.path().join("absent.toml");

	let result = FormSettings::load(&path, "DFLOAD_D_");

	assert!(matches!(
		result,
		Err(SettingsError::Source {
			error: SourceError::NotFound(_),
			..
		})
	));
}

#[rstest]
fn test_unsupported_extension(config_dir: TempDir) {
	let path = write(&config_dir, "signup.yaml", "fields: []");

	let result = FormSettings::load(&path, "DFLOAD_E_");

	assert!(matches!(
		result,
		Err(SettingsError::InvalidSource(SourceError::InvalidSource(_)))
	));
}

#[rstest]
#[serial(env)]
fn test_malformed_toml(config_dir: TempDir) {
	let path = write(&config_dir, "broken.toml", "fields = [");

	let result = FormSettings::load(&path, "DFLOAD_F_");

	assert!(matches!(
		result,
		Err(SettingsError::Source {
			error: SourceError::Toml(_),
			..
		})
	));
}
