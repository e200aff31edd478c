//! Subcommand implementations
//!
//! Each command returns its output as a string so that `main` owns all
//! printing and exit codes.

use anyhow::{Context, Result, bail};
use dynaform_conf::FormSettings;
use dynaform_forms::{FieldList, FormErrors, SubmitOutcome, ValidationSchema, Values};
use dynaform_pages::{FormComponent, FormOptions};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

const DEFAULT_PAGE_TITLE: &str = "Dynamic Form";

/// A validated form definition
pub struct Definition {
	pub title: Option<String>,
	pub fields: FieldList,
	pub options: FormOptions,
}

impl Definition {
	pub fn load(config: &Path, env_prefix: &str) -> Result<Self> {
		let settings = FormSettings::load(config, env_prefix)
			.with_context(|| format!("Failed to load form definition {}", config.display()))?;
		let title = settings.title.clone();
		let (fields, options) = settings
			.into_parts()
			.with_context(|| format!("Invalid form definition {}", config.display()))?;
		Ok(Self {
			title,
			fields,
			options,
		})
	}

	fn into_component(self) -> Result<(Option<String>, FormComponent)> {
		let component = FormComponent::new(self.fields, self.options)?;
		Ok((self.title, component))
	}
}

/// Outcome of `validate`
#[derive(Debug)]
pub enum Validation {
	Accepted(Values),
	Rejected(FormErrors),
}

/// Read a JSON object of field values
pub fn read_values(path: &Path) -> Result<Values> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read values file {}", path.display()))?;
	let value: serde_json::Value = serde_json::from_str(&content)
		.with_context(|| format!("Failed to parse values file {}", path.display()))?;
	match value {
		serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
		_ => bail!("Values file {} must contain a JSON object", path.display()),
	}
}

/// One summary line per field
pub fn check(definition: &Definition) -> Vec<String> {
	definition
		.fields
		.iter()
		.map(|field| {
			let mut flags = Vec::new();
			if field.required {
				flags.push("required".to_string());
			}
			if field.disabled {
				flags.push("disabled".to_string());
			}
			if field.regex_pattern.is_some() {
				flags.push("pattern".to_string());
			}
			if field.field_type.has_options() {
				flags.push(format!("{} options", field.options.len()));
			}
			let line = format!("{:<20} {:<9}", field.name, field.field_type);
			if flags.is_empty() {
				line.trim_end().to_string()
			} else {
				format!("{} {}", line, flags.join(", "))
			}
		})
		.collect()
}

pub fn schema(definition: &Definition) -> Result<String> {
	let schema = ValidationSchema::from_fields(&definition.fields)?;
	Ok(serde_json::to_string_pretty(&schema)?)
}

fn apply_values(component: &mut FormComponent, values: Values) -> Result<()> {
	for (name, value) in values {
		component.input(&name, value)?;
	}
	let names: Vec<String> = component.fields().names().map(str::to_string).collect();
	for name in names {
		component.blur(&name)?;
	}
	Ok(())
}

/// Render the form, optionally with values applied and every field blurred
pub fn render(definition: Definition, values: Option<Values>, page: bool) -> Result<String> {
	let (title, mut component) = definition.into_component()?;
	if let Some(values) = values {
		apply_values(&mut component, values)?;
	}
	if page {
		Ok(component.render_page(title.as_deref().unwrap_or(DEFAULT_PAGE_TITLE)))
	} else {
		Ok(component.render())
	}
}

/// Values captured by the submit callback, even if a holder panicked
fn take_submitted(slot: &Mutex<Option<Values>>) -> Option<Values> {
	slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// Submit values against the definition
pub fn validate(definition: Definition, values: Values) -> Result<Validation> {
	let (_, component) = definition.into_component()?;
	let accepted = Arc::new(Mutex::new(None));
	let sink = Arc::clone(&accepted);
	let mut component = component.on_submit(move |values| {
		*sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(values.clone());
	});

	for (name, value) in values {
		component.input(&name, value)?;
	}

	match component.submit() {
		SubmitOutcome::Submitted => {
			let values =
				take_submitted(&accepted).context("Submit callback did not receive values")?;
			Ok(Validation::Accepted(values))
		}
		SubmitOutcome::Rejected(errors) => Ok(Validation::Rejected(errors)),
	}
}
