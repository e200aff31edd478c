//! Error types for descriptor lists and form state

use crate::descriptor::FieldType;

/// Violations of the descriptor list invariants
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
	#[error("Unknown field type: {0}")]
	UnknownFieldType(String),

	#[error("Field with id {id} has an empty name")]
	EmptyName { id: u32 },

	#[error("Duplicate field name: {0}")]
	DuplicateName(String),

	#[error("Field '{0}' requires at least one option")]
	MissingOptions(String),

	#[error("Field '{name}' of type {field_type} does not accept options")]
	UnexpectedOptions { name: String, field_type: FieldType },

	#[error("Invalid pattern for field '{name}': {message}")]
	InvalidPattern { name: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),

	#[error(transparent)]
	Descriptor(#[from] DescriptorError),
}

pub type FormResult<T> = Result<T, FormError>;
