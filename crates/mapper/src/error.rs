use thiserror::Error;

/// Errors raised while configuring a [`Mapper`](crate::Mapper).
///
/// Mapping itself never fails; every per-property mismatch is a silent skip.
#[derive(Debug, Error)]
pub enum MapError {
	/// The accessor is not a direct reference to a single property.
	#[error("expression \"{expression}\" cannot be resolved to a property")]
	InvalidAccessor {
		/// The accessor as it was supplied.
		expression: String,
	},

	/// The accessor names a property the type does not declare.
	#[error("type `{type_name}` has no property named `{property}`")]
	UnknownProperty {
		/// Name of the type that was searched.
		type_name: &'static str,
		/// The property name that was requested.
		property: String,
	},

	/// A mapping profile document could not be parsed.
	#[error("invalid mapping profile: {0}")]
	Profile(#[from] toml::de::Error),
}

/// Result type for mapper configuration.
pub type Result<T> = std::result::Result<T, MapError>;
