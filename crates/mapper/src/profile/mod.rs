use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;

/// Mapping rules declared as data rather than through the builder.
///
/// ```toml
/// exclude = ["password_hash"]
///
/// [rename]
/// created = "created_at"
/// ```
///
/// Applied with [`Mapper::with_profile`](crate::Mapper::with_profile), which
/// validates every name against the source and destination types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingProfile {
	/// Source properties that are never copied.
	pub exclude: Vec<String>,
	/// Source property name to destination property name.
	pub rename: BTreeMap<String, String>,
}

impl MappingProfile {
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	pub fn exclude(mut self, source: impl Into<String>) -> Self {
		let source = source.into();
		if !self.exclude.contains(&source) {
			self.exclude.push(source);
		}
		self
	}

	/// Adds a rename rule unless `source` already has one.
	pub fn rename(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
		self.rename
			.entry(source.into())
			.or_insert_with(|| destination.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.exclude.is_empty() && self.rename.is_empty()
	}
}
