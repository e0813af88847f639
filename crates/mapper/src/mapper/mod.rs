use std::collections::hash_map::Entry;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::accessor::Accessor;
use crate::error::Result;
use crate::profile::MappingProfile;
use crate::property::{Properties, Property};

/// Copies properties from `S` values into `D` values.
///
/// Configure with the chaining methods, then call [`map`](Self::map) any
/// number of times. For each source property, in declaration order:
///
/// 1. excluded properties are skipped,
/// 2. a rename rule sends the value to its bound destination property,
/// 3. otherwise the destination property with the same name receives it.
///
/// Steps 2 and 3 only write when both properties declare the same type and the
/// destination property is writable. Anything else is skipped silently.
pub struct Mapper<'d, S: Properties, D: Properties> {
	rules: Rules<S, D>,
	/// Destination target waiting for its source side.
	pending: Option<&'static Property<D>>,
	existing: Option<&'d mut D>,
}

struct Rules<S: Properties, D: Properties> {
	renames: FxHashMap<&'static str, &'static Property<D>>,
	excluded: FxHashSet<&'static str>,
	_source: PhantomData<fn(&S)>,
}

impl<'d, S: Properties, D: Properties> Mapper<'d, S, D> {
	pub fn new() -> Self {
		Self {
			rules: Rules {
				renames: FxHashMap::default(),
				excluded: FxHashSet::default(),
				_source: PhantomData,
			},
			pending: None,
			existing: None,
		}
	}

	/// Declares the destination property the next [`assign`](Self::assign)
	/// binds to. Replaces any target still pending. An empty accessor is a
	/// no-op.
	pub fn for_property(mut self, destination: impl Accessor<D>) -> Result<Self> {
		if let Some(target) = destination.resolve()? {
			trace!(destination = target.name(), "pending rename target");
			self.pending = Some(target);
		}
		Ok(self)
	}

	/// Binds `source` to the pending destination target, then clears it.
	///
	/// Without a pending target the accessor is not even resolved. An empty
	/// accessor records nothing. If `source` already has a rename rule the
	/// first one is kept.
	pub fn assign(mut self, source: impl Accessor<S>) -> Result<Self> {
		let Some(target) = self.pending else {
			return Ok(self);
		};
		let Some(source) = source.resolve()? else {
			return Ok(self);
		};
		self.rules.insert_rename(source, target);
		self.pending = None;
		Ok(self)
	}

	/// Declares a complete rename rule in one call.
	///
	/// Unlike [`for_property`](Self::for_property) followed by
	/// [`assign`](Self::assign), this leaves the pending target untouched.
	pub fn rename(self, source: impl Accessor<S>, destination: impl Accessor<D>) -> Result<Self> {
		let destination = destination.resolve()?;
		let source = source.resolve()?;
		let mut mapper = self;
		if let (Some(source), Some(target)) = (source, destination) {
			mapper.rules.insert_rename(source, target);
		}
		Ok(mapper)
	}

	/// Never copies `source`, whatever other rules mention it.
	pub fn exclude(mut self, source: impl Accessor<S>) -> Result<Self> {
		if let Some(property) = source.resolve()?
			&& self.rules.excluded.insert(property.name())
		{
			debug!(source = property.name(), "excluded from mapping");
		}
		Ok(self)
	}

	/// Populates `destination` on every [`map`](Self::map) call instead of
	/// constructing a fresh value. Replaces any previously bound destination.
	pub fn use_existing(mut self, destination: &'d mut D) -> Self {
		debug!(destination = D::type_name(), "bound existing destination");
		self.existing = Some(destination);
		self
	}

	/// Applies the exclusions and renames of `profile`.
	///
	/// Every name is checked against `S` and `D`. Renames follow the same
	/// first-wins rule as [`assign`](Self::assign).
	pub fn with_profile(self, profile: &MappingProfile) -> Result<Self> {
		let mut mapper = self;
		for source in &profile.exclude {
			mapper = mapper.exclude(source)?;
		}
		for (source, destination) in &profile.rename {
			mapper = mapper.rename(source, destination)?;
		}
		debug!(
			exclusions = profile.exclude.len(),
			renames = profile.rename.len(),
			"applied mapping profile"
		);
		Ok(mapper)
	}

	/// Maps `source` into the bound existing destination, or into a fresh
	/// `D::default()` when none is bound.
	///
	/// A `None` source leaves the destination untouched.
	pub fn map(&mut self, source: Option<&S>) -> Destination<'_, D> {
		match self.existing.as_deref_mut() {
			Some(destination) => {
				self.rules.apply(source, destination);
				Destination::Borrowed(destination)
			}
			None => {
				let mut destination = D::default();
				self.rules.apply(source, &mut destination);
				Destination::Owned(destination)
			}
		}
	}

	/// Maps `source` into `destination`, ignoring any bound existing
	/// destination.
	pub fn map_into(&self, source: Option<&S>, destination: &mut D) -> MapReport {
		self.rules.apply(source, destination)
	}

	pub fn is_excluded(&self, source: &str) -> bool {
		self.rules.excluded.contains(source)
	}

	/// Destination property bound to `source` by a rename rule.
	pub fn rename_target(&self, source: &str) -> Option<&'static str> {
		self.rules.renames.get(source).map(|target| target.name())
	}

	pub fn pending_target(&self) -> Option<&'static str> {
		self.pending.map(Property::name)
	}

	pub fn has_existing(&self) -> bool {
		self.existing.is_some()
	}
}

impl<S: Properties, D: Properties> Default for Mapper<'_, S, D> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: Properties, D: Properties> fmt::Debug for Mapper<'_, S, D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let renames: Vec<_> = self
			.rules
			.renames
			.iter()
			.map(|(source, target)| (*source, target.name()))
			.collect();
		f.debug_struct("Mapper")
			.field("source", &S::type_name())
			.field("destination", &D::type_name())
			.field("renames", &renames)
			.field("excluded", &self.rules.excluded)
			.field("pending", &self.pending_target())
			.field("has_existing", &self.has_existing())
			.finish()
	}
}

impl<S: Properties, D: Properties> Rules<S, D> {
	fn insert_rename(&mut self, source: &'static Property<S>, target: &'static Property<D>) {
		match self.renames.entry(source.name()) {
			Entry::Vacant(entry) => {
				debug!(source = source.name(), destination = target.name(), "rename rule");
				entry.insert(target);
			}
			Entry::Occupied(entry) => {
				trace!(
					source = source.name(),
					kept = entry.get().name(),
					ignored = target.name(),
					"duplicate rename ignored"
				);
			}
		}
	}

	fn apply(&self, source: Option<&S>, destination: &mut D) -> MapReport {
		let mut report = MapReport::default();
		let Some(source) = source else {
			return report;
		};

		for property in S::properties() {
			let name = property.name();
			if self.excluded.contains(name) {
				trace!(source = name, "excluded");
				report.excluded.push(name);
				continue;
			}

			let target = match self.renames.get(name) {
				Some(&target) => Some(target),
				None => D::property(name),
			};
			let Some(target) = target else {
				report.unmatched.push(name);
				continue;
			};

			if !property.has_same_type(target) {
				trace!(
					source = name,
					destination = target.name(),
					source_type = property.value_type_name(),
					destination_type = target.value_type_name(),
					"type mismatch, skipped"
				);
				report.skipped.push(name);
				continue;
			}

			if !target.is_writable() {
				trace!(source = name, destination = target.name(), "read-only, skipped");
				report.skipped.push(name);
				continue;
			}

			match target.write(destination, property.read(source)) {
				Ok(()) => {
					trace!(source = name, destination = target.name(), "written");
					report.written.push((name, target.name()));
				}
				Err(_) => report.skipped.push(name),
			}
		}

		report
	}
}

/// Outcome of a single mapping call, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapReport {
	/// `(source, destination)` pairs that were written.
	pub written: Vec<(&'static str, &'static str)>,
	/// Source properties skipped by an exclusion rule.
	pub excluded: Vec<&'static str>,
	/// Source properties whose destination had a different type or was
	/// read-only.
	pub skipped: Vec<&'static str>,
	/// Source properties with no destination counterpart.
	pub unmatched: Vec<&'static str>,
}

/// The destination of [`Mapper::map`]: freshly constructed, or the bound
/// existing instance.
#[derive(Debug)]
pub enum Destination<'a, D> {
	Owned(D),
	Borrowed(&'a mut D),
}

impl<D> Destination<'_, D> {
	pub fn is_borrowed(&self) -> bool {
		matches!(self, Destination::Borrowed(_))
	}

	/// Extracts the owned value, cloning a borrowed destination.
	pub fn into_owned(self) -> D
	where
		D: Clone,
	{
		match self {
			Destination::Owned(value) => value,
			Destination::Borrowed(value) => value.clone(),
		}
	}
}

impl<D> Deref for Destination<'_, D> {
	type Target = D;

	fn deref(&self) -> &D {
		match self {
			Destination::Owned(value) => value,
			Destination::Borrowed(value) => value,
		}
	}
}

impl<D> DerefMut for Destination<'_, D> {
	fn deref_mut(&mut self) -> &mut D {
		match self {
			Destination::Owned(value) => value,
			Destination::Borrowed(value) => value,
		}
	}
}
