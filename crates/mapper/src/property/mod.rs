use std::any::{Any, TypeId};
use std::fmt;

/// A type that exposes its fields as named, typed properties.
///
/// Usually derived with `#[derive(Properties)]`. Manual implementations return
/// a `'static` table built from [`Property::new`] and [`Property::read_only`].
pub trait Properties: Default + 'static {
	/// Every property of the type, in declaration order.
	fn properties() -> &'static [Property<Self>];

	/// Looks up a property by name.
	fn property(name: &str) -> Option<&'static Property<Self>> {
		Self::properties().iter().find(|p| p.name == name)
	}

	/// Name of the type, used in diagnostics.
	fn type_name() -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// Type-erased property value moved from a source to a destination.
pub struct PropertyValue {
	value: Box<dyn Any>,
	type_name: &'static str,
}

impl PropertyValue {
	pub fn new<V: Any>(value: V) -> Self {
		Self {
			value: Box::new(value),
			type_name: std::any::type_name::<V>(),
		}
	}

	/// The [`TypeId`] of the boxed value.
	pub fn value_type(&self) -> TypeId {
		(*self.value).type_id()
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn is<V: Any>(&self) -> bool {
		self.value.is::<V>()
	}

	pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
		self.value.downcast_ref::<V>()
	}

	/// Unboxes the value, handing it back unchanged if it is not a `V`.
	pub fn downcast<V: Any>(self) -> Result<V, Self> {
		let type_name = self.type_name;
		self.value
			.downcast::<V>()
			.map(|v| *v)
			.map_err(|value| Self { value, type_name })
	}
}

impl fmt::Debug for PropertyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertyValue")
			.field("type", &self.type_name)
			.finish_non_exhaustive()
	}
}

type Getter<T> = fn(&T) -> PropertyValue;
type Setter<T> = fn(&mut T, PropertyValue) -> Result<(), PropertyValue>;

/// Descriptor of one named, typed property on `T`.
pub struct Property<T: 'static> {
	name: &'static str,
	value_type: fn() -> TypeId,
	value_type_name: fn() -> &'static str,
	get: Getter<T>,
	set: Option<Setter<T>>,
}

impl<T: 'static> Property<T> {
	/// A readable and writable property.
	pub const fn new(
		name: &'static str,
		value_type: fn() -> TypeId,
		value_type_name: fn() -> &'static str,
		get: Getter<T>,
		set: Setter<T>,
	) -> Self {
		Self {
			name,
			value_type,
			value_type_name,
			get,
			set: Some(set),
		}
	}

	/// A property that is never written.
	pub const fn read_only(
		name: &'static str,
		value_type: fn() -> TypeId,
		value_type_name: fn() -> &'static str,
		get: Getter<T>,
	) -> Self {
		Self {
			name,
			value_type,
			value_type_name,
			get,
			set: None,
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// The declared type of the property.
	pub fn value_type(&self) -> TypeId {
		(self.value_type)()
	}

	pub fn value_type_name(&self) -> &'static str {
		(self.value_type_name)()
	}

	pub fn is_writable(&self) -> bool {
		self.set.is_some()
	}

	/// Returns true if both properties declare the same type.
	pub fn has_same_type<U: 'static>(&self, other: &Property<U>) -> bool {
		self.value_type() == other.value_type()
	}

	/// Reads a clone of the current value.
	pub fn read(&self, target: &T) -> PropertyValue {
		(self.get)(target)
	}

	/// Writes `value` into `target`.
	///
	/// The value is handed back if the property is read-only or the value has
	/// a different type.
	pub fn write(&self, target: &mut T, value: PropertyValue) -> Result<(), PropertyValue> {
		match self.set {
			Some(set) => set(target, value),
			None => Err(value),
		}
	}
}

impl<T: 'static> fmt::Debug for Property<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Property")
			.field("owner", &std::any::type_name::<T>())
			.field("name", &self.name)
			.field("value_type", &self.value_type_name())
			.field("writable", &self.is_writable())
			.finish()
	}
}

#[cfg(test)]
mod tests;
