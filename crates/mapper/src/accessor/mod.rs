use std::fmt;
use std::marker::PhantomData;

use crate::error::{MapError, Result};
use crate::property::{Properties, Property};

/// Something that identifies a single property of `T`.
///
/// Resolution happens when a rule is declared, so malformed accessors are
/// reported by the configuration call rather than during mapping.
pub trait Accessor<T: Properties> {
	/// Resolves to the referenced property, or `None` if the accessor is empty.
	fn resolve(self) -> Result<Option<&'static Property<T>>>;
}

/// Typed handle to a property of `T` whose declared type is `V`.
///
/// Generated by `#[derive(Properties)]` as associated constants.
pub struct Field<T, V> {
	name: &'static str,
	_marker: PhantomData<fn(&T) -> V>,
}

impl<T, V> Field<T, V> {
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_marker: PhantomData,
		}
	}

	pub const fn name(self) -> &'static str {
		self.name
	}
}

impl<T, V> Copy for Field<T, V> {}

impl<T, V> Clone for Field<T, V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T, V> fmt::Debug for Field<T, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Field").field(&self.name).finish()
	}
}

impl<T: Properties, V: 'static> Accessor<T> for Field<T, V> {
	fn resolve(self) -> Result<Option<&'static Property<T>>> {
		lookup::<T>(self.name).map(Some)
	}
}

impl<T: Properties> Accessor<T> for &'static Property<T> {
	fn resolve(self) -> Result<Option<&'static Property<T>>> {
		Ok(Some(self))
	}
}

impl<T: Properties> Accessor<T> for &str {
	fn resolve(self) -> Result<Option<&'static Property<T>>> {
		match parse_accessor(self)? {
			Some(name) => lookup::<T>(name).map(Some),
			None => Ok(None),
		}
	}
}

impl<T: Properties> Accessor<T> for &String {
	fn resolve(self) -> Result<Option<&'static Property<T>>> {
		self.as_str().resolve()
	}
}

impl<T: Properties> Accessor<T> for String {
	fn resolve(self) -> Result<Option<&'static Property<T>>> {
		self.as_str().resolve()
	}
}

impl<T: Properties, A: Accessor<T>> Accessor<T> for Option<A> {
	fn resolve(self) -> Result<Option<&'static Property<T>>> {
		match self {
			Some(accessor) => accessor.resolve(),
			None => Ok(None),
		}
	}
}

fn lookup<T: Properties>(name: &str) -> Result<&'static Property<T>> {
	T::property(name).ok_or_else(|| MapError::UnknownProperty {
		type_name: T::type_name(),
		property: name.to_string(),
	})
}

/// Extracts the property name from an accessor expression.
///
/// Accepted forms are a bare identifier (`name`) or a single-parameter lambda
/// whose body is a member access on that parameter (`|p| p.name`,
/// `p => p.name`). Grouping parentheses and conversion layers (`&`, `as T`,
/// `Box::new(..)`, `Some(..)`, `.into()`, `.clone()`, `.to_owned()`) are
/// peeled off first. Returns `Ok(None)` for blank input.
pub(crate) fn parse_accessor(expression: &str) -> Result<Option<&str>> {
	let trimmed = expression.trim();
	if trimmed.is_empty() {
		return Ok(None);
	}
	let invalid = || MapError::InvalidAccessor {
		expression: expression.to_string(),
	};

	let mut body = unwrap_conversions(trimmed);
	let param = match split_lambda(body) {
		Some((param, rest)) => {
			body = unwrap_conversions(rest);
			Some(param)
		}
		None => None,
	};

	let name = match (param, body.split_once('.')) {
		(Some(param), Some((root, member))) if root.trim() == param => member.trim(),
		(None, None) => body,
		_ => return Err(invalid()),
	};

	if is_identifier(name) {
		Ok(Some(name.strip_prefix("r#").unwrap_or(name)))
	} else {
		Err(invalid())
	}
}

fn unwrap_conversions(mut s: &str) -> &str {
	loop {
		let before = s;
		s = s.trim();
		if let Some(inner) = strip_group(s, '(', ')').or_else(move || strip_group(s, '{', '}')) {
			s = inner;
		} else if let Some(inner) = strip_call(s, "Box::new").or_else(move || strip_call(s, "Some")) {
			s = inner;
		} else if let Some(inner) = s.strip_prefix('&') {
			s = inner;
		} else if let Some(inner) = strip_cast(s) {
			s = inner;
		} else if let Some(inner) = [".into()", ".clone()", ".to_owned()"]
			.iter()
			.find_map(move |suffix| s.strip_suffix(suffix))
		{
			s = inner;
		}
		if s == before {
			return s;
		}
	}
}

/// Strips delimiters that enclose the whole of `s`.
fn strip_group(s: &str, open: char, close: char) -> Option<&str> {
	let inner = s.strip_prefix(open)?.strip_suffix(close)?;
	let mut depth = 0usize;
	for c in inner.chars() {
		if c == open {
			depth += 1;
		} else if c == close {
			// `(a)(b)` is two groups, not one.
			depth = depth.checked_sub(1)?;
		}
	}
	(depth == 0).then_some(inner)
}

fn strip_call<'a>(s: &'a str, callee: &str) -> Option<&'a str> {
	strip_group(s.strip_prefix(callee)?.trim_start(), '(', ')')
}

fn strip_cast(s: &str) -> Option<&str> {
	let idx = s.rfind(" as ")?;
	let (value, ty) = (&s[..idx], &s[idx + 4..]);
	let balanced = value.matches('(').count() == value.matches(')').count();
	let plain_type = !ty.trim().is_empty()
		&& !ty.contains(['(', ')', '.', '|', '[', '+', '-', '*', '/', '%', '=']);
	(balanced && plain_type).then_some(value)
}

/// Splits `|p| body`, `move |p: &T| body` or `p => body` into parameter and body.
fn split_lambda(s: &str) -> Option<(&str, &str)> {
	let s = s.strip_prefix("move ").map(str::trim_start).unwrap_or(s);
	if let Some(rest) = s.strip_prefix('|') {
		let (params, body) = rest.split_once('|')?;
		let param = params.split(':').next().unwrap_or_default().trim();
		let param = param.strip_prefix("mut ").unwrap_or(param).trim();
		return Some((param, body));
	}
	let (param, body) = s.split_once("=>")?;
	let param = param.trim();
	let param = strip_group(param, '(', ')').map(str::trim).unwrap_or(param);
	is_identifier(param).then_some((param, body))
}

fn is_identifier(s: &str) -> bool {
	let s = s.strip_prefix("r#").unwrap_or(s);
	let mut chars = s.chars();
	match chars.next() {
		Some(c) if c == '_' || c.is_alphabetic() => {}
		_ => return false,
	}
	s != "_" && chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests;
