//! HTML attribute maps for rendered asset tags.

use crate::lookup::LookupEntry;
use indexmap::IndexMap;
use std::fmt;

pub const INTEGRITY: &str = "integrity";
pub const CROSSORIGIN: &str = "crossorigin";

/// `crossorigin` value used when integrity is set without one.
pub const DEFAULT_CROSSORIGIN: &str = "anonymous";

/// An attribute value: a flag or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
	Bool(bool),
	Text(String),
}

impl AttrValue {
	/// `false` and the empty string count as unset.
	pub fn is_set(&self) -> bool {
		match self {
			Self::Bool(flag) => *flag,
			Self::Text(text) => !text.is_empty(),
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Bool(_) => None,
		}
	}
}

impl From<bool> for AttrValue {
	fn from(flag: bool) -> Self {
		Self::Bool(flag)
	}
}

impl From<&str> for AttrValue {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for AttrValue {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl fmt::Display for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(flag) => write!(f, "{}", flag),
			Self::Text(text) => f.write_str(text),
		}
	}
}

/// Insertion-ordered attribute map.
///
/// # Examples
///
/// ```
/// use fingerprint_engine::{AttrValue, Attributes};
///
/// let attrs = Attributes::new().with("integrity", true).with("defer", true);
/// assert_eq!(attrs.get("integrity"), Some(&AttrValue::Bool(true)));
///
/// let attrs = Attributes::media("print");
/// assert_eq!(attrs.get("media"), Some(&AttrValue::Text("print".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, AttrValue>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stylesheet attributes given as a bare media query.
	pub fn media(media: impl Into<String>) -> Self {
		Self::new().with("media", media.into())
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.insert(name, value);
		self
	}

	/// Sets `name`, keeping its position if it already exists.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
		self.0.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> Option<&AttrValue> {
		self.0.get(name)
	}

	pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
		self.0.shift_remove(name)
	}

	pub fn contains_key(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Resolves the `integrity` attribute against `entry`.
	///
	/// `integrity = true` takes the entry's digest. When the result is a
	/// non-empty digest, `crossorigin` is kept or defaults to `anonymous`;
	/// otherwise both attributes are removed.
	pub fn apply_integrity(mut self, entry: &LookupEntry) -> Self {
		let integrity = match self.get(INTEGRITY) {
			Some(AttrValue::Bool(true)) => entry.integrity.clone(),
			Some(AttrValue::Text(text)) => Some(text.clone()),
			_ => None,
		}
		.filter(|integrity| !integrity.is_empty());

		match integrity {
			Some(integrity) => {
				self.insert(INTEGRITY, integrity);
				let crossorigin_set = self.get(CROSSORIGIN).is_some_and(AttrValue::is_set);
				if !crossorigin_set {
					self.insert(CROSSORIGIN, DEFAULT_CROSSORIGIN);
				}
			}
			None => {
				self.remove(INTEGRITY);
				self.remove(CROSSORIGIN);
			}
		}
		self
	}
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
	K: Into<String>,
	V: Into<AttrValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		)
	}
}

impl<'a> IntoIterator for &'a Attributes {
	type Item = (&'a String, &'a AttrValue);
	type IntoIter = indexmap::map::Iter<'a, String, AttrValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
