use std::slice;

/// Values bound by named parameters and catch-alls during a single dispatch.
///
/// Bindings keep the order in which their segments appear in the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
	entries: Vec<(String, String)>,
}

impl Params {
	pub fn new() -> Self {
		Self::default()
	}

	/// The value bound to `name`, if the matched pattern declares it.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> Iter<'_> {
		Iter {
			inner: self.entries.iter(),
		}
	}

	pub(crate) fn push(&mut self, name: &str, value: String) {
		self.entries.push((name.to_owned(), value));
	}

	pub(crate) fn pop(&mut self) {
		self.entries.pop();
	}
}

impl<'a> IntoIterator for &'a Params {
	type Item = (&'a str, &'a str);
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

pub struct Iter<'a> {
	inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
	type Item = (&'a str, &'a str);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner
			.next()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}
}
