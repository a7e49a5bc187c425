use crate::RouteError;

/// A parsed route pattern.
pub type Path<'a> = Vec<PathSegment<'a>>;

/// Builds a pattern string from identifiers, `{name}` parameters and a trailing `{*name}`
/// catch-all.
///
/// ```
/// use switchyard::path;
///
/// assert_eq!(path![], "/");
/// assert_eq!(path![products / {id} / items / {itemid}], "/products/:id/items/:itemid");
/// assert_eq!(path![images / {*image}], "/images/*image");
/// ```
#[macro_export]
macro_rules! path {
	[] => { ::std::string::String::from("/") };
	[ @single { * $name:ident } ] => {
		concat!("*", stringify!($name))
	};
	[ @single { $name:ident } ] => {
		concat!(":", stringify!($name))
	};
	[ @single $first:tt ] => {
		stringify!($first)
	};
	[ $($segment:tt) / * ] => {{
		let mut pattern = ::std::string::String::new();
		$(
			pattern.push('/');
			pattern.push_str($crate::path![@single $segment]);
		)*
		pattern
	}};
}

/// One `/`-delimited piece of a pattern.
///
/// A trailing slash shows up as a final `Static("")`, which is what keeps `/a` and `/a/` apart.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PathSegment<'a> {
	Static(&'a str),
	Param(&'a str),
	CatchAll(&'a str),
}

impl<'a> PathSegment<'a> {
	/// The pattern text this segment was parsed from.
	pub fn to_pattern(&self) -> String {
		match self {
			Self::Static(text) => (*text).to_owned(),
			Self::Param(name) => format!(":{}", name),
			Self::CatchAll(name) => format!("*{}", name),
		}
	}
}

/// Parses a pattern such as `/products/:id/items/:itemid` or `/images/*image`.
pub fn parse(pattern: &str) -> Result<Path<'_>, RouteError> {
	let rest = pattern
		.strip_prefix('/')
		.ok_or_else(|| RouteError::malformed(pattern, "pattern must start with '/'"))?;

	let raw = rest.split('/').collect::<Vec<_>>();
	let last = raw.len() - 1;

	let mut path = Vec::with_capacity(raw.len());
	for (i, segment) in raw.into_iter().enumerate() {
		let parsed = if let Some(name) = segment.strip_prefix(':') {
			if name.is_empty() {
				return Err(RouteError::malformed(pattern, "parameter is missing a name"));
			}
			PathSegment::Param(name)
		} else if let Some(name) = segment.strip_prefix('*') {
			if name.is_empty() {
				return Err(RouteError::malformed(pattern, "catch-all is missing a name"));
			}
			if i != last {
				return Err(RouteError::malformed(
					pattern,
					"catch-all must be the final segment",
				));
			}
			PathSegment::CatchAll(name)
		} else {
			if segment.is_empty() && i != last {
				return Err(RouteError::malformed(pattern, "empty segment"));
			}
			PathSegment::Static(segment)
		};

		path.push(parsed);
	}

	Ok(path)
}

/// Splits a request path the same way patterns are split; `None` if it is not absolute.
pub(crate) fn segments(path: &str) -> Option<Vec<&str>> {
	path.strip_prefix('/').map(|rest| rest.split('/').collect())
}
