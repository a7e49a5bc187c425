use thiserror::Error;

/// Why a route could not be registered.
///
/// Registration is validated before the tree is touched, so any of these leaves previously
/// registered routes exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	/// The pattern itself is not a valid route pattern.
	#[error("malformed pattern {pattern:?}: {reason}")]
	Malformed { pattern: String, reason: &'static str },

	/// A parameter or catch-all collides with a differently named one at the same position.
	#[error("pattern {pattern:?} conflicts with existing wildcard {existing:?}")]
	Conflict { pattern: String, existing: String },

	/// The exact pattern is already registered for this method.
	#[error("pattern {pattern:?} is already registered for {method}")]
	Duplicate { method: String, pattern: String },
}

impl RouteError {
	pub(crate) fn malformed(pattern: &str, reason: &'static str) -> Self {
		Self::Malformed {
			pattern: pattern.to_owned(),
			reason,
		}
	}

	/// Whether this is a structural clash with another route, as opposed to a bad pattern.
	pub fn is_conflict(&self) -> bool {
		!matches!(self, Self::Malformed { .. })
	}
}
