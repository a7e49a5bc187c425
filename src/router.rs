use crate::route::{self, PathSegment};
use crate::{Params, RouteError};
use arc_swap::ArcSwap;
use std::{
	collections::HashMap,
	fmt::{self, Debug, Display, Formatter},
	sync::{Arc, Mutex, PoisonError},
};
use tracing::debug;

#[derive(Clone)]
struct ParamChild<T> {
	name: String,
	node: Box<RouteNode<T>>,
}

#[derive(Clone)]
struct CatchAll<T> {
	name: String,
	route: T,
}

#[derive(Clone)]
struct RouteNode<T> {
	route: Option<T>,
	statics: HashMap<String, RouteNode<T>>,
	param: Option<ParamChild<T>>,
	catch_all: Option<CatchAll<T>>,
}

impl<T> Default for RouteNode<T> {
	fn default() -> Self {
		Self {
			route: None,
			statics: HashMap::new(),
			param: None,
			catch_all: None,
		}
	}
}

impl<T> RouteNode<T> {
	/// Walks the existing tree along `path` and reports whether inserting it would clash.
	fn check(&self, path: &[PathSegment<'_>]) -> Result<(), Clash> {
		let mut node = self;
		for segment in path {
			match *segment {
				PathSegment::Static(text) => match node.statics.get(text) {
					Some(child) => node = child,
					None => return Ok(()),
				},
				PathSegment::Param(name) => match &node.param {
					Some(param) if param.name != name => {
						return Err(Clash::Conflict(PathSegment::Param(&param.name).to_pattern()))
					}
					Some(param) => node = &*param.node,
					None => return Ok(()),
				},
				PathSegment::CatchAll(name) => {
					return match &node.catch_all {
						Some(catch_all) if catch_all.name != name => {
							Err(Clash::Conflict(PathSegment::CatchAll(&catch_all.name).to_pattern()))
						}
						Some(_) => Err(Clash::Duplicate),
						None => Ok(()),
					}
				}
			}
		}

		match node.route {
			Some(_) => Err(Clash::Duplicate),
			None => Ok(()),
		}
	}

	fn insert(&mut self, path: &[PathSegment<'_>], route: T) {
		let mut node = self;
		for segment in path {
			match *segment {
				PathSegment::Static(text) => {
					node = node.statics.entry(text.to_owned()).or_default();
				}
				PathSegment::Param(name) => {
					node = &mut *node
						.param
						.get_or_insert_with(|| ParamChild {
							name: name.to_owned(),
							node: Box::default(),
						})
						.node;
				}
				PathSegment::CatchAll(name) => {
					node.catch_all = Some(CatchAll {
						name: name.to_owned(),
						route,
					});
					return;
				}
			}
		}

		node.route = Some(route);
	}

	/// Literal beats parameter beats catch-all; a branch that dead-ends falls back to the next.
	fn find<'n>(&'n self, segments: &[&str], params: &mut Params) -> Option<&'n T> {
		let (head, tail) = match segments.split_first() {
			Some(split) => split,
			None => return self.route.as_ref(),
		};

		if let Some(route) = self
			.statics
			.get(*head)
			.and_then(|child| child.find(tail, params))
		{
			return Some(route);
		}

		if let Some(param) = self.param.as_ref().filter(|_| !head.is_empty()) {
			params.push(&param.name, (*head).to_owned());
			if let Some(route) = param.node.find(tail, params) {
				return Some(route);
			}
			params.pop();
		}

		self.catch_all.as_ref().map(|catch_all| {
			params.push(&catch_all.name, format!("/{}", segments.join("/")));
			&catch_all.route
		})
	}
}

enum Clash {
	Conflict(String),
	Duplicate,
}

/// A successful dispatch.
#[derive(Debug)]
pub struct Match<'r, T> {
	pub route: &'r T,
	pub params: Params,
}

/// Why a dispatch did not produce a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss<M> {
	/// No method has a route for this path.
	NotFound,
	/// The path is routable, but only under these methods.
	MethodNotAllowed(Vec<M>),
}

/// Path trees keyed by method, then by segment.
///
/// `M` is the method key and `T` whatever the caller wants back on a match. Dispatch never
/// mutates the router, so a built router can be shared freely between threads.
#[derive(Clone)]
pub struct Router<M, T> {
	trees: Vec<(M, RouteNode<T>)>,
}

impl<M, T> Default for Router<M, T> {
	fn default() -> Self {
		Self { trees: Vec::new() }
	}
}

impl<M, T> Debug for Router<M, T>
where
	M: Display,
{
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.trees.iter().map(|(method, _)| method.to_string()))
			.finish()
	}
}

impl<M, T> Router<M, T>
where
	M: PartialEq + Clone + Display,
{
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `route` under `method` for `pattern`.
	///
	/// Patterns start with `/`; `:name` binds one segment and a final `*name` binds the rest of
	/// the path, leading slash included. A trailing slash is significant.
	pub fn register(&mut self, method: M, pattern: &str, route: T) -> Result<&mut Self, RouteError> {
		let path = route::parse(pattern)?;

		if let Some(tree) = self.tree(&method) {
			tree.check(&path).map_err(|clash| match clash {
				Clash::Conflict(existing) => RouteError::Conflict {
					pattern: pattern.to_owned(),
					existing,
				},
				Clash::Duplicate => RouteError::Duplicate {
					method: method.to_string(),
					pattern: pattern.to_owned(),
				},
			})?;
		}

		debug!(method = %method, pattern, "registered route");

		let index = match self.trees.iter().position(|(m, _)| *m == method) {
			Some(index) => index,
			None => {
				self.trees.push((method, RouteNode::default()));
				self.trees.len() - 1
			}
		};
		self.trees[index].1.insert(&path, route);

		Ok(self)
	}

	/// Resolves `path` under `method`.
	///
	/// On a miss, every other method is tried so the caller can tell "wrong method" from "no such
	/// path".
	pub fn dispatch(&self, method: &M, path: &str) -> Result<Match<'_, T>, Miss<M>> {
		let segments = match route::segments(path) {
			Some(segments) => segments,
			None => return Err(Miss::NotFound),
		};

		if let Some(found) = self.lookup(method, &segments) {
			return Ok(found);
		}

		let allowed = self.allowed_for(&segments);
		if allowed.is_empty() {
			Err(Miss::NotFound)
		} else {
			Err(Miss::MethodNotAllowed(allowed))
		}
	}

	/// Every method with a route matching `path`, in the order methods were first registered.
	pub fn allowed(&self, path: &str) -> Vec<M> {
		route::segments(path)
			.map(|segments| self.allowed_for(&segments))
			.unwrap_or_default()
	}

	/// The path with its trailing slash toggled, when that is what `method` actually routes.
	pub fn trailing_slash_redirect(&self, method: &M, path: &str) -> Option<String> {
		let alternative = match path.strip_suffix('/') {
			Some("") => return None,
			Some(trimmed) => trimmed.to_owned(),
			None => format!("{}/", path),
		};

		let routable = route::segments(&alternative)
			.map_or(false, |segments| self.lookup(method, &segments).is_some());
		if routable {
			Some(alternative)
		} else {
			None
		}
	}

	fn tree(&self, method: &M) -> Option<&RouteNode<T>> {
		self.trees
			.iter()
			.find(|(m, _)| m == method)
			.map(|(_, tree)| tree)
	}

	fn lookup(&self, method: &M, segments: &[&str]) -> Option<Match<'_, T>> {
		let tree = self.tree(method)?;
		let mut params = Params::new();
		tree.find(segments, &mut params)
			.map(|route| Match { route, params })
	}

	fn allowed_for(&self, segments: &[&str]) -> Vec<M> {
		self.trees
			.iter()
			.filter(|(_, tree)| tree.find(segments, &mut Params::new()).is_some())
			.map(|(method, _)| method.clone())
			.collect()
	}
}

/// A router that can keep taking registrations while it is being dispatched against.
///
/// Readers grab the current snapshot without locking. Writers are serialized, build the next
/// router from a copy of the current one and swap it in whole.
pub struct SharedRouter<M, T> {
	current: ArcSwap<Router<M, T>>,
	writer: Mutex<()>,
}

impl<M, T> SharedRouter<M, T> {
	pub fn new(router: Router<M, T>) -> Self {
		Self {
			current: ArcSwap::from_pointee(router),
			writer: Mutex::new(()),
		}
	}

	/// The router as of now; later registrations do not affect it.
	pub fn snapshot(&self) -> Arc<Router<M, T>> {
		self.current.load_full()
	}
}

impl<M, T> SharedRouter<M, T>
where
	M: PartialEq + Clone + Display,
	T: Clone,
{
	pub fn register(&self, method: M, pattern: &str, route: T) -> Result<(), RouteError> {
		let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

		let mut next = (**self.current.load()).clone();
		next.register(method, pattern, route)?;
		self.current.store(Arc::new(next));

		Ok(())
	}
}

impl<M, T> Default for SharedRouter<M, T> {
	fn default() -> Self {
		Self::new(Router::default())
	}
}

impl<M, T> From<Router<M, T>> for SharedRouter<M, T> {
	fn from(router: Router<M, T>) -> Self {
		Self::new(router)
	}
}
