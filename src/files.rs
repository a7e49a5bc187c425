use crate::{Handler, Params, Request, Response, ResponseBuilder, RouteFuture};
use hyper::{header::CONTENT_TYPE, http::StatusCode, Body};
use percent_encoding::percent_decode_str;
use std::{
	io::ErrorKind,
	path::{Component, Path, PathBuf},
};
use tracing::debug;

/// Serves files below `root`, taking the relative path from a catch-all parameter.
///
/// The requested path is percent-decoded before it is mapped. Anything that would leave `root`
/// (`..`, absolute components) or does not decode to UTF-8 is answered with a 404, the same as a
/// file that does not exist.
#[derive(Debug, Clone)]
pub struct StaticFiles {
	root: PathBuf,
	param: String,
}

impl StaticFiles {
	pub fn new(root: impl Into<PathBuf>, param: impl Into<String>) -> Self {
		Self {
			root: root.into(),
			param: param.into(),
		}
	}

	fn map_path(&self, requested: &str) -> Option<PathBuf> {
		let decoded = percent_decode_str(requested).decode_utf8().ok()?;

		let mut path = self.root.clone();
		for component in Path::new(decoded.trim_start_matches('/')).components() {
			match component {
				Component::Normal(name) => path.push(name),
				Component::CurDir => {}
				_ => return None,
			}
		}
		Some(path)
	}
}

fn content_type(path: &Path) -> &'static str {
	match path
		.extension()
		.and_then(|ext| ext.to_str())
		.unwrap_or_default()
		.to_lowercase()
		.as_str()
	{
		"html" => "text/html",
		"css" => "text/css",
		"js" => "application/javascript",
		"json" => "application/json",
		"txt" => "text/plain",
		"png" => "image/png",
		_ => "application/octet-stream",
	}
}

fn not_found() -> hyper::Response<Body> {
	let mut res = hyper::Response::new(Body::empty());
	*res.status_mut() = StatusCode::NOT_FOUND;
	res
}

async fn serve(path: Option<PathBuf>) -> Response {
	let path = match path {
		Some(path) => path,
		None => return Ok(not_found()),
	};

	match tokio::fs::metadata(&path).await {
		Ok(meta) if meta.is_file() => {}
		Ok(_) => return Ok(not_found()),
		Err(e) if e.kind() == ErrorKind::NotFound => return Ok(not_found()),
		Err(e) => return Err(e.into()),
	}

	let bytes = tokio::fs::read(&path).await?;
	debug!(path = %path.display(), len = bytes.len(), "serving file");

	Ok(ResponseBuilder::new()
		.header(CONTENT_TYPE, content_type(&path))
		.body(bytes.into())?)
}

impl Handler for StaticFiles {
	fn call(&self, params: Params, _req: Request) -> RouteFuture {
		let path = params
			.get(&self.param)
			.and_then(|requested| self.map_path(requested));

		Box::pin(serve(path))
	}
}
