//! A trie-based HTTP router built on hyper.
//!
//! ```no_run
//! use switchyard::{hyper::Server, Body, Params, Request, Response, ResponseBuilder, RouterBuilder};
//!
//! async fn handler(params: Params, _req: Request) -> Response {
//! 	let id = params.get("id").unwrap_or_default().to_owned();
//! 	Ok(ResponseBuilder::default().body(Body::from(id))?)
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! 	let addr = ([127, 0, 0, 1], 3000).into();
//! 	let mut builder = RouterBuilder::default();
//! 	builder
//! 		.get("/", handler)?
//! 		.get("/foo/:id", handler)?
//! 		.post("/foo/:id", handler)?
//! 		.serve_files("/static/*filepath", "public")?;
//!
//! 	let server = Server::bind(&addr).serve(builder.build());
//! 	println!("Listening on http://{}", addr);
//!
//! 	server.await?;
//! 	Ok(())
//! }
//! ```
//!
//! Path segments starting with `:` bind a single segment by name. A final segment starting with
//! `*` binds the rest of the path, leading slash included. At every position a literal segment
//! is preferred over a parameter, and a parameter over a catch-all; if the preferred branch
//! cannot complete the match the next one is tried. A trailing slash is part of the path, so
//! `/a` and `/a/` are different routes unless `redirect_trailing_slash` is enabled.
//!
//! The router builder exposes hooks for unmatched requests, requests with the wrong method,
//! errors returned from handlers and handlers that panic.

mod error;
mod params;

/// Route patterns and the `path!` macro.
pub mod route;

/// The method-keyed route trees and their lock-free shared form.
pub mod router;

#[cfg(feature = "http")]
mod files;
#[cfg(feature = "http")]
mod http;

pub use error::RouteError;
pub use params::Params;
pub use route::{Path, PathSegment};
pub use router::{Match, Miss, Router, SharedRouter};

#[cfg(feature = "http")]
pub use files::StaticFiles;
#[cfg(feature = "http")]
pub use http::*;
#[cfg(feature = "http")]
pub use hyper::Body;
