use crate::{route, Miss, Params, PathSegment, RouteError, Router, SharedRouter, StaticFiles};
use anyhow::Error;
use futures_util::FutureExt;
use hyper::{
	body::Body,
	header::{HeaderValue, ALLOW, LOCATION},
	http::{Method, StatusCode, Uri},
	service::Service,
};
use std::{
	any::Any,
	convert::Infallible,
	future::{ready, Future, Ready},
	panic::AssertUnwindSafe,
	path::PathBuf,
	pin::Pin,
	sync::Arc,
	task::{Context, Poll},
};
use tracing::{debug, error, warn};

pub use hyper;

pub use hyper::http::response::Builder as ResponseBuilder;
pub type Request = hyper::Request<Body>;
pub type Response = anyhow::Result<hyper::Response<Body>>;
pub type RouteFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Something that can answer a matched request.
///
/// Implemented for any `Fn(Params, Request) -> impl Future<Output = Response>`, so plain
/// `async fn`s can be registered directly.
pub trait Handler: Send + Sync + 'static {
	fn call(&self, params: Params, req: Request) -> RouteFuture;
}

impl<F, Fut> Handler for F
where
	F: Fn(Params, Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Response> + Send + 'static,
{
	fn call(&self, params: Params, req: Request) -> RouteFuture {
		Box::pin(self(params, req))
	}
}

pub type Route = Arc<dyn Handler>;

/// A function that can convert an error into a response.
pub type ErrorHandler = fn(e: Error) -> hyper::Response<Body>;

/// A function that handles unroutable requests and creates a response.
pub type NotFoundHandler = fn(req: Request) -> hyper::Response<Body>;

/// A function that answers a request whose path only exists under other methods.
///
/// The `Allow` header is filled in afterwards if the handler leaves it out.
pub type MethodNotAllowedHandler = fn(req: Request, allowed: &[Method]) -> hyper::Response<Body>;

/// A function that turns the payload of a panicking route handler into a response.
///
/// The request itself has been consumed by the handler, so only its method and URI are passed.
pub type PanicHandler =
	fn(method: &Method, uri: &Uri, payload: Box<dyn Any + Send>) -> hyper::Response<Body>;

/// Methods covered by [`RouterBuilder::any`].
pub const ANY_METHODS: [Method; 7] = [
	Method::GET,
	Method::HEAD,
	Method::POST,
	Method::PUT,
	Method::PATCH,
	Method::DELETE,
	Method::OPTIONS,
];

fn with_status(status: StatusCode, body: Body) -> hyper::Response<Body> {
	let mut res = hyper::Response::new(body);
	*res.status_mut() = status;
	res
}

fn default_error_handler(e: Error) -> hyper::Response<Body> {
	with_status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string().into())
}

fn default_not_found_handler(_req: Request) -> hyper::Response<Body> {
	with_status(StatusCode::NOT_FOUND, Body::empty())
}

fn default_method_not_allowed_handler(_req: Request, _allowed: &[Method]) -> hyper::Response<Body> {
	with_status(StatusCode::METHOD_NOT_ALLOWED, Body::empty())
}

fn default_panic_handler(
	_method: &Method,
	_uri: &Uri,
	_payload: Box<dyn Any + Send>,
) -> hyper::Response<Body> {
	with_status(StatusCode::INTERNAL_SERVER_ERROR, Body::empty())
}

/// The message of a panic raised with a string literal or a formatted string.
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
	payload
		.downcast_ref::<&str>()
		.copied()
		.or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

fn allow_header(allowed: &[Method]) -> Option<HeaderValue> {
	let methods = allowed.iter().map(Method::as_str).collect::<Vec<_>>();
	HeaderValue::from_str(&methods.join(", ")).ok()
}

/// Collects routes and settings, then [`build`](RouterBuilder::build)s an [`HttpRouter`].
///
/// Hooks left as `None` fall back to plain 404/405/500 responses.
pub struct RouterBuilder {
	routes: Router<Method, Route>,
	pub not_found_handler: Option<NotFoundHandler>,
	pub method_not_allowed_handler: Option<MethodNotAllowedHandler>,
	pub internal_error_handler: Option<ErrorHandler>,
	pub panic_handler: Option<PanicHandler>,
	/// Answer requests whose path exists under other methods with 405 instead of 404.
	pub handle_method_not_allowed: bool,
	/// Answer `OPTIONS` for routable paths automatically.
	pub handle_options: bool,
	/// Redirect to the same path with the trailing slash added or removed when only that routes
	/// under the request's method. Takes precedence over 405 and automatic `OPTIONS` replies.
	pub redirect_trailing_slash: bool,
}

impl Default for RouterBuilder {
	fn default() -> Self {
		Self {
			routes: Router::default(),
			not_found_handler: None,
			method_not_allowed_handler: None,
			internal_error_handler: None,
			panic_handler: None,
			handle_method_not_allowed: true,
			handle_options: true,
			redirect_trailing_slash: false,
		}
	}
}

impl RouterBuilder {
	pub fn register<H: Handler>(
		&mut self,
		method: Method,
		pattern: &str,
		handler: H,
	) -> Result<&mut Self, RouteError> {
		let route: Route = Arc::new(handler);
		self.routes.register(method, pattern, route)?;
		Ok(self)
	}

	pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		self.register(Method::GET, pattern, handler)
	}

	pub fn head<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		self.register(Method::HEAD, pattern, handler)
	}

	pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		self.register(Method::POST, pattern, handler)
	}

	pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		self.register(Method::PUT, pattern, handler)
	}

	pub fn patch<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		self.register(Method::PATCH, pattern, handler)
	}

	pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		self.register(Method::DELETE, pattern, handler)
	}

	pub fn options<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		self.register(Method::OPTIONS, pattern, handler)
	}

	/// Registers the same handler under every method in [`ANY_METHODS`], or under none of them.
	pub fn any<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
		let route: Route = Arc::new(handler);
		let mut next = self.routes.clone();
		for method in ANY_METHODS.iter() {
			next.register(method.clone(), pattern, Arc::clone(&route))?;
		}

		self.routes = next;
		Ok(self)
	}

	/// Serves files from `root` under a pattern ending in a catch-all, e.g. `/files/*filepath`.
	pub fn serve_files(
		&mut self,
		pattern: &str,
		root: impl Into<PathBuf>,
	) -> Result<&mut Self, RouteError> {
		let param = match route::parse(pattern)?.last() {
			Some(PathSegment::CatchAll(name)) => (*name).to_owned(),
			_ => {
				return Err(RouteError::malformed(
					pattern,
					"file server patterns must end with a catch-all",
				))
			}
		};

		self.get(pattern, StaticFiles::new(root, param))
	}

	pub fn build(self) -> HttpRouter {
		HttpRouter {
			routes: Arc::new(SharedRouter::from(self.routes)),
			hooks: Arc::new(Hooks {
				not_found: self.not_found_handler.unwrap_or(default_not_found_handler),
				method_not_allowed: self
					.method_not_allowed_handler
					.unwrap_or(default_method_not_allowed_handler),
				internal_error: self.internal_error_handler.unwrap_or(default_error_handler),
				panic: self.panic_handler.unwrap_or(default_panic_handler),
				handle_method_not_allowed: self.handle_method_not_allowed,
				handle_options: self.handle_options,
				redirect_trailing_slash: self.redirect_trailing_slash,
			}),
		}
	}
}

struct Hooks {
	not_found: NotFoundHandler,
	method_not_allowed: MethodNotAllowedHandler,
	internal_error: ErrorHandler,
	panic: PanicHandler,
	handle_method_not_allowed: bool,
	handle_options: bool,
	redirect_trailing_slash: bool,
}

impl Hooks {
	fn miss(&self, routes: &Router<Method, Route>, miss: Miss<Method>, req: Request) -> hyper::Response<Body> {
		let method = req.method().clone();
		let path = req.uri().path().to_owned();

		if self.redirect_trailing_slash {
			if let Some(target) = routes.trailing_slash_redirect(&method, &path) {
				debug!(from = %path, to = %target, "redirecting trailing slash");
				return redirect(&method, &target, req.uri().query());
			}
		}

		match miss {
			Miss::MethodNotAllowed(mut allowed) if self.handle_options && method == Method::OPTIONS => {
				debug!(path = %path, "answering OPTIONS");
				allowed.push(Method::OPTIONS);

				let mut res = with_status(StatusCode::OK, Body::empty());
				if let Some(value) = allow_header(&allowed) {
					res.headers_mut().insert(ALLOW, value);
				}
				res
			}
			Miss::MethodNotAllowed(allowed) if self.handle_method_not_allowed => {
				debug!(method = %method, path = %path, "method not allowed");

				let mut res = (self.method_not_allowed)(req, &allowed);
				if !res.headers().contains_key(ALLOW) {
					if let Some(value) = allow_header(&allowed) {
						res.headers_mut().insert(ALLOW, value);
					}
				}
				res
			}
			_ => {
				debug!(method = %method, path = %path, "no route");
				(self.not_found)(req)
			}
		}
	}
}

fn redirect(method: &Method, target: &str, query: Option<&str>) -> hyper::Response<Body> {
	let status = if *method == Method::GET || *method == Method::HEAD {
		StatusCode::MOVED_PERMANENTLY
	} else {
		StatusCode::PERMANENT_REDIRECT
	};
	let location = match query {
		Some(query) => format!("{}?{}", target, query),
		None => target.to_owned(),
	};

	let mut res = with_status(status, Body::empty());
	if let Ok(value) = HeaderValue::from_str(&location) {
		res.headers_mut().insert(LOCATION, value);
	}
	res
}

/// Pass this to hyper as the service; it hands a [`RouteHandler`] to every connection.
#[derive(Clone)]
pub struct HttpRouter {
	routes: Arc<SharedRouter<Method, Route>>,
	hooks: Arc<Hooks>,
}

impl HttpRouter {
	/// The live route table. Registrations made through it are seen by subsequent requests.
	pub fn routes(&self) -> &SharedRouter<Method, Route> {
		&self.routes
	}

	pub fn register<H: Handler>(&self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError> {
		self.routes.register(method, pattern, Arc::new(handler))
	}

	pub fn handler(&self) -> RouteHandler {
		RouteHandler {
			routes: Arc::clone(&self.routes),
			hooks: Arc::clone(&self.hooks),
		}
	}
}

impl From<RouterBuilder> for HttpRouter {
	fn from(builder: RouterBuilder) -> Self {
		builder.build()
	}
}

impl<T> Service<T> for HttpRouter {
	type Response = RouteHandler;
	type Error = Infallible;
	type Future = Ready<Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, _: T) -> Self::Future {
		ready(Ok(self.handler()))
	}
}

/// Responsible for handling the actual HTTP requests from hyper.
pub struct RouteHandler {
	routes: Arc<SharedRouter<Method, Route>>,
	hooks: Arc<Hooks>,
}

impl Service<Request> for RouteHandler {
	type Response = hyper::Response<Body>;
	type Error = Infallible;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, req: Request) -> Self::Future {
		let routes = self.routes.snapshot();
		let hooks = Arc::clone(&self.hooks);

		let outcome = routes
			.dispatch(req.method(), req.uri().path())
			.map(|found| (Arc::clone(found.route), found.params));

		match outcome {
			Ok((route, params)) => Box::pin(async move {
				let method = req.method().clone();
				let uri = req.uri().clone();
				let invocation = AssertUnwindSafe(async move { route.call(params, req).await }).catch_unwind();

				Ok::<_, Infallible>(match invocation.await {
					Ok(Ok(res)) => res,
					Ok(Err(e)) => {
						warn!(error = %e, "route handler failed");
						(hooks.internal_error)(e)
					}
					Err(payload) => {
						error!(
							reason = panic_message(&*payload).unwrap_or("<non-string payload>"),
							"route handler panicked"
						);
						(hooks.panic)(&method, &uri, payload)
					}
				})
			}),
			Err(miss) => {
				let res = hooks.miss(&routes, miss, req);
				Box::pin(ready(Ok::<_, Infallible>(res)))
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::{panic_message, HttpRouter, Request, Response, ResponseBuilder, RouterBuilder};
	use crate::{Params, RouteError};
	use hyper::{
		header::{ALLOW, LOCATION},
		http::{Method, StatusCode, Uri},
		service::Service,
		Body,
	};
	use std::{
		any::Any,
		task::{Context, Poll},
	};
	use tracing::info;

	async fn send(router: &HttpRouter, method: Method, uri: &str) -> hyper::Response<Body> {
		let req = hyper::Request::builder()
			.method(method)
			.uri(uri)
			.body(Body::empty())
			.unwrap();
		router.handler().call(req).await.unwrap()
	}

	async fn body(res: hyper::Response<Body>) -> String {
		let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
		String::from_utf8(bytes.to_vec()).unwrap()
	}

	fn text(body: String) -> Response {
		Ok(ResponseBuilder::default().body(body.into())?)
	}

	async fn hello(_params: Params, _req: Request) -> Response {
		text("Hello World".into())
	}

	async fn product(params: Params, _req: Request) -> Response {
		text(format!("Product {}", params.get("id").unwrap_or_default()))
	}

	async fn item(params: Params, _req: Request) -> Response {
		text(format!(
			"Product {} Item {}",
			params.get("id").unwrap_or_default(),
			params.get("itemid").unwrap_or_default()
		))
	}

	async fn image(params: Params, _req: Request) -> Response {
		text(format!("Image : {}", params.get("image").unwrap_or_default()))
	}

	async fn post(_params: Params, _req: Request) -> Response {
		text("POST".into())
	}

	async fn panics(_params: Params, _req: Request) -> Response {
		panic!("Ups")
	}

	async fn fails(_params: Params, _req: Request) -> Response {
		Err(anyhow::anyhow!("database unavailable"))
	}

	#[tokio::test]
	async fn serves_static_route() {
		let mut builder = RouterBuilder::default();
		builder.get("/", hello).unwrap();
		let router = builder.build();

		assert_eq!(body(send(&router, Method::GET, "http://localhost:3000/").await).await, "Hello World");
	}

	#[tokio::test]
	async fn passes_params_to_handlers() {
		let mut builder = RouterBuilder::default();
		builder
			.get("/product/:id", product)
			.unwrap()
			.get("/products/:id/items/:itemid", item)
			.unwrap()
			.get("/images/*image", image)
			.unwrap();
		let router = builder.build();

		assert_eq!(body(send(&router, Method::GET, "/product/1").await).await, "Product 1");
		assert_eq!(
			body(send(&router, Method::GET, "/products/1/items/1").await).await,
			"Product 1 Item 1"
		);
		assert_eq!(
			body(send(&router, Method::GET, "/images/small/profile.png").await).await,
			"Image : /small/profile.png"
		);
	}

	#[tokio::test]
	async fn serves_files() {
		let mut builder = RouterBuilder::default();
		builder
			.serve_files(
				"/files/*filepath",
				concat!(env!("CARGO_MANIFEST_DIR"), "/tests/resources"),
			)
			.unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/files/goodbye.txt").await;
		assert_eq!(res.status(), StatusCode::OK);
		assert_eq!(res.headers()["content-type"], "text/plain");
		assert_eq!(body(res).await, "GoodBye");

		let res = send(&router, Method::GET, "/files/missing.txt").await;
		assert_eq!(res.status(), StatusCode::NOT_FOUND);

		let res = send(&router, Method::GET, "/files/../Cargo.toml").await;
		assert_eq!(res.status(), StatusCode::NOT_FOUND);

		let res = send(&router, Method::GET, "/files/good%20bye.txt").await;
		assert_eq!(res.status(), StatusCode::OK);
		assert_eq!(body(res).await, "Good bye");

		let res = send(&router, Method::GET, "/files/%2e%2e/Cargo.toml").await;
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
	}

	#[test]
	fn serve_files_needs_a_catch_all() {
		let mut builder = RouterBuilder::default();
		assert!(matches!(
			builder.serve_files("/files/:name", "tests/resources"),
			Err(RouteError::Malformed { .. })
		));
	}

	#[tokio::test]
	async fn recovers_from_panics() {
		fn on_panic(method: &Method, uri: &Uri, payload: Box<dyn Any + Send>) -> hyper::Response<Body> {
			let message = format!(
				"Panic : {} ({} {})",
				panic_message(&*payload).unwrap_or_default(),
				method,
				uri.path()
			);
			hyper::Response::new(message.into())
		}

		let mut builder = RouterBuilder::default();
		builder.panic_handler = Some(on_panic);
		builder.get("/", panics).unwrap();
		let router = builder.build();

		assert_eq!(
			body(send(&router, Method::GET, "/?retry=1").await).await,
			"Panic : Ups (GET /)"
		);
	}

	#[tokio::test]
	async fn default_panic_response_is_500() {
		let mut builder = RouterBuilder::default();
		builder.get("/", panics).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/").await;
		assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[tokio::test]
	async fn handler_errors_go_to_internal_error_handler() {
		let mut builder = RouterBuilder::default();
		builder.get("/", fails).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/").await;
		assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body(res).await, "database unavailable");
	}

	#[tokio::test]
	async fn custom_not_found() {
		fn not_found(_req: Request) -> hyper::Response<Body> {
			hyper::Response::new("Not here".into())
		}

		let mut builder = RouterBuilder::default();
		builder.not_found_handler = Some(not_found);
		let router = builder.build();

		assert_eq!(body(send(&router, Method::GET, "/404").await).await, "Not here");
	}

	#[tokio::test]
	async fn default_not_found() {
		let router = RouterBuilder::default().build();

		let res = send(&router, Method::GET, "/404").await;
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
		assert_eq!(body(res).await, "");
	}

	#[tokio::test]
	async fn custom_method_not_allowed_keeps_allow_header() {
		fn not_allowed(_req: Request, _allowed: &[Method]) -> hyper::Response<Body> {
			hyper::Response::new("Not allowed".into())
		}

		let mut builder = RouterBuilder::default();
		builder.method_not_allowed_handler = Some(not_allowed);
		builder.post("/", post).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/").await;
		assert_eq!(res.headers()[ALLOW], "POST");
		assert_eq!(body(res).await, "Not allowed");
	}

	#[tokio::test]
	async fn default_method_not_allowed() {
		let mut builder = RouterBuilder::default();
		builder.post("/things", post).unwrap().put("/things", post).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/things").await;
		assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(res.headers()[ALLOW], "POST, PUT");
	}

	#[tokio::test]
	async fn method_not_allowed_can_be_disabled() {
		let mut builder = RouterBuilder::default();
		builder.handle_method_not_allowed = false;
		builder.post("/", post).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/").await;
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn answers_options() {
		let mut builder = RouterBuilder::default();
		builder.get("/things", hello).unwrap().post("/things", post).unwrap();
		let router = builder.build();

		let res = send(&router, Method::OPTIONS, "/things").await;
		assert_eq!(res.status(), StatusCode::OK);
		assert_eq!(res.headers()[ALLOW], "GET, POST, OPTIONS");

		let res = send(&router, Method::OPTIONS, "/elsewhere").await;
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn any_registers_every_method() {
		let mut builder = RouterBuilder::default();
		builder.any("/echo", hello).unwrap();
		let router = builder.build();

		for method in &[Method::GET, Method::POST, Method::DELETE, Method::OPTIONS] {
			let res = send(&router, method.clone(), "/echo").await;
			assert_eq!(body(res).await, "Hello World");
		}
	}

	#[test]
	fn any_is_all_or_nothing() {
		let mut builder = RouterBuilder::default();
		builder.delete("/echo", hello).unwrap();

		assert!(matches!(
			builder.any("/echo", hello),
			Err(RouteError::Duplicate { .. })
		));
		assert!(builder.get("/echo", hello).is_ok());
	}

	#[tokio::test]
	async fn redirects_trailing_slash_when_enabled() {
		let mut builder = RouterBuilder::default();
		builder.redirect_trailing_slash = true;
		builder.get("/docs/", hello).unwrap().post("/submit", post).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/docs?page=2").await;
		assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
		assert_eq!(res.headers()[LOCATION], "/docs/?page=2");

		let res = send(&router, Method::POST, "/submit/").await;
		assert_eq!(res.status(), StatusCode::PERMANENT_REDIRECT);
		assert_eq!(res.headers()[LOCATION], "/submit");
	}

	#[tokio::test]
	async fn trailing_slash_redirect_wins_over_method_not_allowed() {
		let mut builder = RouterBuilder::default();
		builder.redirect_trailing_slash = true;
		builder.get("/docs/", hello).unwrap().post("/docs", post).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/docs").await;
		assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
		assert_eq!(res.headers()[LOCATION], "/docs/");

		let res = send(&router, Method::PUT, "/docs").await;
		assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(res.headers()[ALLOW], "POST");
	}

	#[tokio::test]
	async fn trailing_slash_is_not_redirected_by_default() {
		let mut builder = RouterBuilder::default();
		builder.get("/docs/", hello).unwrap();
		let router = builder.build();

		let res = send(&router, Method::GET, "/docs").await;
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn registers_after_build() {
		let router = RouterBuilder::default().build();
		assert_eq!(send(&router, Method::GET, "/late").await.status(), StatusCode::NOT_FOUND);

		router.register(Method::GET, "/late", hello).unwrap();
		assert_eq!(body(send(&router, Method::GET, "/late").await).await, "Hello World");
		assert!(router.register(Method::GET, "/late", hello).is_err());
	}

	struct LogMiddleware<S> {
		inner: S,
	}

	impl<S> Service<Request> for LogMiddleware<S>
	where
		S: Service<Request>,
	{
		type Response = S::Response;
		type Error = S::Error;
		type Future = S::Future;

		fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
			self.inner.poll_ready(cx)
		}

		fn call(&mut self, req: Request) -> Self::Future {
			info!(path = %req.uri().path(), "received request");
			self.inner.call(req)
		}
	}

	#[tokio::test]
	async fn works_behind_a_wrapping_service() {
		let mut builder = RouterBuilder::default();
		builder.get("/", hello).unwrap();
		let router = builder.build();

		let mut middleware = LogMiddleware {
			inner: router.handler(),
		};
		let req = hyper::Request::builder().uri("/").body(Body::empty()).unwrap();
		let res = middleware.call(req).await.unwrap();

		assert_eq!(body(res).await, "Hello World");
	}
}
