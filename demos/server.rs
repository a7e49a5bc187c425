use std::{env, net::SocketAddr};
use switchyard::{
	hyper::{self, Server},
	panic_message, Body, Params, Request, Response, ResponseBuilder, RouterBuilder,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn hello(_params: Params, _req: Request) -> Response {
	Ok(ResponseBuilder::default().body("Hello HttpRouter".into())?)
}

async fn product(params: Params, _req: Request) -> Response {
	let text = format!("Product {}", params.get("id").unwrap_or_default());
	Ok(ResponseBuilder::default().body(text.into())?)
}

async fn item(params: Params, _req: Request) -> Response {
	let text = format!(
		"Product {} Item {}",
		params.get("id").unwrap_or_default(),
		params.get("itemid").unwrap_or_default()
	);
	Ok(ResponseBuilder::default().body(text.into())?)
}

async fn image(params: Params, _req: Request) -> Response {
	let text = format!("Image : {}", params.get("image").unwrap_or_default());
	Ok(ResponseBuilder::default().body(text.into())?)
}

async fn explode(_params: Params, _req: Request) -> Response {
	panic!("Ups")
}

fn on_panic(
	_method: &hyper::Method,
	_uri: &hyper::Uri,
	payload: Box<dyn std::any::Any + Send>,
) -> hyper::Response<Body> {
	let text = format!("Panic : {}", panic_message(&*payload).unwrap_or_default());
	hyper::Response::new(text.into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "switchyard=debug,server=debug".into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let addr: SocketAddr = env::var("SWITCHYARD_ADDR")
		.unwrap_or_else(|_| "127.0.0.1:3000".into())
		.parse()?;

	let mut builder = RouterBuilder::default();
	builder.panic_handler = Some(on_panic);
	builder.redirect_trailing_slash = true;
	builder
		.get("/", hello)?
		.get("/product/:id", product)?
		.get("/products/:id/items/:itemid", item)?
		.get("/images/*image", image)?
		.get("/panic", explode)?
		.serve_files("/files/*filepath", concat!(env!("CARGO_MANIFEST_DIR"), "/tests/resources"))?;

	let server = Server::bind(&addr).serve(builder.build());
	tracing::info!(address = %addr, "listening");

	server.await?;
	Ok(())
}
