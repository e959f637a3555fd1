use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::Response,
    Router,
};
use tokio::signal;
use tower_http::compression::CompressionLayer;

use crate::catalog::{self, Catalog};
use crate::html;
use crate::web_assets;

/// Maximum number of consecutive ports to try before giving up.
const MAX_PORT_ATTEMPTS: u16 = 100;

/// Shared application state passed to all request handlers via `Arc<AppState>`.
///
/// The catalog is static, so the page and the JSON projection are rendered
/// once at startup and served verbatim afterwards.
#[derive(Debug)]
pub struct AppState {
    pub catalog: Catalog,
    /// The complete rendered HTML page.
    pub page: String,
    /// Serialized `/catalog.json` body.
    pub catalog_json: String,
}

impl AppState {
    /// Validate the catalog and render everything the server will hand out.
    ///
    /// Fails when a catalog invariant is violated or the page shell is
    /// missing its render target; both abort startup rather than serving a
    /// partial page.
    pub fn build(catalog: Catalog) -> io::Result<Self> {
        catalog::validate(&catalog)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        let page = html::render_page(&catalog)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        let catalog_json = catalog::catalog_json(&catalog).to_string();
        Ok(Self {
            catalog,
            page,
            catalog_json,
        })
    }
}

/// Attempt to bind a TCP listener on `bind_addr` starting at `start_port`.
///
/// On `EADDRINUSE` the port is incremented by one and the attempt is retried
/// up to `MAX_PORT_ATTEMPTS` times. Any other OS error causes an immediate
/// failure without further retries.
pub fn bind_with_retry(bind_addr: &str, start_port: u16) -> Result<(TcpListener, u16), String> {
    let mut port = start_port;
    eprintln!("[bind] trying port={}", port);
    for _ in 0..MAX_PORT_ATTEMPTS {
        let addr = format!("{}:{}", bind_addr, port);
        match TcpListener::bind(&addr) {
            Ok(listener) => {
                eprintln!("[bind] success port={}", port);
                return Ok((listener, port));
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                let next = port.wrapping_add(1);
                eprintln!("[bind] EADDRINUSE, trying {}", next);
                port = next;
            }
            Err(e) => {
                return Err(format!("bind {}:{} failed: {}", bind_addr, port, e));
            }
        }
    }
    Err(format!(
        "exhausted {} port candidates starting at {}; all ports in use",
        MAX_PORT_ATTEMPTS, start_port,
    ))
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// The fixed route table. There is no filesystem behind this server; every
/// response body is embedded in the binary or rendered at startup.
#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    Page,
    Css,
    Js,
    CatalogJson,
    NotFound,
}

pub fn route_for(path: &str) -> Route {
    match path {
        "/" | "/index.html" => Route::Page,
        "/assets/cardapio.css" => Route::Css,
        "/assets/cardapio.js" => Route::Js,
        "/catalog.json" => Route::CatalogJson,
        _ => Route::NotFound,
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// 200 OK with the mandatory `X-Content-Type-Options: nosniff` header.
fn ok_response(content_type: &'static str, body: impl Into<Body>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header("X-Content-Type-Options", "nosniff")
        .body(body.into())
        .expect("ok_response builder is infallible")
}

/// 404 Not Found with mandatory security headers.
fn not_found_response() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header("X-Content-Type-Options", "nosniff")
        .body(Body::from("Not Found"))
        .expect("not_found_response builder is infallible")
}

// ---------------------------------------------------------------------------
// Axum request handler
// ---------------------------------------------------------------------------

async fn serve_handler(State(state): State<Arc<AppState>>, req: Request) -> Response {
    let path = req.uri().path().to_owned();
    let route = route_for(&path);
    eprintln!("[request] path={} route={:?}", path, route);

    match route {
        Route::Page => ok_response("text/html; charset=utf-8", state.page.clone()),
        Route::Css => ok_response("text/css; charset=utf-8", web_assets::CSS),
        Route::Js => ok_response("text/javascript; charset=utf-8", web_assets::JS),
        Route::CatalogJson => ok_response(
            "application/json; charset=utf-8",
            state.catalog_json.clone(),
        ),
        Route::NotFound => not_found_response(),
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the HTTP server for the given catalog.
///
/// Binds to `bind_addr` starting at `start_port`, retrying on `EADDRINUSE`
/// up to 100 times. The server shuts down cleanly when SIGINT (Ctrl+C) is
/// received.
pub async fn run_serve(catalog: Catalog, bind_addr: String, start_port: u16) -> io::Result<()> {
    let state = Arc::new(AppState::build(catalog)?);

    let (std_listener, bound_port) = bind_with_retry(&bind_addr, start_port).map_err(|msg| {
        eprintln!("Error: {}", msg);
        io::Error::new(io::ErrorKind::AddrInUse, msg)
    })?;

    std_listener.set_nonblocking(true)?;
    let listener = tokio::net::TcpListener::from_std(std_listener)?;

    let app = Router::new()
        .fallback(serve_handler)
        .layer(CompressionLayer::new())
        .with_state(state.clone());

    println!("cardapio serve");
    println!("categories: {}", state.catalog.categories.len());
    println!("url:   http://{}:{}/", bind_addr, bound_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c()
                .await
                .expect("failed to install SIGINT handler");
            eprintln!("[shutdown] complete");
        })
        .await
        .map_err(io::Error::other)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
