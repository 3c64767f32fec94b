/// # Staffing API Server Library
///
/// HTTP surface of the staffing job board.
///
/// ## Modules
///
/// - `app`: Application state, router and the session layer
/// - `config`: Configuration management
/// - `envelope`: The `{success, data, ...}` response envelope
/// - `error`: Error handling and HTTP response mapping
/// - `extract`: Validated JSON bodies
/// - `middleware`: Security headers
/// - `routes`: Route handlers, one module per resource

pub mod app;
pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
