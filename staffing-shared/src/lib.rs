/// # Staffing Shared Library
///
/// Types, collaborators and business rules shared by the staffing API server.
///
/// ## Module Organization
///
/// - `auth`: Session token verification, caller context, role checks, webhook signatures
/// - `dates`: Relative-date labels and lenient timestamp parsing
/// - `db`: Connection pool, migrations and the live/demo data source
/// - `demo`: Fixed sample data served when the database is absent or failing
/// - `email`: Outbound email providers and templates
/// - `feeds`: Job feed aggregation across the internal catalogue and external boards
/// - `models`: Database models and their queries
/// - `validation`: Field validators shared by request schemas

pub mod auth;
pub mod dates;
pub mod db;
pub mod demo;
pub mod email;
pub mod feeds;
pub mod models;
pub mod validation;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
