/// Database layer
///
/// - `pool`: PostgreSQL connection pool construction and health checks
/// - `migrations`: embedded sqlx migrations
/// - `source`: the [`source::DataSource`] chosen once at start-up (live database or demo data)
///
/// Models are in the crate-level `models` module.

pub mod migrations;
pub mod pool;
pub mod source;
