use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Build a service's connection pool. Sizing comes from the service
/// configuration; connections are checked on the way out so a dropped
/// database surfaces at checkout rather than mid-query.
pub fn create_pool(database_url: &str, max_connections: u32) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_connections)
        .min_idle(Some(max_connections.min(2)))
        .test_on_check_out(true)
        .build(manager)
        .expect("failed to create database pool");

    tracing::info!(max_connections, "database connection pool created");
    pool
}
