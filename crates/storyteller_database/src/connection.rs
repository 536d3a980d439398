//! Database connection utilities.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use storyteller_error::{DatabaseError, DatabaseErrorKind};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Open a SQLite database and bring its schema up to date.
///
/// Accepts a file path, a `sqlite://` URL, or `:memory:`.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened or a migration fails.
#[tracing::instrument]
pub fn establish_connection(database_url: &str) -> Result<SqliteConnection, DatabaseError> {
    let path = database_url
        .strip_prefix("sqlite://")
        .unwrap_or(database_url);

    let mut conn = SqliteConnection::establish(path)?;

    conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;")
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "Applied database migrations");
    }

    Ok(conn)
}
