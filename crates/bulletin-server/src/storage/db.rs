//! SQLite database layer (embedded, no external dependencies)

use crate::error::Result;
use bulletin_types::{Event, NewEvent};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

const MAX_CONNECTIONS: u32 = 5;

pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Open the database file read-write, creating an empty file first if
    /// it does not exist yet.
    pub async fn open(database_path: &Path) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path.display());

        if !tokio::fs::try_exists(database_path).await? {
            tracing::warn!("Database file not found: {}", database_path.display());

            if let Some(parent) = database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }

            tracing::info!("Creating a new database file...");
            tokio::fs::write(database_path, b"").await?;
        }

        // The file exists at this point; never let the driver create it.
        // Enabling WAL reads the file header, so a file that is not a SQLite
        // database is rejected here rather than at schema creation.
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(false)
            .read_only(false)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::info!("Connected to the SQLite database.");

        Ok(Self {
            pool,
            path: database_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `events` table if it is missing. Safe to run on every start.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                ID INTEGER PRIMARY KEY AUTOINCREMENT,
                eventType TEXT,
                location TEXT,
                time TEXT,
                poster TEXT,
                description TEXT,
                emergency BOOLEAN
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn fetch_all(&self) -> Result<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
            SELECT ID AS id, eventType AS event_type, location, time,
                   poster, description, emergency
            FROM events
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Append one event and return the id storage assigned to it
    pub async fn insert(&self, event: &NewEvent) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO events (eventType, location, time, poster, description, emergency)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&event.event_type)
        .bind(&event.location)
        .bind(&event.time)
        .bind(&event.poster)
        .bind(&event.description)
        .bind(event.emergency)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Delete the row whose id matches `id` and return how many rows went away.
    ///
    /// `id` is bound as text exactly as received; SQLite applies the column's
    /// integer affinity, so `"5"` matches row 5 and a non-numeric value
    /// matches nothing.
    pub async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM events WHERE ID = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct EventRow {
    id: i64,
    event_type: Option<String>,
    location: Option<String>,
    time: Option<String>,
    poster: Option<String>,
    description: Option<String>,
    emergency: Option<bool>,
}

impl From<EventRow> for Event {
    fn from(r: EventRow) -> Self {
        Event {
            id: r.id,
            event_type: r.event_type,
            location: r.location,
            time: r.time,
            poster: r.poster,
            description: r.description,
            emergency: r.emergency.unwrap_or(false),
        }
    }
}
