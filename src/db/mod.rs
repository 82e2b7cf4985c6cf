use rusqlite::{Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("storage connection lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the database file. `":memory:"` gives a private in-memory store.
    pub fn new(path: &str) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Creates the tables if they are missing. Safe to run on every start.
    pub fn execute_init(&self) -> StoreResult<()> {
        info!("Database: Initializing schema...");
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        debug!("Database: Schema initialized successfully");
        Ok(())
    }

    /// Runs `f` on the blocking pool so callers on the event loop never wait on SQLite.
    pub async fn run_blocking<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> StoreResult<T> + Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || f(&db)).await?
    }

    pub fn set_guild_channel(&self, guild_id: &str, channel_id: &str) -> StoreResult<()> {
        debug!("Database: Mapping guild {} to channel {}", guild_id, channel_id);
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO guild_config (guild_id, channel_id)
             VALUES (?1, ?2)
             ON CONFLICT(guild_id) DO UPDATE SET channel_id = excluded.channel_id",
            (guild_id, channel_id),
        )?;
        Ok(())
    }

    pub fn get_guild_channel(&self, guild_id: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let channel = conn
            .query_row(
                "SELECT channel_id FROM guild_config WHERE guild_id = ?1",
                [guild_id],
                |row| row.get(0),
            )
            .optional()?;
        debug!("Database: Guild {} channel lookup -> {:?}", guild_id, channel);
        Ok(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.execute_init().unwrap();
        db
    }

    fn table_exists(db: &Database, name: &str) -> bool {
        let conn = db.conn.lock().unwrap();
        let exists = conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")
            .unwrap()
            .exists([name])
            .unwrap();
        exists
    }

    #[test]
    fn test_init_is_idempotent() {
        let db = test_db();
        db.set_guild_channel("g1", "c1").unwrap();

        db.execute_init().unwrap();
        db.execute_init().unwrap();

        assert!(table_exists(&db, "guild_config"));
        assert!(table_exists(&db, "delivery"));
        // Re-running the schema must not drop existing rows
        assert_eq!(db.get_guild_channel("g1").unwrap(), Some("c1".to_string()));
    }

    #[test]
    fn test_set_then_get() {
        let db = test_db();
        db.set_guild_channel("123", "456").unwrap();
        assert_eq!(db.get_guild_channel("123").unwrap(), Some("456".to_string()));
    }

    #[test]
    fn test_unconfigured_guild_is_none() {
        let db = test_db();
        assert_eq!(db.get_guild_channel("missing").unwrap(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let db = test_db();
        db.set_guild_channel("g", "c1").unwrap();
        db.set_guild_channel("g", "c2").unwrap();
        db.set_guild_channel("g", "c2").unwrap();

        assert_eq!(db.get_guild_channel("g").unwrap(), Some("c2".to_string()));

        let conn = db.conn.lock().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM guild_config WHERE guild_id = 'g'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_guilds_are_independent() {
        let db = test_db();
        db.set_guild_channel("a", "1").unwrap();
        db.set_guild_channel("b", "2").unwrap();
        assert_eq!(db.get_guild_channel("a").unwrap(), Some("1".to_string()));
        assert_eq!(db.get_guild_channel("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_file_backed_store_persists_across_handles() {
        let path = std::env::temp_dir().join(format!("pipeline-bot-test-{}.db", std::process::id()));
        let path_str = path.to_str().unwrap().to_string();
        let _ = std::fs::remove_file(&path);

        {
            let db = Database::new(&path_str).unwrap();
            db.execute_init().unwrap();
            db.set_guild_channel("g", "c").unwrap();
        }

        let reopened = Database::new(&path_str).unwrap();
        reopened.execute_init().unwrap();
        assert_eq!(reopened.get_guild_channel("g").unwrap(), Some("c".to_string()));

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_run_blocking() {
        let db = test_db();
        db.run_blocking(|db| db.set_guild_channel("g", "c")).await.unwrap();
        let channel = db.run_blocking(|db| db.get_guild_channel("g")).await.unwrap();
        assert_eq!(channel, Some("c".to_string()));
    }
}
