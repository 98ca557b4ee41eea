//! SQLite 本地存储
//!
//! 以键值表的形式保存列表集合：键为 [`WORD_LISTS_KEY`]，值为整个集合的 JSON。
//! 表结构通过 `schema_migrations` 版本表管理。

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use word_wizard_core::{StorageError, StoragePort, StorageResult, WORD_LISTS_KEY};

use crate::error::{AppError, AppResult};

// ============================================================
// 迁移定义
// ============================================================

/// 当前 schema 版本
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// 迁移记录
#[derive(Debug, Clone)]
struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "kv_store",
    sql: r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
}];

fn ensure_migrations_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )
    .map_err(|e| AppError::Migration(format!("failed to create schema_migrations: {e}")))?;
    Ok(())
}

/// 获取当前数据库版本，没有迁移记录时返回 0
pub fn current_version(conn: &Connection) -> AppResult<i32> {
    ensure_migrations_table(conn)?;
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// 运行数据库迁移
///
/// 每个迁移在独立事务中执行，返回最终版本号。
pub fn run_migrations(conn: &mut Connection) -> AppResult<i32> {
    let applied = current_version(conn)?;
    let mut version = applied;

    for migration in MIGRATIONS.iter().filter(|m| m.version > applied) {
        tracing::info!(version = migration.version, name = migration.name, "running migration");

        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql).map_err(|e| {
            AppError::Migration(format!("migration v{} failed: {e}", migration.version))
        })?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![migration.version, migration.name, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        version = migration.version;
    }

    tracing::debug!(version, latest = CURRENT_SCHEMA_VERSION, "database schema up to date");
    Ok(version)
}

// ============================================================
// SqliteStorage
// ============================================================

/// 基于 SQLite 的存储端口实现
pub struct SqliteStorage {
    conn: Connection,
    db_path: String,
}

impl SqliteStorage {
    /// 打开（必要时创建）数据库文件并运行迁移
    pub fn open<P: AsRef<Path>>(db_path: P) -> AppResult<Self> {
        let path = db_path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;",
        )?;

        Self::initialize(conn, path.to_string_lossy().to_string())
    }

    /// 创建内存数据库（用于测试）
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn, ":memory:".to_string())
    }

    fn initialize(mut conn: Connection, db_path: String) -> AppResult<Self> {
        run_migrations(&mut conn)?;
        tracing::info!(db_path = %db_path, "storage opened");
        Ok(Self { conn, db_path })
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn get_item(&self, key: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    fn set_item(&self, key: &str, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl StoragePort for SqliteStorage {
    fn load(&self) -> StorageResult<Option<String>> {
        self.get_item(WORD_LISTS_KEY)
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn store(&mut self, payload: &str) -> StorageResult<()> {
        self.set_item(WORD_LISTS_KEY, payload)
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}
