// ==========================================
// 会议室分配系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键、busy_timeout）
// - 统一建表语句，重复预约由 meeting 表唯一约束兜底
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 表结构:
/// - equipment / room / room_equipment
/// - meeting_type / meeting_type_equipment
/// - meeting: UNIQUE(room_id, meeting_date, meeting_hour)
/// - config_scope / config_kv: 全局配置
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_scope (
            scope_id TEXT PRIMARY KEY,
            scope_type TEXT NOT NULL,
            scope_key TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(scope_type, scope_key)
        );

        INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key)
        VALUES ('global', 'GLOBAL', 'global');

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL REFERENCES config_scope(scope_id) ON DELETE CASCADE,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS equipment (
            equipment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS room (
            room_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            capacity INTEGER NOT NULL CHECK (capacity > 0)
        );

        CREATE TABLE IF NOT EXISTS room_equipment (
            room_id INTEGER NOT NULL REFERENCES room(room_id) ON DELETE CASCADE,
            equipment_id INTEGER NOT NULL REFERENCES equipment(equipment_id),
            PRIMARY KEY (room_id, equipment_id)
        );

        CREATE TABLE IF NOT EXISTS meeting_type (
            meeting_type_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            minimum_capacity INTEGER NOT NULL CHECK (minimum_capacity >= 0)
        );

        CREATE TABLE IF NOT EXISTS meeting_type_equipment (
            meeting_type_id INTEGER NOT NULL REFERENCES meeting_type(meeting_type_id) ON DELETE CASCADE,
            equipment_id INTEGER NOT NULL REFERENCES equipment(equipment_id),
            PRIMARY KEY (meeting_type_id, equipment_id)
        );

        CREATE TABLE IF NOT EXISTS meeting (
            meeting_id INTEGER PRIMARY KEY AUTOINCREMENT,
            meeting_date TEXT NOT NULL,
            meeting_hour INTEGER NOT NULL,
            participant_count INTEGER NOT NULL,
            meeting_type_id INTEGER NOT NULL REFERENCES meeting_type(meeting_type_id),
            room_id INTEGER NOT NULL REFERENCES room(room_id),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (room_id, meeting_date, meeting_hour)
        );

        CREATE INDEX IF NOT EXISTS idx_meeting_room_date ON meeting(room_id, meeting_date);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}
