// ==========================================
// 会议室分配系统 - 设备字典
// ==========================================
// 职责: equipment 表按名称取ID，由 room / meeting_type 仓储在事务内调用
// ==========================================

use crate::repository::error::RepositoryResult;
use rusqlite::{params, Connection, OptionalExtension};

/// 按名称获取设备ID，不存在则创建
///
/// 供 room / meeting_type 仓储在同一事务内复用
pub(crate) fn ensure_equipment_id(conn: &Connection, name: &str) -> RepositoryResult<i64> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT equipment_id FROM equipment WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute("INSERT INTO equipment (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}
