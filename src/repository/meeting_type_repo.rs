// ==========================================
// 会议室分配系统 - 会议类型数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: meeting_type / meeting_type_equipment 表 CRUD
// ==========================================

use crate::domain::{Equipment, EquipmentSet, MeetingType};
use crate::engine::ports::MeetingTypeLookup;
use crate::repository::equipment_repo::ensure_equipment_id;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// MeetingTypeRepository - 会议类型仓储
// ==========================================
pub struct MeetingTypeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MeetingTypeRepository {
    /// 创建新的 MeetingTypeRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增或覆盖会议类型（按名称）
    ///
    /// 覆盖时必需设备集合整体替换
    pub fn upsert(&self, meeting_type: &MeetingType) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO meeting_type (name, minimum_capacity) VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET minimum_capacity = excluded.minimum_capacity
            "#,
            params![meeting_type.name(), meeting_type.minimum_capacity()],
        )?;

        let meeting_type_id: i64 = tx.query_row(
            "SELECT meeting_type_id FROM meeting_type WHERE name = ?1",
            params![meeting_type.name()],
            |row| row.get(0),
        )?;

        tx.execute(
            "DELETE FROM meeting_type_equipment WHERE meeting_type_id = ?1",
            params![meeting_type_id],
        )?;
        for equipment in meeting_type.required_equipment() {
            let equipment_id = ensure_equipment_id(&tx, equipment.name())?;
            tx.execute(
                "INSERT INTO meeting_type_equipment (meeting_type_id, equipment_id) VALUES (?1, ?2)",
                params![meeting_type_id, equipment_id],
            )?;
        }

        tx.commit()?;
        Ok(meeting_type_id)
    }

    /// 按名称查询会议类型
    ///
    /// # 返回
    /// - Ok(Some(MeetingType)): 找到
    /// - Ok(None): 未找到
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<MeetingType>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT meeting_type_id, name, minimum_capacity FROM meeting_type WHERE name = ?1",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, u32>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, name, minimum_capacity)) => Ok(Some(assemble_meeting_type(
                &conn,
                id,
                name,
                minimum_capacity,
            )?)),
            None => Ok(None),
        }
    }

    /// 查询全部会议类型（按名称升序）
    pub fn find_all(&self) -> RepositoryResult<Vec<MeetingType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT meeting_type_id, name, minimum_capacity FROM meeting_type ORDER BY name ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, name, minimum_capacity)| {
                assemble_meeting_type(&conn, id, name, minimum_capacity)
            })
            .collect()
    }
}

impl MeetingTypeLookup for MeetingTypeRepository {
    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<MeetingType>> {
        MeetingTypeRepository::find_by_name(self, name)
    }
}

fn assemble_meeting_type(
    conn: &Connection,
    meeting_type_id: i64,
    name: String,
    minimum_capacity: u32,
) -> RepositoryResult<MeetingType> {
    let mut stmt = conn.prepare_cached(
        r#"
        SELECT e.name
        FROM meeting_type_equipment me
        JOIN equipment e ON e.equipment_id = me.equipment_id
        WHERE me.meeting_type_id = ?1
        "#,
    )?;
    let required = stmt
        .query_map(params![meeting_type_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?
        .into_iter()
        .map(Equipment::new)
        .collect::<Result<EquipmentSet, _>>()?;

    Ok(MeetingType::new(name, minimum_capacity, required)?)
}
