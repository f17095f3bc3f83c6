// ==========================================
// 会议室分配系统 - 会议室数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: room / room_equipment 表 CRUD，组装含设备与预约的 Room 快照
// ==========================================

use crate::domain::{Equipment, EquipmentSet, Reservation, Room};
use crate::engine::ports::RoomLookup;
use crate::repository::equipment_repo::ensure_equipment_id;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::meeting_repo::parse_db_date;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// RoomRepository - 会议室仓储
// ==========================================
pub struct RoomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RoomRepository {
    /// 创建新的 RoomRepository 实例
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

    /// 创建会议室
    ///
    /// # 参数
    /// - name: 会议室名称（唯一）
    /// - capacity: 额定容量（> 0）
    /// - equipments: 设备集合（设备字典中不存在的自动创建）
    ///
    /// # 返回
    /// - Ok(i64): 新会议室ID
    /// - Err(UniqueConstraintViolation): 名称重复
    pub fn create(
        &self,
        name: &str,
        capacity: u32,
        equipments: &EquipmentSet,
    ) -> RepositoryResult<i64> {
        if capacity == 0 {
            return Err(RepositoryError::FieldValueError {
                field: "capacity".to_string(),
                message: format!("会议室{}容量必须大于0", name),
            });
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO room (name, capacity) VALUES (?1, ?2)",
            params![name.trim(), capacity],
        )?;
        let room_id = tx.last_insert_rowid();

        for equipment in equipments {
            let equipment_id = ensure_equipment_id(&tx, equipment.name())?;
            tx.execute(
                "INSERT OR IGNORE INTO room_equipment (room_id, equipment_id) VALUES (?1, ?2)",
                params![room_id, equipment_id],
            )?;
        }

        tx.commit()?;
        Ok(room_id)
    }

    /// 查询全部会议室（按 room_id 升序，含设备与预约）
    pub fn find_all(&self) -> RepositoryResult<Vec<Room>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT room_id, name, capacity FROM room ORDER BY room_id ASC")?;
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
            .map(|(room_id, name, capacity)| assemble_room(&conn, room_id, name, capacity))
            .collect()
    }

    /// 按名称查询会议室
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Room>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT room_id, name, capacity FROM room WHERE name = ?1",
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
            Some((room_id, name, capacity)) => {
                Ok(Some(assemble_room(&conn, room_id, name, capacity)?))
            }
            None => Ok(None),
        }
    }

    /// 会议室数量
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM room", [], |row| row.get(0))?)
    }
}

impl RoomLookup for RoomRepository {
    fn find_all(&self) -> RepositoryResult<Vec<Room>> {
        RoomRepository::find_all(self)
    }
}

/// 组装会议室：读取设备与已有预约
fn assemble_room(
    conn: &Connection,
    room_id: i64,
    name: String,
    capacity: u32,
) -> RepositoryResult<Room> {
    let mut equipment_stmt = conn.prepare_cached(
        r#"
        SELECT e.name
        FROM room_equipment re
        JOIN equipment e ON e.equipment_id = re.equipment_id
        WHERE re.room_id = ?1
        "#,
    )?;
    let equipments = equipment_stmt
        .query_map(params![room_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?
        .into_iter()
        .map(Equipment::new)
        .collect::<Result<EquipmentSet, _>>()?;

    let mut reservation_stmt = conn.prepare_cached(
        r#"
        SELECT meeting_id, meeting_date, meeting_hour
        FROM meeting
        WHERE room_id = ?1
        ORDER BY meeting_date ASC, meeting_hour ASC
        "#,
    )?;
    let raw_reservations = reservation_stmt
        .query_map(params![room_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i32>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let reservations = raw_reservations
        .into_iter()
        .map(|(meeting_id, date, hour)| {
            Ok(Reservation {
                meeting_id: Some(meeting_id),
                date: parse_db_date(&date)?,
                hour,
            })
        })
        .collect::<RepositoryResult<Vec<_>>>()?;

    Ok(Room::new(room_id, name, capacity, equipments, reservations)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use crate::domain::equipment_set;

    fn setup_repo() -> RoomRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        RoomRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_create_and_find_all() {
        let repo = setup_repo();
        repo.create("E1001", 23, &EquipmentSet::new()).unwrap();
        repo.create("E1002", 10, &equipment_set(["Ecran"]).unwrap()).unwrap();

        let rooms = repo.find_all().unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name(), "E1001");
        assert!(rooms[0].equipments().is_empty());
        assert_eq!(rooms[1].capacity(), 10);
        assert_eq!(rooms[1].equipment_names(), vec!["Ecran"]);
        assert!(rooms[1].reservations().is_empty());
    }

    #[test]
    fn test_create_名称重复() {
        let repo = setup_repo();
        repo.create("E1001", 23, &EquipmentSet::new()).unwrap();
        let err = repo.create("E1001", 5, &EquipmentSet::new()).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_create_容量为0() {
        let repo = setup_repo();
        let err = repo.create("E1001", 0, &EquipmentSet::new()).unwrap_err();
        assert!(matches!(err, RepositoryError::FieldValueError { .. }));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_name() {
        let repo = setup_repo();
        repo.create("E3001", 13, &equipment_set(["Ecran", "Webcam", "Pieuvre"]).unwrap())
            .unwrap();

        let room = repo.find_by_name("E3001").unwrap().unwrap();
        assert_eq!(room.equipments().len(), 3);
        assert!(repo.find_by_name("NOPE").unwrap().is_none());
    }
}
