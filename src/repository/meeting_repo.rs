// ==========================================
// 会议室分配系统 - 会议数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 并发: 保存时在 IMMEDIATE 事务内复核 ±1 小时缓冲，
//       并由 UNIQUE(room_id, meeting_date, meeting_hour) 兜底
// ==========================================

use crate::domain::{Meeting, RoomRef};
use crate::engine::ports::MeetingPersistence;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::sync::{Arc, Mutex};

/// 数据库日期格式
pub const DB_DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析数据库中的日期字段
pub(crate) fn parse_db_date(value: &str) -> RepositoryResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DB_DATE_FORMAT).map_err(|e| RepositoryError::FieldValueError {
        field: "meeting_date".to_string(),
        message: format!("{}: {}", value, e),
    })
}

/// 会议记录（持久化视图）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRecord {
    pub meeting_id: i64,
    pub meeting_date: NaiveDate,
    pub meeting_hour: i32,
    pub participant_count: u32,
    pub meeting_type_name: String,
    pub room: RoomRef,
}

// ==========================================
// MeetingRepository - 会议仓储
// ==========================================
pub struct MeetingRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MeetingRepository {
    /// 创建新的 MeetingRepository 实例
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

    /// 保存会议
    ///
    /// # 返回
    /// - Ok(Meeting): 回填 id 后的会议
    /// - Err(SlotConflict): 目标会议室在同日 ±1 小时内已有预约（并发写入被拦截）
    /// - Err(NotFound): 会议类型或会议室不存在
    pub fn save(&self, meeting: &Meeting) -> RepositoryResult<Meeting> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let meeting_type_id: i64 = tx
            .query_row(
                "SELECT meeting_type_id FROM meeting_type WHERE name = ?1",
                params![meeting.meeting_type.name()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "MeetingType".to_string(),
                id: meeting.meeting_type.name().to_string(),
            })?;

        let room_exists: bool = tx
            .query_row(
                "SELECT 1 FROM room WHERE room_id = ?1",
                params![meeting.room.id],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !room_exists {
            return Err(RepositoryError::NotFound {
                entity: "Room".to_string(),
                id: meeting.room.id.to_string(),
            });
        }

        let date = meeting.date.format(DB_DATE_FORMAT).to_string();
        let slot_conflict = || RepositoryError::SlotConflict {
            room_id: meeting.room.id,
            date: date.clone(),
            hour: meeting.hour,
        };

        let conflicts: i64 = tx.query_row(
            r#"
            SELECT COUNT(*) FROM meeting
            WHERE room_id = ?1 AND meeting_date = ?2
              AND meeting_hour BETWEEN ?3 - 1 AND ?3 + 1
            "#,
            params![meeting.room.id, date, meeting.hour],
            |row| row.get(0),
        )?;
        if conflicts > 0 {
            return Err(slot_conflict());
        }

        let inserted = tx.execute(
            r#"
            INSERT INTO meeting (meeting_date, meeting_hour, participant_count, meeting_type_id, room_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                date,
                meeting.hour,
                meeting.participant_count,
                meeting_type_id,
                meeting.room.id
            ],
        );
        match inserted.map_err(RepositoryError::from) {
            Ok(_) => {}
            Err(RepositoryError::UniqueConstraintViolation(_)) => return Err(slot_conflict()),
            Err(e) => return Err(e),
        }
        let meeting_id = tx.last_insert_rowid();

        tx.commit()?;

        let mut saved = meeting.clone();
        saved.id = Some(meeting_id);
        Ok(saved)
    }

    /// 查询会议室指定日期的会议（按整点升序）
    pub fn find_by_room_and_date(
        &self,
        room_id: i64,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<MeetingRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT m.meeting_id, m.meeting_date, m.meeting_hour, m.participant_count,
                   t.name, r.room_id, r.name
            FROM meeting m
            JOIN meeting_type t ON t.meeting_type_id = m.meeting_type_id
            JOIN room r ON r.room_id = m.room_id
            WHERE m.room_id = ?1 AND m.meeting_date = ?2
            ORDER BY m.meeting_hour ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![room_id, date.format(DB_DATE_FORMAT).to_string()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i64>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(
                |(meeting_id, meeting_date, meeting_hour, participant_count, type_name, room_id, room_name)| {
                    Ok(MeetingRecord {
                        meeting_id,
                        meeting_date: parse_db_date(&meeting_date)?,
                        meeting_hour,
                        participant_count,
                        meeting_type_name: type_name,
                        room: RoomRef {
                            id: room_id,
                            name: room_name,
                        },
                    })
                },
            )
            .collect()
    }

    /// 会议总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM meeting", [], |row| row.get(0))?)
    }
}

impl MeetingPersistence for MeetingRepository {
    fn save(&self, meeting: &Meeting) -> RepositoryResult<Meeting> {
        MeetingRepository::save(self, meeting)
    }
}
