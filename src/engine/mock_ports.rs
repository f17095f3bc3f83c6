// ==========================================
// 引擎测试用内存 Mock
// ==========================================

use crate::domain::{Meeting, MeetingType, Reservation, Room};
use crate::engine::ports::{MeetingPersistence, MeetingTypeLookup, RoomLookup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 内存仓储：同时实现三个端口
#[derive(Default)]
pub struct InMemoryStore {
    pub meeting_types: Vec<MeetingType>,
    pub rooms: Mutex<Vec<Room>>,
    pub saved: Mutex<Vec<Meeting>>,
    pub fail_save: bool,
    pub fail_rooms: bool,
    /// 剩余的时段冲突次数（模拟并发写入抢占）
    pub pending_conflicts: AtomicUsize,
    pub room_fetches: AtomicUsize,
    pub type_fetches: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(meeting_types: Vec<MeetingType>, rooms: Vec<Room>) -> Self {
        Self {
            meeting_types,
            rooms: Mutex::new(rooms),
            ..Default::default()
        }
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

impl MeetingTypeLookup for InMemoryStore {
    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<MeetingType>> {
        self.type_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.meeting_types.iter().find(|t| t.name() == name).cloned())
    }
}

impl RoomLookup for InMemoryStore {
    fn find_all(&self) -> RepositoryResult<Vec<Room>> {
        self.room_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_rooms {
            return Err(RepositoryError::DatabaseConnectionError("mock".to_string()));
        }
        Ok(self.rooms.lock().unwrap().clone())
    }
}

impl MeetingPersistence for InMemoryStore {
    fn save(&self, meeting: &Meeting) -> RepositoryResult<Meeting> {
        if self.fail_save {
            return Err(RepositoryError::DatabaseQueryError("disk full".to_string()));
        }
        let consumed = self
            .pending_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if consumed.is_ok() {
            return Err(RepositoryError::SlotConflict {
                room_id: meeting.room.id,
                date: meeting.date.to_string(),
                hour: meeting.hour,
            });
        }
        let mut saved = self.saved.lock().unwrap();
        let mut stored = meeting.clone();
        stored.id = Some(saved.len() as i64 + 1);
        saved.push(stored.clone());

        // 同步写入会议室预约，模拟持久化后的快照
        let mut rooms = self.rooms.lock().unwrap();
        if let Some(pos) = rooms.iter().position(|r| r.id() == meeting.room.id) {
            let room = rooms[pos].clone();
            let mut reservations = room.reservations().to_vec();
            reservations.push(Reservation::from(&stored));
            rooms[pos] = Room::new(
                room.id(),
                room.name(),
                room.capacity(),
                room.equipments().clone(),
                reservations,
            )
            .unwrap();
        }
        Ok(stored)
    }
}
