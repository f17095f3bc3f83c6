// ==========================================
// 会议室分配系统 - 空闲时段查询引擎
// ==========================================
// 职责: 解析会议类型 -> 过滤(适用/容量/当日有空闲) -> 排序取最优 -> 列出空闲时段
// 输入: 会议类型名称、所需容量、日期
// 输出: 最优会议室信息 + 升序的空闲时段
// ==========================================

use crate::domain::{HourSlot, Room};
use crate::engine::error::{PlannerError, PlannerResult, SelectionContext};
use crate::engine::ports::{MeetingTypeLookup, RoomLookup};
use crate::engine::ranking::RoomRanking;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// 最优会议室及其空闲时段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub room_id: i64,
    pub room_name: String,
    pub capacity: u32,
    pub equipment_names: Vec<String>,
    pub available_slots: Vec<HourSlot>,
}

impl RoomAvailability {
    /// 时段标签，如 "8h00-9h00"
    pub fn slot_labels(&self) -> Vec<String> {
        self.available_slots.iter().map(HourSlot::to_string).collect()
    }
}

// ==========================================
// AvailabilityEngine - 空闲时段查询引擎
// ==========================================
pub struct AvailabilityEngine {
    meeting_types: Arc<dyn MeetingTypeLookup>,
    rooms: Arc<dyn RoomLookup>,
}

impl AvailabilityEngine {
    /// 创建新的 AvailabilityEngine 实例
    pub fn new(meeting_types: Arc<dyn MeetingTypeLookup>, rooms: Arc<dyn RoomLookup>) -> Self {
        Self {
            meeting_types,
            rooms,
        }
    }

    /// 查询最优会议室及其当日空闲时段
    ///
    /// # 返回
    /// - Ok(RoomAvailability): 最优会议室与升序空闲时段（至少一个）
    /// - Err(MeetingTypeNotFound): 会议类型不存在
    /// - Err(NoSuitableRoom): 无满足条件且当日有空闲的会议室
    /// - Err(Repository): 仓储读取失败
    #[instrument(skip(self))]
    pub fn best_room_availability(
        &self,
        meeting_type_name: &str,
        required_capacity: u32,
        date: NaiveDate,
    ) -> PlannerResult<RoomAvailability> {
        let meeting_type = self
            .meeting_types
            .find_by_name(meeting_type_name)?
            .ok_or_else(|| PlannerError::MeetingTypeNotFound(meeting_type_name.to_string()))?;

        let rooms = self.rooms.find_all()?;

        let candidates: Vec<&Room> = rooms
            .iter()
            .filter(|room| {
                room.is_suitable_for_meeting_type(&meeting_type)
                    && room.has_capacity(required_capacity)
                    && room.has_any_available_hour_on_date(date)
            })
            .collect();
        debug!(
            total_rooms = rooms.len(),
            candidates = candidates.len(),
            "候选会议室过滤完成"
        );

        let best = RoomRanking::select_best(candidates)
            .ok_or(PlannerError::NoSuitableRoom(SelectionContext::Availability))?;

        let available_slots: Vec<HourSlot> = best
            .find_available_hours_on_date(date)
            .into_iter()
            .map(HourSlot)
            .collect();
        debug!(room = best.name(), slots = available_slots.len(), "选中最优会议室");

        Ok(RoomAvailability {
            room_id: best.id(),
            room_name: best.name().to_string(),
            capacity: best.capacity(),
            equipment_names: best.equipment_names(),
            available_slots,
        })
    }
}
