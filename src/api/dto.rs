// ==========================================
// 会议室分配系统 - API 数据传输对象
// ==========================================
// 字段命名: camelCase（与外部 JSON 约定一致）
// ==========================================

use crate::domain::Meeting;
use crate::engine::availability::RoomAvailability;
use crate::repository::DB_DATE_FORMAT;
use serde::{Deserialize, Serialize};

/// 会议分配请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    pub meeting_type: String,
    pub participant_count: u32,
    /// YYYY-MM-DD
    pub meeting_date: String,
    pub meeting_hour: i32,
}

/// 会议分配结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResponse {
    pub meeting_id: Option<i64>,
    pub meeting_type: String,
    pub participant_count: u32,
    pub meeting_date: String,
    pub meeting_hour: i32,
    pub assigned_room_name: String,
}

impl From<&Meeting> for MeetingResponse {
    fn from(meeting: &Meeting) -> Self {
        Self {
            meeting_id: meeting.id,
            meeting_type: meeting.meeting_type.name().to_string(),
            participant_count: meeting.participant_count,
            meeting_date: meeting.date.format(DB_DATE_FORMAT).to_string(),
            meeting_hour: meeting.hour,
            assigned_room_name: meeting.room.name.clone(),
        }
    }
}

/// 最优会议室及其空闲时段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomWithAvailableHours {
    pub name: String,
    pub capacity: u32,
    pub room_equipments: Vec<String>,
    /// 如 "8h00-9h00"
    pub available_hours: Vec<String>,
}

impl From<RoomAvailability> for RoomWithAvailableHours {
    fn from(availability: RoomAvailability) -> Self {
        let available_hours = availability.slot_labels();
        Self {
            name: availability.room_name,
            capacity: availability.capacity,
            room_equipments: availability.equipment_names,
            available_hours,
        }
    }
}
