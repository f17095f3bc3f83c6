// ==========================================
// 会议室分配系统 - 会议领域模型
// ==========================================
// Meeting 是分配引擎的最终产物，创建后在核心内不可变
// 持久化由外部仓储完成（id 由仓储回填）
// ==========================================

use crate::domain::meeting_type::MeetingType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 会议室引用（会议 -> 会议室）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    pub id: i64,
    pub name: String,
}

// ==========================================
// Meeting - 已分配会议
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Option<i64>,           // 持久化后回填
    pub date: NaiveDate,           // 会议日期
    pub hour: i32,                 // 开始整点 (8..=20)
    pub meeting_type: MeetingType, // 会议类型
    pub participant_count: u32,    // 参会人数
    pub room: RoomRef,             // 分配的会议室
}

impl Meeting {
    /// 创建尚未持久化的会议
    pub fn new(
        date: NaiveDate,
        hour: i32,
        meeting_type: MeetingType,
        participant_count: u32,
        room: RoomRef,
    ) -> Self {
        Self {
            id: None,
            date,
            hour,
            meeting_type,
            participant_count,
            room,
        }
    }
}

// ==========================================
// Reservation - 会议室已有预约
// ==========================================
// 会议室视角下的预约记录，仅用于冲突判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub meeting_id: Option<i64>,
    pub date: NaiveDate,
    pub hour: i32,
}

impl Reservation {
    pub fn new(date: NaiveDate, hour: i32) -> Self {
        Self {
            meeting_id: None,
            date,
            hour,
        }
    }

    /// 是否与给定日期/整点冲突（同日且相差不超过 1 小时）
    pub fn conflicts_with(&self, date: NaiveDate, hour: i32) -> bool {
        self.date == date && self.hour.abs_diff(hour) <= 1
    }
}

impl From<&Meeting> for Reservation {
    fn from(meeting: &Meeting) -> Self {
        Self {
            meeting_id: meeting.id,
            date: meeting.date,
            hour: meeting.hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_conflicts_with_缓冲范围() {
        let d = date("2024-12-01");
        let r = Reservation::new(d, 10);
        assert!(r.conflicts_with(d, 9));
        assert!(r.conflicts_with(d, 10));
        assert!(r.conflicts_with(d, 11));
        assert!(!r.conflicts_with(d, 8));
        assert!(!r.conflicts_with(d, 12));
        assert!(!r.conflicts_with(date("2024-12-02"), 10));
    }

    #[test]
    fn test_conflicts_with_极端整点不溢出() {
        let d = date("2024-12-01");
        assert!(!Reservation::new(d, i32::MAX).conflicts_with(d, i32::MIN));
        assert!(!Reservation::new(d, i32::MIN).conflicts_with(d, i32::MAX));
        assert!(!Reservation::new(d, 10).conflicts_with(d, i32::MIN));
        assert!(Reservation::new(d, i32::MAX).conflicts_with(d, i32::MAX - 1));
    }
}
