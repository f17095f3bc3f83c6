// ==========================================
// 会议室分配系统 - 会议室排序
// ==========================================
// 规则: score = capacity + 3 * 设备数量，分数越低越优
// "最优" = 满足条件的最小会议室（最少过度配置）
// 并列时保持输入顺序，取第一个
// ==========================================

use crate::domain::Room;

/// 每件设备折算的分数
pub const EQUIPMENT_SCORE_WEIGHT: u64 = 3;

/// 会议室排序规则
pub struct RoomRanking;

impl RoomRanking {
    /// 计算会议室分数
    pub fn score(room: &Room) -> u64 {
        u64::from(room.capacity()) + EQUIPMENT_SCORE_WEIGHT * room.equipments().len() as u64
    }

    /// 选出最优会议室
    ///
    /// 分数最低者胜出；`min_by_key` 在分数并列时返回输入顺序中的第一个
    pub fn select_best<'a, I>(candidates: I) -> Option<&'a Room>
    where
        I: IntoIterator<Item = &'a Room>,
    {
        candidates.into_iter().min_by_key(|room| Self::score(room))
    }
}
