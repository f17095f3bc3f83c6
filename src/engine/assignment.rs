// ==========================================
// 会议室分配系统 - 会议分配引擎
// ==========================================
// 职责: 校验整点 -> 解析会议类型 -> 过滤候选会议室 -> 排序取最优 -> 保存会议
// 红线: 引擎不重试；协作方错误原样向上传递
// 输入: 会议类型名称、参会人数、日期、整点
// 输出: 持久化后的 Meeting
// ==========================================

use crate::domain::{is_bookable_hour, Meeting, Room};
use crate::engine::error::{PlannerError, PlannerResult, SelectionContext};
use crate::engine::ports::{MeetingPersistence, MeetingTypeLookup, RoomLookup};
use crate::engine::ranking::RoomRanking;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// AssignmentEngine - 会议分配引擎
// ==========================================
// 无状态单次流水线：每次调用独立读取会议室快照
pub struct AssignmentEngine {
    meeting_types: Arc<dyn MeetingTypeLookup>,
    rooms: Arc<dyn RoomLookup>,
    meetings: Arc<dyn MeetingPersistence>,
}

impl AssignmentEngine {
    /// 创建新的 AssignmentEngine 实例
    ///
    /// # 参数
    /// - meeting_types: 会议类型查询
    /// - rooms: 会议室查询
    /// - meetings: 会议持久化
    pub fn new(
        meeting_types: Arc<dyn MeetingTypeLookup>,
        rooms: Arc<dyn RoomLookup>,
        meetings: Arc<dyn MeetingPersistence>,
    ) -> Self {
        Self {
            meeting_types,
            rooms,
            meetings,
        }
    }

    /// 将会议分配到最优会议室并保存
    ///
    /// # 返回
    /// - Ok(Meeting): 持久化后的会议
    /// - Err(InvalidMeetingHour): 整点不在 [8, 20]（先于任何仓储访问）
    /// - Err(MeetingTypeNotFound): 会议类型不存在
    /// - Err(NoSuitableRoom): 无满足条件的会议室
    /// - Err(Repository): 仓储读写失败
    #[instrument(skip(self))]
    pub fn assign_best_room(
        &self,
        meeting_type_name: &str,
        participant_count: u32,
        date: NaiveDate,
        hour: i32,
    ) -> PlannerResult<Meeting> {
        // === 步骤 1: 校验整点 ===
        if !is_bookable_hour(hour) {
            return Err(PlannerError::InvalidMeetingHour { hour });
        }

        // === 步骤 2: 解析会议类型 ===
        let meeting_type = self
            .meeting_types
            .find_by_name(meeting_type_name)?
            .ok_or_else(|| PlannerError::MeetingTypeNotFound(meeting_type_name.to_string()))?;

        // === 步骤 3: 读取会议室快照 ===
        let rooms = self.rooms.find_all()?;

        // === 步骤 4: 过滤候选 ===
        let candidates: Vec<&Room> = rooms
            .iter()
            .filter(|room| {
                room.is_suitable_for_meeting_type(&meeting_type)
                    && room.has_capacity(participant_count)
                    && room.is_available_at(date, hour)
            })
            .collect();
        debug!(
            total_rooms = rooms.len(),
            candidates = candidates.len(),
            "候选会议室过滤完成"
        );

        // === 步骤 5/6: 排序取最优 ===
        let best = RoomRanking::select_best(candidates)
            .ok_or(PlannerError::NoSuitableRoom(SelectionContext::Assignment))?;
        debug!(room = best.name(), score = RoomRanking::score(best), "选中最优会议室");

        // === 步骤 7: 构造并保存会议 ===
        let meeting = Meeting::new(date, hour, meeting_type, participant_count, best.to_ref());
        let saved = self.meetings.save(&meeting)?;

        info!(
            meeting_id = ?saved.id,
            room = %saved.room.name,
            "会议分配成功"
        );
        Ok(saved)
    }
}
