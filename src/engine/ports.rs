// ==========================================
// 会议室分配系统 - 引擎层外部协作接口
// ==========================================
// 职责: 定义引擎读取会议类型/会议室、保存会议所需的接口
// 实现者: repository 层 SQLite 仓储；测试中为内存 Mock
// 红线: 引擎只通过这些接口访问数据，不拼 SQL
// ==========================================

use crate::domain::{Meeting, MeetingType, Room};
use crate::repository::error::RepositoryResult;

/// 会议类型查询
pub trait MeetingTypeLookup: Send + Sync {
    /// 按名称查询会议类型，不存在返回 Ok(None)
    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<MeetingType>>;
}

/// 会议室查询
pub trait RoomLookup: Send + Sync {
    /// 获取全部会议室（含设备与已有预约）的快照
    ///
    /// 返回顺序必须稳定，排序并列时按此顺序取第一个
    fn find_all(&self) -> RepositoryResult<Vec<Room>>;
}

/// 会议持久化
pub trait MeetingPersistence: Send + Sync {
    /// 保存会议并返回持久化后的会议（id 已回填）
    fn save(&self, meeting: &Meeting) -> RepositoryResult<Meeting>;
}
