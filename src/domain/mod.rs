// ==========================================
// 会议室分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象、适用性/可用性判定
// 红线: 不含数据访问逻辑,不含引擎编排逻辑
// ==========================================

pub mod equipment;
pub mod error;
pub mod meeting;
pub mod meeting_type;
pub mod room;
pub mod types;

// 重导出核心类型
pub use equipment::{equipment_set, Equipment, EquipmentSet};
pub use error::{DomainError, DomainResult};
pub use meeting::{Meeting, Reservation, RoomRef};
pub use meeting_type::MeetingType;
pub use room::Room;
pub use types::{is_bookable_hour, HourSlot, BUSINESS_DAY_END_HOUR, BUSINESS_DAY_START_HOUR};
