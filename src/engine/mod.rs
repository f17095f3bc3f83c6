// ==========================================
// 会议室分配系统 - 引擎层
// ==========================================
// 职责: 会议室选择规则（过滤 + 排序 + 空闲时段）
// 红线: Engine 不拼 SQL, 只通过 ports 访问数据
// ==========================================

pub mod assignment;
pub mod availability;
pub mod error;
pub mod ports;
pub mod ranking;

#[cfg(test)]
pub(crate) mod mock_ports;

// 重导出核心引擎
pub use assignment::AssignmentEngine;
pub use availability::{AvailabilityEngine, RoomAvailability};
pub use error::{PlannerError, PlannerResult, SelectionContext};
pub use ports::{MeetingPersistence, MeetingTypeLookup, RoomLookup};
pub use ranking::RoomRanking;
