// ==========================================
// 会议室分配系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod equipment_repo;
pub mod error;
pub mod meeting_repo;
pub mod meeting_type_repo;
pub mod room_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use meeting_repo::{MeetingRecord, MeetingRepository, DB_DATE_FORMAT};
pub use meeting_type_repo::MeetingTypeRepository;
pub use room_repo::RoomRepository;
