// ==========================================
// 会议室分配系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 CLI 调用
// ==========================================

pub mod dto;
pub mod error;
pub mod meeting_api;
pub mod room_api;
pub mod validator;

// 重导出核心类型
pub use dto::{MeetingRequest, MeetingResponse, RoomWithAvailableHours};
pub use error::{ApiError, ApiResult, ErrorResponse, ErrorStatus};
pub use meeting_api::MeetingApi;
pub use room_api::RoomApi;
