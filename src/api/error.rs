// ==========================================
// 会议室分配系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将引擎/仓储错误转换为对外错误
// 对外: code() 稳定错误码 + ErrorStatus 分类 + http_status()
// ==========================================

use crate::engine::error::PlannerError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("会议开始时间必须在8点到20点之间: hour={hour}")]
    InvalidMeetingHour { hour: i32 },

    #[error("无效输入: {0}")]
    MalformedInput(String),

    // ==========================================
    // 资源不存在
    // ==========================================
    #[error("会议类型 '{0}' 不存在")]
    MeetingTypeNotFound(String),

    #[error("无合适会议室: {0}")]
    NoSuitableRoom(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 并发控制错误
    // ==========================================
    /// 冲突重试次数用尽
    #[error("会议室时段冲突: {0}")]
    SlotConflict(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 错误分类（对应 HTTP 语义）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorStatus {
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorStatus {
    pub fn http_status(self) -> u16 {
        match self {
            ErrorStatus::BadRequest => 400,
            ErrorStatus::NotFound => 404,
            ErrorStatus::Conflict => 409,
            ErrorStatus::Internal => 500,
        }
    }
}

impl ApiError {
    /// 稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidMeetingHour { .. } => "INVALID_MEETING_HOUR",
            ApiError::MalformedInput(_) => "MALFORMED_INPUT",
            ApiError::MeetingTypeNotFound(_) => "MEETING_TYPE_NOT_FOUND",
            ApiError::NoSuitableRoom(_) => "NO_SUITABLE_ROOM",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::SlotConflict(_) => "SLOT_CONFLICT",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 错误分类
    pub fn status(&self) -> ErrorStatus {
        match self {
            ApiError::InvalidMeetingHour { .. } | ApiError::MalformedInput(_) => {
                ErrorStatus::BadRequest
            }
            ApiError::MeetingTypeNotFound(_)
            | ApiError::NoSuitableRoom(_)
            | ApiError::NotFound(_) => ErrorStatus::NotFound,
            ApiError::SlotConflict(_) => ErrorStatus::Conflict,
            ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => ErrorStatus::Internal,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.status().http_status()
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::SlotConflict { room_id, date, hour } => ApiError::SlotConflict(
                format!("room_id={} 在 {} {}点 附近已有预约", room_id, date, hour),
            ),
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::DatabaseError(format!("外键约束违反: {}", msg))
            }
            RepositoryError::ValidationError(msg) => {
                ApiError::DatabaseError(format!("数据验证失败: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 PlannerError 转换
// ==========================================
impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::InvalidMeetingHour { hour } => ApiError::InvalidMeetingHour { hour },
            PlannerError::MeetingTypeNotFound(name) => ApiError::MeetingTypeNotFound(name),
            PlannerError::NoSuitableRoom(context) => ApiError::NoSuitableRoom(context.to_string()),
            PlannerError::Repository(err) => ApiError::from(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 错误响应
// ==========================================

/// 错误响应（CLI 输出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}
