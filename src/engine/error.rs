// ==========================================
// 会议室分配系统 - 引擎层错误类型
// ==========================================
// 所有错误在引擎内同步检测并立即返回，不提交任何部分状态
// ==========================================

use crate::repository::error::RepositoryError;
use std::fmt;
use thiserror::Error;

/// 无可用会议室的上下文（分配 / 空闲查询的提示语不同）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionContext {
    /// 按类型、人数、时段分配
    Assignment,
    /// 按类型、容量查询空闲时段
    Availability,
}

impl fmt::Display for SelectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionContext::Assignment => {
                write!(f, "没有满足会议类型、人数和时段要求的会议室")
            }
            SelectionContext::Availability => {
                write!(f, "没有满足会议类型和容量要求且当日有空闲时段的会议室")
            }
        }
    }
}

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("会议开始时间必须在8点到20点之间: hour={hour}")]
    InvalidMeetingHour { hour: i32 },

    #[error("会议类型 '{0}' 不存在")]
    MeetingTypeNotFound(String),

    #[error("无合适会议室: {0}")]
    NoSuitableRoom(SelectionContext),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type PlannerResult<T> = Result<T, PlannerError>;
