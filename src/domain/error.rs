// ==========================================
// 会议室分配系统 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 领域对象构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("会议室容量必须大于0: room={room}")]
    NonPositiveCapacity { room: String },

    #[error("名称不能为空: {entity}")]
    EmptyName { entity: &'static str },

    #[error("设备名称不能为空")]
    EmptyEquipmentName,
}

/// Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
