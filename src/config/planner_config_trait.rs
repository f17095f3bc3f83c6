// ==========================================
// 会议室分配系统 - 配置读取 Trait
// ==========================================
// 职责: 定义 API 层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// 注意: 70% 容量比例为固定策略，不在此处提供
// ==========================================

use std::error::Error;

// ==========================================
// PlannerConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait PlannerConfigReader: Send + Sync {
    /// 获取会议分配遇到时段冲突时的重试次数
    ///
    /// # 说明
    /// 并发请求抢占同一会议室时，存储层返回 SlotConflict，
    /// API 层基于新的会议室快照重新执行分配
    ///
    /// # 默认值
    /// - 2
    fn get_assign_conflict_retries(&self) -> Result<u32, Box<dyn Error>>;
}
