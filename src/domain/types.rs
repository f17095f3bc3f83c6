// ==========================================
// 会议室分配系统 - 领域类型定义
// ==========================================
// 职责: 营业时段常量、容量比例常量、时段标签
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 营业时段
// ==========================================
// 可预约开始时间为 [8, 20) 的整点，20 点不作为开始时间对外提供

/// 营业日最早开始时间（含）
pub const BUSINESS_DAY_START_HOUR: i32 = 8;

/// 营业日结束时间（预约请求允许的最大整点，含）
pub const BUSINESS_DAY_END_HOUR: i32 = 20;

// ==========================================
// 容量比例 (70%)
// ==========================================
// 固定策略常量，不支持运行时配置
// 以整数缩放形式比较: capacity * 7 >= required * 10

/// 可用容量比例分子
pub const USABLE_CAPACITY_NUMERATOR: u64 = 7;

/// 可用容量比例分母
pub const USABLE_CAPACITY_DENOMINATOR: u64 = 10;

/// 判断整点是否处于可预约范围 [8, 20]
pub fn is_bookable_hour(hour: i32) -> bool {
    (BUSINESS_DAY_START_HOUR..=BUSINESS_DAY_END_HOUR).contains(&hour)
}

// ==========================================
// HourSlot - 一小时时段
// ==========================================
// 展示格式: "{h}h00-{h+1}h00"，例如 8 -> "8h00-9h00"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HourSlot(pub i32);

impl HourSlot {
    /// 时段开始整点
    pub fn start_hour(&self) -> i32 {
        self.0
    }

    /// 时段结束整点（不含）
    pub fn end_hour(&self) -> i32 {
        self.0 + 1
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h00-{}h00", self.start_hour(), self.end_hour())
    }
}
