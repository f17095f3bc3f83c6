// ==========================================
// 会议室分配系统 - 请求参数校验
// ==========================================
// 职责: 解析传输层的原始字段（日期字符串）
// 会议类型名称原样交给引擎，由引擎先校验整点再查找类型
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use chrono::NaiveDate;

/// 请求日期格式
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析请求日期（YYYY-MM-DD）
///
/// # 返回
/// - Err(MalformedInput): 消息中包含原始值
pub fn parse_request_date(value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), REQUEST_DATE_FORMAT)
        .map_err(|_| ApiError::MalformedInput(format!("无效日期格式: {}", value)))
}
