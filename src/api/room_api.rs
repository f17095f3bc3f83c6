// ==========================================
// 会议室分配系统 - 会议室查询 API
// ==========================================
// 职责: 查询满足会议类型与容量的最优会议室及其当日空闲时段
// ==========================================

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::api::dto::RoomWithAvailableHours;
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::parse_request_date;
use crate::engine::AvailabilityEngine;

// ==========================================
// RoomApi - 会议室查询 API
// ==========================================
pub struct RoomApi {
    engine: Arc<AvailabilityEngine>,
}

impl RoomApi {
    /// 创建新的RoomApi实例
    pub fn new(engine: Arc<AvailabilityEngine>) -> Self {
        Self { engine }
    }

    /// 查询最优会议室及其空闲时段
    ///
    /// # 参数
    /// - meeting_type: 会议类型名称
    /// - required_capacity: 所需容量
    /// - meeting_date: 日期（YYYY-MM-DD）
    ///
    /// # 返回
    /// - Ok(RoomWithAvailableHours): 会议室名称、容量、设备、空闲时段
    /// - Err(ApiError): 日期格式、类型不存在、无合适会议室等
    pub fn get_best_room_with_available_hours(
        &self,
        meeting_type: &str,
        required_capacity: u32,
        meeting_date: &str,
    ) -> ApiResult<RoomWithAvailableHours> {
        let started = Instant::now();
        info!(meeting_type, required_capacity, meeting_date, "空闲时段查询请求");

        let result = self.query(meeting_type, required_capacity, meeting_date);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(dto) => info!(
                elapsed_ms,
                room = %dto.name,
                slots = dto.available_hours.len(),
                "空闲时段查询完成"
            ),
            Err(e) if e.http_status() >= 500 => error!(elapsed_ms, error = %e, "空闲时段查询失败"),
            Err(e) => warn!(elapsed_ms, code = e.code(), error = %e, "空闲时段查询无结果"),
        }
        result
    }

    fn query(
        &self,
        meeting_type: &str,
        required_capacity: u32,
        meeting_date: &str,
    ) -> ApiResult<RoomWithAvailableHours> {
        let date = parse_request_date(meeting_date)?;

        let availability = self
            .engine
            .best_room_availability(meeting_type, required_capacity, date)
            .map_err(ApiError::from)?;
        Ok(RoomWithAvailableHours::from(availability))
    }
}
