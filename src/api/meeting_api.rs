// ==========================================
// 会议室分配系统 - 会议分配 API
// ==========================================
// 职责: 解析请求 -> 调用分配引擎 -> 时段冲突时重试 -> 转换响应
// 并发: 存储层返回 SlotConflict 时基于新快照重新分配，
//       次数由 assign_conflict_retries 配置
// ==========================================

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::api::dto::{MeetingRequest, MeetingResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::parse_request_date;
use crate::config::{PlannerConfigReader, DEFAULT_ASSIGN_CONFLICT_RETRIES};
use crate::engine::{AssignmentEngine, PlannerError};
use crate::repository::RepositoryError;

// ==========================================
// MeetingApi - 会议分配 API
// ==========================================
pub struct MeetingApi {
    engine: Arc<AssignmentEngine>,
    config: Arc<dyn PlannerConfigReader>,
}

impl MeetingApi {
    /// 创建新的MeetingApi实例
    pub fn new(engine: Arc<AssignmentEngine>, config: Arc<dyn PlannerConfigReader>) -> Self {
        Self { engine, config }
    }

    /// 将会议分配到最优会议室
    ///
    /// # 参数
    /// - request: 会议类型、人数、日期(YYYY-MM-DD)、整点
    ///
    /// # 返回
    /// - Ok(MeetingResponse): 分配结果（含会议室名称）
    /// - Err(MalformedInput): 日期无法解析
    /// - Err(InvalidMeetingHour / MeetingTypeNotFound / NoSuitableRoom)
    /// - Err(SlotConflict): 冲突重试次数用尽
    pub fn assign_meeting_to_best_room(&self, request: MeetingRequest) -> ApiResult<MeetingResponse> {
        let started = Instant::now();
        info!(
            meeting_type = %request.meeting_type,
            participant_count = request.participant_count,
            meeting_date = %request.meeting_date,
            meeting_hour = request.meeting_hour,
            "会议分配请求"
        );

        let result = self.assign(&request);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(response) => info!(
                elapsed_ms,
                room = %response.assigned_room_name,
                "会议分配完成"
            ),
            Err(e) if e.http_status() >= 500 => error!(elapsed_ms, error = %e, "会议分配失败"),
            Err(e) => warn!(elapsed_ms, code = e.code(), error = %e, "会议分配被拒绝"),
        }
        result
    }

    fn assign(&self, request: &MeetingRequest) -> ApiResult<MeetingResponse> {
        let date = parse_request_date(&request.meeting_date)?;
        let retries = self.conflict_retries();

        let mut attempt = 0;
        loop {
            match self.engine.assign_best_room(
                &request.meeting_type,
                request.participant_count,
                date,
                request.meeting_hour,
            ) {
                Ok(meeting) => return Ok(MeetingResponse::from(&meeting)),
                Err(PlannerError::Repository(RepositoryError::SlotConflict { room_id, .. }))
                    if attempt < retries =>
                {
                    attempt += 1;
                    warn!(room_id, attempt, retries, "会议室时段被并发占用，重新分配");
                }
                Err(e) => return Err(ApiError::from(e)),
            }
        }
    }

    fn conflict_retries(&self) -> u32 {
        match self.config.get_assign_conflict_retries() {
            Ok(retries) => retries,
            Err(e) => {
                warn!(error = %e, fallback = DEFAULT_ASSIGN_CONFLICT_RETRIES, "读取冲突重试配置失败，使用默认值");
                DEFAULT_ASSIGN_CONFLICT_RETRIES
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{equipment_set, MeetingType, Room};
    use crate::engine::mock_ports::InMemoryStore;
    use crate::logging;
    use std::error::Error;
    use std::sync::atomic::Ordering;

    struct FixedRetries(u32);

    impl PlannerConfigReader for FixedRetries {
        fn get_assign_conflict_retries(&self) -> Result<u32, Box<dyn Error>> {
            Ok(self.0)
        }
    }

    struct BrokenConfig;

    impl PlannerConfigReader for BrokenConfig {
        fn get_assign_conflict_retries(&self) -> Result<u32, Box<dyn Error>> {
            Err("config_kv unavailable".into())
        }
    }

    fn store() -> Arc<InMemoryStore> {
        let projector = MeetingType::new("PRESENTATION", 10, equipment_set(["Projector"]).unwrap())
            .unwrap();
        let room = Room::new(1, "Room A", 20, equipment_set(["Projector"]).unwrap(), vec![]).unwrap();
        Arc::new(InMemoryStore::new(vec![projector], vec![room]))
    }

    fn api(store: Arc<InMemoryStore>, config: Arc<dyn PlannerConfigReader>) -> MeetingApi {
        let engine = AssignmentEngine::new(store.clone(), store.clone(), store);
        MeetingApi::new(Arc::new(engine), config)
    }

    fn request(participants: u32, date: &str, hour: i32) -> MeetingRequest {
        typed_request("PRESENTATION", participants, date, hour)
    }

    fn typed_request(meeting_type: &str, participants: u32, date: &str, hour: i32) -> MeetingRequest {
        MeetingRequest {
            meeting_type: meeting_type.to_string(),
            participant_count: participants,
            meeting_date: date.to_string(),
            meeting_hour: hour,
        }
    }

    #[test]
    fn test_assign_成功() {
        logging::init_test();
        let api = api(store(), Arc::new(FixedRetries(2)));
        let response = api
            .assign_meeting_to_best_room(request(10, "2024-12-01", 15))
            .unwrap();

        assert_eq!(response.assigned_room_name, "Room A");
        assert_eq!(response.meeting_type, "PRESENTATION");
        assert_eq!(response.meeting_date, "2024-12-01");
        assert_eq!(response.meeting_hour, 15);
        assert_eq!(response.participant_count, 10);
        assert!(response.meeting_id.is_some());
    }

    #[test]
    fn test_assign_日期格式错误() {
        let store = store();
        let api = api(store.clone(), Arc::new(FixedRetries(2)));
        let err = api
            .assign_meeting_to_best_room(request(10, "01/12/2024", 15))
            .unwrap_err();

        assert!(matches!(err, ApiError::MalformedInput(ref msg) if msg.contains("01/12/2024")));
        assert_eq!(err.http_status(), 400);
        assert_eq!(store.type_fetches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_assign_冲突后重试成功() {
        let store = store();
        store.pending_conflicts.store(2, Ordering::SeqCst);
        let api = api(store.clone(), Arc::new(FixedRetries(2)));

        let response = api
            .assign_meeting_to_best_room(request(10, "2024-12-01", 15))
            .unwrap();
        assert_eq!(response.assigned_room_name, "Room A");
        assert_eq!(store.room_fetches.load(Ordering::SeqCst), 3);
        assert_eq!(store.saved_count(), 1);
    }

    #[test]
    fn test_assign_冲突重试用尽() {
        let store = store();
        store.pending_conflicts.store(3, Ordering::SeqCst);
        let api = api(store.clone(), Arc::new(FixedRetries(2)));

        let err = api
            .assign_meeting_to_best_room(request(10, "2024-12-01", 15))
            .unwrap_err();
        assert!(matches!(err, ApiError::SlotConflict(_)));
        assert_eq!(err.http_status(), 409);
        assert_eq!(store.saved_count(), 0);
    }

    #[test]
    fn test_assign_配置读取失败使用默认值() {
        let store = store();
        store.pending_conflicts.store(1, Ordering::SeqCst);
        let api = api(store, Arc::new(BrokenConfig));

        assert!(api
            .assign_meeting_to_best_room(request(10, "2024-12-01", 15))
            .is_ok());
    }

    #[test]
    fn test_assign_业务错误映射() {
        let api = api(store(), Arc::new(FixedRetries(0)));

        let err = api
            .assign_meeting_to_best_room(request(25, "2024-12-01", 15))
            .unwrap_err();
        assert!(matches!(err, ApiError::NoSuitableRoom(_)));
        assert_eq!(err.http_status(), 404);

        let err = api
            .assign_meeting_to_best_room(request(10, "2024-12-01", 22))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidMeetingHour { hour: 22 }));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_assign_空白类型先校验整点() {
        let store = store();
        let api = api(store.clone(), Arc::new(FixedRetries(0)));

        let err = api
            .assign_meeting_to_best_room(typed_request("   ", 10, "2024-12-01", 22))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_MEETING_HOUR");
        assert_eq!(err.http_status(), 400);
        assert_eq!(store.type_fetches.load(Ordering::SeqCst), 0);

        let err = api
            .assign_meeting_to_best_room(typed_request("   ", 10, "2024-12-01", 10))
            .unwrap_err();
        assert_eq!(err.code(), "MEETING_TYPE_NOT_FOUND");
        assert_eq!(err.http_status(), 404);

        let err = api
            .assign_meeting_to_best_room(typed_request("", 10, "2024-12-01", 10))
            .unwrap_err();
        assert!(matches!(err, ApiError::MeetingTypeNotFound(_)));
        assert_eq!(store.saved_count(), 0);
    }
}
