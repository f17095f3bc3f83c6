// ==========================================
// 并发分配测试
// ==========================================
// 职责: 多个进程内实例（各自独立连接）同时抢占同一时段，
//       验证不会产生重复预约
// ==========================================


#[cfg(test)]
mod concurrent_assignment_test {
    use meeting_planner::api::{ApiError, MeetingRequest};
    use meeting_planner::app::AppState;
    use meeting_planner::config::config_keys;
    use meeting_planner::domain::{EquipmentSet, MeetingType};
    use meeting_planner::logging;
    use std::sync::{Arc, Barrier};
    use std::thread;

    use crate::test_helpers::{create_test_db, test_date, TEST_DATE};

    const WORKERS: usize = 4;

    #[test]
    fn test_并发抢占不重复预约() {
        logging::init_test();
        let (_tmp, db_path) = create_test_db().unwrap();

        {
            let setup = AppState::new(db_path.clone()).unwrap();
            setup.room_repo.create("Small", 8, &EquipmentSet::new()).unwrap();
            setup.room_repo.create("Large", 20, &EquipmentSet::new()).unwrap();
            setup
                .meeting_type_repo
                .upsert(&MeetingType::new("RS", 3, EquipmentSet::new()).unwrap())
                .unwrap();
            setup
                .config_manager
                .set_global_config_value(config_keys::ASSIGN_CONFLICT_RETRIES, "2")
                .unwrap();
        }

        let barrier = Arc::new(Barrier::new(WORKERS));
        let handles: Vec<_> = (0..WORKERS)
            .map(|_| {
                let db_path = db_path.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let state = AppState::new(db_path).unwrap();
                    barrier.wait();
                    state.meeting_api.assign_meeting_to_best_room(MeetingRequest {
                        meeting_type: "RS".to_string(),
                        participant_count: 3,
                        meeting_date: TEST_DATE.to_string(),
                        meeting_hour: 14,
                    })
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let mut booked: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|r| r.assigned_room_name.clone())
            .collect();
        booked.sort();
        assert_eq!(booked, vec!["Large".to_string(), "Small".to_string()]);

        for result in &results {
            if let Err(err) = result {
                assert!(matches!(err, ApiError::NoSuitableRoom(_)), "unexpected error: {}", err);
            }
        }

        let state = AppState::new(db_path).unwrap();
        assert_eq!(state.meeting_repo.count().unwrap(), 2);
        for name in ["Small", "Large"] {
            let room = state.room_repo.find_by_name(name).unwrap().unwrap();
            let records = state
                .meeting_repo
                .find_by_room_and_date(room.id(), test_date())
                .unwrap();
            assert_eq!(records.len(), 1);
        }
    }

    #[test]
    fn test_重试次数为0时返回冲突或无合适会议室() {
        let (_tmp, db_path) = create_test_db().unwrap();

        {
            let setup = AppState::new(db_path.clone()).unwrap();
            setup.room_repo.create("Solo", 10, &EquipmentSet::new()).unwrap();
            setup
                .meeting_type_repo
                .upsert(&MeetingType::new("RS", 3, EquipmentSet::new()).unwrap())
                .unwrap();
            setup
                .config_manager
                .set_global_config_value(config_keys::ASSIGN_CONFLICT_RETRIES, "0")
                .unwrap();
        }

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let db_path = db_path.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let state = AppState::new(db_path).unwrap();
                    barrier.wait();
                    state.meeting_api.assign_meeting_to_best_room(MeetingRequest {
                        meeting_type: "RS".to_string(),
                        participant_count: 3,
                        meeting_date: TEST_DATE.to_string(),
                        meeting_hour: 9,
                    })
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

        let loser = results
            .into_iter()
            .find_map(|r| r.err())
            .unwrap();
        assert!(matches!(
            loser,
            ApiError::SlotConflict(_) | ApiError::NoSuitableRoom(_)
        ));
    }
}
