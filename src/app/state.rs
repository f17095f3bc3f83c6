// ==========================================
// 会议室分配系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{MeetingApi, RoomApi};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::engine::{AssignmentEngine, AvailabilityEngine};
use crate::importer::SeedImporter;
use crate::repository::{MeetingRepository, MeetingTypeRepository, RoomRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "MEETING_PLANNER_DB_PATH";

/// 默认数据库文件名
pub const DEFAULT_DB_FILE: &str = "meeting_planner.db";

/// 应用状态
///
/// 包含所有API实例和共享资源，所有仓储共享同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 会议分配API
    pub meeting_api: Arc<MeetingApi>,

    /// 会议室查询API
    pub room_api: Arc<RoomApi>,

    /// 基础数据导入器
    pub seed_importer: Arc<SeedImporter>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 会议室仓储
    pub room_repo: Arc<RoomRepository>,

    /// 会议类型仓储
    pub meeting_type_repo: Arc<MeetingTypeRepository>,

    /// 会议仓储
    pub meeting_repo: Arc<MeetingRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并确保 schema 存在
    /// 2. 初始化所有Repository
    /// 3. 初始化Engine并创建API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let room_repo = Arc::new(RoomRepository::from_connection(conn.clone()));
        let meeting_type_repo = Arc::new(MeetingTypeRepository::from_connection(conn.clone()));
        let meeting_repo = Arc::new(MeetingRepository::from_connection(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化Engine层
        // ==========================================
        let assignment_engine = Arc::new(AssignmentEngine::new(
            meeting_type_repo.clone(),
            room_repo.clone(),
            meeting_repo.clone(),
        ));
        let availability_engine = Arc::new(AvailabilityEngine::new(
            meeting_type_repo.clone(),
            room_repo.clone(),
        ));

        // ==========================================
        // 创建API实例
        // ==========================================
        let meeting_api = Arc::new(MeetingApi::new(assignment_engine, config_manager.clone()));
        let room_api = Arc::new(RoomApi::new(availability_engine));
        let seed_importer = Arc::new(SeedImporter::new(
            room_repo.clone(),
            meeting_type_repo.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            meeting_api,
            room_api,
            seed_importer,
            config_manager,
            room_repo,
            meeting_type_repo,
            meeting_repo,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级:
/// 1. 环境变量 MEETING_PLANNER_DB_PATH
/// 2. 用户数据目录下 meeting-planner/meeting_planner.db
/// 3. 当前目录 ./meeting_planner.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(".").join(DEFAULT_DB_FILE);

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("meeting-planner");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DEFAULT_DB_FILE);
        }
    }

    path.to_string_lossy().to_string()
}
