// ==========================================
// 会议室分配系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 按会议类型、人数与时段选择最优会议室
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与规则
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 分配与空闲时段查询
pub mod engine;

// 导入层 - 基础数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{Equipment, EquipmentSet, HourSlot, Meeting, MeetingType, Reservation, Room};

// 引擎
pub use engine::{AssignmentEngine, AvailabilityEngine, PlannerError, RoomRanking};

// API
pub use api::{ApiError, MeetingApi, MeetingRequest, MeetingResponse, RoomApi, RoomWithAvailableHours};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "会议室分配系统";
