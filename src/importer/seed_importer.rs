// ==========================================
// 会议室分配系统 - 基础数据导入器
// ==========================================
// 职责: 从 CSV / Excel 导入会议室与会议类型
// 流程: 文件解析 -> 字段映射与校验(全部行) -> 落库
// 红线: 任一行校验失败则不写入任何数据
// ==========================================

use crate::domain::{Equipment, EquipmentSet, MeetingType};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use crate::repository::{MeetingTypeRepository, RoomRepository};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 设备列表分隔符
pub const EQUIPMENT_SEPARATOR: char = '|';

/// 会议室文件列名
pub mod room_columns {
    pub const NAME: &str = "name";
    pub const CAPACITY: &str = "capacity";
    pub const EQUIPMENTS: &str = "equipments";
}

/// 会议类型文件列名
pub mod meeting_type_columns {
    pub const NAME: &str = "name";
    pub const MINIMUM_CAPACITY: &str = "minimum_capacity";
    pub const REQUIRED_EQUIPMENTS: &str = "required_equipments";
}

/// 导入汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// 新增会议室数
    pub rooms: usize,
    /// 已存在而跳过的会议室数
    pub rooms_skipped: usize,
    /// 新增或覆盖的会议类型数
    pub meeting_types: usize,
}

/// 校验后的会议室行
#[derive(Debug, Clone, PartialEq, Eq)]
struct RoomRow {
    row: usize,
    name: String,
    capacity: u32,
    equipments: EquipmentSet,
}

// ==========================================
// SeedImporter - 基础数据导入器
// ==========================================
pub struct SeedImporter {
    rooms: Arc<RoomRepository>,
    meeting_types: Arc<MeetingTypeRepository>,
    parser: UniversalFileParser,
}

impl SeedImporter {
    /// 创建新的 SeedImporter 实例
    pub fn new(rooms: Arc<RoomRepository>, meeting_types: Arc<MeetingTypeRepository>) -> Self {
        Self {
            rooms,
            meeting_types,
            parser: UniversalFileParser,
        }
    }

    /// 导入会议室与会议类型
    ///
    /// # 参数
    /// - rooms_file: 会议室文件（列: name,capacity,equipments）
    /// - meeting_types_file: 会议类型文件（列: name,minimum_capacity,required_equipments）
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入汇总
    /// - Err: 文件、校验或写入错误（校验错误带行号）
    #[instrument(skip_all, fields(rooms_file = %rooms_file.as_ref().display(), meeting_types_file = %meeting_types_file.as_ref().display()))]
    pub fn import<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        rooms_file: P,
        meeting_types_file: Q,
    ) -> ImportResult<ImportSummary> {
        // === 阶段 1: 解析 + 校验 ===
        let room_rows = map_rooms(&self.parser.parse(rooms_file)?)?;
        let type_rows = map_meeting_types(&self.parser.parse(meeting_types_file)?)?;

        // === 阶段 2: 落库 ===
        let mut summary = ImportSummary::default();

        for (row, meeting_type) in &type_rows {
            self.meeting_types
                .upsert(meeting_type)
                .map_err(|source| ImportError::Repository { row: *row, source })?;
            summary.meeting_types += 1;
        }

        for room in &room_rows {
            let existing = self
                .rooms
                .find_by_name(&room.name)
                .map_err(|source| ImportError::Repository { row: room.row, source })?;
            if existing.is_some() {
                warn!(room = %room.name, row = room.row, "会议室已存在，跳过");
                summary.rooms_skipped += 1;
                continue;
            }

            self.rooms
                .create(&room.name, room.capacity, &room.equipments)
                .map_err(|source| ImportError::Repository { row: room.row, source })?;
            summary.rooms += 1;
        }

        info!(
            rooms = summary.rooms,
            rooms_skipped = summary.rooms_skipped,
            meeting_types = summary.meeting_types,
            "基础数据导入完成"
        );
        Ok(summary)
    }
}

// ==========================================
// 字段映射
// ==========================================

/// 数据行号（第 1 行为表头）
fn row_number(index: usize) -> usize {
    index + 2
}

fn required_field<'a>(record: &'a RawRecord, column: &str, row: usize) -> ImportResult<&'a str> {
    match record.get(column) {
        Some(value) if !value.is_empty() => Ok(value.as_str()),
        Some(_) => Err(ImportError::FieldMappingError {
            row,
            message: format!("字段 {} 为空", column),
        }),
        None => Err(ImportError::MissingColumn(column.to_string())),
    }
}

fn parse_count(value: &str, column: &str, row: usize) -> ImportResult<u32> {
    value.parse::<u32>().map_err(|e| ImportError::TypeConversionError {
        row,
        field: column.to_string(),
        message: format!("{}: {}", value, e),
    })
}

/// 解析设备列表，如 "Ecran|Webcam"；空串表示无设备
fn parse_equipments(value: Option<&String>, row: usize) -> ImportResult<EquipmentSet> {
    let Some(value) = value else {
        return Ok(EquipmentSet::new());
    };
    value
        .split(EQUIPMENT_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Equipment::new(name).map_err(|e| ImportError::from_domain(row, e)))
        .collect()
}

fn map_rooms(records: &[RawRecord]) -> ImportResult<Vec<RoomRow>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let row = row_number(index);
            let name = required_field(record, room_columns::NAME, row)?.to_string();
            let capacity = parse_count(
                required_field(record, room_columns::CAPACITY, row)?,
                room_columns::CAPACITY,
                row,
            )?;
            if capacity == 0 {
                return Err(ImportError::FieldMappingError {
                    row,
                    message: format!("会议室 {} 容量必须大于0", name),
                });
            }
            let equipments = parse_equipments(record.get(room_columns::EQUIPMENTS), row)?;

            Ok(RoomRow {
                row,
                name,
                capacity,
                equipments,
            })
        })
        .collect()
}

fn map_meeting_types(records: &[RawRecord]) -> ImportResult<Vec<(usize, MeetingType)>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let row = row_number(index);
            let name = required_field(record, meeting_type_columns::NAME, row)?;
            let minimum_capacity = match record.get(meeting_type_columns::MINIMUM_CAPACITY) {
                Some(value) if !value.is_empty() => {
                    parse_count(value, meeting_type_columns::MINIMUM_CAPACITY, row)?
                }
                _ => 0,
            };
            let required =
                parse_equipments(record.get(meeting_type_columns::REQUIRED_EQUIPMENTS), row)?;

            let meeting_type = MeetingType::new(name, minimum_capacity, required)
                .map_err(|e| ImportError::from_domain(row, e))?;
            Ok((row, meeting_type))
        })
        .collect()
}
