// ==========================================
// 会议室分配系统 - 导入层
// ==========================================
// 职责: 外部基础数据导入（会议室、会议类型）
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod seed_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use seed_importer::{ImportSummary, SeedImporter, EQUIPMENT_SEPARATOR};
