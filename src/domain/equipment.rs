// ==========================================
// 会议室分配系统 - 设备领域模型
// ==========================================
// 设备按名称判等（区分大小写），无独立生命周期
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 设备（屏幕、摄像头、白板等）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equipment(String);

impl Equipment {
    /// 创建设备，名称去除首尾空白后不能为空
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyEquipmentName);
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 设备集合（集合语义，重复项无意义）
pub type EquipmentSet = BTreeSet<Equipment>;

/// 由名称列表构造设备集合
pub fn equipment_set<I, S>(names: I) -> DomainResult<EquipmentSet>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Equipment::new).collect()
}
