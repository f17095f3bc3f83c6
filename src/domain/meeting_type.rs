// ==========================================
// 会议室分配系统 - 会议类型领域模型
// ==========================================
// 会议类型定义最小容量与必需设备集合
// 由外部配置流程维护，单次决策内不可变
// ==========================================

use crate::domain::equipment::{Equipment, EquipmentSet};
use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

// ==========================================
// MeetingType - 会议类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingType {
    name: String,
    minimum_capacity: u32,
    required_equipment: EquipmentSet,
}

impl MeetingType {
    /// 创建会议类型
    ///
    /// # 参数
    /// - name: 类型名称（唯一键，不能为空）
    /// - minimum_capacity: 会议室原始容量下限
    /// - required_equipment: 必需设备集合
    pub fn new(
        name: impl Into<String>,
        minimum_capacity: u32,
        required_equipment: impl IntoIterator<Item = Equipment>,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName {
                entity: "meeting_type",
            });
        }
        Ok(Self {
            name,
            minimum_capacity,
            required_equipment: required_equipment.into_iter().collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minimum_capacity(&self) -> u32 {
        self.minimum_capacity
    }

    pub fn required_equipment(&self) -> &EquipmentSet {
        &self.required_equipment
    }

    /// 会议室原始容量是否满足该类型的最小容量
    pub fn is_capacity_satisfied(&self, room_capacity: u32) -> bool {
        room_capacity >= self.minimum_capacity
    }
}
