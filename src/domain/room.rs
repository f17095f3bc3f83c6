// ==========================================
// 会议室分配系统 - 会议室领域模型
// ==========================================
// 职责: 单个会议室的适用性/可用性判定（无副作用）
// 红线: 预约前后各留 1 小时缓冲，容量最多使用 70%
// ==========================================

use crate::domain::equipment::EquipmentSet;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::meeting::{Reservation, RoomRef};
use crate::domain::meeting_type::MeetingType;
use crate::domain::types::{
    BUSINESS_DAY_END_HOUR, BUSINESS_DAY_START_HOUR, USABLE_CAPACITY_DENOMINATOR,
    USABLE_CAPACITY_NUMERATOR,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Room - 会议室
// ==========================================
// 容量在创建时固定；预约列表在决策过程中只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: i64,
    name: String,
    capacity: u32,
    equipments: EquipmentSet,
    reservations: Vec<Reservation>,
}

impl Room {
    /// 创建会议室
    ///
    /// # 参数
    /// - id: 会议室ID
    /// - name: 会议室名称（唯一，不能为空）
    /// - capacity: 额定容量（必须 > 0）
    /// - equipments: 设备集合
    /// - reservations: 已有预约
    ///
    /// # 返回
    /// - Err(DomainError): 名称为空或容量为 0
    pub fn new(
        id: i64,
        name: impl Into<String>,
        capacity: u32,
        equipments: EquipmentSet,
        reservations: Vec<Reservation>,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName { entity: "room" });
        }
        if capacity == 0 {
            return Err(DomainError::NonPositiveCapacity { room: name });
        }
        Ok(Self {
            id,
            name,
            capacity,
            equipments,
            reservations,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn equipments(&self) -> &EquipmentSet {
        &self.equipments
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// 设备名称列表（按名称升序）
    pub fn equipment_names(&self) -> Vec<String> {
        self.equipments.iter().map(|e| e.name().to_string()).collect()
    }

    /// 会议引用
    pub fn to_ref(&self) -> RoomRef {
        RoomRef {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// 是否具备全部必需设备（集合包含关系）
    pub fn has_all_required_equipment(&self, required: &EquipmentSet) -> bool {
        required.is_subset(&self.equipments)
    }

    /// 是否能容纳指定人数
    ///
    /// 规则: capacity * 0.7 >= required_capacity
    /// 以整数缩放形式计算，避免浮点误差（如 90 * 0.7 = 62.99999...）
    pub fn has_capacity(&self, required_capacity: u32) -> bool {
        u64::from(self.capacity) * USABLE_CAPACITY_NUMERATOR
            >= u64::from(required_capacity) * USABLE_CAPACITY_DENOMINATOR
    }

    /// 是否适用于会议类型
    ///
    /// 注意: 此处使用原始容量而非 70% 容量
    pub fn is_suitable_for_meeting_type(&self, meeting_type: &MeetingType) -> bool {
        self.has_all_required_equipment(meeting_type.required_equipment())
            && meeting_type.is_capacity_satisfied(self.capacity)
    }

    /// 指定日期/整点是否可用（前后各 1 小时缓冲）
    pub fn is_available_at(&self, date: NaiveDate, hour: i32) -> bool {
        !self
            .reservations
            .iter()
            .any(|reservation| reservation.conflicts_with(date, hour))
    }

    /// 查询指定日期的可用开始整点
    ///
    /// 候选范围 [8, 20)，升序、无重复，每次调用重新计算
    pub fn find_available_hours_on_date(&self, date: NaiveDate) -> Vec<i32> {
        (BUSINESS_DAY_START_HOUR..BUSINESS_DAY_END_HOUR)
            .filter(|&hour| self.is_available_at(date, hour))
            .collect()
    }

    /// 指定日期是否存在任一可用整点
    pub fn has_any_available_hour_on_date(&self, date: NaiveDate) -> bool {
        (BUSINESS_DAY_START_HOUR..BUSINESS_DAY_END_HOUR).any(|hour| self.is_available_at(date, hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::equipment::equipment_set;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn room(capacity: u32, equipments: &[&str], reservations: Vec<Reservation>) -> Room {
        Room::new(
            1,
            "E1001",
            capacity,
            equipment_set(equipments.iter().copied()).unwrap(),
            reservations,
        )
        .unwrap()
    }

    fn meeting_type(min: u32, required: &[&str]) -> MeetingType {
        MeetingType::new("VC", min, equipment_set(required.iter().copied()).unwrap()).unwrap()
    }

    // ==========================================
    // 构造约束
    // ==========================================

    #[test]
    fn test_new_容量为0() {
        let err = Room::new(1, "E1001", 0, EquipmentSet::new(), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonPositiveCapacity {
                room: "E1001".to_string()
            }
        );
    }

    #[test]
    fn test_new_名称为空() {
        let err = Room::new(1, " ", 10, EquipmentSet::new(), Vec::new()).unwrap_err();
        assert_eq!(err, DomainError::EmptyName { entity: "room" });
    }

    // ==========================================
    // 设备
    // ==========================================

    #[test]
    fn test_has_all_required_equipment() {
        let r = room(10, &["Ecran", "Webcam", "Pieuvre"], vec![]);
        assert!(r.has_all_required_equipment(&equipment_set(["Ecran", "Webcam"]).unwrap()));
        assert!(r.has_all_required_equipment(&EquipmentSet::new()));
        assert!(!r.has_all_required_equipment(&equipment_set(["Tableau"]).unwrap()));
    }

    // ==========================================
    // 容量
    // ==========================================

    #[test]
    fn test_has_capacity_70比例() {
        let r = room(20, &[], vec![]);
        assert!(r.has_capacity(14));
        assert!(!r.has_capacity(15));
        assert!(r.has_capacity(0));
    }

    #[test]
    fn test_has_capacity_整数缩放边界() {
        // 90 * 0.7 在 f64 下为 62.99999999999999
        let r = room(90, &[], vec![]);
        assert!(r.has_capacity(63));
        assert!(!r.has_capacity(64));

        // 非整数倍: 23 * 0.7 = 16.1
        let r = room(23, &[], vec![]);
        assert!(r.has_capacity(16));
        assert!(!r.has_capacity(17));
    }

    #[test]
    fn test_has_capacity_与定义一致() {
        for capacity in 1..=60u32 {
            let r = room(capacity, &[], vec![]);
            for required in 0..=60u32 {
                let expected = capacity * 7 >= required * 10;
                assert_eq!(r.has_capacity(required), expected, "c={capacity} n={required}");
            }
        }
    }

    // ==========================================
    // 适用性
    // ==========================================

    #[test]
    fn test_is_suitable_使用原始容量() {
        // 容量 10 满足最小容量 10（不按 70% 折算）
        let r = room(10, &["Ecran"], vec![]);
        assert!(r.is_suitable_for_meeting_type(&meeting_type(10, &["Ecran"])));
        assert!(!r.is_suitable_for_meeting_type(&meeting_type(11, &["Ecran"])));
    }

    #[test]
    fn test_is_suitable_缺少设备() {
        let r = room(30, &["Ecran"], vec![]);
        assert!(!r.is_suitable_for_meeting_type(&meeting_type(0, &["Ecran", "Webcam"])));
    }

    // ==========================================
    // 可用性
    // ==========================================

    #[test]
    fn test_is_available_at_前后缓冲() {
        let d = date("2024-12-01");
        let r = room(10, &[], vec![Reservation::new(d, 10)]);
        assert!(!r.is_available_at(d, 9));
        assert!(!r.is_available_at(d, 10));
        assert!(!r.is_available_at(d, 11));
        assert!(r.is_available_at(d, 12));
        assert!(r.is_available_at(d, 8));
    }

    #[test]
    fn test_is_available_at_极端整点() {
        let d = date("2024-12-01");
        let r = room(10, &[], vec![Reservation::new(d, i32::MAX)]);
        assert!(r.is_available_at(d, i32::MIN));
        assert!(r.is_available_at(d, 10));
        assert!(!r.is_available_at(d, i32::MAX));
    }

    #[test]
    fn test_is_available_at_其他日期不冲突() {
        let d = date("2024-12-01");
        let r = room(10, &[], vec![Reservation::new(date("2024-12-02"), 10)]);
        assert!(r.is_available_at(d, 10));
    }

    #[test]
    fn test_find_available_hours_无预约() {
        let r = room(10, &[], vec![]);
        let hours = r.find_available_hours_on_date(date("2024-12-01"));
        assert_eq!(hours, (8..20).collect::<Vec<_>>());
        assert!(!hours.contains(&20));
    }

    #[test]
    fn test_find_available_hours_全部被缓冲覆盖() {
        let d = date("2024-12-01");
        let reservations = [8, 10, 12, 14, 16, 18]
            .iter()
            .map(|&h| Reservation::new(d, h))
            .collect();
        let r = room(10, &[], reservations);
        assert!(r.find_available_hours_on_date(d).is_empty());
        assert!(!r.has_any_available_hour_on_date(d));
    }

    #[test]
    fn test_find_available_hours_部分占用() {
        let d = date("2024-12-01");
        let r = room(10, &[], vec![Reservation::new(d, 8), Reservation::new(d, 15)]);
        let hours = r.find_available_hours_on_date(d);
        assert_eq!(hours, vec![10, 11, 12, 13, 17, 18, 19]);
        assert!(hours.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_find_available_hours_20点预约只影响19点() {
        let d = date("2024-12-01");
        let r = room(10, &[], vec![Reservation::new(d, 20)]);
        let hours = r.find_available_hours_on_date(d);
        assert_eq!(hours.last(), Some(&18));
        assert_eq!(hours.first(), Some(&8));
    }
}
