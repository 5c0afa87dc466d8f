//! 数据库行到领域对象的转换

use campus_errors::AppError;

use crate::domain::{CampusType, Pos, PosId, PosType};
use crate::error::ServiceResult;

use super::rows::PosRow;

/// 将 PosRow 转换为 Pos
///
/// 枚举列中出现未知名称视为数据损坏
pub fn pos_from_row(row: PosRow) -> ServiceResult<Pos> {
    let pos_type = row
        .pos_type
        .parse::<PosType>()
        .map_err(|e| AppError::database(format!("POS {} 数据损坏: {}", row.id, e)))?;
    let campus = row
        .campus
        .parse::<CampusType>()
        .map_err(|e| AppError::database(format!("POS {} 数据损坏: {}", row.id, e)))?;

    Ok(Pos {
        id: Some(PosId(row.id)),
        name: row.name,
        description: row.description,
        pos_type,
        campus,
        street: row.street,
        house_number: row.house_number,
        postal_code: row.postal_code,
        city: row.city,
        created_at: Some(row.created_at),
        updated_at: Some(row.updated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use chrono::Utc;

    fn row(pos_type: &str, campus: &str) -> PosRow {
        let now = Utc::now();
        PosRow {
            id: 1,
            name: "Bäcker Görtz".to_string(),
            description: "Bakery at Bismarckplatz".to_string(),
            pos_type: pos_type.to_string(),
            campus: campus.to_string(),
            street: "Bergheimer Straße".to_string(),
            house_number: "1".to_string(),
            postal_code: 69115,
            city: "Heidelberg".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_conversion() {
        let pos = pos_from_row(row("BAKERY", "BERGHEIM")).unwrap();
        assert_eq!(pos.id, Some(PosId(1)));
        assert_eq!(pos.pos_type, PosType::Bakery);
        assert_eq!(pos.campus, CampusType::Bergheim);
        assert!(pos.created_at.is_some());
    }

    #[test]
    fn test_unknown_enum_name_is_infrastructure_error() {
        let err = pos_from_row(row("KIOSK", "BERGHEIM")).unwrap_err();
        assert!(matches!(err, ServiceError::Infrastructure(AppError::Database(msg)) if msg.contains("KIOSK")));
    }
}
