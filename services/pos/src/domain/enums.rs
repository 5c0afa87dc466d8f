//! 领域枚举
//!
//! 数据库与 JSON 中均以 SCREAMING_SNAKE_CASE 名称表示

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 枚举解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// POS 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosType {
    Cafe,
    Bakery,
    Cafeteria,
    VendingMachine,
    Other,
}

impl PosType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "CAFE",
            Self::Bakery => "BAKERY",
            Self::Cafeteria => "CAFETERIA",
            Self::VendingMachine => "VENDING_MACHINE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for PosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAFE" => Ok(Self::Cafe),
            "BAKERY" => Ok(Self::Bakery),
            "CAFETERIA" => Ok(Self::Cafeteria),
            "VENDING_MACHINE" => Ok(Self::VendingMachine),
            "OTHER" => Ok(Self::Other),
            _ => Err(ParseEnumError::new("pos type", s)),
        }
    }
}

/// 校区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusType {
    Altstadt,
    Inf,
    Bergheim,
}

impl CampusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Altstadt => "ALTSTADT",
            Self::Inf => "INF",
            Self::Bergheim => "BERGHEIM",
        }
    }
}

impl fmt::Display for CampusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampusType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALTSTADT" => Ok(Self::Altstadt),
            "INF" => Ok(Self::Inf),
            "BERGHEIM" => Ok(Self::Bergheim),
            _ => Err(ParseEnumError::new("campus", s)),
        }
    }
}

/// OpenStreetMap `amenity` 标签中与餐饮相关的取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OsmAmenity {
    Bar,
    Biergarten,
    Cafe,
    FastFood,
    FoodCourt,
    IceCream,
    Pub,
    Restaurant,
    VendingMachine,
}

impl OsmAmenity {
    /// 解析 OSM 原始标签值（小写，例如 `fast_food`）
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bar" => Some(Self::Bar),
            "biergarten" => Some(Self::Biergarten),
            "cafe" => Some(Self::Cafe),
            "fast_food" => Some(Self::FastFood),
            "food_court" => Some(Self::FoodCourt),
            "ice_cream" => Some(Self::IceCream),
            "pub" => Some(Self::Pub),
            "restaurant" => Some(Self::Restaurant),
            "vending_machine" => Some(Self::VendingMachine),
            _ => None,
        }
    }
}

/// 外部 amenity 到 POS 类型的固定映射
impl From<OsmAmenity> for PosType {
    fn from(amenity: OsmAmenity) -> Self {
        match amenity {
            OsmAmenity::Cafe | OsmAmenity::IceCream => PosType::Cafe,
            OsmAmenity::VendingMachine => PosType::VendingMachine,
            OsmAmenity::FoodCourt => PosType::Cafeteria,
            OsmAmenity::Bar
            | OsmAmenity::Biergarten
            | OsmAmenity::Pub
            | OsmAmenity::Restaurant
            | OsmAmenity::FastFood => PosType::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amenity_mapping_covers_every_variant() {
        let cases = [
            (OsmAmenity::Cafe, PosType::Cafe),
            (OsmAmenity::IceCream, PosType::Cafe),
            (OsmAmenity::VendingMachine, PosType::VendingMachine),
            (OsmAmenity::FoodCourt, PosType::Cafeteria),
            (OsmAmenity::Bar, PosType::Other),
            (OsmAmenity::Biergarten, PosType::Other),
            (OsmAmenity::Pub, PosType::Other),
            (OsmAmenity::Restaurant, PosType::Other),
            (OsmAmenity::FastFood, PosType::Other),
        ];

        for (amenity, expected) in cases {
            assert_eq!(PosType::from(amenity), expected, "{:?}", amenity);
        }
    }

    #[test]
    fn test_amenity_from_osm_tag() {
        assert_eq!(OsmAmenity::from_tag("ice_cream"), Some(OsmAmenity::IceCream));
        assert_eq!(OsmAmenity::from_tag("food_court"), Some(OsmAmenity::FoodCourt));
        assert_eq!(OsmAmenity::from_tag("parking"), None);
        assert_eq!(OsmAmenity::from_tag("CAFE"), None);
    }

    #[test]
    fn test_pos_type_database_names() {
        for pos_type in [
            PosType::Cafe,
            PosType::Bakery,
            PosType::Cafeteria,
            PosType::VendingMachine,
            PosType::Other,
        ] {
            assert_eq!(pos_type.as_str().parse::<PosType>(), Ok(pos_type));
        }

        let err = "KIOSK".parse::<PosType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown pos type value 'KIOSK'");
    }

    #[test]
    fn test_enum_json_names() {
        assert_eq!(
            serde_json::to_string(&PosType::VendingMachine).unwrap(),
            "\"VENDING_MACHINE\""
        );
        assert_eq!(
            serde_json::from_str::<CampusType>("\"ALTSTADT\"").unwrap(),
            CampusType::Altstadt
        );
        assert!(serde_json::from_str::<CampusType>("\"altstadt\"").is_err());
        assert_eq!("BERGHEIM".parse::<CampusType>(), Ok(CampusType::Bergheim));
    }
}
