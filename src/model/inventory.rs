use crate::model::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Measurement unit for a stocked supply.
///
/// The entry form offers the fixed units; `Custom` covers free-form values carried over
/// from older data. Units persist as their plain display string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    #[default]
    Kg,
    Bags,
    Liters,
    Custom(String),
}

/// The units offered by the entry form, in display order.
pub const FIXED_UNITS: [Unit; 3] = [Unit::Kg, Unit::Bags, Unit::Liters];

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Kg => "kg",
            Unit::Bags => "bags",
            Unit::Liters => "L",
            Unit::Custom(name) => name.as_str(),
        };
        write!(f, "{name}")
    }
}

impl FromStr for Unit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "kg" => Unit::Kg,
            "bags" => Unit::Bags,
            "L" => Unit::Liters,
            custom => Unit::Custom(custom.to_string()),
        })
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        value.as_str().parse().unwrap_or(Unit::Kg)
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.to_string()
    }
}

/// A stocked supply such as seed or fertilizer.
///
/// `quantity` is the current stock level and is the only field mutated in place, either
/// by a manual adjustment or by a linked transaction. The store enforces no lower bound:
/// stock may go negative if adjustments outrun reality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(with = "super::amount::decimal")]
    pub quantity: Decimal,
    pub unit: Unit,
    #[serde(
        default,
        with = "super::amount::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_per_unit: Option<Decimal>,
}
