//! Transaction and inventory categories, with the fixed chart colors used by the
//! dashboard breakdown.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Chart color used for any category without a fixed mapping.
pub const DEFAULT_CATEGORY_COLOR: &str = "#9E9E9E";

/// A transaction or inventory category.
///
/// The fixed variants are the sets offered by the entry forms; anything else the user
/// types lands in `Custom`. Categories persist as their plain display string, so a
/// stored custom value always round-trips.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Seeds,
    Fertilizer,
    Pesticide,
    Equipment,
    Labor,
    Transport,
    #[default]
    Misc,
    Crops,
    GovernmentSubsidy,
    Rent,
    Other,
    Custom(String),
}

/// The expense categories offered by the entry forms, in display order.
pub const EXPENSE_CATEGORIES: [Category; 7] = [
    Category::Seeds,
    Category::Fertilizer,
    Category::Pesticide,
    Category::Equipment,
    Category::Labor,
    Category::Transport,
    Category::Misc,
];

/// The income categories offered by the entry forms, in display order.
pub const INCOME_CATEGORIES: [Category; 4] = [
    Category::Crops,
    Category::GovernmentSubsidy,
    Category::Rent,
    Category::Other,
];

impl Category {
    /// The fixed chart color for this category, or [`DEFAULT_CATEGORY_COLOR`] when none
    /// is mapped.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Seeds => "#4CAF50",
            Category::Fertilizer => "#8BC34A",
            Category::Pesticide => "#FF9800",
            Category::Equipment => "#795548",
            Category::Labor => "#2196F3",
            Category::Transport => "#607D8B",
            _ => DEFAULT_CATEGORY_COLOR,
        }
    }

    /// Sort key: fixed categories in display order, custom categories after them in
    /// name order.
    fn rank(&self) -> (usize, &str) {
        match self {
            Category::Seeds => (0, ""),
            Category::Fertilizer => (1, ""),
            Category::Pesticide => (2, ""),
            Category::Equipment => (3, ""),
            Category::Labor => (4, ""),
            Category::Transport => (5, ""),
            Category::Misc => (6, ""),
            Category::Crops => (7, ""),
            Category::GovernmentSubsidy => (8, ""),
            Category::Rent => (9, ""),
            Category::Other => (10, ""),
            Category::Custom(name) => (11, name.as_str()),
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Seeds => "Seeds",
            Category::Fertilizer => "Fertilizer",
            Category::Pesticide => "Pesticide",
            Category::Equipment => "Equipment",
            Category::Labor => "Labor",
            Category::Transport => "Transport",
            Category::Misc => "Misc",
            Category::Crops => "Crops",
            Category::GovernmentSubsidy => "Government Subsidy",
            Category::Rent => "Rent",
            Category::Other => "Other",
            Category::Custom(name) => name.as_str(),
        };
        write!(f, "{name}")
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Seeds" => Category::Seeds,
            "Fertilizer" => Category::Fertilizer,
            "Pesticide" => Category::Pesticide,
            "Equipment" => Category::Equipment,
            "Labor" => Category::Labor,
            "Transport" => Category::Transport,
            "Misc" => Category::Misc,
            "Crops" => Category::Crops,
            "Government Subsidy" => Category::GovernmentSubsidy,
            "Rent" => Category::Rent,
            "Other" => Category::Other,
            custom => Category::Custom(custom.to_string()),
        })
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        // FromStr is infallible, unknown names become Custom.
        value.parse().unwrap_or(Category::Misc)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_name_round_trip() {
        let category: Category = "Government Subsidy".parse().unwrap();
        assert_eq!(category, Category::GovernmentSubsidy);
        assert_eq!(category.to_string(), "Government Subsidy");
    }

    #[test]
    fn test_unknown_name_is_custom() {
        let category: Category = "Drip Irrigation".parse().unwrap();
        assert_eq!(category, Category::Custom("Drip Irrigation".to_string()));
        assert_eq!(category.to_string(), "Drip Irrigation");
    }

    #[test]
    fn test_serde_plain_string() {
        let json = serde_json::to_string(&Category::Seeds).unwrap();
        assert_eq!(json, "\"Seeds\"");

        let parsed: Category = serde_json::from_str("\"Well Repair\"").unwrap();
        assert_eq!(parsed, Category::Custom("Well Repair".to_string()));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(Category::Seeds.color(), "#4CAF50");
        assert_eq!(Category::Misc.color(), DEFAULT_CATEGORY_COLOR);
        assert_eq!(
            Category::Custom("Well Repair".to_string()).color(),
            DEFAULT_CATEGORY_COLOR
        );
    }

    #[test]
    fn test_custom_sorts_after_fixed() {
        let mut categories = vec![
            Category::Custom("Apples".to_string()),
            Category::Other,
            Category::Seeds,
        ];
        categories.sort();
        assert_eq!(
            categories,
            vec![
                Category::Seeds,
                Category::Other,
                Category::Custom("Apples".to_string()),
            ]
        );
    }
}
