use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named unit of farmland.
///
/// Plots own their transactions only by back-reference: a [`Transaction`] may carry this
/// plot's id in `plot_id`. Deleting a plot does not delete those transactions, they are
/// simply left pointing at an id that no longer resolves.
///
/// [`Transaction`]: super::Transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub id: String,
    pub name: String,
    /// Area in acres.
    #[serde(with = "super::amount::decimal")]
    pub area: Decimal,
    pub crop_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_serde_round_trip() {
        let plot = Plot {
            id: "plot-1".to_string(),
            name: "North Field".to_string(),
            area: Decimal::from_str("2.5").unwrap(),
            crop_type: "Wheat".to_string(),
        };
        let json = serde_json::to_string(&plot).unwrap();
        assert!(json.contains("\"cropType\":\"Wheat\""));
        assert!(json.contains("\"area\":2.5"));
        let parsed: Plot = serde_json::from_str(&json).unwrap();
        assert_eq!(plot, parsed);
    }
}
