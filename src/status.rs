use chrono::{Local, NaiveDate};

use crate::data::datatable::DataValue;

/// Thresholds for deriving an item's badge from its fields
#[derive(Debug, Clone, Copy)]
pub struct StatusThresholds {
    /// Quantities at or below this count as low stock
    pub low_stock: i64,
    /// Days before expiry at which an item counts as expiring
    pub expiry_warning_days: i64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            low_stock: 2,
            expiry_warning_days: 3,
        }
    }
}

/// Presentational badge for an inventory item. Only one condition surfaces
/// even when several hold: expired wins over expiring wins over low stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Expired,
    Expiring,
    LowStock,
    Good,
}

impl ItemStatus {
    /// Pick the badge from precomputed condition flags, strict priority
    /// expired > expiring > low stock > good
    pub fn from_flags(expired: bool, expiring: bool, low_stock: bool) -> Self {
        if expired {
            ItemStatus::Expired
        } else if expiring {
            ItemStatus::Expiring
        } else if low_stock {
            ItemStatus::LowStock
        } else {
            ItemStatus::Good
        }
    }

    /// Derive the badge from raw cell values against the configured
    /// thresholds, evaluated at today's date
    pub fn evaluate(
        expiry: Option<&DataValue>,
        quantity: Option<&DataValue>,
        thresholds: &StatusThresholds,
    ) -> Self {
        Self::evaluate_at(Local::now().date_naive(), expiry, quantity, thresholds)
    }

    /// Same as evaluate, with an explicit "today" so callers and tests agree
    /// on the clock
    pub fn evaluate_at(
        today: NaiveDate,
        expiry: Option<&DataValue>,
        quantity: Option<&DataValue>,
        thresholds: &StatusThresholds,
    ) -> Self {
        let expiry_date = expiry.and_then(parse_date);
        let qty = quantity.and_then(numeric_quantity);

        let expired = expiry_date.is_some_and(|d| d < today);
        let expiring = expiry_date
            .is_some_and(|d| d >= today && (d - today).num_days() <= thresholds.expiry_warning_days);
        let low_stock = qty.is_some_and(|q| q <= thresholds.low_stock);

        Self::from_flags(expired, expiring, low_stock)
    }

    /// Presentational label, not state
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Expired => "Expired",
            ItemStatus::Expiring => "Expiring",
            ItemStatus::LowStock => "Low Stock",
            ItemStatus::Good => "Good",
        }
    }
}

fn parse_date(value: &DataValue) -> Option<NaiveDate> {
    match value {
        DataValue::Date(s) | DataValue::String(s) => {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

fn numeric_quantity(value: &DataValue) -> Option<i64> {
    match value {
        DataValue::Integer(i) => Some(*i),
        DataValue::Float(f) => Some(*f as i64),
        DataValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_wins_over_everything() {
        assert_eq!(
            ItemStatus::from_flags(true, true, true),
            ItemStatus::Expired
        );
    }

    #[test]
    fn test_expiring_wins_over_low_stock() {
        assert_eq!(
            ItemStatus::from_flags(false, true, true),
            ItemStatus::Expiring
        );
    }

    #[test]
    fn test_low_stock_then_good() {
        assert_eq!(
            ItemStatus::from_flags(false, false, true),
            ItemStatus::LowStock
        );
        assert_eq!(ItemStatus::from_flags(false, false, false), ItemStatus::Good);
    }

    #[test]
    fn test_evaluate_at_thresholds() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let thresholds = StatusThresholds::default();

        let yesterday = DataValue::Date("2026-08-22".to_string());
        let in_two_days = DataValue::Date("2026-08-25".to_string());
        let next_month = DataValue::Date("2026-09-23".to_string());

        assert_eq!(
            ItemStatus::evaluate_at(today, Some(&yesterday), None, &thresholds),
            ItemStatus::Expired
        );
        assert_eq!(
            ItemStatus::evaluate_at(today, Some(&in_two_days), None, &thresholds),
            ItemStatus::Expiring
        );
        assert_eq!(
            ItemStatus::evaluate_at(
                today,
                Some(&next_month),
                Some(&DataValue::Integer(1)),
                &thresholds
            ),
            ItemStatus::LowStock
        );
        assert_eq!(
            ItemStatus::evaluate_at(
                today,
                Some(&next_month),
                Some(&DataValue::Integer(10)),
                &thresholds
            ),
            ItemStatus::Good
        );
    }

    #[test]
    fn test_unparseable_fields_are_ignored() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let thresholds = StatusThresholds::default();
        assert_eq!(
            ItemStatus::evaluate_at(
                today,
                Some(&DataValue::String("soon".to_string())),
                Some(&DataValue::Null),
                &thresholds
            ),
            ItemStatus::Good
        );
    }
}
