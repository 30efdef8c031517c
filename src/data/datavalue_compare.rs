use crate::data::datatable::DataValue;
use std::cmp::Ordering;

/// Compare two cell values with the numeric-first policy used for column
/// sorting: if both cells can be read as numbers they compare numerically,
/// otherwise they compare as display strings. Null sorts before everything.
///
/// Centralized here so the view and the tests agree on one comparator.
pub fn compare_cells(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        (DataValue::Null, DataValue::Null) => Ordering::Equal,
        (DataValue::Null, _) => Ordering::Less,
        (_, DataValue::Null) => Ordering::Greater,
        _ => match (numeric_reading(a), numeric_reading(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

/// Numeric reading of a cell, if it has one. String cells count when their
/// text parses as a number, so "10" in a text column still sorts after "9".
fn numeric_reading(value: &DataValue) -> Option<f64> {
    match value {
        DataValue::Integer(i) => Some(*i as f64),
        DataValue::Float(f) => Some(*f),
        DataValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_comparison() {
        assert_eq!(
            compare_cells(&DataValue::Integer(1), &DataValue::Integer(2)),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&DataValue::Integer(2), &DataValue::Integer(2)),
            Ordering::Equal
        );
        assert_eq!(
            compare_cells(&DataValue::Integer(3), &DataValue::Integer(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_numeric_strings_compare_numerically() {
        // "9" < "10" numerically even though "10" < "9" lexicographically
        assert_eq!(
            compare_cells(
                &DataValue::String("9".to_string()),
                &DataValue::String("10".to_string())
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_mixed_integer_float() {
        assert_eq!(
            compare_cells(&DataValue::Integer(2), &DataValue::Float(1.5)),
            Ordering::Greater
        );
        assert_eq!(
            compare_cells(&DataValue::Float(1.5), &DataValue::String("2".to_string())),
            Ordering::Less
        );
    }

    #[test]
    fn test_string_comparison() {
        assert_eq!(
            compare_cells(
                &DataValue::String("apple".to_string()),
                &DataValue::String("banana".to_string())
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(
            compare_cells(&DataValue::Null, &DataValue::Integer(1)),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&DataValue::Integer(1), &DataValue::Null),
            Ordering::Greater
        );
        assert_eq!(compare_cells(&DataValue::Null, &DataValue::Null), Ordering::Equal);
    }
}
