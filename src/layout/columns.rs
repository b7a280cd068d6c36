//! Column definitions and CSS grid templates derived from them.

use serde_json::Value;

use crate::types::ColumnDefinition;

/// Generate one column per property of a row data object, in property order.
///
/// Anything other than a JSON object yields no columns.
pub fn generate_columns(row: &Value) -> Vec<ColumnDefinition> {
    let Some(object) = row.as_object() else {
        return Vec::new();
    };
    object
        .keys()
        .enumerate()
        .map(|(index, key)| ColumnDefinition {
            column_data_key: key.clone(),
            grid_column: Some(index.to_string()),
            title: None,
        })
        .collect()
}

/// `grid-template-columns` value giving every column an equal share.
pub fn generate_template_columns(columns: &[ColumnDefinition]) -> String {
    vec!["1fr"; columns.len()].join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_columns_in_property_order() {
        let row = json!({"number": 1, "symbol": "H", "mass": 1.008});
        let columns = generate_columns(&row);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].column_data_key, "number");
        assert_eq!(columns[0].grid_column.as_deref(), Some("0"));
        assert_eq!(columns[2].column_data_key, "mass");
        assert_eq!(columns[2].grid_column.as_deref(), Some("2"));
    }

    #[test]
    fn test_generate_columns_non_object() {
        assert!(generate_columns(&json!([1, 2, 3])).is_empty());
        assert!(generate_columns(&Value::Null).is_empty());
    }

    #[test]
    fn test_template_columns() {
        let columns = vec![ColumnDefinition::new("a"), ColumnDefinition::new("b")];
        assert_eq!(generate_template_columns(&columns), "1fr 1fr");
        assert_eq!(generate_template_columns(&[]), "");
    }
}
