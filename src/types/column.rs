use serde::{Deserialize, Serialize};

/// A declared grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Property of each row's data object shown in this column
    pub column_data_key: String,
    /// CSS grid column the cell is placed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_column: Option<String>,
    /// Header text; falls back to the data key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ColumnDefinition {
    pub fn new(column_data_key: impl Into<String>) -> Self {
        Self {
            column_data_key: column_data_key.into(),
            grid_column: None,
            title: None,
        }
    }

    /// Text for a generated header cell.
    pub fn header_text(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.column_data_key)
    }
}

/// Whether the grid generates its own header row, and of which kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateHeaderOptions {
    None,
    #[default]
    Default,
    Sticky,
}

impl GenerateHeaderOptions {
    /// Parse the `generate-header` attribute value.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "default" => Some(Self::Default),
            "sticky" => Some(Self::Sticky),
            _ => None,
        }
    }

    /// Row type of the header this option generates, if any.
    pub fn header_row_type(self) -> Option<RowType> {
        match self {
            Self::None => None,
            Self::Default => Some(RowType::Header),
            Self::Sticky => Some(RowType::StickyHeader),
        }
    }
}

/// Kind of row inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowType {
    #[default]
    Default,
    Header,
    StickyHeader,
}

impl RowType {
    /// CSS class the row carries for styling.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Header => Some("header"),
            Self::StickyHeader => Some("sticky-header"),
        }
    }

    pub fn is_header(self) -> bool {
        !matches!(self, Self::Default)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_column_definition_json_shape() {
        let def: ColumnDefinition =
            serde_json::from_str(r#"{"columnDataKey":"symbol","gridColumn":"2"}"#).unwrap();
        assert_eq!(def.column_data_key, "symbol");
        assert_eq!(def.grid_column.as_deref(), Some("2"));
        assert_eq!(def.header_text(), "symbol");

        let json = serde_json::to_string(&ColumnDefinition::new("mass")).unwrap();
        assert_eq!(json, r#"{"columnDataKey":"mass"}"#);
    }

    #[test]
    fn test_generate_header_attr() {
        assert_eq!(
            GenerateHeaderOptions::from_attr("sticky"),
            Some(GenerateHeaderOptions::Sticky)
        );
        assert_eq!(GenerateHeaderOptions::from_attr("bogus"), None);
        assert_eq!(GenerateHeaderOptions::default(), GenerateHeaderOptions::Default);
        assert_eq!(GenerateHeaderOptions::None.header_row_type(), None);
        assert_eq!(
            GenerateHeaderOptions::Sticky.header_row_type(),
            Some(RowType::StickyHeader)
        );
    }

    #[test]
    fn test_row_type_classes() {
        assert_eq!(RowType::StickyHeader.css_class(), Some("sticky-header"));
        assert_eq!(RowType::Default.css_class(), None);
        assert!(RowType::Header.is_header());
        assert!(!RowType::Default.is_header());
    }
}
