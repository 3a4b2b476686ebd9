use serde::Deserialize;

/// Printer options. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Text emitted once per nesting level.
    #[serde(alias = "indentUnit")]
    pub indent_unit: String,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
        }
    }
}

impl PrinterConfig {
    pub fn with_indent(indent_unit: impl Into<String>) -> Self {
        Self {
            indent_unit: indent_unit.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_four_spaces() {
        assert_eq!(PrinterConfig::default().indent_unit, "    ");
    }

    #[test]
    fn test_from_json() {
        let config = PrinterConfig::from_json(r#"{"indent_unit": "\t"}"#).unwrap();
        assert_eq!(config, PrinterConfig::with_indent("\t"));

        let config = PrinterConfig::from_json(r#"{"indentUnit": "  "}"#).unwrap();
        assert_eq!(config.indent_unit, "  ");

        let config = PrinterConfig::from_json("{}").unwrap();
        assert_eq!(config, PrinterConfig::default());

        assert!(PrinterConfig::from_json(r#"{"indent_unit": 2}"#).is_err());
    }
}
