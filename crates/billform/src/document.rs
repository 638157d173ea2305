//! YAML/JSON document loading shared by rule tables, addresses and scenarios.

use crate::result::{BillformError, BillformResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Document format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// YAML (also accepts most JSON)
    #[default]
    Yaml,
    /// Strict JSON
    Json,
}

impl DocumentFormat {
    /// Pick a format from a file extension; anything but `.json` is YAML
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Parse `text` in this format
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> BillformResult<T> {
        match self {
            Self::Yaml => {
                serde_yaml_ng::from_str(text).map_err(|e| BillformError::yaml(e.to_string()))
            }
            Self::Json => serde_json::from_str(text).map_err(|e| BillformError::json(e.to_string())),
        }
    }
}

/// Read and parse a document, choosing the format from the extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> BillformResult<T> {
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded document");
    DocumentFormat::from_path(path).parse(&text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_parse_errors_are_tagged() {
        let err = DocumentFormat::Json
            .parse::<BTreeMap<String, String>>("{not json")
            .unwrap_err();
        assert!(matches!(err, BillformError::Parse { format: "JSON", .. }));

        let err = DocumentFormat::Yaml
            .parse::<BTreeMap<String, String>>("key: [unclosed")
            .unwrap_err();
        assert!(matches!(err, BillformError::Parse { format: "YAML", .. }));
    }

    #[test]
    fn test_load_document_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"city": "Vienna"}}"#).unwrap();

        let map: BTreeMap<String, String> = load_document(file.path()).unwrap();
        assert_eq!(map.get("city").map(String::as_str), Some("Vienna"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_document::<BTreeMap<String, String>>(Path::new("/nonexistent/rules.yaml"))
            .unwrap_err();
        assert!(matches!(err, BillformError::Io(_)));
    }
}
