//! Loader for API request contract definitions (YAML/TOML formats).
//!
//! This crate reads contract definitions from YAML and TOML files, or from a
//! directory of such files, and turns them into a checked
//! [`ContractRegistry`]. It also decodes JSON request bodies into the
//! [`InputRecord`] shape the validator works on.
//!
//! A definition file holds a list of contracts:
//!
//! ```rust
//! use api_contracts_parser::parse_yaml;
//!
//! let yaml = r#"
//! contracts:
//!   - name: banks.create
//!     method: POST
//!     uri: /banks
//!     required:
//!       name: { type: string, min_length: 2, max_length: 100 }
//!       type: { type: enum, options: [PRIVATE, GOVERNMENT] }
//! "#;
//!
//! let set = parse_yaml(yaml).expect("Failed to parse contracts");
//! assert_eq!(set.contracts[0].name, "banks.create");
//! assert_eq!(set.contracts[0].required.len(), 2);
//! ```

use api_contracts_core::{
    Contract, ContractError, ContractRegistry, FieldError, InputRecord, RegistryBuilder,
    record_from_json,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading definitions or decoding input.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON input could not be decoded
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// A directory held no definition files
    #[error("No contract definitions found in {}", .0.display())]
    NoDefinitions(PathBuf),

    /// The loaded contracts failed the registry checks
    #[error("Invalid contract definitions: {0}")]
    ContractError(#[from] ContractError),

    /// The input body is not a JSON object
    #[error("Input must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The input body holds a value outside the scalar domain
    #[error("Invalid input: {0}")]
    InputError(#[from] FieldError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// The contents of one definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractSet {
    /// Contracts in file order
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

/// Parse a set of contracts from a YAML string.
pub fn parse_yaml(content: &str) -> Result<ContractSet> {
    let set: ContractSet = serde_yaml_ng::from_str(content)?;
    Ok(set)
}

/// Parse a set of contracts from a TOML string.
///
/// # Example
///
/// ```rust
/// use api_contracts_parser::parse_toml;
///
/// let toml = r#"
/// [[contracts]]
/// name = "banks.get"
/// method = "GET"
/// uri = "/banks/{id}"
///
/// [contracts.required]
/// id = { type = "int", min_value = 1 }
/// "#;
///
/// let set = parse_toml(toml).unwrap();
/// assert_eq!(set.contracts[0].uri_params(), vec!["id"]);
/// ```
pub fn parse_toml(content: &str) -> Result<ContractSet> {
    let set: ContractSet =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(set)
}

/// Detect the definition format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `ContractFormat::Yaml`
/// * `.toml` → `ContractFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ContractFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ContractFormat::Yaml),
        "toml" => Ok(ContractFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a definition file with automatic format detection.
pub fn parse_file(path: &Path) -> Result<ContractSet> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    let set = match format {
        ContractFormat::Yaml => parse_yaml(&content)?,
        ContractFormat::Toml => parse_toml(&content)?,
    };
    debug!(
        "Parsed {} contracts from {}",
        set.contracts.len(),
        path.display()
    );
    Ok(set)
}

/// Load every contract below `path` without checking them.
///
/// A file is parsed on its own. For a directory, every `.yaml`, `.yml` and
/// `.toml` file directly inside it is parsed in file-name order; other files
/// are skipped.
pub fn load_contracts(path: &Path) -> Result<Vec<Contract>> {
    if !path.is_dir() {
        return Ok(parse_file(path)?.contracts);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let file = entry?.path();
        if file.is_file() && detect_format(&file).is_ok() {
            files.push(file);
        }
    }
    if files.is_empty() {
        return Err(ParserError::NoDefinitions(path.to_path_buf()));
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut contracts = Vec::new();
    for file in &files {
        contracts.extend(parse_file(file)?.contracts);
    }
    Ok(contracts)
}

/// Load contracts from a file or directory and freeze them into a registry.
///
/// # Example
///
/// ```no_run
/// use api_contracts_parser::load_registry;
/// use std::path::Path;
///
/// let registry = load_registry(Path::new("contracts/")).unwrap();
/// println!("Loaded {} operations", registry.len());
/// ```
pub fn load_registry(path: &Path) -> Result<ContractRegistry> {
    let contracts = load_contracts(path)?;
    info!(
        "Loaded {} contract definitions from {}",
        contracts.len(),
        path.display()
    );
    let registry = RegistryBuilder::new().register_all(contracts).build()?;
    Ok(registry)
}

/// Decode a JSON request body into an input record.
///
/// The top level must be an object. Nested arrays and objects are rejected
/// with an `InvalidType` field error naming the offending key.
pub fn parse_input_json(content: &str) -> Result<InputRecord> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    let object = json.as_object().ok_or(ParserError::NotAnObject(json_kind(&json)))?;
    Ok(record_from_json(object)?)
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_contracts_core::{ErrorKind, FieldType, Value};
    use pretty_assertions::assert_eq;
    use std::fs;

    const BANKS_YAML: &str = r#"
contracts:
  - name: banks.create
    method: POST
    uri: /banks
    description: Create a bank
    required:
      name: { type: string, min_length: 2, max_length: 100 }
      type: { type: enum, options: [PRIVATE, GOVERNMENT] }
  - name: banks.get
    method: GET
    uri: /banks/{id}
    required:
      id: { type: int, min_value: 1 }
"#;

    const CREDITS_TOML: &str = r#"
[[contracts]]
name = "credits.create"
method = "POST"
uri = "/credits"

[contracts.required]
client_id = { type = "uuid" }
term_months = { type = "int", min_value = 1, max_value = 360 }

[contracts.optional]
note = { type = "string", max_length = 200 }
"#;

    #[test]
    fn test_parse_yaml_contracts() {
        let set = parse_yaml(BANKS_YAML).expect("Failed to parse YAML");

        assert_eq!(set.contracts.len(), 2);
        let create = &set.contracts[0];
        assert_eq!(create.name, "banks.create");
        assert_eq!(create.method.as_deref(), Some("POST"));
        assert_eq!(create.description.as_deref(), Some("Create a bank"));

        let name = create.field("name").unwrap();
        assert_eq!(name.field_type, FieldType::String);
        assert_eq!(name.length_bounds(), (Some(2), Some(100)));
        assert_eq!(create.field("type").unwrap().options, vec!["PRIVATE", "GOVERNMENT"]);

        let get = &set.contracts[1];
        assert_eq!(get.uri_params(), vec!["id"]);
        assert_eq!(get.field("id").unwrap().min_value, 1.0);
    }

    #[test]
    fn test_parse_toml_contracts() {
        let set = parse_toml(CREDITS_TOML).expect("Failed to parse TOML");

        let create = &set.contracts[0];
        assert_eq!(create.required.len(), 2);
        assert_eq!(create.optional.len(), 1);
        // integer literals are accepted for float bounds
        assert_eq!(
            create.field("term_months").unwrap().value_bounds(),
            (Some(1.0), Some(360.0))
        );
    }

    #[test]
    fn test_unknown_type_tag_parses_as_unsupported() {
        let yaml = r#"
contracts:
  - name: broken
    required:
      amount: { type: decimal }
"#;
        let set = parse_yaml(yaml).unwrap();
        assert_eq!(
            set.contracts[0].field("amount").unwrap().field_type,
            FieldType::Unsupported("decimal".into())
        );
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_yaml("contracts:\n  - name: [unterminated");
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_yaml_missing_type() {
        let yaml = r#"
contracts:
  - name: broken
    required:
      amount: { min_value: 1 }
"#;
        assert!(parse_yaml(yaml).is_err());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_toml("[[[invalid syntax");
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("a.yaml")).unwrap(), ContractFormat::Yaml);
        assert_eq!(detect_format(Path::new("a.YML")).unwrap(), ContractFormat::Yaml);
        assert_eq!(detect_format(Path::new("a.toml")).unwrap(), ContractFormat::Toml);
        assert!(matches!(
            detect_format(Path::new("a.json")).unwrap_err(),
            ParserError::UnsupportedFormat(_)
        ));
        assert!(matches!(
            detect_format(Path::new("contracts")).unwrap_err(),
            ParserError::InvalidExtension
        ));
    }

    #[test]
    fn test_load_registry_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("20-credits.toml"), CREDITS_TOML).unwrap();
        fs::write(dir.path().join("10-banks.yaml"), BANKS_YAML).unwrap();
        fs::write(dir.path().join("README.md"), "not a contract").unwrap();

        let contracts = load_contracts(dir.path()).unwrap();
        let names: Vec<_> = contracts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["banks.create", "banks.get", "credits.create"]);

        let registry = load_registry(dir.path()).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.find("GET", "/banks/{id}").is_some());
    }

    #[test]
    fn test_load_registry_rejects_duplicates_across_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), BANKS_YAML).unwrap();
        fs::write(dir.path().join("b.yml"), BANKS_YAML).unwrap();

        let err = load_registry(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ParserError::ContractError(ContractError::DuplicateOperation(_))
        ));
    }

    #[test]
    fn test_load_registry_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_registry(dir.path()).unwrap_err();
        assert!(matches!(err, ParserError::NoDefinitions(_)));
    }

    #[test]
    fn test_parse_input_json() {
        let input = parse_input_json(r#"{"name": "Test", "age": 30.0, "ok": true, "n": null}"#)
            .unwrap();
        assert_eq!(input["name"], Value::from("Test"));
        assert_eq!(input["age"], Value::Float(30.0));
        assert_eq!(input["ok"], Value::Bool(true));
        assert!(input["n"].is_null());
    }

    #[test]
    fn test_parse_input_json_rejects_non_objects() {
        let err = parse_input_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ParserError::NotAnObject("array")));

        let err = parse_input_json(r#"{"tags": ["a"]}"#).unwrap_err();
        match err {
            ParserError::InputError(field) => {
                assert_eq!(field.kind, ErrorKind::InvalidType);
                assert_eq!(field.field, "tags");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            parse_input_json("{").unwrap_err(),
            ParserError::JsonError(_)
        ));
    }
}
