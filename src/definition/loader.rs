//! Load stack definitions from JSON

use super::Definition;
use crate::error::{PricingError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default location of the definitions file
pub const DEFAULT_DEFINITIONS_PATH: &str = "data/definitions.json";

#[derive(Debug, Deserialize)]
struct DefinitionFile {
    definitions: Vec<Definition>,
}

/// Load and validate every definition in a JSON file
pub fn load_definitions<P: AsRef<Path>>(path: P) -> Result<Vec<Definition>> {
    let file = File::open(path)?;
    load_definitions_from_reader(BufReader::new(file))
}

/// Load definitions from any reader (e.g., string buffer)
pub fn load_definitions_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Definition>> {
    let file: DefinitionFile = serde_json::from_reader(reader)?;

    let mut names = HashSet::new();
    for definition in &file.definitions {
        definition.validate()?;
        if !names.insert(definition.name.as_str()) {
            return Err(PricingError::invalid(format!(
                "definition '{}' appears twice",
                definition.name
            )));
        }
    }

    Ok(file.definitions)
}

/// Load definitions from the default location
pub fn load_default_definitions() -> Result<Vec<Definition>> {
    load_definitions(DEFAULT_DEFINITIONS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_definitions() {
        let definitions = load_default_definitions().expect("Failed to load definitions");
        assert_eq!(definitions.len(), 2);

        let on_demand = &definitions[0];
        assert_eq!(on_demand.name, "All On-Demand");
        assert_eq!(on_demand.services.len(), 3);
        assert_eq!(on_demand.services[0].resources[0].quantity, 2);
    }

    #[test]
    fn test_defaults_applied() {
        let json = r#"{"definitions": [
            {"name": "Tiny", "services": [
                {"name": "AmazonEC2", "resources": [{"name": "t3.micro"}]}
            ]}
        ]}"#;
        let definitions = load_definitions_from_reader(json.as_bytes()).unwrap();
        let resource = &definitions[0].services[0].resources[0];

        assert_eq!(resource.quantity, 1);
        assert_eq!(resource.sku(), "t3.micro");
    }

    #[test]
    fn test_duplicate_definitions_rejected() {
        let json = r#"{"definitions": [{"name": "A"}, {"name": "A"}]}"#;
        let err = load_definitions_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = load_definitions_from_reader("{\"definitions\": 3}".as_bytes()).unwrap_err();
        assert!(matches!(err, PricingError::Json(_)));
    }
}
