//! Unit catalog - ordered list of templates the planners buy from

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::battle::unit_type::UnitTemplate;
use crate::core::error::{BattleError, Result};

/// Ordered, read-only collection of unit templates
///
/// File order is catalog order. The preset planner relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitCatalog {
    #[serde(rename = "units")]
    templates: Vec<UnitTemplate>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from templates, rejecting zero-cost entries
    pub fn from_templates(templates: Vec<UnitTemplate>) -> Result<Self> {
        let mut catalog = Self::new();
        for template in templates {
            catalog.add(template)?;
        }
        Ok(catalog)
    }

    /// Add a template to the end of the catalog
    pub fn add(&mut self, template: UnitTemplate) -> Result<()> {
        if template.cost == 0 {
            return Err(BattleError::Catalog(format!(
                "template '{}' has zero cost",
                template.name
            )));
        }
        self.templates.push(template);
        Ok(())
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&UnitTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// All templates, in catalog order
    pub fn templates(&self) -> &[UnitTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string of `[[units]]` tables
    pub fn parse_toml(content: &str) -> Result<Self> {
        let raw: UnitCatalog = toml::from_str(content)?;
        Self::from_templates(raw.templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::unit_type::AttackType;

    const SAMPLE: &str = r#"
[[units]]
name = "Knight"
unit_type = "Knight"
health = 60
base_attack = 35
cost = 30
attack_type = "melee"

[units.attack_bonuses]
Archer = 1.5

[[units]]
name = "Archer"
unit_type = "Archer"
health = 30
base_attack = 25
cost = 15
attack_type = "ranged"
"#;

    #[test]
    fn test_parse_keeps_file_order() {
        let catalog = UnitCatalog::parse_toml(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.templates()[0].name, "Knight");
        assert_eq!(catalog.templates()[1].name, "Archer");
    }

    #[test]
    fn test_parse_reads_tables() {
        let catalog = UnitCatalog::parse_toml(SAMPLE).unwrap();
        let knight = catalog.get("Knight").unwrap();
        assert_eq!(knight.attack_bonuses.get("Archer"), Some(&1.5));
        assert!(knight.defence_bonuses.is_empty());
        assert_eq!(catalog.get("Archer").unwrap().attack_type, AttackType::Ranged);
    }

    #[test]
    fn test_zero_cost_rejected() {
        let result = UnitCatalog::from_templates(vec![UnitTemplate::new("Free", "Free", 1, 1, 0)]);
        assert!(matches!(result, Err(BattleError::Catalog(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            UnitCatalog::parse_toml("[[units]]\nname = 3"),
            Err(BattleError::Toml(_))
        ));
    }
}
