// 🏁 Penalty Catalog - Fixed taxonomy of infractions
// Categories group incidents; each incident carries a fixed point value.
// Immutable once constructed: the ledger only ever reads it.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::PenaltyError;

// ============================================================================
// CATALOG ENTRIES
// ============================================================================

/// A named rule violation and its fixed cost in penalty points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub name: String,
    pub points: u32,
}

impl Incident {
    pub fn new(name: String, points: u32) -> Self {
        Incident { name, points }
    }
}

/// A group of related incidents (e.g. "Driving").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub incidents: Vec<Incident>,
}

impl Category {
    pub fn new(name: String, incidents: Vec<Incident>) -> Self {
        Category { name, incidents }
    }
}

// ============================================================================
// PENALTY CATALOG
// ============================================================================

/// The full category → incident → points table.
///
/// Built once at startup, either from the standard table or from a JSON
/// configuration file; no mutation API exists after construction. Incident
/// names are unique across the whole catalog, so a name alone identifies
/// its category and point value.
pub struct PenaltyCatalog {
    categories: Vec<Category>,
}

impl PenaltyCatalog {
    /// The standard race-control table.
    pub fn standard() -> Self {
        PenaltyCatalog {
            categories: vec![
                Category::new(
                    "Contact".to_string(),
                    vec![
                        Incident::new("Minor contact".to_string(), 1),
                        Incident::new("Wreck".to_string(), 4),
                    ],
                ),
                Category::new(
                    "Driving".to_string(),
                    vec![
                        Incident::new("Off-road".to_string(), 1),
                        Incident::new("Corner cut".to_string(), 2),
                        Incident::new("Reckless/endangering driving".to_string(), 3),
                    ],
                ),
                Category::new(
                    "Misbehavior".to_string(),
                    vec![
                        Incident::new("Failure to comply".to_string(), 2),
                        Incident::new("Not listening to EM".to_string(), 4),
                        Incident::new("Disrupting the race".to_string(), 5),
                    ],
                ),
            ],
        }
    }

    /// Build a catalog from explicit categories, checking the taxonomy
    /// invariants: non-empty unique category names, non-empty incident
    /// names unique across the whole catalog, every point value >= 1.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self> {
        let mut seen_categories = HashSet::new();
        let mut seen_incidents = HashSet::new();

        for category in &categories {
            if category.name.trim().is_empty() {
                bail!("category name must not be empty");
            }
            if !seen_categories.insert(category.name.clone()) {
                bail!("duplicate category name: '{}'", category.name);
            }

            for incident in &category.incidents {
                if incident.name.trim().is_empty() {
                    bail!(
                        "incident name must not be empty (category '{}')",
                        category.name
                    );
                }
                if incident.points == 0 {
                    bail!(
                        "incident '{}' must be worth at least 1 penalty point",
                        incident.name
                    );
                }
                if !seen_incidents.insert(incident.name.clone()) {
                    bail!(
                        "incident name '{}' appears more than once; incident names must be unique across the whole catalog",
                        incident.name
                    );
                }
            }
        }

        Ok(PenaltyCatalog { categories })
    }

    /// Load a catalog from a JSON file holding an array of categories.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;

        let categories: Vec<Category> =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        Self::from_categories(categories)
    }

    /// All categories, in configured order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names, in configured order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// The ordered incidents of one category.
    pub fn incidents_in(&self, category: &str) -> Result<&[Incident], PenaltyError> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.incidents.as_slice())
            .ok_or_else(|| PenaltyError::UnknownCategory(category.to_string()))
    }

    /// Look up an incident by name alone; returns its category and points.
    pub fn resolve(&self, incident: &str) -> Result<(&str, u32), PenaltyError> {
        for category in &self.categories {
            if let Some(found) = category.incidents.iter().find(|i| i.name == incident) {
                return Ok((category.name.as_str(), found.points));
            }
        }
        Err(PenaltyError::UnknownIncident(incident.to_string()))
    }

    /// Point value of an incident within a specific category. Fails with
    /// `UnknownCategory` if the category is absent and `UnknownIncident`
    /// if the incident is not listed under it.
    pub fn points_for(&self, category: &str, incident: &str) -> Result<u32, PenaltyError> {
        self.incidents_in(category)?
            .iter()
            .find(|i| i.name == incident)
            .map(|i| i.points)
            .ok_or_else(|| PenaltyError::UnknownIncident(incident.to_string()))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn incident_count(&self) -> usize {
        self.categories.iter().map(|c| c.incidents.len()).sum()
    }
}

impl Default for PenaltyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================
