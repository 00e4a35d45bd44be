//! Reaction recipes
//!
//! A recipe maps an unordered pair of reagent sources (the tools that poured
//! liquid into a slot) to a named outcome. Lookup is a pure function of the
//! set of contributing sources, so pour order never matters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::{Rgb, ToolKind};

/// Outcome of heating a mix of reagents
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name
    pub name: String,
    /// Color the slot contents blend toward while reacting
    pub result_color: Rgb,
    /// Gas emission rate (smoke particles per second, before scaling)
    pub gas_rate: f32,
}

/// Recipe keyed by the pair of reagents that produces it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub reagents: (ToolKind, ToolKind),
    pub recipe: Recipe,
}

/// Serializable form of a recipe table (for RON files)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipeTable {
    pub entries: Vec<RecipeEntry>,
    pub fallback: Recipe,
}

#[derive(Debug, Error)]
pub enum RecipeTableError {
    #[error("failed to parse recipe table: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("recipe '{0}' pairs a reagent with itself")]
    SelfPair(String),
}

/// Registry of recipes, scanned in registration order
///
/// When the contributing sources are a superset of several pairs, the
/// earliest registered pair wins.
pub struct RecipeRegistry {
    entries: Vec<RecipeEntry>,
    fallback: Recipe,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            fallback: Recipe {
                name: "Generic Heated Mix".to_string(),
                result_color: Rgb::new(180.0, 180.0, 255.0),
                gas_rate: 2.0,
            },
        };
        registry.register_default_recipes();
        registry
    }

    fn register_default_recipes(&mut self) {
        // Flask + Beaker → Neutralization
        self.register(
            ToolKind::Flask,
            ToolKind::Beaker,
            Recipe {
                name: "Neutralization".to_string(),
                result_color: Rgb::new(120.0, 220.0, 120.0),
                gas_rate: 5.0,
            },
        );

        // Flask + Test Tube → Precipitation
        self.register(
            ToolKind::Flask,
            ToolKind::TestTube,
            Recipe {
                name: "Precipitation".to_string(),
                result_color: Rgb::new(245.0, 210.0, 90.0),
                gas_rate: 3.0,
            },
        );

        // Beaker + Test Tube → Complex Formation
        self.register(
            ToolKind::Beaker,
            ToolKind::TestTube,
            Recipe {
                name: "Complex Formation".to_string(),
                result_color: Rgb::new(185.0, 110.0, 235.0),
                gas_rate: 4.0,
            },
        );
    }

    /// Build a registry from a RON recipe table, replacing the defaults
    pub fn from_ron_str(source: &str) -> Result<Self, RecipeTableError> {
        let table: RecipeTable = ron::from_str(source)?;
        Self::from_table(table)
    }

    pub fn from_table(table: RecipeTable) -> Result<Self, RecipeTableError> {
        let mut registry = Self {
            entries: Vec::with_capacity(table.entries.len()),
            fallback: table.fallback,
        };
        for entry in table.entries {
            if entry.reagents.0 == entry.reagents.1 {
                return Err(RecipeTableError::SelfPair(entry.recipe.name));
            }
            registry.register(entry.reagents.0, entry.reagents.1, entry.recipe);
        }
        Ok(registry)
    }

    pub fn to_table(&self) -> RecipeTable {
        RecipeTable {
            entries: self.entries.clone(),
            fallback: self.fallback.clone(),
        }
    }

    /// Register a recipe for an unordered reagent pair
    ///
    /// Re-registering a pair replaces its recipe but keeps its priority.
    pub fn register(&mut self, a: ToolKind, b: ToolKind, recipe: Recipe) {
        let reagents = if a <= b { (a, b) } else { (b, a) };
        if let Some(existing) = self.entries.iter_mut().find(|e| e.reagents == reagents) {
            existing.recipe = recipe;
        } else {
            self.entries.push(RecipeEntry { reagents, recipe });
        }
    }

    /// Select the recipe for a set of contributing reagent sources
    ///
    /// Returns None with fewer than two distinct sources, the first
    /// registered pair contained in the set, or the generic fallback.
    pub fn select(&self, sources: &BTreeSet<ToolKind>) -> Option<&Recipe> {
        if sources.len() < 2 {
            return None;
        }

        let matched = self
            .entries
            .iter()
            .find(|e| sources.contains(&e.reagents.0) && sources.contains(&e.reagents.1))
            .map(|e| &e.recipe);

        Some(matched.unwrap_or(&self.fallback))
    }

    /// Select from (source, volume) pairs, ignoring sources that never
    /// contributed a positive volume
    pub fn select_from_contributions<I>(&self, contributions: I) -> Option<&Recipe>
    where
        I: IntoIterator<Item = (ToolKind, f32)>,
    {
        let sources: BTreeSet<ToolKind> = contributions
            .into_iter()
            .filter(|(_, volume)| *volume > 0.0)
            .map(|(source, _)| source)
            .collect();
        self.select(&sources)
    }

    pub fn fallback(&self) -> &Recipe {
        &self.fallback
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(kinds: &[ToolKind]) -> BTreeSet<ToolKind> {
        kinds.iter().copied().collect()
    }

    #[test]
    fn test_requires_two_sources() {
        let registry = RecipeRegistry::new();
        assert!(registry.select(&set(&[])).is_none());
        assert!(registry.select(&set(&[ToolKind::Flask])).is_none());
    }

    #[test]
    fn test_named_recipes() {
        let registry = RecipeRegistry::new();
        let name = |kinds: &[ToolKind]| registry.select(&set(kinds)).map(|r| r.name.clone());

        assert_eq!(
            name(&[ToolKind::Flask, ToolKind::Beaker]).as_deref(),
            Some("Neutralization")
        );
        assert_eq!(
            name(&[ToolKind::TestTube, ToolKind::Flask]).as_deref(),
            Some("Precipitation")
        );
        assert_eq!(
            name(&[ToolKind::Beaker, ToolKind::TestTube]).as_deref(),
            Some("Complex Formation")
        );
    }

    #[test]
    fn test_unmatched_pair_falls_back() {
        let registry = RecipeRegistry::new();
        let recipe = registry
            .select(&set(&[ToolKind::Cylinder, ToolKind::Dropper]))
            .unwrap();
        assert_eq!(recipe.name, "Generic Heated Mix");
    }

    #[test]
    fn test_superset_picks_first_registered_pair() {
        let registry = RecipeRegistry::new();
        let recipe = registry
            .select(&set(&[ToolKind::TestTube, ToolKind::Beaker, ToolKind::Flask]))
            .unwrap();
        assert_eq!(recipe.name, "Neutralization");
    }

    #[test]
    fn test_contributions_ignore_empty_volume() {
        let registry = RecipeRegistry::new();
        let recipe =
            registry.select_from_contributions([(ToolKind::Flask, 60.0), (ToolKind::Beaker, 0.0)]);
        assert!(recipe.is_none());

        let recipe = registry.select_from_contributions([
            (ToolKind::Flask, 60.0),
            (ToolKind::Flask, 30.0),
            (ToolKind::Flask, 10.0),
        ]);
        assert!(recipe.is_none(), "repeats of one source are still one reagent");
    }

    #[test]
    fn test_register_normalizes_pair_order() {
        let mut registry = RecipeRegistry::new();
        registry.register(
            ToolKind::Beaker,
            ToolKind::Flask,
            Recipe {
                name: "Salt Bath".to_string(),
                result_color: Rgb::WHITE,
                gas_rate: 1.0,
            },
        );
        assert_eq!(registry.len(), 3);
        let recipe = registry
            .select(&set(&[ToolKind::Flask, ToolKind::Beaker]))
            .unwrap();
        assert_eq!(recipe.name, "Salt Bath");
    }

    #[test]
    fn test_ron_table_round_trip() {
        let registry = RecipeRegistry::new();
        let ron = ron::ser::to_string_pretty(&registry.to_table(), Default::default()).unwrap();
        let loaded = RecipeRegistry::from_ron_str(&ron).unwrap();
        assert_eq!(loaded.len(), registry.len());
        assert_eq!(loaded.fallback().name, "Generic Heated Mix");
    }

    #[test]
    fn test_ron_table_rejects_self_pair() {
        let table = RecipeTable {
            entries: vec![RecipeEntry {
                reagents: (ToolKind::Flask, ToolKind::Flask),
                recipe: Recipe {
                    name: "Nothing".to_string(),
                    result_color: Rgb::WHITE,
                    gas_rate: 0.0,
                },
            }],
            fallback: RecipeRegistry::new().fallback().clone(),
        };
        assert!(matches!(
            RecipeRegistry::from_table(table),
            Err(RecipeTableError::SelfPair(_))
        ));
    }
}
