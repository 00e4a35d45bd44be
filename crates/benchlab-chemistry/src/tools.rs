//! Lab tool definitions and registry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Rgb;

/// Every tool that can be spawned onto the bench
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Flask,
    Beaker,
    TestTube,
    Cylinder,
    Petri,
    Rod,
    Spatula,
    Dropper,
    Burner,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Flask,
        ToolKind::Beaker,
        ToolKind::TestTube,
        ToolKind::Cylinder,
        ToolKind::Petri,
        ToolKind::Rod,
        ToolKind::Spatula,
        ToolKind::Dropper,
        ToolKind::Burner,
    ];

    /// Stable identifier used by the toolbar and scenario files
    pub fn id(&self) -> &'static str {
        match self {
            ToolKind::Flask => "flask",
            ToolKind::Beaker => "beaker",
            ToolKind::TestTube => "test_tube",
            ToolKind::Cylinder => "cylinder",
            ToolKind::Petri => "petri",
            ToolKind::Rod => "rod",
            ToolKind::Spatula => "spatula",
            ToolKind::Dropper => "dropper",
            ToolKind::Burner => "burner",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a tool identifier does not name a known tool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool '{0}'")]
pub struct ParseToolKindError(pub String);

impl FromStr for ToolKind {
    type Err = ParseToolKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ToolKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == needle)
            .ok_or_else(|| ParseToolKindError(s.to_string()))
    }
}

/// Liquid a container starts with when spawned
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiquidDef {
    pub color: Rgb,
    pub volume: f32,
}

/// Static properties of a tool kind
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolDef {
    pub kind: ToolKind,
    /// Human-readable name (toolbar label)
    pub name: String,
    /// Starting liquid (None = not a container)
    pub liquid: Option<LiquidDef>,
    /// Follows the hand's orientation while held
    pub rotatable: bool,
    /// Can claim a reaction slot (burners sit beneath slots instead)
    pub occupies_slots: bool,
    /// Render scale relative to the base tool size
    pub scale: f32,
}

impl ToolDef {
    fn new(kind: ToolKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            liquid: None,
            rotatable: false,
            occupies_slots: true,
            scale: 1.0,
        }
    }

    pub fn is_container(&self) -> bool {
        self.liquid.is_some()
    }
}

/// Registry of all tool definitions, indexed by `ToolKind`
pub struct Tools {
    defs: Vec<ToolDef>,
}

impl Tools {
    pub fn new() -> Self {
        let mut tools = Self { defs: Vec::new() };
        tools.register_defaults();
        tools
    }

    fn register_defaults(&mut self) {
        self.register(ToolDef {
            liquid: Some(LiquidDef {
                color: Rgb::new(0.0, 120.0, 255.0),
                volume: 300.0,
            }),
            rotatable: true,
            ..ToolDef::new(ToolKind::Flask, "Flask")
        });

        self.register(ToolDef {
            liquid: Some(LiquidDef {
                color: Rgb::new(235.0, 225.0, 90.0),
                volume: 250.0,
            }),
            scale: 0.9,
            ..ToolDef::new(ToolKind::Beaker, "Beaker")
        });

        self.register(ToolDef {
            liquid: Some(LiquidDef {
                color: Rgb::new(220.0, 70.0, 70.0),
                volume: 120.0,
            }),
            rotatable: true,
            scale: 0.7,
            ..ToolDef::new(ToolKind::TestTube, "Test Tube")
        });

        self.register(ToolDef {
            liquid: Some(LiquidDef {
                color: Rgb::new(150.0, 220.0, 255.0),
                volume: 200.0,
            }),
            ..ToolDef::new(ToolKind::Cylinder, "Cylinder")
        });

        self.register(ToolDef::new(ToolKind::Petri, "Petri Dish"));
        self.register(ToolDef::new(ToolKind::Rod, "Glass Rod"));
        self.register(ToolDef::new(ToolKind::Spatula, "Spatula"));

        self.register(ToolDef {
            liquid: Some(LiquidDef {
                color: Rgb::new(170.0, 90.0, 220.0),
                volume: 40.0,
            }),
            rotatable: true,
            scale: 0.5,
            ..ToolDef::new(ToolKind::Dropper, "Dropper")
        });

        self.register(ToolDef {
            occupies_slots: false,
            ..ToolDef::new(ToolKind::Burner, "Burner")
        });
    }

    /// Register or replace a tool definition
    pub fn register(&mut self, def: ToolDef) {
        if let Some(existing) = self.defs.iter_mut().find(|d| d.kind == def.kind) {
            *existing = def;
        } else {
            self.defs.push(def);
            self.defs.sort_by_key(|d| d.kind);
        }
    }

    pub fn get(&self, kind: ToolKind) -> &ToolDef {
        // Every kind is registered in register_defaults and entries are never removed
        &self.defs[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDef> {
        self.defs.iter()
    }
}

impl Default for Tools {
    fn default() -> Self {
        Self::new()
    }
}
