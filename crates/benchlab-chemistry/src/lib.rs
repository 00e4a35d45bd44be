//! Tool and reaction data for benchlab
//!
//! This crate provides the foundational data types for the lab simulation:
//! - Tool definitions (ToolKind, ToolDef, Tools)
//! - Colors (Rgb)
//! - Reaction recipes (Recipe, RecipeRegistry)

mod color;
mod recipes;
mod tools;

pub use color::Rgb;
pub use recipes::{Recipe, RecipeEntry, RecipeRegistry, RecipeTable, RecipeTableError};
pub use tools::{LiquidDef, ParseToolKindError, ToolDef, ToolKind, Tools};
