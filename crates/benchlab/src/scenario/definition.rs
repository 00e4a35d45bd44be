//! Scenario definition and RON file loading

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::actions::ScenarioAction;
use super::verification::VerificationCondition;

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    pub description: String,

    /// Camera frame size; the runner's configured size when absent
    #[serde(default)]
    pub frame_size: Option<Vec2>,

    /// Initial setup actions (run before main scenario)
    #[serde(default)]
    pub setup: Vec<ScenarioAction>,

    /// Main scenario actions
    pub actions: Vec<ScenarioAction>,

    /// Verification checks to run after scenario
    #[serde(default)]
    pub verify: Vec<VerificationCondition>,

    /// Cleanup actions (run even if scenario fails)
    #[serde(default)]
    pub cleanup: Vec<ScenarioAction>,
}

impl ScenarioDefinition {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))?;

        Ok(scenario)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchlab_core::HandLabel;
    use benchlab_core::chemistry::ToolKind;

    #[test]
    fn test_scenario_serialization() {
        let scenario = ScenarioDefinition {
            name: "Test Scenario".to_string(),
            description: "A test scenario".to_string(),
            frame_size: Some(Vec2::new(1280.0, 720.0)),
            setup: vec![ScenarioAction::SpawnTool {
                tool: ToolKind::Flask,
                x: 420.0,
                y: 300.0,
            }],
            actions: vec![
                ScenarioAction::Hand {
                    hand: HandLabel::Right,
                    x: 420.0,
                    y: 300.0,
                    pinch: true,
                    angle: 0.0,
                    frames: 10,
                },
                ScenarioAction::Log {
                    message: "Test message".to_string(),
                },
            ],
            verify: vec![VerificationCondition::ObjectGrabbed {
                object: 0,
                expected: true,
            }],
            cleanup: vec![],
        };

        // Test RON serialization
        let ron = ron::ser::to_string_pretty(&scenario, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron.contains("Test Scenario"));
        assert!(ron.contains("SpawnTool"));

        // Test round-trip
        let deserialized: ScenarioDefinition = ron::from_str(&ron).unwrap();
        assert_eq!(deserialized.name, scenario.name);
        assert_eq!(deserialized.actions.len(), scenario.actions.len());
        assert_eq!(deserialized.frame_size, scenario.frame_size);
    }

    #[test]
    fn test_optional_sections_default() {
        let scenario: ScenarioDefinition = ron::from_str(
            r#"(
                name: "Minimal",
                description: "Only actions",
                actions: [WaitFrames(frames: 5), HideHand(hand: Left)],
            )"#,
        )
        .unwrap();
        assert!(scenario.frame_size.is_none());
        assert!(scenario.setup.is_empty());
        assert!(scenario.verify.is_empty());
        assert_eq!(scenario.actions.len(), 2);
    }

    #[test]
    fn test_bundled_scenarios_parse() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios");
        let mut parsed = 0;
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                ScenarioDefinition::from_file(&path).unwrap();
                parsed += 1;
            }
        }
        assert!(parsed > 0, "no scenarios found in {}", dir.display());
    }
}
