//! Verification conditions and state checks for scenarios

use benchlab_core::chemistry::ToolKind;
use benchlab_core::{Lab, ObjectId};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Conditions that can be verified against lab state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationCondition {
    // === SLOT CHECKS ===
    /// Assert a slot is reacting, optionally with a given recipe
    ReactionActive {
        slot: usize,
        #[serde(default)]
        name: Option<String>,
    },

    /// Assert a slot is not reacting
    NoReaction { slot: usize },

    /// Assert something (or a specific object) rests in a slot
    SlotOccupied {
        slot: usize,
        #[serde(default)]
        object: Option<usize>,
    },

    /// Assert nothing rests in a slot
    SlotEmpty { slot: usize },

    /// Assert the exact set of tools that poured into a slot
    SlotSources { slot: usize, sources: Vec<ToolKind> },

    // === OBJECT CHECKS ===
    /// Assert a container's liquid volume (with tolerance)
    ObjectVolume {
        object: usize,
        expected: f32,
        tolerance: f32,
    },

    /// Assert whether an object is held
    ObjectGrabbed { object: usize, expected: bool },

    /// Assert object position (with tolerance)
    ObjectNear {
        object: usize,
        x: f32,
        y: f32,
        tolerance: f32,
    },

    // === PARTICLES ===
    ParticlesAtLeast { count: usize },

    // === COMPOSITE CONDITIONS ===
    /// All conditions must pass
    All {
        conditions: Vec<VerificationCondition>,
    },

    /// At least one condition must pass
    Any {
        conditions: Vec<VerificationCondition>,
    },

    /// Condition must fail
    Not {
        condition: Box<VerificationCondition>,
    },
}

/// Result of a verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>,
}

impl VerificationResult {
    fn missing(what: &str, index: usize) -> Self {
        Self {
            passed: false,
            message: format!("{} {} does not exist", what, index),
            actual_value: None,
        }
    }
}

impl VerificationCondition {
    /// Evaluate condition against lab state
    pub fn evaluate(&self, lab: &Lab) -> VerificationResult {
        match self {
            VerificationCondition::ReactionActive { slot, name } => {
                let Some(s) = lab.slot(*slot) else {
                    return VerificationResult::missing("Slot", *slot);
                };
                let actual = s.reaction_name();
                let passed = match (actual, name) {
                    (Some(actual), Some(expected)) => actual == expected.as_str(),
                    (Some(_), None) => true,
                    (None, _) => false,
                };

                VerificationResult {
                    passed,
                    message: format!(
                        "Reaction in slot {}: expected {}, got {:?}",
                        slot,
                        name.as_deref().unwrap_or("any"),
                        actual
                    ),
                    actual_value: actual.map(str::to_string),
                }
            }

            VerificationCondition::NoReaction { slot } => {
                let Some(s) = lab.slot(*slot) else {
                    return VerificationResult::missing("Slot", *slot);
                };
                let actual = s.reaction_name();

                VerificationResult {
                    passed: actual.is_none(),
                    message: format!("No reaction in slot {}: got {:?}", slot, actual),
                    actual_value: actual.map(str::to_string),
                }
            }

            VerificationCondition::SlotOccupied { slot, object } => {
                let Some(s) = lab.slot(*slot) else {
                    return VerificationResult::missing("Slot", *slot);
                };
                let passed = match (s.occupied_by, object) {
                    (Some(actual), Some(expected)) => actual == ObjectId(*expected),
                    (Some(_), None) => true,
                    (None, _) => false,
                };

                VerificationResult {
                    passed,
                    message: format!(
                        "Slot {} occupied: expected {}, got {:?}",
                        slot,
                        object.map_or("any object".to_string(), |o| format!("object {}", o)),
                        s.occupied_by.map(|id| id.index())
                    ),
                    actual_value: s.occupied_by.map(|id| id.index().to_string()),
                }
            }

            VerificationCondition::SlotEmpty { slot } => {
                let Some(s) = lab.slot(*slot) else {
                    return VerificationResult::missing("Slot", *slot);
                };

                VerificationResult {
                    passed: s.occupied_by.is_none(),
                    message: format!(
                        "Slot {} empty: got {:?}",
                        slot,
                        s.occupied_by.map(|id| id.index())
                    ),
                    actual_value: s.occupied_by.map(|id| id.index().to_string()),
                }
            }

            VerificationCondition::SlotSources { slot, sources } => {
                let Some(s) = lab.slot(*slot) else {
                    return VerificationResult::missing("Slot", *slot);
                };
                let expected: BTreeSet<ToolKind> = sources.iter().copied().collect();
                let actual = s.sources();

                VerificationResult {
                    passed: actual == expected,
                    message: format!(
                        "Slot {} sources: expected {:?}, got {:?}",
                        slot, expected, actual
                    ),
                    actual_value: Some(format!("{:?}", actual)),
                }
            }

            VerificationCondition::ObjectVolume {
                object,
                expected,
                tolerance,
            } => {
                let Some(obj) = lab.object(ObjectId(*object)) else {
                    return VerificationResult::missing("Object", *object);
                };
                let Some(liquid) = obj.liquid() else {
                    return VerificationResult {
                        passed: false,
                        message: format!("Object {} ({}) holds no liquid", object, obj.kind),
                        actual_value: None,
                    };
                };
                let passed = (liquid.volume - expected).abs() <= *tolerance;

                VerificationResult {
                    passed,
                    message: format!(
                        "Object {} volume: expected {:.1}±{:.1}, got {:.1}",
                        object, expected, tolerance, liquid.volume
                    ),
                    actual_value: Some(format!("{:.1}", liquid.volume)),
                }
            }

            VerificationCondition::ObjectGrabbed { object, expected } => {
                let Some(obj) = lab.object(ObjectId(*object)) else {
                    return VerificationResult::missing("Object", *object);
                };
                let actual = obj.is_grabbed();

                VerificationResult {
                    passed: actual == *expected,
                    message: format!(
                        "Object {} grabbed: expected {}, got {}",
                        object, expected, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::ObjectNear {
                object,
                x,
                y,
                tolerance,
            } => {
                let Some(obj) = lab.object(ObjectId(*object)) else {
                    return VerificationResult::missing("Object", *object);
                };
                let distance = obj.position.distance(Vec2::new(*x, *y));

                VerificationResult {
                    passed: distance <= *tolerance,
                    message: format!(
                        "Object {} position: expected ({:.1}, {:.1})±{:.1}, got ({:.1}, {:.1})",
                        object, x, y, tolerance, obj.position.x, obj.position.y
                    ),
                    actual_value: Some(format!("({:.1}, {:.1})", obj.position.x, obj.position.y)),
                }
            }

            VerificationCondition::ParticlesAtLeast { count } => {
                let actual = lab.particles().len();

                VerificationResult {
                    passed: actual >= *count,
                    message: format!("Particles: expected at least {}, got {}", count, actual),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::All { conditions } => {
                let mut all_passed = true;
                let mut messages = Vec::new();

                for cond in conditions {
                    let result = cond.evaluate(lab);
                    if !result.passed {
                        all_passed = false;
                    }
                    messages.push(format!("  - {}", result.message));
                }

                VerificationResult {
                    passed: all_passed,
                    message: format!("All conditions:\n{}", messages.join("\n")),
                    actual_value: None,
                }
            }

            VerificationCondition::Any { conditions } => {
                let mut any_passed = false;
                let mut messages = Vec::new();

                for cond in conditions {
                    let result = cond.evaluate(lab);
                    if result.passed {
                        any_passed = true;
                    }
                    messages.push(format!("  - {}", result.message));
                }

                VerificationResult {
                    passed: any_passed,
                    message: format!("Any condition:\n{}", messages.join("\n")),
                    actual_value: None,
                }
            }

            VerificationCondition::Not { condition } => {
                let result = condition.evaluate(lab);
                VerificationResult {
                    passed: !result.passed,
                    message: format!("NOT ({})", result.message),
                    actual_value: result.actual_value,
                }
            }
        }
    }
}
