//! Reaction system - heating, triggering, color mixing, expiry and glow
//!
//! A slot reacts once it holds liquid from at least two distinct sources,
//! an object rests in it, and a lit burner sits beneath it long enough.

use benchlab_chemistry::{Recipe, RecipeRegistry};
use glam::Vec2;

use super::particles::{ParticleSystem, drain_accumulator};
use super::timing::{REFERENCE_HZ, per_frame_decay, per_frame_ease};
use crate::entity::{ActiveReaction, ContentRecord, Slot, WorldObject};
use crate::lab::{LabRng, LabStats};
use crate::tunables::{ReactionTunables, SlotTunables};

/// Recipe for a slot's contents, if any
///
/// Only records with a positive volume count as contributions, so pour order
/// and repeat pours from one source never matter.
pub fn select_recipe<'a>(contents: &[ContentRecord], recipes: &'a RecipeRegistry) -> Option<&'a Recipe> {
    recipes.select_from_contributions(contents.iter().map(|c| (c.source, c.volume)))
}

/// Start a reaction in `slot` at time `now`
///
/// Returns false (and changes nothing) when a reaction is already running or
/// the contents do not select a recipe.
pub fn trigger_reaction(
    slot: &mut Slot,
    now: f64,
    recipes: &RecipeRegistry,
    tunables: &ReactionTunables,
) -> bool {
    if slot.is_reacting() {
        return false;
    }
    let Some(recipe) = select_recipe(&slot.contents, recipes) else {
        return false;
    };

    slot.reaction = Some(ActiveReaction {
        start: now,
        duration: tunables.duration,
        name: recipe.name.clone(),
        result_color: recipe.result_color,
        gas_rate: recipe.gas_rate,
    });
    slot.reaction_result = Some(recipe.clone());
    slot.gas_accumulator = 0.0;
    slot.set_glow(slot.glow + tunables.glow_trigger_boost);

    log::info!("[REACTION] {} triggered in slot {}", recipe.name, slot.index);
    true
}

/// Move every content color toward the active reaction's result color
pub fn blend_reaction_contents(slot: &mut Slot, mix_strength: f32) {
    let Some(reaction) = &slot.reaction else {
        return;
    };
    let target = reaction.result_color;

    for content in &mut slot.contents {
        content.color = content.color.blend_toward(target, mix_strength);
    }
}

/// Whether a lit burner sits beneath a slot within reach
///
/// Burners are given as (center, half size). A burner counts when it is
/// horizontally aligned, its base is below the slot's middle and its top
/// edge is at most `heat_reach` under the slot's bottom edge. Measuring from
/// edges keeps contact independent of frame size.
pub fn is_heated(
    slot: &Slot,
    burners: &[(Vec2, f32)],
    slot_tunables: &SlotTunables,
    tunables: &ReactionTunables,
) -> bool {
    let half_width = slot_tunables.width * tunables.heat_alignment;
    let slot_bottom = slot.position.y + slot_tunables.height * 0.5;

    burners.iter().any(|&(center, half)| {
        let gap = (center.y - half) - slot_bottom;
        (center.x - slot.position.x).abs() <= half_width
            && center.y + half >= slot.position.y
            && gap <= tunables.heat_reach
    })
}

pub struct ReactionSystem;

impl ReactionSystem {
    /// Update reactions and glow in every slot for one frame
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        slots: &mut [Slot],
        objects: &[WorldObject],
        now: f64,
        dt: f32,
        recipes: &RecipeRegistry,
        tunables: &ReactionTunables,
        slot_tunables: &SlotTunables,
        base_size: f32,
        stats: &mut dyn LabStats,
    ) {
        let burners: Vec<(Vec2, f32)> = objects
            .iter()
            .filter(|o| o.is_lit_burner())
            .map(|o| (o.position, o.half_size(base_size)))
            .collect();
        let mix = per_frame_ease(tunables.mix_strength, dt);
        let glow_decay = per_frame_decay(tunables.glow_decay, dt);
        let frames = dt * REFERENCE_HZ;

        for slot in slots.iter_mut() {
            // 1. Expire
            if let Some(reaction) = &slot.reaction
                && reaction.is_expired(now)
            {
                log::info!("[REACTION] {} finished in slot {}", reaction.name, slot.index);
                slot.reaction = None;
                slot.reaction_result = None;
                slot.heated_since = None;
                slot.set_glow(tunables.glow_baseline);
                stats.record_reaction_expired();
            }

            // 2. Heat
            let occupied = slot.occupied_by.is_some();
            let heated = occupied && is_heated(slot, &burners, slot_tunables, tunables);
            if heated {
                slot.heated_since.get_or_insert(now);
            } else {
                slot.heated_since = None;
            }

            // 3. Trigger
            if let Some(since) = slot.heated_since
                && !slot.is_reacting()
            {
                let heat_time = (now - since) as f32 * tunables.heat_multiplier;
                if heat_time > tunables.heat_threshold
                    && trigger_reaction(slot, now, recipes, tunables)
                    && let Some(name) = slot.reaction_name()
                {
                    stats.record_reaction_triggered(name);
                }
            }

            // 4. Mix
            blend_reaction_contents(slot, mix);

            // 5. Glow
            let mut glow = (slot.glow * glow_decay).max(tunables.glow_floor);
            if occupied {
                glow += tunables.glow_occupied_rise * frames;
            }
            if heated {
                glow += tunables.glow_heated_rise * frames;
            }
            slot.set_glow(glow);
        }
    }

    /// Emit smoke from every reacting slot in proportion to its gas rate
    pub fn emit_gas<R: LabRng>(
        slots: &mut [Slot],
        particles: &mut ParticleSystem,
        dt: f32,
        tunables: &ReactionTunables,
        rng: &mut R,
        stats: &mut dyn LabStats,
    ) {
        for slot in slots.iter_mut() {
            let Some(reaction) = &slot.reaction else {
                slot.gas_accumulator = 0.0;
                continue;
            };

            let rate = reaction.gas_rate * tunables.smoke_per_gas_rate;
            let count = drain_accumulator(&mut slot.gas_accumulator, rate, dt);
            particles.spawn_smoke(slot.position, count, rng, stats);
        }
    }
}
