//! Adapter from raw hand landmarks to per-frame [`HandInput`]
//!
//! Landmarks arrive normalized to [0, 1] of the camera frame. The filter
//! converts them to frame pixels, drops samples with non-finite
//! coordinates, clamps the rest to the frame and smooths the wrist with a
//! short moving mean per hand.
//!
//! This is the entry point for a camera front end: call [`HandFilter::process`]
//! once per captured frame and pass the result to `Lab::tick`.

use glam::Vec2;
use std::collections::VecDeque;

use super::input::{HandInput, HandLabel, HandState};

/// Wrist samples averaged per hand
pub const WRIST_SMOOTHING_SAMPLES: usize = 5;

/// Fingertip distance (px) below which thumb and index count as a pinch
pub const PINCH_DISTANCE: f32 = 40.0;

/// Landmarks of one detected hand, normalized to the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHand {
    pub wrist: Vec2,
    pub index_tip: Vec2,
    pub thumb_tip: Vec2,
    pub index_mcp: Vec2,
}

#[derive(Debug, Default)]
pub struct HandFilter {
    left: VecDeque<Vec2>,
    right: VecDeque<Vec2>,
}

impl HandFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer_mut(&mut self, label: HandLabel) -> &mut VecDeque<Vec2> {
        match label {
            HandLabel::Left => &mut self.left,
            HandLabel::Right => &mut self.right,
        }
    }

    /// Number of wrist samples currently buffered for a hand
    pub fn buffered(&self, label: HandLabel) -> usize {
        match label {
            HandLabel::Left => self.left.len(),
            HandLabel::Right => self.right.len(),
        }
    }

    /// Build this frame's hand input from the detected hands
    ///
    /// A hand absent from `raw` (or rejected) loses its smoothing history.
    pub fn process(&mut self, raw: &[(HandLabel, RawHand)], frame: Vec2) -> HandInput {
        let mut input = HandInput::new();

        for label in HandLabel::BOTH {
            let sample = raw
                .iter()
                .find(|(l, _)| *l == label)
                .and_then(|(_, hand)| self.accept(label, hand, frame));

            if sample.is_none() {
                self.buffer_mut(label).clear();
            }
            input.set(label, sample);
        }

        input
    }

    fn accept(&mut self, label: HandLabel, hand: &RawHand, frame: Vec2) -> Option<HandState> {
        let points = [hand.wrist, hand.index_tip, hand.thumb_tip, hand.index_mcp];
        if points.iter().any(|p| !p.is_finite()) {
            log::warn!("Rejected {} hand sample with non-finite landmarks", label);
            return None;
        }

        let to_px = |p: Vec2| (p * frame).clamp(Vec2::ZERO, frame);
        let wrist = to_px(hand.wrist);
        let index_tip = to_px(hand.index_tip);
        let thumb_tip = to_px(hand.thumb_tip);
        let mcp = to_px(hand.index_mcp);

        let buffer = self.buffer_mut(label);
        if buffer.len() == WRIST_SMOOTHING_SAMPLES {
            buffer.pop_front();
        }
        buffer.push_back(wrist);
        let smoothed = buffer.iter().copied().sum::<Vec2>() / buffer.len() as f32;

        let dir = mcp - wrist;
        Some(HandState {
            wrist: smoothed,
            index_tip,
            pinch: index_tip.distance(thumb_tip) < PINCH_DISTANCE,
            angle: dir.y.atan2(dir.x),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Vec2 = Vec2::new(1000.0, 500.0);

    fn raw(wrist: Vec2, pinch: bool) -> RawHand {
        let index_tip = wrist + Vec2::new(0.05, -0.1);
        let thumb_tip = if pinch {
            index_tip + Vec2::new(0.01, 0.0)
        } else {
            index_tip + Vec2::new(0.2, 0.0)
        };
        RawHand {
            wrist,
            index_tip,
            thumb_tip,
            index_mcp: wrist + Vec2::new(0.1, 0.0),
        }
    }

    #[test]
    fn test_converts_to_pixels_and_detects_pinch() {
        let mut filter = HandFilter::new();
        let input = filter.process(&[(HandLabel::Right, raw(Vec2::new(0.5, 0.5), true))], FRAME);

        let right = input.right.unwrap();
        assert_eq!(right.wrist, Vec2::new(500.0, 250.0));
        assert!(right.pinch);
        assert!(right.angle.abs() < 1e-6);
        assert!(input.left.is_none());
    }

    #[test]
    fn test_open_hand_is_not_pinching() {
        let mut filter = HandFilter::new();
        let input = filter.process(&[(HandLabel::Left, raw(Vec2::new(0.3, 0.3), false))], FRAME);
        assert!(!input.left.unwrap().pinch);
    }

    #[test]
    fn test_wrist_is_moving_mean() {
        let mut filter = HandFilter::new();
        filter.process(&[(HandLabel::Left, raw(Vec2::new(0.1, 0.2), false))], FRAME);
        let input = filter.process(&[(HandLabel::Left, raw(Vec2::new(0.3, 0.2), false))], FRAME);
        assert_eq!(input.left.unwrap().wrist, Vec2::new(200.0, 100.0));

        for _ in 0..10 {
            filter.process(&[(HandLabel::Left, raw(Vec2::new(0.3, 0.2), false))], FRAME);
        }
        assert_eq!(filter.buffered(HandLabel::Left), WRIST_SMOOTHING_SAMPLES);
    }

    #[test]
    fn test_missing_hand_clears_history() {
        let mut filter = HandFilter::new();
        filter.process(&[(HandLabel::Left, raw(Vec2::new(0.1, 0.2), false))], FRAME);
        filter.process(&[], FRAME);
        assert_eq!(filter.buffered(HandLabel::Left), 0);

        let input = filter.process(&[(HandLabel::Left, raw(Vec2::new(0.3, 0.2), false))], FRAME);
        assert_eq!(input.left.unwrap().wrist, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_non_finite_sample_is_rejected() {
        let mut filter = HandFilter::new();
        let input = filter.process(
            &[(HandLabel::Right, raw(Vec2::new(f32::NAN, 0.5), true))],
            FRAME,
        );
        assert!(input.is_empty());
    }

    #[test]
    fn test_out_of_frame_is_clamped() {
        let mut filter = HandFilter::new();
        let input = filter.process(&[(HandLabel::Right, raw(Vec2::new(1.5, -0.2), false))], FRAME);
        let wrist = input.right.unwrap().wrist;
        assert_eq!(wrist, Vec2::new(1000.0, 0.0));
    }
}
