//! Triggers aligned to the playback of a volumetric video.

use crate::config::VologramDissolveConfig;
use crate::dissolve::{DissolveAnimator, DissolveStatus, DissolveTargets};
use crate::progress::Direction;
use crate::target::{EffectTarget, RendererTarget, VolumetricPlayer};
use glam::Vec4;
use log::warn;

/// A configured target frame was past the end of the loaded vologram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClamped {
    pub requested: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FramePoll {
    pub playing: bool,
    pub aligned: bool,
    pub clamped: Option<FrameClamped>,
}

/// Fires once per playback loop, when the frame counter lands on the target frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameGate {
    target_frame: u32,
}

impl FrameGate {
    pub fn new(target_frame: u32) -> Self {
        Self { target_frame }
    }

    pub fn target_frame(&self) -> u32 {
        self.target_frame
    }

    pub fn set_target_frame(&mut self, frame: u32) {
        self.target_frame = frame;
    }

    pub fn poll<P: VolumetricPlayer + ?Sized>(&mut self, player: &P) -> FramePoll {
        if !player.is_playing() {
            return FramePoll::default();
        }

        let total = player.frame_count();
        let mut clamped = None;
        if self.target_frame > total && player.is_open() {
            warn!(
                "Chosen frame {} is out of bounds, using the last frame {} of the current vologram instead",
                self.target_frame, total
            );
            clamped = Some(FrameClamped {
                requested: self.target_frame,
                max: total,
            });
            self.target_frame = total;
        }

        // a target clamped to the loop length is never reached by `frame % total`
        let aligned =
            total > 0 && player.current_frame() % u64::from(total) == u64::from(self.target_frame);

        FramePoll {
            playing: true,
            aligned,
            clamped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VologramStep {
    pub status: DissolveStatus,
    pub clamped: Option<FrameClamped>,
}

/// Dissolve that starts when the vologram reaches a configured frame.
#[derive(Debug, Clone)]
pub struct VologramDissolveAnimator {
    gate: FrameGate,
    animator: DissolveAnimator,
}

impl VologramDissolveAnimator {
    pub fn new(config: VologramDissolveConfig) -> Self {
        Self {
            gate: FrameGate::new(config.target_frame),
            animator: DissolveAnimator::new(config.dissolve),
        }
    }

    pub fn animator(&self) -> &DissolveAnimator {
        &self.animator
    }

    pub fn target_frame(&self) -> u32 {
        self.gate.target_frame()
    }

    pub fn set_target_frame(&mut self, frame: u32) {
        self.gate.set_target_frame(frame);
    }

    pub fn is_playing(&self) -> bool {
        self.animator.is_playing()
    }

    pub fn trigger(&mut self, direction: Direction) -> bool {
        self.animator.trigger(direction)
    }

    pub fn set_play_state(&mut self, play: bool) {
        self.animator.set_play_state(play);
    }

    pub fn set_use_distinct_colors(&mut self, distinct: bool) {
        self.animator.set_use_distinct_colors(distinct);
    }

    pub fn set_model_color(&mut self, color: Vec4) {
        self.animator.set_model_color(color);
    }

    pub fn set_effect_color(&mut self, color: Vec4) {
        self.animator.set_effect_color(color);
    }

    /// A run already in progress keeps ticking while the player is paused;
    /// new runs only start during playback.
    pub fn update<P, R, E>(
        &mut self,
        dt: f32,
        player: &P,
        targets: &mut DissolveTargets<'_, R, E>,
    ) -> VologramStep
    where
        P: VolumetricPlayer + ?Sized,
        R: RendererTarget + ?Sized,
        E: EffectTarget,
    {
        let poll = self.gate.poll(player);
        if poll.aligned {
            self.animator.set_play_state(true);
        }
        VologramStep {
            status: self.animator.step(dt, targets, poll.playing),
            clamped: poll.clamped,
        }
    }
}
