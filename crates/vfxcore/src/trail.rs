//! Mesh trails: short-lived ghost copies of a mesh that fade out on their own.

use crate::cadence::Cadence;
use crate::config::MeshTrailConfig;
use crate::motion::MotionTracker;
use crate::properties::*;
use crate::target::{MaterialTarget, VolumetricPlayer};
use crate::vologram::{FrameClamped, FrameGate};
use glam::{Quat, Vec3, Vec4};
use log::{debug, trace};

// absorbs f32 drift from subtracting the spawn interval repeatedly
const WINDOW_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl TrailTransform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

/// Steps a material float from its start value down toward a goal.
#[derive(Debug, Clone, Copy)]
pub struct FadeAnimation {
    value: f32,
    goal: f32,
    rate: f32,
    cadence: Cadence,
    finished: bool,
}

impl FadeAnimation {
    pub fn new(start: f32, goal: f32, rate: f32, interval: f32) -> Self {
        Self {
            value: start,
            goal,
            rate: rate.abs(),
            cadence: Cadence::new(interval),
            finished: start <= goal,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn step(&mut self, dt: f32, material: &mut impl MaterialTarget) {
        self.cadence.advance(dt);
        while !self.finished && self.cadence.take() {
            self.value -= self.rate;
            material.set_float(TRAIL_ALPHA, self.value);
            self.finished = self.value <= self.goal;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailStatus {
    Alive,
    /// The destroy delay elapsed; the instance must be removed.
    Expired,
}

/// One ghost left behind by a [`MeshTrailSpawner`].
#[derive(Debug, Clone)]
pub struct TrailInstance<M> {
    transform: TrailTransform,
    mesh: M,
    color: Vec4,
    fresnel_power: f32,
    initial_alpha: f32,
    fade: FadeAnimation,
    age: f32,
    lifetime: f32,
}

impl<M> TrailInstance<M> {
    pub fn new(transform: TrailTransform, mesh: M, config: &MeshTrailConfig) -> Self {
        Self {
            transform,
            mesh,
            color: config.trail_color,
            fresnel_power: config.fresnel_power,
            initial_alpha: config.initial_alpha,
            fade: FadeAnimation::new(config.initial_alpha, 0.0, config.fade_rate, config.fade_interval),
            age: 0.0,
            lifetime: config.destroy_delay,
        }
    }

    pub fn transform(&self) -> TrailTransform {
        self.transform
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    pub fn alpha(&self) -> f32 {
        self.fade.value()
    }

    pub fn is_fading(&self) -> bool {
        !self.fade.is_finished()
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Pushes the trail look into a fresh material and runs the first fade step.
    pub fn start(&mut self, material: &mut impl MaterialTarget) {
        material.set_color(TRAIL_MAIN_COLOR, self.color);
        material.set_float(TRAIL_FRESNEL_POWER, self.fresnel_power);
        material.set_float(TRAIL_ALPHA, self.initial_alpha);
        self.fade.step(0.0, material);
    }

    pub fn update(&mut self, dt: f32, material: &mut impl MaterialTarget) -> TrailStatus {
        self.age += dt;
        if self.is_expired() {
            return TrailStatus::Expired;
        }
        self.fade.step(dt, material);
        TrailStatus::Alive
    }
}

#[derive(Debug, Clone, Copy)]
struct SpawnWindow {
    remaining: f32,
    cadence: Cadence,
}

#[derive(Debug, Clone)]
pub struct TrailSpawnStep<M> {
    pub spawned: Vec<TrailInstance<M>>,
    pub clamped: Option<FrameClamped>,
}

/// Emits trail instances at a fixed interval for a bounded window after each trigger.
#[derive(Debug, Clone)]
pub struct MeshTrailSpawner {
    config: MeshTrailConfig,
    gate: FrameGate,
    motion: MotionTracker,
    pending: bool,
    window: Option<SpawnWindow>,
}

impl MeshTrailSpawner {
    pub fn new(config: MeshTrailConfig, position: Vec3) -> Self {
        Self {
            gate: FrameGate::new(config.target_frame),
            motion: MotionTracker::new(position),
            pending: config.play_on_start,
            window: None,
            config,
        }
    }

    pub fn config(&self) -> &MeshTrailConfig {
        &self.config
    }

    pub fn is_spawning(&self) -> bool {
        self.window.is_some()
    }

    /// Seconds left in the active window.
    pub fn remaining(&self) -> Option<f32> {
        self.window.map(|window| window.remaining)
    }

    pub fn target_frame(&self) -> u32 {
        self.gate.target_frame()
    }

    pub fn trigger(&mut self) {
        self.pending = true;
    }

    pub fn set_play_state(&mut self, play: bool) {
        self.pending = play;
    }

    pub fn set_play_if_moving(&mut self, enabled: bool) {
        self.config.play_if_moving = enabled;
    }

    pub fn set_trail_color(&mut self, color: Vec4) {
        self.config.trail_color = color;
    }

    /// Checks the triggers and steps the spawning window. Instances already
    /// handed out are not touched; each one runs on its own.
    ///
    /// With a player, triggers are only evaluated during playback.
    pub fn update<M: Clone>(
        &mut self,
        dt: f32,
        transform: TrailTransform,
        mesh: &M,
        player: Option<&dyn VolumetricPlayer>,
    ) -> TrailSpawnStep<M> {
        let mut clamped = None;
        let triggers_live = player.is_none_or(|player| player.is_playing());

        if triggers_live {
            if let Some(player) = player {
                let poll = self.gate.poll(player);
                clamped = poll.clamped;
                self.pending |= poll.aligned;
            }
            if self.config.play_if_moving
                && self
                    .motion
                    .sample(transform.position, self.config.motion_threshold)
            {
                self.pending = true;
            }
        }

        if let Some(window) = self.window.as_mut() {
            window.cadence.advance(dt);
        }

        if triggers_live && self.pending {
            self.pending = false;
            self.open_window();
        }

        let mut spawned = Vec::new();
        if let Some(mut window) = self.window {
            let interval = self.config.spawn_interval;
            while window.remaining > WINDOW_EPSILON && window.cadence.take() {
                window.remaining -= interval;
                trace!("trail spawned at {}", transform.position);
                spawned.push(TrailInstance::new(transform, mesh.clone(), &self.config));
            }
            self.window = if window.remaining > WINDOW_EPSILON {
                Some(window)
            } else {
                debug!("trail window closed");
                None
            };
        }

        TrailSpawnStep { spawned, clamped }
    }

    fn open_window(&mut self) {
        let active_time = self.config.active_time;
        match self.window.as_mut() {
            Some(window) => {
                debug!("trail window restarted at {active_time}s");
                window.remaining = active_time;
            }
            None => {
                debug!("trail window opened for {active_time}s");
                self.window = Some(SpawnWindow {
                    remaining: active_time,
                    cadence: Cadence::new(self.config.spawn_interval),
                });
            }
        }
    }
}
