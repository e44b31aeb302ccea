//! Dissolve/materialize animation for a static mesh.

use crate::cadence::Cadence;
use crate::config::{DissolveConfig, MaterialScope};
use crate::progress::{Direction, ProgressAnimation};
use crate::properties::*;
use crate::target::{EffectTarget, MaterialTarget, RendererTarget, TexturedMaterial};
use glam::Vec4;
use log::{debug, trace};

/// Particle duration assumed when the effect does not report one.
pub const DEFAULT_EFFECT_DURATION: f32 = 1.0;

/// Everything a dissolve step writes to, supplied by the caller on each update.
pub struct DissolveTargets<'a, R: RendererTarget + ?Sized, E: EffectTarget> {
    pub renderer: &'a mut R,
    pub effect: Option<&'a mut E>,
    /// Texture pushed into the albedo slot of the first material when a run starts.
    pub albedo: Option<<R::Material as TexturedMaterial>::Texture>,
    /// Mesh the particle effect emits from.
    pub mesh: Option<E::Mesh>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DissolveStatus {
    Idle,
    Running,
    /// The run ended during this update and the latch is released.
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct DissolveRun {
    progress: ProgressAnimation,
    cadence: Cadence,
}

#[derive(Debug, Clone)]
pub struct DissolveAnimator {
    config: DissolveConfig,
    pending: Option<Direction>,
    run: Option<DissolveRun>,
    effect_base_duration: Option<f32>,
}

impl DissolveAnimator {
    pub fn new(config: DissolveConfig) -> Self {
        let pending = config
            .play_on_start
            .then(|| Direction::from_reverse(config.reverse));
        Self {
            config,
            pending,
            run: None,
            effect_base_duration: None,
        }
    }

    pub fn config(&self) -> &DissolveConfig {
        &self.config
    }

    /// True while a run holds the latch.
    pub fn is_playing(&self) -> bool {
        self.run.is_some()
    }

    pub fn has_pending_trigger(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests a run in the given direction. Ignored while a run is active.
    pub fn trigger(&mut self, direction: Direction) -> bool {
        if self.run.is_some() {
            debug!("dissolve already playing, trigger ignored");
            self.pending = None;
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// `true` requests a run in the configured direction, `false` withdraws a pending request.
    pub fn set_play_state(&mut self, play: bool) {
        if play {
            self.trigger(Direction::from_reverse(self.config.reverse));
        } else {
            self.pending = None;
        }
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.config.reverse = reverse;
    }

    pub fn set_use_distinct_colors(&mut self, distinct: bool) {
        self.config.use_distinct_colors = distinct;
    }

    pub fn set_model_color(&mut self, color: Vec4) {
        self.config.model_color = color;
    }

    pub fn set_effect_color(&mut self, color: Vec4) {
        self.config.effect_color = color;
    }

    /// Color the particle effect is tinted with on the next tick.
    pub fn active_effect_color(&self) -> Vec4 {
        if self.config.use_distinct_colors {
            self.config.effect_color
        } else {
            self.config.model_color
        }
    }

    pub fn update<R, E>(&mut self, dt: f32, targets: &mut DissolveTargets<'_, R, E>) -> DissolveStatus
    where
        R: RendererTarget + ?Sized,
        E: EffectTarget,
    {
        self.step(dt, targets, true)
    }

    /// Advances the active run. A pending trigger only starts when `may_start` is set.
    pub(crate) fn step<R, E>(
        &mut self,
        dt: f32,
        targets: &mut DissolveTargets<'_, R, E>,
        may_start: bool,
    ) -> DissolveStatus
    where
        R: RendererTarget + ?Sized,
        E: EffectTarget,
    {
        match self.run.as_mut() {
            Some(run) => run.cadence.advance(dt),
            None => {
                if !may_start {
                    return DissolveStatus::Idle;
                }
                let Some(direction) = self.pending.take() else {
                    return DissolveStatus::Idle;
                };
                if !self.start(direction, targets) {
                    return DissolveStatus::Idle;
                }
            }
        }

        while let Some(mut run) = self.run {
            if !run.cadence.take() {
                break;
            }
            let value = run.progress.advance();
            self.write_tick(value, targets);

            if run.progress.in_range() {
                self.run = Some(run);
            } else {
                debug!(
                    "dissolve finished at {value} ({:?}), rate reset to {}",
                    run.progress.direction(),
                    run.progress.canonical_rate()
                );
                self.run = None;
                return DissolveStatus::Finished;
            }
        }

        DissolveStatus::Running
    }

    fn start<R, E>(&mut self, direction: Direction, targets: &mut DissolveTargets<'_, R, E>) -> bool
    where
        R: RendererTarget + ?Sized,
        E: EffectTarget,
    {
        if targets.renderer.material_count() == 0 {
            debug!("dissolve trigger dropped, renderer has no materials");
            return false;
        }

        let progress = ProgressAnimation::new(self.config.rate, direction);
        debug!(
            "dissolve started {:?} at {} with rate {}",
            direction,
            progress.current(),
            progress.rate()
        );

        if let Some(albedo) = targets.albedo.clone() {
            if let Some(material) = targets.renderer.material_mut(0) {
                material.set_texture(ALBEDO, albedo);
            }
        }

        let model_color = self.config.model_color;
        let start = progress.current();
        for_each_material(&mut *targets.renderer, self.config.material_scope, |material| {
            material.set_color(DISSOLVE_COLOR, model_color);
            material.set_float(DISSOLVE_AMOUNT, start);
        });

        if self.config.play_vfx {
            if let Some(effect) = targets.effect.as_deref_mut() {
                let base = *self.effect_base_duration.get_or_insert_with(|| {
                    effect
                        .float(EFFECT_DURATION)
                        .unwrap_or(DEFAULT_EFFECT_DURATION)
                });
                effect.set_float(
                    EFFECT_DURATION,
                    base / progress.canonical_rate() / self.config.particle_duration_divisor,
                );
                effect.set_vector4(EFFECT_BASE_COLOR, self.active_effect_color());
                if let Some(mesh) = targets.mesh.clone() {
                    effect.set_mesh(EFFECT_MESH, mesh);
                }
                effect.set_enabled(true);
                effect.play();
            }
        }

        self.run = Some(DissolveRun {
            progress,
            cadence: Cadence::new(self.config.tick_interval),
        });
        true
    }

    fn write_tick<R, E>(&self, value: f32, targets: &mut DissolveTargets<'_, R, E>)
    where
        R: RendererTarget + ?Sized,
        E: EffectTarget,
    {
        trace!("dissolve tick {value}");
        if let Some(effect) = targets.effect.as_deref_mut() {
            effect.set_vector4(EFFECT_BASE_COLOR, self.active_effect_color());
        }

        let model_color = self.config.model_color;
        let noise_scale = self.config.noise_scale;
        for_each_material(&mut *targets.renderer, self.config.material_scope, |material| {
            material.set_color(DISSOLVE_COLOR, model_color);
            material.set_float(NOISE_SCALE, noise_scale);
            material.set_float(DISSOLVE_AMOUNT, value);
        });
    }
}

fn for_each_material<R>(renderer: &mut R, scope: MaterialScope, mut apply: impl FnMut(&mut R::Material))
where
    R: RendererTarget + ?Sized,
{
    let count = match scope {
        MaterialScope::First => renderer.material_count().min(1),
        MaterialScope::All => renderer.material_count(),
    };
    for index in 0..count {
        if let Some(material) = renderer.material_mut(index) {
            apply(material);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingEffect, RecordingMaterial, Write};
    use crate::target::NoEffect;
    use rstest::rstest;

    const TICK: f32 = 0.05;

    fn config(rate: f32) -> DissolveConfig {
        DissolveConfig {
            rate,
            tick_interval: TICK,
            ..DissolveConfig::default()
        }
    }

    fn run_until_idle(
        animator: &mut DissolveAnimator,
        materials: &mut Vec<RecordingMaterial>,
        effect: &mut RecordingEffect,
    ) -> usize {
        let mut updates = 0;
        loop {
            let mut targets = DissolveTargets {
                renderer: &mut *materials,
                effect: Some(&mut *effect),
                albedo: Some("base_map"),
                mesh: Some("cube"),
            };
            updates += 1;
            assert!(updates < 10_000, "dissolve never finished");
            match animator.update(TICK, &mut targets) {
                DissolveStatus::Finished | DissolveStatus::Idle => return updates,
                DissolveStatus::Running => {}
            }
        }
    }

    #[test]
    fn test_idle_without_trigger() {
        let mut animator = DissolveAnimator::new(config(0.25));
        let mut materials = vec![RecordingMaterial::default()];
        let mut targets = DissolveTargets::<_, NoEffect> {
            renderer: &mut materials,
            effect: None,
            albedo: None,
            mesh: None,
        };

        assert_eq!(animator.update(TICK, &mut targets), DissolveStatus::Idle);
        assert!(materials[0].writes.is_empty());
    }

    #[rstest]
    #[case(false, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25])]
    #[case(true, vec![1.0, 0.75, 0.5, 0.25, 0.0, -0.25])]
    fn test_progress_writes_cross_boundary_exactly_once(#[case] reverse: bool, #[case] expected: Vec<f32>) {
        let mut animator = DissolveAnimator::new(config(0.25));
        animator.set_reverse(reverse);
        animator.set_play_state(true);
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();

        run_until_idle(&mut animator, &mut materials, &mut effect);

        assert_eq!(materials[0].float_writes(DISSOLVE_AMOUNT), expected);
        assert!(!animator.is_playing());
    }

    #[rstest]
    #[case(0.05)]
    #[case(0.07)]
    #[case(0.1)]
    fn test_run_finishes_within_tick_bound(#[case] rate: f32) {
        let mut animator = DissolveAnimator::new(config(rate));
        animator.trigger(Direction::Forward);
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();

        let updates = run_until_idle(&mut animator, &mut materials, &mut effect);

        assert!(updates <= (1.0 / rate).ceil() as usize + 1);
        let noise_writes = materials[0].float_writes(NOISE_SCALE).len();
        assert_eq!(noise_writes, updates);
    }

    #[test]
    fn test_retrigger_while_running_is_dropped() {
        let mut animator = DissolveAnimator::new(config(0.25));
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();

        assert!(animator.trigger(Direction::Forward));
        {
            let mut targets = DissolveTargets {
                renderer: &mut materials,
                effect: Some(&mut effect),
                albedo: None,
                mesh: None,
            };
            assert_eq!(animator.update(TICK, &mut targets), DissolveStatus::Running);
        }

        assert!(!animator.trigger(Direction::Reverse));
        animator.set_play_state(true);
        assert!(!animator.has_pending_trigger());

        run_until_idle(&mut animator, &mut materials, &mut effect);
        assert_eq!(
            materials[0].float_writes(DISSOLVE_AMOUNT),
            vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25]
        );
        assert_eq!(effect.plays, 1);

        // the dropped request does not fire after the run
        let updates = run_until_idle(&mut animator, &mut materials, &mut effect);
        assert_eq!(updates, 1);
        assert_eq!(effect.plays, 1);
    }

    #[test]
    fn test_double_trigger_before_start_yields_one_run() {
        let mut animator = DissolveAnimator::new(config(0.5));
        animator.trigger(Direction::Forward);
        animator.trigger(Direction::Forward);
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();

        run_until_idle(&mut animator, &mut materials, &mut effect);

        assert_eq!(materials[0].float_writes(DISSOLVE_AMOUNT), vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(effect.plays, 1);
    }

    #[test]
    fn test_play_state_false_withdraws_request() {
        let mut animator = DissolveAnimator::new(DissolveConfig {
            play_on_start: true,
            ..config(0.25)
        });
        assert!(animator.has_pending_trigger());
        animator.set_play_state(false);
        assert!(!animator.has_pending_trigger());
    }

    #[test]
    fn test_start_binds_albedo_and_plays_effect() {
        let mut animator = DissolveAnimator::new(config(0.05));
        animator.set_play_state(true);
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();
        effect.floats.insert(EFFECT_DURATION.to_string(), 2.5);

        let mut targets = DissolveTargets {
            renderer: &mut materials,
            effect: Some(&mut effect),
            albedo: Some("base_map"),
            mesh: Some("cube"),
        };
        animator.update(TICK, &mut targets);

        assert_eq!(materials[0].texture(ALBEDO), Some("base_map"));
        assert_eq!(materials[0].writes[0], Write::Texture(ALBEDO.to_string(), "base_map"));
        assert!(effect.enabled);
        assert_eq!(effect.plays, 1);
        assert_eq!(effect.mesh, Some("cube"));
        // 2.5 / 0.05 / 25
        assert!((effect.floats[EFFECT_DURATION] - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_effect_duration_does_not_compound_across_runs() {
        let mut animator = DissolveAnimator::new(config(0.5));
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();
        effect.floats.insert(EFFECT_DURATION.to_string(), 5.0);

        for _ in 0..3 {
            animator.trigger(Direction::Forward);
            run_until_idle(&mut animator, &mut materials, &mut effect);
        }

        // 5.0 / 0.5 / 25
        assert!((effect.floats[EFFECT_DURATION] - 0.4).abs() < 1e-5);
        assert_eq!(effect.plays, 3);
    }

    #[test]
    fn test_play_vfx_disabled_leaves_effect_untouched() {
        let mut animator = DissolveAnimator::new(DissolveConfig {
            play_vfx: false,
            ..config(0.5)
        });
        animator.trigger(Direction::Forward);
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();

        run_until_idle(&mut animator, &mut materials, &mut effect);

        assert!(!effect.enabled);
        assert_eq!(effect.plays, 0);
        assert!(effect.floats.is_empty());
    }

    #[rstest]
    #[case(false, Vec4::X)]
    #[case(true, Vec4::Y)]
    fn test_effect_color_follows_distinct_flag(#[case] distinct: bool, #[case] expected: Vec4) {
        let mut animator = DissolveAnimator::new(config(0.5));
        animator.set_model_color(Vec4::X);
        animator.set_effect_color(Vec4::Y);
        animator.set_use_distinct_colors(distinct);
        animator.trigger(Direction::Forward);
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();

        run_until_idle(&mut animator, &mut materials, &mut effect);

        assert_eq!(effect.vectors[EFFECT_BASE_COLOR], expected);
        assert_eq!(materials[0].last_color(DISSOLVE_COLOR), Some(Vec4::X));
    }

    #[test]
    fn test_color_change_applies_on_next_tick() {
        let mut animator = DissolveAnimator::new(config(0.25));
        animator.trigger(Direction::Forward);
        let mut materials = vec![RecordingMaterial::default()];
        let mut effect = RecordingEffect::default();
        {
            let mut targets = DissolveTargets {
                renderer: &mut materials,
                effect: Some(&mut effect),
                albedo: None,
                mesh: None,
            };
            animator.update(TICK, &mut targets);
        }

        animator.set_model_color(Vec4::Z);
        run_until_idle(&mut animator, &mut materials, &mut effect);

        assert_eq!(materials[0].last_color(DISSOLVE_COLOR), Some(Vec4::Z));
        assert_eq!(effect.vectors[EFFECT_BASE_COLOR], Vec4::Z);
    }

    #[rstest]
    #[case(MaterialScope::First, 1)]
    #[case(MaterialScope::All, 3)]
    fn test_material_scope(#[case] scope: MaterialScope, #[case] written: usize) {
        let mut animator = DissolveAnimator::new(DissolveConfig {
            material_scope: scope,
            ..config(0.5)
        });
        animator.trigger(Direction::Forward);
        let mut materials = vec![RecordingMaterial::default(); 3];
        let mut effect = RecordingEffect::default();

        run_until_idle(&mut animator, &mut materials, &mut effect);

        let touched = materials
            .iter()
            .filter(|material| !material.float_writes(DISSOLVE_AMOUNT).is_empty())
            .count();
        assert_eq!(touched, written);
    }

    #[test]
    fn test_no_materials_drops_trigger() {
        let mut animator = DissolveAnimator::new(config(0.5));
        animator.trigger(Direction::Forward);
        let mut materials: Vec<RecordingMaterial> = Vec::new();
        let mut targets = DissolveTargets::<_, NoEffect> {
            renderer: &mut materials,
            effect: None,
            albedo: None,
            mesh: None,
        };

        assert_eq!(animator.update(TICK, &mut targets), DissolveStatus::Idle);
        assert!(!animator.is_playing());
        assert!(!animator.has_pending_trigger());
    }

    #[test]
    fn test_large_delta_catches_up() {
        let mut animator = DissolveAnimator::new(config(0.25));
        animator.trigger(Direction::Forward);
        let mut materials = vec![RecordingMaterial::default()];
        let mut targets = DissolveTargets::<_, NoEffect> {
            renderer: &mut materials,
            effect: None,
            albedo: None,
            mesh: None,
        };

        assert_eq!(animator.update(0.0, &mut targets), DissolveStatus::Running);
        assert_eq!(animator.update(1.0, &mut targets), DissolveStatus::Finished);
        assert_eq!(
            materials[0].float_writes(DISSOLVE_AMOUNT),
            vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25]
        );
    }
}
