//! Dash state machine
//!
//! Owns the cooldown, the direction resolver, and at most one [`DashRun`].
//! Every start precondition failure is a silent no-op; callers may simply
//! retry on a later tick.

use glam::Vec3;
use tracing::debug;

use super::animation::DashAnimationSignals;
use super::config::{DashConfig, DashConfigError};
use super::cooldown::Cooldown;
use super::direction::{DirectionContext, DirectionResolver};
use super::motion::DashRun;
use crate::host::{CharacterCondition, DashHost, DashInput, FeedbackPlayer, MovementMode};

/// Whether a dash is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashState {
    #[default]
    Idle,
    Active,
}

/// Why a dash ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// Ran for its full duration
    Completed,
    /// Cut short from outside (damage, knockback)
    Interrupted,
    /// The ability was no longer permitted
    Revoked,
    /// The ability was reset (respawn)
    Reset,
}

/// Why a start request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartBlock {
    Unauthorized,
    AlreadyActive,
    CoolingDown,
    Condition(CharacterCondition),
    Airborne,
}

/// Host flags captured at start and handed back at stop
#[derive(Debug, Clone, Copy)]
struct SavedControl {
    free_movement: bool,
    damage_enabled: bool,
    damage_suspended: bool,
}

#[derive(Debug, Clone)]
struct ActiveDash {
    run: DashRun,
    saved: SavedControl,
}

/// A dash ability bound to one actor
#[derive(Debug, Clone)]
pub struct DashAbility {
    config: DashConfig,
    cooldown: Cooldown,
    resolver: DirectionResolver,
    active: Option<ActiveDash>,
    authorized: bool,
    external_direction: Vec3,
    started_pulse: bool,
    last_direction: Vec3,
}

impl DashAbility {
    /// Create an idle, ready ability. The config is trusted (checked in debug
    /// builds only); see [`Self::try_new`].
    pub fn new(config: DashConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid dash config: {:?}",
            config.validate()
        );
        Self {
            cooldown: Cooldown::new(config.cooldown.clone()),
            external_direction: config.direction,
            config,
            resolver: DirectionResolver::new(),
            active: None,
            authorized: true,
            started_pulse: false,
            last_direction: Vec3::ZERO,
        }
    }

    /// Validate `config` and create the ability
    pub fn try_new(config: DashConfig) -> Result<Self, DashConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn state(&self) -> DashState {
        if self.active.is_some() {
            DashState::Active
        } else {
            DashState::Idle
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.active.is_some()
    }

    /// The running dash, if any
    pub fn run(&self) -> Option<&DashRun> {
        self.active.as_ref().map(|active| &active.run)
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown.remaining()
    }

    pub fn cooldown_total(&self) -> f32 {
        self.cooldown.total()
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Direction of the current or most recent dash
    pub fn dash_direction(&self) -> Vec3 {
        self.last_direction
    }

    /// Permit or forbid the ability. Forbidding it stops a running dash.
    pub fn set_authorized<H: DashHost>(&mut self, host: &mut H, authorized: bool) {
        self.authorized = authorized;
        if !authorized {
            self.finish(host, StopReason::Revoked, MovementMode::Idle);
        }
    }

    /// Set the direction used by `External` mode
    pub fn set_external_direction(&mut self, direction: Vec3) {
        self.external_direction = direction;
    }

    /// Run one simulation tick: recharge, react to the trigger, advance the run,
    /// then publish animation signals
    pub fn tick<H: DashHost>(
        &mut self,
        host: &mut H,
        input: &DashInput,
        dt: f32,
    ) -> DashAnimationSignals {
        self.cooldown.update(dt);

        if input.dash_pressed {
            self.start(host, input);
        }
        self.advance(host, dt);

        self.animation_signals()
    }

    /// Try to start a dash. Returns whether one started.
    pub fn start<H: DashHost>(&mut self, host: &mut H, input: &DashInput) -> bool {
        if let Err(block) = self.check_start(host) {
            debug!("Dash request ignored: {:?}", block);
            return false;
        }

        self.cooldown.start();
        host.set_mode(MovementMode::Dashing);

        let origin = host.position();
        let ctx = DirectionContext {
            position: origin,
            forward: host.forward(),
            model_facing: host.model_facing(),
            primary_axis: DashInput::axis_to_world(input.primary_axis),
            secondary_axis: DashInput::axis_to_world(input.secondary_axis),
            pointer_ray: input.pointer_ray,
            external_direction: self.external_direction,
        };
        let resolution = self.resolver.resolve(&self.config, &ctx);
        if let Some(facing) = resolution.facing {
            host.set_facing(facing);
        }

        host.detach();
        let saved = SavedControl {
            free_movement: host.free_movement(),
            damage_enabled: host.damage_enabled(),
            damage_suspended: self.config.invincible,
        };
        host.set_free_movement(false);
        if saved.damage_suspended {
            host.disable_damage();
        }
        host.play(origin);

        let run = DashRun::new(origin, resolution.destination);
        self.last_direction = run.direction();
        debug!(
            mode = ?self.config.mode,
            space = ?self.config.space,
            "Dash started from {} to {}",
            origin,
            resolution.destination
        );
        self.active = Some(ActiveDash { run, saved });
        self.started_pulse = true;
        true
    }

    /// Stop a running dash immediately and force the cooldown ready.
    ///
    /// The movement mode becomes `mode`, or `Idle` when `None`. Returns
    /// whether a dash was running.
    pub fn force_stop<H: DashHost>(&mut self, host: &mut H, mode: Option<MovementMode>) -> bool {
        let stopped = self.finish(
            host,
            StopReason::Interrupted,
            mode.unwrap_or(MovementMode::Idle),
        );
        if stopped {
            self.cooldown.stop();
        }
        stopped
    }

    /// Stop any running dash, force the cooldown ready, and drop pending signals
    pub fn reset<H: DashHost>(&mut self, host: &mut H) {
        self.finish(host, StopReason::Reset, MovementMode::Idle);
        self.cooldown.stop();
        self.started_pulse = false;
    }

    /// Read the animation signals for this tick. Clears the started pulse.
    pub fn animation_signals(&mut self) -> DashAnimationSignals {
        let signals = DashAnimationSignals {
            is_dashing: self.is_dashing(),
            dash_started: self.started_pulse,
            direction: self.last_direction,
        };
        self.started_pulse = false;
        signals
    }

    fn check_start<H: DashHost>(&self, host: &H) -> Result<(), StartBlock> {
        if !self.authorized {
            return Err(StartBlock::Unauthorized);
        }
        if self.active.is_some() {
            return Err(StartBlock::AlreadyActive);
        }
        if !self.cooldown.ready() {
            return Err(StartBlock::CoolingDown);
        }
        let condition = host.condition();
        if condition != CharacterCondition::Normal {
            return Err(StartBlock::Condition(condition));
        }
        if host.is_airborne() && !self.config.allow_airborne {
            return Err(StartBlock::Airborne);
        }
        Ok(())
    }

    fn advance<H: DashHost>(&mut self, host: &mut H, dt: f32) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let step = active.run.step(&self.config, host.position(), dt);
        host.move_position(step.position);

        if step.finished {
            self.finish(host, StopReason::Completed, MovementMode::Idle);
        }
    }

    /// Unwind every side effect of the running dash. Returns whether one was running.
    fn finish<H: DashHost>(&mut self, host: &mut H, reason: StopReason, mode: MovementMode) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        host.set_mode(mode);
        host.set_free_movement(active.saved.free_movement);
        if active.saved.damage_suspended {
            if active.saved.damage_enabled {
                host.enable_damage();
            } else {
                host.disable_damage();
            }
        }
        FeedbackPlayer::stop(host);

        debug!(
            ?reason,
            elapsed = active.run.elapsed(),
            "Dash stopped at {}",
            host.position()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{FeedbackEvent, SimActor};
    use crate::dash::config::{DashMode, DashSpace};
    use crate::dash::cooldown::CooldownPhase;
    use crate::dash::easing::EasingCurve;
    use crate::host::{DamageControl, FreeMovement, Heading, MovementModeStore, Mover};
    use glam::Vec2;
    use stride_core::{EntityId, Ray};

    fn config() -> DashConfig {
        DashConfig {
            mode: DashMode::Fixed,
            space: DashSpace::Absolute,
            direction: Vec3::Z,
            distance: 10.0,
            duration: 0.5,
            curve: EasingCurve::Linear,
            allow_airborne: false,
            invincible: true,
            ..Default::default()
        }
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_start_transitions_once() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());

        assert_eq!(dash.state(), DashState::Idle);
        assert!(dash.start(&mut actor, &DashInput::pressed()));
        assert_eq!(dash.state(), DashState::Active);

        let run_before = dash.run().cloned();
        let remaining_before = dash.cooldown_remaining();
        assert!(!dash.start(&mut actor, &DashInput::pressed()));
        assert_eq!(dash.state(), DashState::Active);
        assert_eq!(dash.run().cloned(), run_before);
        assert_eq!(dash.cooldown_remaining(), remaining_before);
    }

    #[test]
    fn test_start_applies_side_effects() {
        let mut actor = SimActor::new(Vec3::new(1.0, 0.0, 1.0));
        actor.platform = Some(EntityId::new());
        let mut dash = DashAbility::new(config());

        dash.start(&mut actor, &DashInput::pressed());

        assert_eq!(actor.mode(), MovementMode::Dashing);
        assert!(!actor.free_movement());
        assert!(!actor.damage_enabled());
        assert!(actor.platform.is_none());
        assert_eq!(actor.feedback, vec![FeedbackEvent::Played(Vec3::new(1.0, 0.0, 1.0))]);
        assert!(!dash.cooldown().ready());
        assert!(close(dash.run().unwrap().destination(), Vec3::new(1.0, 0.0, 11.0)));
    }

    #[test]
    fn test_not_invincible_keeps_damage() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(DashConfig {
            invincible: false,
            ..config()
        });
        dash.start(&mut actor, &DashInput::pressed());
        assert!(actor.damage_enabled());
    }

    #[test]
    fn test_start_blocked_by_cooldown() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());

        dash.start(&mut actor, &DashInput::pressed());
        dash.force_stop(&mut actor, None);
        dash.cooldown.start();

        assert!(!dash.start(&mut actor, &DashInput::pressed()));
        assert_eq!(dash.state(), DashState::Idle);
    }

    #[test]
    fn test_start_blocked_by_condition() {
        let mut actor = SimActor::default();
        actor.condition = CharacterCondition::Stunned;
        let mut dash = DashAbility::new(config());

        assert!(!dash.start(&mut actor, &DashInput::pressed()));
        assert_eq!(dash.state(), DashState::Idle);
        assert!(dash.cooldown().ready());
        assert_eq!(actor.mode(), MovementMode::Idle);
    }

    #[test]
    fn test_airborne_requires_permission() {
        let mut actor = SimActor::default();
        actor.airborne = true;

        let mut grounded_only = DashAbility::new(config());
        assert!(!grounded_only.start(&mut actor, &DashInput::pressed()));

        let mut aerial = DashAbility::new(DashConfig {
            allow_airborne: true,
            ..config()
        });
        assert!(aerial.start(&mut actor, &DashInput::pressed()));
    }

    #[test]
    fn test_unauthorized_cannot_start() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.set_authorized(&mut actor, false);
        assert!(!dash.start(&mut actor, &DashInput::pressed()));
        assert!(!dash.is_authorized());
    }

    #[test]
    fn test_revoking_stops_running_dash() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.start(&mut actor, &DashInput::pressed());

        dash.set_authorized(&mut actor, false);
        assert_eq!(dash.state(), DashState::Idle);
        assert!(actor.free_movement());
        assert!(actor.damage_enabled());
        // Revocation is not an interrupt: the cooldown keeps recharging
        assert!(!dash.cooldown().ready());
    }

    #[test]
    fn test_fixed_step_scenario() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());

        let signals = dash.tick(&mut actor, &DashInput::pressed(), 0.1);
        assert!(signals.is_dashing);
        assert!(signals.dash_started);

        for tick in 2..=5 {
            let signals = dash.tick(&mut actor, &DashInput::default(), 0.1);
            assert!(!signals.dash_started);
            assert_eq!(signals.is_dashing, tick < 5, "tick {tick}");
        }

        assert_eq!(dash.state(), DashState::Idle);
        assert!(dash.run().is_none());
        assert!(close(actor.position(), Vec3::new(0.0, 0.0, 10.0)));
        assert_eq!(actor.mode(), MovementMode::Idle);
    }

    #[test]
    fn test_run_elapsed_reaches_duration() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.tick(&mut actor, &DashInput::pressed(), 0.1);
        for _ in 0..3 {
            dash.tick(&mut actor, &DashInput::default(), 0.1);
        }
        let elapsed = dash.run().unwrap().elapsed();
        assert!((elapsed - 0.4).abs() < 1e-5);
        assert!(elapsed <= dash.config().duration);
    }

    #[test]
    fn test_coarse_ticks_still_land_on_destination() {
        let mut actor = SimActor::new(Vec3::new(5.0, 0.0, 5.0));
        let mut dash = DashAbility::new(config());
        dash.tick(&mut actor, &DashInput::pressed(), 0.3);
        dash.tick(&mut actor, &DashInput::default(), 0.3);
        assert_eq!(dash.state(), DashState::Idle);
        assert!(close(actor.position(), Vec3::new(5.0, 0.0, 15.0)));
    }

    #[test]
    fn test_incremental_composes_with_external_motion() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(DashConfig {
            space: DashSpace::Incremental,
            ..config()
        });

        dash.tick(&mut actor, &DashInput::pressed(), 0.1);
        let after_first = actor.position();
        assert!(close(after_first, Vec3::new(0.0, 0.0, 2.0)));

        let platform_delta = Vec3::new(1.5, 0.0, -0.5);
        actor.push(platform_delta);
        dash.tick(&mut actor, &DashInput::default(), 0.1);

        let expected = after_first + platform_delta + Vec3::new(0.0, 0.0, 2.0);
        assert!(close(actor.position(), expected));
    }

    #[test]
    fn test_absolute_overrides_external_motion() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.tick(&mut actor, &DashInput::pressed(), 0.1);
        actor.push(Vec3::new(4.0, 0.0, 0.0));
        dash.tick(&mut actor, &DashInput::default(), 0.1);
        assert!(close(actor.position(), Vec3::new(0.0, 0.0, 4.0)));
    }

    #[test]
    fn test_stop_restores_flags_on_completion_and_interrupt() {
        for interrupt in [false, true] {
            let mut actor = SimActor::default();
            let mut dash = DashAbility::new(config());

            dash.tick(&mut actor, &DashInput::pressed(), 0.1);
            if interrupt {
                assert!(dash.force_stop(&mut actor, None));
            } else {
                for _ in 0..10 {
                    dash.tick(&mut actor, &DashInput::default(), 0.1);
                }
            }

            assert!(dash.run().is_none(), "interrupt={interrupt}");
            assert!(actor.free_movement(), "interrupt={interrupt}");
            assert!(actor.damage_enabled(), "interrupt={interrupt}");
            assert_eq!(actor.feedback.last(), Some(&FeedbackEvent::Stopped));
        }
    }

    #[test]
    fn test_stop_restores_pre_dash_values() {
        // An actor that was already immune and rooted stays that way
        let mut actor = SimActor::default();
        actor.damage_enabled = false;
        actor.free_movement = false;
        let mut dash = DashAbility::new(config());

        dash.start(&mut actor, &DashInput::pressed());
        dash.force_stop(&mut actor, None);

        assert!(!actor.damage_enabled());
        assert!(!actor.free_movement());
    }

    #[test]
    fn test_completion_keeps_cooldown_recharging() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        for tick in 0..5 {
            let input = DashInput {
                dash_pressed: tick == 0,
                ..Default::default()
            };
            dash.tick(&mut actor, &input, 0.1);
        }
        assert_eq!(dash.state(), DashState::Idle);
        assert!(!dash.cooldown().ready());
        assert!(dash.cooldown_remaining() > 0.0);
        assert_eq!(dash.cooldown_total(), 1.0);
    }

    #[test]
    fn test_force_stop_forces_cooldown_ready_and_sets_mode() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.start(&mut actor, &DashInput::pressed());

        assert!(dash.force_stop(&mut actor, Some(MovementMode::Knockback)));
        assert_eq!(actor.mode(), MovementMode::Knockback);
        assert!(dash.cooldown().ready());
        assert_eq!(dash.cooldown().phase(), CooldownPhase::Ready);

        // Nothing to stop the second time
        assert!(!dash.force_stop(&mut actor, None));
        assert_eq!(actor.mode(), MovementMode::Knockback);
    }

    #[test]
    fn test_cooldown_recharges_during_ticks() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.tick(&mut actor, &DashInput::pressed(), 0.1);

        let mut ticks = 0;
        while !dash.cooldown().ready() {
            dash.tick(&mut actor, &DashInput::default(), 0.1);
            ticks += 1;
            assert!(ticks < 20);
        }
        assert!(dash.start(&mut actor, &DashInput::pressed()));
    }

    #[test]
    fn test_started_pulse_lasts_one_read() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.start(&mut actor, &DashInput::pressed());

        let first = dash.animation_signals();
        let second = dash.animation_signals();
        assert!(first.dash_started);
        assert!(!second.dash_started);
        assert!(second.is_dashing);
        assert!(close(second.direction, Vec3::Z));
    }

    #[test]
    fn test_direction_survives_stop() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(DashConfig {
            direction: Vec3::NEG_X,
            ..config()
        });
        dash.start(&mut actor, &DashInput::pressed());
        dash.force_stop(&mut actor, None);

        let signals = dash.animation_signals();
        assert!(!signals.is_dashing);
        assert!(close(signals.direction, Vec3::NEG_X));
    }

    #[test]
    fn test_primary_axis_publishes_facing() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(DashConfig {
            mode: DashMode::PrimaryAxis,
            ..config()
        });
        let input = DashInput {
            dash_pressed: true,
            primary_axis: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        dash.start(&mut actor, &input);

        assert!(close(actor.facing(), Vec3::X));
        assert!(close(dash.run().unwrap().destination(), Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_fixed_mode_leaves_facing_alone() {
        let mut actor = SimActor::default();
        actor.turn_to(Vec3::X);
        let mut dash = DashAbility::new(config());
        dash.start(&mut actor, &DashInput::pressed());

        assert!(close(actor.facing(), Vec3::X));
        assert!(close(dash.run().unwrap().destination(), Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_pointer_parallel_ray_falls_back() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(DashConfig {
            mode: DashMode::PointerTarget,
            ..config()
        });

        let aimed = DashInput {
            dash_pressed: true,
            pointer_ray: Some(Ray::new(Vec3::new(-3.0, 8.0, 0.0), Vec3::NEG_Y)),
            ..Default::default()
        };
        dash.start(&mut actor, &aimed);
        dash.force_stop(&mut actor, None);
        actor.move_position(Vec3::ZERO);

        let parallel = DashInput {
            dash_pressed: true,
            pointer_ray: Some(Ray::new(Vec3::new(0.0, 8.0, 0.0), Vec3::X)),
            ..Default::default()
        };
        assert!(dash.start(&mut actor, &parallel));

        let destination = dash.run().unwrap().destination();
        assert!(destination.is_finite());
        assert!(close(destination, Vec3::new(-10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_external_direction_mode() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(DashConfig {
            mode: DashMode::External,
            ..config()
        });
        dash.set_external_direction(Vec3::new(0.0, 0.0, -4.0));
        dash.start(&mut actor, &DashInput::pressed());
        assert!(close(dash.run().unwrap().destination(), Vec3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn test_facing_model_mode() {
        let mut actor = SimActor::default();
        actor.model_facing = Vec3::NEG_X;
        let mut dash = DashAbility::new(DashConfig {
            mode: DashMode::FacingModel,
            ..config()
        });
        dash.start(&mut actor, &DashInput::pressed());
        assert!(close(dash.run().unwrap().destination(), Vec3::new(-10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        dash.start(&mut actor, &DashInput::pressed());

        dash.reset(&mut actor);
        assert_eq!(dash.state(), DashState::Idle);
        assert!(dash.cooldown().ready());
        assert!(!dash.animation_signals().dash_started);
        assert!(actor.free_movement());
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let result = DashAbility::try_new(DashConfig {
            duration: -1.0,
            ..config()
        });
        assert!(matches!(result, Err(DashConfigError::InvalidDuration(_))));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid dash config")]
    fn test_new_rejects_nan_duration_in_debug() {
        DashAbility::new(DashConfig {
            duration: f32::NAN,
            ..config()
        });
    }

    #[test]
    fn test_animation_signals_reach_animator() {
        let mut actor = SimActor::default();
        let mut dash = DashAbility::new(config());
        let signals = dash.tick(&mut actor, &DashInput::pressed(), 0.1);
        signals.apply(&mut actor);

        assert_eq!(actor.animator_bool(crate::dash::animation::DASHING_PARAMETER), Some(true));
        let z = actor
            .animator_float(crate::dash::animation::DASH_DIRECTION_Z_PARAMETER)
            .unwrap();
        assert!((z - 1.0).abs() < 1e-6);
    }
}
