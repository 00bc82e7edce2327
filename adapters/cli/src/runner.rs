//! Tick orchestration for a headless run.
//!
//! One `advance` call performs a full simulation tick in the fixed order:
//! scheduler, world application, effect timers, safe-zone gate, combat
//! resolver, then the HUD projection. The runner also owns the event
//! fan-out that belongs to the frontend: pickup drops on kills, experience
//! and salvage accounting, regeneration drip, boss blessings, and the
//! automatic zone-upgrade policy.

use std::collections::HashMap;
use std::time::Duration;

use glam::Vec2;
use lastlight_core::{
    Command, EffectKind, EnemyId, Event, Progression, ShrineBlessing, WeaponKind,
};
use lastlight_hud::{HudModel, PoolGauges};
use lastlight_system_combat::CombatResolver;
use lastlight_system_effects::{EffectEngine, Shrine};
use lastlight_system_safe_zone::SafeZoneGate;
use lastlight_system_spawning::{Config as SpawnerConfig, SpawnScheduler};
use lastlight_world::{self as world, query, World};

use crate::config::RunTuning;

/// Blessing roster cycled through on boss kills.
const BOSS_BLESSINGS: [ShrineBlessing; 3] = [
    ShrineBlessing::DamageBoost,
    ShrineBlessing::Magnet,
    ShrineBlessing::XpBoost,
];

/// Outcome counters accumulated over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Experience collected during the run.
    pub run_xp: u64,
    /// Salvage earned during the run.
    pub run_salvage: u64,
    /// Enemies killed during the run.
    pub kills: u64,
    /// Bosses killed during the run.
    pub boss_kills: u64,
    /// Highest wave reached during the run.
    pub best_wave: u32,
}

/// Owns every manager for one run and drives them in tick order.
pub struct Runner {
    tuning: RunTuning,
    world: World,
    scheduler: SpawnScheduler,
    effects: EffectEngine,
    gate: SafeZoneGate,
    resolver: CombatResolver,
    shrine: Shrine,
    progression: Progression,
    summary: RunSummary,
    boss_kill_streak: usize,
}

impl Runner {
    /// Builds a run from tuning, persisted progression, and an RNG seed.
    #[must_use]
    pub fn new(tuning: RunTuning, progression: Progression, seed: u64) -> Self {
        Self {
            world: World::new(tuning.world),
            scheduler: SpawnScheduler::new(SpawnerConfig::new(tuning.spawn, seed)),
            effects: EffectEngine::new(),
            gate: SafeZoneGate::new(tuning.zone, progression.modules),
            resolver: CombatResolver::new(
                tuning.weapons,
                vec![
                    WeaponKind::Bolt,
                    WeaponKind::Boomerang,
                    WeaponKind::RearGuard,
                    WeaponKind::Orbital,
                ],
                tuning.world.collision,
            ),
            shrine: Shrine::new(tuning.shrine),
            progression,
            summary: RunSummary::default(),
            boss_kill_streak: 0,
            tuning,
        }
    }

    /// Current run counters.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Progression with this run's results folded in.
    #[must_use]
    pub fn final_progression(&self) -> Progression {
        let mut progression = self.progression;
        progression.total_xp += self.summary.run_xp;
        progression.kills += self.summary.kills;
        progression.boss_kills += self.summary.boss_kills;
        progression.best_wave = progression.best_wave.max(self.summary.best_wave);
        progression
    }

    /// Player movement speed after the active speed multiplier.
    #[must_use]
    pub fn scaled_speed(&self, base: f32) -> f32 {
        base * self.effects.query(EffectKind::Speed)
    }

    /// Whether the player currently stands inside the safe zone.
    #[must_use]
    pub fn player_protected(&self) -> bool {
        self.gate.is_protecting()
    }

    /// Position of the safe-zone center.
    #[must_use]
    pub fn zone_center(&self) -> Vec2 {
        self.gate.snapshot().center
    }

    /// Radius of the safe zone at its current level.
    #[must_use]
    pub fn zone_radius(&self) -> f32 {
        self.gate.snapshot().radius
    }

    /// Current player position.
    #[must_use]
    pub fn player_position(&self) -> Vec2 {
        query::player(&self.world).position
    }

    /// Whether the player still has health remaining.
    #[must_use]
    pub fn player_alive(&self) -> bool {
        query::player(&self.world).alive
    }

    /// Runs one full simulation tick and returns the HUD projection.
    pub fn advance(&mut self, dt: Duration, desired_velocity: Vec2) -> HudModel {
        let mut events = Vec::new();

        world::apply(
            &mut self.world,
            Command::SetPlayerVelocity {
                velocity: desired_velocity * self.effects.query(EffectKind::Speed),
            },
            &mut events,
        );
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        // Scheduler pass.
        let mut commands = Vec::new();
        self.scheduler.handle(
            &events,
            &query::player(&self.world),
            &query::enemy_view(&self.world),
            query::arena(&self.world),
            self.gate.is_protecting(),
            &mut commands,
        );
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut events);
        }

        // Effect timers.
        self.effects.tick(dt, &mut events);

        // Safe-zone gate. The gate appends notifications to the same event
        // stream it reads, so it consumes a copy of the frame so far.
        let gate_input = events.clone();
        self.gate.handle(
            &gate_input,
            &query::player(&self.world),
            &query::enemy_view(&self.world),
            &mut self.effects,
            &mut commands,
            &mut events,
        );
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut events);
        }

        // Combat pass. Enemy positions are captured first so kill fan-out
        // can still place pickups after the slot is released.
        let enemies_before = query::enemy_view(&self.world);
        let positions: HashMap<EnemyId, Vec2> = enemies_before
            .iter()
            .map(|snapshot| (snapshot.id, snapshot.position))
            .collect();
        self.resolver.handle(
            &events,
            &query::player(&self.world),
            &enemies_before,
            &query::projectile_view(&self.world),
            &self.effects,
            self.gate.may_player_attack(),
            &mut commands,
        );
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut events);
        }

        self.fan_out(&events, &positions);
        self.regen_drip(dt);
        self.auto_upgrade();

        self.summary.best_wave = self.summary.best_wave.max(self.scheduler.wave_number());
        self.project()
    }

    fn fan_out(&mut self, events: &[Event], positions: &HashMap<EnemyId, Vec2>) {
        let mut follow_up = Vec::new();
        for event in events {
            match event {
                Event::EnemyKilled { enemy, xp_value } => {
                    self.summary.kills += 1;
                    self.summary.run_salvage += u64::from(*xp_value);
                    self.progression.salvage += u64::from(*xp_value);
                    if let Some(position) = positions.get(enemy) {
                        follow_up.push(Command::SpawnPickup {
                            position: *position,
                            value: *xp_value,
                        });
                    }
                }
                Event::BossKilled { .. } => {
                    self.summary.boss_kills += 1;
                    let blessing = BOSS_BLESSINGS[self.boss_kill_streak % BOSS_BLESSINGS.len()];
                    self.boss_kill_streak += 1;
                    self.shrine
                        .activate(blessing, &mut self.effects, &mut follow_up);
                    tracing::info!(?blessing, "boss felled, shrine blessing granted");
                }
                Event::PickupCollected { value } => {
                    let scaled =
                        (f64::from(*value) * f64::from(self.effects.query(EffectKind::XpGain)))
                            .round() as u64;
                    self.summary.run_xp += scaled;
                }
                Event::UpgradeCompleted { new_level } => {
                    tracing::info!(new_level, "zone upgrade finished");
                }
                _ => {}
            }
        }
        let mut ignored = Vec::new();
        for command in follow_up {
            world::apply(&mut self.world, command, &mut ignored);
        }
    }

    fn regen_drip(&mut self, dt: Duration) {
        if !self.effects.is_active(EffectKind::Regen) {
            return;
        }
        let rate = self.effects.query(EffectKind::Regen);
        let mut ignored = Vec::new();
        world::apply(
            &mut self.world,
            Command::HealPlayer {
                amount: rate * dt.as_secs_f32(),
            },
            &mut ignored,
        );
    }

    fn auto_upgrade(&mut self) {
        if !self.gate.is_inside() || self.gate.is_upgrading() {
            return;
        }
        if self.gate.level() >= self.tuning.zone.max_level {
            return;
        }
        let mut events = Vec::new();
        if self
            .gate
            .begin_upgrade(&mut self.progression.salvage, &mut events)
        {
            tracing::info!(level = self.gate.level(), "zone upgrade started");
        }
    }

    fn project(&self) -> HudModel {
        HudModel::project(
            self.scheduler.wave_number(),
            self.summary.run_xp,
            query::player(&self.world),
            self.effects.snapshot(),
            self.gate.snapshot(),
            PoolGauges {
                enemies: query::enemy_utilization(&self.world),
                projectiles: query::projectile_utilization(&self.world),
                pickups: query::pickup_utilization(&self.world),
            },
        )
    }
}
