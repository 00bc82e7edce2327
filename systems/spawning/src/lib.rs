#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave-scaled spawn scheduler.
//!
//! The scheduler owns the wave state: the wave number is a pure function of
//! the cumulative spawn count, the spawn interval shrinks toward a floor as
//! waves advance, and bosses appear on a fixed cadence at most once per wave
//! value. Spawn positions are sampled on an annulus around the player and
//! rejected when they fall outside the arena; a rejected attempt is retried
//! on the next tick rather than producing an out-of-bounds actor.

use std::f32::consts::TAU;
use std::time::Duration;

use glam::Vec2;
use lastlight_core::{
    ArenaBounds, BehaviorKind, BehaviorMode, Command, EnemySeed, EnemyView, Event, PlayerSnapshot,
    SpawnConfig,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const MINIMAL_ROSTER: [BehaviorKind; 2] = [BehaviorKind::Chaser, BehaviorKind::Swarm];
const EXPANDED_ROSTER: [BehaviorKind; 4] = [
    BehaviorKind::Chaser,
    BehaviorKind::Swarm,
    BehaviorKind::Rusher,
    BehaviorKind::Shooter,
];
const FULL_ROSTER: [BehaviorKind; 7] = [
    BehaviorKind::Chaser,
    BehaviorKind::Swarm,
    BehaviorKind::Rusher,
    BehaviorKind::Shooter,
    BehaviorKind::Tank,
    BehaviorKind::Bomber,
    BehaviorKind::Teleporter,
];
const BOSS_ROSTER: [BehaviorKind; 3] = [
    BehaviorKind::Tank,
    BehaviorKind::Bomber,
    BehaviorKind::Teleporter,
];

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn: SpawnConfig,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided tuning and seed.
    #[must_use]
    pub const fn new(spawn: SpawnConfig, rng_seed: u64) -> Self {
        Self { spawn, rng_seed }
    }
}

/// Wave-scaled scheduler that emits spawn and cull commands each tick.
#[derive(Debug)]
pub struct SpawnScheduler {
    config: SpawnConfig,
    rng: ChaCha8Rng,
    accumulator: Duration,
    current_interval: Duration,
    total_spawned: u32,
    last_boss_wave: Option<u32>,
}

impl SpawnScheduler {
    /// Creates a new scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            accumulator: Duration::ZERO,
            current_interval: config.spawn.initial_interval(),
            total_spawned: 0,
            last_boss_wave: None,
            config: config.spawn,
        }
    }

    /// Wave number derived purely from the cumulative spawn count.
    #[must_use]
    pub fn wave_number(&self) -> u32 {
        wave_for_spawn_count(&self.config, self.total_spawned)
    }

    /// Cumulative number of enemies this scheduler has requested.
    #[must_use]
    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    /// Spawn interval currently in effect.
    #[must_use]
    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    /// Wave value the most recent boss spawned on, if any.
    #[must_use]
    pub fn last_boss_wave(&self) -> Option<u32> {
        self.last_boss_wave
    }

    /// Consumes clock events and immutable views to emit spawn commands.
    ///
    /// `player_protected` mirrors the safe-zone gate; when no gate is wired
    /// the caller passes `false` and spawns default to pursuit mode.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        arena: ArenaBounds,
        player_protected: bool,
        out: &mut Vec<Command>,
    ) {
        for snapshot in enemies.iter() {
            if snapshot.position.distance(player.position) > self.config.despawn_distance {
                out.push(Command::DespawnEnemy { enemy: snapshot.id });
            }
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }
        if accumulated.is_zero() {
            return;
        }
        self.accumulator = self.accumulator.saturating_add(accumulated);

        let mut live = enemies.len() as u32;
        while self.accumulator >= self.current_interval && !self.current_interval.is_zero() {
            self.accumulator -= self.current_interval;

            if live >= self.config.max_active {
                continue;
            }

            let Some(position) = self.sample_annulus(player.position, arena) else {
                // Out-of-bounds sample: abort the attempt and retry next tick.
                self.accumulator = self.current_interval;
                break;
            };

            let mode = if player_protected {
                BehaviorMode::Wander
            } else {
                BehaviorMode::Pursuit
            };
            let wave_before = self.wave_number();
            let seed = self.roll_seed(wave_before, mode);
            out.push(Command::SpawnEnemy { seed, position });
            live += 1;
            self.total_spawned += 1;

            let wave_after = self.wave_number();
            if wave_after > wave_before {
                self.advance_wave(wave_after, player.position, arena, mode, &mut live, out);
            }
        }
    }

    fn advance_wave(
        &mut self,
        wave: u32,
        player_position: Vec2,
        arena: ArenaBounds,
        mode: BehaviorMode,
        live: &mut u32,
        out: &mut Vec<Command>,
    ) {
        let shrunk = self
            .current_interval
            .saturating_sub(self.config.interval_decrement());
        self.current_interval = shrunk.max(self.config.interval_floor());

        if self.config.boss_interval == 0 {
            return;
        }
        let due = wave % self.config.boss_interval == 0
            && wave >= self.config.boss_intro_wave
            && self.last_boss_wave != Some(wave);
        if !due {
            return;
        }
        self.last_boss_wave = Some(wave);

        let position = self
            .sample_annulus(player_position, arena)
            .unwrap_or_else(|| arena.clamp(player_position + Vec2::X * self.config.min_distance));
        out.push(Command::SpawnEnemy {
            seed: self.boss_seed(wave, mode),
            position,
        });
        *live += 1;
        self.total_spawned += 1;
    }

    fn sample_annulus(&mut self, center: Vec2, arena: ArenaBounds) -> Option<Vec2> {
        let angle = self.rng.gen::<f32>() * TAU;
        let distance = self.config.min_distance + self.rng.gen::<f32>() * self.config.band;
        let position = center + Vec2::new(angle.cos(), angle.sin()) * distance;
        arena.contains(position).then_some(position)
    }

    fn roll_seed(&mut self, wave: u32, mode: BehaviorMode) -> EnemySeed {
        let roster = roster_for_wave(wave);
        let kind = roster[self.rng.gen_range(0..roster.len())];
        let base = self.config.stats.stats(kind);
        let growth = 1.0 + self.config.stat_growth_per_wave * wave.saturating_sub(1) as f32;

        let elite = wave >= self.config.elite_intro_wave
            && self.rng.gen::<f32>() < elite_chance(&self.config, wave);

        let (hp_mult, damage_mult, xp_mult) = if elite {
            (
                self.config.elite_hp_mult,
                self.config.elite_damage_mult,
                self.config.elite_xp_mult,
            )
        } else {
            (1.0, 1.0, 1.0)
        };

        EnemySeed {
            behavior: kind,
            hp: base.hp * growth * hp_mult,
            speed: base.speed,
            contact_damage: base.contact_damage * growth * damage_mult,
            xp_value: (base.xp_value as f32 * xp_mult).round() as u32,
            elite,
            boss: false,
            mode,
        }
    }

    fn boss_seed(&self, wave: u32, mode: BehaviorMode) -> EnemySeed {
        let index = (wave / self.config.boss_interval) as usize % BOSS_ROSTER.len();
        let kind = BOSS_ROSTER[index];
        let base = self.config.stats.stats(kind);
        let scale = 1.0
            + self.config.boss_scale_rate * wave.saturating_sub(self.config.boss_intro_wave) as f32;

        EnemySeed {
            behavior: kind,
            hp: base.hp * scale,
            speed: base.speed,
            contact_damage: base.contact_damage * scale,
            xp_value: (base.xp_value as f32 * scale).round() as u32,
            elite: false,
            boss: true,
            mode,
        }
    }
}

fn wave_for_spawn_count(config: &SpawnConfig, total_spawned: u32) -> u32 {
    if config.batch_size == 0 {
        return 1;
    }
    total_spawned / config.batch_size + 1
}

fn roster_for_wave(wave: u32) -> &'static [BehaviorKind] {
    match wave {
        0..=2 => &MINIMAL_ROSTER,
        3..=4 => &EXPANDED_ROSTER,
        _ => &FULL_ROSTER,
    }
}

fn elite_chance(config: &SpawnConfig, wave: u32) -> f32 {
    if wave < config.elite_intro_wave {
        return 0.0;
    }
    let ramp = config.elite_base_chance
        + config.elite_chance_step * wave.saturating_sub(config.elite_intro_wave) as f32;
    ramp.clamp(0.0, config.elite_chance_cap.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_number_is_a_pure_function_of_spawn_count() {
        let config = SpawnConfig::default();
        assert_eq!(wave_for_spawn_count(&config, 0), 1);
        assert_eq!(wave_for_spawn_count(&config, config.batch_size - 1), 1);
        assert_eq!(wave_for_spawn_count(&config, config.batch_size), 2);
        assert_eq!(wave_for_spawn_count(&config, config.batch_size * 9), 10);
    }

    #[test]
    fn elite_chance_is_clamped_for_every_wave() {
        let config = SpawnConfig::default();
        assert_eq!(elite_chance(&config, config.elite_intro_wave - 1), 0.0);
        for wave in [
            config.elite_intro_wave,
            config.elite_intro_wave + 10,
            1_000,
            u32::MAX,
        ] {
            let chance = elite_chance(&config, wave);
            assert!(chance >= 0.0, "wave {wave}");
            assert!(chance <= config.elite_chance_cap, "wave {wave}");
        }
    }

    #[test]
    fn roster_gates_follow_the_wave_schedule() {
        assert_eq!(roster_for_wave(1).len(), 2);
        assert_eq!(roster_for_wave(2).len(), 2);
        assert_eq!(roster_for_wave(3).len(), 4);
        assert_eq!(roster_for_wave(5).len(), 7);
        assert_eq!(roster_for_wave(100).len(), 7);
    }

    #[test]
    fn boss_roster_cycles_with_the_cadence() {
        let mut config = SpawnConfig::default();
        config.boss_interval = 5;
        let scheduler = SpawnScheduler::new(Config::new(config, 1));
        let first = scheduler.boss_seed(5, BehaviorMode::Pursuit);
        let second = scheduler.boss_seed(10, BehaviorMode::Pursuit);
        let fourth = scheduler.boss_seed(20, BehaviorMode::Pursuit);
        assert_ne!(first.behavior, second.behavior);
        assert_eq!(first.behavior, fourth.behavior, "cycle wraps");
        assert!(first.boss && second.boss);
    }

    #[test]
    fn boss_stats_scale_linearly_from_the_intro_wave() {
        let mut config = SpawnConfig::default();
        config.boss_interval = 3;
        config.boss_intro_wave = 3;
        config.boss_scale_rate = 0.15;
        config.stats.tank.hp = 500.0;
        config.stats.bomber.hp = 500.0;
        config.stats.teleporter.hp = 500.0;
        let scheduler = SpawnScheduler::new(Config::new(config, 1));
        let boss = scheduler.boss_seed(6, BehaviorMode::Pursuit);
        assert!((boss.hp - 725.0).abs() < 1e-3, "got {}", boss.hp);
    }
}
