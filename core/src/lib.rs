#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lastlight run engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches. All tunable
//! simulation data lives in the configuration tables at the bottom of this
//! crate; nothing in the engine hard-codes a balance number.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when a run boots.
pub const WELCOME_BANNER: &str = "Welcome to Lastlight.";

/// Unique identifier assigned to an enemy, carrying its pool slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided slot value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile, carrying its pool slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided slot value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pickup, carrying its pool slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided slot value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Axis-aligned rectangular arena centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    half_width: f32,
    half_height: f32,
}

impl ArenaBounds {
    /// Creates arena bounds from full width and height in world units.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            half_width: (width * 0.5).max(0.0),
            half_height: (height * 0.5).max(0.0),
        }
    }

    /// Full arena width in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Full arena height in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    /// Reports whether the provided point lies inside the arena.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x.abs() <= self.half_width && point.y.abs() <= self.half_height
    }

    /// Clamps the provided point to the arena interior.
    #[must_use]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(-self.half_width, self.half_width),
            point.y.clamp(-self.half_height, self.half_height),
        )
    }
}

/// Behavioral archetype stamped onto an enemy at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BehaviorKind {
    /// Walks straight at the player.
    Chaser,
    /// Keeps distance and fires (resolved as slow pursuit here).
    Shooter,
    /// Fast, fragile, heavy contact damage.
    Rusher,
    /// Slow with a large health reserve.
    Tank,
    /// Cheap and numerous.
    Swarm,
    /// Detonates on contact for burst damage.
    Bomber,
    /// Periodically relocates toward the player.
    Teleporter,
}

/// Movement disposition of a live enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorMode {
    /// Actively steering toward the player.
    Pursuit,
    /// Drifting along an idle heading while the player is protected.
    Wander,
}

/// Kinds of timed multipliers managed by the effect engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectKind {
    /// Scales outgoing weapon damage.
    Damage,
    /// Scales player movement speed.
    Speed,
    /// Suppresses incoming contact damage entirely while active.
    Shield,
    /// Scales experience gained from kills and pickups.
    XpGain,
    /// Restores player health per second while active.
    Regen,
    /// Scales weapon cooldown recovery.
    FireRate,
}

impl EffectKind {
    /// Every effect kind in canonical display order.
    pub const ALL: [EffectKind; 6] = [
        EffectKind::Damage,
        EffectKind::Speed,
        EffectKind::Shield,
        EffectKind::XpGain,
        EffectKind::Regen,
        EffectKind::FireRate,
    ];
}

/// Weapon archetypes available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Straight-flying bolt toward the nearest enemy.
    Bolt,
    /// Out-then-return blade that re-arms on the turn.
    Boomerang,
    /// Bolt fired away from the current threat direction.
    RearGuard,
    /// Blade circling the player at a fixed radius.
    Orbital,
}

impl WeaponKind {
    /// Every weapon archetype in canonical order.
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Bolt,
        WeaponKind::Boomerang,
        WeaponKind::RearGuard,
        WeaponKind::Orbital,
    ];
}

/// Flight model applied to a projectile by the world integrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionKind {
    /// Constant velocity along the spawn heading.
    Straight,
    /// Flies out for half its lifetime, then reverses heading.
    Boomerang,
    /// Constant velocity along the negated spawn heading.
    RearFired,
    /// Fixed-radius circle around the player at constant angular speed.
    Orbit,
}

/// Blessings granted by activating a shrine landmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShrineBlessing {
    /// One-shot heal applied immediately; bypasses the timer map.
    Heal,
    /// One-shot pull of every live pickup toward the player.
    Magnet,
    /// Timed outgoing-damage multiplier.
    DamageBoost,
    /// Timed movement-speed multiplier.
    SpeedBoost,
    /// Timed invulnerability window.
    Shield,
    /// Timed experience multiplier.
    XpBoost,
}

/// Fully-resolved stat block handed to the world when spawning an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySeed {
    /// Behavioral archetype of the enemy.
    pub behavior: BehaviorKind,
    /// Starting and maximum hit points.
    pub hp: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Damage dealt to the player on contact.
    pub contact_damage: f32,
    /// Experience awarded on death.
    pub xp_value: u32,
    /// Whether the enemy rolled as an elite variant.
    pub elite: bool,
    /// Whether the enemy is a boss.
    pub boss: bool,
    /// Movement disposition to start in.
    pub mode: BehaviorMode,
}

/// Fully-resolved kinematics handed to the world when spawning a projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSeed {
    /// Weapon archetype that produced the projectile.
    pub weapon: WeaponKind,
    /// Flight model integrated by the world.
    pub motion: MotionKind,
    /// Travel speed in world units per second (angular for orbit).
    pub speed: f32,
    /// Collision radius in world units.
    pub radius: f32,
    /// Total lifetime before the projectile expires.
    pub lifetime: Duration,
    /// Orbit radius in world units; meaningful for [`MotionKind::Orbit`].
    pub orbit_radius: f32,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Reconfigures the arena rectangle, clearing all pooled actors.
    ConfigureArena {
        /// Full arena width in world units.
        width: f32,
        /// Full arena height in world units.
        height: f32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the player's velocity for subsequent integration.
    SetPlayerVelocity {
        /// New velocity in world units per second, already buff-scaled.
        velocity: Vec2,
    },
    /// Requests that an enemy be drawn from the pool and initialized.
    SpawnEnemy {
        /// Resolved stat block for the new enemy.
        seed: EnemySeed,
        /// Spawn position in world units.
        position: Vec2,
    },
    /// Releases an enemy back to the pool without a death event.
    DespawnEnemy {
        /// Identifier of the enemy to cull.
        enemy: EnemyId,
    },
    /// Switches every live enemy to the provided movement disposition.
    SetAllEnemyModes {
        /// Disposition to apply.
        mode: BehaviorMode,
    },
    /// Hard-repositions an enemy and replaces its velocity.
    EjectEnemy {
        /// Identifier of the enemy to relocate.
        enemy: EnemyId,
        /// Position the enemy is moved to.
        position: Vec2,
        /// Outward impulse applied as the new velocity.
        impulse: Vec2,
    },
    /// Applies damage to an enemy, releasing it on death.
    DamageEnemy {
        /// Identifier of the enemy taking damage.
        enemy: EnemyId,
        /// Damage amount after all multipliers.
        amount: f32,
    },
    /// Applies damage to the player, clamped at zero health.
    DamagePlayer {
        /// Damage amount after all suppression checks.
        amount: f32,
    },
    /// Restores player health, clamped at the maximum.
    HealPlayer {
        /// Amount of health restored.
        amount: f32,
    },
    /// Requests that a projectile be drawn from the pool and launched.
    SpawnProjectile {
        /// Resolved kinematics for the new projectile.
        seed: ProjectileSeed,
        /// Launch position in world units.
        position: Vec2,
        /// Launch heading; need not be normalized.
        heading: Vec2,
    },
    /// Releases a projectile back to the pool.
    DespawnProjectile {
        /// Identifier of the projectile to remove.
        projectile: ProjectileId,
    },
    /// Requests that a pickup be drawn from the pool and placed.
    SpawnPickup {
        /// Placement position in world units.
        position: Vec2,
        /// Experience value collected with the pickup.
        value: u32,
    },
    /// Flags every live pickup to home toward the player until collected.
    MagnetizePickups,
}

/// Events broadcast after processing commands and system updates.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy was drawn from the pool and placed.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Whether the enemy is a boss.
        boss: bool,
    },
    /// Reports that an enemy died to damage. Emitted exactly once per death.
    EnemyKilled {
        /// Identifier of the enemy that died.
        enemy: EnemyId,
        /// Experience value awarded for the kill.
        xp_value: u32,
    },
    /// Reports that a boss died. Accompanies the matching [`Event::EnemyKilled`].
    BossKilled {
        /// Identifier of the boss that died.
        enemy: EnemyId,
    },
    /// Reports that the player collected a pickup.
    PickupCollected {
        /// Experience value carried by the pickup.
        value: u32,
    },
    /// Reports that the player crossed into the safe zone.
    ZoneEntered,
    /// Reports that the player crossed out of the safe zone.
    ZoneLeft,
    /// Reports that a timed modifier reached zero and was removed.
    BuffExpired {
        /// Kind of the modifier that expired.
        kind: EffectKind,
    },
    /// Reports that a zone upgrade began and protection is suspended.
    UpgradeStarted,
    /// Reports that a zone upgrade finished.
    UpgradeCompleted {
        /// Zone level now in effect.
        new_level: u32,
    },
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Current position in world units.
    pub position: Vec2,
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Current health.
    pub hp: f32,
    /// Maximum health.
    pub max_hp: f32,
    /// Whether the player still has health remaining.
    pub alive: bool,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Current position in world units.
    pub position: Vec2,
    /// Behavioral archetype.
    pub behavior: BehaviorKind,
    /// Current movement disposition.
    pub mode: BehaviorMode,
    /// Current health.
    pub hp: f32,
    /// Maximum health.
    pub max_hp: f32,
    /// Damage dealt to the player on contact.
    pub contact_damage: f32,
    /// Experience awarded on death.
    pub xp_value: u32,
    /// Whether the enemy rolled as an elite variant.
    pub elite: bool,
    /// Whether the enemy is a boss.
    pub boss: bool,
}

/// Read-only snapshot describing every live enemy.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Weapon archetype that produced the projectile.
    pub weapon: WeaponKind,
    /// Flight model integrated by the world.
    pub motion: MotionKind,
    /// Current position in world units.
    pub position: Vec2,
    /// Collision radius in world units.
    pub radius: f32,
    /// Whether a boomerang has reversed onto its return leg.
    pub returning: bool,
}

/// Read-only snapshot describing every live projectile.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Reports whether the view captured no projectiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single pickup used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Identifier of the pickup.
    pub id: PickupId,
    /// Current position in world units.
    pub position: Vec2,
    /// Experience value collected with the pickup.
    pub value: u32,
    /// Whether the pickup is homing toward the player.
    pub homing: bool,
}

/// Read-only snapshot describing every live pickup.
#[derive(Clone, Debug, Default)]
pub struct PickupView {
    snapshots: Vec<PickupSnapshot>,
}

impl PickupView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PickupSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PickupSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PickupSnapshot> {
        self.snapshots
    }
}

/// Active timed modifier exposed to presentation collaborators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuffSnapshot {
    /// Kind of the modifier.
    pub kind: EffectKind,
    /// Multiplier currently in effect.
    pub multiplier: f32,
    /// Time remaining before expiry.
    pub remaining: Duration,
}

/// Read-only description of the safe zone state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneSnapshot {
    /// Zone center in world units.
    pub center: Vec2,
    /// Current zone level.
    pub level: u32,
    /// Protection radius at the current level.
    pub radius: f32,
    /// Whether the player is currently inside the protected radius.
    pub inside: bool,
    /// Whether an upgrade is in progress, suspending protection.
    pub upgrading: bool,
}

/// Occupancy gauge for one actor pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolUtilization {
    /// Number of slots currently active.
    pub active: usize,
    /// Total preallocated slot count.
    pub capacity: usize,
}

impl PoolUtilization {
    /// Fraction of the pool currently in use, in `0.0..=1.0`.
    #[must_use]
    pub fn load(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.active as f32 / self.capacity as f32
    }
}

/// Preallocated slot counts for every actor pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Enemy pool capacity.
    pub enemies: usize,
    /// Projectile pool capacity.
    pub projectiles: usize,
    /// Pickup pool capacity.
    pub pickups: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            enemies: 64,
            projectiles: 128,
            pickups: 96,
        }
    }
}

/// Base stat block for one enemy archetype before wave scaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Base hit points.
    pub hp: f32,
    /// Base movement speed in world units per second.
    pub speed: f32,
    /// Base contact damage.
    pub contact_damage: f32,
    /// Base experience value.
    pub xp_value: u32,
}

/// Tunable base stats for every enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStatsTable {
    /// Stats for [`BehaviorKind::Chaser`].
    pub chaser: EnemyStats,
    /// Stats for [`BehaviorKind::Shooter`].
    pub shooter: EnemyStats,
    /// Stats for [`BehaviorKind::Rusher`].
    pub rusher: EnemyStats,
    /// Stats for [`BehaviorKind::Tank`].
    pub tank: EnemyStats,
    /// Stats for [`BehaviorKind::Swarm`].
    pub swarm: EnemyStats,
    /// Stats for [`BehaviorKind::Bomber`].
    pub bomber: EnemyStats,
    /// Stats for [`BehaviorKind::Teleporter`].
    pub teleporter: EnemyStats,
}

impl EnemyStatsTable {
    /// Looks up the base stat block for the provided archetype.
    #[must_use]
    pub const fn stats(&self, kind: BehaviorKind) -> EnemyStats {
        match kind {
            BehaviorKind::Chaser => self.chaser,
            BehaviorKind::Shooter => self.shooter,
            BehaviorKind::Rusher => self.rusher,
            BehaviorKind::Tank => self.tank,
            BehaviorKind::Swarm => self.swarm,
            BehaviorKind::Bomber => self.bomber,
            BehaviorKind::Teleporter => self.teleporter,
        }
    }
}

impl Default for EnemyStatsTable {
    fn default() -> Self {
        Self {
            chaser: EnemyStats {
                hp: 24.0,
                speed: 70.0,
                contact_damage: 8.0,
                xp_value: 3,
            },
            shooter: EnemyStats {
                hp: 18.0,
                speed: 55.0,
                contact_damage: 6.0,
                xp_value: 4,
            },
            rusher: EnemyStats {
                hp: 12.0,
                speed: 130.0,
                contact_damage: 14.0,
                xp_value: 5,
            },
            tank: EnemyStats {
                hp: 90.0,
                speed: 40.0,
                contact_damage: 12.0,
                xp_value: 8,
            },
            swarm: EnemyStats {
                hp: 8.0,
                speed: 85.0,
                contact_damage: 4.0,
                xp_value: 2,
            },
            bomber: EnemyStats {
                hp: 20.0,
                speed: 75.0,
                contact_damage: 24.0,
                xp_value: 6,
            },
            teleporter: EnemyStats {
                hp: 28.0,
                speed: 60.0,
                contact_damage: 10.0,
                xp_value: 7,
            },
        }
    }
}

/// Tunable parameters governing the spawn scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Inner radius of the spawn annulus around the player.
    pub min_distance: f32,
    /// Width of the spawn annulus beyond the inner radius.
    pub band: f32,
    /// Distance from the player beyond which enemies are culled.
    pub despawn_distance: f32,
    /// Spawn interval at wave one, in milliseconds.
    pub initial_interval_ms: u32,
    /// Lower bound the spawn interval never shrinks past, in milliseconds.
    pub interval_floor_ms: u32,
    /// Interval reduction applied on each wave advance, in milliseconds.
    pub interval_decrement_ms: u32,
    /// Cumulative spawn count that advances the wave number by one.
    pub batch_size: u32,
    /// Maximum simultaneously live enemies the scheduler will request.
    pub max_active: u32,
    /// Boss cadence: a boss wave occurs every this many waves.
    pub boss_interval: u32,
    /// First wave at which bosses may appear.
    pub boss_intro_wave: u32,
    /// Linear boss stat growth per wave past the intro wave.
    pub boss_scale_rate: f32,
    /// First wave at which elites may roll.
    pub elite_intro_wave: u32,
    /// Elite probability at the intro wave.
    pub elite_base_chance: f32,
    /// Elite probability growth per wave past the intro wave.
    pub elite_chance_step: f32,
    /// Upper bound on the elite probability.
    pub elite_chance_cap: f32,
    /// Elite hit point multiplier.
    pub elite_hp_mult: f32,
    /// Elite contact damage multiplier.
    pub elite_damage_mult: f32,
    /// Elite experience multiplier.
    pub elite_xp_mult: f32,
    /// Linear stat growth applied to ordinary spawns per wave.
    pub stat_growth_per_wave: f32,
    /// Base stats per archetype.
    pub stats: EnemyStatsTable,
}

impl SpawnConfig {
    /// Spawn interval at wave one.
    #[must_use]
    pub const fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms as u64)
    }

    /// Lower bound the spawn interval never shrinks past.
    #[must_use]
    pub const fn interval_floor(&self) -> Duration {
        Duration::from_millis(self.interval_floor_ms as u64)
    }

    /// Interval reduction applied on each wave advance.
    #[must_use]
    pub const fn interval_decrement(&self) -> Duration {
        Duration::from_millis(self.interval_decrement_ms as u64)
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_distance: 400.0,
            band: 100.0,
            despawn_distance: 900.0,
            initial_interval_ms: 1_800,
            interval_floor_ms: 450,
            interval_decrement_ms: 90,
            batch_size: 12,
            max_active: 48,
            boss_interval: 5,
            boss_intro_wave: 5,
            boss_scale_rate: 0.15,
            elite_intro_wave: 7,
            elite_base_chance: 0.05,
            elite_chance_step: 0.02,
            elite_chance_cap: 0.35,
            elite_hp_mult: 2.5,
            elite_damage_mult: 1.5,
            elite_xp_mult: 3.0,
            stat_growth_per_wave: 0.06,
            stats: EnemyStatsTable::default(),
        }
    }
}

/// Module tiers unlocked through cross-run progression, amplifying
/// the lingering grants installed when the player leaves the safe zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleTiers {
    /// Tier of the regeneration module.
    pub regen: u32,
    /// Tier of the combat module (damage and experience grants).
    pub combat: u32,
    /// Tier of the tempo module (fire-rate and speed grants).
    pub tempo: u32,
}

/// Magnitudes and durations for the lingering zone-exit grants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LingeringConfig {
    /// Health restored per second while the regen grant is active.
    pub regen_rate: f32,
    /// Outgoing damage multiplier granted at the combat threshold.
    pub damage_multiplier: f32,
    /// Experience multiplier granted at the combat threshold.
    pub xp_multiplier: f32,
    /// Cooldown-recovery multiplier granted at the tempo threshold.
    pub fire_rate_multiplier: f32,
    /// Movement-speed multiplier granted at the tempo threshold.
    pub speed_multiplier: f32,
    /// Base duration of every lingering grant, in milliseconds.
    pub base_duration_ms: u32,
    /// Extra duration per module tier, in milliseconds.
    pub duration_bonus_per_tier_ms: u32,
    /// Extra multiplier magnitude per module tier.
    pub magnitude_bonus_per_tier: f32,
}

impl Default for LingeringConfig {
    fn default() -> Self {
        Self {
            regen_rate: 2.0,
            damage_multiplier: 1.2,
            xp_multiplier: 1.25,
            fire_rate_multiplier: 1.3,
            speed_multiplier: 1.15,
            base_duration_ms: 12_000,
            duration_bonus_per_tier_ms: 4_000,
            magnitude_bonus_per_tier: 0.05,
        }
    }
}

/// Tunable parameters governing the safe zone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Zone center in world units.
    pub center: Vec2,
    /// Protection radius at level one.
    pub base_radius: f32,
    /// Radius gained per level above one.
    pub radius_per_level: f32,
    /// Highest level the zone can reach.
    pub max_level: u32,
    /// Width of the ring enemies are ejected onto during upgrades.
    pub eject_buffer: f32,
    /// Speed of the outward impulse applied to ejected enemies.
    pub eject_speed: f32,
    /// Cooldown of the instantaneous entry shield, in milliseconds.
    pub shield_cooldown_ms: u32,
    /// Duration of the instantaneous entry shield, in milliseconds.
    pub shield_duration_ms: u32,
    /// Health restored alongside the entry shield.
    pub entry_heal: f32,
    /// Time a zone upgrade takes to complete, in milliseconds.
    pub upgrade_duration_ms: u32,
    /// Salvage cost of the first upgrade.
    pub upgrade_base_cost: u64,
    /// Additional salvage cost per current level.
    pub upgrade_cost_per_level: u64,
    /// Minimum level that grants regeneration on exit.
    pub regen_level: u32,
    /// Minimum level that grants damage and experience boosts on exit.
    pub combat_level: u32,
    /// Exact level that grants fire-rate and speed boosts on exit.
    pub tempo_level: u32,
    /// Magnitudes and durations of the lingering grants.
    pub lingering: LingeringConfig,
}

impl ZoneConfig {
    /// Protection radius at the provided level.
    #[must_use]
    pub fn radius(&self, level: u32) -> f32 {
        self.base_radius + self.radius_per_level * level.saturating_sub(1) as f32
    }

    /// Salvage cost of upgrading away from the provided level.
    #[must_use]
    pub const fn upgrade_cost(&self, level: u32) -> u64 {
        self.upgrade_base_cost + self.upgrade_cost_per_level * level as u64
    }

    /// Cooldown of the instantaneous entry shield.
    #[must_use]
    pub const fn shield_cooldown(&self) -> Duration {
        Duration::from_millis(self.shield_cooldown_ms as u64)
    }

    /// Duration of the instantaneous entry shield.
    #[must_use]
    pub const fn shield_duration(&self) -> Duration {
        Duration::from_millis(self.shield_duration_ms as u64)
    }

    /// Time a zone upgrade takes to complete.
    #[must_use]
    pub const fn upgrade_duration(&self) -> Duration {
        Duration::from_millis(self.upgrade_duration_ms as u64)
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            base_radius: 160.0,
            radius_per_level: 40.0,
            max_level: 5,
            eject_buffer: 24.0,
            eject_speed: 320.0,
            shield_cooldown_ms: 20_000,
            shield_duration_ms: 4_000,
            entry_heal: 25.0,
            upgrade_duration_ms: 8_000,
            upgrade_base_cost: 50,
            upgrade_cost_per_level: 75,
            regen_level: 3,
            combat_level: 4,
            tempo_level: 5,
            lingering: LingeringConfig::default(),
        }
    }
}

/// Magnitudes and durations for shrine blessings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShrineConfig {
    /// Health restored by the one-shot heal.
    pub heal_amount: f32,
    /// Outgoing damage multiplier of the timed damage boost.
    pub damage_multiplier: f32,
    /// Duration of the timed damage boost, in milliseconds.
    pub damage_duration_ms: u32,
    /// Movement-speed multiplier of the timed speed boost.
    pub speed_multiplier: f32,
    /// Duration of the timed speed boost, in milliseconds.
    pub speed_duration_ms: u32,
    /// Duration of the timed shield, in milliseconds.
    pub shield_duration_ms: u32,
    /// Experience multiplier of the timed boost.
    pub xp_multiplier: f32,
    /// Duration of the timed experience boost, in milliseconds.
    pub xp_duration_ms: u32,
}

impl Default for ShrineConfig {
    fn default() -> Self {
        Self {
            heal_amount: 40.0,
            damage_multiplier: 1.25,
            damage_duration_ms: 30_000,
            speed_multiplier: 1.2,
            speed_duration_ms: 20_000,
            shield_duration_ms: 6_000,
            xp_multiplier: 1.5,
            xp_duration_ms: 45_000,
        }
    }
}

/// Stat row for one weapon archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Damage applied per hit before multipliers.
    pub damage: f32,
    /// Cooldown between shots, in milliseconds.
    pub cooldown_ms: u32,
    /// Travel speed in world units per second (radians per second for orbit).
    pub speed: f32,
    /// Whether the projectile survives its first hit.
    pub piercing: bool,
    /// Flight model integrated by the world.
    pub motion: MotionKind,
    /// Collision radius in world units.
    pub radius: f32,
    /// Lifetime before the projectile expires, in milliseconds.
    pub lifetime_ms: u32,
    /// Orbit radius in world units; meaningful for [`MotionKind::Orbit`].
    pub orbit_radius: f32,
    /// Per-target re-hit cooldown for orbit weapons, in milliseconds.
    pub rehit_ms: u32,
}

impl WeaponSpec {
    /// Cooldown between shots.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms as u64)
    }

    /// Lifetime before the projectile expires.
    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms as u64)
    }

    /// Per-target re-hit cooldown for orbit weapons.
    #[must_use]
    pub const fn rehit(&self) -> Duration {
        Duration::from_millis(self.rehit_ms as u64)
    }
}

/// Tunable stat rows for every weapon archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    /// Stats for [`WeaponKind::Bolt`].
    pub bolt: WeaponSpec,
    /// Stats for [`WeaponKind::Boomerang`].
    pub boomerang: WeaponSpec,
    /// Stats for [`WeaponKind::RearGuard`].
    pub rear_guard: WeaponSpec,
    /// Stats for [`WeaponKind::Orbital`].
    pub orbital: WeaponSpec,
}

impl WeaponTable {
    /// Looks up the stat row for the provided weapon archetype.
    #[must_use]
    pub const fn spec(&self, kind: WeaponKind) -> WeaponSpec {
        match kind {
            WeaponKind::Bolt => self.bolt,
            WeaponKind::Boomerang => self.boomerang,
            WeaponKind::RearGuard => self.rear_guard,
            WeaponKind::Orbital => self.orbital,
        }
    }
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            bolt: WeaponSpec {
                damage: 12.0,
                cooldown_ms: 600,
                speed: 420.0,
                piercing: false,
                motion: MotionKind::Straight,
                radius: 8.0,
                lifetime_ms: 1_500,
                orbit_radius: 0.0,
                rehit_ms: 0,
            },
            boomerang: WeaponSpec {
                damage: 9.0,
                cooldown_ms: 1_400,
                speed: 300.0,
                piercing: true,
                motion: MotionKind::Boomerang,
                radius: 12.0,
                lifetime_ms: 2_400,
                orbit_radius: 0.0,
                rehit_ms: 0,
            },
            rear_guard: WeaponSpec {
                damage: 10.0,
                cooldown_ms: 900,
                speed: 380.0,
                piercing: false,
                motion: MotionKind::RearFired,
                radius: 8.0,
                lifetime_ms: 1_500,
                orbit_radius: 0.0,
                rehit_ms: 0,
            },
            orbital: WeaponSpec {
                damage: 7.0,
                cooldown_ms: 4_000,
                speed: 3.2,
                piercing: true,
                motion: MotionKind::Orbit,
                radius: 10.0,
                lifetime_ms: 6_000,
                orbit_radius: 90.0,
                rehit_ms: 700,
            },
        }
    }
}

/// Collision radii shared by the combat resolver and the world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Player body radius in world units.
    pub player_radius: f32,
    /// Enemy body radius in world units.
    pub enemy_radius: f32,
    /// Radius at which the player collects a pickup.
    pub pickup_radius: f32,
    /// Minimum delay between contact hits from the same enemy, in milliseconds.
    pub touch_cooldown_ms: u32,
}

impl CollisionConfig {
    /// Minimum delay between contact hits from the same enemy.
    #[must_use]
    pub const fn touch_cooldown(&self) -> Duration {
        Duration::from_millis(self.touch_cooldown_ms as u64)
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            player_radius: 14.0,
            enemy_radius: 16.0,
            pickup_radius: 18.0,
            touch_cooldown_ms: 600,
        }
    }
}

/// Construction parameters for the authoritative world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Full arena width in world units.
    pub arena_width: f32,
    /// Full arena height in world units.
    pub arena_height: f32,
    /// Preallocated slot counts for every actor pool.
    pub pools: PoolConfig,
    /// Maximum player health.
    pub player_max_hp: f32,
    /// Collision radii used by the world and combat resolver.
    pub collision: CollisionConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            arena_width: 2_400.0,
            arena_height: 2_400.0,
            pools: PoolConfig::default(),
            player_max_hp: 100.0,
            collision: CollisionConfig::default(),
        }
    }
}

/// Cross-run progression carried between runs. Constructed explicitly at
/// startup and passed to consumers; never ambient global state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// Lifetime experience accumulated across runs.
    pub total_xp: u64,
    /// Salvage available to fund zone upgrades.
    pub salvage: u64,
    /// Highest wave number reached in any run.
    pub best_wave: u32,
    /// Lifetime enemy kills.
    pub kills: u64,
    /// Lifetime boss kills.
    pub boss_kills: u64,
    /// Unlocked zone module tiers.
    pub modules: ModuleTiers,
}

/// String-keyed save boundary through which progression is persisted.
///
/// The simulation core never touches storage directly; adapters inject an
/// implementation at startup and decide how values are encoded.
pub trait ProgressionStore {
    /// Failure type surfaced by the concrete store.
    type Error;

    /// Reads the value stored under `key`, if any exists.
    fn get(&mut self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Writes `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: String) -> Result<(), Self::Error>;

    /// Forces buffered writes out to the backing medium.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
