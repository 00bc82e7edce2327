#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for a Lastlight run.
//!
//! The world owns every pooled actor (enemies, projectiles, pickups) plus the
//! player record and the arena rectangle. All mutation flows through
//! [`apply`]; systems and adapters observe the result through the read-only
//! [`query`] module and the [`lastlight_core::Event`] stream.

use std::time::Duration;

use glam::Vec2;
use lastlight_core::{
    BehaviorKind, BehaviorMode, Command, EnemyId, Event, MotionKind, WeaponKind, WorldConfig,
    ArenaBounds,
};

pub mod pool;

use pool::{Pool, Recyclable};

const WANDER_SEED: u64 = 0x6c61_7374_6c69_6768;
const WANDER_SPEED_SCALE: f32 = 0.5;
const PICKUP_HOMING_SPEED: f32 = 260.0;

/// Represents the authoritative state of one run.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    arena: ArenaBounds,
    player: Player,
    enemies: Pool<Enemy>,
    projectiles: Pool<Projectile>,
    pickups: Pool<Pickup>,
    tick_index: u64,
}

impl World {
    /// Creates a new world ready for simulation.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            arena: ArenaBounds::from_size(config.arena_width, config.arena_height),
            player: Player::fresh(config.player_max_hp),
            enemies: Pool::with_capacity(config.pools.enemies),
            projectiles: Pool::with_capacity(config.pools.projectiles),
            pickups: Pool::with_capacity(config.pools.pickups),
            tick_index: 0,
            config,
        }
    }

    fn integrate(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let step = dt.as_secs_f32();

        self.player.position = self
            .arena
            .clamp(self.player.position + self.player.velocity * step);
        let player_position = self.player.position;

        for (_, enemy) in self.enemies.iter_live_mut() {
            match enemy.mode {
                BehaviorMode::Pursuit => {
                    let to_player = player_position - enemy.position;
                    let direction = safe_normalize(to_player);
                    enemy.velocity = direction * enemy.speed;
                }
                BehaviorMode::Wander => {
                    enemy.velocity = enemy.wander_heading * enemy.speed * WANDER_SPEED_SCALE;
                }
            }
            enemy.position = self.arena.clamp(enemy.position + enemy.velocity * step);
        }

        let mut expired: Vec<usize> = Vec::new();
        for (index, projectile) in self.projectiles.iter_live_mut() {
            projectile.age = projectile.age.saturating_add(dt);
            if projectile.age >= projectile.lifetime {
                expired.push(index);
                continue;
            }
            match projectile.motion {
                MotionKind::Straight | MotionKind::RearFired => {
                    projectile.position += projectile.heading * projectile.speed * step;
                }
                MotionKind::Boomerang => {
                    if !projectile.returning && projectile.age * 2 >= projectile.lifetime {
                        projectile.returning = true;
                        projectile.heading = -projectile.heading;
                    }
                    projectile.position += projectile.heading * projectile.speed * step;
                }
                MotionKind::Orbit => {
                    projectile.orbit_angle += projectile.speed * step;
                    let offset = Vec2::new(
                        projectile.orbit_angle.cos(),
                        projectile.orbit_angle.sin(),
                    ) * projectile.orbit_radius;
                    projectile.position = player_position + offset;
                }
            }
        }
        for index in expired {
            let _ = self.projectiles.release(index);
        }

        let collect_radius = self.config.collision.pickup_radius;
        let mut collected: Vec<usize> = Vec::new();
        for (index, pickup) in self.pickups.iter_live_mut() {
            if pickup.homing {
                let direction = safe_normalize(player_position - pickup.position);
                pickup.position += direction * PICKUP_HOMING_SPEED * step;
            }
            if pickup.position.distance(player_position) <= collect_radius {
                collected.push(index);
            }
        }
        for index in collected {
            let value = self.pickups.get(index).map_or(0, |pickup| pickup.value);
            let _ = self.pickups.release(index);
            out_events.push(Event::PickupCollected { value });
        }
    }

    fn kill_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let index = enemy.get() as usize;
        let Some(record) = self.enemies.get(index) else {
            return;
        };
        let xp_value = record.xp_value;
        let boss = record.boss;
        let _ = self.enemies.release(index);
        out_events.push(Event::EnemyKilled { enemy, xp_value });
        if boss {
            out_events.push(Event::BossKilled { enemy });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureArena { width, height } => {
            world.arena = ArenaBounds::from_size(width, height);
            world.enemies.clear();
            world.projectiles.clear();
            world.pickups.clear();
            world.player = Player::fresh(world.config.player_max_hp);
            world.tick_index = 0;
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            world.integrate(dt, out_events);
        }
        Command::SetPlayerVelocity { velocity } => {
            world.player.velocity = velocity;
        }
        Command::SpawnEnemy { seed, position } => {
            // Pool exhaustion drops the request silently; backpressure, not an error.
            if let Some((index, enemy)) = world.enemies.acquire() {
                enemy.position = position;
                enemy.velocity = Vec2::ZERO;
                enemy.hp = seed.hp;
                enemy.max_hp = seed.hp;
                enemy.speed = seed.speed;
                enemy.contact_damage = seed.contact_damage;
                enemy.xp_value = seed.xp_value;
                enemy.behavior = seed.behavior;
                enemy.mode = seed.mode;
                enemy.elite = seed.elite;
                enemy.boss = seed.boss;
                enemy.wander_heading = wander_heading(index);
                out_events.push(Event::EnemySpawned {
                    enemy: EnemyId::new(index as u32),
                    boss: seed.boss,
                });
            }
        }
        Command::DespawnEnemy { enemy } => {
            let _ = world.enemies.release(enemy.get() as usize);
        }
        Command::SetAllEnemyModes { mode } => {
            for (_, enemy) in world.enemies.iter_live_mut() {
                enemy.mode = mode;
            }
        }
        Command::EjectEnemy {
            enemy,
            position,
            impulse,
        } => {
            let clamped = world.arena.clamp(position);
            if let Some(record) = world.enemies.get_mut(enemy.get() as usize) {
                record.position = clamped;
                record.velocity = impulse;
            }
        }
        Command::DamageEnemy { enemy, amount } => {
            let index = enemy.get() as usize;
            let dead = match world.enemies.get_mut(index) {
                Some(record) => {
                    record.hp = (record.hp - amount).max(0.0);
                    record.hp <= 0.0
                }
                None => false,
            };
            if dead {
                world.kill_enemy(enemy, out_events);
            }
        }
        Command::DamagePlayer { amount } => {
            world.player.hp = (world.player.hp - amount).max(0.0);
        }
        Command::HealPlayer { amount } => {
            world.player.hp = (world.player.hp + amount).min(world.player.max_hp);
        }
        Command::SpawnProjectile {
            seed,
            position,
            heading,
        } => {
            if let Some((_, projectile)) = world.projectiles.acquire() {
                let direction = safe_normalize(heading);
                let direction = match seed.motion {
                    MotionKind::RearFired => -direction,
                    _ => direction,
                };
                projectile.weapon = seed.weapon;
                projectile.motion = seed.motion;
                projectile.heading = direction;
                projectile.speed = seed.speed;
                projectile.radius = seed.radius;
                projectile.age = Duration::ZERO;
                projectile.lifetime = seed.lifetime;
                projectile.returning = false;
                projectile.orbit_radius = seed.orbit_radius;
                projectile.orbit_angle = direction.y.atan2(direction.x);
                projectile.position = match seed.motion {
                    MotionKind::Orbit => {
                        world.player.position
                            + Vec2::new(
                                projectile.orbit_angle.cos(),
                                projectile.orbit_angle.sin(),
                            ) * seed.orbit_radius
                    }
                    _ => position,
                };
            }
        }
        Command::DespawnProjectile { projectile } => {
            let _ = world.projectiles.release(projectile.get() as usize);
        }
        Command::SpawnPickup { position, value } => {
            if let Some((_, pickup)) = world.pickups.acquire() {
                pickup.position = position;
                pickup.value = value;
                pickup.homing = false;
            }
        }
        Command::MagnetizePickups => {
            for (_, pickup) in world.pickups.iter_live_mut() {
                pickup.homing = true;
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use lastlight_core::{
        ArenaBounds, EnemyId, EnemySnapshot, EnemyView, PickupId, PickupSnapshot, PickupView,
        PlayerSnapshot, PoolUtilization, ProjectileId, ProjectileSnapshot, ProjectileView,
        WELCOME_BANNER,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(_world: &World) -> &'static str {
        WELCOME_BANNER
    }

    /// Provides the arena rectangle actors are confined to.
    #[must_use]
    pub fn arena(world: &World) -> ArenaBounds {
        world.arena
    }

    /// Number of ticks processed since the run began.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            velocity: world.player.velocity,
            hp: world.player.hp,
            max_hp: world.player.max_hp,
            alive: world.player.hp > 0.0,
        }
    }

    /// Captures a read-only view of every live enemy.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter_live()
            .map(|(index, enemy)| EnemySnapshot {
                id: EnemyId::new(index as u32),
                position: enemy.position,
                behavior: enemy.behavior,
                mode: enemy.mode,
                hp: enemy.hp,
                max_hp: enemy.max_hp,
                contact_damage: enemy.contact_damage,
                xp_value: enemy.xp_value,
                elite: enemy.elite,
                boss: enemy.boss,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of every live projectile.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter_live()
            .map(|(index, projectile)| ProjectileSnapshot {
                id: ProjectileId::new(index as u32),
                weapon: projectile.weapon,
                motion: projectile.motion,
                position: projectile.position,
                radius: projectile.radius,
                returning: projectile.returning,
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of every live pickup.
    #[must_use]
    pub fn pickup_view(world: &World) -> PickupView {
        let snapshots: Vec<PickupSnapshot> = world
            .pickups
            .iter_live()
            .map(|(index, pickup)| PickupSnapshot {
                id: PickupId::new(index as u32),
                position: pickup.position,
                value: pickup.value,
                homing: pickup.homing,
            })
            .collect();
        PickupView::from_snapshots(snapshots)
    }

    /// Occupancy gauge for the enemy pool.
    #[must_use]
    pub fn enemy_utilization(world: &World) -> PoolUtilization {
        world.enemies.utilization()
    }

    /// Occupancy gauge for the projectile pool.
    #[must_use]
    pub fn projectile_utilization(world: &World) -> PoolUtilization {
        world.projectiles.utilization()
    }

    /// Occupancy gauge for the pickup pool.
    #[must_use]
    pub fn pickup_utilization(world: &World) -> PoolUtilization {
        world.pickups.utilization()
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Vec2,
    velocity: Vec2,
    hp: f32,
    max_hp: f32,
}

impl Player {
    fn fresh(max_hp: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            hp: max_hp,
            max_hp,
        }
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    position: Vec2,
    velocity: Vec2,
    hp: f32,
    max_hp: f32,
    speed: f32,
    contact_damage: f32,
    xp_value: u32,
    behavior: BehaviorKind,
    mode: BehaviorMode,
    elite: bool,
    boss: bool,
    wander_heading: Vec2,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            hp: 0.0,
            max_hp: 0.0,
            speed: 0.0,
            contact_damage: 0.0,
            xp_value: 0,
            behavior: BehaviorKind::Chaser,
            mode: BehaviorMode::Pursuit,
            elite: false,
            boss: false,
            wander_heading: Vec2::X,
        }
    }
}

impl Recyclable for Enemy {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug)]
struct Projectile {
    weapon: WeaponKind,
    motion: MotionKind,
    position: Vec2,
    heading: Vec2,
    speed: f32,
    radius: f32,
    age: Duration,
    lifetime: Duration,
    returning: bool,
    orbit_angle: f32,
    orbit_radius: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            weapon: WeaponKind::Bolt,
            motion: MotionKind::Straight,
            position: Vec2::ZERO,
            heading: Vec2::X,
            speed: 0.0,
            radius: 0.0,
            age: Duration::ZERO,
            lifetime: Duration::ZERO,
            returning: false,
            orbit_angle: 0.0,
            orbit_radius: 0.0,
        }
    }
}

impl Recyclable for Projectile {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Pickup {
    position: Vec2,
    value: u32,
    homing: bool,
}

impl Recyclable for Pickup {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn safe_normalize(vector: Vec2) -> Vec2 {
    let length = vector.length();
    if length <= f32::EPSILON {
        Vec2::X
    } else {
        vector / length
    }
}

fn wander_heading(slot: usize) -> Vec2 {
    let mixed = WANDER_SEED
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(slot as u64)
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1);
    let angle = (mixed % 6_283) as f32 / 1_000.0;
    Vec2::new(angle.cos(), angle.sin())
}
