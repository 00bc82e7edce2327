#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weapon firing and hit resolution.
//!
//! The resolver owns per-weapon cooldowns and a per-projectile hit ledger.
//! A projectile damages a given enemy at most once per pass: boomerangs open
//! a fresh pass when they reverse onto the return leg, and orbitals replace
//! the pass ledger with a per-target re-hit cooldown. Enemy-to-player contact
//! damage resolves here as well, throttled per enemy and suppressed entirely
//! while a shield effect is active.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use glam::Vec2;
use lastlight_core::{
    CollisionConfig, Command, EffectKind, EnemyId, EnemyView, Event, MotionKind, PlayerSnapshot,
    ProjectileId, ProjectileSeed, ProjectileView, WeaponKind, WeaponTable,
};
use lastlight_system_effects::EffectEngine;

#[derive(Debug)]
struct WeaponSlot {
    kind: WeaponKind,
    cooldown: Duration,
}

#[derive(Debug, Default)]
struct HitLedger {
    hit: HashSet<EnemyId>,
    returning_seen: bool,
    rehit: HashMap<EnemyId, Duration>,
}

/// Resolves weapon fire, projectile hits, and contact damage each tick.
#[derive(Debug)]
pub struct CombatResolver {
    table: WeaponTable,
    collision: CollisionConfig,
    weapons: Vec<WeaponSlot>,
    ledgers: HashMap<ProjectileId, HitLedger>,
    touch_cooldowns: HashMap<EnemyId, Duration>,
}

impl CombatResolver {
    /// Creates a resolver with every equipped weapon ready to fire.
    #[must_use]
    pub fn new(table: WeaponTable, equipped: Vec<WeaponKind>, collision: CollisionConfig) -> Self {
        Self {
            table,
            collision,
            weapons: equipped
                .into_iter()
                .map(|kind| WeaponSlot {
                    kind,
                    cooldown: Duration::ZERO,
                })
                .collect(),
            ledgers: HashMap::new(),
            touch_cooldowns: HashMap::new(),
        }
    }

    /// Weapon archetypes currently equipped, in firing order.
    #[must_use]
    pub fn equipped(&self) -> Vec<WeaponKind> {
        self.weapons.iter().map(|slot| slot.kind).collect()
    }

    /// Remaining cooldown of the first equipped weapon of the provided kind.
    #[must_use]
    pub fn cooldown_remaining(&self, kind: WeaponKind) -> Option<Duration> {
        self.weapons
            .iter()
            .find(|slot| slot.kind == kind)
            .map(|slot| slot.cooldown)
    }

    /// Consumes clock events and immutable views to emit combat commands.
    ///
    /// `may_attack` mirrors the safe-zone gate's combat-permission query;
    /// weapons hold fire while it is false, but hits already in flight and
    /// contact damage still resolve.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        projectiles: &ProjectileView,
        effects: &EffectEngine,
        may_attack: bool,
        out: &mut Vec<Command>,
    ) {
        let mut dt = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt: advanced } = event {
                dt = dt.saturating_add(*advanced);
            }
        }

        self.recover_cooldowns(dt, effects);
        self.sync_ledgers(projectiles, dt);

        if may_attack {
            self.fire(player, enemies, out);
        }
        self.resolve_hits(enemies, projectiles, effects, out);
        self.resolve_contact(dt, player, enemies, effects, out);
    }

    fn recover_cooldowns(&mut self, dt: Duration, effects: &EffectEngine) {
        let rate = effects.query(EffectKind::FireRate).max(0.0);
        let recovered = dt.mul_f32(rate);
        for slot in &mut self.weapons {
            slot.cooldown = slot.cooldown.saturating_sub(recovered);
        }
    }

    fn sync_ledgers(&mut self, projectiles: &ProjectileView, dt: Duration) {
        let live: HashSet<ProjectileId> =
            projectiles.iter().map(|snapshot| snapshot.id).collect();
        self.ledgers.retain(|id, _| live.contains(id));

        for snapshot in projectiles.iter() {
            let ledger = self.ledgers.entry(snapshot.id).or_default();
            for remaining in ledger.rehit.values_mut() {
                *remaining = remaining.saturating_sub(dt);
            }
            ledger.rehit.retain(|_, remaining| !remaining.is_zero());
            if snapshot.returning && !ledger.returning_seen {
                ledger.returning_seen = true;
                ledger.hit.clear();
            }
        }
    }

    fn fire(&mut self, player: &PlayerSnapshot, enemies: &EnemyView, out: &mut Vec<Command>) {
        let target = nearest_direction(player.position, enemies);
        for slot in &mut self.weapons {
            if !slot.cooldown.is_zero() {
                continue;
            }
            let spec = self.table.spec(slot.kind);
            let heading = match spec.motion {
                // Orbitals need no target; they anchor to the player.
                MotionKind::Orbit => Vec2::X,
                MotionKind::Straight | MotionKind::Boomerang | MotionKind::RearFired => {
                    match target {
                        Some(direction) => direction,
                        None => continue,
                    }
                }
            };
            out.push(Command::SpawnProjectile {
                seed: ProjectileSeed {
                    weapon: slot.kind,
                    motion: spec.motion,
                    speed: spec.speed,
                    radius: spec.radius,
                    lifetime: spec.lifetime(),
                    orbit_radius: spec.orbit_radius,
                },
                position: player.position,
                heading,
            });
            slot.cooldown = spec.cooldown();
        }
    }

    fn resolve_hits(
        &mut self,
        enemies: &EnemyView,
        projectiles: &ProjectileView,
        effects: &EffectEngine,
        out: &mut Vec<Command>,
    ) {
        let damage_multiplier = effects.query(EffectKind::Damage);
        for snapshot in projectiles.iter() {
            let spec = self.table.spec(snapshot.weapon);
            let Some(ledger) = self.ledgers.get_mut(&snapshot.id) else {
                continue;
            };
            let mut despawned = false;
            for enemy in enemies.iter() {
                let reach = snapshot.radius + self.collision.enemy_radius;
                if snapshot.position.distance(enemy.position) >= reach {
                    continue;
                }
                match spec.motion {
                    MotionKind::Orbit => {
                        if ledger.rehit.contains_key(&enemy.id) {
                            continue;
                        }
                        let _ = ledger.rehit.insert(enemy.id, spec.rehit());
                    }
                    _ => {
                        if !ledger.hit.insert(enemy.id) {
                            continue;
                        }
                    }
                }
                out.push(Command::DamageEnemy {
                    enemy: enemy.id,
                    amount: spec.damage * damage_multiplier,
                });
                if !spec.piercing {
                    out.push(Command::DespawnProjectile {
                        projectile: snapshot.id,
                    });
                    despawned = true;
                    break;
                }
            }
            if despawned {
                let _ = self.ledgers.remove(&snapshot.id);
            }
        }
    }

    fn resolve_contact(
        &mut self,
        dt: Duration,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        effects: &EffectEngine,
        out: &mut Vec<Command>,
    ) {
        for remaining in self.touch_cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(dt);
        }
        self.touch_cooldowns.retain(|_, remaining| !remaining.is_zero());

        if effects.is_active(EffectKind::Shield) {
            return;
        }
        let reach = self.collision.enemy_radius + self.collision.player_radius;
        for enemy in enemies.iter() {
            if enemy.position.distance(player.position) >= reach {
                continue;
            }
            if self.touch_cooldowns.contains_key(&enemy.id) {
                continue;
            }
            let _ = self
                .touch_cooldowns
                .insert(enemy.id, self.collision.touch_cooldown());
            out.push(Command::DamagePlayer {
                amount: enemy.contact_damage,
            });
        }
    }
}

fn nearest_direction(origin: Vec2, enemies: &EnemyView) -> Option<Vec2> {
    enemies
        .iter()
        .min_by(|a, b| {
            let da = a.position.distance_squared(origin);
            let db = b.position.distance_squared(origin);
            da.total_cmp(&db)
        })
        .and_then(|enemy| (enemy.position - origin).try_normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastlight_core::{BehaviorKind, BehaviorMode, EnemySnapshot};

    fn enemy_at(id: u32, position: Vec2) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position,
            behavior: BehaviorKind::Chaser,
            mode: BehaviorMode::Pursuit,
            hp: 10.0,
            max_hp: 10.0,
            contact_damage: 5.0,
            xp_value: 1,
            elite: false,
            boss: false,
        }
    }

    #[test]
    fn nearest_direction_picks_the_closest_enemy() {
        let view = EnemyView::from_snapshots(vec![
            enemy_at(0, Vec2::new(100.0, 0.0)),
            enemy_at(1, Vec2::new(0.0, 30.0)),
        ]);
        let direction = nearest_direction(Vec2::ZERO, &view).expect("enemies exist");
        assert!((direction - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn nearest_direction_is_none_without_enemies_or_at_zero_range() {
        assert!(nearest_direction(Vec2::ZERO, &EnemyView::default()).is_none());
        let overlapping = EnemyView::from_snapshots(vec![enemy_at(0, Vec2::ZERO)]);
        assert!(nearest_direction(Vec2::ZERO, &overlapping).is_none());
    }

    #[test]
    fn equipped_order_is_preserved() {
        let resolver = CombatResolver::new(
            WeaponTable::default(),
            vec![WeaponKind::Orbital, WeaponKind::Bolt],
            CollisionConfig::default(),
        );
        assert_eq!(
            resolver.equipped(),
            vec![WeaponKind::Orbital, WeaponKind::Bolt],
        );
        assert_eq!(
            resolver.cooldown_remaining(WeaponKind::Bolt),
            Some(Duration::ZERO),
        );
        assert_eq!(resolver.cooldown_remaining(WeaponKind::Boomerang), None);
    }
}
