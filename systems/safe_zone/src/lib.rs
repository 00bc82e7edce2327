#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Safe-zone gate: entry and exit transitions, upgrades, and the grants
//! they install.
//!
//! The gate derives containment from position every tick; crossing the
//! boundary fires edge-triggered transitions. While an upgrade runs the zone
//! protects nobody, ejects intruding enemies onto a ring outside the radius,
//! and completes after a fixed duration regardless of what happens around it.

use std::time::Duration;

use glam::Vec2;
use lastlight_core::{
    BehaviorMode, Command, EffectKind, EnemyView, Event, LingeringConfig, ModuleTiers,
    PlayerSnapshot, ZoneConfig, ZoneSnapshot,
};
use lastlight_system_effects::EffectEngine;

/// Shield entries carry no multiplier; presence alone suppresses damage.
const SHIELD_MULTIPLIER: f32 = 0.0;

/// Edge-triggered gate around the safe zone.
#[derive(Debug)]
pub struct SafeZoneGate {
    config: ZoneConfig,
    modules: ModuleTiers,
    level: u32,
    inside: bool,
    shield_cooldown: Duration,
    upgrade_remaining: Option<Duration>,
}

impl SafeZoneGate {
    /// Creates a gate at level one with the entry shield ready.
    #[must_use]
    pub fn new(config: ZoneConfig, modules: ModuleTiers) -> Self {
        Self {
            config,
            modules,
            level: 1,
            inside: false,
            shield_cooldown: Duration::ZERO,
            upgrade_remaining: None,
        }
    }

    /// Current zone level.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether the player was inside the protected radius after the last
    /// update.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Whether an upgrade is currently suspending protection.
    #[must_use]
    pub fn is_upgrading(&self) -> bool {
        self.upgrade_remaining.is_some()
    }

    /// Whether the zone currently shields the player. Containment already
    /// excludes upgrade windows, so this mirrors [`SafeZoneGate::is_inside`].
    #[must_use]
    pub fn is_protecting(&self) -> bool {
        self.inside
    }

    /// Whether the player may fire weapons. Attacks are forbidden inside the
    /// zone.
    #[must_use]
    pub fn may_player_attack(&self) -> bool {
        !self.inside
    }

    /// Captures the zone state for the HUD.
    #[must_use]
    pub fn snapshot(&self) -> ZoneSnapshot {
        ZoneSnapshot {
            center: self.config.center,
            level: self.level,
            radius: self.config.radius(self.level),
            inside: self.inside,
            upgrading: self.upgrade_remaining.is_some(),
        }
    }

    /// Starts an upgrade, deducting its salvage cost.
    ///
    /// Refuses when an upgrade is already running, the zone is at its
    /// maximum level, or the balance cannot cover the cost. On refusal the
    /// balance is untouched.
    pub fn begin_upgrade(&mut self, salvage: &mut u64, out_events: &mut Vec<Event>) -> bool {
        if self.upgrade_remaining.is_some() || self.level >= self.config.max_level {
            return false;
        }
        let cost = self.config.upgrade_cost(self.level);
        if *salvage < cost {
            return false;
        }
        *salvage -= cost;
        self.upgrade_remaining = Some(self.config.upgrade_duration());
        out_events.push(Event::UpgradeStarted);
        true
    }

    /// Advances timers, resolves the containment edge, and emits the
    /// resulting commands and notifications.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        effects: &mut EffectEngine,
        out: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        let mut dt = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt: advanced } = event {
                dt = dt.saturating_add(*advanced);
            }
        }
        self.shield_cooldown = self.shield_cooldown.saturating_sub(dt);

        if let Some(remaining) = self.upgrade_remaining {
            self.eject_intruders(enemies, out);
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.upgrade_remaining = None;
                self.level += 1;
                out_events.push(Event::UpgradeCompleted {
                    new_level: self.level,
                });
            } else {
                self.upgrade_remaining = Some(remaining);
            }
        }

        let radius = self.config.radius(self.level);
        let inside_now = self.upgrade_remaining.is_none()
            && player.position.distance(self.config.center) < radius;

        if inside_now && !self.inside {
            self.on_enter(effects, out, out_events);
        } else if !inside_now && self.inside {
            self.on_exit(effects, out, out_events);
        }
        self.inside = inside_now;
    }

    fn on_enter(
        &mut self,
        effects: &mut EffectEngine,
        out: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        out_events.push(Event::ZoneEntered);
        out.push(Command::SetAllEnemyModes {
            mode: BehaviorMode::Wander,
        });
        if self.shield_cooldown.is_zero() {
            out.push(Command::HealPlayer {
                amount: self.config.entry_heal,
            });
            effects.grant(
                EffectKind::Shield,
                SHIELD_MULTIPLIER,
                self.config.shield_duration(),
            );
            self.shield_cooldown = self.config.shield_cooldown();
        }
    }

    fn on_exit(
        &mut self,
        effects: &mut EffectEngine,
        out: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        out_events.push(Event::ZoneLeft);
        out.push(Command::SetAllEnemyModes {
            mode: BehaviorMode::Pursuit,
        });

        let lingering = self.config.lingering;
        if self.level >= self.config.regen_level {
            let (magnitude, duration) = tiered(
                lingering.regen_rate,
                &lingering,
                self.modules.regen,
            );
            effects.grant(EffectKind::Regen, magnitude, duration);
        }
        if self.level >= self.config.combat_level {
            let tier = self.modules.combat;
            let (damage, duration) = tiered(lingering.damage_multiplier, &lingering, tier);
            effects.grant(EffectKind::Damage, damage, duration);
            let (xp, duration) = tiered(lingering.xp_multiplier, &lingering, tier);
            effects.grant(EffectKind::XpGain, xp, duration);
        }
        if self.level == self.config.tempo_level {
            let tier = self.modules.tempo;
            let (fire_rate, duration) = tiered(lingering.fire_rate_multiplier, &lingering, tier);
            effects.grant(EffectKind::FireRate, fire_rate, duration);
            let (speed, duration) = tiered(lingering.speed_multiplier, &lingering, tier);
            effects.grant(EffectKind::Speed, speed, duration);
        }
    }

    fn eject_intruders(&self, enemies: &EnemyView, out: &mut Vec<Command>) {
        let radius = self.config.radius(self.level);
        for snapshot in enemies.iter() {
            if snapshot.position.distance(self.config.center) >= radius {
                continue;
            }
            let direction = outward(snapshot.position - self.config.center);
            out.push(Command::EjectEnemy {
                enemy: snapshot.id,
                position: self.config.center + direction * (radius + self.config.eject_buffer),
                impulse: direction * self.config.eject_speed,
            });
        }
    }
}

fn tiered(base: f32, lingering: &LingeringConfig, tier: u32) -> (f32, Duration) {
    let magnitude = base + lingering.magnitude_bonus_per_tier * tier as f32;
    let duration = Duration::from_millis(
        u64::from(lingering.base_duration_ms)
            + u64::from(lingering.duration_bonus_per_tier_ms) * u64::from(tier),
    );
    (magnitude, duration)
}

fn outward(offset: Vec2) -> Vec2 {
    offset.try_normalize().unwrap_or(Vec2::X)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_zero_uses_the_base_magnitude_and_duration() {
        let lingering = LingeringConfig::default();
        let (magnitude, duration) = tiered(1.2, &lingering, 0);
        assert_eq!(magnitude, 1.2);
        assert_eq!(
            duration,
            Duration::from_millis(u64::from(lingering.base_duration_ms)),
        );
    }

    #[test]
    fn tiers_extend_both_magnitude_and_duration() {
        let lingering = LingeringConfig::default();
        let (magnitude, duration) = tiered(1.2, &lingering, 3);
        assert!((magnitude - 1.35).abs() < 1e-6);
        assert_eq!(duration, Duration::from_millis(12_000 + 3 * 4_000));
    }

    #[test]
    fn outward_direction_defaults_on_the_degenerate_center_case() {
        assert_eq!(outward(Vec2::ZERO), Vec2::X);
    }
}
