#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timed-multiplier store and the shrine landmark that feeds it.
//!
//! The engine keeps at most one authoritative entry per [`EffectKind`].
//! Granting a kind that is already present replaces its remaining time and
//! magnitude outright; grants refresh, they never stack.

use std::time::Duration;

use lastlight_core::{BuffSnapshot, Command, EffectKind, Event, ShrineBlessing, ShrineConfig};

/// Neutral multiplier returned when no entry of a kind is active.
pub const NEUTRAL_MULTIPLIER: f32 = 1.0;

#[derive(Clone, Copy, Debug)]
struct TimedModifier {
    kind: EffectKind,
    multiplier: f32,
    remaining: Duration,
}

/// Keyed store of independently-timed multipliers.
#[derive(Debug, Default)]
pub struct EffectEngine {
    entries: Vec<TimedModifier>,
}

impl EffectEngine {
    /// Creates an engine with no active modifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a modifier, overwriting any existing entry of the same kind.
    pub fn grant(&mut self, kind: EffectKind, multiplier: f32, duration: Duration) {
        let entry = TimedModifier {
            kind,
            multiplier,
            remaining: duration,
        };
        match self.entries.iter_mut().find(|existing| existing.kind == kind) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Returns the stored multiplier while the entry has time remaining,
    /// otherwise the neutral multiplier.
    #[must_use]
    pub fn query(&self, kind: EffectKind) -> f32 {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && !entry.remaining.is_zero())
            .map_or(NEUTRAL_MULTIPLIER, |entry| entry.multiplier)
    }

    /// Time remaining on the entry of the provided kind, if one is active.
    #[must_use]
    pub fn remaining(&self, kind: EffectKind) -> Option<Duration> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && !entry.remaining.is_zero())
            .map(|entry| entry.remaining)
    }

    /// Reports whether an entry of the provided kind is active.
    #[must_use]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining(kind).is_some()
    }

    /// Decrements every entry, removing those that reach zero and emitting
    /// [`Event::BuffExpired`] for each removal.
    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for entry in &mut self.entries {
            entry.remaining = entry.remaining.saturating_sub(dt);
        }
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].remaining.is_zero() {
                let expired = self.entries.remove(index);
                out_events.push(Event::BuffExpired { kind: expired.kind });
            } else {
                index += 1;
            }
        }
    }

    /// Captures the active modifiers in canonical kind order for the HUD.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BuffSnapshot> {
        let mut snapshots: Vec<BuffSnapshot> = self
            .entries
            .iter()
            .filter(|entry| !entry.remaining.is_zero())
            .map(|entry| BuffSnapshot {
                kind: entry.kind,
                multiplier: entry.multiplier,
                remaining: entry.remaining,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.kind);
        snapshots
    }
}

/// Interactable landmark granting instant blessings.
///
/// Heal and magnet resolve as one-shot commands and bypass the timer map
/// entirely; every other blessing routes through [`EffectEngine::grant`].
#[derive(Clone, Copy, Debug)]
pub struct Shrine {
    config: ShrineConfig,
}

impl Shrine {
    /// Creates a shrine using the provided blessing magnitudes.
    #[must_use]
    pub fn new(config: ShrineConfig) -> Self {
        Self { config }
    }

    /// Applies the chosen blessing, emitting commands for one-shot effects
    /// and installing timed grants for the rest.
    pub fn activate(
        &self,
        blessing: ShrineBlessing,
        effects: &mut EffectEngine,
        out: &mut Vec<Command>,
    ) {
        match blessing {
            ShrineBlessing::Heal => {
                out.push(Command::HealPlayer {
                    amount: self.config.heal_amount,
                });
            }
            ShrineBlessing::Magnet => {
                out.push(Command::MagnetizePickups);
            }
            ShrineBlessing::DamageBoost => {
                effects.grant(
                    EffectKind::Damage,
                    self.config.damage_multiplier,
                    Duration::from_millis(u64::from(self.config.damage_duration_ms)),
                );
            }
            ShrineBlessing::SpeedBoost => {
                effects.grant(
                    EffectKind::Speed,
                    self.config.speed_multiplier,
                    Duration::from_millis(u64::from(self.config.speed_duration_ms)),
                );
            }
            ShrineBlessing::Shield => {
                effects.grant(
                    EffectKind::Shield,
                    0.0,
                    Duration::from_millis(u64::from(self.config.shield_duration_ms)),
                );
            }
            ShrineBlessing::XpBoost => {
                effects.grant(
                    EffectKind::XpGain,
                    self.config.xp_multiplier,
                    Duration::from_millis(u64::from(self.config.xp_duration_ms)),
                );
            }
        }
    }
}
