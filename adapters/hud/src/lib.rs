#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only HUD projection.
//!
//! The model is assembled once per frame from query views and snapshots;
//! it never holds references into the simulation and never feeds anything
//! back. Rendering is a plain text projection the CLI prints.

use lastlight_core::{BuffSnapshot, EffectKind, PlayerSnapshot, PoolUtilization, ZoneSnapshot};

/// Pool gauges displayed on the HUD, one per actor pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolGauges {
    /// Enemy pool occupancy.
    pub enemies: PoolUtilization,
    /// Projectile pool occupancy.
    pub projectiles: PoolUtilization,
    /// Pickup pool occupancy.
    pub pickups: PoolUtilization,
}

/// Per-frame view model assembled from simulation queries.
#[derive(Clone, Debug, PartialEq)]
pub struct HudModel {
    /// Wave number currently in effect.
    pub wave: u32,
    /// Experience collected during the current run.
    pub run_xp: u64,
    /// Player state at the end of the frame.
    pub player: PlayerSnapshot,
    /// Active timed modifiers in canonical kind order.
    pub buffs: Vec<BuffSnapshot>,
    /// Safe-zone state at the end of the frame.
    pub zone: ZoneSnapshot,
    /// Actor pool occupancy gauges.
    pub pools: PoolGauges,
}

impl HudModel {
    /// Assembles the model for one frame.
    #[must_use]
    pub fn project(
        wave: u32,
        run_xp: u64,
        player: PlayerSnapshot,
        buffs: Vec<BuffSnapshot>,
        zone: ZoneSnapshot,
        pools: PoolGauges,
    ) -> Self {
        Self {
            wave,
            run_xp,
            player,
            buffs,
            zone,
            pools,
        }
    }

    /// Renders the model as display lines for a text frontend.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "wave {:>3}  hp {:>5.1}/{:<5.1}  xp {}",
            self.wave, self.player.hp, self.player.max_hp, self.run_xp,
        ));
        lines.push(format!(
            "zone L{} r{:.0} {}{}",
            self.zone.level,
            self.zone.radius,
            if self.zone.inside { "inside" } else { "outside" },
            if self.zone.upgrading {
                " (upgrading)"
            } else {
                ""
            },
        ));
        for buff in &self.buffs {
            lines.push(format!(
                "  {} x{:.2} {:.1}s",
                kind_label(buff.kind),
                buff.multiplier,
                buff.remaining.as_secs_f32(),
            ));
        }
        lines.push(format!(
            "pools e {:>2}/{:<3} p {:>3}/{:<3} k {:>2}/{:<3}",
            self.pools.enemies.active,
            self.pools.enemies.capacity,
            self.pools.projectiles.active,
            self.pools.projectiles.capacity,
            self.pools.pickups.active,
            self.pools.pickups.capacity,
        ));
        lines
    }
}

fn kind_label(kind: EffectKind) -> &'static str {
    match kind {
        EffectKind::Damage => "damage",
        EffectKind::Speed => "speed",
        EffectKind::Shield => "shield",
        EffectKind::XpGain => "xp",
        EffectKind::Regen => "regen",
        EffectKind::FireRate => "fire rate",
    }
}
