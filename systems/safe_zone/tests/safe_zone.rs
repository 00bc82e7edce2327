use std::time::Duration;

use glam::Vec2;
use lastlight_core::{
    BehaviorKind, BehaviorMode, Command, EffectKind, EnemyId, EnemySnapshot, EnemyView, Event,
    ModuleTiers, PlayerSnapshot, ZoneConfig,
};
use lastlight_system_effects::EffectEngine;
use lastlight_system_safe_zone::SafeZoneGate;

fn player_at(position: Vec2) -> PlayerSnapshot {
    PlayerSnapshot {
        position,
        velocity: Vec2::ZERO,
        hp: 60.0,
        max_hp: 100.0,
        alive: true,
    }
}

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

struct Harness {
    gate: SafeZoneGate,
    effects: EffectEngine,
}

impl Harness {
    fn new(config: ZoneConfig) -> Self {
        Self {
            gate: SafeZoneGate::new(config, ModuleTiers::default()),
            effects: EffectEngine::new(),
        }
    }

    fn with_modules(config: ZoneConfig, modules: ModuleTiers) -> Self {
        Self {
            gate: SafeZoneGate::new(config, modules),
            effects: EffectEngine::new(),
        }
    }

    fn tick(
        &mut self,
        millis: u64,
        player_position: Vec2,
        enemies: &EnemyView,
    ) -> (Vec<Command>, Vec<Event>) {
        let input = vec![Event::TimeAdvanced {
            dt: Duration::from_millis(millis),
        }];
        let mut commands = Vec::new();
        let mut events = Vec::new();
        self.gate.handle(
            &input,
            &player_at(player_position),
            enemies,
            &mut self.effects,
            &mut commands,
            &mut events,
        );
        (commands, events)
    }
}

#[test]
fn crossing_in_fires_the_entry_transition_once() {
    let config = ZoneConfig::default();
    let mut harness = Harness::new(config);
    let empty = EnemyView::default();

    let (commands, events) = harness.tick(16, Vec2::ZERO, &empty);
    assert!(events.contains(&Event::ZoneEntered));
    assert!(commands.contains(&Command::SetAllEnemyModes {
        mode: BehaviorMode::Wander,
    }));
    assert!(commands.contains(&Command::HealPlayer {
        amount: config.entry_heal,
    }));
    assert!(harness.effects.is_active(EffectKind::Shield));
    assert!(harness.gate.is_inside());
    assert!(!harness.gate.may_player_attack());

    // Staying inside must not retrigger anything.
    for _ in 0..100 {
        let (commands, events) = harness.tick(16, Vec2::ZERO, &empty);
        assert!(commands.is_empty());
        assert!(events.is_empty());
    }
}

#[test]
fn entry_shield_and_heal_respect_the_cooldown() {
    let mut config = ZoneConfig::default();
    config.shield_cooldown_ms = 20_000;
    config.shield_duration_ms = 1_000;
    let mut harness = Harness::new(config);
    let empty = EnemyView::default();
    let outside = Vec2::new(config.radius(1) + 50.0, 0.0);

    let (_, _) = harness.tick(16, Vec2::ZERO, &empty);
    assert!(harness.effects.is_active(EffectKind::Shield));

    // Leave, wait out the shield but not the cooldown, re-enter.
    let (_, _) = harness.tick(5_000, outside, &empty);
    let mut expirations = Vec::new();
    harness
        .effects
        .tick(Duration::from_millis(5_000), &mut expirations);
    let (commands, events) = harness.tick(16, Vec2::ZERO, &empty);
    assert!(events.contains(&Event::ZoneEntered));
    assert!(
        !harness.effects.is_active(EffectKind::Shield),
        "re-entry inside the cooldown grants no shield",
    );
    assert!(
        !commands
            .iter()
            .any(|command| matches!(command, Command::HealPlayer { .. })),
        "re-entry inside the cooldown must not heal",
    );

    // Leave again and wait past the cooldown.
    let (_, _) = harness.tick(16, outside, &empty);
    let (_, _) = harness.tick(30_000, outside, &empty);
    let (commands, events) = harness.tick(16, Vec2::ZERO, &empty);
    assert!(events.contains(&Event::ZoneEntered));
    assert!(harness.effects.is_active(EffectKind::Shield));
    assert!(commands.contains(&Command::HealPlayer {
        amount: config.entry_heal,
    }));
}

#[test]
fn exit_grants_follow_the_level_thresholds() {
    let mut config = ZoneConfig::default();
    config.upgrade_base_cost = 0;
    config.upgrade_cost_per_level = 0;
    config.upgrade_duration_ms = 100;
    let mut harness = Harness::new(config);
    let empty = EnemyView::default();
    let outside = Vec2::new(config.radius(config.max_level) + 100.0, 0.0);

    // Level 1: leaving grants nothing.
    let (_, _) = harness.tick(16, Vec2::ZERO, &empty);
    let (_, events) = harness.tick(16, outside, &empty);
    assert!(events.contains(&Event::ZoneLeft));
    assert!(!harness.effects.is_active(EffectKind::Regen));
    assert!(!harness.effects.is_active(EffectKind::Damage));

    // Raise the zone to the regen threshold.
    let mut salvage = 0_u64;
    while harness.gate.level() < config.regen_level {
        let mut started = Vec::new();
        assert!(harness.gate.begin_upgrade(&mut salvage, &mut started));
        let (_, _) = harness.tick(200, outside, &empty);
    }
    let (_, _) = harness.tick(16, Vec2::ZERO, &empty);
    let (_, _) = harness.tick(16, outside, &empty);
    assert!(harness.effects.is_active(EffectKind::Regen));
    assert!(!harness.effects.is_active(EffectKind::Damage));

    // Raise to the combat threshold.
    while harness.gate.level() < config.combat_level {
        let mut started = Vec::new();
        assert!(harness.gate.begin_upgrade(&mut salvage, &mut started));
        let (_, _) = harness.tick(200, outside, &empty);
    }
    let (_, _) = harness.tick(16, Vec2::ZERO, &empty);
    let (_, _) = harness.tick(16, outside, &empty);
    assert!(harness.effects.is_active(EffectKind::Damage));
    assert!(harness.effects.is_active(EffectKind::XpGain));
    assert!(!harness.effects.is_active(EffectKind::FireRate));

    // Raise to the tempo threshold.
    while harness.gate.level() < config.tempo_level {
        let mut started = Vec::new();
        assert!(harness.gate.begin_upgrade(&mut salvage, &mut started));
        let (_, _) = harness.tick(200, outside, &empty);
    }
    let (_, _) = harness.tick(16, Vec2::ZERO, &empty);
    let (_, _) = harness.tick(16, outside, &empty);
    assert!(harness.effects.is_active(EffectKind::FireRate));
    assert!(harness.effects.is_active(EffectKind::Speed));
}

#[test]
fn module_tiers_amplify_the_lingering_grants() {
    let mut config = ZoneConfig::default();
    config.regen_level = 1;
    let modules = ModuleTiers {
        regen: 2,
        combat: 0,
        tempo: 0,
    };
    let mut harness = Harness::with_modules(config, modules);
    let empty = EnemyView::default();
    let outside = Vec2::new(config.radius(1) + 50.0, 0.0);

    let (_, _) = harness.tick(16, Vec2::ZERO, &empty);
    let (_, _) = harness.tick(16, outside, &empty);

    let lingering = config.lingering;
    let expected_rate = lingering.regen_rate + lingering.magnitude_bonus_per_tier * 2.0;
    assert!((harness.effects.query(EffectKind::Regen) - expected_rate).abs() < 1e-6);
    assert_eq!(
        harness.effects.remaining(EffectKind::Regen),
        Some(Duration::from_millis(
            u64::from(lingering.base_duration_ms)
                + u64::from(lingering.duration_bonus_per_tier_ms) * 2,
        )),
    );
}

#[test]
fn upgrade_refuses_without_salvage_and_deducts_on_success() {
    let config = ZoneConfig::default();
    let mut harness = Harness::new(config);
    let mut events = Vec::new();

    let cost = config.upgrade_cost(1);
    let mut poor = cost - 1;
    assert!(!harness.gate.begin_upgrade(&mut poor, &mut events));
    assert_eq!(poor, cost - 1, "refusal leaves the balance untouched");
    assert!(events.is_empty());

    let mut rich = cost + 10;
    assert!(harness.gate.begin_upgrade(&mut rich, &mut events));
    assert_eq!(rich, 10);
    assert_eq!(events, vec![Event::UpgradeStarted]);
    assert!(harness.gate.is_upgrading());

    // A second upgrade cannot start while one is running.
    let mut more = u64::MAX;
    assert!(!harness.gate.begin_upgrade(&mut more, &mut events));
}

#[test]
fn upgrading_zone_suspends_protection_and_ejects_intruders() {
    let mut config = ZoneConfig::default();
    config.upgrade_base_cost = 0;
    config.upgrade_cost_per_level = 0;
    config.upgrade_duration_ms = 1_000;
    let mut harness = Harness::new(config);
    let empty = EnemyView::default();

    let (_, _) = harness.tick(16, Vec2::ZERO, &empty);
    assert!(harness.gate.is_inside());

    let mut salvage = 0_u64;
    let mut events = Vec::new();
    assert!(harness.gate.begin_upgrade(&mut salvage, &mut events));

    let intruder = Vec2::new(40.0, 0.0);
    let enemies = EnemyView::from_snapshots(vec![enemy_at(3, intruder)]);
    let (commands, events) = harness.tick(100, Vec2::ZERO, &enemies);

    assert!(
        events.contains(&Event::ZoneLeft),
        "protection lapses while upgrading even though the player stayed put",
    );
    assert!(!harness.gate.is_inside());
    let ejected = commands.iter().any(|command| {
        matches!(
            command,
            Command::EjectEnemy { enemy, position, impulse }
                if *enemy == EnemyId::new(3)
                    && position.distance(config.center)
                        >= config.radius(1) + config.eject_buffer - 1e-3
                    && impulse.length() > 0.0
        )
    });
    assert!(ejected, "intruder must be moved onto the outer ring");
}

#[test]
fn upgrade_completes_after_its_duration_and_raises_the_level() {
    let mut config = ZoneConfig::default();
    config.upgrade_base_cost = 0;
    config.upgrade_cost_per_level = 0;
    config.upgrade_duration_ms = 1_000;
    let mut harness = Harness::new(config);
    let empty = EnemyView::default();
    let outside = Vec2::new(config.radius(config.max_level) + 100.0, 0.0);

    let mut salvage = 0_u64;
    let mut events = Vec::new();
    assert!(harness.gate.begin_upgrade(&mut salvage, &mut events));

    let (_, events) = harness.tick(600, outside, &empty);
    assert!(events.is_empty());
    assert!(harness.gate.is_upgrading());

    let (_, events) = harness.tick(600, outside, &empty);
    assert_eq!(events, vec![Event::UpgradeCompleted { new_level: 2 }]);
    assert_eq!(harness.gate.level(), 2);
    assert!(!harness.gate.is_upgrading());
    assert!((harness.gate.snapshot().radius - config.radius(2)).abs() < 1e-6);
}

#[test]
fn level_cap_blocks_further_upgrades() {
    let mut config = ZoneConfig::default();
    config.upgrade_base_cost = 0;
    config.upgrade_cost_per_level = 0;
    config.upgrade_duration_ms = 100;
    let mut harness = Harness::new(config);
    let empty = EnemyView::default();
    let outside = Vec2::new(config.radius(config.max_level) + 100.0, 0.0);

    let mut salvage = 0_u64;
    while harness.gate.level() < config.max_level {
        let mut events = Vec::new();
        assert!(harness.gate.begin_upgrade(&mut salvage, &mut events));
        let (_, _) = harness.tick(200, outside, &empty);
    }
    let mut events = Vec::new();
    assert!(!harness.gate.begin_upgrade(&mut salvage, &mut events));
    assert_eq!(harness.gate.level(), config.max_level);
}
