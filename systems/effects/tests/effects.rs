use std::time::Duration;

use lastlight_core::{Command, EffectKind, Event, ShrineBlessing, ShrineConfig};
use lastlight_system_effects::{EffectEngine, Shrine, NEUTRAL_MULTIPLIER};

#[test]
fn regrant_replaces_remaining_time_and_magnitude() {
    let mut engine = EffectEngine::new();
    let mut events = Vec::new();

    engine.grant(EffectKind::Damage, 1.25, Duration::from_millis(30_000));
    engine.tick(Duration::from_millis(5_000), &mut events);
    engine.grant(EffectKind::Damage, 1.5, Duration::from_millis(10_000));

    assert_eq!(engine.query(EffectKind::Damage), 1.5);
    let remaining = engine
        .remaining(EffectKind::Damage)
        .expect("grant is active");
    assert_eq!(
        remaining,
        Duration::from_millis(10_000),
        "full replace, not additive and not max-of-durations",
    );
    assert!(events.is_empty());
}

#[test]
fn grants_expire_and_emit_exactly_one_notification() {
    let mut engine = EffectEngine::new();
    let mut events = Vec::new();

    engine.grant(EffectKind::XpGain, 1.5, Duration::from_millis(30_000));
    engine.tick(Duration::from_millis(30_001), &mut events);

    assert_eq!(engine.query(EffectKind::XpGain), NEUTRAL_MULTIPLIER);
    assert_eq!(
        events,
        vec![Event::BuffExpired {
            kind: EffectKind::XpGain,
        }],
    );

    events.clear();
    engine.tick(Duration::from_millis(1_000), &mut events);
    assert!(events.is_empty(), "expiry notifies only once");
}

#[test]
fn kinds_expire_independently() {
    let mut engine = EffectEngine::new();
    let mut events = Vec::new();

    engine.grant(EffectKind::Damage, 1.2, Duration::from_millis(1_000));
    engine.grant(EffectKind::Speed, 1.3, Duration::from_millis(3_000));

    engine.tick(Duration::from_millis(1_500), &mut events);
    assert_eq!(
        events,
        vec![Event::BuffExpired {
            kind: EffectKind::Damage,
        }],
    );
    assert_eq!(engine.query(EffectKind::Damage), NEUTRAL_MULTIPLIER);
    assert_eq!(engine.query(EffectKind::Speed), 1.3);

    events.clear();
    engine.tick(Duration::from_millis(1_500), &mut events);
    assert_eq!(
        events,
        vec![Event::BuffExpired {
            kind: EffectKind::Speed,
        }],
    );
}

#[test]
fn snapshot_orders_by_canonical_kind() {
    let mut engine = EffectEngine::new();
    engine.grant(EffectKind::FireRate, 1.3, Duration::from_secs(10));
    engine.grant(EffectKind::Damage, 1.2, Duration::from_secs(10));
    engine.grant(EffectKind::Regen, 2.0, Duration::from_secs(10));

    let kinds: Vec<EffectKind> = engine
        .snapshot()
        .into_iter()
        .map(|snapshot| snapshot.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![EffectKind::Damage, EffectKind::Regen, EffectKind::FireRate],
    );
}

#[test]
fn shrine_one_shots_bypass_the_timer_map() {
    let shrine = Shrine::new(ShrineConfig::default());
    let mut engine = EffectEngine::new();
    let mut commands = Vec::new();

    shrine.activate(ShrineBlessing::Heal, &mut engine, &mut commands);
    shrine.activate(ShrineBlessing::Magnet, &mut engine, &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::HealPlayer {
                amount: ShrineConfig::default().heal_amount,
            },
            Command::MagnetizePickups,
        ],
    );
    assert!(engine.snapshot().is_empty(), "no timed entries installed");
}

#[test]
fn shrine_timed_blessings_route_through_grant() {
    let config = ShrineConfig::default();
    let shrine = Shrine::new(config);
    let mut engine = EffectEngine::new();
    let mut commands = Vec::new();

    shrine.activate(ShrineBlessing::DamageBoost, &mut engine, &mut commands);
    shrine.activate(ShrineBlessing::Shield, &mut engine, &mut commands);
    shrine.activate(ShrineBlessing::SpeedBoost, &mut engine, &mut commands);
    shrine.activate(ShrineBlessing::XpBoost, &mut engine, &mut commands);

    assert!(commands.is_empty());
    assert_eq!(engine.query(EffectKind::Damage), config.damage_multiplier);
    assert_eq!(engine.query(EffectKind::Speed), config.speed_multiplier);
    assert_eq!(engine.query(EffectKind::XpGain), config.xp_multiplier);
    assert!(engine.is_active(EffectKind::Shield));
    assert_eq!(
        engine.remaining(EffectKind::Shield),
        Some(Duration::from_millis(u64::from(config.shield_duration_ms))),
    );
}
