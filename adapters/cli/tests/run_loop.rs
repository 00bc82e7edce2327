use std::time::Duration;

use glam::Vec2;
use lastlight_cli::config::RunTuning;
use lastlight_cli::runner::Runner;
use lastlight_core::Progression;
use lastlight_hud::HudModel;

const DT: Duration = Duration::from_millis(16);

/// Scripted patrol matching the binary's pilot: hunt outside, rest inside.
fn patrol_velocity(tick: u64, position: Vec2, center: Vec2, radius: f32) -> Vec2 {
    let hunting = (tick / 600) % 2 == 0;
    let target = if hunting {
        center + Vec2::X * (radius + 450.0)
    } else {
        center
    };
    (target - position)
        .try_normalize()
        .map_or(Vec2::ZERO, |direction| direction * 180.0)
}

fn drive(runner: &mut Runner, ticks: u64) -> Vec<HudModel> {
    let mut frames = Vec::new();
    for tick in 0..ticks {
        let velocity = patrol_velocity(
            tick,
            runner.player_position(),
            runner.zone_center(),
            runner.zone_radius(),
        );
        frames.push(runner.advance(DT, velocity));
    }
    frames
}

#[test]
fn identical_seeds_replay_identically() {
    let mut first = Runner::new(RunTuning::default(), Progression::default(), 99);
    let mut second = Runner::new(RunTuning::default(), Progression::default(), 99);

    let frames_a = drive(&mut first, 1_500);
    let frames_b = drive(&mut second, 1_500);

    assert_eq!(first.summary(), second.summary());
    for (a, b) in frames_a.iter().zip(frames_b.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn different_seeds_diverge() {
    let mut first = Runner::new(RunTuning::default(), Progression::default(), 1);
    let mut second = Runner::new(RunTuning::default(), Progression::default(), 2);

    let frames_a = drive(&mut first, 3_000);
    let frames_b = drive(&mut second, 3_000);
    assert!(
        frames_a != frames_b || first.summary() != second.summary(),
        "seed must steer the spawn stream",
    );
}

#[test]
fn a_run_spawns_fights_and_scores() {
    let mut runner = Runner::new(RunTuning::default(), Progression::default(), 7);
    let tuning = RunTuning::default();

    let mut saw_enemies = false;
    for tick in 0..6_000 {
        let velocity = patrol_velocity(
            tick,
            runner.player_position(),
            runner.zone_center(),
            runner.zone_radius(),
        );
        let hud = runner.advance(DT, velocity);

        saw_enemies |= hud.pools.enemies.active > 0;
        assert!(hud.pools.enemies.active <= hud.pools.enemies.capacity);
        let position = runner.player_position();
        assert!(position.x.abs() <= tuning.world.arena_width / 2.0);
        assert!(position.y.abs() <= tuning.world.arena_height / 2.0);
        if !runner.player_alive() {
            break;
        }
    }

    let summary = runner.summary();
    assert!(saw_enemies, "spawning never produced a live enemy");
    assert!(summary.kills >= 1, "ninety-six seconds without a kill");
    assert!(
        summary.run_salvage >= summary.kills,
        "every kill yields at least one salvage",
    );
    assert!(summary.best_wave >= 1);

    let progression = runner.final_progression();
    assert_eq!(progression.kills, summary.kills);
    assert!(progression.best_wave >= summary.best_wave);
}

#[test]
fn run_results_fold_into_prior_progression() {
    let mut prior = Progression::default();
    prior.total_xp = 1_000;
    prior.kills = 40;
    prior.best_wave = 9;

    let mut runner = Runner::new(RunTuning::default(), prior, 5);
    let _ = drive(&mut runner, 200);

    let folded = runner.final_progression();
    assert!(folded.total_xp >= 1_000);
    assert!(folded.kills >= 40);
    assert_eq!(folded.best_wave, 9, "a short run cannot beat wave nine");
}
