// Host-side scenario tests for the fireworks emitter.

use countdown_core::*;
use glam::Vec3;

fn emitter() -> Emitter {
    Emitter::new(WindowConfig::default(), EmitterConfig::default(), 42).unwrap()
}

fn idle() -> CountdownState {
    CountdownState::counting(TimeRemaining::new(0, 5, 0, 0))
}

#[test]
fn ascends_for_age_limit_ticks_then_allocates_once() {
    let mut e = emitter();
    let id = e.launch(Vec3::new(0.0, -4.5, 0.0), Vec3::new(0.0, 0.1, 0.0), 40);
    let mut cursor = e.pool().cursor();
    let mut allocations = 0;
    for tick in 1..=40 {
        let report = e.tick(&idle(), false);
        if e.pool().cursor() != cursor {
            allocations += 1;
            cursor = e.pool().cursor();
        }
        let effect = &e.effects()[0];
        if tick < 40 {
            assert_eq!(effect.phase(), Phase::Ascending, "tick {tick}");
            assert!(report.exploded.is_empty());
        } else {
            assert_eq!(effect.phase(), Phase::Exploded);
            assert_eq!(report.exploded.as_slice(), &[id]);
        }
    }
    assert_eq!(allocations, 1);
    let slots = e.effects()[0].slots().unwrap();
    let cfg = EmitterConfig::default();
    assert!((cfg.burst_min..=cfg.burst_max).contains(&slots.len()));

    // fading does not allocate again
    for _ in 0..10 {
        e.tick(&idle(), false);
    }
    assert_eq!(e.pool().cursor(), cursor);
}

#[test]
fn age_never_decreases_and_removed_effects_stay_removed() {
    let mut e = emitter();
    let mut last_age = std::collections::HashMap::new();
    let mut removed = std::collections::HashSet::new();
    for _ in 0..2_000 {
        let report = e.tick(&CountdownState::REACHED, false);
        for effect in e.effects() {
            assert!(!removed.contains(&effect.id()));
            let prev = last_age.insert((effect.id(), effect.phase()), effect.age());
            if let Some(prev) = prev {
                assert!(effect.age() >= prev);
            }
        }
        removed.extend(report.retired.iter().copied());
    }
    assert!(!removed.is_empty());
}

#[test]
fn live_effects_finish_after_window_closes() {
    let mut e = emitter();
    e.launch(Vec3::ZERO, Vec3::new(0.0, 0.1, 0.0), 10);
    // countdown window closes: no new spawns, existing effect keeps going
    let mut retired = false;
    for _ in 0..200 {
        let report = e.tick(&idle(), false);
        assert!(report.spawned.is_none());
        retired |= !report.retired.is_empty();
    }
    assert!(retired);
    assert_eq!(e.active_count(), 0);
}

#[test]
fn final_seconds_window_spawns() {
    let mut e = emitter();
    let ten_left = CountdownState::counting(TimeRemaining::new(0, 0, 0, 10));
    let spawned = (0..1_000).filter(|_| e.tick(&ten_left, false).spawned.is_some()).count();
    assert!(spawned > 0);
}

#[test]
fn idle_ticks_leave_pool_clean() {
    let mut e = emitter();
    e.pool_mut().take_dirty();
    for _ in 0..10 {
        e.tick(&idle(), false);
        assert!(!e.pool().is_dirty());
    }
    // a rising rocket is drawn outside the pool
    e.launch(Vec3::ZERO, Vec3::new(0.0, 0.1, 0.0), 30);
    e.tick(&idle(), false);
    assert!(!e.pool().is_dirty());
}

#[test]
fn bursts_and_fades_mark_pool_dirty() {
    let mut e = emitter();
    e.pool_mut().take_dirty();
    e.launch(Vec3::ZERO, Vec3::new(0.0, 0.1, 0.0), 1);
    assert_eq!(e.tick(&idle(), false).exploded.len(), 1);
    assert!(e.pool_mut().take_dirty());
    e.tick(&idle(), false);
    assert!(e.pool_mut().take_dirty());
}

#[test]
fn finished_burst_does_not_blank_a_newer_burst_in_its_slots() {
    // both bursts fill the whole pool, so the second takes over every slot
    let cfg = EmitterConfig {
        pool_capacity: 10,
        burst_min: 10,
        burst_max: 10,
        fade_ticks: 20,
        palette: vec![[1.0, 1.0, 1.0]],
        ..EmitterConfig::default()
    };
    let spark_size = cfg.spark_size;
    let mut e = Emitter::new(WindowConfig::default(), cfg, 3).unwrap();

    let a = e.launch(Vec3::new(-100.0, 0.0, 0.0), Vec3::ZERO, 1);
    assert_eq!(e.tick(&idle(), false).exploded.as_slice(), &[a]);
    let b = e.launch(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, 1);
    assert_eq!(e.tick(&idle(), false).exploded.as_slice(), &[b]);

    let sparks_belong_to_b = |e: &Emitter| {
        (0..10).all(|i| e.pool().owner(i) == Some(b) && e.pool().position(i).x > 50.0)
    };
    assert!(sparks_belong_to_b(&e));

    // a keeps fading but never writes the slots it lost
    let mut a_retired = false;
    while !a_retired {
        let report = e.tick(&idle(), false);
        a_retired = report.retired.contains(&a);
        assert!(!report.retired.contains(&b));
        assert!(sparks_belong_to_b(&e));
    }

    assert_eq!(e.active_count(), 1);
    assert_eq!(e.effects()[0].id(), b);
    for v in e.pool().vertices() {
        assert_ne!(*v, ParticleVertex::RETIRED);
        assert_eq!(v.size, spark_size);
    }
}
