//! Scene signals, click debouncing and sound playback.

use fireflies::prelude::*;

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Recorder {
    played: Vec<String>,
}

impl SoundPlayer for Recorder {
    fn play(&mut self, name: &str) {
        self.played.push(name.to_string());
    }
}

fn recording(capacity: usize) -> Simulator<Recorder> {
    let config = GlowConfig::default()
        .with_capacity(capacity)
        .with_ambient_spawn_chance(0.0);
    Simulator::seeded(config, 21, Recorder::default()).unwrap()
}

#[test]
fn test_repeated_clicks_within_cooldown_fire_once() {
    let mut sim = recording(32);
    sim.spawn_burst(Vec3::new(0.0, 1.0, 0.0), 1);
    sim.step(DT, 1.0);
    let before = sim.active_count();

    assert_eq!(sim.handle_pointer_click(0), Some(3));
    sim.step(DT, 1.1);
    assert_eq!(sim.handle_pointer_click(0), None);
    sim.step(DT, 1.25);
    assert_eq!(sim.handle_pointer_click(0), None);

    assert_eq!(sim.sound().played, vec!["particle-click".to_string()]);
    assert_eq!(sim.active_count(), before + 3);

    let clicks = sim
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PoolEvent::ParticleClicked { .. }))
        .count();
    assert_eq!(clicks, 1);
}

#[test]
fn test_click_accepted_again_after_cooldown() {
    let mut sim = recording(32);
    sim.spawn_burst(Vec3::ZERO, 1);
    sim.step(DT, 1.0);

    assert!(sim.handle_pointer_click(0).is_some());
    sim.step(DT, 1.35);
    assert!(sim.handle_pointer_click(0).is_some());

    assert_eq!(sim.sound().played.len(), 2);
}

#[test]
fn test_cooldown_is_per_slot() {
    let mut sim = recording(32);
    sim.spawn_burst(Vec3::ZERO, 2);
    sim.step(DT, 1.0);

    assert!(sim.handle_pointer_click(0).is_some());
    assert!(sim.handle_pointer_click(1).is_some());
    assert_eq!(sim.sound().played.len(), 2);
}

#[test]
fn test_particle_clicked_signal_matches_direct_click() {
    let mut sim = recording(16);
    sim.spawn_burst(Vec3::ZERO, 1);
    sim.step(DT, 0.5);

    let spawned = sim.handle_json(r#"{"kind":"particle-clicked","index":0}"#);
    assert_eq!(spawned, 3);
    assert!(sim.slots()[0].is_flashing());
    assert_eq!(sim.sound().played.len(), 1);
}

#[test]
fn test_object_click_signal_spawns_default_burst() {
    let mut sim = recording(16);
    let spawned = sim.handle_signal(&SceneSignal::object_clicked(Vec3::new(1.0, 0.5, -1.0)));

    assert_eq!(spawned, 8);
    assert!(sim.sound().played.is_empty());
    assert!(sim
        .slots()
        .iter()
        .filter(|s| s.active)
        .all(|s| s.position == Vec3::new(1.0, 0.5, -1.0)));
}

#[test]
fn test_rejected_signal_leaves_pool_untouched() {
    let mut sim = recording(16);
    sim.spawn_burst(Vec3::ZERO, 2);
    sim.drain_events();
    let before = sim.slots().to_vec();

    assert_eq!(sim.handle_json(r#"{"kind":"object-exploded"}"#), 0);
    assert_eq!(sim.handle_json(r#"{"kind":"particle-clicked"}"#), 0);

    assert_eq!(sim.slots(), before.as_slice());
    let events = sim.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| matches!(e, PoolEvent::SignalRejected { .. })));
}

#[test]
fn test_closure_sound_player() {
    let mut played = 0;
    {
        let config = GlowConfig::default().with_capacity(8).with_ambient_spawn_chance(0.0);
        let mut sim = Simulator::seeded(config, 4, |_: &str| played += 1).unwrap();
        sim.spawn_burst(Vec3::ZERO, 1);
        sim.step(DT, 1.0);
        sim.handle_pointer_click(0);
    }
    assert_eq!(played, 1);
}

#[test]
fn test_typed_signal_with_nan_position_is_rejected() {
    let mut sim = recording(16);
    let signal = SceneSignal::ObjectClicked {
        position: [f32::NAN, 0.5, 0.0],
        count: Some(8),
    };

    assert_eq!(sim.handle_signal(&signal), 0);
    sim.step(DT, 0.5);

    assert_eq!(sim.active_count(), 0);
    assert!(sim.view().instances.iter().all(|i| i.position.iter().all(|c| c.is_finite())));
    assert!(matches!(
        sim.drain_events().as_slice(),
        [PoolEvent::SignalRejected { .. }]
    ));
}

#[test]
fn test_click_accepted_after_host_clock_reset() {
    let mut sim = recording(32);
    sim.spawn_burst(Vec3::ZERO, 1);
    sim.step(DT, 5.0);
    assert!(sim.handle_pointer_click(0).is_some());

    sim.step(DT, 0.1);
    assert!(sim.handle_pointer_click(0).is_some());
    assert_eq!(sim.sound().played.len(), 2);
}
