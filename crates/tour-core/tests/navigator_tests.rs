// Host-side tests for the navigator: integration, clamping, damping and the
// virtual distance.

use tour_core::*;

const DT: f32 = 1.0 / 60.0;

fn nav(track_length: f32, end_offset: f32) -> Navigator {
    Navigator::new(
        NavigatorConfig {
            end_offset,
            ..Default::default()
        },
        track_length,
    )
}

#[test]
fn usable_max_subtracts_end_offset() {
    let n = nav(100.0, 2.0);
    assert_eq!(n.usable_max(), 98.0);
    assert_eq!(n.actual(), 0.0);
}

#[test]
fn one_drag_sample_moves_one_frame_worth() {
    let mut n = nav(100.0, 2.0);
    n.apply_drag(100.0);
    assert!((n.velocity() - 1.0).abs() < 1e-6);

    let state = n.tick(DT, &SpeedProfile::empty());
    assert!((state.actual - 0.0167).abs() < 1e-3, "actual {}", state.actual);
    assert!(!state.clamped);
    // Damped after the move.
    assert!(state.velocity < 1.0 && state.velocity > 0.8);
}

#[test]
fn invert_scroll_flips_direction() {
    let mut n = Navigator::new(
        NavigatorConfig {
            invert_scroll: true,
            start_distance: 50.0,
            ..Default::default()
        },
        100.0,
    );
    n.apply_drag(100.0);
    assert!(n.velocity() < 0.0);
    n.tick(DT, &SpeedProfile::empty());
    assert!(n.actual() < 50.0);
}

#[test]
fn actual_stays_inside_bounds_under_heavy_input() {
    let mut n = nav(20.0, 0.5);
    let speed = SpeedProfile::empty();
    for i in 0..600 {
        let push = if (i / 100) % 2 == 0 { 500.0 } else { -500.0 };
        n.apply_drag(push);
        let s = n.tick(DT, &speed);
        assert!(s.actual >= 0.0 && s.actual <= n.usable_max(), "frame {i}: {}", s.actual);
    }
}

#[test]
fn pushing_past_the_end_is_a_hard_stop() {
    let mut n = nav(10.0, 0.0);
    n.jump_to(9.5);
    n.apply_drag(10_000.0); // 100 m/s
    let s = n.tick(DT, &SpeedProfile::empty());
    assert_eq!(s.actual, 10.0);
    assert!(s.clamped);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn pushing_below_zero_clamps_at_start() {
    let mut n = nav(10.0, 0.0);
    n.apply_drag(-500.0);
    let s = n.tick(DT, &SpeedProfile::empty());
    assert_eq!(s.actual, 0.0);
    assert!(s.clamped);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn virtual_equals_actual_while_unclamped() {
    let mut n = nav(100.0, 2.0);
    let speed = SpeedProfile::empty();
    n.apply_drag(300.0);
    for _ in 0..120 {
        let s = n.tick(DT, &speed);
        assert_eq!(s.virtual_distance, round2(s.actual));
    }
}

#[test]
fn virtual_overshoots_only_in_commanded_direction() {
    let mut n = nav(10.0, 0.0);
    let speed = SpeedProfile::empty();
    n.jump_to(9.9);
    n.apply_drag(6_000.0); // 60 m/s, one frame moves 1 m
    let s = n.tick(DT, &speed);
    assert_eq!(s.actual, 10.0);
    assert!(s.virtual_distance > s.actual);
    assert!((s.divergence() - 0.9).abs() < 0.02);

    // Coming back keeps the remembered overshoot on top of the actual position.
    n.apply_drag(-100.0);
    let back = n.tick(DT, &speed);
    assert!(back.actual < 10.0);
    assert!(back.virtual_distance > back.actual);

    n.resync_virtual();
    assert_eq!(n.virtual_distance(), round2(n.actual()));
}

#[test]
fn virtual_resyncs_after_returning_to_start() {
    let mut n = nav(10.0, 0.0);
    let speed = SpeedProfile::empty();
    n.jump_to(9.9);
    n.apply_drag(6_000.0);
    let s = n.tick(DT, &speed);
    assert!(s.virtual_distance > s.actual);

    for _ in 0..600 {
        n.apply_drag(-2_000.0);
        n.tick(DT, &speed);
    }
    assert_eq!(n.actual(), 0.0);
    assert_eq!(n.virtual_distance(), 0.0);
}

#[test]
fn held_push_at_end_does_not_grow_the_overshoot() {
    let mut n = nav(10.0, 0.0);
    let speed = SpeedProfile::empty();
    n.jump_to(9.9);
    for _ in 0..10 {
        n.apply_drag(6_000.0);
        n.tick(DT, &speed);
    }
    let held = n.virtual_distance() - n.actual();
    assert!((held - 0.9).abs() < 0.02);

    // Resting at the end without input settles virtual back onto actual.
    let rest = n.tick(DT, &speed);
    assert_eq!(rest.actual, 10.0);
    assert_eq!(rest.virtual_distance, 10.0);
}

#[test]
fn damping_is_frame_rate_independent() {
    let damping = 0.9_f32;
    let seconds = 0.5_f32;
    let mut v = 1.0_f32;
    for _ in 0..(seconds * 60.0) as usize {
        v *= damping_factor(damping, DT);
    }
    let single = damping.powf(seconds * 60.0);
    assert!((v - single).abs() < 1e-4, "{v} vs {single}");

    // Same decay at 30 fps.
    let mut v30 = 1.0_f32;
    for _ in 0..(seconds * 30.0) as usize {
        v30 *= damping_factor(damping, 1.0 / 30.0);
    }
    assert!((v30 - single).abs() < 1e-4);
}

#[test]
fn damping_of_one_is_guarded() {
    let mut n = Navigator::new(
        NavigatorConfig {
            damping: 1.0,
            ..Default::default()
        },
        1_000.0,
    );
    assert!(n.config().damping < 1.0);
    n.apply_drag(100.0);
    let speed = SpeedProfile::empty();
    for _ in 0..60 * 120 {
        n.tick(DT, &speed);
    }
    assert_eq!(n.velocity(), 0.0, "momentum must eventually die out");
}

#[test]
fn velocity_snaps_to_zero() {
    let mut n = nav(100.0, 0.0);
    n.apply_drag(1.0); // 0.01 m/s
    let speed = SpeedProfile::empty();
    for _ in 0..60 {
        n.tick(DT, &speed);
    }
    assert_eq!(n.velocity(), 0.0);
}

#[test]
fn zero_length_track_is_frozen() {
    let mut n = nav(0.0, 0.5);
    assert_eq!(n.usable_max(), 0.0);
    n.apply_drag(1_000.0);
    let s = n.tick(DT, &SpeedProfile::empty());
    assert_eq!(s.actual, 0.0);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn bad_dt_changes_nothing() {
    let mut n = nav(100.0, 0.0);
    n.apply_drag(100.0);
    let before = n.state();
    assert_eq!(n.tick(0.0, &SpeedProfile::empty()), before);
    assert_eq!(n.tick(f32::NAN, &SpeedProfile::empty()), before);
}

#[test]
fn speed_multiplier_scales_motion() {
    let slow = SpeedProfile::new(vec![SpeedEvent {
        start_distance: 0.0,
        length: 100.0,
        ease_in: 0.0,
        ease_out: 0.0,
        speed_multiplier: 0.5,
        easing: Easing::Linear,
        ..Default::default()
    }]);
    let mut n = nav(100.0, 0.0);
    n.jump_to(10.0);
    n.apply_drag(100.0);
    let s = n.tick(DT, &slow);
    assert_eq!(s.speed_multiplier, 0.5);
    assert!((s.actual - (10.0 + 0.5 * DT)).abs() < 1e-4);
}
