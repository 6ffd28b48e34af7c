// Host-side tests for the shared blending law and the subscribers built on
// it (lights and animation scrubbing).

use tour_core::*;

const DT: f32 = 1.0 / 60.0;

fn two_step() -> KeyframeSequence {
    KeyframeSequence::new(
        0.0,
        [Keyframe::new(20.0, 5.0, 1.0), Keyframe::new(50.0, 5.0, 0.0)],
    )
}

fn run(sub: &mut dyn DistanceSubscriber, d: f32) -> Vec<SinkWrite> {
    let mut music = MusicDirector::default();
    let mut services = FrameServices { music: &mut music };
    let mut out = Vec::new();
    sub.on_frame(&DistanceFrame::at(d, DT), &mut services, &mut out);
    out
}

#[test]
fn blend_hits_keyframe_values() {
    let seq = two_step();
    assert_eq!(seq.blend(14.0), 0.0); // before the first window
    assert_eq!(seq.blend(20.0), 1.0);
    assert_eq!(seq.blend(35.0), 1.0); // plateau
    assert_eq!(seq.blend(50.0), 0.0);
    assert_eq!(seq.blend(500.0), 0.0); // past everything
}

#[test]
fn blend_is_smooth_inside_window() {
    let seq = two_step();
    // t = 0.4 -> smoothstep 0.352
    assert!((seq.blend(17.0) - 0.352).abs() < 1e-4);
    assert!((seq.blend(17.5) - 0.5).abs() < 1e-6);
    // Descending window mirrors it.
    assert!((seq.blend(47.5) - 0.5).abs() < 1e-6);
}

#[test]
fn blend_is_monotonic_inside_a_rising_window() {
    let seq = two_step();
    let mut prev = seq.blend(15.0);
    let mut d = 15.0;
    while d <= 20.0 {
        let v = seq.blend(d);
        assert!(v >= prev - 1e-6);
        prev = v;
        d += 0.1;
    }
}

#[test]
fn unsorted_sequence_holds_initial_value() {
    let seq = KeyframeSequence::new(
        0.3,
        [Keyframe::new(50.0, 5.0, 1.0), Keyframe::new(20.0, 5.0, 0.0)],
    );
    assert!(!seq.is_valid());
    for d in [0.0, 20.0, 35.0, 50.0, 100.0] {
        assert_eq!(seq.blend(d), 0.3);
    }
    assert_eq!(
        first_unsorted(&[Keyframe::new(50.0, 5.0, 1.0), Keyframe::new(20.0, 5.0, 0.0)]),
        Some(1)
    );
}

#[test]
fn zero_radius_keyframe_is_a_step() {
    let seq = KeyframeSequence::new(0.0, [Keyframe::new(10.0, 0.0, 2.0)]);
    assert_eq!(seq.blend(9.99), 0.0);
    assert_eq!(seq.blend(10.01), 2.0);
}

#[test]
fn lights_sharing_a_target_are_merged() {
    let cfgs = vec![
        LightConfig {
            target: TargetId(7),
            initial_intensity: 0.2,
            keyframes: vec![Keyframe::new(20.0, 5.0, 1.0)],
        },
        LightConfig {
            target: TargetId(3),
            initial_intensity: 0.0,
            keyframes: vec![Keyframe::new(10.0, 5.0, 4.0)],
        },
        LightConfig {
            target: TargetId(7),
            initial_intensity: 0.9,
            keyframes: vec![Keyframe::new(50.0, 5.0, 0.0)],
        },
    ];
    let mut lights = LightBlend::new(&cfgs);
    let out = run(&mut lights, 35.0);
    assert_eq!(
        out,
        vec![
            SinkWrite::LightIntensity {
                target: TargetId(7),
                intensity: 1.0
            },
            SinkWrite::LightIntensity {
                target: TargetId(3),
                intensity: 4.0
            },
        ]
    );
    run(&mut lights, 0.0);
    assert_eq!(lights.intensity(TargetId(7)), Some(0.2));
}

fn reveal(target: u32) -> ScrubConfig {
    ScrubConfig {
        target: TargetId(target),
        window: ScrubWindow::Reveal {
            trigger_distance: 20.0,
            reveal_radius: 5.0,
        },
        clip_length: 2.0,
    }
}

#[test]
fn scrub_never_rewinds_after_entry() {
    let mut anim = AnimationScrub::new(&[reveal(1)]);
    let mut last = 0.0;
    for d in [16.0, 18.0, 20.0, 22.0, 19.0, 24.0, 40.0, 17.0] {
        run(&mut anim, d);
        let t = anim.progress_of(TargetId(1)).unwrap_or(-1.0);
        assert!(t >= last, "rewound at {d}: {t} < {last}");
        last = t;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn scrub_resets_before_entry() {
    let mut anim = AnimationScrub::new(&[reveal(1)]);
    run(&mut anim, 20.0);
    assert_eq!(anim.progress_of(TargetId(1)), Some(1.0));
    let out = run(&mut anim, 10.0);
    assert_eq!(anim.progress_of(TargetId(1)), Some(0.0));
    assert_eq!(
        out,
        vec![SinkWrite::ClipTime {
            target: TargetId(1),
            normalized: 0.0,
            seconds: 0.0
        }]
    );
}

#[test]
fn span_scrub_maps_interval_to_clip() {
    let mut anim = AnimationScrub::new(&[ScrubConfig {
        target: TargetId(2),
        window: ScrubWindow::Span {
            start: 10.0,
            end: 20.0,
        },
        clip_length: 4.0,
    }]);
    assert_eq!(
        run(&mut anim, 5.0)[0],
        SinkWrite::ClipTime {
            target: TargetId(2),
            normalized: 0.0,
            seconds: 0.0
        }
    );
    assert_eq!(
        run(&mut anim, 15.0)[0],
        SinkWrite::ClipTime {
            target: TargetId(2),
            normalized: 0.5,
            seconds: 2.0
        }
    );
    assert_eq!(
        run(&mut anim, 25.0)[0],
        SinkWrite::ClipTime {
            target: TargetId(2),
            normalized: 1.0,
            seconds: 4.0
        }
    );
    // Dipping back into the span keeps the last frame.
    run(&mut anim, 12.0);
    assert_eq!(anim.progress_of(TargetId(2)), Some(1.0));
}
