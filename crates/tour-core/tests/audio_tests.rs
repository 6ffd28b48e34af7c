// Host-side tests for ambient sound zones, scroll feedback audio and the
// shared music director.

use glam::Vec3;
use tour_core::*;

const STEP: f32 = 0.125;

fn frame_at(d: f32, dt: f32) -> DistanceFrame {
    DistanceFrame::at(d, dt)
}

fn run(
    sub: &mut dyn DistanceSubscriber,
    music: &mut MusicDirector,
    frame: DistanceFrame,
) -> Vec<SinkWrite> {
    let mut services = FrameServices { music };
    let mut out = Vec::new();
    sub.on_frame(&frame, &mut services, &mut out);
    out
}

fn gain_in(out: &[SinkWrite], target: TargetId) -> Option<f32> {
    out.iter().find_map(|w| match w {
        SinkWrite::AudioGain { target: t, gain } if *t == target => Some(*gain),
        _ => None,
    })
}

fn birds() -> AmbientSoundConfig {
    AmbientSoundConfig {
        target: TargetId(9),
        anchor: ZoneAnchor::World {
            position: Vec3::new(0.0, 0.0, 100.0),
        },
        activation_distance: 10.0,
        deactivation_distance: 12.0,
        max_volume: 0.8,
        fade_in: 0.5,
        fade_out: 0.25,
    }
}

fn at_world(z: f32) -> DistanceFrame {
    DistanceFrame {
        world_position: Vec3::new(0.0, 0.0, z),
        ..frame_at(z, STEP)
    }
}

#[test]
fn ambient_source_fades_in_and_out() {
    let mut music = MusicDirector::default();
    let mut sounds = AmbientSounds::new(&[birds()]);
    let id = TargetId(9);

    assert!(run(&mut sounds, &mut music, at_world(50.0)).is_empty());

    let out = run(&mut sounds, &mut music, at_world(95.0));
    assert_eq!(out[0], SinkWrite::AudioPlay { target: id });
    assert!((gain_in(&out, id).unwrap_or(-1.0) - 0.2).abs() < 1e-5);

    for _ in 0..3 {
        run(&mut sounds, &mut music, at_world(95.0));
    }
    assert_eq!(sounds.gain_of(id), Some(0.8));

    // Between the radii nothing changes.
    run(&mut sounds, &mut music, at_world(89.0));
    assert_eq!(sounds.gain_of(id), Some(0.8));

    let out = run(&mut sounds, &mut music, at_world(80.0));
    assert!((gain_in(&out, id).unwrap_or(-1.0) - 0.4).abs() < 1e-5);
    let out = run(&mut sounds, &mut music, at_world(80.0));
    assert_eq!(gain_in(&out, id), Some(0.0));
    assert_eq!(out.last(), Some(&SinkWrite::AudioStop { target: id }));

    // Stopped sources stay silent.
    assert!(run(&mut sounds, &mut music, at_world(80.0)).is_empty());
}

#[test]
fn ambient_fade_reverses_from_current_gain() {
    let mut music = MusicDirector::default();
    let mut sounds = AmbientSounds::new(&[birds()]);
    let id = TargetId(9);
    run(&mut sounds, &mut music, at_world(95.0)); // 0.2
    run(&mut sounds, &mut music, at_world(95.0)); // 0.4
    run(&mut sounds, &mut music, at_world(50.0)); // fade out from 0.4
    let g = sounds.gain_of(id).unwrap_or(-1.0);
    assert!((g - 0.2).abs() < 1e-5, "{g}");
    let out = run(&mut sounds, &mut music, at_world(95.0));
    assert!(!out.contains(&SinkWrite::AudioPlay { target: id }), "still playing");
}

fn scroll_audio() -> ScrollAudio {
    ScrollAudio::new(ScrollAudioConfig {
        enabled: true,
        seed: 7,
        ..Default::default()
    })
}

#[test]
fn scroll_audio_clicks_every_step() {
    let mut music = MusicDirector::default();
    let mut audio = scroll_audio();
    let out = run(&mut audio, &mut music, frame_at(0.0, STEP));
    assert_eq!(out, vec![SinkWrite::AudioPlay { target: TargetId(0) }]);

    let mut clicks = 0;
    let mut d = 0.0;
    for _ in 0..40 {
        d += 0.1;
        let out = run(&mut audio, &mut music, frame_at(d, STEP));
        for w in &out {
            if let SinkWrite::AudioOneShot { target, pitch } = w {
                assert_eq!(*target, TargetId(1));
                assert!((0.95..=1.05).contains(pitch));
                clicks += 1;
            }
        }
    }
    // 4 m travelled, one click per 0.5 m.
    assert!((7..=8).contains(&clicks), "{clicks}");
}

#[test]
fn scroll_noise_follows_speed() {
    let mut music = MusicDirector::default();
    let mut audio = scroll_audio();
    run(&mut audio, &mut music, frame_at(0.0, STEP));
    let mut d = 0.0;
    for _ in 0..40 {
        d += 1.0; // 8 m/s, beyond full volume speed
        run(&mut audio, &mut music, frame_at(d, STEP));
    }
    assert!((audio.noise_gain() - 0.15).abs() < 1e-3);
    assert!((audio.cutoff_hz() - 5_000.0).abs() < 5.0);

    for _ in 0..40 {
        run(&mut audio, &mut music, frame_at(d, STEP));
    }
    assert_eq!(audio.speed(), 0.0);
    assert!(audio.noise_gain() < 1e-3);
}

#[test]
fn click_pitch_is_reproducible_from_seed() {
    let collect = || {
        let mut music = MusicDirector::default();
        let mut audio = scroll_audio();
        let mut pitches = Vec::new();
        for i in 0..20 {
            for w in run(&mut audio, &mut music, frame_at(i as f32, STEP)) {
                if let SinkWrite::AudioOneShot { pitch, .. } = w {
                    pitches.push(pitch);
                }
            }
        }
        pitches
    };
    assert_eq!(collect(), collect());
}

#[test]
fn music_crossfades_between_channels() {
    let mut music = MusicDirector::new(1.0);
    let mut out = Vec::new();
    assert!(music.play(ClipId(1)));
    music.tick(0.5, &mut out);
    assert_eq!(
        out[0],
        SinkWrite::MusicClip {
            channel: 1,
            clip: ClipId(1)
        }
    );
    assert!(music.is_crossfading());
    assert!((music.channel_gain(1) - 0.5).abs() < 1e-6);

    out.clear();
    music.tick(0.5, &mut out);
    assert!(!music.is_crossfading());
    assert_eq!(music.active_clip(), Some(ClipId(1)));
    assert_eq!(music.channel_gain(1), 1.0);
    assert_eq!(music.channel_gain(0), 0.0);
}

#[test]
fn music_ignores_the_active_clip() {
    let mut music = MusicDirector::new(0.0);
    let mut out = Vec::new();
    assert!(music.play(ClipId(3)));
    music.tick(0.1, &mut out);
    assert!(!music.play(ClipId(3)));
}

#[test]
fn music_request_replaces_running_crossfade() {
    let mut music = MusicDirector::new(1.0);
    let mut out = Vec::new();
    music.play(ClipId(1));
    music.tick(1.0, &mut out); // clip 1 active on channel 1
    music.play(ClipId(2));
    music.tick(0.5, &mut out);
    assert!(music.play(ClipId(4)));
    out.clear();
    // The new clip fades in from silence while the old one keeps fading out.
    music.tick(0.001, &mut out);
    assert!(music.channel_gain(0) < 0.05);
    assert!(music.channel_gain(1) > 0.45 && music.channel_gain(1) <= 0.5);
    music.tick(1.0, &mut out);
    assert_eq!(music.active_clip(), Some(ClipId(4)));
    assert!(out.contains(&SinkWrite::MusicStop { channel: 1 }));
    assert!(out.contains(&SinkWrite::MusicClip {
        channel: 0,
        clip: ClipId(4)
    }));
}

#[test]
fn music_zone_requests_clip_on_entry() {
    let mut music = MusicDirector::new(0.5);
    let mut zones = MusicZones::new(&[MusicZoneConfig {
        clip: ClipId(5),
        anchor: ZoneAnchor::Span {
            start: 10.0,
            end: 20.0,
        },
        radius: 0.0,
    }]);
    run(&mut zones, &mut music, frame_at(5.0, STEP));
    assert!(!music.is_crossfading());
    run(&mut zones, &mut music, frame_at(12.0, STEP));
    assert!(music.is_crossfading());
}
