// Host-side tests for the scroll reveal and its observation lifecycle.

mod common;

use common::*;
use site_fx::platform::{ObserveOptions, Rect, Surface};
use site_fx::{Attachment, OptionsPatch, Reveal, RevealDirection, RevealState};

const BOX: Rect = Rect::new(0.0, 600.0, 300.0, 200.0);

fn repeatable() -> OptionsPatch {
    OptionsPatch {
        once: Some(false),
        ..Default::default()
    }
}

fn direction(d: RevealDirection) -> OptionsPatch {
    OptionsPatch {
        direction: Some(d),
        ..Default::default()
    }
}

/// Both deferred frames of a reveal.
fn settle(rig: &Rig) {
    rig.frames.run_frame();
    rig.frames.run_frame();
}

#[test]
fn attach_tags_the_surface_and_observes_it() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let r = Reveal::attach(as_surface(&surface), &rig.env, &OptionsPatch::default());

    assert!(r.is_observed());
    assert!(surface.is_observed());
    assert_eq!(r.state(), RevealState::Pending);
    assert!(surface.has_class("reveal"));
    assert!(!surface.has_class("is-revealed"));
    assert_eq!(
        surface.attribute("data-reveal-direction").as_deref(),
        Some("up")
    );
    assert_eq!(
        *surface.observe_options.borrow(),
        Some(ObserveOptions {
            threshold: 0.15,
            root_margin: "0px 0px -10% 0px".to_string(),
        })
    );
}

#[test]
fn class_returns_only_after_two_frames() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let _r = Reveal::attach(as_surface(&surface), &rig.env, &OptionsPatch::default());

    surface.cross(true);
    assert!(!surface.has_class("is-revealed"));
    assert_eq!(rig.frames.run_frame(), 1);
    assert!(!surface.has_class("is-revealed"));
    assert_eq!(rig.frames.pending(), 1, "second deferral queued");
    assert_eq!(rig.frames.run_frame(), 1);
    assert!(surface.has_class("is-revealed"));
    assert_eq!(rig.frames.pending(), 0);
}

#[test]
fn once_reveals_a_single_time_and_stops_observing() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let r = Reveal::attach(as_surface(&surface), &rig.env, &OptionsPatch::default());

    // the initial callback for an element below the fold
    surface.cross(false);
    assert_eq!(r.state(), RevealState::Pending);

    surface.cross(true);
    settle(&rig);
    assert_eq!(r.state(), RevealState::Terminal);
    assert!(surface.has_class("is-revealed"));
    assert!(!surface.is_observed());
    assert_eq!(surface.observer_stops.get(), 1);

    let changes = surface.class_changes.get();
    surface.cross(false);
    surface.cross(true);
    settle(&rig);
    assert_eq!(surface.class_changes.get(), changes);
    assert!(surface.has_class("is-revealed"));
}

#[test]
fn repeatable_toggles_on_every_crossing() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let r = Reveal::attach(as_surface(&surface), &rig.env, &repeatable());

    for _ in 0..3 {
        surface.cross(true);
        settle(&rig);
        assert_eq!(r.state(), RevealState::Revealed);
        assert!(surface.has_class("is-revealed"));

        surface.cross(false);
        assert_eq!(r.state(), RevealState::Pending);
        assert!(!surface.has_class("is-revealed"));
    }
    assert!(surface.is_observed());
    assert_eq!(surface.observer_stops.get(), 0);
}

#[test]
fn leaving_mid_reveal_cancels_the_deferred_class() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let _r = Reveal::attach(as_surface(&surface), &rig.env, &repeatable());

    surface.cross(true);
    rig.frames.run_frame();
    surface.cross(false);
    assert_eq!(rig.frames.pending(), 0);
    settle(&rig);
    assert!(!surface.has_class("is-revealed"));
}

#[test]
fn replaying_restarts_the_class() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let _r = Reveal::attach(as_surface(&surface), &rig.env, &repeatable());

    surface.cross(true);
    settle(&rig);
    // a second entry without an exit in between still restarts the animation
    surface.cross(true);
    assert!(!surface.has_class("is-revealed"));
    settle(&rig);
    assert!(surface.has_class("is-revealed"));
}

#[test]
fn update_retags_direction_only_when_it_changes() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let r = Reveal::attach(
        as_surface(&surface),
        &rig.env,
        &direction(RevealDirection::Left),
    );
    assert_eq!(
        surface.attribute("data-reveal-direction").as_deref(),
        Some("left")
    );

    r.update(&direction(RevealDirection::Down));
    assert_eq!(
        surface.attribute("data-reveal-direction").as_deref(),
        Some("down")
    );

    // once is fixed at attach time
    r.update(&OptionsPatch {
        once: Some(false),
        ..Default::default()
    });
    surface.cross(true);
    assert_eq!(r.state(), RevealState::Terminal);
}

#[test]
fn missing_observer_reveals_immediately() {
    let rig = desktop();
    let surface = FakeSurface::without_observer(BOX);
    let r = Reveal::attach(as_surface(&surface), &rig.env, &repeatable());

    assert!(!r.is_observed());
    assert!(surface.has_class("reveal"));
    settle(&rig);
    assert!(surface.has_class("is-revealed"));

    r.update(&direction(RevealDirection::Right));
    assert_eq!(
        surface.attribute("data-reveal-direction").as_deref(),
        Some("up")
    );
    r.detach();
    r.detach();
}

#[test]
fn detach_stops_observation_and_pending_frames_once() {
    let rig = desktop();
    let surface = FakeSurface::new(BOX);
    let r = Reveal::attach(as_surface(&surface), &rig.env, &repeatable());

    surface.cross(true);
    rig.frames.run_frame();
    r.detach();

    assert!(!surface.is_observed());
    assert_eq!(rig.frames.pending(), 0);
    assert_eq!(surface.observer_stops.get(), 1);

    r.detach();
    assert_eq!(surface.observer_stops.get(), 1);
    settle(&rig);
    assert!(!surface.has_class("is-revealed"));
}
