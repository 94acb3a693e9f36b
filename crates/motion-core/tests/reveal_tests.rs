use motion_core::component::RevealGroup;
use motion_core::config::RevealConfig;
use motion_core::host::{Component, ElementId, Event, HeadlessHost};
use motion_core::reveal::{Reveal, RevealAnimation, RevealState, REVEALED_CLASS};

const EL: ElementId = ElementId(7);

fn seen(element: ElementId) -> Event {
    Event::Intersection { element, ratio: 0.5, intersecting: true }
}

fn group(delays: &[u32], config: RevealConfig) -> RevealGroup {
    let mut g = RevealGroup::new(config);
    for (i, &delay) in delays.iter().enumerate() {
        g.push(ElementId(i as u32 + 1), RevealAnimation::FadeUp, delay);
    }
    g
}

// ---------------------------------------------------------------------------
// Single reveal
// ---------------------------------------------------------------------------

#[test]
fn test_first_intersection_marks_once() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut reveal = Reveal::new(EL, RevealAnimation::FadeUp, 0);

    for _ in 0..3 {
        reveal.on_intersection(true, false, &mut host);
    }

    assert!(reveal.is_revealed());
    assert_eq!(host.classes_of(EL), vec![REVEALED_CLASS]);
    assert_eq!(host.unobserve_calls, 1);
}

#[test]
fn test_non_intersecting_report_ignored() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut reveal = Reveal::new(EL, RevealAnimation::Scale, 0);

    reveal.on_intersection(false, false, &mut host);

    assert_eq!(reveal.state(), RevealState::Watching);
    assert!(host.class_log.is_empty());
    assert_eq!(host.unobserve_calls, 0);
}

#[test]
fn test_delayed_reveal_waits_for_timer() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut reveal = Reveal::new(EL, RevealAnimation::SlideLeft, 200);

    reveal.on_intersection(true, false, &mut host);

    let (&timer, &delay) = host.timers.iter().next().expect("timer scheduled");
    assert_eq!(delay, 200);
    assert_eq!(reveal.state(), RevealState::Scheduled(timer));
    assert!(host.class_log.is_empty());
    assert_eq!(host.unobserve_calls, 1);

    // Later intersections do not schedule a second timer
    reveal.on_intersection(true, false, &mut host);
    assert_eq!(host.timers.len(), 1);

    assert!(reveal.on_timeout(timer, &mut host));
    assert!(reveal.is_revealed());
    assert_eq!(host.classes_of(EL), vec![REVEALED_CLASS]);
}

#[test]
fn test_foreign_timer_ignored() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut reveal = Reveal::new(EL, RevealAnimation::FadeUp, 100);
    reveal.on_intersection(true, false, &mut host);

    let foreign = motion_core::host::TimerId(9999);
    assert!(!reveal.on_timeout(foreign, &mut host));
    assert!(matches!(reveal.state(), RevealState::Scheduled(_)));
}

#[test]
fn test_reduced_motion_skips_delay() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut reveal = Reveal::new(EL, RevealAnimation::SlideRight, 500);

    reveal.on_intersection(true, true, &mut host);

    assert!(reveal.is_revealed());
    assert!(host.timers.is_empty());
}

#[test]
fn test_detached_before_delay_is_dropped() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut reveal = Reveal::new(EL, RevealAnimation::FadeUp, 300);
    reveal.on_intersection(true, false, &mut host);
    let timer = *host.timers.keys().next().expect("timer");

    host.detached.insert(EL);
    assert!(reveal.on_timeout(timer, &mut host));

    assert_eq!(reveal.state(), RevealState::Dropped);
    assert!(host.class_log.is_empty());
}

#[test]
fn test_animation_classes() {
    for anim in RevealAnimation::ALL {
        assert_eq!(RevealAnimation::from_class(anim.class()), Some(anim));
    }
    assert_eq!(RevealAnimation::from_class("hero"), None);
    assert_eq!(RevealAnimation::default(), RevealAnimation::FadeUp);
}

// ---------------------------------------------------------------------------
// Reveal group
// ---------------------------------------------------------------------------

#[test]
fn test_group_observes_on_mount() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut g = group(&[0, 0, 0], RevealConfig::default());

    g.mount(&mut host);

    assert!(g.is_mounted());
    assert_eq!(host.observe_calls, 3);
    assert_eq!(host.observed.len(), 3);
}

#[test]
fn test_group_routes_intersections() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut g = group(&[0, 0, 0], RevealConfig::default());
    g.mount(&mut host);

    for _ in 0..3 {
        host.dispatch(&mut g, seen(ElementId(2)));
    }

    assert_eq!(g.revealed_count(), 1);
    assert!(g.reveals()[1].is_revealed());
    assert_eq!(host.class_log.len(), 1);
    assert_eq!(host.unobserve_calls, 1);
    assert!(!host.observed.contains(&ElementId(2)));
}

#[test]
fn test_group_delays_through_timers() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut g = group(&[0, 150, 300], RevealConfig::default());
    g.mount(&mut host);

    for id in 1..=3 {
        host.dispatch(&mut g, seen(ElementId(id)));
    }
    assert_eq!(g.revealed_count(), 1);
    assert_eq!(host.timers.len(), 2);

    assert_eq!(host.run_timers(&mut g), 2);
    assert_eq!(g.revealed_count(), 3);
    assert_eq!(host.class_log.len(), 3);
}

#[test]
fn test_group_reduced_motion() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let config = RevealConfig { reduced_motion: true, ..Default::default() };
    let mut g = group(&[400, 800], config);
    g.mount(&mut host);

    host.dispatch(&mut g, seen(ElementId(1)));
    host.dispatch(&mut g, seen(ElementId(2)));

    assert_eq!(g.revealed_count(), 2);
    assert!(host.timers.is_empty());
}

#[test]
fn test_group_unmount_cancels_pending() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut g = group(&[0, 250], RevealConfig::default());
    g.mount(&mut host);

    host.dispatch(&mut g, seen(ElementId(2)));
    assert_eq!(host.timers.len(), 1);

    g.unmount(&mut host);

    assert!(!g.is_mounted());
    assert!(host.timers.is_empty());
    assert!(host.observed.is_empty());

    // Late events are ignored
    host.dispatch(&mut g, seen(ElementId(1)));
    assert_eq!(g.revealed_count(), 0);
    assert!(host.class_log.is_empty());
}

#[test]
fn test_group_remount_skips_revealed() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut g = group(&[0, 0], RevealConfig::default());
    g.mount(&mut host);
    host.dispatch(&mut g, seen(ElementId(1)));
    g.unmount(&mut host);

    host.observe_calls = 0;
    g.mount(&mut host);

    assert_eq!(host.observe_calls, 1);
    assert!(host.observed.contains(&ElementId(2)));
}

#[test]
fn test_group_remount_resumes_cancelled_delay() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut g = group(&[250], RevealConfig::default());
    g.mount(&mut host);
    host.dispatch(&mut g, seen(ElementId(1)));
    g.unmount(&mut host);

    assert_eq!(g.reveals()[0].state(), RevealState::Watching);
    assert!(host.timers.is_empty());

    g.mount(&mut host);
    assert!(host.observed.contains(&ElementId(1)));

    for _ in 0..3 {
        host.dispatch(&mut g, seen(ElementId(1)));
    }
    assert_eq!(host.timers.len(), 1);
    assert_eq!(host.run_timers(&mut g), 1);

    assert_eq!(g.revealed_count(), 1);
    assert_eq!(host.classes_of(ElementId(1)), vec![REVEALED_CLASS]);
    assert!(host.observed.is_empty());
}

#[test]
fn test_group_remount_skips_dropped() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut g = group(&[100], RevealConfig::default());
    g.mount(&mut host);
    host.dispatch(&mut g, seen(ElementId(1)));
    host.detached.insert(ElementId(1));
    host.run_timers(&mut g);
    assert_eq!(g.reveals()[0].state(), RevealState::Dropped);
    g.unmount(&mut host);

    host.observe_calls = 0;
    g.mount(&mut host);

    assert_eq!(host.observe_calls, 0);
    assert!(host.observed.is_empty());
}

#[test]
fn test_cancel_returns_scheduled_to_watching() {
    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut reveal = Reveal::new(EL, RevealAnimation::FadeUp, 400);
    reveal.on_intersection(true, false, &mut host);
    assert!(!reveal.is_watching());

    reveal.cancel(&mut host);

    assert!(reveal.is_watching());
    assert!(host.timers.is_empty());
}
