use glam::Vec2;
use motion_core::config::FieldConfig;
use motion_core::field::{link_alpha, pointer_alpha, ParticleField};
use motion_core::particle::ParticleSet;
use motion_core::surface::{DrawCommand, RecordingSurface, Rgba};

fn field_with(positions: &[Vec2]) -> ParticleField {
    let mut field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 1);
    let mut set = ParticleSet::new(positions.len());
    set.position.copy_from_slice(positions);
    field.particles = set;
    field
}

fn brute_force_links(positions: &[Vec2], max: f32) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i].distance(positions[j]) < max {
                out.push((i, j));
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Opacity falloff
// ---------------------------------------------------------------------------

#[test]
fn test_link_alpha_quadratic_falloff() {
    assert!((link_alpha(0.0, 150.0, 0.4) - 0.4).abs() < 1e-6);
    assert!((link_alpha(75.0, 150.0, 0.4) - 0.1).abs() < 1e-6);
    assert!(link_alpha(150.0, 150.0, 0.4).abs() < 1e-6);
}

#[test]
fn test_pointer_alpha_linear_falloff() {
    assert!((pointer_alpha(0.0, 200.0, 0.3) - 0.3).abs() < 1e-6);
    assert!((pointer_alpha(100.0, 200.0, 0.3) - 0.15).abs() < 1e-6);
    assert!(pointer_alpha(200.0, 200.0, 0.3).abs() < 1e-6);
}

// ---------------------------------------------------------------------------
// Frame composition
// ---------------------------------------------------------------------------

#[test]
fn test_frame_draw_order() {
    let mut field = field_with(&[
        Vec2::new(100.0, 100.0),
        Vec2::new(150.0, 100.0),
        Vec2::new(700.0, 500.0),
    ]);
    field.set_pointer(120.0, 120.0);
    let mut surface = RecordingSurface::new(800.0, 600.0);

    field.frame(&mut surface);

    assert!(matches!(surface.commands[0], DrawCommand::FillRect { .. }));
    assert_eq!(surface.gradient_lines(), 1);
    assert_eq!(surface.pointer_lines(), 2);
    assert_eq!(surface.circles(), 3);

    // Phase order: links, then pointer lines, then particles
    let rank = |c: &DrawCommand| match c {
        DrawCommand::FillRect { .. } => 0,
        DrawCommand::GradientLine { .. } => 1,
        DrawCommand::Line { .. } => 2,
        DrawCommand::Circle { .. } => 3,
    };
    let ranks: Vec<u8> = surface.commands.iter().map(rank).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted, "draw phases interleaved: {:?}", ranks);
}

#[test]
fn test_trail_fill_covers_canvas() {
    let mut field = field_with(&[Vec2::new(10.0, 10.0)]);
    let mut surface = RecordingSurface::new(800.0, 600.0);

    field.frame(&mut surface);

    match &surface.commands[0] {
        DrawCommand::FillRect { origin, size, color } => {
            assert_eq!(*origin, Vec2::ZERO);
            assert_eq!(*size, Vec2::new(800.0, 600.0));
            assert_eq!((color.r, color.g, color.b), (0, 0, 0));
            assert!((color.a - 0.05).abs() < 1e-6);
        }
        other => panic!("expected trail fill first, got {:?}", other),
    }
}

#[test]
fn test_links_drawn_before_integration() {
    let mut field = field_with(&[Vec2::new(100.0, 100.0), Vec2::new(150.0, 100.0)]);
    field.particles.velocity[0] = Vec2::new(1.0, 0.0);
    field.set_pointer(-1000.0, -1000.0);
    let mut surface = RecordingSurface::new(800.0, 600.0);

    field.frame(&mut surface);

    let link = surface
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::GradientLine { from, stops, .. } => Some((*from, stops.clone())),
            _ => None,
        })
        .expect("one link");
    assert_eq!(link.0, Vec2::new(100.0, 100.0));

    let alpha = link_alpha(50.0, 150.0, 0.4);
    assert!((link.1[0].color.a - alpha).abs() < 1e-6);
    assert!((link.1[1].color.a - alpha * 1.2).abs() < 1e-6);
    assert!((link.1[2].color.a - alpha).abs() < 1e-6);

    let first_circle = surface
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .expect("circles");
    assert_eq!(first_circle, Vec2::new(101.0, 100.0));
}

#[test]
fn test_pointer_at_origin_by_default() {
    let mut field = field_with(&[Vec2::new(30.0, 40.0), Vec2::new(700.0, 500.0)]);
    assert_eq!(field.pointer(), Vec2::ZERO);
    let mut surface = RecordingSurface::new(800.0, 600.0);

    field.frame(&mut surface);

    // Only the particle 50px from the top-left corner reaches the pointer
    assert_eq!(surface.pointer_lines(), 1);
}

#[test]
fn test_empty_field_only_fades() {
    let mut field = ParticleField::seeded(FieldConfig::default(), 0.0, 0.0, 3);
    let mut surface = RecordingSurface::new(0.0, 0.0);

    field.frame(&mut surface);

    assert_eq!(field.particles.count, 0);
    assert_eq!(surface.commands.len(), 1);
    assert!(matches!(surface.commands[0], DrawCommand::FillRect { .. }));

    // A canvas smaller than one particle's area behaves the same
    let mut tiny = ParticleField::seeded(FieldConfig::default(), 50.0, 50.0, 3);
    surface.clear();
    tiny.frame(&mut surface);
    assert_eq!(surface.commands.len(), 1);
}

// ---------------------------------------------------------------------------
// Sizing and regeneration
// ---------------------------------------------------------------------------

#[test]
fn test_particle_count_follows_area() {
    let field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 5);
    assert_eq!(field.particles.count, 60);
    assert_eq!(field.width(), 800.0);
    assert_eq!(field.height(), 600.0);
}

#[test]
fn test_resize_regenerates_particles() {
    let mut field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 5);
    let before = field.particles.position.clone();

    field.resize(1600.0, 1200.0);

    assert_eq!(field.particles.count, 240);
    assert_ne!(field.particles.position[..60], before[..]);
    for p in &field.particles.position {
        assert!(p.x >= 0.0 && p.x <= 1600.0 && p.y >= 0.0 && p.y <= 1200.0);
    }

    field.resize(f32::NAN, 600.0);
    assert_eq!(field.particles.count, 0);
    assert_eq!(field.width(), 0.0);
}

#[test]
fn test_particles_stay_in_bounds_over_frames() {
    let mut field = ParticleField::seeded(FieldConfig::default(), 400.0, 300.0, 11);
    let mut surface = RecordingSurface::new(400.0, 300.0);
    for _ in 0..500 {
        surface.clear();
        field.frame(&mut surface);
    }
    for p in &field.particles.position {
        assert!(p.x >= 0.0 && p.x <= 400.0 && p.y >= 0.0 && p.y <= 300.0, "escaped: {:?}", p);
    }
}

#[test]
fn test_links_match_brute_force() {
    let mut field = ParticleField::seeded(FieldConfig::default(), 1280.0, 720.0, 42);
    let expected = brute_force_links(&field.particles.position, 150.0);

    let mut got: Vec<(usize, usize)> = field.links().into_iter().map(|(i, j, _)| (i, j)).collect();
    got.sort();

    assert_eq!(got, expected);
    for (i, j, d) in field.links() {
        assert!(i < j);
        assert!(d < 150.0);
    }
}

#[test]
fn test_seeded_fields_are_deterministic() {
    let mut a = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 99);
    let mut b = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 99);
    assert_eq!(a.particles.position, b.particles.position);

    let mut sa = RecordingSurface::new(800.0, 600.0);
    let mut sb = RecordingSurface::new(800.0, 600.0);
    for _ in 0..10 {
        a.frame(&mut sa);
        b.frame(&mut sb);
    }
    assert_eq!(a.particles.position, b.particles.position);
    assert_eq!(sa.commands, sb.commands);
}

#[test]
fn test_rgba_css() {
    let c = Rgba::rgb([200, 220, 255], 0.5);
    assert_eq!(c.css(), "rgba(200, 220, 255, 0.5)");
    assert_eq!(Rgba::new(0, 0, 0, 0.05).css(), "rgba(0, 0, 0, 0.05)");
}

#[test]
fn test_set_config_rebuilds_link_grid() {
    let mut field = field_with(&[Vec2::new(10.0, 10.0), Vec2::new(400.0, 10.0)]);
    assert!(field.links().is_empty());

    let wider = FieldConfig { link_distance: 500.0, ..FieldConfig::default() };
    field.set_config(wider).unwrap();

    let links = field.links();
    assert_eq!(links.len(), 1);
    assert_eq!((links[0].0, links[0].1), (0, 1));
    assert!((links[0].2 - 390.0).abs() < 1e-3);
    assert_eq!(field.config().link_distance, 500.0);

    // The frame pass sees the same pair
    let mut surface = RecordingSurface::new(800.0, 600.0);
    field.set_pointer(-1000.0, -1000.0);
    field.frame(&mut surface);
    assert_eq!(surface.gradient_lines(), 1);
}

#[test]
fn test_set_config_rejects_invalid() {
    let mut field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 2);
    let bad = FieldConfig { link_distance: f32::NAN, ..FieldConfig::default() };

    assert!(field.set_config(bad).is_err());
    assert_eq!(field.config().link_distance, 150.0);
    assert_eq!(field.particles.count, 60);
}
