//! Particle field simulation
//!
//! A free-running ambient simulation advanced once per rendered frame:
//!
//! 1. integrate position by velocity,
//! 2. push velocity away from the pointer inside the interaction radius,
//! 3. reflect velocity on any axis where the particle is outside the canvas,
//!
//! then render every particle as a disc plus a line between each pair
//! closer than the link distance. The particle count is capped so the
//! pairwise link pass stays small.

use folio_core::{DrawContext, Point, Size, Stroke, Vec2};
use rand::Rng;
use tracing::debug;

use crate::config::ParticleConfig;

/// One decorative particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Displacement per frame
    pub velocity: Vec2,
    pub radius: f32,
    pub base_alpha: f32,
}

impl Particle {
    /// Random particle inside `bounds`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Size, config: &ParticleConfig) -> Self {
        Self {
            position: Point::new(
                rng.gen::<f32>() * bounds.width,
                rng.gen::<f32>() * bounds.height,
            ),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * config.speed,
                (rng.gen::<f32>() - 0.5) * config.speed,
            ),
            radius: config.radius_min + rng.gen::<f32>() * (config.radius_max - config.radius_min),
            base_alpha: config.alpha_min + rng.gen::<f32>() * (config.alpha_max - config.alpha_min),
        }
    }

    /// One integration step
    pub fn step(&mut self, pointer: Option<Point>, bounds: Size, config: &ParticleConfig) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        if let Some(pointer) = pointer {
            let dx = pointer.x - self.position.x;
            let dy = pointer.y - self.position.y;
            if (dx * dx + dy * dy).sqrt() < config.interaction_radius {
                self.velocity.x -= dx * config.repulsion;
                self.velocity.y -= dy * config.repulsion;
            }
        }

        if self.position.x < 0.0 || self.position.x > bounds.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.height {
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// The ambient particle field behind the hero section
#[derive(Debug)]
pub struct ParticleField<R> {
    config: ParticleConfig,
    particles: Vec<Particle>,
    bounds: Size,
    rng: R,
    /// Bumped on every regeneration
    generation: u64,
}

impl<R: Rng> ParticleField<R> {
    /// Field sized to `bounds`, populated from `rng`
    pub fn new(config: ParticleConfig, bounds: Size, rng: R) -> Self {
        let mut field = Self {
            config,
            particles: Vec::new(),
            bounds,
            rng,
            generation: 0,
        };
        field.regenerate();
        field
    }

    /// Resize the canvas and discard every particle for a fresh random set
    pub fn resize(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        let count = self.config.particle_count(self.bounds.width);
        let (config, bounds) = (&self.config, self.bounds);
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle::random(&mut *rng, bounds, config))
            .collect();
        self.generation += 1;
        debug!(
            "ParticleField: generated {} particles for {}x{} (generation {})",
            count, bounds.width, bounds.height, self.generation
        );
    }

    /// Advance every particle one frame. `pointer` is in canvas coordinates;
    /// without a pointer no repulsion is applied.
    pub fn step(&mut self, pointer: Option<Point>) {
        for particle in &mut self.particles {
            particle.step(pointer, self.bounds, &self.config);
        }
    }

    /// Paint the current state: discs first, then proximity links
    pub fn render<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        if ctx.viewport_size() != self.bounds {
            ctx.resize(self.bounds);
        }
        ctx.clear();

        let color = self.config.color;
        for particle in &self.particles {
            ctx.fill_circle(
                particle.position,
                particle.radius,
                color.with_alpha(particle.base_alpha),
            );
        }

        let stroke = Stroke::new(self.config.link_width);
        let max = self.config.link_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position.distance(b.position);
                if distance < max {
                    let alpha = self.config.link_alpha * (1.0 - distance / max);
                    ctx.stroke_line(a.position, b.position, &stroke, color.with_alpha(alpha));
                }
            }
        }
    }

    /// `step` then `render`
    pub fn frame<C: DrawContext + ?Sized>(&mut self, pointer: Option<Point>, ctx: &mut C) {
        self.step(pointer);
        self.render(ctx);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Replace the particle set (deterministic scenes)
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{DrawCommand, RecordingContext};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(width: f32, height: f32) -> ParticleField<StdRng> {
        ParticleField::new(
            ParticleConfig::default(),
            Size::new(width, height),
            StdRng::seed_from_u64(7),
        )
    }

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            position: Point::new(x, y),
            velocity: Vec2::ZERO,
            radius: 2.0,
            base_alpha: 0.5,
        }
    }

    #[test]
    fn test_count_follows_width() {
        assert_eq!(field(375.0, 667.0).len(), 18);
        assert_eq!(field(1920.0, 1080.0).len(), 80);
        assert_eq!(field(10.0, 10.0).len(), 0);
    }

    #[test]
    fn test_random_particles_within_ranges() {
        let field = field(1280.0, 800.0);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= 1280.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 800.0);
            assert!(p.velocity.x.abs() <= 0.1501 && p.velocity.y.abs() <= 0.1501);
            assert!(p.radius >= 1.0 && p.radius <= 3.0);
            assert!(p.base_alpha >= 0.2 && p.base_alpha <= 0.7);
        }
    }

    #[test]
    fn test_resize_regenerates_everything() {
        let mut field = field(1280.0, 800.0);
        let before: Vec<Particle> = field.particles().to_vec();

        field.resize(Size::new(400.0, 800.0));
        assert_eq!(field.len(), 20);
        assert_eq!(field.generation(), 2);
        assert!(field.particles().iter().all(|p| !before.contains(p)));
        assert!(field.particles().iter().all(|p| p.position.x < 400.0));
    }

    #[test]
    fn test_pointer_repulsion_inside_radius_only() {
        let mut field = field(1000.0, 1000.0);
        field.set_particles(vec![still(100.0, 100.0), still(500.0, 500.0)]);

        field.step(Some(Point::new(200.0, 100.0)));
        let near = field.particles()[0];
        // v -= (pointer - p) * 0.0003
        assert!((near.velocity.x - -0.03).abs() < 1e-6);
        assert_eq!(near.velocity.y, 0.0);
        assert_eq!(field.particles()[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_no_pointer_no_repulsion() {
        let mut field = field(1000.0, 1000.0);
        field.set_particles(vec![still(100.0, 100.0)]);
        field.step(None);
        assert_eq!(field.particles()[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_reflects_at_boundaries() {
        let mut field = field(100.0, 100.0);
        let mut p = still(99.9, 0.05);
        p.velocity = Vec2::new(0.2, -0.1);
        field.set_particles(vec![p]);

        field.step(None);
        let p = field.particles()[0];
        assert!(p.position.x > 100.0 && p.velocity.x < 0.0);
        assert!(p.position.y < 0.0 && p.velocity.y > 0.0);
    }

    #[test]
    fn test_links_fade_with_distance() {
        let mut field = field(1000.0, 1000.0);
        field.set_particles(vec![still(0.0, 0.0), still(50.0, 0.0), still(300.0, 0.0)]);

        let mut ctx = RecordingContext::new(Size::new(1000.0, 1000.0));
        field.render(&mut ctx);

        assert_eq!(ctx.circle_count(), 3);
        assert_eq!(ctx.line_count(), 1);
        let line = ctx
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::StrokeLine { stroke, color, .. } => Some((stroke.width, color.a)),
                _ => None,
            })
            .unwrap();
        assert_eq!(line.0, 0.5);
        assert!((line.1 - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_frame_clears_previous_output() {
        let mut field = field(400.0, 400.0);
        let mut ctx = RecordingContext::new(Size::new(400.0, 400.0));
        field.frame(None, &mut ctx);
        field.frame(None, &mut ctx);
        assert_eq!(ctx.commands()[0], DrawCommand::Clear);
        assert_eq!(ctx.circle_count(), field.len());
    }

    #[test]
    fn test_render_resizes_backing_store() {
        let field = field(640.0, 480.0);
        let mut ctx = RecordingContext::new(Size::new(1.0, 1.0));
        field.render(&mut ctx);
        assert_eq!(ctx.viewport_size(), Size::new(640.0, 480.0));
    }
}
