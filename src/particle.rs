// Ember particle: keeps track of its own position, velocity, and the visual
// parameters it was born with, springs back to its rest position, and gets
// pushed or pulled by the pointer.

use crate::color::Hsla;
use crate::pointer::PointerState;
use crate::surface::{GradientStop, Surface};
use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

/// Appearance and force response, fixed when the particle is created.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Traits {
    pub size: f64,
    pub density: f64,
    pub hue: f64,
    pub alpha: f64,
}

impl Traits {
    pub fn random<R: Rng>(rng: &mut R) -> Traits {
        Traits {
            size: rng.gen::<f64>() * 2.0 + 1.0,
            density: rng.gen::<f64>() * 30.0 + 1.0,
            hue: rng.gen::<f64>() * 40.0 + 5.0,
            alpha: rng.gen::<f64>() * 0.5 + 0.1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pos: Vector2<f64>,
    base: Vector2<f64>,
    vel: Vector2<f64>,
    traits: Traits,
    brightness: f64,
}

impl Particle {
    pub const INTERACTION_RADIUS: f64 = 150.0;
    pub const FORCE_SCALE: f64 = 0.3;
    pub const FRICTION: f64 = 0.9;
    pub const JITTER: f64 = 0.04;
    pub const SPRING: f64 = 0.01;
    pub const FLICKER_TIME_RATE: f64 = 0.0015;
    pub const FLICKER_SPACE_RATE: f64 = 0.08;
    pub const FLICKER_BASE: f64 = 50.0;
    pub const FLICKER_AMPLITUDE: f64 = 15.0;
    pub const GLOW_SCALE: f64 = 3.0;
    pub const CORE_SCALE: f64 = 0.8;

    pub fn new<R: Rng>(x: f64, y: f64, rng: &mut R) -> Particle {
        let traits = Traits::random(rng);
        let mut particle = Particle::with_traits(x, y, traits);
        particle.brightness = rng.gen::<f64>() * 20.0 + 50.0;
        particle
    }

    pub fn with_traits(x: f64, y: f64, traits: Traits) -> Particle {
        Particle {
            pos: [x, y],
            base: [x, y],
            vel: [0.0, 0.0],
            traits,
            brightness: Particle::FLICKER_BASE,
        }
    }

    pub fn position(&self) -> Vector2<f64> {
        self.pos
    }

    pub fn base_position(&self) -> Vector2<f64> {
        self.base
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.vel
    }

    pub fn traits(&self) -> Traits {
        self.traits
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    /// Velocity contribution of the pointer this frame, if any.
    ///
    /// Nothing is returned when the pointer has no position yet, when it is
    /// outside the interaction radius, or when it sits exactly on the particle
    /// (the direction is undefined there).
    pub fn pointer_force(&self, pointer: &PointerState) -> Option<Vector2<f64>> {
        let target = pointer.position?;
        let to_pointer = vec2_sub(target, self.pos);
        let distance = vec2_len(to_pointer);
        if !(distance > 0.0 && distance < Particle::INTERACTION_RADIUS) {
            return None;
        }

        let direction = vec2_scale(to_pointer, 1.0 / distance);
        let falloff = (Particle::INTERACTION_RADIUS - distance) / Particle::INTERACTION_RADIUS;
        let force = falloff.powi(3).max(0.0);
        let strength = force
            * self.traits.density
            * Particle::FORCE_SCALE
            * pointer.direction_multiplier();
        Some(vec2_scale(direction, strength))
    }

    pub fn update<R: Rng>(&mut self, pointer: &PointerState, now_ms: f64, rng: &mut R) {
        if let Some(push) = self.pointer_force(pointer) {
            self.vel = vec2_add(self.vel, push);
        }

        self.vel = vec2_scale(self.vel, Particle::FRICTION);
        let jitter = [
            (rng.gen::<f64>() - 0.5) * 2.0 * Particle::JITTER,
            (rng.gen::<f64>() - 0.5) * 2.0 * Particle::JITTER,
        ];
        self.vel = vec2_add(self.vel, jitter);

        self.pos = vec2_add(self.pos, self.vel);

        // Spring pull only shows up in next frame's displacement
        let spring = vec2_scale(vec2_sub(self.base, self.pos), Particle::SPRING);
        self.vel = vec2_add(self.vel, spring);

        self.brightness = Particle::FLICKER_BASE
            + Particle::FLICKER_AMPLITUDE
                * (now_ms * Particle::FLICKER_TIME_RATE
                    + self.pos[0] * Particle::FLICKER_SPACE_RATE)
                    .sin();
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Traits { size, hue, alpha, .. } = self.traits;
        let stops = [
            GradientStop {
                offset: 0.0,
                color: Hsla::saturated(hue, self.brightness, alpha),
            },
            GradientStop {
                offset: 0.5,
                color: Hsla::saturated(hue, self.brightness * 0.7, alpha * 0.6),
            },
            GradientStop {
                offset: 1.0,
                color: Hsla::saturated(hue, 10.0, 0.0),
            },
        ];
        surface.fill_glow(self.pos, size * Particle::GLOW_SCALE, &stops);
        surface.fill_circle(
            self.pos,
            size * Particle::CORE_SCALE,
            Hsla::saturated(hue, self.brightness, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{Particle, Traits};
    use crate::pointer::PointerState;
    use crate::surface::recording::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f64 = 1e-9;

    fn traits(density: f64) -> Traits {
        Traits {
            size: 2.0,
            density,
            hue: 20.0,
            alpha: 0.4,
        }
    }

    #[test]
    fn random_traits_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = Particle::new(0.0, 0.0, &mut rng);
            let t = p.traits();
            assert!(t.size >= 1.0 && t.size < 3.0);
            assert!(t.density >= 1.0 && t.density < 31.0);
            assert!(t.hue >= 5.0 && t.hue < 45.0);
            assert!(t.alpha >= 0.1 && t.alpha < 0.6);
            assert!(p.brightness() >= 50.0 && p.brightness() < 70.0);
            assert_eq!(p.velocity(), [0.0, 0.0]);
            assert_eq!(p.base_position(), p.position());
        }
    }

    #[test]
    fn released_pointer_repels_with_cubic_falloff() {
        let p = Particle::with_traits(100.0, 100.0, traits(15.0));
        // 3-4-5 triangle scaled to distance 75
        let pointer = PointerState::at(145.0, 160.0, false);
        let force = p.pointer_force(&pointer).unwrap();

        let magnitude = (force[0] * force[0] + force[1] * force[1]).sqrt();
        assert!((magnitude - 0.125 * 15.0 * 0.3).abs() < EPSILON);
        assert!((force[0] - -0.5625 * 0.6).abs() < EPSILON);
        assert!((force[1] - -0.5625 * 0.8).abs() < EPSILON);
    }

    #[test]
    fn pressed_pointer_flips_force() {
        let p = Particle::with_traits(100.0, 100.0, traits(15.0));
        let released = p.pointer_force(&PointerState::at(145.0, 160.0, false)).unwrap();
        let pressed = p.pointer_force(&PointerState::at(145.0, 160.0, true)).unwrap();
        assert!((released[0] + pressed[0]).abs() < EPSILON);
        assert!((released[1] + pressed[1]).abs() < EPSILON);
        assert!(pressed[0] > 0.0 && pressed[1] > 0.0);
    }

    #[test]
    fn no_force_outside_radius_or_without_pointer() {
        let p = Particle::with_traits(0.0, 0.0, traits(30.0));
        assert_eq!(p.pointer_force(&PointerState::default()), None);
        assert_eq!(p.pointer_force(&PointerState::at(150.0, 0.0, true)), None);
        assert_eq!(p.pointer_force(&PointerState::at(0.0, 400.0, false)), None);
        assert!(p.pointer_force(&PointerState::at(149.0, 0.0, false)).is_some());
    }

    #[test]
    fn pointer_on_top_of_particle_adds_no_force() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::with_traits(42.0, 42.0, traits(30.0));
        let pointer = PointerState::at(42.0, 42.0, true);
        assert_eq!(p.pointer_force(&pointer), None);

        p.update(&pointer, 0.0, &mut rng);
        let vel = p.velocity();
        assert!(vel[0].is_finite() && vel[1].is_finite());
        assert!(vel[0].abs() <= Particle::JITTER && vel[1].abs() <= Particle::JITTER);
    }

    #[test]
    fn absent_pointer_leaves_only_friction_jitter_and_spring() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::with_traits(10.0, 10.0, traits(30.0));
        for frame in 0..100 {
            let vel_before = p.velocity();
            let pos_before = p.position();
            p.update(&PointerState::default(), frame as f64 * 16.0, &mut rng);

            for axis in 0..2 {
                let moved = p.position()[axis] - pos_before[axis];
                let jitter = moved - vel_before[axis] * Particle::FRICTION;
                assert!(jitter.abs() <= Particle::JITTER + EPSILON);

                let spring = (p.base_position()[axis] - p.position()[axis]) * Particle::SPRING;
                assert!((p.velocity()[axis] - (moved + spring)).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn update_applies_force_then_friction_then_spring() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut p = Particle::with_traits(100.0, 100.0, traits(15.0));
        let pointer = PointerState::at(145.0, 160.0, false);
        let force = p.pointer_force(&pointer).unwrap();

        p.update(&pointer, 0.0, &mut rng);

        // vel = 0.99 * (0.9 * force + jitter), jitter within +-0.04
        let tolerance = 0.99 * Particle::JITTER + EPSILON;
        for axis in 0..2 {
            let expected = 0.99 * 0.9 * force[axis];
            assert!((p.velocity()[axis] - expected).abs() <= tolerance);
        }
        assert!(p.position()[0] < 100.0);
        assert!(p.position()[1] < 100.0);
        assert_eq!(p.base_position(), [100.0, 100.0]);
        assert_eq!(p.traits(), traits(15.0));
    }

    #[test]
    fn brightness_follows_time_and_position() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = Particle::with_traits(0.0, 0.0, traits(1.0));
        let now = 12_345.0;
        p.update(&PointerState::default(), now, &mut rng);
        let expected = 50.0 + 15.0 * (now * 0.0015 + p.position()[0] * 0.08).sin();
        assert!((p.brightness() - expected).abs() < EPSILON);
        assert!(p.brightness() >= 35.0 && p.brightness() <= 65.0);
    }

    #[test]
    fn draws_glow_then_core() {
        let p = Particle::with_traits(5.0, 6.0, traits(1.0));
        let mut surface = RecordingSurface::default();
        p.draw(&mut surface);

        assert_eq!(surface.calls.len(), 2);
        match &surface.calls[0] {
            DrawCall::Glow {
                center,
                radius,
                stops,
            } => {
                assert_eq!(*center, [5.0, 6.0]);
                assert!((radius - 6.0).abs() < EPSILON);
                assert_eq!(stops.len(), 3);
                assert_eq!(stops[0].color.l, 50.0);
                assert_eq!(stops[0].color.a, 0.4);
                assert_eq!(stops[1].offset, 0.5);
                assert!((stops[1].color.l - 35.0).abs() < EPSILON);
                assert!((stops[1].color.a - 0.24).abs() < EPSILON);
                assert_eq!(stops[2].color.a, 0.0);
            }
            other => panic!("expected glow, got {:?}", other),
        }
        match &surface.calls[1] {
            DrawCall::Circle {
                center,
                radius,
                color,
            } => {
                assert_eq!(*center, [5.0, 6.0]);
                assert!((radius - 1.6).abs() < EPSILON);
                assert_eq!(color.a, 1.0);
                assert_eq!(color.h, 20.0);
            }
            other => panic!("expected core circle, got {:?}", other),
        }
    }
}
