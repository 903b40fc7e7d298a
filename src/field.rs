// The particle field owns every ember, the pointer state, and the frame
// timing. The host glue feeds it input and frame callbacks.

use crate::color::Rgba;
use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: PointerState,
    last_timestamp: Option<f64>,
    last_elapsed: f64,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: FieldConfig, width: f64, height: f64) -> ParticleField {
        ParticleField::with_rng(config, width, height, StdRng::from_entropy())
    }

    pub fn with_rng(config: FieldConfig, width: f64, height: f64, rng: StdRng) -> ParticleField {
        let mut field = ParticleField {
            config,
            width,
            height,
            particles: Vec::new(),
            pointer: PointerState::default(),
            last_timestamp: None,
            last_elapsed: 0.0,
            rng,
        };
        field.rebuild(width, height);
        field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn size(&self) -> [f64; 2] {
        [self.width, self.height]
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Milliseconds between the two most recent frames, zero before the second frame.
    pub fn last_elapsed(&self) -> f64 {
        self.last_elapsed
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    pub fn pointer_pressed(&mut self) {
        self.pointer.press();
    }

    pub fn pointer_released(&mut self) {
        self.pointer.release();
    }

    /// Records the new surface size and rebuilds the particles when it changed
    /// by more than the resize threshold on either axis. Returns whether a
    /// rebuild happened.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let old = [self.width, self.height];
        let significant = self.config.is_significant_resize(old, [width, height]);
        if significant {
            log::debug!(
                "resizing field {}x{} -> {}x{}",
                old[0],
                old[1],
                width,
                height
            );
            self.rebuild(width, height);
        }
        self.width = width;
        self.height = height;
        significant
    }

    // Particles that survive keep their relative placement, the rest are
    // scattered over the new bounds.
    fn rebuild(&mut self, width: f64, height: f64) {
        let count = self.config.particle_count(width, height);
        let scale = if self.width > 0.0 && self.height > 0.0 {
            Some([width / self.width, height / self.height])
        } else {
            None
        };

        let old_particles = std::mem::take(&mut self.particles);
        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let (x, y) = match (old_particles.get(i), scale) {
                (Some(old), Some(scale)) => {
                    let pos = old.position();
                    (pos[0] * scale[0], pos[1] * scale[1])
                }
                _ => (
                    self.rng.gen::<f64>() * width,
                    self.rng.gen::<f64>() * height,
                ),
            };
            particles.push(Particle::new(x, y, &mut self.rng));
        }
        log::info!(
            "built {} particles for {}x{} ({} carried over)",
            particles.len(),
            width,
            height,
            old_particles.len().min(count)
        );
        self.particles = particles;
    }

    /// Advances and paints one frame.
    ///
    /// `timestamp` is the host's monotonic frame time, `now_ms` the wall clock
    /// that drives the flicker.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, timestamp: f64, now_ms: f64) {
        surface.fill_rect(
            0.0,
            0.0,
            self.width,
            self.height,
            Rgba::black(self.config.trail_opacity),
        );

        // Motion is per frame, the elapsed time is only tracked
        self.last_elapsed = match self.last_timestamp {
            Some(last) => timestamp - last,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);

        let pointer = self.pointer;
        for particle in &mut self.particles {
            particle.update(&pointer, now_ms, &mut self.rng);
            particle.draw(surface);
        }
    }
}
