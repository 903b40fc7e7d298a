// Field-level tunables. Per-particle physics constants live on `Particle`.

#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Id of the canvas element the field draws into.
    pub canvas_id: String,
    /// Opacity of the black overlay painted every frame, lower means longer trails.
    pub trail_opacity: f64,
    /// Surface area each particle gets, in square pixels.
    pub area_per_particle: f64,
    /// Minimum change on either axis before a resize rebuilds the particles.
    pub resize_threshold: f64,
    /// Quiet period after the last resize signal before rebuilding.
    pub resize_debounce_ms: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_owned(),
            trail_opacity: 0.05,
            area_per_particle: 625.0,
            resize_threshold: 50.0,
            resize_debounce_ms: 100.0,
        }
    }
}

impl FieldConfig {
    pub fn particle_count(&self, width: f64, height: f64) -> usize {
        if width <= 0.0 || height <= 0.0 {
            return 0;
        }
        (width * height / self.area_per_particle).floor() as usize
    }

    pub fn is_significant_resize(&self, old: [f64; 2], new: [f64; 2]) -> bool {
        (old[0] - new[0]).abs() > self.resize_threshold
            || (old[1] - new[1]).abs() > self.resize_threshold
    }
}
