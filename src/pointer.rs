// Pointer snapshot handed to every particle each frame

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Last known pointer location, `None` until the first move event.
    pub position: Option<[f64; 2]>,
    pub pressed: bool,
}

impl PointerState {
    pub fn at(x: f64, y: f64, pressed: bool) -> PointerState {
        PointerState {
            position: Some([x, y]),
            pressed,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = Some([x, y]);
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    // +1 pulls along the particle-to-pointer vector, -1 pushes away from it
    pub fn direction_multiplier(&self) -> f64 {
        if self.pressed {
            1.0
        } else {
            -1.0
        }
    }
}
