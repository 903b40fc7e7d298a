// Drawing surface the field paints into. The browser build draws through a
// CanvasRenderingContext2d, the native tests record the calls instead.

use crate::color::{Hsla, Rgba};
use std::f64::consts::PI;
use web_sys::CanvasRenderingContext2d;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Hsla,
}

pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Hsla);

    /// Fills a circle with a radial gradient running from `center` out to `radius`.
    fn fill_glow(&mut self, center: [f64; 2], radius: f64, stops: &[GradientStop]);
}

impl Surface for CanvasRenderingContext2d {
    #[allow(deprecated)]
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.set_fill_style(&color.css().into());
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Hsla) {
        self.set_fill_style(&color.css().into());
        self.begin_path();
        if let Err(e) = self.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.fill();
    }

    #[allow(deprecated)]
    fn fill_glow(&mut self, center: [f64; 2], radius: f64, stops: &[GradientStop]) {
        let gradient = match self.create_radial_gradient(
            center[0], center[1], 0.0, center[0], center[1], radius,
        ) {
            Ok(gradient) => gradient,
            Err(e) => {
                log::warn!("create_radial_gradient failed: {:?}", e);
                return;
            }
        };
        for stop in stops {
            if let Err(e) = gradient.add_color_stop(stop.offset, &stop.color.css()) {
                log::warn!("add_color_stop failed: {:?}", e);
                return;
            }
        }
        self.set_fill_style(gradient.as_ref());
        self.begin_path();
        if let Err(e) = self.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.fill();
    }
}
