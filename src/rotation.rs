use egui::Pos2;
use log::debug;

use crate::element::Element;
use crate::surface::{CanvasSurface, Mode};

/// The four discrete orientations of the anchor picture.
///
/// Transitions only ever advance by +90° modulo 360, so four consecutive
/// rotations restore both the orientation and the surface dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub fn degrees(self) -> f32 {
        match self {
            Orientation::Deg0 => 0.0,
            Orientation::Deg90 => 90.0,
            Orientation::Deg180 => 180.0,
            Orientation::Deg270 => 270.0,
        }
    }

    /// Snap an angle to the nearest right-angle orientation
    pub fn from_degrees(degrees: f32) -> Self {
        match ((degrees / 90.0).round() as i32).rem_euclid(4) {
            1 => Orientation::Deg90,
            2 => Orientation::Deg180,
            3 => Orientation::Deg270,
            _ => Orientation::Deg0,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }
}

/// Rotate the composition a quarter turn clockwise.
///
/// Swaps the surface dimensions, then repositions the anchor so it stays
/// flush with the corner matching the new orientation and advances its angle
/// by 90°. Every other object keeps its stored position: their placement is
/// visually relative to the rotated canvas, which is the accepted trade-off —
/// multi-object rotation consistency is out of scope here.
pub fn rotate_quarter(surface: &mut CanvasSurface) {
    surface.swap_dimensions();
    let (width, height) = (surface.width(), surface.height());

    if let Some(anchor) = surface.anchor_mut() {
        let orientation = Orientation::from_degrees(anchor.angle()).next();
        let position = match orientation {
            Orientation::Deg90 => Pos2::new(width, 0.0),
            Orientation::Deg180 => Pos2::new(width, height),
            Orientation::Deg270 => Pos2::new(0.0, height),
            Orientation::Deg0 => Pos2::new(0.0, 0.0),
        };
        anchor.set_position(position);
        anchor.rotate_by(90.0);
        debug!("anchor rotated to {orientation:?}, repositioned to {position:?}");
    }

    surface.set_mode(Mode::Select);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_cycle_has_order_four() {
        let mut orientation = Orientation::Deg0;
        for _ in 0..4 {
            orientation = orientation.next();
        }
        assert_eq!(orientation, Orientation::Deg0);
    }

    #[test]
    fn from_degrees_wraps() {
        assert_eq!(Orientation::from_degrees(450.0), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(-90.0), Orientation::Deg270);
        assert_eq!(Orientation::from_degrees(360.0), Orientation::Deg0);
    }
}
