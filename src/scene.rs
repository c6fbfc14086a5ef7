//! Vector scene graph produced by the style renderer.
//!
//! Coordinates are in module units: one QR module is 1.0 wide. A scene is
//! an ordered list of filled shapes; it carries no transform state, so the
//! frame compositor can place it inside a larger document by offset alone.

use crate::design::{Color, Gradient};
use crate::symbol::ModuleSpan;

/// Fill paint for a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// The scene-level gradient definition spanning the symbol bounds.
    SymbolGradient,
}

/// What a shape is for. Lets consumers (and tests) distinguish eye layers
/// from ordinary module shapes without geometric guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Background,
    Module,
    EyeOuter,
    EyeInner,
    EyePupil,
    LogoPlate,
    Logo,
    Chrome,
    Caption,
}

/// A filled drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    /// Per-corner radii, clockwise from top-left.
    RoundedRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radii: [f64; 4],
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    /// Closed filled polygon.
    Polygon {
        points: Vec<(f64, f64)>,
    },
    /// Embedded raster image (already-decoded-and-validated bytes).
    Image {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        mime: &'static str,
        data: Vec<u8>,
    },
    /// Horizontally centered single-line text.
    Label {
        x: f64,
        y: f64,
        font_size: f64,
        text: String,
    },
}

/// One placed primitive: shape, paint, purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub shape: Shape,
    pub paint: Paint,
    pub role: Role,
}

/// The rendered symbol as vector geometry. Side length includes the quiet
/// zone on all four edges. Never mutated after the renderer returns it;
/// re-styling means re-rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Width and height, in module units (symbol size + 2 * quiet zone).
    pub side: f64,
    pub foreground: Color,
    pub background: Color,
    /// Gradient definition referenced by [`Paint::SymbolGradient`].
    pub gradient: Option<Gradient>,
    pub primitives: Vec<Placed>,
    /// Module span hidden behind the logo plate, when a logo is present.
    pub occluded: Option<ModuleSpan>,
}

impl Scene {
    pub fn push(&mut self, shape: Shape, paint: Paint, role: Role) {
        self.primitives.push(Placed { shape, paint, role });
    }

    /// Primitives with one of the eye roles.
    pub fn eye_primitives(&self) -> impl Iterator<Item = &Placed> {
        self.primitives
            .iter()
            .filter(|p| matches!(p.role, Role::EyeOuter | Role::EyeInner | Role::EyePupil))
    }
}

/// Axis-aligned bounds of a shape, as (min_x, min_y, max_x, max_y).
/// Labels report their anchor point.
pub fn bounds(shape: &Shape) -> (f64, f64, f64, f64) {
    match shape {
        Shape::Rect { x, y, w, h }
        | Shape::RoundedRect { x, y, w, h, .. }
        | Shape::Image { x, y, w, h, .. } => (*x, *y, x + w, y + h),
        Shape::Circle { cx, cy, r } => (cx - r, cy - r, cx + r, cy + r),
        Shape::Polygon { points } => {
            let mut min = (f64::INFINITY, f64::INFINITY);
            let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
            for &(x, y) in points {
                min = (min.0.min(x), min.1.min(y));
                max = (max.0.max(x), max.1.max(y));
            }
            (min.0, min.1, max.0, max.1)
        }
        Shape::Label { x, y, .. } => (*x, *y, *x, *y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_shapes() {
        assert_eq!(bounds(&Shape::Rect { x: 1.0, y: 2.0, w: 3.0, h: 4.0 }), (1.0, 2.0, 4.0, 6.0));
        assert_eq!(bounds(&Shape::Circle { cx: 5.0, cy: 5.0, r: 2.0 }), (3.0, 3.0, 7.0, 7.0));
        let poly = Shape::Polygon { points: vec![(0.0, 1.0), (2.0, -1.0), (4.0, 3.0)] };
        assert_eq!(bounds(&poly), (0.0, -1.0, 4.0, 3.0));
    }

    #[test]
    fn test_eye_primitive_filter() {
        let mut scene = Scene {
            side: 29.0,
            foreground: Color::BLACK,
            background: Color::WHITE,
            gradient: None,
            primitives: Vec::new(),
            occluded: None,
        };
        scene.push(Shape::Rect { x: 0.0, y: 0.0, w: 1.0, h: 1.0 }, Paint::Solid(Color::BLACK), Role::Module);
        scene.push(Shape::Circle { cx: 7.5, cy: 7.5, r: 3.5 }, Paint::Solid(Color::BLACK), Role::EyeOuter);
        assert_eq!(scene.eye_primitives().count(), 1);
    }
}
