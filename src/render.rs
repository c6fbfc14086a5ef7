//! Style renderer: module matrix + design descriptor -> vector scene.
//!
//! Styling never touches scannability-critical structure: eye shapes are
//! applied only to the three finder regions, gradients span the whole
//! symbol so per-module contrast is preserved, and the logo sits on a
//! background-colored plate whose occlusion the generator's forced-High
//! policy already paid for.

use image::ImageFormat;
use tracing::debug;

use crate::design::{Design, EyeStyle, ModuleStyle};
use crate::error::Error;
use crate::scene::{Paint, Role, Scene, Shape};
use crate::symbol::{Matrix, ModuleSpan, Region};

/// Dot modules are drawn at 80% of the module size so adjacent dots stay
/// visually separated.
const DOT_DIAMETER: f64 = 0.8;

/// Corner radius for rounded modules on corners free of dark neighbors.
const MODULE_CORNER_RADIUS: f64 = 0.5;

/// Maximum logo extent as a fraction of the symbol's linear dimension.
const LOGO_MAX_FRACTION: f64 = 0.3;

/// Renders the matrix into a vector scene per the design.
///
/// The matrix is only mutated to record the logo-occluded span, which is
/// bookkeeping; module content is read-only.
pub fn render(matrix: &mut Matrix, design: &Design) -> Result<Scene, Error> {
    let qz = f64::from(matrix.quiet_zone());
    let side = f64::from(matrix.size()) + 2.0 * qz;

    let fg_paint = match design.gradient {
        Some(_) => Paint::SymbolGradient,
        None => Paint::Solid(design.foreground),
    };
    let eye_paint = match design.eye_color {
        Some(color) => Paint::Solid(color),
        None => fg_paint,
    };

    let mut scene = Scene {
        side,
        foreground: design.foreground,
        background: design.background,
        gradient: design.gradient,
        primitives: Vec::new(),
        occluded: None,
    };
    scene.push(
        Shape::Rect { x: 0.0, y: 0.0, w: side, h: side },
        Paint::Solid(design.background),
        Role::Background,
    );

    draw_modules(&mut scene, matrix, design.module_style, fg_paint, qz);
    for (ox, oy) in matrix.finder_origins() {
        draw_eye(
            &mut scene,
            design.eye_style,
            f64::from(ox) + qz,
            f64::from(oy) + qz,
            eye_paint,
        );
    }
    if let Some(logo) = &design.logo {
        overlay_logo(&mut scene, matrix, logo)?;
    }

    debug!(
        primitives = scene.primitives.len(),
        module_style = ?design.module_style,
        eye_style = ?design.eye_style,
        "scene rendered"
    );
    Ok(scene)
}

/// Draws every dark module outside the finder regions; those are the eye
/// renderer's alone.
fn draw_modules(scene: &mut Scene, matrix: &Matrix, style: ModuleStyle, paint: Paint, qz: f64) {
    for y in 0..matrix.size() {
        for x in 0..matrix.size() {
            if !matrix.is_dark(x, y) || matrix.region(x, y) == Region::Finder {
                continue;
            }
            let (px, py) = (f64::from(x) + qz, f64::from(y) + qz);
            let shape = match style {
                ModuleStyle::Square => Shape::Rect { x: px, y: py, w: 1.0, h: 1.0 },
                ModuleStyle::Dots => Shape::Circle {
                    cx: px + 0.5,
                    cy: py + 0.5,
                    r: DOT_DIAMETER / 2.0,
                },
                ModuleStyle::Rounded => {
                    Shape::RoundedRect { x: px, y: py, w: 1.0, h: 1.0, radii: rounded_radii(matrix, x, y) }
                }
            };
            scene.push(shape, paint, Role::Module);
        }
    }
}

/// Corner radii for a rounded module: a corner stays square when either
/// edge it touches is shared with an adjacent dark module, so contiguous
/// runs read as joined bars instead of perforations.
fn rounded_radii(matrix: &Matrix, x: i32, y: i32) -> [f64; 4] {
    let dark = |dx: i32, dy: i32| matrix.is_dark(x + dx, y + dy);
    let (left, right, up, down) = (dark(-1, 0), dark(1, 0), dark(0, -1), dark(0, 1));
    let radius = |a: bool, b: bool| if a || b { 0.0 } else { MODULE_CORNER_RADIUS };
    [radius(left, up), radius(up, right), radius(right, down), radius(down, left)]
}

/// Draws one finder eye as nested layers: outer ring (outer shape plus a
/// background-colored hole) and a pupil, all parameterized by the style
/// family. `(x, y)` is the top-left of the 7x7 finder zone in scene units.
fn draw_eye(scene: &mut Scene, style: EyeStyle, x: f64, y: f64, paint: Paint) {
    let bg = Paint::Solid(scene.background);
    let (outer, inner, pupil) = match style {
        EyeStyle::Square => (
            Shape::Rect { x, y, w: 7.0, h: 7.0 },
            Shape::Rect { x: x + 1.0, y: y + 1.0, w: 5.0, h: 5.0 },
            Shape::Rect { x: x + 2.0, y: y + 2.0, w: 3.0, h: 3.0 },
        ),
        EyeStyle::Circle => (
            Shape::Circle { cx: x + 3.5, cy: y + 3.5, r: 3.5 },
            Shape::Circle { cx: x + 3.5, cy: y + 3.5, r: 2.5 },
            Shape::Circle { cx: x + 3.5, cy: y + 3.5, r: 1.5 },
        ),
        EyeStyle::Rounded => (
            Shape::RoundedRect { x, y, w: 7.0, h: 7.0, radii: [2.0; 4] },
            Shape::RoundedRect { x: x + 1.0, y: y + 1.0, w: 5.0, h: 5.0, radii: [1.4; 4] },
            Shape::RoundedRect { x: x + 2.0, y: y + 2.0, w: 3.0, h: 3.0, radii: [0.8; 4] },
        ),
        EyeStyle::Leaf => (
            Shape::RoundedRect { x, y, w: 7.0, h: 7.0, radii: [2.8, 0.0, 2.8, 0.0] },
            Shape::RoundedRect { x: x + 1.0, y: y + 1.0, w: 5.0, h: 5.0, radii: [2.0, 0.0, 2.0, 0.0] },
            Shape::RoundedRect { x: x + 2.0, y: y + 2.0, w: 3.0, h: 3.0, radii: [1.2, 0.0, 1.2, 0.0] },
        ),
        EyeStyle::Diamond => (
            diamond(x + 3.5, y + 3.5, 3.5),
            diamond(x + 3.5, y + 3.5, 2.5),
            diamond(x + 3.5, y + 3.5, 1.5),
        ),
    };
    scene.push(outer, paint, Role::EyeOuter);
    scene.push(inner, bg, Role::EyeInner);
    scene.push(pupil, paint, Role::EyePupil);
}

fn diamond(cx: f64, cy: f64, half: f64) -> Shape {
    Shape::Polygon {
        points: vec![(cx, cy - half), (cx + half, cy), (cx, cy + half), (cx - half, cy)],
    }
}

/// Centers the logo at up to 30% of the symbol's linear dimension, on a
/// background-colored plate extending one module beyond it on each side,
/// a local quiet zone, so occluded dark modules never visually merge with
/// the logo's own pixels.
fn overlay_logo(scene: &mut Scene, matrix: &mut Matrix, bytes: &[u8]) -> Result<(), Error> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::invalid("logo", format!("undecodable image: {e}")))?;
    let mime = match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        _ => "image/png",
    };

    let max_extent = f64::from(matrix.size()) * LOGO_MAX_FRACTION;
    let (iw, ih) = (f64::from(decoded.width()), f64::from(decoded.height()));
    let scale = max_extent / iw.max(ih);
    let (w, h) = (iw * scale, ih * scale);

    let center = scene.side / 2.0;
    let (x, y) = (center - w / 2.0, center - h / 2.0);

    let qz = f64::from(matrix.quiet_zone());
    let span = ModuleSpan {
        x: (x - 1.0 - qz).floor() as i32,
        y: (y - 1.0 - qz).floor() as i32,
        w: (w + 2.0).ceil() as i32,
        h: (h + 2.0).ceil() as i32,
    };
    matrix.mark_occluded(span);
    scene.occluded = Some(span);

    scene.push(
        Shape::Rect { x: x - 1.0, y: y - 1.0, w: w + 2.0, h: h + 2.0 },
        Paint::Solid(scene.background),
        Role::LogoPlate,
    );
    scene.push(
        Shape::Image { x, y, w, h, mime, data: bytes.to_vec() },
        Paint::Solid(scene.foreground),
        Role::Logo,
    );
    Ok(())
}
