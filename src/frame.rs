//! Frame compositor: wraps a rendered symbol scene in a decorative
//! template and produces the final document.
//!
//! Every template is a fixed layout of edge paddings, an optional caption
//! slot and chrome shapes, so the intrinsic document size is deterministic
//! in `(design, frame)`. Caption text is ignored by templates without a
//! slot rather than erroring.

use crate::design::FrameKind;
use crate::scene::{Paint, Placed, Role, Scene, Shape};
use crate::symbol::QUIET_ZONE;

/// The finished document: frame chrome, the placed symbol scene, and
/// intrinsic metadata. Built fresh per render request and never mutated;
/// re-styling means re-running the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Intrinsic size in module units: symbol side plus template padding.
    pub width: f64,
    pub height: f64,
    /// Quiet-zone margin baked into the scene, in modules.
    pub quiet_zone: i32,
    /// Where the scene's top-left corner sits in document coordinates.
    pub symbol_offset: (f64, f64),
    /// Chrome drawn underneath the symbol scene, in document coordinates.
    pub chrome: Vec<Placed>,
    pub scene: Scene,
}

/// Edge paddings: top, right, bottom, left.
fn padding(frame: FrameKind) -> [f64; 4] {
    match frame {
        FrameKind::None => [0.0, 0.0, 0.0, 0.0],
        FrameKind::Simple => [1.0, 1.0, 1.0, 1.0],
        FrameKind::ScanMe => [1.0, 1.0, 5.0, 1.0],
        FrameKind::Balloon => [1.0, 1.0, 6.0, 1.0],
        FrameKind::Badge => [2.0, 2.0, 5.0, 2.0],
        FrameKind::Phone => [4.0, 2.0, 6.0, 2.0],
        FrameKind::Polaroid => [1.5, 1.5, 6.0, 1.5],
        FrameKind::Laptop => [2.0, 4.0, 6.0, 4.0],
        FrameKind::Ticket => [2.0, 3.0, 6.0, 3.0],
        FrameKind::Card => [2.0, 2.0, 6.0, 2.0],
        FrameKind::Tag => [4.0, 2.0, 5.0, 2.0],
        FrameKind::Certificate => [3.0, 3.0, 6.0, 3.0],
    }
}

/// Whether the template has a caption-text slot.
pub fn has_caption_slot(frame: FrameKind) -> bool {
    matches!(
        frame,
        FrameKind::ScanMe
            | FrameKind::Balloon
            | FrameKind::Badge
            | FrameKind::Ticket
            | FrameKind::Card
            | FrameKind::Tag
            | FrameKind::Certificate
    )
}

/// Composes the scene into the given frame.
pub fn compose(scene: Scene, frame: FrameKind, text: Option<&str>) -> RenderedDocument {
    let [top, right, bottom, left] = padding(frame);
    let side = scene.side;
    let width = side + left + right;
    let height = side + top + bottom;
    let (fg, bg) = (Paint::Solid(scene.foreground), Paint::Solid(scene.background));

    let mut chrome: Vec<Placed> = Vec::new();
    let mut draw = |shape: Shape, paint: Paint, role: Role| {
        chrome.push(Placed { shape, paint, role })
    };

    match frame {
        FrameKind::None => {}

        FrameKind::Simple => {
            draw(rounded(0.0, 0.0, width, height, 1.0), fg, Role::Chrome);
        }

        FrameKind::ScanMe => {
            draw(rounded(0.0, 0.0, width, height, 1.0), fg, Role::Chrome);
        }

        FrameKind::Balloon => {
            // Speech bubble plus a tail pointing out of the caption strip.
            draw(rounded(0.0, 0.0, width, height - 2.0, 2.0), fg, Role::Chrome);
            draw(
                Shape::Polygon {
                    points: vec![
                        (width / 2.0 - 1.5, height - 2.0),
                        (width / 2.0 + 1.5, height - 2.0),
                        (width / 2.0, height),
                    ],
                },
                fg,
                Role::Chrome,
            );
        }

        FrameKind::Badge => {
            draw(rounded(0.0, 0.0, width, height, 1.5), fg, Role::Chrome);
            draw(Shape::Circle { cx: 1.0, cy: 1.0, r: 0.6 }, bg, Role::Chrome);
            draw(Shape::Circle { cx: width - 1.0, cy: 1.0, r: 0.6 }, bg, Role::Chrome);
        }

        FrameKind::Phone => {
            // Device bezel, screen cutout, speaker slot, home button.
            draw(rounded(0.0, 0.0, width, height, 3.0), fg, Role::Chrome);
            draw(
                Shape::Rect { x: 1.5, y: 3.0, w: width - 3.0, h: height - 8.0 },
                bg,
                Role::Chrome,
            );
            draw(rounded(width / 2.0 - 2.5, 1.2, 5.0, 0.8, 0.4), bg, Role::Chrome);
            draw(Shape::Circle { cx: width / 2.0, cy: height - 2.8, r: 1.2 }, bg, Role::Chrome);
        }

        FrameKind::Polaroid => {
            // Photo card with a thin rim and a blank caption strip below.
            draw(Shape::Rect { x: 0.0, y: 0.0, w: width, h: height }, fg, Role::Chrome);
            draw(
                Shape::Rect { x: 0.4, y: 0.4, w: width - 0.8, h: height - 0.8 },
                bg,
                Role::Chrome,
            );
        }

        FrameKind::Laptop => {
            // Screen bezel plus a wedge-shaped base.
            draw(rounded(2.0, 0.0, width - 4.0, height - 4.0, 1.0), fg, Role::Chrome);
            draw(
                Shape::Rect { x: 3.0, y: 1.0, w: width - 6.0, h: height - 6.0 },
                bg,
                Role::Chrome,
            );
            draw(
                Shape::Polygon {
                    points: vec![
                        (0.0, height - 4.0),
                        (width, height - 4.0),
                        (width - 2.0, height - 1.0),
                        (2.0, height - 1.0),
                    ],
                },
                fg,
                Role::Chrome,
            );
        }

        FrameKind::Ticket => {
            draw(rounded(0.0, 0.0, width, height, 1.0), fg, Role::Chrome);
            // Side notches, as if torn off a perforated roll.
            draw(Shape::Circle { cx: 0.0, cy: height / 2.0, r: 1.5 }, bg, Role::Chrome);
            draw(Shape::Circle { cx: width, cy: height / 2.0, r: 1.5 }, bg, Role::Chrome);
        }

        FrameKind::Card => {
            draw(rounded(0.0, 0.0, width, height, 2.0), fg, Role::Chrome);
        }

        FrameKind::Tag => {
            draw(rounded(0.0, 0.0, width, height, 1.5), fg, Role::Chrome);
            // Lanyard hole.
            draw(Shape::Circle { cx: width / 2.0, cy: 2.0, r: 0.9 }, bg, Role::Chrome);
        }

        FrameKind::Certificate => {
            // Double rule border.
            draw(Shape::Rect { x: 0.0, y: 0.0, w: width, h: height }, fg, Role::Chrome);
            draw(
                Shape::Rect { x: 0.6, y: 0.6, w: width - 1.2, h: height - 1.2 },
                bg,
                Role::Chrome,
            );
            draw(
                Shape::Rect { x: 1.2, y: 1.2, w: width - 2.4, h: height - 2.4 },
                fg,
                Role::Chrome,
            );
            draw(
                Shape::Rect { x: 1.8, y: 1.8, w: width - 3.6, h: height - 3.6 },
                bg,
                Role::Chrome,
            );
        }
    }

    if has_caption_slot(frame) {
        let caption = match text {
            Some(t) if !t.trim().is_empty() => Some(t.trim().to_owned()),
            // The classic call to action is this template's whole point.
            _ if frame == FrameKind::ScanMe => Some("SCAN ME".to_owned()),
            _ => None,
        };
        if let Some(caption) = caption {
            // Certificate's caption strip sits on the light inner field;
            // every other slotted template's strip is foreground-colored.
            let paint = if frame == FrameKind::Certificate { fg } else { bg };
            chrome.push(Placed {
                shape: Shape::Label {
                    x: width / 2.0,
                    y: height - 2.0,
                    font_size: 2.4,
                    text: caption,
                },
                paint,
                role: Role::Caption,
            });
        }
    }

    RenderedDocument {
        width,
        height,
        quiet_zone: QUIET_ZONE,
        symbol_offset: (left, top),
        chrome,
        scene,
    }
}

fn rounded(x: f64, y: f64, w: f64, h: f64, r: f64) -> Shape {
    Shape::RoundedRect { x, y, w, h, radii: [r; 4] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{Color, Design};
    use crate::qrcode::QrCodeEcc;
    use crate::{render, symbol};

    fn test_scene() -> Scene {
        let mut matrix = symbol::generate("frame test", QrCodeEcc::Medium, false).unwrap();
        render::render(&mut matrix, &Design::default()).unwrap()
    }

    #[test]
    fn test_none_frame_adds_nothing() {
        let scene = test_scene();
        let side = scene.side;
        let doc = compose(scene, FrameKind::None, None);
        assert_eq!((doc.width, doc.height), (side, side));
        assert!(doc.chrome.is_empty());
        assert_eq!(doc.symbol_offset, (0.0, 0.0));
    }

    #[test]
    fn test_intrinsic_size_is_side_plus_padding() {
        for frame in FrameKind::ALL {
            let scene = test_scene();
            let side = scene.side;
            let [top, right, bottom, left] = padding(frame);
            let doc = compose(scene, frame, None);
            assert_eq!(doc.width, side + left + right, "{frame:?}");
            assert_eq!(doc.height, side + top + bottom, "{frame:?}");
            assert_eq!(doc.symbol_offset, (left, top), "{frame:?}");
        }
    }

    #[test]
    fn test_caption_rendered_when_slot_exists() {
        let doc = compose(test_scene(), FrameKind::Ticket, Some("ADMIT ONE"));
        let label = doc
            .chrome
            .iter()
            .find(|p| p.role == Role::Caption)
            .expect("ticket has a caption slot");
        match &label.shape {
            Shape::Label { text, .. } => assert_eq!(text, "ADMIT ONE"),
            other => panic!("caption was {other:?}"),
        }
    }

    #[test]
    fn test_caption_ignored_without_slot() {
        for frame in [FrameKind::Simple, FrameKind::Phone, FrameKind::Polaroid, FrameKind::Laptop] {
            let doc = compose(test_scene(), frame, Some("ignored"));
            assert!(
                doc.chrome.iter().all(|p| p.role != Role::Caption),
                "{frame:?} must ignore caption text"
            );
        }
    }

    #[test]
    fn test_scan_me_defaults_caption() {
        let doc = compose(test_scene(), FrameKind::ScanMe, None);
        let label = doc.chrome.iter().find(|p| p.role == Role::Caption).unwrap();
        match &label.shape {
            Shape::Label { text, .. } => assert_eq!(text, "SCAN ME"),
            other => panic!("caption was {other:?}"),
        }
    }

    #[test]
    fn test_empty_caption_omitted_for_other_slots() {
        let doc = compose(test_scene(), FrameKind::Card, Some("   "));
        assert!(doc.chrome.iter().all(|p| p.role != Role::Caption));
    }

    #[test]
    fn test_certificate_caption_contrasts_with_inner_field() {
        let scene = test_scene();
        let fg = scene.foreground;
        let doc = compose(scene, FrameKind::Certificate, Some("AUTHENTIC"));
        let label = doc.chrome.iter().find(|p| p.role == Role::Caption).unwrap();
        assert_eq!(label.paint, Paint::Solid(fg));
        assert_eq!(fg, Color::BLACK);
    }
}
