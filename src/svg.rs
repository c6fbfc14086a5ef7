//! SVG 1.1 serialization of a [`RenderedDocument`].
//!
//! Pure string building, Unix newlines, no I/O: the host serializes this
//! for on-screen preview or hands it to a rasterizer for PNG export.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::design::{Color, GradientDirection};
use crate::frame::RenderedDocument;
use crate::scene::{Paint, Placed, Shape};

/// The paint id referenced by gradient-filled shapes.
const GRADIENT_ID: &str = "symbol-paint";

/// Returns a string of SVG code depicting the given document.
pub fn to_svg_string(doc: &RenderedDocument) -> String {
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" viewBox=\"0 0 {} {}\" stroke=\"none\">\n",
        num(doc.width),
        num(doc.height)
    );

    if let Some(gradient) = doc.scene.gradient {
        result += "\t<defs>\n";
        let side = doc.scene.side;
        match gradient.direction {
            GradientDirection::Radial => {
                result += &format!(
                    "\t\t<radialGradient id=\"{GRADIENT_ID}\" gradientUnits=\"userSpaceOnUse\" cx=\"{0}\" cy=\"{0}\" r=\"{0}\">\n",
                    num(side / 2.0)
                );
                result += &stops(gradient.start, gradient.end);
                result += "\t\t</radialGradient>\n";
            }
            direction => {
                let (x2, y2) = match direction {
                    GradientDirection::Vertical => (0.0, side),
                    GradientDirection::Horizontal => (side, 0.0),
                    _ => (side, side), // diagonal
                };
                result += &format!(
                    "\t\t<linearGradient id=\"{GRADIENT_ID}\" gradientUnits=\"userSpaceOnUse\" x1=\"0\" y1=\"0\" x2=\"{}\" y2=\"{}\">\n",
                    num(x2),
                    num(y2)
                );
                result += &stops(gradient.start, gradient.end);
                result += "\t\t</linearGradient>\n";
            }
        }
        result += "\t</defs>\n";
    }

    for placed in &doc.chrome {
        result += &element(placed, 1);
    }

    let (ox, oy) = doc.symbol_offset;
    if ox == 0.0 && oy == 0.0 {
        for placed in &doc.scene.primitives {
            result += &element(placed, 1);
        }
    } else {
        result += &format!("\t<g transform=\"translate({},{})\">\n", num(ox), num(oy));
        for placed in &doc.scene.primitives {
            result += &element(placed, 2);
        }
        result += "\t</g>\n";
    }

    result += "</svg>\n";
    result
}

fn stops(start: Color, end: Color) -> String {
    format!(
        "\t\t\t<stop offset=\"0\" stop-color=\"{}\"/>\n\t\t\t<stop offset=\"1\" stop-color=\"{}\"/>\n",
        start.to_hex(),
        end.to_hex()
    )
}

fn fill(paint: Paint) -> String {
    match paint {
        Paint::Solid(color) => color.to_hex(),
        Paint::SymbolGradient => format!("url(#{GRADIENT_ID})"),
    }
}

fn element(placed: &Placed, depth: usize) -> String {
    let indent = "\t".repeat(depth);
    let fill = fill(placed.paint);
    match &placed.shape {
        Shape::Rect { x, y, w, h } => format!(
            "{indent}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\"/>\n",
            num(*x),
            num(*y),
            num(*w),
            num(*h)
        ),
        Shape::RoundedRect { x, y, w, h, radii } => {
            if radii.windows(2).all(|r| r[0] == r[1]) {
                format!(
                    "{indent}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{fill}\"/>\n",
                    num(*x),
                    num(*y),
                    num(*w),
                    num(*h),
                    num(radii[0])
                )
            } else {
                format!(
                    "{indent}<path d=\"{}\" fill=\"{fill}\"/>\n",
                    rounded_rect_path(*x, *y, *w, *h, *radii)
                )
            }
        }
        Shape::Circle { cx, cy, r } => format!(
            "{indent}<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\"/>\n",
            num(*cx),
            num(*cy),
            num(*r)
        ),
        Shape::Polygon { points } => {
            let points: Vec<String> =
                points.iter().map(|&(x, y)| format!("{},{}", num(x), num(y))).collect();
            format!("{indent}<polygon points=\"{}\" fill=\"{fill}\"/>\n", points.join(" "))
        }
        Shape::Image { x, y, w, h, mime, data } => format!(
            "{indent}<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\" xlink:href=\"data:{mime};base64,{}\"/>\n",
            num(*x),
            num(*y),
            num(*w),
            num(*h),
            STANDARD.encode(data)
        ),
        Shape::Label { x, y, font_size, text } => format!(
            "{indent}<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"Helvetica, Arial, sans-serif\" font-weight=\"bold\" text-anchor=\"middle\" fill=\"{fill}\">{}</text>\n",
            num(*x),
            num(*y),
            num(*font_size),
            xml_escape(text)
        ),
    }
}

/// Path for a rectangle with per-corner radii, clockwise from top-left.
/// Zero-radius corners emit plain line joins instead of degenerate arcs.
fn rounded_rect_path(x: f64, y: f64, w: f64, h: f64, [tl, tr, br, bl]: [f64; 4]) -> String {
    let mut d = format!("M{},{}", num(x + tl), num(y));
    d += &format!(" L{},{}", num(x + w - tr), num(y));
    if tr > 0.0 {
        d += &format!(" A{0},{0} 0 0 1 {1},{2}", num(tr), num(x + w), num(y + tr));
    }
    d += &format!(" L{},{}", num(x + w), num(y + h - br));
    if br > 0.0 {
        d += &format!(" A{0},{0} 0 0 1 {1},{2}", num(br), num(x + w - br), num(y + h));
    }
    d += &format!(" L{},{}", num(x + bl), num(y + h));
    if bl > 0.0 {
        d += &format!(" A{0},{0} 0 0 1 {1},{2}", num(bl), num(x), num(y + h - bl));
    }
    d += &format!(" L{},{}", num(x), num(y + tl));
    if tl > 0.0 {
        d += &format!(" A{0},{0} 0 0 1 {1},{2}", num(tl), num(x + tl), num(y));
    }
    d + " Z"
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shortest-form decimal, so `25.0` prints as `25`.
fn num(v: f64) -> String {
    format!("{v}")
}
