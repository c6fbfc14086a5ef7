//! Visual design descriptor for a styled symbol.
//!
//! A [`Design`] is a pure value object handed to the renderer; it is never
//! mutated during a render. Plan gating (which styles a caller's
//! subscription unlocks) is expressed by the caller through
//! [`Capabilities`], not by checks inside the renderer.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Shape drawn for each ordinary dark data module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStyle {
    /// Full-size rectangle per dark module.
    Square,
    /// Inscribed circle at 80% of the module size, keeping adjacent dots
    /// visually separated.
    Dots,
    /// Rounded rectangle; corners flatten against adjacent dark modules so
    /// contiguous runs stay joined.
    Rounded,
}

/// Shape family for the three 7x7 finder patterns.
///
/// Eye styling never touches data modules; over-styled data measurably
/// hurts scan reliability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeStyle {
    Square,
    Circle,
    Rounded,
    Leaf,
    Diamond,
}

/// Gradient sweep direction across the symbol bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    Vertical,
    Horizontal,
    Diagonal,
    Radial,
}

/// A gradient fill spanning the full symbol, not per-module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
    pub direction: GradientDirection,
}

/// Decorative frame template wrapped around the rendered symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    None,
    Simple,
    ScanMe,
    Balloon,
    Badge,
    Phone,
    Polaroid,
    Laptop,
    Ticket,
    Card,
    Tag,
    Certificate,
}

impl FrameKind {
    pub const ALL: [FrameKind; 12] = [
        FrameKind::None,
        FrameKind::Simple,
        FrameKind::ScanMe,
        FrameKind::Balloon,
        FrameKind::Badge,
        FrameKind::Phone,
        FrameKind::Polaroid,
        FrameKind::Laptop,
        FrameKind::Ticket,
        FrameKind::Card,
        FrameKind::Tag,
        FrameKind::Certificate,
    ];
}

/// An opaque sRGB color.
///
/// Serializes as a `#rrggbb` hex string, the form the dashboard sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses a `#rrggbb` or `rrggbb` hex string.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::invalid("color", format!("expected #rrggbb, got {s:?}")));
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap();
        Ok(Color { r: byte(0), g: byte(2), b: byte(4) })
    }

    /// Formats as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Full design descriptor for one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(default = "default_module_style")]
    pub module_style: ModuleStyle,
    #[serde(default = "default_eye_style")]
    pub eye_style: EyeStyle,
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default = "default_background")]
    pub background: Color,
    /// Overrides the foreground/gradient paint for both eye layers.
    #[serde(default)]
    pub eye_color: Option<Color>,
    /// When set, replaces the solid foreground as the dark-module paint.
    #[serde(default)]
    pub gradient: Option<Gradient>,
    #[serde(default = "default_frame")]
    pub frame: FrameKind,
    #[serde(default)]
    pub frame_text: Option<String>,
    /// Already-fetched logo image bytes (PNG/JPEG). Fetching is the
    /// caller's concern; the pipeline performs no I/O.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "logo_base64")]
    pub logo: Option<Vec<u8>>,
}

impl Default for Design {
    fn default() -> Self {
        Design {
            module_style: ModuleStyle::Square,
            eye_style: EyeStyle::Square,
            foreground: Color::BLACK,
            background: Color::WHITE,
            eye_color: None,
            gradient: None,
            frame: FrameKind::None,
            frame_text: None,
            logo: None,
        }
    }
}

fn default_module_style() -> ModuleStyle {
    ModuleStyle::Square
}
fn default_eye_style() -> EyeStyle {
    EyeStyle::Square
}
fn default_foreground() -> Color {
    Color::BLACK
}
fn default_background() -> Color {
    Color::WHITE
}
fn default_frame() -> FrameKind {
    FrameKind::None
}

/// Logo bytes travel as base64 on the JSON boundary.
mod logo_base64 {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(bytes) => s.serialize_some(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let opt: Option<String> = Option::deserialize(d)?;
        opt.map(|s| STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// What the caller's plan unlocks. The pipeline checks this at entry and
/// fails with `EyeStyleNotPermitted`/`FrameNotPermitted`; pricing logic
/// itself lives with the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub allowed_eye_styles: Vec<EyeStyle>,
    pub allowed_frames: Vec<FrameKind>,
}

impl Capabilities {
    /// Everything allowed.
    pub fn unrestricted() -> Self {
        Capabilities {
            allowed_eye_styles: vec![
                EyeStyle::Square,
                EyeStyle::Circle,
                EyeStyle::Rounded,
                EyeStyle::Leaf,
                EyeStyle::Diamond,
            ],
            allowed_frames: FrameKind::ALL.to_vec(),
        }
    }

    pub fn check(&self, design: &Design) -> Result<(), Error> {
        if !self.allowed_eye_styles.contains(&design.eye_style) {
            return Err(Error::EyeStyleNotPermitted(design.eye_style));
        }
        if !self.allowed_frames.contains(&design.frame) {
            return Err(Error::FrameNotPermitted(design.frame));
        }
        Ok(())
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::unrestricted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let c = Color::from_hex("#1a2B3c").unwrap();
        assert_eq!(c, Color::new(0x1a, 0x2b, 0x3c));
        assert_eq!(c.to_hex(), "#1a2b3c");
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
    }

    #[test]
    fn test_design_deserialize_defaults() {
        let design: Design = serde_json::from_str(r##"{"foreground":"#ff6600"}"##).unwrap();
        assert_eq!(design.foreground, Color::new(0xff, 0x66, 0x00));
        assert_eq!(design.module_style, ModuleStyle::Square);
        assert_eq!(design.frame, FrameKind::None);
        assert!(design.logo.is_none());
    }

    #[test]
    fn test_capabilities_gate() {
        let caps = Capabilities {
            allowed_eye_styles: vec![EyeStyle::Square],
            allowed_frames: vec![FrameKind::None, FrameKind::Simple],
        };
        let mut design = Design::default();
        assert!(caps.check(&design).is_ok());

        design.eye_style = EyeStyle::Leaf;
        assert_eq!(caps.check(&design), Err(Error::EyeStyleNotPermitted(EyeStyle::Leaf)));

        design.eye_style = EyeStyle::Square;
        design.frame = FrameKind::ScanMe;
        assert_eq!(caps.check(&design), Err(Error::FrameNotPermitted(FrameKind::ScanMe)));
    }
}
