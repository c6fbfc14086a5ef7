//! QR content encoding and symbol styling engine.
//!
//! Turns a structured [`ContentRecord`] into a styled, framed, scannable
//! QR document. The pipeline has five pure stages, each usable on its own:
//!
//! 1. [`encode`](mod@encode): content record to payload string (WiFi,
//!    vCard, mailto, PIX BR Code and the rest of the grammars);
//! 2. [`symbol`]: payload to a region-tagged module matrix, with the
//!    error correction policy applied (a logo forces High);
//! 3. [`render`]: matrix plus [`Design`] to a vector scene graph in
//!    module units (module shapes, eye styles, gradients, logo overlay);
//! 4. [`frame`]: scene plus one of twelve frame templates to a
//!    [`RenderedDocument`] with chrome and an optional caption;
//! 5. [`svg`]: document to an SVG string.
//!
//! [`pipeline::render_document`] wires the stages together.
//!
//! # Example
//!
//! ```
//! use qrforge::{Capabilities, ContentRecord, Design, QrCodeEcc};
//!
//! let record = ContentRecord::Wifi {
//!     ssid: "HomeNet".into(),
//!     password: "hunter2".into(),
//!     auth: qrforge::WifiAuth::Wpa,
//!     hidden: false,
//! };
//! let svg = qrforge::pipeline::render_svg(
//!     &record,
//!     &Design::default(),
//!     QrCodeEcc::Medium,
//!     &Capabilities::unrestricted(),
//! )?;
//! assert!(svg.contains("<svg"));
//! # Ok::<(), qrforge::Error>(())
//! ```
//!
//! Everything is deterministic: the same record, design and level always
//! produce byte-identical output. No I/O happens anywhere in the crate;
//! logo bytes arrive pre-fetched in the [`Design`].

pub mod content;
pub mod design;
pub mod encode;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod qrcode;
pub mod render;
pub mod scene;
pub mod svg;
pub mod symbol;

pub use content::{ContentRecord, Mode, WifiAuth};
pub use design::{
    Capabilities, Color, Design, EyeStyle, FrameKind, Gradient, GradientDirection, ModuleStyle,
};
pub use error::Error;
pub use frame::RenderedDocument;
pub use qrcode::{QrCode, QrCodeEcc, Version};
pub use scene::{Paint, Placed, Role, Scene, Shape};
pub use symbol::{Matrix, ModuleSpan, Region};
