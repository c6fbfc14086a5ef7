//! End-to-end orchestration: content record in, rendered document out.
//!
//! Each stage is pure and usable on its own; this module only wires them
//! in order and applies the caller's [`Capabilities`] gate up front, so a
//! disallowed design fails before any encoding work happens.

use tracing::debug;

use crate::content::ContentRecord;
use crate::design::{Capabilities, Design};
use crate::error::Error;
use crate::frame::RenderedDocument;
use crate::qrcode::QrCodeEcc;
use crate::{encode, frame, render, svg, symbol};

/// Runs the full pipeline for one request.
///
/// Stages: capability check, payload encoding, symbol generation at the
/// requested error correction level (forced to High when the design
/// carries a logo), styling, frame composition.
pub fn render_document(
    record: &ContentRecord,
    design: &Design,
    requested_ecc: QrCodeEcc,
    caps: &Capabilities,
) -> Result<RenderedDocument, Error> {
    caps.check(design)?;
    let payload = encode::encode(record)?;
    debug!(
        content = record.type_name(),
        mode = ?record.mode(),
        payload_len = payload.len(),
        "encoded payload"
    );
    let mut matrix = symbol::generate(&payload, requested_ecc, design.logo.is_some())?;
    debug!(version = matrix.version().value(), size = matrix.size(), ecc = ?matrix.ecc(), "generated symbol");
    let scene = render::render(&mut matrix, design)?;
    Ok(frame::compose(scene, design.frame, design.frame_text.as_deref()))
}

/// Convenience wrapper returning the document already serialized as SVG.
pub fn render_svg(
    record: &ContentRecord,
    design: &Design,
    requested_ecc: QrCodeEcc,
    caps: &Capabilities,
) -> Result<String, Error> {
    let doc = render_document(record, design, requested_ecc, caps)?;
    Ok(svg::to_svg_string(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{EyeStyle, FrameKind};

    fn url_record() -> ContentRecord {
        ContentRecord::Link { url: "https://example.com/launch".into() }
    }

    #[test]
    fn test_pipeline_produces_document() {
        let doc = render_document(
            &url_record(),
            &Design::default(),
            QrCodeEcc::Medium,
            &Capabilities::unrestricted(),
        )
        .unwrap();
        assert_eq!(doc.width, doc.scene.side);
        assert!(!doc.scene.primitives.is_empty());
    }

    #[test]
    fn test_capability_gate_short_circuits() {
        let caps = Capabilities {
            allowed_eye_styles: vec![EyeStyle::Square],
            allowed_frames: vec![FrameKind::None],
        };
        let design = Design { eye_style: EyeStyle::Diamond, ..Design::default() };
        let err = render_document(&url_record(), &design, QrCodeEcc::Medium, &caps).unwrap_err();
        assert_eq!(err, Error::EyeStyleNotPermitted(EyeStyle::Diamond));
    }

    #[test]
    fn test_invalid_content_fails_before_rendering() {
        let record = ContentRecord::Link { url: "ftp://example.com".into() };
        let err = render_document(
            &record,
            &Design::default(),
            QrCodeEcc::Medium,
            &Capabilities::unrestricted(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { field: "url", .. }));
    }

    #[test]
    fn test_render_svg_wraps_document() {
        let svg = render_svg(
            &url_record(),
            &Design::default(),
            QrCodeEcc::Medium,
            &Capabilities::unrestricted(),
        )
        .unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
    }
}
