//! Symbol generation policy: error correction resolution, version
//! selection, and the region-tagged module matrix.
//!
//! [`generate`] wraps the Model 2 algorithm in [`crate::qrcode`] with the
//! two decisions that algorithm must not make on its own:
//!
//! - a logo overlay forces the High correction level, because occlusion
//!   spends recoverable capacity (silent upgrade, never an error);
//! - overflow at the resolved level surfaces as [`Error::PayloadTooLarge`].

use tracing::{debug, warn};

use crate::error::Error;
use crate::qrcode::{DataTooLong, QrCode, QrCodeEcc, Version};

/// What a module position is for, derived from version geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Ordinary data/ECC codeword module.
    Data,
    /// One of the three 7x7 finder patterns ("eyes").
    Finder,
    /// A 5x5 alignment pattern.
    Alignment,
    /// The alternating timing row/column.
    Timing,
    /// Format or version information, and the finder separators.
    Format,
    /// Outside the symbol proper (the blank scan margin).
    QuietZone,
}

/// A rectangle in module coordinates, used to record logo occlusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSpan {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// A generated symbol: square grid of dark/light modules, each tagged with
/// its [`Region`], plus the quiet-zone margin. Read-only for the renderer.
#[derive(Debug)]
pub struct Matrix {
    size: i32,
    quiet_zone: i32,
    version: Version,
    ecc: QrCodeEcc,
    dark: Vec<bool>,
    regions: Vec<Region>,
    occluded: Option<ModuleSpan>,
}

/// The quiet-zone width the QR standard requires, in modules.
pub const QUIET_ZONE: i32 = 4;

/// Generates the module matrix for a payload.
///
/// `requested` is the caller's preferred correction level; when
/// `logo_present` it is overridden to [`QrCodeEcc::High`]. The smallest
/// version that fits at the resolved level is used.
pub fn generate(
    payload: &str,
    requested: QrCodeEcc,
    logo_present: bool,
) -> Result<Matrix, Error> {
    let resolved = if logo_present { QrCodeEcc::High } else { requested };
    if logo_present && requested != QrCodeEcc::High {
        warn!(?requested, "logo present, forcing High error correction");
    }

    let qr = QrCode::encode_text(payload, resolved).map_err(|err| match err {
        DataTooLong::SegmentTooLong | DataTooLong::DataOverCapacity(..) => Error::PayloadTooLarge {
            len: payload.len(),
            max: QrCode::num_data_codewords(Version::MAX, resolved),
        },
    })?;
    debug!(
        version = qr.version().value(),
        size = qr.size(),
        ecc = ?qr.error_correction_level(),
        "symbol generated"
    );
    Ok(Matrix::from_qr(&qr))
}

impl Matrix {
    fn from_qr(qr: &QrCode) -> Matrix {
        let size = qr.size();
        let dark: Vec<bool> =
            (0..size * size).map(|i| qr.get_module(i % size, i / size)).collect();
        let regions = region_map(size, &qr.alignment_pattern_positions(), qr.version());
        Matrix {
            size,
            quiet_zone: QUIET_ZONE,
            version: qr.version(),
            ecc: qr.error_correction_level(),
            dark,
            regions,
            occluded: None,
        }
    }

    /// Side length in modules, excluding the quiet zone.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Quiet-zone margin in modules on each side.
    pub fn quiet_zone(&self) -> i32 {
        self.quiet_zone
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ecc(&self) -> QrCodeEcc {
        self.ecc
    }

    /// `true` for a dark module; the quiet zone is light.
    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.dark[(y * self.size + x) as usize]
    }

    /// Region tag for a position; out of bounds is the quiet zone.
    pub fn region(&self, x: i32, y: i32) -> Region {
        if (0..self.size).contains(&x) && (0..self.size).contains(&y) {
            self.regions[(y * self.size + x) as usize]
        } else {
            Region::QuietZone
        }
    }

    /// Top-left corners of the three finder patterns, in module coords.
    pub fn finder_origins(&self) -> [(i32, i32); 3] {
        [(0, 0), (self.size - 7, 0), (0, self.size - 7)]
    }

    /// Records the module span covered by a logo overlay. Informational
    /// only: the High-level policy in [`generate`] already paid for the
    /// occlusion, so nothing is re-generated.
    pub fn mark_occluded(&mut self, span: ModuleSpan) {
        self.occluded = Some(span);
    }

    pub fn occluded(&self) -> Option<ModuleSpan> {
        self.occluded
    }
}

/// Computes region tags from version geometry alone.
fn region_map(size: i32, alignment_positions: &[i32], version: Version) -> Vec<Region> {
    let mut regions = vec![Region::Data; (size * size) as usize];
    let mut set = |x: i32, y: i32, region: Region, regions: &mut Vec<Region>| {
        regions[(y * size + x) as usize] = region;
    };

    // Format information: column 8 and row 8 near the three finders.
    for i in 0..9 {
        set(8, i, Region::Format, &mut regions);
        set(i, 8, Region::Format, &mut regions);
    }
    for i in 0..8 {
        set(size - 1 - i, 8, Region::Format, &mut regions);
        set(8, size - 1 - i, Region::Format, &mut regions);
    }

    // Version information blocks, versions 7 and up.
    if version.value() >= 7 {
        for i in 0..18 {
            let a = size - 11 + i % 3;
            let b = i / 3;
            set(a, b, Region::Format, &mut regions);
            set(b, a, Region::Format, &mut regions);
        }
    }

    // Timing row and column.
    for i in 0..size {
        set(6, i, Region::Timing, &mut regions);
        set(i, 6, Region::Timing, &mut regions);
    }

    // Alignment patterns (those that survive near finders).
    let numalign = alignment_positions.len();
    for (i, &cy) in alignment_positions.iter().enumerate() {
        for (j, &cx) in alignment_positions.iter().enumerate() {
            let in_finder_corner = (i == 0 && j == 0)
                || (i == 0 && j == numalign - 1)
                || (i == numalign - 1 && j == 0);
            if in_finder_corner {
                continue;
            }
            for dy in -2..=2 {
                for dx in -2..=2 {
                    set(cx + dx, cy + dy, Region::Alignment, &mut regions);
                }
            }
        }
    }

    // Finder patterns and their light separators. Applied last so the 7x7
    // eye zones win over anything above.
    for (ox, oy) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        for dy in 0..7 {
            for dx in 0..7 {
                set(ox + dx, oy + dy, Region::Finder, &mut regions);
            }
        }
    }
    for i in 0..8 {
        // Top-left separator.
        set(7, i, Region::Format, &mut regions);
        set(i, 7, Region::Format, &mut regions);
        // Top-right separator.
        set(size - 8, i, Region::Format, &mut regions);
        set(size - 1 - i, 7, Region::Format, &mut regions);
        // Bottom-left separator.
        set(i, size - 8, Region::Format, &mut regions);
        set(7, size - 1 - i, Region::Format, &mut regions);
    }

    regions
}
