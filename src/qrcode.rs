#![forbid(unsafe_code)]
//! QR Code Model 2 encoding.
//!
//! Implements segment encoding (numeric, alphanumeric, byte), Reed-Solomon
//! error correction with per-version block interleaving, function pattern
//! placement, and penalty-scored mask selection for versions 1 to 40.
//!
//! This module knows nothing about content grammars or styling; it turns a
//! payload string and an error correction level into a grid of dark and
//! light modules. The policy layer in [`crate::symbol`] decides the error
//! correction level and wraps the grid with region metadata.

/// Error correction level, trading data capacity for resilience.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    fn ordinal(self) -> usize {
        match self {
            QrCodeEcc::Low => 0,
            QrCodeEcc::Medium => 1,
            QrCodeEcc::Quartile => 2,
            QrCodeEcc::High => 3,
        }
    }

    /// The 2-bit value placed in the format information.
    fn format_bits(self) -> u8 {
        match self {
            QrCodeEcc::Low => 1,
            QrCodeEcc::Medium => 0,
            QrCodeEcc::Quartile => 3,
            QrCodeEcc::High => 2,
        }
    }
}

/// A QR code version (1-40). The symbol side length is `version * 4 + 17`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    /// # Panics
    ///
    /// Panics if the number is outside [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(1 <= ver && ver <= 40, "Version number out of range");
        Self(ver)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Payload exceeds what version 40 can hold at the requested level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTooLong {
    /// A segment's character count field cannot represent its length.
    SegmentTooLong,
    /// Data length in bits versus the maximum capacity in bits.
    DataOverCapacity(usize, usize),
}

impl core::fmt::Display for DataTooLong {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::SegmentTooLong => write!(f, "Segment too long"),
            Self::DataOverCapacity(datalen, maxcapacity) => {
                write!(f, "Data length = {} bits, Max capacity = {} bits", datalen, maxcapacity)
            }
        }
    }
}

impl std::error::Error for DataTooLong {}

/// An encoded QR symbol: a square grid of dark (`true`) and light (`false`)
/// modules. Immutable once constructed.
#[derive(Debug)]
pub struct QrCode {
    version: Version,
    size: i32,
    ecc: QrCodeEcc,
    mask: u8,
    modules: Vec<bool>,
    isfunction: Vec<bool>,
}

impl QrCode {
    /// Encodes text at exactly the given error correction level, selecting
    /// the smallest version (1-40) that fits.
    ///
    /// The level is honored as requested, with no silent boosting, so the
    /// error correction policy applied upstream stays visible in the
    /// finished symbol.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<QrCode, DataTooLong> {
        let seg = Segment::make(text);

        // Smallest version whose data capacity holds the segment.
        let mut version = Version::MIN;
        let datausedbits: usize = loop {
            let datacapacitybits = Self::num_data_codewords(version, ecl) * 8;
            match seg.total_bits(version) {
                Some(n) if n <= datacapacitybits => break n,
                used if version == Version::MAX => {
                    return Err(match used {
                        None => DataTooLong::SegmentTooLong,
                        Some(n) => DataTooLong::DataOverCapacity(n, datacapacitybits),
                    });
                }
                _ => version = Version::new(version.value() + 1),
            }
        };

        // Mode indicator, character count, data bits.
        let datacapacitybits = Self::num_data_codewords(version, ecl) * 8;
        let mut bb = BitBuffer::new();
        bb.append_bits(seg.mode.mode_bits(), 4);
        bb.append_bits(seg.numchars as u32, seg.mode.char_count_bits(version));
        bb.extend(&seg.data);
        debug_assert_eq!(bb.len(), datausedbits);

        // Terminator, byte alignment, then alternating pad bytes.
        let terminator = core::cmp::min(4, datacapacitybits - bb.len());
        bb.append_bits(0, terminator as u8);
        bb.append_bits(0, ((8 - bb.len() % 8) % 8) as u8);
        debug_assert_eq!(bb.len() % 8, 0);
        for &padbyte in [0xec, 0x11].iter().cycle() {
            if bb.len() >= datacapacitybits {
                break;
            }
            bb.append_bits(padbyte, 8);
        }

        Ok(QrCode::with_codewords(&bb.to_bytes(), version, ecl))
    }

    /// Builds the symbol grid from complete data codewords.
    fn with_codewords(datacodewords: &[u8], version: Version, ecc: QrCodeEcc) -> QrCode {
        let size = i32::from(version.value()) * 4 + 17;
        let mut result = QrCode {
            version,
            size,
            ecc,
            mask: 0,
            modules: vec![false; (size * size) as usize],
            isfunction: vec![false; (size * size) as usize],
        };

        result.draw_function_patterns();
        let allcodewords = result.add_ecc_and_interleave(datacodewords);
        result.draw_codewords(&allcodewords);

        // Trial all eight masks, keeping the lowest penalty score.
        let mut minpenalty = i32::MAX;
        let mut best: u8 = 0;
        for mask in 0u8..8 {
            result.apply_mask(mask);
            result.draw_format_bits(mask);
            let penalty = result.penalty_score();
            if penalty < minpenalty {
                best = mask;
                minpenalty = penalty;
            }
            result.apply_mask(mask); // XOR undoes itself
        }
        result.apply_mask(best);
        result.draw_format_bits(best);
        result.mask = best;
        result
    }

    /// Side length in modules, in [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecc
    }

    /// The chosen mask pattern, in [0, 7].
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// `true` for a dark module. Out-of-bounds coordinates are light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.modules[(y * self.size + x) as usize]
    }

    /// Center coordinates of the alignment patterns for this version, in
    /// ascending order. Empty for version 1.
    pub fn alignment_pattern_positions(&self) -> Vec<i32> {
        let ver = i32::from(self.version.value());
        if ver == 1 {
            return Vec::new();
        }
        let numalign = ver / 7 + 2;
        let step =
            if ver == 32 { 26 } else { (ver * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2 };
        let mut result: Vec<i32> = (0..numalign - 1).map(|i| self.size - 7 - i * step).collect();
        result.push(6);
        result.reverse();
        result
    }

    /*---- Drawing ----*/

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        let idx = (y * self.size + x) as usize;
        self.modules[idx] = isdark;
        self.isfunction[idx] = true;
    }

    fn draw_function_patterns(&mut self) {
        // Timing patterns.
        for i in 0..self.size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        // Finder patterns in three corners; the dist-4 light ring doubles
        // as the separator, clipped at the symbol edge.
        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(self.size - 4, 3);
        self.draw_finder_pattern(3, self.size - 4);

        // Alignment patterns everywhere except the three finder corners.
        let alignpatpos = self.alignment_pattern_positions();
        let numalign = alignpatpos.len();
        for (i, &cy) in alignpatpos.iter().enumerate() {
            for (j, &cx) in alignpatpos.iter().enumerate() {
                let in_finder_corner = (i == 0 && j == 0)
                    || (i == 0 && j == numalign - 1)
                    || (i == numalign - 1 && j == 0);
                if !in_finder_corner {
                    self.draw_alignment_pattern(cx, cy);
                }
            }
        }

        // Reserve the format areas with a dummy mask; overwritten once the
        // real mask is chosen.
        self.draw_format_bits(0);
        self.draw_version_information();
    }

    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let dist: i32 = dx.abs().max(dy.abs());
                let (xx, yy) = (x + dx, y + dy);
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    /// Draws the 15-bit BCH-protected format information for the given mask.
    fn draw_format_bits(&mut self, mask: u8) {
        let bits: u32 = {
            let data = u32::from((self.ecc.format_bits() << 3) | mask);
            let mut rem = data;
            for _ in 0..10 {
                rem = (rem << 1) ^ ((rem >> 9) * 0x537);
            }
            ((data << 10) | rem) ^ 0x5412
        };
        debug_assert_eq!(bits >> 15, 0);

        // First copy, around the top-left finder.
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i as u8));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i as u8));
        }

        // Second copy, split across the other two finders.
        for i in 0..8 {
            self.set_function_module(self.size - 1 - i, 8, get_bit(bits, i as u8));
        }
        for i in 8..15 {
            self.set_function_module(8, self.size - 15 + i, get_bit(bits, i as u8));
        }
        self.set_function_module(8, self.size - 8, true); // always dark
    }

    /// Draws the two 18-bit version information blocks, versions 7 and up.
    fn draw_version_information(&mut self) {
        let ver = u32::from(self.version.value());
        if ver < 7 {
            return;
        }
        let bits: u32 = {
            let mut rem = ver;
            for _ in 0..12 {
                rem = (rem << 1) ^ ((rem >> 11) * 0x1f25);
            }
            (ver << 12) | rem
        };
        for i in 0u8..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i32::from(i % 3);
            let b = i32::from(i / 3);
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    /// Places codeword bits in the standard two-column zigzag, skipping
    /// function modules.
    fn draw_codewords(&mut self, data: &[u8]) {
        assert_eq!(data.len(), Self::num_raw_data_modules(self.version) / 8);
        let mut i: usize = 0;
        let mut right = self.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..self.size {
                for j in 0..2 {
                    let x = right - j;
                    let upward = ((right + 1) & 2) == 0;
                    let y = if upward { self.size - 1 - vert } else { vert };
                    let idx = (y * self.size + x) as usize;
                    if !self.isfunction[idx] && i < data.len() * 8 {
                        self.modules[idx] = get_bit(data[i >> 3].into(), 7 - ((i as u8) & 7));
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, data.len() * 8);
    }

    fn apply_mask(&mut self, mask: u8) {
        for y in 0..self.size {
            for x in 0..self.size {
                let invert = match mask {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => ((x * y) % 2) + ((x * y) % 3) == 0,
                    6 => (((x * y) % 2) + ((x * y) % 3)) % 2 == 0,
                    7 => (((x + y) % 2) + ((x * y) % 3)) % 2 == 0,
                    _ => unreachable!(),
                };
                let idx = (y * self.size + x) as usize;
                self.modules[idx] ^= invert && !self.isfunction[idx];
            }
        }
    }

    /*---- Error correction ----*/

    fn add_ecc_and_interleave(&self, data: &[u8]) -> Vec<u8> {
        let (ver, ecl) = (self.version, self.ecc);
        assert_eq!(data.len(), Self::num_data_codewords(ver, ecl));

        let numblocks = Self::table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl);
        let blockecclen = Self::table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl);
        let rawcodewords = Self::num_raw_data_modules(ver) / 8;
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblockdatalen = rawcodewords / numblocks - blockecclen;

        // Split into blocks and append each block's Reed-Solomon remainder.
        // Short blocks get a placeholder byte so every block has the same
        // length for the interleave below.
        let rs = ReedSolomonGenerator::new(blockecclen);
        let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(numblocks);
        let mut offset: usize = 0;
        for i in 0..numblocks {
            let datlen = shortblockdatalen + usize::from(i >= numshortblocks);
            let mut block = data[offset..offset + datlen].to_vec();
            offset += datlen;
            let ecc = rs.compute_remainder(&block);
            if i < numshortblocks {
                block.push(0);
            }
            block.extend_from_slice(&ecc);
            blocks.push(block);
        }
        debug_assert_eq!(offset, data.len());

        // Interleave one byte from each block in turn, skipping the
        // placeholder position in short blocks.
        let mut result = Vec::with_capacity(rawcodewords);
        for i in 0..blocks[0].len() {
            for (j, block) in blocks.iter().enumerate() {
                if i != shortblockdatalen || j >= numshortblocks {
                    result.push(block[i]);
                }
            }
        }
        debug_assert_eq!(result.len(), rawcodewords);
        result
    }

    /*---- Penalty scoring ----*/

    fn penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size = self.size;

        // Adjacent same-color runs and finder-like patterns, per row.
        for y in 0..size {
            let mut runcolor = false;
            let mut runx: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for x in 0..size {
                if self.get_module(x, y) == runcolor {
                    runx += 1;
                    if runx == 5 {
                        result += PENALTY_N1;
                    } else if runx > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runx);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.get_module(x, y);
                    runx = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runx) * PENALTY_N3;
        }
        // Same per column.
        for x in 0..size {
            let mut runcolor = false;
            let mut runy: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for y in 0..size {
                if self.get_module(x, y) == runcolor {
                    runy += 1;
                    if runy == 5 {
                        result += PENALTY_N1;
                    } else if runy > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runy);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.get_module(x, y);
                    runy = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runy) * PENALTY_N3;
        }

        // 2x2 blocks of a single color.
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.get_module(x, y);
                if color == self.get_module(x + 1, y)
                    && color == self.get_module(x, y + 1)
                    && color == self.get_module(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        // Dark/light balance.
        let dark = self.modules.iter().filter(|&&m| m).count() as i32;
        let total = size * size;
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        result += k * PENALTY_N4;
        result
    }

    /*---- Capacity tables ----*/

    fn num_raw_data_modules(ver: Version) -> usize {
        let ver = usize::from(ver.value());
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let numalign = ver / 7 + 2;
            result -= (25 * numalign - 10) * numalign - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    /// Data codeword capacity in bytes for a version and level.
    pub fn num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
        Self::num_raw_data_modules(ver) / 8
            - Self::table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl)
                * Self::table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
    }

    fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecl: QrCodeEcc) -> usize {
        table[ecl.ordinal()][usize::from(ver.value())] as usize
    }
}

/*---- Segments ----*/

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SegmentMode {
    Numeric,
    Alphanumeric,
    Byte,
}

impl SegmentMode {
    fn mode_bits(self) -> u32 {
        match self {
            SegmentMode::Numeric => 0x1,
            SegmentMode::Alphanumeric => 0x2,
            SegmentMode::Byte => 0x4,
        }
    }

    fn char_count_bits(self, ver: Version) -> u8 {
        let row = match self {
            SegmentMode::Numeric => [10, 12, 14],
            SegmentMode::Alphanumeric => [9, 11, 13],
            SegmentMode::Byte => [8, 16, 16],
        };
        row[usize::from((ver.value() + 7) / 17)]
    }
}

static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// One run of payload data in a single encoding mode.
struct Segment {
    mode: SegmentMode,
    numchars: usize,
    data: Vec<bool>,
}

impl Segment {
    /// Picks the densest mode the text qualifies for.
    fn make(text: &str) -> Segment {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            Segment::numeric(text)
        } else if text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c)) {
            Segment::alphanumeric(text)
        } else {
            Segment::bytes(text.as_bytes())
        }
    }

    fn bytes(data: &[u8]) -> Segment {
        let mut bb = BitBuffer::new();
        for &b in data {
            bb.append_bits(b.into(), 8);
        }
        Segment { mode: SegmentMode::Byte, numchars: data.len(), data: bb.into_bits() }
    }

    /// Digits packed three at a time into 10 bits.
    fn numeric(text: &str) -> Segment {
        let mut bb = BitBuffer::new();
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for b in text.bytes() {
            accumdata = accumdata * 10 + u32::from(b - b'0');
            accumcount += 1;
            if accumcount == 3 {
                bb.append_bits(accumdata, 10);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, accumcount * 3 + 1);
        }
        Segment { mode: SegmentMode::Numeric, numchars: text.len(), data: bb.into_bits() }
    }

    /// Characters packed two at a time into 11 bits.
    fn alphanumeric(text: &str) -> Segment {
        let mut bb = BitBuffer::new();
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for c in text.chars() {
            let i = ALPHANUMERIC_CHARSET.find(c).unwrap() as u32;
            accumdata = accumdata * 45 + i;
            accumcount += 1;
            if accumcount == 2 {
                bb.append_bits(accumdata, 11);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, 6);
        }
        Segment { mode: SegmentMode::Alphanumeric, numchars: text.len(), data: bb.into_bits() }
    }

    /// Total bits once wrapped with mode and count headers, or `None` if
    /// the character count field cannot hold this segment's length.
    fn total_bits(&self, version: Version) -> Option<usize> {
        let ccbits = self.mode.char_count_bits(version);
        if self.numchars >= (1usize << ccbits) {
            return None;
        }
        Some(4 + usize::from(ccbits) + self.data.len())
    }
}

/*---- Bit buffer ----*/

struct BitBuffer(Vec<bool>);

impl BitBuffer {
    fn new() -> Self {
        BitBuffer(Vec::new())
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0);
        self.0.extend((0..len).rev().map(|i| get_bit(val, i)));
    }

    fn extend(&mut self, bits: &[bool]) {
        self.0.extend_from_slice(bits);
    }

    fn into_bits(self) -> Vec<bool> {
        self.0
    }

    fn to_bytes(&self) -> Vec<u8> {
        debug_assert_eq!(self.0.len() % 8, 0);
        self.0
            .chunks(8)
            .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
            .collect()
    }
}

/*---- Reed-Solomon ----*/

struct ReedSolomonGenerator {
    divisor: Vec<u8>,
}

impl ReedSolomonGenerator {
    fn new(degree: usize) -> Self {
        assert!((1..=30).contains(&degree), "Degree out of range");
        let mut divisor = vec![0u8; degree];
        divisor[degree - 1] = 1;
        let mut root: u8 = 1;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Self::multiply(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Self::multiply(root, 0x02);
        }
        ReedSolomonGenerator { divisor }
    }

    fn compute_remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.divisor.len()];
        for &b in data {
            let factor = b ^ result[0];
            result.rotate_left(1);
            *result.last_mut().unwrap() = 0;
            for (x, &y) in result.iter_mut().zip(self.divisor.iter()) {
                *x ^= Self::multiply(y, factor);
            }
        }
        result
    }

    /// Product in GF(2^8) with reducing polynomial 0x11D.
    fn multiply(x: u8, y: u8) -> u8 {
        let mut z: u8 = 0;
        for i in (0..8).rev() {
            z = (z << 1) ^ ((z >> 7) * 0x1d);
            z ^= ((y >> i) & 1) * x;
        }
        z
    }
}

/*---- Penalty machinery ----*/

struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(size: i32) -> Self {
        Self { qr_size: size, run_history: [0; 7] }
    }

    fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size; // light border counts as a light run
        }
        self.run_history.copy_within(0..6, 1);
        self.run_history[0] = currentrunlength;
    }

    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        i32::from(
            n > 0
                && rh[2] == n
                && rh[3] == n * 3
                && rh[4] == n
                && rh[5] == n
                && (rh[0] >= n * 4 || rh[6] >= n * 4),
        )
    }

    fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size;
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

fn get_bit(x: u32, i: u8) -> bool {
    ((x >> i) & 1) != 0
}

static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_payload_selects_version_1() {
        let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Low).unwrap();
        assert_eq!(qr.version().value(), 1);
        assert_eq!(qr.size(), 21);
        assert_eq!(qr.error_correction_level(), QrCodeEcc::Low);
    }

    #[test]
    fn test_size_tracks_version() {
        // 155 bytes is over the version-5 byte capacity at Low (106), so
        // the version search must walk past it.
        let payload = "x".repeat(155);
        let qr = QrCode::encode_text(&payload, QrCodeEcc::Low).unwrap();
        assert_eq!(qr.size(), i32::from(qr.version().value()) * 4 + 17);
        assert!(qr.version().value() > 5);
    }

    #[test]
    fn test_requested_level_is_not_boosted() {
        let qr = QrCode::encode_text("short", QrCodeEcc::Low).unwrap();
        assert_eq!(qr.error_correction_level(), QrCodeEcc::Low);
    }

    #[test]
    fn test_over_capacity_fails() {
        let payload = "x".repeat(3000);
        let err = QrCode::encode_text(&payload, QrCodeEcc::High).unwrap_err();
        assert!(matches!(err, DataTooLong::DataOverCapacity(_, _)));
    }

    #[test]
    fn test_segment_mode_selection() {
        assert_eq!(Segment::make("1234567890").mode, SegmentMode::Numeric);
        assert_eq!(Segment::make("HELLO WORLD").mode, SegmentMode::Alphanumeric);
        assert_eq!(Segment::make("Hello World").mode, SegmentMode::Byte);
    }

    #[test]
    fn test_finder_pattern_corners_are_dark() {
        let qr = QrCode::encode_text("test", QrCodeEcc::Medium).unwrap();
        // Center of each finder pattern is dark; the separator ring light.
        for (cx, cy) in [(3, 3), (qr.size() - 4, 3), (3, qr.size() - 4)] {
            assert!(qr.get_module(cx, cy));
            assert!(!qr.get_module(cx - 2, cy));
        }
        // Out-of-bounds reads are light.
        assert!(!qr.get_module(-1, 0));
        assert!(!qr.get_module(0, qr.size()));
    }

    #[test]
    fn test_dark_module_next_to_lower_left_finder() {
        // Format information always sets the module at (8, size-8) dark.
        let qr = QrCode::encode_text("anything", QrCodeEcc::Quartile).unwrap();
        assert!(qr.get_module(8, qr.size() - 8));
    }

    #[test]
    fn test_alignment_positions_version_1_and_larger() {
        let v1 = QrCode::encode_text("a", QrCodeEcc::Low).unwrap();
        assert!(v1.alignment_pattern_positions().is_empty());

        let payload = "x".repeat(130);
        let big = QrCode::encode_text(&payload, QrCodeEcc::Quartile).unwrap();
        let positions = big.alignment_pattern_positions();
        assert_eq!(positions.first(), Some(&6));
        assert_eq!(positions.last(), Some(&(big.size() - 7)));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = QrCode::encode_text("https://example.com", QrCodeEcc::High).unwrap();
        let b = QrCode::encode_text("https://example.com", QrCodeEcc::High).unwrap();
        assert_eq!(a.size(), b.size());
        assert_eq!(a.mask(), b.mask());
        for y in 0..a.size() {
            for x in 0..a.size() {
                assert_eq!(a.get_module(x, y), b.get_module(x, y));
            }
        }
    }
}
