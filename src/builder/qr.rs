use std::ops::Deref;

use image::{GrayImage, Luma};

use crate::common::bitstream::BitStream;
use crate::common::codec::Mode;
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::*;

/// A single cell of the symbol grid. `bool` is `true` for a dark module,
/// `false` for light. `Empty` marks a cell not yet drawn, and must not
/// remain once a symbol is complete.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(bool),
    Version(bool),
    Format(bool),
    Data(bool),
}

impl Deref for Module {
    type Target = bool;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &false,
            Module::Func(c) | Module::Version(c) | Module::Format(c) | Module::Data(c) => c,
        }
    }
}

const FORMAT_INFO_BIT_LEN: usize = 15;
const VERSION_INFO_BIT_LEN: usize = 18;

#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Module; MAX_QR_SIZE]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel, mode: Mode) -> Self {
        debug_assert!(ver.0 >= 1 && ver.0 <= 40, "Invalid version");

        let w = ver.width();
        Self { grid: Box::new([Module::Empty; MAX_QR_SIZE]), w, ver, ecl, mode, mask: None }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(Some(self.ver), Some(self.ecl), Some(self.mode), self.mask)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid[..self.w * self.w].iter().filter(|&m| **m).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(true) => 'f',
                    Module::Func(false) => 'F',
                    Module::Version(true) => 'v',
                    Module::Version(false) => 'V',
                    Module::Format(true) => 'm',
                    Module::Format(false) => 'M',
                    Module::Data(true) => 'd',
                    Module::Data(false) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(false),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(true),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(false),
                        _ => Module::Func(true),
                    },
                );
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        self.draw_line(6, 8, 6, w - 9);
        self.draw_line(8, 6, w - 9, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::Func(j & 1 == 0));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::Func(i & 1 == 0));
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use super::QR;
    use crate::common::codec::Mode;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_timing_pattern_1() {
        let mut qr = QR::new(Version(1), ECLevel::L, Mode::Binary);
        qr.draw_timing_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fFfFf........\n\
             .....................\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r as i16, c as i16)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(true),
                        _ => Module::Func(false),
                    },
                )
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.set(-8, 8, Module::Func(true));
    }
}

// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(false),
            Module::Format(true),
            &FORMAT_INFO_COORDS_QR_MAIN,
        );
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(false),
            Module::Format(true),
            &FORMAT_INFO_COORDS_QR_SIDE,
        );
    }

    fn draw_version_info(&mut self) {
        if self.ver.0 < 7 {
            return;
        }
        let ver_info = self.ver.info();
        self.draw_number(
            ver_info,
            VERSION_INFO_BIT_LEN,
            Module::Version(false),
            Module::Version(true),
            &VERSION_INFO_COORDS_BL,
        );
        self.draw_number(
            ver_info,
            VERSION_INFO_BIT_LEN,
            Module::Version(false),
            Module::Version(true),
            &VERSION_INFO_COORDS_TR,
        );
    }

    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off: Module,
        on: Module,
        coords: &[(i32, i32)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            self.set(r as i16, c as i16, if number & mask == 0 { off } else { on });
            mask >>= 1;
        }
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_encoding_region(&mut self, payload: BitStream) {
        self.reserve_format_area();
        self.draw_version_info();
        self.draw_payload(payload);

        let ver_sz = self.w * self.w;
        debug_assert!(
            !self.grid[..ver_sz].contains(&Module::Empty),
            "Empty module found after drawing encoding region"
        );
    }

    fn draw_payload(&mut self, payload: BitStream) {
        let mut coords = EncRegionIter::new(self.ver);
        for bit in payload {
            let module = Module::Data(bit);
            for (r, c) in coords.by_ref() {
                if matches!(self.get(r, c), Module::Empty) {
                    self.set(r, c, module);
                    break;
                }
            }
        }
        let n = self.ver.remainder_bits();
        for (r, c) in coords.take(n) {
            if matches!(self.get(r, c), Module::Empty) {
                self.set(r, c, Module::Data(false));
            }
        }
    }

    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r as i32, c as i32) {
                    if let Module::Data(dark) = self.get(r, c) {
                        self.set(r, c, Module::Data(!dark))
                    }
                }
            }
        }
        let format_info = generate_format_info_qr(self.ecl, pattern);
        self.draw_format_info(format_info);
    }
}

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Renders the symbol to a grayscale bitmap with a 4-module quiet zone,
    /// each module `module_sz` pixels square.
    pub fn to_gray_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = 4 * module_sz;
        let qr_sz = self.w as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                let dark = *self.get(r, c);
                canvas.put_pixel(j, i, if dark { Luma([0]) } else { Luma([255]) });
            }
        }
        canvas
    }

    pub fn to_str(&self, module_sz: usize) -> String {
        let w = self.w;
        let mut canvas = String::with_capacity(w * (w + 1));
        for r in 0..w as i16 {
            for c in 0..w as i16 {
                let dark = *self.get(r, c);
                for _ in 0..module_sz {
                    canvas.push(if dark { '1' } else { '0' });
                }
            }
            canvas.push('\n');
        }
        canvas
    }
}
