use super::types::Mode;
use crate::common::bitstream::BitStream;
use crate::common::error::{QrError, QrResult};
use crate::common::metadata::{ECLevel, Version};

const MODE_INDICATOR_BITS: usize = 4;
const TERMINATOR_BITS: usize = 4;
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Number of payload bits `mode` needs to carry `len` characters, not
/// counting the mode indicator or character count indicator.
fn payload_bits(mode: Mode, len: usize) -> usize {
    match mode {
        Mode::Numeric => {
            let (groups, rem) = (len / 3, len % 3);
            groups * 10 + [0, 4, 7][rem]
        }
        Mode::Alphanumeric => {
            let (groups, rem) = (len / 2, len % 2);
            groups * 11 + if rem == 1 { 6 } else { 0 }
        }
        Mode::Binary => len * 8,
        Mode::Kanji => unreachable!("Kanji mode is not implemented"),
    }
}

fn symbol_bits(version: Version, mode: Mode, len: usize) -> usize {
    MODE_INDICATOR_BITS + version.char_cnt_bits(mode) + payload_bits(mode, len)
}

/// Picks the smallest version 1-40 whose data capacity, at `ec_level`, fits
/// `mode`-encoded data of length `len`.
fn smallest_fitting_version(mode: Mode, ec_level: ECLevel, len: usize) -> Option<Version> {
    (1..=40).map(Version).find(|&v| symbol_bits(v, mode, len) <= v.data_bit_capacity(ec_level))
}

/// Encodes `data` as a complete, padded data codeword stream for a symbol
/// at error correction level `ec_level`, in the requested `mode` (or the
/// narrowest mode the content fits, if none was requested), using
/// `version` if given or the smallest version the content fits otherwise.
///
/// Mirrors the simple, single-segment encoding scheme of the reference
/// generator this crate's behavior is modeled on: one mode for the whole
/// payload, no mixed-mode segmentation.
pub fn encode(
    data: &[u8],
    requested_mode: Option<Mode>,
    ec_level: ECLevel,
    version: Option<Version>,
) -> QrResult<(BitStream, Version, Mode)> {
    let detected_mode = Mode::best_fit(data);
    let mode = match requested_mode {
        Some(m) if m < detected_mode => {
            return Err(QrError::ModeMismatch {
                requested: mode_name(m),
                detected: mode_name(detected_mode),
            })
        }
        Some(Mode::Kanji) => return Err(QrError::UnimplementedMode("Kanji")),
        Some(m) => m,
        None => detected_mode,
    };

    let version = match version {
        Some(v) => {
            if symbol_bits(v, mode, data.len()) > v.data_bit_capacity(ec_level) {
                let minimum = smallest_fitting_version(mode, ec_level, data.len())
                    .ok_or(QrError::ContentTooLarge)?;
                return Err(QrError::UserVersionTooSmall { requested: v.0, minimum: minimum.0 });
            }
            v
        }
        None => smallest_fitting_version(mode, ec_level, data.len())
            .ok_or(QrError::ContentTooLarge)?,
    };

    let capacity = version.data_bit_capacity(ec_level);
    let mut bs = BitStream::new(capacity);

    bs.push_bits(mode.indicator_bits(), MODE_INDICATOR_BITS);
    bs.push_bits(data.len() as u32, version.char_cnt_bits(mode));
    push_payload(&mut bs, mode, data);

    let terminator_len = TERMINATOR_BITS.min(capacity - bs.len());
    bs.push_bits(0, terminator_len);

    let pad_to_byte = (8 - bs.len() % 8) % 8;
    bs.push_bits(0, pad_to_byte);

    let mut pad_idx = 0;
    while bs.len() < capacity {
        bs.push_byte(PAD_BYTES[pad_idx % 2]);
        pad_idx += 1;
    }

    Ok((bs, version, mode))
}

fn push_payload(bs: &mut BitStream, mode: Mode, data: &[u8]) {
    let chunk_size = match mode {
        Mode::Numeric => 3,
        Mode::Alphanumeric => 2,
        Mode::Binary => 1,
        Mode::Kanji => unreachable!("Kanji mode is not implemented"),
    };
    let bit_sizes: [usize; 4] = match mode {
        Mode::Numeric => [4, 7, 10, 0],
        Mode::Alphanumeric => [6, 11, 0, 0],
        Mode::Binary => [8, 0, 0, 0],
        Mode::Kanji => unreachable!("Kanji mode is not implemented"),
    };

    let mut upper = Vec::new();
    let data = if mode == Mode::Alphanumeric {
        upper.extend(data.iter().map(u8::to_ascii_uppercase));
        &upper
    } else {
        data
    };

    for chunk in data.chunks(chunk_size) {
        let bits = mode.encode_chunk(chunk);
        bs.push_bits(bits as u32, bit_sizes[chunk.len() - 1]);
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Numeric => "numeric",
        Mode::Alphanumeric => "alphanumeric",
        Mode::Binary => "binary",
        Mode::Kanji => "kanji",
    }
}

#[cfg(test)]
mod encoder_tests {
    use super::*;

    #[test]
    fn test_numeric_payload_bits() {
        assert_eq!(payload_bits(Mode::Numeric, 6), 20);
        assert_eq!(payload_bits(Mode::Numeric, 7), 24);
        assert_eq!(payload_bits(Mode::Numeric, 8), 27);
    }

    #[test]
    fn test_alphanumeric_payload_bits() {
        assert_eq!(payload_bits(Mode::Alphanumeric, 4), 22);
        assert_eq!(payload_bits(Mode::Alphanumeric, 5), 28);
    }

    #[test]
    fn test_encode_picks_smallest_version() {
        let (bs, version, mode) = encode(b"HELLO WORLD", None, ECLevel::Q, None).unwrap();
        assert_eq!(version, Version(1));
        assert_eq!(mode, Mode::Alphanumeric);
        assert_eq!(bs.len(), version.data_bit_capacity(ECLevel::Q));
    }

    #[test]
    fn test_encode_lowercase_alphanumeric_matches_uppercase() {
        let (lower, ver_lower, mode_lower) = encode(b"uca.edu", None, ECLevel::H, None).unwrap();
        let (upper, ver_upper, mode_upper) = encode(b"UCA.EDU", None, ECLevel::H, None).unwrap();
        assert_eq!(mode_lower, Mode::Alphanumeric);
        assert_eq!(mode_upper, Mode::Alphanumeric);
        assert_eq!(ver_lower, ver_upper);
        assert_eq!(lower.data(), upper.data());
    }

    #[test]
    fn test_encode_mode_mismatch() {
        let err = encode(b"Hi", Some(Mode::Numeric), ECLevel::M, None).unwrap_err();
        assert!(matches!(err, QrError::ModeMismatch { .. }));
    }

    #[test]
    fn test_encode_user_version_too_small() {
        let data = vec![b'1'; 200];
        let err = encode(&data, None, ECLevel::H, Some(Version(1))).unwrap_err();
        assert!(matches!(err, QrError::UserVersionTooSmall { requested: 1, .. }));
    }

    #[test]
    fn test_encode_content_too_large() {
        let data = vec![b'a'; 8000];
        let err = encode(&data, None, ECLevel::H, None).unwrap_err();
        assert_eq!(err, QrError::ContentTooLarge);
    }

    #[test]
    fn test_encode_kanji_unimplemented() {
        let err = encode(b"abc", Some(Mode::Kanji), ECLevel::M, None).unwrap_err();
        assert!(matches!(err, QrError::UnimplementedMode("Kanji")));
    }
}
