mod qr;

pub use qr::Module;
pub(crate) use qr::QR;

use crate::common::bitstream::BitStream;
use crate::common::codec::{encode, Mode};
use crate::common::ec::{blockify, interleave};
use crate::common::error::{QrError, QrResult};
use crate::common::mask::{apply_best_mask, MaskPattern};
use crate::common::metadata::{ECLevel, Version};

/// Builds a QR Code symbol from raw content, one fluent setter per knob:
/// encoding mode, error correction level, version, and mask pattern. Anything
/// left unset is chosen automatically, the way a minimal call site expects.
#[derive(Debug)]
pub struct QrBuilder<'a> {
    data: &'a [u8],
    mode: Option<Mode>,
    ver: Option<Version>,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QrBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, mode: None, ver: None, ecl: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn unset_mode(&mut self) -> &mut Self {
        self.mode = None;
        self
    }

    pub fn version(&mut self, ver: Version) -> &mut Self {
        self.ver = Some(ver);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.ver = None;
        self
    }

    pub fn ec_level(&mut self, ecl: ECLevel) -> &mut Self {
        self.ecl = ecl;
        self
    }

    /// Sets the error correction level from one of its accepted aliases:
    /// a case-insensitive `L`/`M`/`Q`/`H` code, a recovery percentage
    /// (`7`/`15`/`25`/`30`), or a percentage string (`"7%"`..`"30%"`).
    pub fn try_ec_level(&mut self, value: &str) -> QrResult<&mut Self> {
        self.ecl = ECLevel::parse(value)?;
        Ok(self)
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.ver {
            Some(v) => format!("{{ Version: {:?}, Ec level: {:?} }}", *v, self.ecl),
            None => format!("{{ Version: None, Ec level: {:?} }}", self.ecl),
        }
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QrBuilder;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let ver = Version(1);
        let ecl = ECLevel::L;
        let mut qr_bldr = QrBuilder::new(data);
        qr_bldr.version(ver).ec_level(ecl);
        assert_eq!(qr_bldr.metadata(), "{ Version: 1, Ec level: L }");
        qr_bldr.unset_version();
        assert_eq!(qr_bldr.metadata(), "{ Version: None, Ec level: L }");
    }

    #[test]
    fn test_try_ec_level_accepts_aliases() {
        let data = "Hello, world!".as_bytes();
        let mut qr_bldr = QrBuilder::new(data);
        qr_bldr.try_ec_level("30%").unwrap();
        assert_eq!(qr_bldr.metadata(), "{ Version: None, Ec level: H }");
    }

    #[test]
    fn test_try_ec_level_rejects_unknown_alias() {
        let data = "Hello, world!".as_bytes();
        let mut qr_bldr = QrBuilder::new(data);
        let err = qr_bldr.try_ec_level("X").unwrap_err();
        assert!(matches!(err, crate::common::error::QrError::InvalidErrorLevel(_)));
    }
}

impl QrBuilder<'_> {
    pub fn build(&mut self) -> QrResult<QR> {
        log_progress(|| format!("\nConstructing QR {}...", self.metadata()));
        if self.data.is_empty() {
            return Err(QrError::EmptyData);
        }

        log_progress(|| "Encoding data...".to_string());
        let (payload, ver, mode) = encode(self.data, self.mode, self.ecl, self.ver)?;

        let data_len = self.data.len();
        let data_cap = ver.data_capacity(self.ecl);
        let ec_cap = crate::common::ec::error_correction_capacity(ver, self.ecl);

        log_progress(|| "Constructing payload with ecc & interleaving...".to_string());
        let blocks = blockify(payload.data(), ver, self.ecl);
        let interleaved = interleave(&blocks);

        let mut pld = BitStream::new(interleaved.len() * 8);
        interleaved.iter().for_each(|&b| pld.push_byte(b));

        log_progress(|| "Constructing QR...".to_string());
        let mut qr = QR::new(ver, self.ecl, mode);

        log_progress(|| "Drawing functional patterns...".to_string());
        qr.draw_all_function_patterns();

        log_progress(|| "Drawing encoding region...".to_string());
        qr.draw_encoding_region(pld);

        let mask = match self.mask {
            Some(m) => {
                log_progress(|| format!("Apply mask {m:?}..."));
                qr.apply_mask(m);
                m
            }
            None => {
                log_progress(|| "Finding & applying best mask...".to_string());
                apply_best_mask(&mut qr)
            }
        };
        self.mask(mask);

        let tot_mods = ver.width() * ver.width();
        let dark_mods = qr.count_dark_modules();
        let lt_mods = tot_mods - dark_mods;

        log_progress(|| "QR generated successfully!".to_string());
        log_progress(|| format!("{}", qr.metadata()));
        log_progress(|| format!("Data capacity: {data_cap}, Error capacity: {ec_cap}"));
        log_progress(|| {
            format!("Data size: {data_len}, Encoded size: {}", payload.data().len())
        });
        log_progress(|| {
            format!(
                "Dark cells: {dark_mods}, Light cells: {lt_mods}, Balance: {}%",
                dark_mods * 100 / tot_mods
            )
        });

        Ok(qr)
    }
}

/// Build progress is only interesting while developing against this crate,
/// so it's logged behind `debug_assertions` rather than printed unconditionally.
#[inline]
fn log_progress(msg: impl FnOnce() -> String) {
    if cfg!(debug_assertions) {
        eprintln!("{}", msg());
    }
}
