#![allow(
    clippy::items_after_test_module,
    mixed_script_confusables,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

//! Generates QR Code symbols (ISO/IEC 18004) from raw content: mode
//! detection, data encoding, Reed-Solomon error correction, matrix layout,
//! masking, and rendering to PNG, SVG, or text.

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::QrBuilder;
pub use common::codec::Mode;
pub use common::error::{QrError, QrResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Metadata, Version};
pub(crate) use common::*;
pub use render::{render_png, render_svg, render_text};

#[cfg(test)]
pub(crate) use builder::Module;
