use super::gf::{generator_poly, EXP_TABLE, LOG_TABLE};
use crate::common::metadata::{ECLevel, Version};

// Block
//------------------------------------------------------------------------------

/// One data block plus the Reed-Solomon error-correction codewords computed
/// over it. A symbol's payload is split into one or two such groups of
/// blocks per table 4.7.3 of ISO/IEC 18004; blocks in the second group carry
/// one more data codeword than the first.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    data: Vec<u8>,
    ecc: Vec<u8>,
}

impl Block {
    pub fn new(data: &[u8], ecc_len: usize) -> Self {
        let ecc = ecc_per_block(data, ecc_len);
        Self { data: data.to_vec(), ecc }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn ecc(&self) -> &[u8] {
        &self.ecc
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn ecc_len(&self) -> usize {
        self.ecc.len()
    }
}

/// Splits `data` into blocks per the symbol's block structure and attaches
/// the error-correction codewords for each block.
pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<Block> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);
    let ecc_len = version.ecc_per_block(ec_level);

    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;
    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut blocks = Vec::with_capacity(block1_count + block2_count);
    blocks.extend(data[..total_block1_size].chunks(block1_size).map(|c| Block::new(c, ecc_len)));
    if block2_size > 0 {
        blocks.extend(data[total_block1_size..].chunks(block2_size).map(|c| Block::new(c, ecc_len)));
    }
    blocks
}

/// Interleaves blocks' data codewords, followed by their error-correction
/// codewords, the order the final bitstream is written into the matrix in
/// (section 8.6 of ISO/IEC 18004: read column-wise across blocks, not block
/// by block).
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let max_data_len = blocks.iter().map(Block::data_len).max().unwrap_or(0);
    let ecc_len = blocks.first().map(Block::ecc_len).unwrap_or(0);
    let total_len = blocks.iter().map(|b| b.data_len() + b.ecc_len()).sum();

    let mut out = Vec::with_capacity(total_len);
    for i in 0..max_data_len {
        for block in blocks {
            if let Some(&byte) = block.data().get(i) {
                out.push(byte);
            }
        }
    }
    for i in 0..ecc_len {
        for block in blocks {
            out.push(block.ecc()[i]);
        }
    }
    out
}

// Polynomial long division
//------------------------------------------------------------------------------

/// Performs polynomial long division of the data codewords (`num`) by the
/// degree-`ecc_count` generator polynomial (`den`) over GF(256); the
/// remainder's coefficients are the error-correction codewords.
fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let len = block.len();
    let gen_poly = generator_poly(ecc_count);

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i] as usize;
        if lead_coeff == 0 {
            continue;
        }

        let log_lead_coeff = LOG_TABLE[lead_coeff] as usize;
        for (u, v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            let mut log_sum = *v as usize + log_lead_coeff;
            debug_assert!(log_sum < 510, "Log sum has crossed 510: {log_sum}");
            if log_sum >= 255 {
                log_sum -= 255;
            }
            *u ^= EXP_TABLE[log_sum];
        }
    }

    res.split_off(len)
}

/// The number of erroneous codewords a symbol of this version and error
/// correction level is guaranteed to recover from (half the total
/// error-correction codewords across all blocks, rounded per the small
/// published exceptions for the smallest symbols).
pub fn error_correction_capacity(version: Version, ec_level: ECLevel) -> usize {
    let p = match (version, ec_level) {
        (Version(1), ECLevel::L) => 3,
        (Version(2), ECLevel::L) | (Version(1), ECLevel::M) => 2,
        (Version(1), _) | (Version(3), ECLevel::L) => 1,
        _ => 0,
    };

    let ec_bytes_per_block = version.ecc_per_block(ec_level);
    let (_, count1, _, count2) = version.data_codewords_per_block(ec_level);
    let ec_bytes = (count1 + count2) * ec_bytes_per_block;

    (ec_bytes - p) / 2
}

#[cfg(test)]
mod block_tests {
    use super::*;

    #[test]
    fn test_poly_mod_1() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_blockify_and_ecc_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17";
        let blocks = blockify(msg, Version(1), ECLevel::M);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].data(), msg);
        assert_eq!(blocks[0].ecc(), expected_ecc);
    }

    #[test]
    fn test_blockify_and_ecc_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27".as_slice(),
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85".as_slice(),
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d".as_slice(),
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec".as_slice(),
        ];
        let blocks = blockify(msg, Version(5), ECLevel::Q);
        assert_eq!(blocks.len(), 4);
        for (block, expected) in blocks.iter().zip(expected_ec.iter()) {
            assert_eq!(block.ecc(), *expected);
        }
    }

    #[test]
    fn test_interleave_orders_columnwise() {
        let b1 = Block::new(&[1, 2], 0);
        let b2 = Block::new(&[3, 4, 5], 0);
        assert_eq!(interleave(&[b1, b2]), vec![1, 3, 2, 4, 5]);
    }
}
