//! Codeword bit deinterleaving
//!
//! Maps packed codeword bytes onto the bit-frame layout the speech engine
//! expects. AMBE codewords are spread over four sub-frames by a fixed
//! interleaving permutation; IMBE codewords unpack sequentially.
//!
//! The permutation tables encode a protocol-defined bit layout. They are
//! fixed constant data and must never be regenerated computationally.

use crate::types::{
    AmbeFrame, ImbeFrame, AMBE_CODEWORD_BYTES, AMBE_SUBFRAMES, AMBE_SUBFRAME_BITS,
    IMBE_CODEWORD_BYTES, IMBE_FRAME_BITS,
};

/// Sub-frame index for the even bit of each interleave step
static AMBE_EVEN_SUBFRAME: [usize; 36] = [
    0, 1, 0, 1, 0, 1,
    0, 1, 0, 1, 0, 1,
    0, 1, 0, 1, 0, 1,
    0, 1, 0, 1, 0, 2,
    0, 2, 0, 2, 0, 2,
    0, 2, 0, 2, 0, 2,
];

/// Bit position for the even bit of each interleave step
static AMBE_EVEN_POSITION: [usize; 36] = [
    23, 10, 22, 9, 21, 8,
    20, 7, 19, 6, 18, 5,
    17, 4, 16, 3, 15, 2,
    14, 1, 13, 0, 12, 10,
    11, 9, 10, 8, 9, 7,
    8, 6, 7, 5, 6, 4,
];

/// Sub-frame index for the odd bit of each interleave step
static AMBE_ODD_SUBFRAME: [usize; 36] = [
    0, 2, 0, 2, 0, 2,
    0, 2, 0, 3, 0, 3,
    1, 3, 1, 3, 1, 3,
    1, 3, 1, 3, 1, 3,
    1, 3, 1, 3, 1, 3,
    1, 3, 1, 3, 1, 3,
];

/// Bit position for the odd bit of each interleave step
static AMBE_ODD_POSITION: [usize; 36] = [
    5, 3, 4, 2, 3, 1,
    2, 0, 1, 13, 0, 12,
    22, 11, 21, 10, 20, 9,
    19, 8, 18, 7, 17, 6,
    16, 5, 15, 4, 14, 3,
    13, 2, 12, 1, 11, 0,
];

/// Deinterleave a 72-bit AMBE codeword into its 4x24 bit-frame
///
/// Walks the codeword one byte at a time, consuming two bits per table step
/// with all four table cursors advancing in lock-step. Cells not covered by
/// the permutation stay zero.
pub fn deinterleave_ambe(codeword: &[u8; AMBE_CODEWORD_BYTES]) -> AmbeFrame {
    let mut frame: AmbeFrame = [[0; AMBE_SUBFRAME_BITS]; AMBE_SUBFRAMES];
    let mut step = 0;

    for &byte in codeword.iter() {
        for j in (0..8).step_by(2) {
            frame[AMBE_ODD_SUBFRAME[step]][AMBE_ODD_POSITION[step]] = (byte >> (7 - (j + 1))) & 1;
            frame[AMBE_EVEN_SUBFRAME[step]][AMBE_EVEN_POSITION[step]] = (byte >> (7 - j)) & 1;
            step += 1;
        }
    }

    frame
}

/// Unpack an 88-bit IMBE codeword into its flat bit-frame
///
/// Bit `k` of the frame is bit `7 - (k % 8)` of codeword byte `k / 8`,
/// MSB-first. No permutation.
pub fn unpack_imbe(codeword: &[u8; IMBE_CODEWORD_BYTES]) -> ImbeFrame {
    let mut frame: ImbeFrame = [0; IMBE_FRAME_BITS];

    for (i, &byte) in codeword.iter().enumerate() {
        for j in 0..8 {
            frame[j + 8 * i] = (byte >> (7 - j)) & 1;
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ambe_tables_exhaustive() {
        // Every interleave step must land on its own bit-frame cell.
        let mut visited = [[0u32; AMBE_SUBFRAME_BITS]; AMBE_SUBFRAMES];

        for step in 0..36 {
            visited[AMBE_EVEN_SUBFRAME[step]][AMBE_EVEN_POSITION[step]] += 1;
            visited[AMBE_ODD_SUBFRAME[step]][AMBE_ODD_POSITION[step]] += 1;
        }

        let mut written = 0;
        for row in visited.iter() {
            for &v in row.iter() {
                assert!(v <= 1, "bit-frame cell written more than once");
                written += v;
            }
        }
        assert_eq!(written, 72);
    }

    #[test]
    fn test_ambe_zero_codeword() {
        let frame = deinterleave_ambe(&[0u8; AMBE_CODEWORD_BYTES]);
        assert!(frame.iter().flatten().all(|&b| b == 0));
    }

    #[test]
    fn test_ambe_all_ones_codeword() {
        let frame = deinterleave_ambe(&[0xFF; AMBE_CODEWORD_BYTES]);
        let ones: u32 = frame.iter().flatten().map(|&b| u32::from(b)).sum();
        assert_eq!(ones, 72);
    }

    #[test]
    fn test_ambe_reference_bits() {
        // MSB of byte 0 is the first even bit: step 0 targets cell (0, 23).
        let frame = deinterleave_ambe(&[0x80, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(frame[0][23], 1);
        let ones: u32 = frame.iter().flatten().map(|&b| u32::from(b)).sum();
        assert_eq!(ones, 1);

        // Bit 1 of byte 0 is the first odd bit: step 0 targets cell (0, 5).
        let frame = deinterleave_ambe(&[0x40, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(frame[0][5], 1);

        // Byte 1 starts at step 4: even bit lands at (0, 21), odd at (0, 3).
        let frame = deinterleave_ambe(&[0, 0xC0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(frame[0][21], 1);
        assert_eq!(frame[0][3], 1);
        let ones: u32 = frame.iter().flatten().map(|&b| u32::from(b)).sum();
        assert_eq!(ones, 2);
    }

    #[test]
    fn test_ambe_deterministic() {
        let codeword = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x55];
        assert_eq!(deinterleave_ambe(&codeword), deinterleave_ambe(&codeword));
    }

    #[test]
    fn test_imbe_reference_bits() {
        let mut codeword = [0u8; IMBE_CODEWORD_BYTES];
        codeword[0] = 0x80;
        codeword[10] = 0x01;

        let frame = unpack_imbe(&codeword);
        assert_eq!(frame[0], 1);
        assert_eq!(frame[87], 1);

        let ones: u32 = frame.iter().map(|&b| u32::from(b)).sum();
        assert_eq!(ones, 2);
    }

    proptest! {
        #[test]
        fn test_imbe_bit_positions(codeword in proptest::array::uniform11(any::<u8>())) {
            let frame = unpack_imbe(&codeword);
            for k in 0..IMBE_FRAME_BITS {
                prop_assert_eq!(frame[k], (codeword[k / 8] >> (7 - (k % 8))) & 1);
            }
        }
    }
}
