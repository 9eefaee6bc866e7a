// Author: Lukas Bower
// Purpose: Provide a fuzz entry point for telemetry header decoding.

//! Fuzz-corpus harness for header decoding.
//!
//! Feed arbitrary bytes through every decode path. Decoding must either
//! produce a header or report a [`crate::CodecError`]; it must never panic.

use crate::header::IntHeader;
use crate::types::{IntConfig, IntMode, PowerWidth};
use crate::wire::SliceReader;

/// Exercise the decoder on one corpus input under every mode.
pub fn fuzz_decode(bytes: &[u8]) {
    let modes = [
        IntMode::Disabled,
        IntMode::Normal,
        IntMode::Timestamp,
        IntMode::CompressedPower,
        IntMode::PortTrace,
    ];
    for mode in modes {
        let config = IntConfig::new(mode);
        let _ = IntHeader::decode(&config, &mut SliceReader::new(bytes));
    }
    let narrow = IntConfig::new(IntMode::CompressedPower).with_power_width(PowerWidth::U8);
    let _ = IntHeader::decode(&narrow, &mut SliceReader::new(bytes));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_short_inputs_are_handled() {
        fuzz_decode(&[]);
        fuzz_decode(&[0x00]);
        fuzz_decode(&[0xff; 41]);
        fuzz_decode(&[0xa5; 42]);
    }
}
