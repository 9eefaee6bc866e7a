// Author: Lukas Bower
// Purpose: Define telemetry modes, shared configuration, and codec errors.

//! Configuration and error types shared across the INT header codec.

/// Line-rate table shipped with the codec, mapping a 3-bit code to bits/sec.
///
/// Codes 0-4 cover 25/50/100/200/400 Gbps links; codes 5-7 are reserved and
/// decode to 0.
pub const DEFAULT_LINE_RATES: [u64; 8] = [
    25_000_000_000,
    50_000_000_000,
    100_000_000_000,
    200_000_000_000,
    400_000_000_000,
    0,
    0,
    0,
];

/// Wire encoding selected for every telemetry header on a simulated link.
///
/// The mode is never transmitted; both endpoints of a link must agree on it
/// out of band by constructing headers from the same [`IntConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntMode {
    /// Telemetry disabled; headers occupy zero bytes on the wire.
    Disabled,
    /// Per-hop quantized samples in a fixed-capacity ring.
    Normal,
    /// A single 64-bit transmit timestamp.
    Timestamp,
    /// A compressed one- or two-byte congestion power value.
    CompressedPower,
    /// Per-hop forwarding-port identifiers in a fixed-capacity ring.
    PortTrace,
}

/// Width of the power field carried in [`IntMode::CompressedPower`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PowerWidth {
    /// One byte on the wire; stored values are masked to 8 bits.
    U8 = 1,
    /// Two bytes on the wire.
    U16 = 2,
}

impl PowerWidth {
    /// Number of bytes the power field occupies on the wire.
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

/// Telemetry configuration fixed at simulation setup.
///
/// One value is built when the simulation is configured and passed by
/// reference into header construction and every codec call; the codec never
/// consults global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntConfig {
    mode: IntMode,
    power_width: PowerWidth,
    multiplier: u32,
    line_rates: [u64; 8],
}

impl IntConfig {
    /// Build a configuration for `mode` with multiplier 1, a two-byte power
    /// field, and the default line-rate table.
    #[must_use]
    pub fn new(mode: IntMode) -> Self {
        Self {
            mode,
            power_width: PowerWidth::U16,
            multiplier: 1,
            line_rates: DEFAULT_LINE_RATES,
        }
    }

    /// Replace the quantization multiplier. Zero is treated as 1.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier.max(1);
        self
    }

    /// Replace the power-field width used in `CompressedPower` mode.
    #[must_use]
    pub fn with_power_width(mut self, width: PowerWidth) -> Self {
        self.power_width = width;
        self
    }

    /// Replace the line-rate table.
    #[must_use]
    pub fn with_line_rates(mut self, table: [u64; 8]) -> Self {
        self.line_rates = table;
        self
    }

    /// Active encoding mode.
    #[must_use]
    pub fn mode(&self) -> IntMode {
        self.mode
    }

    /// Configured power-field width.
    #[must_use]
    pub fn power_width(&self) -> PowerWidth {
        self.power_width
    }

    /// Configured quantization multiplier (always at least 1).
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// The 8-entry line-rate table.
    #[must_use]
    pub fn line_rates(&self) -> &[u64; 8] {
        &self.line_rates
    }

    /// Look up the line rate for a 3-bit code, in bits/sec.
    ///
    /// Out-of-range codes return 0; the lookup never fails.
    #[must_use]
    pub fn rate_of(&self, code: u8) -> u64 {
        self.line_rates.get(usize::from(code)).copied().unwrap_or(0)
    }

    /// Map a line rate in bits/sec to its 3-bit code by exact match.
    ///
    /// Only rates present in the table have a code; reserved zero entries
    /// never match, so 0 always maps to `None`.
    #[must_use]
    pub fn rate_code(&self, rate: u64) -> Option<u8> {
        if rate == 0 {
            return None;
        }
        self.line_rates
            .iter()
            .position(|&entry| entry == rate)
            .map(|index| index as u8)
    }
}

impl Default for IntConfig {
    fn default() -> Self {
        Self::new(IntMode::Disabled)
    }
}

/// Failures surfaced by the INT header codec.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// Line rate absent from the configured table at encode time.
    #[error("unknown line rate {rate} b/s")]
    UnknownRate {
        /// The rate value that had no 3-bit code.
        rate: u64,
    },
    /// Header payload was built under a different mode than the
    /// configuration supplied to the codec call.
    #[error("mode mismatch: header built for {header:?}, config selects {config:?}")]
    ModeMismatch {
        /// Mode the header was constructed with.
        header: IntMode,
        /// Mode selected by the supplied configuration.
        config: IntMode,
    },
    /// Reader ran out of bytes mid-field.
    #[error("truncated buffer: need {need} more bytes, have {have}")]
    Truncated {
        /// Bytes required by the current read.
        need: usize,
        /// Bytes remaining in the buffer.
        have: usize,
    },
    /// Bounded writer ran out of capacity mid-field.
    #[error("buffer overflow: need {need} more bytes, have {have}")]
    Overflow {
        /// Bytes required by the current write.
        need: usize,
        /// Capacity remaining in the buffer.
        have: usize,
    },
}
