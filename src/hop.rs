// Author: Lukas Bower
// Purpose: Pack and unpack one hop's quantized telemetry sample.

//! Hop-record codec: one 64-bit slot per traversed switch.

use crate::types::{CodecError, IntConfig};

/// Bits used for the hop timestamp field.
pub const TIME_WIDTH: u32 = 24;
/// Bits used for the quantized byte-counter field.
pub const BYTES_WIDTH: u32 = 20;
/// Bits used for the quantized queue-length field.
pub const QLEN_WIDTH: u32 = 17;
/// Bits used for the line-rate code field.
pub const RATE_WIDTH: u32 = 3;

/// Quantization unit for the byte counter, in bytes.
pub const BYTE_UNIT: u64 = 128;
/// Quantization unit for the queue length, in bytes.
pub const QLEN_UNIT: u64 = 80;

const RATE_MASK: u64 = (1 << RATE_WIDTH) - 1;
const TIME_SHIFT: u32 = RATE_WIDTH;
const TIME_MASK: u64 = (1 << TIME_WIDTH) - 1;
const BYTES_SHIFT: u32 = RATE_WIDTH + TIME_WIDTH;
const BYTES_MASK: u64 = (1 << BYTES_WIDTH) - 1;
const QLEN_SHIFT: u32 = RATE_WIDTH + TIME_WIDTH + BYTES_WIDTH;
const QLEN_MASK: u64 = (1 << QLEN_WIDTH) - 1;

/// One switch hop's measurements, as handed to the header.
///
/// `Normal` mode consumes everything except `port`; `PortTrace` mode
/// consumes only `port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HopSample {
    /// Switch-local timestamp; stored unscaled, truncated to 24 bits.
    pub time: u64,
    /// Cumulative bytes transmitted on the egress port.
    pub tx_bytes: u64,
    /// Egress queue occupancy in bytes.
    pub queue_len: u64,
    /// Egress link speed in bits/sec; must appear in the line-rate table.
    pub line_rate: u64,
    /// Egress port identifier.
    pub port: u64,
}

/// One hop record, bit-packed into 64 bits with no padding.
///
/// The enclosing header's mode fixes the interpretation of the bits: a
/// quantized sample (`Normal`) or a verbatim forwarding port (`PortTrace`).
/// Sample layout from the least significant bit upward: rate code (3),
/// time (24), bytes (20), queue length (17).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntHop(u64);

impl IntHop {
    /// Quantize and pack a sample, mapping its line rate to a 3-bit code.
    ///
    /// Byte and queue counters floor-divide by their unit times the
    /// configured multiplier; the timestamp is truncated, not scaled. A
    /// rate absent from the table is reported as
    /// [`CodecError::UnknownRate`].
    pub fn from_sample(config: &IntConfig, sample: &HopSample) -> Result<Self, CodecError> {
        let code = match config.rate_code(sample.line_rate) {
            Some(code) => code,
            None => {
                log::warn!("unknown line rate {} b/s, hop not recorded", sample.line_rate);
                return Err(CodecError::UnknownRate {
                    rate: sample.line_rate,
                });
            }
        };
        let scale = u64::from(config.multiplier());
        let quantized_bytes = sample.tx_bytes / (BYTE_UNIT * scale);
        let quantized_qlen = sample.queue_len / (QLEN_UNIT * scale);
        let raw = (u64::from(code) & RATE_MASK)
            | ((sample.time & TIME_MASK) << TIME_SHIFT)
            | ((quantized_bytes & BYTES_MASK) << BYTES_SHIFT)
            | ((quantized_qlen & QLEN_MASK) << QLEN_SHIFT);
        Ok(Self(raw))
    }

    /// Store a forwarding-port identifier verbatim.
    #[must_use]
    pub fn from_port(port: u64) -> Self {
        Self(port)
    }

    /// Rebuild a record from its raw 64-bit wire value.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit value as it travels on the wire.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Hop timestamp, unscaled and truncated to 24 bits.
    #[must_use]
    pub fn time(self) -> u64 {
        (self.0 >> TIME_SHIFT) & TIME_MASK
    }

    /// Quantized byte counter (20 bits).
    #[must_use]
    pub fn quantized_bytes(self) -> u64 {
        (self.0 >> BYTES_SHIFT) & BYTES_MASK
    }

    /// Quantized queue length (17 bits).
    #[must_use]
    pub fn quantized_qlen(self) -> u64 {
        (self.0 >> QLEN_SHIFT) & QLEN_MASK
    }

    /// The 3-bit line-rate code.
    #[must_use]
    pub fn rate_code(self) -> u8 {
        (self.0 & RATE_MASK) as u8
    }

    /// Forwarding-port identifier (`PortTrace` interpretation).
    #[must_use]
    pub fn port(self) -> u64 {
        self.0
    }

    /// Byte counter scaled back to bytes.
    #[must_use]
    pub fn tx_bytes(self, config: &IntConfig) -> u64 {
        self.quantized_bytes() * BYTE_UNIT * u64::from(config.multiplier())
    }

    /// Queue length scaled back to bytes.
    #[must_use]
    pub fn queue_len(self, config: &IntConfig) -> u64 {
        self.quantized_qlen() * QLEN_UNIT * u64::from(config.multiplier())
    }

    /// Egress link speed in bits/sec, via the configured table.
    #[must_use]
    pub fn line_rate(self, config: &IntConfig) -> u64 {
        config.rate_of(self.rate_code())
    }

    /// Bytes transmitted between `earlier` and this record.
    ///
    /// The quantized counter wraps modulo 2^20. Precondition, not checked:
    /// the true counter advanced by less than one full wrap between the two
    /// samples, otherwise the result aliases.
    #[must_use]
    pub fn bytes_delta(self, earlier: IntHop, config: &IntConfig) -> u64 {
        let unit = BYTE_UNIT * u64::from(config.multiplier());
        let newer = self.quantized_bytes();
        let older = earlier.quantized_bytes();
        if newer >= older {
            (newer - older) * unit
        } else {
            (newer + (1 << BYTES_WIDTH) - older) * unit
        }
    }

    /// Time elapsed between `earlier` and this record, in timestamp units.
    ///
    /// The 24-bit timestamp wraps; the same less-than-one-wrap precondition
    /// as [`IntHop::bytes_delta`] applies.
    #[must_use]
    pub fn time_delta(self, earlier: IntHop) -> u64 {
        let newer = self.time();
        let older = earlier.time();
        if newer >= older {
            newer - older
        } else {
            newer + (1 << TIME_WIDTH) - older
        }
    }
}

impl From<u64> for IntHop {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}
