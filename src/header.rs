// Author: Lukas Bower
// Purpose: Mode-dispatched serialize/deserialize for the INT packet header.

//! Telemetry header codec: a fixed-size, mode-dependent packet region.

use crate::hop::{HopSample, IntHop};
use crate::types::{CodecError, IntConfig, IntMode, PowerWidth};
use crate::wire::{WireReader, WireWriter};

/// Capacity of the hop ring: the number of records a header can carry.
pub const MAX_HOP: usize = 5;

/// Hop-ring storage shared by the `Normal` and `PortTrace` payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HopRing {
    slots: [IntHop; MAX_HOP],
    nhop: u16,
}

impl HopRing {
    fn store(&mut self, hop: IntHop) {
        self.slots[usize::from(self.nhop) % MAX_HOP] = hop;
        self.nhop = self.nhop.wrapping_add(1);
    }
}

/// Mode-fixed payload storage. Exactly one interpretation is live for the
/// header's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Payload {
    Disabled,
    Samples(HopRing),
    Ports(HopRing),
    Timestamp(u64),
    Power(u16),
}

/// In-band telemetry header embedded in each simulated packet.
///
/// A header is constructed fresh per packet with all slots zeroed; switch
/// hops stamp records via [`IntHeader::push_hop`], the sender serializes it
/// into the packet buffer, and the receiver decodes it with an identically
/// configured [`IntConfig`]. The payload interpretation is fixed at
/// construction, so wrong-mode reads return `None` or an empty slice
/// rather than reinterpreted bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntHeader {
    payload: Payload,
}

impl IntHeader {
    /// Construct an empty header for the configured mode.
    #[must_use]
    pub fn new(config: &IntConfig) -> Self {
        let payload = match config.mode() {
            IntMode::Disabled => Payload::Disabled,
            IntMode::Normal => Payload::Samples(HopRing::default()),
            IntMode::Timestamp => Payload::Timestamp(0),
            IntMode::CompressedPower => Payload::Power(0),
            IntMode::PortTrace => Payload::Ports(HopRing::default()),
        };
        Self { payload }
    }

    /// The mode this header was constructed under.
    #[must_use]
    pub fn mode(&self) -> IntMode {
        match self.payload {
            Payload::Disabled => IntMode::Disabled,
            Payload::Samples(_) => IntMode::Normal,
            Payload::Ports(_) => IntMode::PortTrace,
            Payload::Timestamp(_) => IntMode::Timestamp,
            Payload::Power(_) => IntMode::CompressedPower,
        }
    }

    /// Exact number of bytes `encode` writes and `decode` consumes under
    /// `config`. Depends only on the configuration, never on contents.
    #[must_use]
    pub fn wire_size(config: &IntConfig) -> usize {
        match config.mode() {
            IntMode::Normal | IntMode::PortTrace => MAX_HOP * 8 + 2,
            IntMode::Timestamp => 8,
            IntMode::CompressedPower => config.power_width().bytes(),
            IntMode::Disabled => 0,
        }
    }

    /// Stamp one hop's telemetry into the ring.
    ///
    /// In `Normal` mode the sample is quantized into the slot at
    /// `hop_count % MAX_HOP`; in `PortTrace` mode only the port identifier
    /// is stored. Outside the ring modes this is a silent no-op. The only
    /// failure is an unmapped line rate in `Normal` mode, which leaves the
    /// ring and counter untouched.
    pub fn push_hop(&mut self, config: &IntConfig, sample: &HopSample) -> Result<(), CodecError> {
        match &mut self.payload {
            Payload::Samples(ring) => {
                let hop = IntHop::from_sample(config, sample)?;
                ring.store(hop);
                Ok(())
            }
            Payload::Ports(ring) => {
                ring.store(IntHop::from_port(sample.port));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Hop records in slot order; empty outside `Normal` and `PortTrace`.
    ///
    /// Slot `i` holds the most recent record pushed when
    /// `hop_count % MAX_HOP == i`; pair with [`IntHeader::hop_count`] to
    /// recover push order once the ring has wrapped.
    #[must_use]
    pub fn hops(&self) -> &[IntHop] {
        match &self.payload {
            Payload::Samples(ring) | Payload::Ports(ring) => &ring.slots,
            _ => &[],
        }
    }

    /// Total pushes so far, never clamped to the ring capacity.
    ///
    /// Zero outside the ring modes.
    #[must_use]
    pub fn hop_count(&self) -> u16 {
        match &self.payload {
            Payload::Samples(ring) | Payload::Ports(ring) => ring.nhop,
            _ => 0,
        }
    }

    /// The 64-bit transmit timestamp; `None` outside `Timestamp` mode.
    #[must_use]
    pub fn timestamp(&self) -> Option<u64> {
        match self.payload {
            Payload::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Record the transmit timestamp; no-op outside `Timestamp` mode.
    pub fn set_timestamp(&mut self, value: u64) {
        if let Payload::Timestamp(ts) = &mut self.payload {
            *ts = value;
        }
    }

    /// The congestion power value; `None` outside `CompressedPower` mode.
    #[must_use]
    pub fn power(&self) -> Option<u16> {
        match self.payload {
            Payload::Power(value) => Some(value),
            _ => None,
        }
    }

    /// Store the congestion power value, masked to the configured width.
    ///
    /// No-op outside `CompressedPower` mode.
    pub fn set_power(&mut self, config: &IntConfig, value: u16) {
        if let Payload::Power(power) = &mut self.payload {
            *power = match config.power_width() {
                PowerWidth::U8 => value & 0x00ff,
                PowerWidth::U16 => value,
            };
        }
    }

    /// Serialize the header in the fixed mode-dependent layout, advancing
    /// the writer by exactly [`IntHeader::wire_size`] bytes.
    ///
    /// The mode itself is never written; both endpoints must share the
    /// configuration out of band. Each ring slot goes out as its low 32-bit
    /// word then its high word, followed by the 16-bit hop counter. A
    /// config whose mode disagrees with the one the header was constructed
    /// under is reported as [`CodecError::ModeMismatch`].
    pub fn encode<W: WireWriter>(
        &self,
        config: &IntConfig,
        writer: &mut W,
    ) -> Result<(), CodecError> {
        match (&self.payload, config.mode()) {
            (Payload::Samples(ring), IntMode::Normal)
            | (Payload::Ports(ring), IntMode::PortTrace) => {
                for slot in &ring.slots {
                    writer.write_u32(slot.raw() as u32)?;
                    writer.write_u32((slot.raw() >> 32) as u32)?;
                }
                writer.write_u16(ring.nhop)
            }
            (Payload::Timestamp(ts), IntMode::Timestamp) => writer.write_u64(*ts),
            (Payload::Power(power), IntMode::CompressedPower) => match config.power_width() {
                PowerWidth::U8 => writer.write_u8(*power as u8),
                PowerWidth::U16 => writer.write_u16(*power),
            },
            (Payload::Disabled, IntMode::Disabled) => Ok(()),
            _ => Err(CodecError::ModeMismatch {
                header: self.mode(),
                config: config.mode(),
            }),
        }
    }

    /// Decode a header in the layout selected by `config`, consuming
    /// exactly [`IntHeader::wire_size`] bytes from the reader.
    pub fn decode<R: WireReader>(config: &IntConfig, reader: &mut R) -> Result<Self, CodecError> {
        let payload = match config.mode() {
            IntMode::Disabled => Payload::Disabled,
            IntMode::Normal | IntMode::PortTrace => {
                let mut ring = HopRing::default();
                for slot in &mut ring.slots {
                    let lo = reader.read_u32()?;
                    let hi = reader.read_u32()?;
                    *slot = IntHop::from_raw(u64::from(lo) | (u64::from(hi) << 32));
                }
                ring.nhop = reader.read_u16()?;
                if config.mode() == IntMode::Normal {
                    Payload::Samples(ring)
                } else {
                    Payload::Ports(ring)
                }
            }
            IntMode::Timestamp => Payload::Timestamp(reader.read_u64()?),
            IntMode::CompressedPower => {
                let value = match config.power_width() {
                    PowerWidth::U8 => u16::from(reader.read_u8()?),
                    PowerWidth::U16 => reader.read_u16()?,
                };
                Payload::Power(value)
            }
        };
        Ok(Self { payload })
    }
}
