// Author: Lukas Bower
// Purpose: In-band telemetry header codec for packet-level simulators.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! In-band network telemetry (INT) header codec for packet-level
//! congestion-control simulation.
//!
//! Each simulated switch hop stamps quantized telemetry, or a forwarding
//! port identifier, into a fixed bit-packed region of the packet. The wire
//! layout is selected by an [`IntMode`] and is not self-describing: both
//! ends of a link must build their headers and codec calls from the same
//! [`IntConfig`].
//!
//! A sender-side round trip looks like:
//!
//! ```
//! use int_wire::{HopSample, IntConfig, IntHeader, IntMode, SliceReader};
//!
//! let config = IntConfig::new(IntMode::Normal);
//! let mut header = IntHeader::new(&config);
//! header.push_hop(&config, &HopSample {
//!     time: 3_000,
//!     tx_bytes: 1 << 16,
//!     queue_len: 8_000,
//!     line_rate: 100_000_000_000,
//!     ..Default::default()
//! })?;
//!
//! let mut packet = Vec::new();
//! header.encode(&config, &mut packet)?;
//! assert_eq!(packet.len(), IntHeader::wire_size(&config));
//!
//! let decoded = IntHeader::decode(&config, &mut SliceReader::new(&packet))?;
//! assert_eq!(decoded, header);
//! # Ok::<(), int_wire::CodecError>(())
//! ```

mod header;
mod hop;
mod types;
mod wire;

pub mod fuzz;

pub use header::{IntHeader, MAX_HOP};
pub use hop::{
    HopSample, IntHop, BYTES_WIDTH, BYTE_UNIT, QLEN_UNIT, QLEN_WIDTH, RATE_WIDTH, TIME_WIDTH,
};
pub use types::{CodecError, IntConfig, IntMode, PowerWidth, DEFAULT_LINE_RATES};
pub use wire::{SliceReader, SliceWriter, WireReader, WireWriter};
