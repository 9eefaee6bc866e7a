// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Validate wire layout and round trips of the telemetry header.
// Author: Lukas Bower
#![forbid(unsafe_code)]

use int_wire::{
    CodecError, HopSample, IntConfig, IntHeader, IntMode, PowerWidth, SliceReader, SliceWriter,
};

fn encode_to_vec(header: &IntHeader, config: &IntConfig) -> Vec<u8> {
    let mut buf = Vec::new();
    header.encode(config, &mut buf).unwrap();
    assert_eq!(buf.len(), IntHeader::wire_size(config));
    buf
}

#[test]
fn normal_mode_golden_bytes() {
    let config = IntConfig::new(IntMode::Normal);
    let mut header = IntHeader::new(&config);
    header
        .push_hop(
            &config,
            &HopSample {
                time: 300,
                tx_bytes: 12_800,
                queue_len: 800,
                line_rate: 50_000_000_000,
                ..Default::default()
            },
        )
        .unwrap();
    header
        .push_hop(
            &config,
            &HopSample {
                time: 500,
                tx_bytes: 25_600,
                queue_len: 1_600,
                line_rate: 100_000_000_000,
                ..Default::default()
            },
        )
        .unwrap();

    // Slot 0 packs to 0x0005_0003_2000_0961, slot 1 to 0x000A_0006_4000_0FA2;
    // each slot leaves as low word then high word, little-endian, with the
    // 16-bit hop counter last.
    let mut expected = vec![
        0x61, 0x09, 0x00, 0x20, 0x03, 0x00, 0x05, 0x00, // slot 0
        0xa2, 0x0f, 0x00, 0x40, 0x06, 0x00, 0x0a, 0x00, // slot 1
    ];
    expected.extend_from_slice(&[0u8; 24]); // slots 2..4 untouched
    expected.extend_from_slice(&[0x02, 0x00]); // nhop
    assert_eq!(encode_to_vec(&header, &config), expected);
}

#[test]
fn timestamp_mode_golden_bytes() {
    let config = IntConfig::new(IntMode::Timestamp);
    let mut header = IntHeader::new(&config);
    header.set_timestamp(0x1122_3344_5566_7788);
    assert_eq!(
        encode_to_vec(&header, &config),
        [0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]
    );
}

#[test]
fn power_mode_golden_bytes() {
    let wide = IntConfig::new(IntMode::CompressedPower);
    let mut header = IntHeader::new(&wide);
    header.set_power(&wide, 0xbeef);
    assert_eq!(encode_to_vec(&header, &wide), [0xef, 0xbe]);

    let narrow = IntConfig::new(IntMode::CompressedPower).with_power_width(PowerWidth::U8);
    let mut header = IntHeader::new(&narrow);
    header.set_power(&narrow, 0x0134);
    assert_eq!(encode_to_vec(&header, &narrow), [0x34]);
}

#[test]
fn disabled_mode_writes_nothing() {
    let config = IntConfig::new(IntMode::Disabled);
    let header = IntHeader::new(&config);
    assert!(encode_to_vec(&header, &config).is_empty());

    let decoded = IntHeader::decode(&config, &mut SliceReader::new(&[])).unwrap();
    assert_eq!(decoded, header);
}

#[test]
fn every_mode_round_trips() {
    let normal = IntConfig::new(IntMode::Normal).with_multiplier(2);
    let mut header = IntHeader::new(&normal);
    for push in 0..9u64 {
        header
            .push_hop(
                &normal,
                &HopSample {
                    time: 1_000 + push * 37,
                    tx_bytes: push * 4_096,
                    queue_len: push * 160,
                    line_rate: 200_000_000_000,
                    ..Default::default()
                },
            )
            .unwrap();
    }
    let buf = encode_to_vec(&header, &normal);
    let decoded = IntHeader::decode(&normal, &mut SliceReader::new(&buf)).unwrap();
    assert_eq!(decoded, header);
    assert_eq!(decoded.hop_count(), 9);

    let ports = IntConfig::new(IntMode::PortTrace);
    let mut header = IntHeader::new(&ports);
    for port in [3u64, 9, 12] {
        header
            .push_hop(
                &ports,
                &HopSample {
                    port,
                    ..Default::default()
                },
            )
            .unwrap();
    }
    let buf = encode_to_vec(&header, &ports);
    let decoded = IntHeader::decode(&ports, &mut SliceReader::new(&buf)).unwrap();
    assert_eq!(decoded, header);
    assert_eq!(decoded.hops()[2].port(), 12);

    let stamp = IntConfig::new(IntMode::Timestamp);
    let mut header = IntHeader::new(&stamp);
    header.set_timestamp(u64::MAX - 17);
    let buf = encode_to_vec(&header, &stamp);
    let decoded = IntHeader::decode(&stamp, &mut SliceReader::new(&buf)).unwrap();
    assert_eq!(decoded.timestamp(), Some(u64::MAX - 17));

    let narrow = IntConfig::new(IntMode::CompressedPower).with_power_width(PowerWidth::U8);
    let mut header = IntHeader::new(&narrow);
    header.set_power(&narrow, 0x00ab);
    let buf = encode_to_vec(&header, &narrow);
    let decoded = IntHeader::decode(&narrow, &mut SliceReader::new(&buf)).unwrap();
    assert_eq!(decoded.power(), Some(0x00ab));
}

#[test]
fn slice_writer_fits_exact_wire_size() {
    let config = IntConfig::new(IntMode::Normal);
    let mut header = IntHeader::new(&config);
    header
        .push_hop(
            &config,
            &HopSample {
                time: 11,
                tx_bytes: 640,
                queue_len: 240,
                line_rate: 25_000_000_000,
                ..Default::default()
            },
        )
        .unwrap();

    let mut region = [0u8; 42];
    let mut writer = SliceWriter::new(&mut region);
    header.encode(&config, &mut writer).unwrap();
    assert_eq!(writer.written(), 42);
    assert_eq!(region.to_vec(), encode_to_vec(&header, &config));

    let mut short = [0u8; 41];
    let mut writer = SliceWriter::new(&mut short);
    assert_eq!(
        header.encode(&config, &mut writer),
        Err(CodecError::Overflow { need: 2, have: 1 })
    );
}

#[test]
fn truncated_buffers_are_rejected() {
    let config = IntConfig::new(IntMode::Normal);
    assert_eq!(
        IntHeader::decode(&config, &mut SliceReader::new(&[0u8; 41])),
        Err(CodecError::Truncated { need: 2, have: 1 })
    );

    let stamp = IntConfig::new(IntMode::Timestamp);
    assert_eq!(
        IntHeader::decode(&stamp, &mut SliceReader::new(&[0u8; 7])),
        Err(CodecError::Truncated { need: 8, have: 7 })
    );

    let power = IntConfig::new(IntMode::CompressedPower);
    assert_eq!(
        IntHeader::decode(&power, &mut SliceReader::new(&[])),
        Err(CodecError::Truncated { need: 2, have: 0 })
    );
}

#[test]
fn decode_consumes_exactly_wire_size() {
    let config = IntConfig::new(IntMode::Timestamp);
    let mut header = IntHeader::new(&config);
    header.set_timestamp(42);

    let mut buf = encode_to_vec(&header, &config);
    buf.extend_from_slice(&[0xde, 0xad]); // trailing payload belongs to the packet
    let mut reader = SliceReader::new(&buf);
    let decoded = IntHeader::decode(&config, &mut reader).unwrap();
    assert_eq!(decoded.timestamp(), Some(42));
    assert_eq!(reader.consumed(), IntHeader::wire_size(&config));
    assert_eq!(reader.remaining(), 2);
}

#[test]
fn hop_counter_wraps_at_u16_max() {
    let config = IntConfig::new(IntMode::PortTrace);
    let mut header = IntHeader::new(&config);
    let sample = HopSample {
        port: 1,
        ..Default::default()
    };
    for _ in 0..u16::MAX {
        header.push_hop(&config, &sample).unwrap();
    }
    assert_eq!(header.hop_count(), u16::MAX);
    header.push_hop(&config, &sample).unwrap();
    assert_eq!(header.hop_count(), 0);
}

#[test]
fn receiver_recovers_deltas_across_packets() {
    // Two packets through the same switch; the receiver differences the
    // per-hop records to recover throughput and elapsed time.
    let config = IntConfig::new(IntMode::Normal);

    let mut first = IntHeader::new(&config);
    first
        .push_hop(
            &config,
            &HopSample {
                time: 1_000,
                tx_bytes: 100 * 128,
                queue_len: 0,
                line_rate: 100_000_000_000,
                ..Default::default()
            },
        )
        .unwrap();

    let mut second = IntHeader::new(&config);
    second
        .push_hop(
            &config,
            &HopSample {
                time: 1_250,
                tx_bytes: 260 * 128,
                queue_len: 0,
                line_rate: 100_000_000_000,
                ..Default::default()
            },
        )
        .unwrap();

    let first_buf = encode_to_vec(&first, &config);
    let second_buf = encode_to_vec(&second, &config);
    let earlier = IntHeader::decode(&config, &mut SliceReader::new(&first_buf)).unwrap();
    let later = IntHeader::decode(&config, &mut SliceReader::new(&second_buf)).unwrap();

    let hop_then = earlier.hops()[0];
    let hop_now = later.hops()[0];
    assert_eq!(hop_now.bytes_delta(hop_then, &config), 160 * 128);
    assert_eq!(hop_now.time_delta(hop_then), 250);
    assert_eq!(hop_now.line_rate(&config), 100_000_000_000);
}
