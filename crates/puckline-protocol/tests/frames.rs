//! Decoding hand-built frames.
//!
//! These frames are laid out byte by byte at the documented offsets
//! rather than produced by the encoder, so they pin the wire format
//! itself and not just encoder/decoder agreement.

use puckline_protocol::{
    BinaryCodec, ClientId, Codec, Command, ProtocolError, STATE_FRAME_LEN,
};

/// Writes `value` little-endian at `offset`.
fn put_u16(frame: &mut [u8], offset: usize, value: u16) {
    frame[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn known_state_frame() -> Vec<u8> {
    let mut frame = vec![0_u8; STATE_FRAME_LEN];
    frame[0] = 0x04;
    frame[1..3].copy_from_slice(&100_i16.to_le_bytes());
    frame[3..5].copy_from_slice(&200_i16.to_le_bytes());
    for n in 0..4 {
        let pad = n * 7;
        put_u16(&mut frame, 5 + pad, 250 * n as u16 + 1);
        put_u16(&mut frame, 7 + pad, 999 - n as u16);
        frame[9 + pad] = 10 + n as u8;
        frame[10 + pad] = 1;
        frame[11 + pad] = n as u8;
    }
    frame
}

#[test]
fn test_decode_known_state_frame() {
    let command = BinaryCodec.decode(&known_state_frame()).unwrap();
    let Command::State(state) = command else {
        panic!("expected State, got {command:?}");
    };

    assert_eq!(state.puck_x, 100);
    assert_eq!(state.puck_y, 200);
    for (n, player) in state.players.iter().enumerate() {
        assert_eq!(player.x, 250 * n as u16 + 1, "player {n} x");
        assert_eq!(player.y, 999 - n as u16, "player {n} y");
        assert_eq!(player.score, 10 + n as u8, "player {n} score");
        assert!(player.is_active(), "player {n} active");
        assert_eq!(player.player_number, n as u8, "player {n} number");
    }
}

#[test]
fn test_known_state_frame_re_encodes_identically() {
    let frame = known_state_frame();
    let command = BinaryCodec.decode(&frame).unwrap();
    assert_eq!(BinaryCodec.encode(&command), frame);
}

#[test]
fn test_decode_negative_puck() {
    let mut frame = known_state_frame();
    frame[1..3].copy_from_slice(&(-50_i16).to_le_bytes());
    frame[3..5].copy_from_slice(&(-1_i16).to_le_bytes());

    let Command::State(state) = BinaryCodec.decode(&frame).unwrap() else {
        panic!("expected State");
    };
    assert_eq!(state.puck_x, -50);
    assert_eq!(state.puck_y, -1);
}

#[test]
fn test_decode_start_frame() {
    assert_eq!(
        BinaryCodec.decode(&[0x03, 0x02]).unwrap(),
        Command::Start { player_number: 2 }
    );
}

#[test]
fn test_decode_register_reply_keeps_id_bytes() {
    let id = b"6ba7b810-9dad-11d1-80b4-00c04fd430c8";
    let mut frame = vec![0x00];
    frame.extend_from_slice(id);

    match BinaryCodec.decode(&frame).unwrap() {
        Command::Register { id: decoded } => {
            assert_eq!(decoded.as_bytes(), id);
            assert_eq!(decoded, ClientId::from_slice(id).unwrap());
        }
        other => panic!("expected Register, got {other:?}"),
    }
}

#[test]
fn test_decode_short_register_reply_is_truncated() {
    let mut frame = vec![0x00];
    frame.extend_from_slice(b"6ba7b810");
    assert_eq!(
        BinaryCodec.decode(&frame),
        Err(ProtocolError::Truncated {
            offset: 1,
            needed: 36,
            len: 9
        })
    );
}

#[test]
fn test_decode_unknown_types_never_panic() {
    for tag in 5..=u8::MAX {
        assert_eq!(
            BinaryCodec.decode(&[tag]),
            Err(ProtocolError::UnknownCommand(tag))
        );
    }
}

#[test]
fn test_historical_six_byte_layout_is_rejected() {
    // 1 + 4 + 6 × 4 bytes: the last player's number byte is missing.
    let frame = &known_state_frame()[..29];
    assert!(matches!(
        BinaryCodec.decode(frame),
        Err(ProtocolError::Truncated { .. })
    ));
}
