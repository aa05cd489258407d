//! Integration tests for the capture-to-credential flow.
//!
//! These tests drive the receiver the way edge callbacks do — pushing bits
//! through cloned sinks with realistic inter-bit gaps — and consume frames
//! both by direct polling and through the async listener.

use std::time::Duration;

use wiegand_core::Bit;
use wiegand_decoder::{
    FrameListener, ListenerConfig, ReceiverConfig, WiegandFormat, WiegandReceiver,
};

mod test_data {
    /// 26-bit frame: parity 0, facility 1, card 2, trailing parity 1.
    pub const FACILITY_1_CARD_2: &str = "00000000100000000000000101";

    /// 26-bit frame: facility 170 (0b10101010), card 43605 (0xAA55).
    pub const FACILITY_170_CARD_43605: &str = "01010101010101010010101011";
}

fn bits_of(pattern: &str) -> Vec<Bit> {
    pattern.chars().map(|c| Bit::from(c == '1')).collect()
}

fn fast_receiver() -> WiegandReceiver {
    WiegandReceiver::new(ReceiverConfig {
        capacity: 32,
        frame_timeout: Duration::from_millis(3),
    })
    .unwrap()
}

#[test]
fn test_polled_capture_decodes_standard_26() {
    let receiver = fast_receiver();

    // One sink per data line, as the edge callbacks would hold.
    let data0 = receiver.sink();
    let data1 = receiver.sink();

    for bit in bits_of(test_data::FACILITY_1_CARD_2) {
        match bit {
            Bit::Zero => data0.push(bit),
            Bit::One => data1.push(bit),
        }
        // Inter-bit gap well below the frame timeout.
        std::thread::sleep(Duration::from_micros(200));
    }

    // Mid-transmission the detector reports nothing.
    assert_eq!(receiver.pending_bits(), 0);

    std::thread::sleep(Duration::from_millis(15));
    assert_eq!(receiver.pending_bits(), 26);

    let frame = receiver.read_frame().expect("frame should be complete");
    let fields = WiegandFormat::standard_26().decode(&frame).unwrap();
    assert_eq!(fields.facility, 1);
    assert_eq!(fields.card, 2);
    assert_eq!(
        fields.raw,
        u64::from_str_radix(test_data::FACILITY_1_CARD_2, 2).unwrap()
    );

    // The drain was one-shot.
    assert!(receiver.read_frame().is_none());
}

#[tokio::test]
async fn test_listener_capture_decodes_and_flags_noise() {
    let receiver = fast_receiver();
    let sink = receiver.sink();

    let config = ListenerConfig {
        poll_interval: Duration::from_millis(1),
    };
    let mut handle = FrameListener::new(receiver, config).start();
    let format = WiegandFormat::standard_26();

    // A valid credential, then a noise burst shorter than a credential.
    for bit in bits_of(test_data::FACILITY_1_CARD_2) {
        sink.push(bit);
    }

    let frame = tokio::time::timeout(Duration::from_secs(1), handle.recv())
        .await
        .expect("frame should arrive")
        .expect("channel should be open");
    assert_eq!(format.decode(&frame).unwrap().facility, 1);

    for bit in bits_of("101") {
        sink.push(bit);
    }

    let noise = tokio::time::timeout(Duration::from_secs(1), handle.recv())
        .await
        .expect("noise frame should arrive")
        .expect("channel should be open");
    assert_eq!(noise.bit_count(), 3);
    assert!(format.decode(&noise).is_err());

    // The lossy path still yields a raw value for diagnostics.
    assert_eq!(format.decode_lossy(&noise).raw, 0b101);

    handle.shutdown().await.unwrap();
}

#[test]
fn test_back_to_back_transmissions_stay_separate() {
    let receiver = fast_receiver();
    let sink = receiver.sink();

    for bit in bits_of(test_data::FACILITY_1_CARD_2) {
        sink.push(bit);
    }
    std::thread::sleep(Duration::from_millis(15));
    let first = receiver.read_frame().unwrap();

    for bit in bits_of(test_data::FACILITY_170_CARD_43605) {
        sink.push(bit);
    }
    std::thread::sleep(Duration::from_millis(15));
    let second = receiver.read_frame().unwrap();

    assert_eq!(first.to_bit_string(), test_data::FACILITY_1_CARD_2);
    assert_eq!(
        second.to_bit_string(),
        test_data::FACILITY_170_CARD_43605
    );

    let format = WiegandFormat::standard_26();
    let fields = format.decode(&second).unwrap();
    assert_eq!(fields.facility, 170);
    assert_eq!(fields.card, 43605);
}
