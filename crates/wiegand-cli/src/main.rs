//! Console Wiegand credential reader.
//!
//! Attaches the decoder to a pair of data lines and prints every captured
//! credential: bit count, the raw bit pattern grouped by nibble, and the
//! decoded facility/card fields. Pin numbers, buffer capacity, timing and
//! the credential layout are all command-line configuration.
//!
//! Without real hardware, `--demo` replays a synthetic credential on mock
//! lines a few times and exits.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wiegand_core::constants::{
    DEFAULT_CAPACITY_BITS, DEFAULT_FRAME_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
};
use wiegand_core::{Bit, CredentialFrame, DecodedFields};
use wiegand_decoder::{
    FrameListener, ListenerConfig, ReceiverConfig, WiegandFormat, WiegandReceiver,
};
use wiegand_hardware::{AnyEdgeSource, EdgeSource, mock::MockEdgeSource};

/// Synthetic credential replayed in demo mode: facility 1, card 2.
const DEMO_PATTERN: &str = "00000000100000000000000101";

/// Number of synthetic swipes replayed in demo mode.
const DEMO_SWIPES: usize = 3;

#[derive(Debug, Parser)]
#[command(version, about = "Console Wiegand credential reader", long_about = None)]
struct Cli {
    /// BCM pin connected to DATA0.
    #[arg(long, default_value_t = 4)]
    data0_pin: u8,

    /// BCM pin connected to DATA1.
    #[arg(long, default_value_t = 5)]
    data1_pin: u8,

    /// Bit buffer capacity.
    #[arg(long, default_value_t = DEFAULT_CAPACITY_BITS)]
    capacity: usize,

    /// Quiet period marking the end of a frame, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FRAME_TIMEOUT_MS)]
    frame_timeout_ms: u64,

    /// Receiver poll interval, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,

    /// Credential bit layout.
    #[arg(long, value_enum, default_value_t = FormatArg::Standard26)]
    format: FormatArg,

    /// Replay a synthetic credential on mock lines instead of reading GPIO.
    #[arg(long)]
    demo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Standard 26-bit: 8-bit facility, 16-bit card.
    Standard26,

    /// HID 34-bit: 16-bit facility, 16-bit card.
    Hid34,
}

impl FormatArg {
    fn to_format(self) -> WiegandFormat {
        match self {
            Self::Standard26 => WiegandFormat::standard_26(),
            Self::Hid34 => WiegandFormat::hid_34(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let receiver = WiegandReceiver::new(ReceiverConfig {
        capacity: cli.capacity,
        frame_timeout: Duration::from_millis(cli.frame_timeout_ms),
    })?;
    let sink = receiver.sink();

    let (mut source, demo_handle) = if cli.demo {
        let (mock, handle) = MockEdgeSource::new();
        (AnyEdgeSource::Mock(mock), Some(handle))
    } else {
        (hardware_source(&cli)?, None)
    };
    source.start(sink)?;

    if let Some(handle) = demo_handle {
        spawn_demo_reader(handle);
        info!(swipes = DEMO_SWIPES, "demo mode: replaying synthetic swipes");
    } else {
        info!(
            data0 = cli.data0_pin,
            data1 = cli.data1_pin,
            "listening for credentials"
        );
    }

    let format = cli.format.to_format();
    let mut handle = FrameListener::new(
        receiver,
        ListenerConfig {
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
        },
    )
    .start();

    let mut printed = 0usize;
    while let Some(frame) = handle.recv().await {
        print_frame(&format, &frame);
        printed += 1;
        if cli.demo && printed >= DEMO_SWIPES {
            break;
        }
    }

    source.stop()?;
    handle.shutdown().await?;
    Ok(())
}

#[cfg(feature = "hardware-rppal")]
fn hardware_source(cli: &Cli) -> Result<AnyEdgeSource> {
    use wiegand_hardware::gpio::{GpioConfig, RppalEdgeSource};

    let source = RppalEdgeSource::new(GpioConfig {
        data0_pin: cli.data0_pin,
        data1_pin: cli.data1_pin,
    })?;
    Ok(AnyEdgeSource::Rppal(source))
}

#[cfg(not(feature = "hardware-rppal"))]
fn hardware_source(_cli: &Cli) -> Result<AnyEdgeSource> {
    anyhow::bail!(
        "built without GPIO support; rebuild with --features hardware-rppal, or use --demo"
    )
}

/// Replays the demo credential on the mock lines with realistic spacing.
fn spawn_demo_reader(handle: wiegand_hardware::mock::MockEdgeHandle) {
    let bits: Vec<Bit> = DEMO_PATTERN.chars().map(|c| Bit::from(c == '1')).collect();

    std::thread::spawn(move || {
        for _ in 0..DEMO_SWIPES {
            if handle.send_bits(&bits).is_err() {
                break;
            }
            std::thread::sleep(Duration::from_millis(250));
        }
    });
}

fn print_frame(format: &WiegandFormat, frame: &CredentialFrame) {
    println!("\nRead {} bits: {}", frame.bit_count(), grouped_bits(frame));

    match format.decode(frame) {
        Ok(fields) => print_fields(&fields),
        Err(err) => {
            warn!(%err, "frame does not match the configured layout");
            print_fields(&format.decode_lossy(frame));
        }
    }
}

fn print_fields(fields: &DecodedFields) {
    println!("Hex: {:X}", fields.raw);
    println!("Facility: {}", fields.facility);
    println!("Code: {}", fields.card);
}

/// Render the bit pattern with a `|` separator every nibble.
fn grouped_bits(frame: &CredentialFrame) -> String {
    frame
        .bits()
        .chunks(4)
        .map(|chunk| chunk.iter().map(|b| b.to_string()).collect::<String>())
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_arg_mapping() {
        assert_eq!(
            FormatArg::Standard26.to_format(),
            WiegandFormat::standard_26()
        );
        assert_eq!(FormatArg::Hid34.to_format(), WiegandFormat::hid_34());
    }

    #[test]
    fn test_grouped_bits() {
        let bits: Vec<Bit> = "1010110".chars().map(|c| Bit::from(c == '1')).collect();
        let frame = CredentialFrame::new(bits, 7).unwrap();
        assert_eq!(grouped_bits(&frame), "1010|110");
    }

    #[test]
    fn test_demo_pattern_is_valid_standard_26() {
        let bits: Vec<Bit> = DEMO_PATTERN.chars().map(|c| Bit::from(c == '1')).collect();
        let frame = CredentialFrame::new(bits, DEMO_PATTERN.len()).unwrap();

        let fields = WiegandFormat::standard_26().decode(&frame).unwrap();
        assert_eq!(fields.facility, 1);
        assert_eq!(fields.card, 2);
    }
}
