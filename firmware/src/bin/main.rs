#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use keywheel_fw::{
    configure_usb_hid, encoder_task, ControlPipeline, EmbassyClock, GpioMatrix, OperatingMode,
    RotationCounter, SurfaceConfig, UsbReportSink,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Which HID profile this build reports as. Fixed for the whole run.
const CONTROL_MODE: OperatingMode = OperatingMode::Keyboard;

/// Rotation counter shared between the encoder task (masked writer) and the
/// pipeline (atomic reader).
static ROTATION: RotationCounter = RotationCounter::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    info!("keywheel starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let config = SurfaceConfig::reference(CONTROL_MODE);

    // --- Matrix lines: rows strobed low, columns pulled up ---
    let rows = [
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
    ];
    let cols = [
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
    ];
    let matrix = GpioMatrix::new(rows, cols);

    // --- Encoder phases ---
    let phase_a = Input::new(p.PIN_0, Pull::Up);
    let phase_b = Input::new(p.PIN_1, Pull::Up);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Keywheel");
    usb_config.product = Some(match CONTROL_MODE {
        OperatingMode::Keyboard => "Keywheel Keyboard",
        OperatingMode::Gamepad => "Keywheel Gamepad",
    });
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure the HID class for the active profile
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state, CONTROL_MODE);

    // Build the USB device
    let usb_device = builder.build();

    spawner.spawn(usb_task(usb_device)).unwrap();

    // The original hardware only wires the encoder into the gamepad
    // profile; the keyboard profile never reads the counter.
    if CONTROL_MODE == OperatingMode::Gamepad {
        spawner
            .spawn(encoder_task(phase_a, phase_b, &ROTATION))
            .unwrap();
    }

    // Wait for enumeration before the first flush
    let mut sink = UsbReportSink::new(hid_writer);
    sink.wait_ready().await;
    info!("USB HID ready, scanning...");

    match ControlPipeline::new(&config, matrix, &ROTATION, sink, EmbassyClock) {
        Ok(mut pipeline) => pipeline.run().await,
        Err(e) => {
            // A config that fails validation must never reach the scan loop.
            error!("invalid configuration: {:?}", e);
            loop {
                cortex_m::asm::wfe();
            }
        }
    }
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}
