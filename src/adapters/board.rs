//! ESP32 board adapter — bridges real peripherals to the port traits.
//!
//! Owns every peripheral driver and exposes them through the `app::ports`
//! traits. This is the only module in the system that touches actual
//! hardware; everything above it is host-testable.
//!
//! Wiring beyond the ports:
//! - a detached thread drains the UART receiver into the static
//!   [`LineAssembler`] and signals [`Event::LineReady`],
//! - two esp_timer periodic timers push [`Event::SecondTick`] and
//!   [`Event::ControlTick`] into the lock-free queue.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::{BLOCK, Delay, FreeRtos};
use esp_idf_hal::gpio::{
    AnyIOPin, AnyOutputPin, Gpio1, Gpio2, Gpio3, IOPin, Input, InputOutput, Output, OutputPin, Pin,
    PinDriver, Pull,
};
use esp_idf_hal::uart::{UartDriver, UartTxDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::timer::{EspTaskTimerService, EspTimer};
use log::{info, warn};

use crate::app::ports::{BuzzerPort, DisplayLine, DisplayPort, InputPort, SensorPort, SerialPort};
use crate::config::SystemConfig;
use crate::drivers::analog::AnalogChannel;
use crate::drivers::bus::HalBusLines;
use crate::drivers::button::ButtonId;
use crate::drivers::lcd::{self, Hd44780};
use crate::drivers::sht21::{MeasureKind, Sht21, Sht21Timing};
use crate::error::{BusError, Error};
use crate::events::{Event, push_event};
use crate::link::{LINE_MAX, LineAssembler};
use crate::pins;

/// Fed by the UART receive thread, drained by the main loop.
static LINE_ASSEMBLER: LineAssembler = LineAssembler::new();

type AdcChan<P> = AdcChannelDriver<'static, P, Arc<AdcDriver<'static, ADC1>>>;
type BusLinesImpl = HalBusLines<
    PinDriver<'static, AnyOutputPin, Output>,
    PinDriver<'static, AnyIOPin, InputOutput>,
    Delay,
>;
type Lcd = Hd44780<
    PinDriver<'static, AnyOutputPin, Output>,
    PinDriver<'static, AnyOutputPin, Output>,
    PinDriver<'static, AnyOutputPin, Output>,
    PinDriver<'static, AnyOutputPin, Output>,
    PinDriver<'static, AnyOutputPin, Output>,
    PinDriver<'static, AnyOutputPin, Output>,
    Delay,
>;

/// Concrete adapter that combines all hardware behind the port traits.
pub struct BoardAdapter {
    lm35: AdcChan<Gpio1>,
    hih: AdcChan<Gpio2>,
    ldr: AdcChan<Gpio3>,
    sht: Sht21<BusLinesImpl>,
    buttons: [PinDriver<'static, AnyIOPin, Input>; ButtonId::COUNT],
    buzzer: PinDriver<'static, AnyOutputPin, Output>,
    lcd: Lcd,
    uart_tx: UartTxDriver<'static>,
    debounce_ms: u32,
    // Dropped with the adapter; keeps the periodic timers armed.
    _timers: [EspTimer<'static>; 2],
}

impl BoardAdapter {
    /// Claim every peripheral, bring up the display and the digital
    /// sensor, and start the UART receive thread and tick timers.
    pub fn new(config: &SystemConfig) -> Result<Self> {
        let p = esp_idf_hal::peripherals::Peripherals::take()
            .context("peripherals already taken")?;

        // ── ADC channels ──────────────────────────────────────
        let adc = Arc::new(AdcDriver::new(p.adc1).context("ADC1 init")?);
        let chan_cfg = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        let lm35 = AdcChannelDriver::new(Arc::clone(&adc), p.pins.gpio1, &chan_cfg)
            .context("LM35 channel")?;
        let hih = AdcChannelDriver::new(Arc::clone(&adc), p.pins.gpio2, &chan_cfg)
            .context("HIH channel")?;
        let ldr = AdcChannelDriver::new(Arc::clone(&adc), p.pins.gpio3, &chan_cfg)
            .context("LDR channel")?;

        // ── SHT21 on the bit-banged bus ───────────────────────
        let scl = PinDriver::output(p.pins.gpio15.downgrade_output()).context("SCL pin")?;
        let sda =
            PinDriver::input_output_od(p.pins.gpio14.downgrade()).context("SDA pin")?;
        let bus_lines = HalBusLines::new(scl, sda, Delay::new_default(), config.bus_bit_delay_us);
        let mut sht = Sht21::new(bus_lines, Sht21Timing::from(config));
        sht.init();

        // ── Buttons ───────────────────────────────────────────
        let mut buttons = [
            button_input(p.pins.gpio4.downgrade())?,
            button_input(p.pins.gpio5.downgrade())?,
            button_input(p.pins.gpio6.downgrade())?,
            button_input(p.pins.gpio7.downgrade())?,
            button_input(p.pins.gpio8.downgrade())?,
        ];
        for b in &mut buttons {
            b.set_pull(Pull::Up).context("button pull-up")?;
        }

        // ── Buzzer ────────────────────────────────────────────
        let mut buzzer =
            PinDriver::output(p.pins.gpio9.downgrade_output()).context("buzzer pin")?;
        buzzer.set_low().context("buzzer idle")?;

        // ── Display ───────────────────────────────────────────
        let mut lcd = Hd44780::new(
            PinDriver::output(p.pins.gpio10.downgrade_output()).context("LCD RS")?,
            PinDriver::output(p.pins.gpio11.downgrade_output()).context("LCD EN")?,
            PinDriver::output(p.pins.gpio12.downgrade_output()).context("LCD D4")?,
            PinDriver::output(p.pins.gpio13.downgrade_output()).context("LCD D5")?,
            PinDriver::output(p.pins.gpio16.downgrade_output()).context("LCD D6")?,
            PinDriver::output(p.pins.gpio21.downgrade_output()).context("LCD D7")?,
            Delay::new_default(),
        );
        lcd.init();

        // ── UART link to the gateway ──────────────────────────
        let uart = UartDriver::new(
            p.uart1,
            p.pins.gpio17,
            p.pins.gpio18,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &UartConfig::new().baudrate(Hertz(pins::UART_BAUD)),
        )
        .context("UART init")?;
        let (uart_tx, uart_rx) = uart.into_split();
        spawn_rx_thread(uart_rx);

        // ── Tick timers ───────────────────────────────────────
        let timer_service = EspTaskTimerService::new().context("timer service")?;
        let second = timer_service
            .timer(|| {
                push_event(Event::SecondTick);
            })
            .context("second timer")?;
        second
            .every(Duration::from_secs(1))
            .context("second timer start")?;
        let control = timer_service
            .timer(|| {
                push_event(Event::ControlTick);
            })
            .context("control timer")?;
        control
            .every(Duration::from_millis(u64::from(config.control_loop_interval_ms)))
            .context("control timer start")?;

        info!("board adapter up (pins per src/pins.rs)");

        Ok(Self {
            lm35,
            hih,
            ldr,
            sht,
            buttons,
            buzzer,
            lcd,
            uart_tx,
            debounce_ms: config.debounce_ms,
            _timers: [second, control],
        })
    }

    /// Completed inbound line, if the receive thread assembled one.
    /// Losses recorded by the assembler since the last call are logged
    /// here, once per burst.
    pub fn take_line(&mut self) -> Option<heapless::Vec<u8, LINE_MAX>> {
        for (err, count) in LINE_ASSEMBLER.take_errors() {
            warn!("{} (x{count})", Error::from(err));
        }
        LINE_ASSEMBLER.take_line()
    }
}

fn button_input(pin: AnyIOPin) -> Result<PinDriver<'static, AnyIOPin, Input>> {
    let num = pin.pin();
    PinDriver::input(pin).with_context(|| format!("button input gpio{num}"))
}

/// Drain the UART receiver byte by byte into the line assembler.
fn spawn_rx_thread(mut rx: esp_idf_hal::uart::UartRxDriver<'static>) {
    std::thread::spawn(move || {
        let mut byte = [0u8; 1];
        loop {
            match rx.read(&mut byte, BLOCK) {
                Ok(n) if n > 0 => {
                    if LINE_ASSEMBLER.on_byte(byte[0]) {
                        push_event(Event::LineReady);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("uart rx error: {e}");
                    FreeRtos::delay_ms(100);
                }
            }
        }
    });
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for BoardAdapter {
    fn sample_analog(&mut self, channel: AnalogChannel) -> u16 {
        let raw12 = match channel {
            AnalogChannel::Lm35Temperature => self.lm35.read(),
            AnalogChannel::HihHumidity => self.hih.read(),
            AnalogChannel::Light => self.ldr.read(),
        }
        .unwrap_or_else(|e| {
            warn!("adc read failed on {channel:?}: {e}");
            0
        });
        // The conversions work in the 10-bit domain the sensors were
        // calibrated against; fold the 12-bit converter down to it.
        raw12 >> 2
    }

    fn measure_digital(&mut self, kind: MeasureKind) -> core::result::Result<u16, BusError> {
        self.sht.measure(kind)
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for BoardAdapter {
    fn button_is_pressed(&mut self, id: ButtonId) -> bool {
        self.buttons[id.index()].is_low()
    }

    fn debounce_wait(&mut self) {
        FreeRtos::delay_ms(self.debounce_ms);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for BoardAdapter {
    fn clear(&mut self) {
        self.lcd.clear();
    }

    fn write_line(&mut self, line: DisplayLine, text: &str) {
        let row = match line {
            DisplayLine::Top => 0,
            DisplayLine::Bottom => 1,
        };
        self.lcd.set_cursor(row, 0);
        self.lcd.print(text);
        // Blank the remainder so shorter text overwrites longer text.
        for _ in text.len()..lcd::COLS as usize {
            self.lcd.print(" ");
        }
    }
}

// ── SerialPort implementation ─────────────────────────────────

impl SerialPort for BoardAdapter {
    fn send(&mut self, text: &str) {
        let mut remaining = text.as_bytes();
        while !remaining.is_empty() {
            match self.uart_tx.write(remaining) {
                Ok(written) => remaining = &remaining[written..],
                Err(e) => {
                    warn!("uart tx error: {e}");
                    break;
                }
            }
        }
    }
}

// ── BuzzerPort implementation ─────────────────────────────────

impl BuzzerPort for BoardAdapter {
    fn pulse_ms(&mut self, ms: u32) {
        if self.buzzer.set_high().is_err() {
            warn!("buzzer drive failed");
            return;
        }
        FreeRtos::delay_ms(ms);
        let _ = self.buzzer.set_low();
    }
}
