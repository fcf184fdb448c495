//! Bit-banged two-wire bus master.
//!
//! Byte-level start/stop/write/read primitives over a clock+data pair
//! using direct pin timing — no hardware I2C peripheral. The pin and
//! timing surface is the [`BusLines`] capability trait, so the master's
//! sequencing is testable against a simulated bus on the host.
//!
//! No error recovery lives at this layer: a write surfaces the
//! acknowledgement bit and everything else is the caller's problem.

/// Pin-level capabilities the master needs from the board.
///
/// SDA is open-drain with an external pull-up: `release_sda` floats the
/// line so the slave (or the pull-up) can drive it. SCL is driven by the
/// master only.
pub trait BusLines {
    /// Drive the clock line.
    fn set_scl(&mut self, high: bool);
    /// Drive the data line as an output.
    fn set_sda(&mut self, high: bool);
    /// Float the data line (input; pull-up holds it high when idle).
    fn release_sda(&mut self);
    /// Sample the data line level.
    fn read_sda(&mut self) -> bool;
    /// Settle delay after a line transition (a few microseconds).
    fn delay_bit(&mut self);
    /// Coarse wait for measurement settle times and retry backoff.
    fn delay_ms(&mut self, ms: u32);
}

/// Byte-level bus master over a [`BusLines`] pair.
pub struct BusMaster<L: BusLines> {
    lines: L,
}

impl<L: BusLines> BusMaster<L> {
    pub fn new(lines: L) -> Self {
        Self { lines }
    }

    /// Put both lines in their idle (high) state.
    pub fn init(&mut self) {
        self.lines.set_scl(true);
        self.lines.set_sda(true);
        self.lines.delay_ms(1);
    }

    /// Start condition: SDA falls while SCL is high.
    pub fn start(&mut self) {
        self.lines.set_sda(true);
        self.lines.delay_bit();
        self.lines.set_scl(true);
        self.lines.delay_bit();
        self.lines.set_sda(false);
        self.lines.delay_bit();
        self.lines.set_scl(false);
        self.lines.delay_bit();
    }

    /// Stop condition: SDA rises while SCL is high, then the line floats.
    pub fn stop(&mut self) {
        self.lines.set_scl(false);
        self.lines.delay_bit();
        self.lines.set_sda(false);
        self.lines.delay_bit();
        self.lines.set_scl(true);
        self.lines.delay_bit();
        self.lines.set_sda(true);
        self.lines.delay_bit();
        self.lines.release_sda();
    }

    /// Clock out one byte MSB-first and sample the acknowledgement bit
    /// on the 9th clock. Returns `true` when the slave pulled SDA low.
    pub fn write(&mut self, byte: u8) -> bool {
        let mut data = byte;
        self.lines.set_scl(false);

        for _ in 0..8 {
            self.lines.set_sda(data & 0x80 != 0);
            data <<= 1;
            self.lines.delay_bit();
            self.lines.set_scl(true);
            self.lines.delay_bit();
            self.lines.set_scl(false);
            self.lines.delay_bit();
        }

        // 9th clock: release SDA and sample the slave's ACK (active low).
        self.lines.release_sda();
        self.lines.delay_bit();
        self.lines.set_scl(true);
        self.lines.delay_bit();
        let ack = !self.lines.read_sda();
        self.lines.set_scl(false);
        self.lines.delay_bit();

        ack
    }

    /// Clock in one byte MSB-first, then drive the acknowledgement bit:
    /// `send_ack = true` continues a multi-byte read, `false` terminates
    /// after the final byte.
    pub fn read(&mut self, send_ack: bool) -> u8 {
        let mut data: u8 = 0;
        self.lines.release_sda();

        for _ in 0..8 {
            data <<= 1;
            self.lines.set_scl(true);
            self.lines.delay_bit();
            if self.lines.read_sda() {
                data |= 0x01;
            }
            self.lines.set_scl(false);
            self.lines.delay_bit();
        }

        // ACK = drive low, NACK = leave high.
        self.lines.set_sda(!send_ack);
        self.lines.delay_bit();
        self.lines.set_scl(true);
        self.lines.delay_bit();
        self.lines.set_scl(false);
        self.lines.delay_bit();
        self.lines.release_sda();

        data
    }

    /// Coarse wait, forwarded for callers that own the bus.
    pub fn delay_ms(&mut self, ms: u32) {
        self.lines.delay_ms(ms);
    }

    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }
}

// ---------------------------------------------------------------------------
// embedded-hal adapter
// ---------------------------------------------------------------------------

/// [`BusLines`] over any `embedded-hal` pin pair plus a delay source.
///
/// `SDA` must be configured open-drain: driving it high is the same as
/// releasing it, which is what lets the slave pull the line low for
/// acknowledgement bits and read data.
pub struct HalBusLines<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
    bit_delay_us: u32,
}

impl<SCL, SDA, D> HalBusLines<SCL, SDA, D>
where
    SCL: embedded_hal::digital::OutputPin,
    SDA: embedded_hal::digital::OutputPin + embedded_hal::digital::InputPin,
    D: embedded_hal::delay::DelayNs,
{
    pub fn new(scl: SCL, sda: SDA, delay: D, bit_delay_us: u32) -> Self {
        Self {
            scl,
            sda,
            delay,
            bit_delay_us,
        }
    }
}

impl<SCL, SDA, D> BusLines for HalBusLines<SCL, SDA, D>
where
    SCL: embedded_hal::digital::OutputPin,
    SDA: embedded_hal::digital::OutputPin + embedded_hal::digital::InputPin,
    D: embedded_hal::delay::DelayNs,
{
    fn set_scl(&mut self, high: bool) {
        let _ = if high {
            self.scl.set_high()
        } else {
            self.scl.set_low()
        };
    }

    fn set_sda(&mut self, high: bool) {
        let _ = if high {
            self.sda.set_high()
        } else {
            self.sda.set_low()
        };
    }

    fn release_sda(&mut self) {
        // Open-drain: high-impedance is reached by writing the high level.
        let _ = self.sda.set_high();
    }

    fn read_sda(&mut self) -> bool {
        // A read failure reports the pulled-up idle level, which the
        // callers interpret as NACK — the safe degradation.
        self.sda.is_high().unwrap_or(true)
    }

    fn delay_bit(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

// ---------------------------------------------------------------------------
// Simulated bus (shared by driver tests)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod sim {
    use super::BusLines;
    use std::collections::VecDeque;

    /// Every pin operation the master performs, in order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Op {
        SclHigh,
        SclLow,
        SdaHigh,
        SdaLow,
        SdaRelease,
    }

    /// Scripted bus: tests enqueue the SDA levels the master will sample
    /// (ACK bits and read data, in sampling order) and inspect the pin
    /// operation log afterwards.
    pub struct SimLines {
        pub ops: Vec<Op>,
        pub sda_script: VecDeque<bool>,
        pub samples_taken: usize,
    }

    impl SimLines {
        pub fn new() -> Self {
            Self {
                ops: Vec::new(),
                sda_script: VecDeque::new(),
                samples_taken: 0,
            }
        }

        /// Script an ACK (slave pulls the line low).
        pub fn script_ack(&mut self) {
            self.sda_script.push_back(false);
        }

        /// Script a NACK (line stays pulled up).
        pub fn script_nack(&mut self) {
            self.sda_script.push_back(true);
        }

        /// Script one data byte, MSB first.
        pub fn script_byte(&mut self, byte: u8) {
            for bit in (0..8).rev() {
                self.sda_script.push_back(byte & (1 << bit) != 0);
            }
        }
    }

    impl BusLines for SimLines {
        fn set_scl(&mut self, high: bool) {
            self.ops.push(if high { Op::SclHigh } else { Op::SclLow });
        }

        fn set_sda(&mut self, high: bool) {
            self.ops.push(if high { Op::SdaHigh } else { Op::SdaLow });
        }

        fn release_sda(&mut self) {
            self.ops.push(Op::SdaRelease);
        }

        fn read_sda(&mut self) -> bool {
            self.samples_taken += 1;
            // An empty script behaves like an idle pulled-up bus (NACK).
            self.sda_script.pop_front().unwrap_or(true)
        }

        fn delay_bit(&mut self) {}

        fn delay_ms(&mut self, _ms: u32) {}
    }
}
