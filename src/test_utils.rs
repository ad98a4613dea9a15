//! Wire expectations for the embedded-hal-mock based controller tests

extern crate std;

use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
use std::vec::Vec;

/// Expected SPI and DC traffic.
///
/// Every byte is its own SPI transaction, every `data` call raises DC once.
#[derive(Default)]
pub(crate) struct Wire {
    pub spi: Vec<SpiTransaction<u8>>,
    pub dc: Vec<PinTransaction>,
}

impl Wire {
    pub fn new() -> Self {
        Wire::default()
    }

    pub fn cmd(&mut self, command: u8) -> &mut Self {
        self.dc.push(PinTransaction::set(PinState::Low));
        self.byte(command);
        self
    }

    pub fn data(&mut self, data: &[u8]) -> &mut Self {
        self.dc.push(PinTransaction::set(PinState::High));
        for &byte in data {
            self.byte(byte);
        }
        self
    }

    pub fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> &mut Self {
        self.cmd(command).data(data)
    }

    fn byte(&mut self, byte: u8) {
        self.spi.push(SpiTransaction::transaction_start());
        self.spi.push(SpiTransaction::write(byte));
        self.spi.push(SpiTransaction::transaction_end());
    }
}

/// Busy line reads: `busy_reads` busy levels followed by one idle level.
pub(crate) fn busy_reads(is_busy_low: bool, busy_reads: usize) -> Vec<PinTransaction> {
    let (busy, idle) = if is_busy_low {
        (PinState::Low, PinState::High)
    } else {
        (PinState::High, PinState::Low)
    };
    let mut reads = Vec::new();
    for _ in 0..busy_reads {
        reads.push(PinTransaction::get(busy));
    }
    reads.push(PinTransaction::get(idle));
    reads
}

pub(crate) fn busy_pin(is_busy_low: bool, reads: usize) -> PinMock {
    PinMock::new(&busy_reads(is_busy_low, reads))
}

pub(crate) fn idle_pin(is_busy_low: bool) -> PinMock {
    busy_pin(is_busy_low, 0)
}

/// The reset pulse every init starts with
pub(crate) fn reset_pulse() -> Vec<PinTransaction> {
    std::vec![
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]
}

/// Delay that only sums up what it was asked to wait
#[derive(Default)]
pub(crate) struct CountingDelay {
    ns: u64,
}

impl CountingDelay {
    pub fn total_ms(&self) -> u64 {
        self.ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ns += u64::from(ms) * 1_000_000;
    }
}
