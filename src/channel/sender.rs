//! Transmitter: paced signal dispatch
//!
//! Satu signal per event dengan pacing delay di antaranya. Kernel tidak
//! meng-queue standard signal yang sama: dua dispatch yang lebih cepat
//! dari handler penerima akan di-coalesce jadi satu. Pacing delay
//! memperkecil risikonya, bukan menghilangkannya.

use std::thread;
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

use super::ChannelError;
use crate::protocol::{BinaryEvent, BitEncoder, BIT_INTERVAL};

/// Signal untuk masing-masing event kind
#[inline(always)]
pub(crate) fn signal_for(event: BinaryEvent) -> Signal {
    match event {
        BinaryEvent::Zero => Signal::SIGUSR1,
        BinaryEvent::One => Signal::SIGUSR2,
    }
}

/// Transmitter untuk satu target process
pub struct Sender {
    target: Pid,
    pace: Duration,
}

impl Sender {
    /// Sender dengan pacing default (BIT_INTERVAL)
    pub fn new(target_pid: i32) -> Self {
        Self {
            target: Pid::from_raw(target_pid),
            pace: BIT_INTERVAL,
        }
    }

    /// Override pacing interval antar event
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Kirim payload plus terminator implisit, satu event per bit, MSB-first.
    ///
    /// Waktu tempuh kira-kira `8 * (len + 1) * pace`. Berhenti pada
    /// kegagalan dispatch pertama: sisa bit tidak dikirim dan receiver
    /// tidak diberi tahu - pesan parsial mungkin saja sudah terkirim.
    pub fn send(&self, payload: &[u8]) -> Result<(), ChannelError> {
        for event in BitEncoder::new(payload) {
            self.dispatch(event)?;
            thread::sleep(self.pace);
        }
        Ok(())
    }

    /// Dispatch satu event ke target
    #[inline]
    fn dispatch(&self, event: BinaryEvent) -> Result<(), ChannelError> {
        kill(self.target, signal_for(event)).map_err(|errno| ChannelError::Delivery {
            pid: self.target.as_raw(),
            source: errno,
        })
    }

    /// PID target
    pub fn target(&self) -> i32 {
        self.target.as_raw()
    }

    /// Pacing interval yang dipakai
    pub fn pace(&self) -> Duration {
        self.pace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_mapping() {
        assert_eq!(signal_for(BinaryEvent::Zero), Signal::SIGUSR1);
        assert_eq!(signal_for(BinaryEvent::One), Signal::SIGUSR2);
    }

    #[test]
    fn test_pace_override() {
        let sender = Sender::new(1234).with_pace(Duration::from_micros(250));
        assert_eq!(sender.target(), 1234);
        assert_eq!(sender.pace(), Duration::from_micros(250));
    }
}
