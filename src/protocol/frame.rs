//! Bit-Level Framing untuk Signal Transport
//!
//! Layout per byte (MSB-first):
//! ┌────┬────┬────┬────┬────┬────┬────┬────┐
//! │ b7 │ b6 │ b5 │ b4 │ b3 │ b2 │ b1 │ b0 │
//! └────┴────┴────┴────┴────┴────┴────┴────┘
//! 'H' = 0x48 -> Zero One Zero Zero One Zero Zero Zero
//!
//! Message = deretan byte diakhiri TERMINATOR (0x00).

use std::time::Duration;

/// Satu event biner - unit terkecil transmisi.
/// Tidak ada payload selain kind-nya.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryEvent {
    /// Bit 0 (diangkut sebagai SIGUSR1)
    Zero = 0,
    /// Bit 1 (diangkut sebagai SIGUSR2)
    One = 1,
}

impl BinaryEvent {
    #[inline(always)]
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Event untuk satu bit dari sebuah byte (position: 0 = LSB .. 7 = MSB)
    #[inline(always)]
    pub fn from_bit(byte: u8, position: u8) -> Self {
        if (byte >> position) & 1 == 1 {
            Self::One
        } else {
            Self::Zero
        }
    }
}

/// Jumlah event per byte
pub const BITS_PER_BYTE: u8 = 8;

/// Byte penanda akhir pesan
pub const TERMINATOR: u8 = 0;

/// Kapasitas buffer pesan di receiver
pub const BUFFER_CAPACITY: usize = 4096;

/// Pacing delay default antar event di transmitter.
///
/// Signal yang sama tidak di-queue oleh kernel: dua dispatch yang lebih
/// cepat dari handler akan di-coalesce. Delay ini mitigasi best-effort,
/// bukan jaminan.
pub const BIT_INTERVAL: Duration = Duration::from_micros(100);

/// Kedalaman event queue antara signal handler dan drain loop
pub const EVENT_QUEUE_DEPTH: usize = 65536;
