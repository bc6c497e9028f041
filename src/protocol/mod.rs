//! Protocol Layer: Bit-Level Framing
//!
//! Prinsip desain:
//! - One Bit per Event: setiap event membawa tepat satu bit informasi
//! - MSB-first: urutan bit tetap, transmitter dan receiver harus sepakat
//! - NUL-terminated: byte 0x00 menandai akhir pesan
//! - No allocation: assembler memakai buffer pre-allocated

mod codec;
mod frame;

pub use codec::{BitEncoder, MessageAssembler};
pub use frame::{
    BinaryEvent, BITS_PER_BYTE, BIT_INTERVAL, BUFFER_CAPACITY, EVENT_QUEUE_DEPTH, TERMINATOR,
};
