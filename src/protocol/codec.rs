//! Bit Encoder dan Message Assembler
//!
//! Encode: byte stream -> deretan BinaryEvent, MSB-first, plus terminator.
//! Assemble: BinaryEvent -> byte -> baris pesan lengkap.
//! Tidak ada alokasi setelah inisialisasi.

use super::frame::{BinaryEvent, BITS_PER_BYTE, BUFFER_CAPACITY, TERMINATOR};

/// Iterator event untuk satu payload
///
/// Menghasilkan 8 event per byte, MSB-first, diakhiri 8 event untuk
/// byte TERMINATOR. NUL di tengah payload memotong transmisi: byte itu
/// sendiri menjadi terminator dan sisa payload tidak dikirim.
pub struct BitEncoder<'a> {
    payload: &'a [u8],
    byte_pos: usize,
    bit_pos: u8,
    finished: bool,
}

impl<'a> BitEncoder<'a> {
    #[inline(always)]
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            byte_pos: 0,
            bit_pos: BITS_PER_BYTE - 1,
            finished: false,
        }
    }

    /// Byte yang sedang dikirim; terminator implisit setelah payload habis
    #[inline(always)]
    fn current_byte(&self) -> u8 {
        if self.byte_pos < self.payload.len() {
            self.payload[self.byte_pos]
        } else {
            TERMINATOR
        }
    }

    /// Jumlah event yang akan dihasilkan untuk sebuah payload
    pub fn event_count(payload: &[u8]) -> usize {
        let bytes = payload
            .iter()
            .position(|&b| b == TERMINATOR)
            .map(|i| i + 1)
            .unwrap_or(payload.len() + 1);
        bytes * BITS_PER_BYTE as usize
    }
}

impl Iterator for BitEncoder<'_> {
    type Item = BinaryEvent;

    #[inline(always)]
    fn next(&mut self) -> Option<BinaryEvent> {
        if self.finished {
            return None;
        }

        let byte = self.current_byte();
        let event = BinaryEvent::from_bit(byte, self.bit_pos);

        if self.bit_pos == 0 {
            if byte == TERMINATOR {
                self.finished = true;
            } else {
                self.byte_pos += 1;
                self.bit_pos = BITS_PER_BYTE - 1;
            }
        } else {
            self.bit_pos -= 1;
        }

        Some(event)
    }
}

/// State machine penerima
///
/// Akumulasi bit menjadi byte, byte menjadi baris pesan. State:
/// (nilai parsial, jumlah bit 0..=7, buffer, write index). Flush saat
/// byte TERMINATOR selesai atau write index mencapai capacity-1.
///
/// Pada overflow flush, byte terakhir yang terakumulasi ditimpa
/// terminator sebelum baris dikeluarkan - perilaku warisan yang
/// dipertahankan apa adanya. Byte berikutnya memulai pesan baru dari
/// index 0 tanpa penanda apa pun di output.
pub struct MessageAssembler {
    acc: u8,
    bit_count: u8,
    buffer: Box<[u8]>,
    write_idx: usize,
    forced_flushes: u64,
}

impl Default for MessageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageAssembler {
    /// Assembler dengan kapasitas default (BUFFER_CAPACITY)
    pub fn new() -> Self {
        Self::with_capacity(BUFFER_CAPACITY)
    }

    /// Assembler dengan kapasitas tertentu (minimal 2)
    ///
    /// Alokasi hanya terjadi sekali di sini, tidak ada alokasi
    /// di jalur push.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 2, "capacity must hold at least one byte + terminator");
        Self {
            acc: 0,
            bit_count: 0,
            buffer: vec![0u8; capacity].into_boxed_slice(),
            write_idx: 0,
            forced_flushes: 0,
        }
    }

    /// Proses satu event. Returns baris pesan lengkap saat flush,
    /// tanpa terminator dan tanpa line break.
    #[inline(always)]
    pub fn push(&mut self, event: BinaryEvent) -> Option<&[u8]> {
        self.acc = (self.acc << 1) | event.as_u8();
        self.bit_count += 1;

        if self.bit_count < BITS_PER_BYTE {
            return None;
        }

        let byte = self.acc;
        self.acc = 0;
        self.bit_count = 0;

        self.buffer[self.write_idx] = byte;
        self.write_idx += 1;

        if byte == TERMINATOR || self.write_idx >= self.buffer.len() - 1 {
            if byte != TERMINATOR {
                self.forced_flushes += 1;
            }
            // Posisi terakhir yang ditulis ditimpa terminator
            let line_len = self.write_idx - 1;
            self.buffer[line_len] = TERMINATOR;
            self.write_idx = 0;
            return Some(&self.buffer[..line_len]);
        }

        None
    }

    /// Jumlah bit yang terakumulasi untuk byte berjalan (0..=7)
    #[inline(always)]
    pub fn pending_bits(&self) -> u8 {
        self.bit_count
    }

    /// Jumlah byte di buffer sejak flush terakhir
    #[inline(always)]
    pub fn pending_bytes(&self) -> usize {
        self.write_idx
    }

    /// Berapa kali flush terjadi karena buffer penuh, bukan terminator
    #[inline(always)]
    pub fn forced_flushes(&self) -> u64 {
        self.forced_flushes
    }

    /// Cek apakah assembler kembali ke state awal
    #[inline(always)]
    pub fn is_idle(&self) -> bool {
        self.bit_count == 0 && self.write_idx == 0
    }
}
