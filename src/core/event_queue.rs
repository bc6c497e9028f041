//! Lock-Free Single-Producer Single-Consumer (SPSC) Event Queue
//!
//! Implementasi menggunakan Lamport Queue dengan memory ordering yang tepat.
//! Producer adalah signal handler, consumer adalah drain loop di konteks
//! biasa. Push hanya memakai atomic store - async-signal-safe.
//!
//! Const-initialized supaya bisa hidup di static: signal handler tidak
//! menerima context pointer, jadi jalur handler -> drain harus lewat static.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::protocol::BinaryEvent;

/// Padding untuk cache line isolation (64 bytes pada x86-64)
#[repr(C, align(64))]
struct CacheLinePadded<T> {
    value: T,
}

impl<T> CacheLinePadded<T> {
    const fn new(value: T) -> Self {
        Self { value }
    }
}

/// Lock-Free SPSC Event Queue
///
/// Menggunakan separate cache lines untuk head dan tail
/// untuk menghindari false sharing antara handler dan drain loop.
/// Slot berupa `AtomicU8`, satu event per slot, tidak ada `MaybeUninit`
/// karena event selalu valid sebagai byte 0/1.
#[repr(C)]
pub struct EventQueue<const N: usize> {
    // Producer side (signal handler) - cache line aligned
    head: CacheLinePadded<AtomicUsize>,
    // Consumer side (drain loop) - cache line aligned
    tail: CacheLinePadded<AtomicUsize>,
    // Slot embedded langsung, bukan Box: const-init untuk static
    slots: [AtomicU8; N],
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Membuat event queue baru. N HARUS power of 2.
    ///
    /// # Panics
    /// Panic jika N bukan power of 2 atau N == 0 (compile error
    /// jika dipakai di static)
    pub const fn new() -> Self {
        assert!(N > 0 && N.is_power_of_two(), "N must be power of 2");

        Self {
            head: CacheLinePadded::new(AtomicUsize::new(0)),
            tail: CacheLinePadded::new(AtomicUsize::new(0)),
            slots: [const { AtomicU8::new(0) }; N],
        }
    }

    /// Push event ke queue (sisi signal handler)
    ///
    /// Returns `true` jika berhasil, `false` jika queue penuh -
    /// event hilang, caller yang menghitung drop. Tidak pernah block.
    #[inline(always)]
    pub fn push(&self, event: BinaryEvent) -> bool {
        let head = self.head.value.load(Ordering::Relaxed);
        let tail = self.tail.value.load(Ordering::Acquire);

        if head.wrapping_sub(tail) >= N {
            return false;
        }

        self.slots[head & (N - 1)].store(event.as_u8(), Ordering::Relaxed);

        // Release fence: pastikan slot store di atas visible sebelum head di-update
        self.head
            .value
            .store(head.wrapping_add(1), Ordering::Release);

        true
    }

    /// Pop event dari queue (sisi drain loop)
    ///
    /// Returns `Some(event)` jika ada data, `None` jika queue kosong.
    #[inline(always)]
    pub fn pop(&self) -> Option<BinaryEvent> {
        let tail = self.tail.value.load(Ordering::Relaxed);
        let head = self.head.value.load(Ordering::Acquire);

        if tail == head {
            return None;
        }

        // Acquire pada head menjamin slot store dari producer sudah visible
        let raw = self.slots[tail & (N - 1)].load(Ordering::Relaxed);

        self.tail
            .value
            .store(tail.wrapping_add(1), Ordering::Release);

        // Slot hanya pernah diisi 0 atau 1
        Some(if raw == 0 {
            BinaryEvent::Zero
        } else {
            BinaryEvent::One
        })
    }

    /// Cek apakah queue kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        let tail = self.tail.value.load(Ordering::Acquire);
        let head = self.head.value.load(Ordering::Acquire);
        tail == head
    }

    /// Cek apakah queue penuh
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        let head = self.head.value.load(Ordering::Acquire);
        let tail = self.tail.value.load(Ordering::Acquire);
        head.wrapping_sub(tail) >= N
    }

    /// Jumlah event dalam queue
    #[inline(always)]
    pub fn len(&self) -> usize {
        let head = self.head.value.load(Ordering::Acquire);
        let tail = self.tail.value.load(Ordering::Acquire);
        head.wrapping_sub(tail)
    }

    /// Kapasitas queue
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_push_pop() {
        let q: EventQueue<16> = EventQueue::new();

        assert!(q.is_empty());
        assert!(!q.is_full());

        assert!(q.push(BinaryEvent::One));
        assert!(!q.is_empty());

        assert_eq!(q.pop(), Some(BinaryEvent::One));
        assert!(q.is_empty());
    }

    #[test]
    fn test_full_queue_drops() {
        let q: EventQueue<4> = EventQueue::new();

        assert!(q.push(BinaryEvent::Zero));
        assert!(q.push(BinaryEvent::One));
        assert!(q.push(BinaryEvent::Zero));
        assert!(q.push(BinaryEvent::One));

        assert!(q.is_full());
        assert!(!q.push(BinaryEvent::One)); // Should fail - queue full

        assert_eq!(q.pop(), Some(BinaryEvent::Zero));
        assert!(q.push(BinaryEvent::One)); // Now should succeed
    }

    #[test]
    fn test_wraparound() {
        let q: EventQueue<4> = EventQueue::new();

        // Fill and drain multiple times to test wraparound
        for round in 0..10u64 {
            for i in 0..4 {
                let ev = if (round + i) % 2 == 0 {
                    BinaryEvent::Zero
                } else {
                    BinaryEvent::One
                };
                assert!(q.push(ev));
            }
            for i in 0..4 {
                let expected = if (round + i) % 2 == 0 {
                    BinaryEvent::Zero
                } else {
                    BinaryEvent::One
                };
                assert_eq!(q.pop(), Some(expected));
            }
        }
    }

    #[test]
    fn test_static_queue() {
        // Bentuk pemakaian sebenarnya: const-init di static
        static QUEUE: EventQueue<8> = EventQueue::new();

        assert!(QUEUE.push(BinaryEvent::One));
        assert_eq!(QUEUE.pop(), Some(BinaryEvent::One));
        assert_eq!(QUEUE.pop(), None);
    }
}
