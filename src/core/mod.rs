//! Core module: Lock-Free Event Queue
//!
//! Prinsip desain:
//! - Async-Signal-Safe: push hanya atomic store, tanpa Mutex/alokasi/syscall
//! - Const-Init: queue bisa hidup di static, dijangkau dari signal handler
//! - No-Allocation: semua slot fixed-size, embedded langsung di struct

mod event_queue;

pub use event_queue::EventQueue;
