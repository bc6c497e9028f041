//! Iris - Inter-Process Messenger over POSIX Signals
//!
//! Arsitektur:
//! - One Bit per Signal: SIGUSR1 = 0, SIGUSR2 = 1, MSB-first
//! - Lock-Free: signal handler hanya push ke atomic event queue
//! - No-Allocation: semua buffer pre-allocated saat init
//! - Best-Effort: tidak ada ack/retransmit, pacing delay di sisi
//!   pengirim adalah satu-satunya mitigasi terhadap signal coalescing

#[cfg(unix)]
pub mod channel;
pub mod core;
pub mod protocol;
