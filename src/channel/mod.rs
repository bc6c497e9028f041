//! Channel Layer: Signal-Based Event Transport
//!
//! SIGUSR1/SIGUSR2 sebagai transport satu bit per signal. Best-effort:
//! tidak ada ack, tidak ada retransmit, tidak ada deteksi corruption.
//! Pacing delay di sisi pengirim adalah satu-satunya mitigasi terhadap
//! signal coalescing.

mod receiver;
mod sender;

pub use receiver::{own_pid, EventWait, Listener, ListenerStats};
pub use sender::Sender;

use nix::errno::Errno;
use thiserror::Error;

/// Kegagalan yang bisa diamati dari channel.
///
/// Event yang hilang, terbalik urutannya, atau ter-coalesce tidak pernah
/// muncul di sini - itu silent corruption bawaan channel, bukan error.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Dispatch event ke target gagal (proses tidak ada atau tidak diizinkan)
    #[error("failed to deliver event to pid {pid}: {source}")]
    Delivery {
        pid: i32,
        #[source]
        source: Errno,
    },

    /// Registrasi signal handler atau manipulasi signal mask gagal
    #[error("failed to install signal handlers: {0}")]
    HandlerInstall(Errno),

    /// Error I/O saat menulis pesan yang sudah dirakit
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
