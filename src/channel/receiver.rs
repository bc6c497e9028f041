//! Receiver: signal handler + drain loop
//!
//! Handler hanya push event mentah ke static EventQueue - async-signal-safe
//! karena cuma atomic store, tanpa alokasi/lock/syscall. Semua akumulasi
//! bit dan flush pesan berjalan di konteks biasa lewat `poll`.
//!
//! Run loop mem-block kedua signal selama drain dan menunggu lewat
//! sigsuspend (unmask + wait secara atomik), jadi tidak ada celah antara
//! drain selesai dan wait dimulai.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use nix::sys::signal::{
    sigaction, sigprocmask, SaFlags, SigAction, SigHandler, SigSet, SigmaskHow, Signal,
};
use nix::unistd::Pid;

use super::ChannelError;
use crate::core::EventQueue;
use crate::protocol::{BinaryEvent, MessageAssembler, EVENT_QUEUE_DEPTH};

/// Jalur handler -> drain harus lewat static: sigaction tidak memberi
/// context pointer ke handler.
static EVENT_QUEUE: EventQueue<EVENT_QUEUE_DEPTH> = EventQueue::new();

/// Event yang hilang karena queue penuh
static DROPPED_EVENTS: AtomicU64 = AtomicU64::new(0);

/// Satu-satunya hal yang boleh dilakukan di konteks interrupt:
/// terjemahkan signum ke event, push, hitung drop.
extern "C" fn on_signal(signum: libc::c_int) {
    let event = if signum == libc::SIGUSR2 {
        BinaryEvent::One
    } else {
        BinaryEvent::Zero
    };

    if !EVENT_QUEUE.push(event) {
        DROPPED_EVENTS.fetch_add(1, Ordering::Relaxed);
    }
}

/// PID proses ini - dipublish oleh server supaya client tahu targetnya
pub fn own_pid() -> i32 {
    Pid::this().as_raw()
}

/// Snapshot counter receiver
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerStats {
    pub events_consumed: u64,
    pub events_dropped: u64,
    pub messages_emitted: u64,
    pub bytes_emitted: u64,
    pub forced_flushes: u64,
}

/// Mask untuk menunggu event berikutnya setelah `block_events`.
///
/// `wait` memakai sigsuspend: signal yang pending langsung dilayani,
/// tidak ada window antara unmask dan wait.
pub struct EventWait {
    mask: SigSet,
}

impl EventWait {
    /// Tidur sampai ada signal masuk
    pub fn wait(&self) {
        // sigsuspend selalu kembali lewat EINTR saat handler selesai
        let _ = self.mask.suspend();
    }
}

/// Receiver untuk pesan berbasis signal
pub struct Listener {
    assembler: MessageAssembler,
    events_consumed: u64,
    messages_emitted: u64,
    bytes_emitted: u64,
}

impl Listener {
    /// Registrasi handler untuk SIGUSR1 dan SIGUSR2.
    ///
    /// Kedua signal masuk sa_mask handler: invocation tidak pernah saling
    /// menyela, state queue aman dari re-entrancy. Begitu fungsi ini
    /// kembali, setiap event yang terkirim pasti tercatat - PID boleh
    /// dipublish setelahnya tanpa missed-event window.
    pub fn install() -> Result<Self, ChannelError> {
        let watched = Self::watched_set();
        let action = SigAction::new(SigHandler::Handler(on_signal), SaFlags::SA_RESTART, watched);

        // SAFETY: on_signal hanya melakukan atomic ops (async-signal-safe)
        unsafe {
            sigaction(Signal::SIGUSR1, &action).map_err(ChannelError::HandlerInstall)?;
            sigaction(Signal::SIGUSR2, &action).map_err(ChannelError::HandlerInstall)?;
        }

        Ok(Self {
            assembler: MessageAssembler::new(),
            events_consumed: 0,
            messages_emitted: 0,
            bytes_emitted: 0,
        })
    }

    fn watched_set() -> SigSet {
        let mut set = SigSet::empty();
        set.add(Signal::SIGUSR1);
        set.add(Signal::SIGUSR2);
        set
    }

    /// Block kedua signal di thread ini; delivery hanya terjadi selama
    /// `EventWait::wait`, jadi drain tidak pernah disela handler.
    pub fn block_events(&self) -> Result<EventWait, ChannelError> {
        let watched = Self::watched_set();
        let mut previous = SigSet::empty();
        sigprocmask(SigmaskHow::SIG_BLOCK, Some(&watched), Some(&mut previous))
            .map_err(ChannelError::HandlerInstall)?;

        let mut mask = previous;
        mask.remove(Signal::SIGUSR1);
        mask.remove(Signal::SIGUSR2);
        Ok(EventWait { mask })
    }

    /// Drain semua event yang sudah antri, tulis setiap pesan lengkap
    /// ke `out` sebagai satu baris. Returns jumlah pesan yang keluar.
    pub fn poll<W: Write>(&mut self, out: &mut W) -> Result<usize, ChannelError> {
        let mut emitted = 0;

        while let Some(event) = EVENT_QUEUE.pop() {
            self.events_consumed += 1;

            if let Some(line) = self.assembler.push(event) {
                out.write_all(line)?;
                out.write_all(b"\n")?;
                out.flush()?;

                self.messages_emitted += 1;
                self.bytes_emitted += line.len() as u64;
                emitted += 1;
            }
        }

        Ok(emitted)
    }

    /// Loop utama receiver: drain, suspend, ulangi. Tidak pernah kembali
    /// kecuali error I/O atau kegagalan manipulasi signal mask.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), ChannelError> {
        let wait = self.block_events()?;
        loop {
            self.poll(out)?;
            wait.wait();
        }
    }

    /// Counter receiver saat ini
    pub fn stats(&self) -> ListenerStats {
        ListenerStats {
            events_consumed: self.events_consumed,
            events_dropped: DROPPED_EVENTS.load(Ordering::Relaxed),
            messages_emitted: self.messages_emitted,
            bytes_emitted: self.bytes_emitted,
            forced_flushes: self.assembler.forced_flushes(),
        }
    }
}
