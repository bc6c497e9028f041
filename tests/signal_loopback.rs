//! Live Loopback Test - Real Signal Delivery
//!
//! Kirim pesan ke PID sendiri lewat SIGUSR1/SIGUSR2 dan rakit kembali
//! di thread test. Menjalankan jalur lengkap handler -> queue ->
//! assembler dengan signal sungguhan dan pacing delay.
//!
//! Usage:
//!   cargo test --test signal_loopback

#![cfg(unix)]

use std::thread;
use std::time::{Duration, Instant};

use iris::channel::{own_pid, ChannelError, Listener, Sender};

/// Poll sampai `want` baris keluar atau timeout habis
fn wait_for_lines(
    listener: &mut Listener,
    out: &mut Vec<u8>,
    want: usize,
    timeout: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    let mut got = 0;

    while Instant::now() < deadline {
        got += listener.poll(out).expect("poll failed");
        if got >= want {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }

    false
}

#[test]
fn loopback_roundtrip() {
    let mut listener = Listener::install().expect("install handlers");
    let pid = own_pid();
    let mut out: Vec<u8> = Vec::new();

    // Satu pesan utuh
    let sender = Sender::new(pid);
    let tx = thread::spawn(move || sender.send(b"Hi from iris"));
    assert!(
        wait_for_lines(&mut listener, &mut out, 1, Duration::from_secs(10)),
        "no message reassembled before timeout"
    );
    tx.join().unwrap().expect("send failed");
    assert_eq!(out, b"Hi from iris\n");

    // Pesan yang sama dua kali harus keluar dua baris, plus pesan
    // kosong yang cuma mengirim terminator
    out.clear();
    let sender = Sender::new(pid);
    let tx = thread::spawn(move || {
        sender.send(b"again")?;
        sender.send(b"again")?;
        sender.send(b"")
    });
    assert!(
        wait_for_lines(&mut listener, &mut out, 3, Duration::from_secs(10)),
        "repeated messages not reassembled before timeout"
    );
    tx.join().unwrap().expect("send failed");
    assert_eq!(out, b"again\nagain\n\n");

    let stats = listener.stats();
    assert_eq!(stats.messages_emitted, 4);
    assert_eq!(stats.events_dropped, 0);
    assert_eq!(stats.forced_flushes, 0);
}

#[test]
fn delivery_to_missing_process_fails() {
    // pid_max kernel maksimum 4194304 - PID ini tidak mungkin ada
    let sender = Sender::new(i32::MAX).with_pace(Duration::from_micros(1));

    match sender.send(b"x") {
        Err(ChannelError::Delivery { pid, .. }) => assert_eq!(pid, i32::MAX),
        other => panic!("expected delivery error, got {:?}", other),
    }
}
