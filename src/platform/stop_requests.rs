//! Operator stop requests: Ctrl+C and the `q` key.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::io::IsTerminal;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::cancel::StopSignal;
use crate::core::capabilities::CancellationSource;
use crate::error::{Result, WatchError};

/// How often the key listener re-checks whether the monitor already stopped
const KEY_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Route Ctrl+C to `stop`. Can only be installed once per process.
pub fn install_ctrlc_handler(stop: StopSignal) -> Result<()> {
    ctrlc::set_handler(move || {
        log::info!("Ctrl+C received, stopping");
        stop.signal();
    })
    .map_err(|e| WatchError::signal(format!("Failed to set Ctrl+C handler: {}", e)))
}

/// Keys that request a stop
pub fn is_quit_key(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

/// Watch the terminal for a quit key on a background thread.
///
/// Returns `None` when stdin is not a terminal. The thread ends on its own
/// once `stop` is signaled by anyone.
pub fn spawn_key_listener(stop: StopSignal) -> Option<JoinHandle<()>> {
    if !std::io::stdin().is_terminal() {
        log::debug!("stdin is not a terminal, key listener disabled");
        return None;
    }

    let handle = thread::Builder::new()
        .name("procwatch-keys".into())
        .spawn(move || {
            if let Err(e) = listen_for_quit(&stop) {
                log::warn!("Key listener stopped: {}", e);
            }
        });

    match handle {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Failed to start key listener: {}", e);
            None
        }
    }
}

/// Wait for the key listener to finish. Returns false if it panicked.
pub fn join_key_listener(handle: JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            log::warn!("Key listener thread panicked");
            false
        }
    }
}

fn listen_for_quit(stop: &StopSignal) -> Result<()> {
    while !stop.is_signaled() {
        let ready = event::poll(KEY_POLL_INTERVAL)
            .map_err(|e| WatchError::terminal(e.to_string()))?;
        if !ready {
            continue;
        }

        if let Event::Key(key) = event::read().map_err(|e| WatchError::terminal(e.to_string()))? {
            if is_quit_key(&key) {
                log::info!("Quit key pressed, stopping");
                stop.signal();
            }
        }
    }
    Ok(())
}
