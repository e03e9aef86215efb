//! Find processes by exact name and deliver a wake-up signal to them.
//!
//! Status generators such as i3status redraw immediately on `SIGUSR1`; the
//! [`Notifier`] is the small capability handed to whatever decides when a
//! redraw is due.

use std::{ffi::OsStr, io};

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::{debug, trace, warn};

/// Signals we know how to send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Signal {
    /// `SIGUSR1`: i3status refreshes all its modules.
    #[default]
    Usr1,
    /// `SIGUSR2`.
    Usr2,
}

impl Signal {
    /// The raw signal number.
    pub fn raw(self) -> libc::c_int {
        match self {
            Self::Usr1 => libc::SIGUSR1,
            Self::Usr2 => libc::SIGUSR2,
        }
    }
}

/// Process ids whose name is exactly `name`, ascending.
///
/// Threads are skipped; only process leaders are returned. An empty result
/// means nothing by that name is running.
pub fn find_pids_by_name(name: &str) -> Vec<u32> {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());
    let mut pids: Vec<u32> = sys
        .processes_by_exact_name(OsStr::new(name))
        .filter(|p| p.thread_kind().is_none())
        .map(|p| p.pid().as_u32())
        .collect();
    pids.sort_unstable();
    pids.dedup();
    debug!(process = name, ?pids, "process lookup");
    pids
}

/// Send `signal` to a single process.
///
/// Pid 0 and values that do not fit a positive `pid_t` are rejected: `kill(2)`
/// gives those process-group and broadcast meanings.
pub fn signal_pid(pid: u32, signal: Signal) -> io::Result<()> {
    let raw_pid = match libc::pid_t::try_from(pid) {
        Ok(p) if p > 0 => p,
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to signal pid {pid}"),
            ));
        }
    };
    let rc = unsafe { libc::kill(raw_pid, signal.raw()) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Send `signal` to every pid, returning the ones that failed.
///
/// Failures are logged and otherwise ignored; a status process that has
/// exited should not take the caller down with it.
pub fn signal_pids(pids: &[u32], signal: Signal) -> Vec<(u32, io::Error)> {
    let mut failed = Vec::new();
    for &pid in pids {
        match signal_pid(pid, signal) {
            Ok(()) => trace!(pid, ?signal, "signalled"),
            Err(e) => {
                warn!(pid, ?signal, error = %e, "signal failed");
                failed.push((pid, e));
            }
        }
    }
    failed
}

/// Wakes a fixed set of processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notifier {
    /// Targets, resolved once at startup.
    pids: Vec<u32>,
    /// What to send.
    signal: Signal,
}

impl Notifier {
    /// Notify `pids` with `SIGUSR1`.
    pub fn new(pids: Vec<u32>) -> Self {
        Self {
            pids,
            signal: Signal::Usr1,
        }
    }

    /// Use a different signal.
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = signal;
        self
    }

    /// The processes this notifier targets.
    pub fn pids(&self) -> &[u32] {
        &self.pids
    }

    /// Signal every target; returns how many deliveries succeeded.
    pub fn notify(&self) -> usize {
        let failed = signal_pids(&self.pids, self.signal);
        self.pids.len() - failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_special_pids() {
        for pid in [0, u32::MAX, i32::MAX as u32 + 1] {
            let err = signal_pid(pid, Signal::Usr1).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn notifier_counts_failures() {
        let n = Notifier::new(vec![0]).with_signal(Signal::Usr2);
        assert_eq!(n.pids(), &[0]);
        assert_eq!(n.notify(), 0);
    }

    #[test]
    fn signal_numbers() {
        assert_eq!(Signal::default().raw(), libc::SIGUSR1);
        assert_eq!(Signal::Usr2.raw(), libc::SIGUSR2);
    }
}
