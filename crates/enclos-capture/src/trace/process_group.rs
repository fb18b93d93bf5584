use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;

/// The process group a traced command runs in. The tracer is spawned as the
/// group leader, so the tracee and every descendant that does not call
/// `setpgid` itself share it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProcessGroup(Pid);

impl ProcessGroup {
    pub(crate) fn led_by(pid: u32) -> Option<Self> {
        i32::try_from(pid).ok().map(|pid| Self(Pid::from_raw(pid)))
    }

    pub(crate) fn signal(&self, signal: Signal) {
        match killpg(self.0, signal) {
            Ok(()) => tracing::debug!("Sent {signal} to process group {}", self.0),
            // ESRCH: the group is already gone.
            Err(e) => tracing::debug!("Failed to send {signal} to process group {}: {e}", self.0),
        }
    }

    /// Kill the group if the guard is dropped before being disarmed.
    pub(crate) fn guard(self) -> GroupGuard {
        GroupGuard {
            group: self,
            armed: true,
        }
    }
}

/// Kills the traced process group on drop unless the tracer exited normally.
pub(crate) struct GroupGuard {
    group: ProcessGroup,
    armed: bool,
}

impl GroupGuard {
    pub(crate) fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Trace aborted, killing process group {}", self.group.0);
            self.group.signal(Signal::SIGKILL);
        }
    }
}

/// How to forward the `n`th interrupt the orchestrator receives. The first
/// two are passed on as-is; after that the group is killed outright.
pub(crate) fn escalate(received: Signal, count: usize) -> Signal {
    if count > 2 {
        Signal::SIGKILL
    } else {
        received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::CommandExt;
    use std::process::Command;

    #[test]
    fn test_escalation() {
        assert_eq!(escalate(Signal::SIGINT, 1), Signal::SIGINT);
        assert_eq!(escalate(Signal::SIGTERM, 2), Signal::SIGTERM);
        assert_eq!(escalate(Signal::SIGINT, 3), Signal::SIGKILL);
    }

    #[test]
    fn test_guard_kills_group_on_drop() {
        let mut child = Command::new("sleep")
            .arg("30")
            .process_group(0)
            .spawn()
            .unwrap();
        let group = ProcessGroup::led_by(child.id()).unwrap();

        drop(group.guard());

        let status = child.wait().unwrap();
        assert!(!status.success());
    }

    #[test]
    fn test_disarmed_guard_leaves_group_alone() {
        let mut child = Command::new("sleep")
            .arg("0")
            .process_group(0)
            .spawn()
            .unwrap();
        let group = ProcessGroup::led_by(child.id()).unwrap();

        let mut guard = group.guard();
        guard.disarm();
        drop(guard);

        assert!(child.wait().unwrap().success());
    }
}
