//! Child-side process setup (runs between fork and exec)

use std::io;
use std::os::fd::RawFd;

use tokio::process::Command;

use super::channel::RESULT_FD;
use crate::sandbox::limits::ResourceLimits;

/// Put the child in its own session, install the result pipe as fd 3 and
/// apply rlimits.
pub(super) fn install_child_setup(cmd: &mut Command, limits: &ResourceLimits, result_fd: RawFd) {
    let rlimits = [
        (libc::RLIMIT_AS, limits.max_memory_bytes),
        (libc::RLIMIT_CPU, limits.max_cpu_seconds),
        (libc::RLIMIT_FSIZE, limits.max_file_size_bytes),
        (libc::RLIMIT_NOFILE, limits.max_open_files),
        (libc::RLIMIT_STACK, limits.max_stack_bytes),
    ];

    // SAFETY: pre_exec runs between fork() and exec() in the child process.
    // The closure only calls async-signal-safe libc functions (setsid, dup2,
    // fcntl, setrlimit) on Copy values moved into it; nothing allocates and
    // no parent state is touched.
    unsafe {
        cmd.pre_exec(move || {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }

            if result_fd == RESULT_FD {
                // Already in place; clear close-on-exec so it survives exec
                if libc::fcntl(RESULT_FD, libc::F_SETFD, 0) == -1 {
                    return Err(io::Error::last_os_error());
                }
            } else if libc::dup2(result_fd, RESULT_FD) == -1 {
                return Err(io::Error::last_os_error());
            }

            for (resource, value) in rlimits {
                if let Some(value) = value {
                    let limit = libc::rlimit {
                        rlim_cur: value as libc::rlim_t,
                        rlim_max: value as libc::rlim_t,
                    };
                    // Best effort, like a shell `ulimit`
                    libc::setrlimit(resource, &limit);
                }
            }

            Ok(())
        });
    }
}
