//! One-shot result pipe between parent and sandboxed child

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};

/// Descriptor number the child sees the write end as
pub(super) const RESULT_FD: RawFd = 3;

/// Verdict bytes longer than this are never a success report
const MAX_VERDICT_BYTES: usize = 16;

/// Pipe carrying the child's single verdict byte.
///
/// Both ends are close-on-exec. The child installs the write end as
/// [`RESULT_FD`]; the parent drops its copy right after spawn so that EOF
/// means every writer is gone. The read end is non-blocking: a grandchild
/// still holding the write end can never stall the parent.
pub(super) struct ResultChannel {
    read: OwnedFd,
    write: Option<OwnedFd>,
}

impl ResultChannel {
    pub(super) fn open() -> io::Result<Self> {
        let [read, write] = cloexec_pipe()?;
        set_nonblocking(read.as_raw_fd())?;
        Ok(Self {
            read,
            write: Some(write),
        })
    }

    /// Raw write end, for installing in the child
    pub(super) fn write_fd(&self) -> Option<RawFd> {
        self.write.as_ref().map(AsRawFd::as_raw_fd)
    }

    /// Drop the parent's copy of the write end
    pub(super) fn close_write(&mut self) {
        self.write = None;
    }

    /// Whether the child reported success.
    ///
    /// Only the exact byte `1` counts. `0`, no data, or data still in
    /// flight are all treated as "no success report".
    pub(super) fn read_verdict(self) -> io::Result<bool> {
        let mut file = File::from(self.read);
        let mut buf = [0u8; MAX_VERDICT_BYTES];
        let mut len = 0;

        while len < buf.len() {
            match file.read(&mut buf[len..]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(&buf[..len] == b"1")
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn cloexec_pipe() -> io::Result<[OwnedFd; 2]> {
    let mut fds = [0 as libc::c_int; 2];
    // SAFETY: fds points to two writable c_ints.
    let rc = unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: pipe2 succeeded, both descriptors are fresh and owned by us.
    Ok(unsafe { [OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])] })
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn cloexec_pipe() -> io::Result<[OwnedFd; 2]> {
    let mut fds = [0 as libc::c_int; 2];
    // SAFETY: fds points to two writable c_ints.
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: pipe succeeded, both descriptors are fresh and owned by us.
    let owned = unsafe { [OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])] };
    for fd in &owned {
        // SAFETY: fd is a valid open descriptor.
        if unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC) } == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(owned)
}

fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    // SAFETY: fd is a valid open descriptor owned by the caller.
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags == -1 || libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}
