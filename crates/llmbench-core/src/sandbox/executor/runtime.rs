//! Interpreter command lines

use std::env;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::sandbox::{Runtime, SandboxError, SandboxResult};

/// Runs the code file given as `argv[1]` and reports on fd 3.
/// `SystemExit` is not caught, so an explicit exit code still wins.
/// The report fd is moved off 3 before the code runs, so the code cannot
/// write its own verdict there.
const PYTHON_HARNESS: &str = r#"import os, sys
verdict = os.dup(3)
os.close(3)
path = sys.argv[1]
try:
    with open(path) as f:
        source = f.read()
    exec(compile(source, path, "exec"), {"__name__": "__main__"})
except Exception:
    import traceback
    traceback.print_exc()
    os.write(verdict, b"0")
else:
    os.write(verdict, b"1")
"#;

const SHELL_HARNESS: &str = r#"set -e; . "$1"; printf 1 >&3"#;

/// Build the interpreter invocation for a code file
pub(super) fn command_for(runtime: &Runtime, code_path: &Path) -> SandboxResult<Command> {
    let (program, args): (&str, [&str; 2]) = match runtime {
        Runtime::Python { interpreter } => (interpreter.as_str(), ["-I", "-c"]),
        Runtime::Shell => ("sh", ["-c", SHELL_HARNESS]),
    };

    let mut cmd = Command::new(resolve_program(program)?);
    match runtime {
        Runtime::Python { .. } => {
            cmd.args(args).arg(PYTHON_HARNESS).arg(code_path);
        }
        Runtime::Shell => {
            // $0 then $1
            cmd.args(args).arg("sh").arg(code_path);
        }
    }
    Ok(cmd)
}

/// Resolve a bare program name against the parent's PATH.
///
/// The child runs with a minimal PATH, so the lookup has to happen here.
fn resolve_program(program: &str) -> SandboxResult<PathBuf> {
    if program.contains('/') {
        return Ok(PathBuf::from(program));
    }

    env::var_os("PATH")
        .iter()
        .flat_map(env::split_paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| SandboxError::SpawnFailed(format!("'{}' not found in PATH", program)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sh_resolves() {
        let path = resolve_program("sh").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("sh"));
    }

    #[test]
    fn test_explicit_path_is_kept() {
        let path = resolve_program("/opt/python/bin/python3").unwrap();
        assert_eq!(path, PathBuf::from("/opt/python/bin/python3"));
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let err = resolve_program("definitely-not-an-interpreter-x9").unwrap_err();
        assert!(matches!(err, SandboxError::SpawnFailed(_)));
    }

    #[test]
    fn test_python_command_line() {
        let cmd = command_for(&Runtime::python("sh"), Path::new("/tmp/program.py")).unwrap();
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args[0], "-I");
        assert_eq!(args[1], "-c");
        assert_eq!(args[3], "/tmp/program.py");
    }

    #[test]
    fn test_python_harness_releases_report_fd() {
        let release = PYTHON_HARNESS.find("os.close(3)").unwrap();
        let run = PYTHON_HARNESS.find("exec(").unwrap();
        assert!(release < run);
        assert!(!PYTHON_HARNESS.contains("os.write(3"));
    }
}
