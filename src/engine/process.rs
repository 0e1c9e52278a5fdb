use std::{
    io::Write as _,
    path::Path,
    process::{Command, Output, Stdio},
};

/// Run `cmd` to completion, optionally feeding `stdin`.
///
/// Returns a human-readable reason on spawn failure or non-zero exit; callers map it onto the
/// error variant of their stage.
pub(crate) fn run_checked(cmd: &mut Command, stdin: Option<&[u8]>) -> Result<Output, String> {
    tracing::debug!(command = ?cmd, "spawning external process");
    let program = cmd.get_program().to_string_lossy().into_owned();

    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| format!("failed to spawn '{program}' (is it installed and on PATH?): {e}"))?;

    let pipe = match stdin {
        Some(_) => Some(
            child
                .stdin
                .take()
                .ok_or_else(|| format!("failed to open '{program}' stdin (unexpected)"))?,
        ),
        None => None,
    };

    // Feed stdin on its own thread while stdout/stderr drain.
    let (output, fed) = std::thread::scope(|s| {
        let feeder = s.spawn(move || -> std::io::Result<()> {
            if let (Some(mut pipe), Some(bytes)) = (pipe, stdin) {
                pipe.write_all(bytes)?;
            }
            Ok(())
        });
        let output = child.wait_with_output();
        let fed = feeder
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
        (output, fed)
    });
    let output = output.map_err(|e| format!("failed to wait for '{program}': {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "'{program}' exited with status {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    fed.map_err(|e| format!("failed to write to '{program}' stdin: {e}"))?;
    Ok(output)
}

/// Whether `program -version` (or `--version`) runs successfully.
pub fn is_on_path(program: &str) -> bool {
    ["-version", "--version"].iter().any(|flag| {
        Command::new(program)
            .arg(flag)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

/// Non-empty regular file check used after every external producer.
pub(crate) fn has_content(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
