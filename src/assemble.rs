//! Invocation of the external network assembler (`netconvert`) on the plain
//! XML artifacts. The assembler runs as a child process with captured
//! output; a non-zero exit is reported as a backend failure but leaves the
//! already-written artifacts intact.

use crate::compiler::{Error, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::process::Command;

/// Resolves the assembler binary: `$SUMO_HOME/bin/netconvert` when the
/// installation variable is set, else whatever `netconvert` the PATH finds.
pub fn netconvert_binary() -> PathBuf {
    match std::env::var_os("SUMO_HOME") {
        Some(home) => PathBuf::from(home).join("bin").join("netconvert"),
        None => PathBuf::from("netconvert"),
    }
}

/// Runs the assembler over `{prefix}.nod.xml` / `.edg.xml` / `.con.xml` and
/// produces `{prefix}.net.xml`.
pub fn run_netconvert(prefix: &str) -> Result<PathBuf> {
    let output_file = PathBuf::from(format!("{prefix}.net.xml"));

    let mut command = Command::new(netconvert_binary());
    command
        .arg("--node-files")
        .arg(format!("{prefix}.nod.xml"))
        .arg("--edge-files")
        .arg(format!("{prefix}.edg.xml"))
        .arg("--connection-files")
        .arg(format!("{prefix}.con.xml"))
        .arg("--output-file")
        .arg(&output_file)
        // Junction handling tuned for the single-node junctions we emit.
        .args(["--junctions.join", "true"])
        .args(["--junctions.join-dist", "10"])
        .args(["--junctions.corner-detail", "5"])
        .args(["--junctions.internal-link-detail", "5"])
        .args(["--junctions.limit-turn-speed", "5.5"])
        // Keep the sampled geometry as-is.
        .args(["--geometry.remove", "false"])
        .args(["--geometry.min-dist", "0.5"])
        .args(["--rectangular-lane-cut", "true"])
        .args(["--no-turnarounds", "true"])
        .args(["--no-internal-links", "false"])
        .args(["--check-lane-foes.all", "true"])
        .args(["--edges.join", "false"])
        .args(["--output.street-names", "true"])
        .args(["--output.original-names", "true"]);

    info!("running network assembler: {command:?}");
    let output = command.output()?;

    if !output.stdout.is_empty() {
        debug!("assembler stdout: {}", String::from_utf8_lossy(&output.stdout));
    }
    if !output.status.success() {
        return Err(Error::BackendFailure {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    info!("assembled network written to {}", output_file.display());
    Ok(output_file)
}
