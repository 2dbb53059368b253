//! Boundary to the external proving/verifying tool.
//!
//! The tool operates on one shared working directory and cannot run two
//! instances against it concurrently; the orchestrator guarantees
//! exclusive access. Implementations are blocking and are driven from
//! `spawn_blocking` by the queue worker.

use crate::errors::ProverError;
use commitment::witness::{PublicInputs, Witness};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// External prove/verify boundary, injected into the orchestrator so
/// tests can substitute a fake.
pub trait ProvingTool: Send + Sync + 'static {
    /// Produce proof bytes for a witness. Blocking.
    fn prove(&self, witness: &Witness) -> Result<Vec<u8>, ProverError>;

    /// Check a proof against public inputs. A clean "does not verify"
    /// is `Ok(false)`; tool malfunctions are `Err`.
    fn verify(&self, public: &PublicInputs, proof: &[u8]) -> Result<bool, ProverError>;
}

/// Where `nargo prove` deposits its proof, relative to the tool dir.
const PROOF_RELATIVE_PATH: &str = "proofs/file_commit.proof";

/// Drives `nargo` against a shared circuit directory.
pub struct NargoTool {
    tool_dir: PathBuf,
}

impl NargoTool {
    pub fn new(tool_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool_dir: tool_dir.into(),
        }
    }

    fn write(&self, relative: &str, bytes: &[u8]) -> Result<PathBuf, ProverError> {
        let path = self.tool_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ProverError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, bytes).map_err(|source| ProverError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn run(&self, subcommand: &str) -> Result<std::process::Output, ProverError> {
        debug!(subcommand, dir = %self.tool_dir.display(), "running nargo");
        Command::new("nargo")
            .arg(subcommand)
            .current_dir(&self.tool_dir)
            .output()
            .map_err(|e| {
                ProverError::ExternalTool(format!("failed to launch nargo {subcommand}: {e}"))
            })
    }
}

impl ProvingTool for NargoTool {
    fn prove(&self, witness: &Witness) -> Result<Vec<u8>, ProverError> {
        let json = serde_json::to_vec_pretty(witness)?;
        self.write("witness.json", &json)?;

        let output = self.run("prove")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProverError::ExternalTool(format!(
                "nargo prove exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let proof_path = self.tool_dir.join(PROOF_RELATIVE_PATH);
        if !proof_path.exists() {
            return Err(ProverError::ProofArtifactMissing(proof_path));
        }
        let bytes = fs::read(&proof_path).map_err(|source| ProverError::Io {
            path: proof_path.clone(),
            source,
        })?;
        info!(proof = %proof_path.display(), bytes = bytes.len(), "nargo prove completed");
        Ok(bytes)
    }

    fn verify(&self, public: &PublicInputs, proof: &[u8]) -> Result<bool, ProverError> {
        self.write(PROOF_RELATIVE_PATH, proof)?;
        let json = serde_json::to_vec_pretty(public)?;
        self.write("public_inputs.json", &json)?;

        let output = self.run("verify")?;
        if !output.status.success() {
            debug!(status = %output.status, "nargo verify rejected the proof");
            return Ok(false);
        }
        Ok(true)
    }
}
