//! Serialized submission of prove/verify jobs.
//!
//! The external tool's working directory admits one job at a time, so
//! jobs queue FIFO on a channel drained by a single worker task. Each
//! caller awaits a oneshot for its own result: a failed job fails only
//! its caller, and the worker moves on to the next job. There is no
//! timeout and no cancellation of an in-flight job; a caller that stops
//! waiting does not kill the underlying process.

use crate::errors::ProverError;
use crate::tool::ProvingTool;
use commitment::commit::FileCommitment;
use commitment::hash::{CommitmentHasher, LinearMixer, Mixer};
use commitment::witness::{self, PublicInputs, Witness};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// A generated proof: raw bytes, the path where it was persisted, and
/// its content hash.
#[derive(Clone, Debug)]
pub struct ProofArtifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub proof_hash: String,
}

/// Content fingerprint of a proof: `0x`-prefixed SHA-256 of its bytes.
///
/// This is transport hashing for the anchoring collaborator, not the
/// field-native mixing function.
pub fn compute_proof_hash(proof: &[u8]) -> String {
    let digest = Sha256::digest(proof);
    format!("0x{}", hex::encode(digest))
}

enum Job {
    Prove {
        witness: Witness,
        reply: oneshot::Sender<Result<Vec<u8>, ProverError>>,
    },
    Verify {
        public: PublicInputs,
        proof: Vec<u8>,
        reply: oneshot::Sender<Result<bool, ProverError>>,
    },
}

/// Owns the job queue and the output directory for proof artifacts.
pub struct ProofOrchestrator<M: Mixer = LinearMixer> {
    hasher: CommitmentHasher<M>,
    out_dir: PathBuf,
    jobs: mpsc::UnboundedSender<Job>,
}

impl<M: Mixer> ProofOrchestrator<M> {
    /// Spawn the queue worker around an injected tool.
    pub fn new<T: ProvingTool>(
        hasher: CommitmentHasher<M>,
        tool: T,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        let (jobs, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_queue(rx, Arc::new(tool)));
        Self {
            hasher,
            out_dir: out_dir.into(),
            jobs,
        }
    }

    /// Queue a proof job.
    ///
    /// Resolves after every previously submitted job has finished; the
    /// external tool is never invoked concurrently. The proof is
    /// persisted to `<out_dir>/file.proof` before returning.
    pub async fn submit(&self, witness: Witness) -> Result<ProofArtifact, ProverError> {
        let (reply, rx) = oneshot::channel();
        info!(tab_count = witness.public.tab_count, "queueing prove job");
        self.jobs
            .send(Job::Prove { witness, reply })
            .map_err(|_| ProverError::QueueClosed)?;
        let bytes = rx.await.map_err(|_| ProverError::QueueClosed)??;

        fs::create_dir_all(&self.out_dir).map_err(|source| ProverError::Io {
            path: self.out_dir.clone(),
            source,
        })?;
        let path = self.out_dir.join("file.proof");
        fs::write(&path, &bytes).map_err(|source| ProverError::Io {
            path: path.clone(),
            source,
        })?;

        let proof_hash = compute_proof_hash(&bytes);
        info!(path = %path.display(), %proof_hash, "proof persisted");
        Ok(ProofArtifact {
            path,
            bytes,
            proof_hash,
        })
    }

    /// Queue a verification of an artifact against a commitment's
    /// public inputs.
    pub async fn submit_verify(
        &self,
        file_commitment: &FileCommitment,
        artifact: &ProofArtifact,
    ) -> Result<bool, ProverError> {
        let public = witness::public_inputs(&self.hasher, file_commitment)?;
        let (reply, rx) = oneshot::channel();
        info!(proof_hash = %artifact.proof_hash, "queueing verify job");
        self.jobs
            .send(Job::Verify {
                public,
                proof: artifact.bytes.clone(),
                reply,
            })
            .map_err(|_| ProverError::QueueClosed)?;
        rx.await.map_err(|_| ProverError::QueueClosed)?
    }
}

/// Single worker: drains jobs strictly in submission order and runs each
/// blocking tool call to completion before taking the next.
async fn run_queue<T: ProvingTool>(mut rx: mpsc::UnboundedReceiver<Job>, tool: Arc<T>) {
    while let Some(job) = rx.recv().await {
        match job {
            Job::Prove { witness, reply } => {
                let tool = tool.clone();
                let result = tokio::task::spawn_blocking(move || tool.prove(&witness))
                    .await
                    .unwrap_or_else(|e| {
                        Err(ProverError::ExternalTool(format!("prove task panicked: {e}")))
                    });
                if reply.send(result).is_err() {
                    warn!("prove job finished but its caller went away");
                }
            }
            Job::Verify { public, proof, reply } => {
                let tool = tool.clone();
                let result =
                    tokio::task::spawn_blocking(move || tool.verify(&public, &proof))
                        .await
                        .unwrap_or_else(|e| {
                            Err(ProverError::ExternalTool(format!(
                                "verify task panicked: {e}"
                            )))
                        });
                if reply.send(result).is_err() {
                    warn!("verify job finished but its caller went away");
                }
            }
        }
    }
}
