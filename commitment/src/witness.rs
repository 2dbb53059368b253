//! Witness assembly: packs commitments (public) and preimage chunks
//! (private) into the fixed-capacity record the external circuit expects.

use crate::commit::FileCommitment;
use crate::constants::{MAX_CHUNKS_PER_TAB, MAX_TABS, TAB_NAME_WIDTH};
use crate::encode::{self, FieldChunks};
use crate::errors::CommitError;
use crate::hash::{CommitmentHasher, Mixer};
use ark_bn254::Fr;
use ark_ff::Zero;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Public inputs for the file-commitment circuit.
///
/// Field ordering MUST match the circuit's public-input allocation
/// order: file root, tab count, tab names hash, then the padded roots.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PublicInputs {
    #[serde(with = "encode::decimal")]
    pub file_root: Fr,
    pub tab_count: usize,
    #[serde(with = "encode::decimal")]
    pub tab_names_hash: Fr,
    /// Always `MAX_TABS` long; slots past `tab_count` hold zero.
    #[serde(with = "encode::decimal_vec")]
    pub tab_roots: Vec<Fr>,
}

/// A tab's private preimage slot, padded to the circuit's chunk
/// capacity. Unused tab slots carry `chunk_count = 0` and all zeros.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TabPreimage {
    pub chunk_count: usize,
    #[serde(with = "encode::decimal_vec")]
    pub chunks: Vec<Fr>,
}

impl TabPreimage {
    fn empty() -> Self {
        Self {
            chunk_count: 0,
            chunks: vec![Fr::zero(); MAX_CHUNKS_PER_TAB],
        }
    }
}

/// The full prover input: public commitments plus private preimages.
///
/// Built once per proof request and deterministic for a given commitment
/// and preimage set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Witness {
    pub public: PublicInputs,
    /// `MAX_TABS` names, each NUL-padded to `TAB_NAME_WIDTH` bytes.
    pub tab_names: Vec<String>,
    pub tab_preimages: Vec<TabPreimage>,
}

/// Public inputs derived from a commitment; verification reuses this
/// without touching the private preimages.
pub fn public_inputs<M: Mixer>(
    hasher: &CommitmentHasher<M>,
    commitment: &FileCommitment,
) -> Result<PublicInputs, CommitError> {
    if commitment.tabs.len() > MAX_TABS {
        return Err(CommitError::CapacityExceeded {
            what: "tab count",
            got: commitment.tabs.len(),
            limit: MAX_TABS,
        });
    }

    let tab_names_hash = hasher.tab_names_hash(commitment.tabs.iter().map(|t| t.name.as_str()));
    let mut tab_roots: Vec<Fr> = commitment.tabs.iter().map(|t| t.root).collect();
    tab_roots.resize(MAX_TABS, Fr::zero());

    Ok(PublicInputs {
        file_root: commitment.file_root,
        tab_count: commitment.tabs.len(),
        tab_names_hash,
        tab_roots,
    })
}

/// Assemble the witness for a committed file.
///
/// Fails with [`CommitError::TabNotFound`] when a committed tab has no
/// preimage entry, and with [`CommitError::CapacityExceeded`] when the
/// input exceeds the circuit's fixed capacities. Nothing is truncated
/// silently.
pub fn build_witness<M: Mixer>(
    hasher: &CommitmentHasher<M>,
    commitment: &FileCommitment,
    preimages: &HashMap<String, FieldChunks>,
) -> Result<Witness, CommitError> {
    let public = public_inputs(hasher, commitment)?;

    let mut tab_names = Vec::with_capacity(MAX_TABS);
    let mut tab_preimages = Vec::with_capacity(MAX_TABS);

    for tab in &commitment.tabs {
        if tab.name.len() > TAB_NAME_WIDTH {
            return Err(CommitError::CapacityExceeded {
                what: "tab name bytes",
                got: tab.name.len(),
                limit: TAB_NAME_WIDTH,
            });
        }

        let preimage = preimages
            .get(&tab.name)
            .ok_or_else(|| CommitError::TabNotFound(tab.name.clone()))?;
        if preimage.chunk_count > MAX_CHUNKS_PER_TAB {
            return Err(CommitError::CapacityExceeded {
                what: "preimage chunks",
                got: preimage.chunk_count,
                limit: MAX_CHUNKS_PER_TAB,
            });
        }

        let mut name = tab.name.clone();
        while name.len() < TAB_NAME_WIDTH {
            name.push('\0');
        }
        tab_names.push(name);

        let mut chunks = preimage.chunks.clone();
        chunks.resize(MAX_CHUNKS_PER_TAB, Fr::zero());
        tab_preimages.push(TabPreimage {
            chunk_count: preimage.chunk_count,
            chunks,
        });
    }

    tab_names.resize(MAX_TABS, "\0".repeat(TAB_NAME_WIDTH));
    tab_preimages.resize(MAX_TABS, TabPreimage::empty());

    Ok(Witness {
        public,
        tab_names,
        tab_preimages,
    })
}
