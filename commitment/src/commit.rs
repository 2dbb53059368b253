//! The commit pipeline: canonical tab -> serialized bytes -> field
//! chunks -> tab root, then Merkle aggregation into the file root.

use crate::canonical::{CanonicalTab, Cell};
use crate::encode::{self, FieldChunks};
use crate::hash::{CommitmentHasher, Mixer};
use ark_bn254::Fr;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Commitment to a single tab, persisted alongside its preimage chunks
/// so the witness can be assembled later.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TabCommitment {
    pub name: String,
    #[serde(with = "encode::decimal")]
    pub root: Fr,
    pub chunk_count: usize,
}

/// One `(name, root)` entry of a file commitment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TabRootEntry {
    pub name: String,
    #[serde(with = "encode::decimal")]
    pub root: Fr,
}

/// Commitment over a whole file.
///
/// Tab order is part of the identity: permuting tabs changes
/// `file_root`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileCommitment {
    pub tabs: Vec<TabRootEntry>,
    #[serde(with = "encode::decimal")]
    pub file_root: Fr,
}

/// Commit a single tab: canonicalize, serialize, pack, sponge.
///
/// Pure and deterministic; any grid is representable, so there is no
/// error path.
pub fn commit_tab<M: Mixer>(
    hasher: &CommitmentHasher<M>,
    name: &str,
    grid: &[Vec<Cell>],
) -> (TabCommitment, FieldChunks) {
    let tab = CanonicalTab::new(name, grid);
    let preimage = FieldChunks::from_bytes(&tab.to_bytes());
    let root = hasher.tab_root(&preimage.chunks);
    (
        TabCommitment {
            name: name.to_string(),
            root,
            chunk_count: preimage.chunk_count,
        },
        preimage,
    )
}

/// Commit every tab in caller order and aggregate the file root.
///
/// Returns the file commitment plus each tab's preimage chunks, which
/// the witness assembler needs later.
pub fn commit_file<M: Mixer>(
    hasher: &CommitmentHasher<M>,
    tabs: &[(String, Vec<Vec<Cell>>)],
) -> (FileCommitment, HashMap<String, FieldChunks>) {
    let mut entries = Vec::with_capacity(tabs.len());
    let mut preimages = HashMap::with_capacity(tabs.len());

    for (name, grid) in tabs {
        let (tab_commitment, preimage) = commit_tab(hasher, name, grid);
        entries.push(TabRootEntry {
            name: tab_commitment.name,
            root: tab_commitment.root,
        });
        preimages.insert(name.clone(), preimage);
    }

    let file_root = hasher.file_root(entries.iter().map(|t| (t.name.as_str(), t.root)));
    (FileCommitment { tabs: entries, file_root }, preimages)
}
