//! Persisted JSON artifacts shared with the external proving tool.
//!
//! All field elements cross these files as base-10 decimal strings. The
//! single-job-at-a-time discipline in the orchestrator means each file is
//! written once per run and only read afterwards.

use crate::commit::FileCommitment;
use crate::encode::FieldChunks;
use crate::errors::CommitError;
use crate::witness::Witness;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `tabRoots.json`: the commitment plus the source path it
/// was computed from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabRootsFile {
    pub file_path: String,
    #[serde(flatten)]
    pub commitment: FileCommitment,
}

pub fn save_tab_roots(
    path: &Path,
    file_path: &str,
    commitment: &FileCommitment,
) -> Result<(), CommitError> {
    let data = TabRootsFile {
        file_path: file_path.to_string(),
        commitment: commitment.clone(),
    };
    let json = serde_json::to_vec_pretty(&data)?;
    fs::write(path, json).map_err(|source| CommitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_tab_roots(path: &Path) -> Result<TabRootsFile, CommitError> {
    let bytes = fs::read(path).map_err(|source| CommitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// File name for a tab's preimage. Runs of whitespace in the tab name
/// collapse to a single underscore.
pub fn preimage_file_name(tab_name: &str) -> String {
    let mut safe = String::with_capacity(tab_name.len());
    let mut in_whitespace = false;
    for c in tab_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                safe.push('_');
            }
            in_whitespace = true;
        } else {
            safe.push(c);
            in_whitespace = false;
        }
    }
    format!("{safe}_preimage.json")
}

pub fn save_preimage(
    dir: &Path,
    tab_name: &str,
    preimage: &FieldChunks,
) -> Result<PathBuf, CommitError> {
    let path = dir.join(preimage_file_name(tab_name));
    let json = serde_json::to_vec_pretty(preimage)?;
    fs::write(&path, json).map_err(|source| CommitError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn load_preimage(dir: &Path, tab_name: &str) -> Result<FieldChunks, CommitError> {
    let path = dir.join(preimage_file_name(tab_name));
    let bytes = fs::read(&path).map_err(|source| CommitError::Io {
        path: path.clone(),
        source,
    })?;
    let preimage: FieldChunks = serde_json::from_slice(&bytes)?;
    if preimage.chunk_count != preimage.chunks.len() {
        return Err(CommitError::InvalidField(format!(
            "preimage for {tab_name:?} declares {} chunks but holds {}",
            preimage.chunk_count,
            preimage.chunks.len()
        )));
    }
    Ok(preimage)
}

pub fn save_witness(path: &Path, witness: &Witness) -> Result<(), CommitError> {
    let json = serde_json::to_vec_pretty(witness)?;
    fs::write(path, json).map_err(|source| CommitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::Cell;
    use crate::commit::commit_file;
    use crate::hash::{CommitmentHasher, LinearMixer};

    #[test]
    fn preimage_file_names_replace_whitespace() {
        assert_eq!(preimage_file_name("Balance"), "Balance_preimage.json");
        assert_eq!(
            preimage_file_name("Q1  Balance Sheet"),
            "Q1_Balance_Sheet_preimage.json"
        );
    }

    #[test]
    fn tab_roots_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let h = CommitmentHasher::new(LinearMixer);
        let tabs = vec![("Ledger".to_string(), vec![vec![Cell::Int(1)]])];
        let (commitment, _) = commit_file(&h, &tabs);

        let path = dir.path().join("tabRoots.json");
        save_tab_roots(&path, "books/2026.xlsx", &commitment).unwrap();

        let loaded = load_tab_roots(&path).unwrap();
        assert_eq!(loaded.file_path, "books/2026.xlsx");
        assert_eq!(loaded.commitment, commitment);

        // The on-disk shape is flat camelCase.
        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert!(raw["filePath"].is_string());
        assert!(raw["fileRoot"].is_string());
        assert!(raw["tabs"][0]["root"].is_string());
    }

    #[test]
    fn preimage_round_trip_validates_chunk_count() {
        let dir = tempfile::tempdir().unwrap();
        let preimage = FieldChunks::from_bytes(&[7u8; 40]);
        save_preimage(dir.path(), "Cash Flow", &preimage).unwrap();
        assert!(dir.path().join("Cash_Flow_preimage.json").exists());

        let loaded = load_preimage(dir.path(), "Cash Flow").unwrap();
        assert_eq!(loaded, preimage);

        // A corrupted count is rejected at load time.
        let lying = FieldChunks {
            chunk_count: 5,
            chunks: preimage.chunks.clone(),
        };
        let path = dir.path().join(preimage_file_name("Lying"));
        fs::write(&path, serde_json::to_vec(&lying).unwrap()).unwrap();
        assert!(matches!(
            load_preimage(dir.path(), "Lying"),
            Err(CommitError::InvalidField(_))
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        match load_preimage(dir.path(), "Ghost") {
            Err(CommitError::Io { path, .. }) => {
                assert!(path.ends_with("Ghost_preimage.json"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
