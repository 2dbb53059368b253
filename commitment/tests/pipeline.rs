//! End-to-end commit scenario: two tabs, commit, persist, reload, and
//! assemble a witness, twice, byte-for-byte identical.

use commitment::canonical::Cell;
use commitment::commit::commit_file;
use commitment::constants::{MAX_CHUNKS_PER_TAB, MAX_TABS};
use commitment::hash::{CommitmentHasher, LinearMixer};
use commitment::store;
use commitment::witness::build_witness;
use std::fs;

fn sample_tabs() -> Vec<(String, Vec<Vec<Cell>>)> {
    let grid_1 = vec![
        vec![Cell::Text("Account".into()), Cell::Text("Balance".into())],
        vec![Cell::Text("Operating".into()), Cell::Float(10250.504)],
        vec![Cell::Text("Reserve".into()), Cell::Int(5000)],
    ];
    let grid_2 = vec![
        vec![Cell::Text("Category".into()), Cell::Text("Total".into())],
        vec![Cell::Text("Operating".into()), Cell::Float(10250.504)],
        vec![Cell::Text("Reserve".into()), Cell::Int(5000)],
    ];
    vec![
        ("Sample_Tab_1".to_string(), grid_1),
        ("Sample_Tab_2".to_string(), grid_2),
    ]
}

#[test]
fn commit_is_reproducible_byte_for_byte() {
    let hasher = CommitmentHasher::new(LinearMixer);
    let tabs = sample_tabs();

    let (first, first_preimages) = commit_file(&hasher, &tabs);
    let (second, second_preimages) = commit_file(&hasher, &tabs);

    // Same input, same commitment, same preimages.
    assert_eq!(first, second);
    assert_eq!(first_preimages, second_preimages);

    // The two tabs differ only in headers, which is enough for distinct
    // roots, aggregated under one file root.
    assert_ne!(first.tabs[0].root, first.tabs[1].root);

    // Persisted artifacts are identical across runs as well.
    let dir = tempfile::tempdir().unwrap();
    for (run, (commitment, preimages)) in [
        (&first, &first_preimages),
        (&second, &second_preimages),
    ]
    .into_iter()
    .enumerate()
    {
        let run_dir = dir.path().join(format!("run{run}"));
        fs::create_dir_all(&run_dir).unwrap();
        store::save_tab_roots(&run_dir.join("tabRoots.json"), "sample.xlsx", commitment)
            .unwrap();
        for tab in &commitment.tabs {
            store::save_preimage(&run_dir, &tab.name, &preimages[&tab.name]).unwrap();
        }
    }
    for name in [
        "tabRoots.json",
        "Sample_Tab_1_preimage.json",
        "Sample_Tab_2_preimage.json",
    ] {
        let a = fs::read(dir.path().join("run0").join(name)).unwrap();
        let b = fs::read(dir.path().join("run1").join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn reloaded_preimages_still_assemble_the_witness() {
    let hasher = CommitmentHasher::new(LinearMixer);
    let (commitment, preimages) = commit_file(&hasher, &sample_tabs());

    let dir = tempfile::tempdir().unwrap();
    store::save_tab_roots(&dir.path().join("tabRoots.json"), "sample.xlsx", &commitment)
        .unwrap();
    for tab in &commitment.tabs {
        store::save_preimage(dir.path(), &tab.name, &preimages[&tab.name]).unwrap();
    }

    let reloaded = store::load_tab_roots(&dir.path().join("tabRoots.json")).unwrap();
    let mut reloaded_preimages = std::collections::HashMap::new();
    for tab in &reloaded.commitment.tabs {
        reloaded_preimages.insert(
            tab.name.clone(),
            store::load_preimage(dir.path(), &tab.name).unwrap(),
        );
    }

    let from_memory = build_witness(&hasher, &commitment, &preimages).unwrap();
    let from_disk =
        build_witness(&hasher, &reloaded.commitment, &reloaded_preimages).unwrap();
    assert_eq!(from_memory, from_disk);

    assert_eq!(from_disk.public.tab_roots.len(), MAX_TABS);
    for slot in &from_disk.tab_preimages {
        assert!(slot.chunk_count <= MAX_CHUNKS_PER_TAB);
        assert_eq!(slot.chunks.len(), MAX_CHUNKS_PER_TAB);
    }

    // witness.json persists without error and parses back.
    let witness_path = dir.path().join("witness.json");
    store::save_witness(&witness_path, &from_disk).unwrap();
    let raw: serde_json::Value =
        serde_json::from_slice(&fs::read(&witness_path).unwrap()).unwrap();
    assert_eq!(raw["public"]["tab_count"], 2);
}
