//! Field-native mixing, the sponge used for per-tab roots, and the
//! binary Merkle aggregation over tabs.

use crate::constants::poseidon_config;
use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{PoseidonConfig, PoseidonSponge};
use ark_crypto_primitives::sponge::CryptographicSponge;
use ark_ff::{One, Zero};

/// Two-to-one compression over the scalar field.
///
/// The whole pipeline is written against this trait so the mixing
/// function can be swapped without touching callers. Order matters:
/// `mix2(a, b)` and `mix2(b, a)` differ in general.
pub trait Mixer: Send + Sync {
    fn mix2(&self, a: Fr, b: Fr) -> Fr;
}

/// Placeholder linear mixer: `7a + 11b + 1 (mod P)`.
///
/// NOT collision-resistant. It stands in for an arithmetic-circuit
/// friendly hash so the encoding and aggregation contract can be pinned
/// down with cheap test vectors. Deployments that need real security
/// must use [`PoseidonMixer`] (or another vetted algebraic hash) on both
/// the host and the circuit side.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearMixer;

impl Mixer for LinearMixer {
    fn mix2(&self, a: Fr, b: Fr) -> Fr {
        a * Fr::from(7u64) + b * Fr::from(11u64) + Fr::one()
    }
}

/// Poseidon-backed mixer over BN254::Fr (width-3 sponge, rate 2).
#[derive(Clone)]
pub struct PoseidonMixer {
    cfg: PoseidonConfig<Fr>,
}

impl PoseidonMixer {
    pub fn new() -> Self {
        Self {
            cfg: poseidon_config(),
        }
    }
}

impl Default for PoseidonMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer for PoseidonMixer {
    fn mix2(&self, a: Fr, b: Fr) -> Fr {
        let mut sponge = PoseidonSponge::<Fr>::new(&self.cfg);
        sponge.absorb(&[a, b].as_slice());
        sponge.squeeze_field_elements(1)[0]
    }
}

/// Derives tab roots and the file root from a pluggable mixer.
#[derive(Clone, Debug, Default)]
pub struct CommitmentHasher<M: Mixer = LinearMixer> {
    mixer: M,
}

impl<M: Mixer> CommitmentHasher<M> {
    pub fn new(mixer: M) -> Self {
        Self { mixer }
    }

    pub fn mix2(&self, a: Fr, b: Fr) -> Fr {
        self.mixer.mix2(a, b)
    }

    /// Absorb a string's UTF-8 bytes one at a time from a zero state.
    ///
    /// Used for name digests, independent of the 31-byte field packing.
    pub fn mix_string(&self, s: &str) -> Fr {
        s.bytes()
            .fold(Fr::zero(), |acc, byte| self.mixer.mix2(acc, Fr::from(byte as u64)))
    }

    /// Sponge absorption of a tab's packed chunks. Zero chunks hash to 0.
    pub fn tab_root(&self, chunks: &[Fr]) -> Fr {
        chunks
            .iter()
            .fold(Fr::zero(), |acc, chunk| self.mixer.mix2(acc, *chunk))
    }

    /// Merkle leaf for one tab: `mix2(mix_string(name), root)`.
    pub fn tab_leaf(&self, name: &str, root: Fr) -> Fr {
        self.mixer.mix2(self.mix_string(name), root)
    }

    /// Binary Merkle root over the given leaves.
    ///
    /// Empty input hashes to 0 and a single leaf is returned unchanged.
    /// An unpaired node at the end of a level is promoted unchanged to
    /// the next level, not duplicated or re-hashed; the external circuit
    /// reproduces exactly this shape for odd counts.
    pub fn merkle_root(&self, leaves: &[Fr]) -> Fr {
        if leaves.is_empty() {
            return Fr::zero();
        }
        let mut level = leaves.to_vec();
        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| match pair {
                    [x, y] => self.mixer.mix2(*x, *y),
                    [x] => *x,
                    _ => unreachable!("chunks(2) yields one- or two-element slices"),
                })
                .collect();
        }
        level[0]
    }

    /// File root over `(name, root)` pairs in caller order. Permuting
    /// the tabs changes the result.
    pub fn file_root<'a>(&self, tabs: impl IntoIterator<Item = (&'a str, Fr)>) -> Fr {
        let leaves: Vec<Fr> = tabs
            .into_iter()
            .map(|(name, root)| self.tab_leaf(name, root))
            .collect();
        self.merkle_root(&leaves)
    }

    /// Chains name digests in order, locking the declared tab ordering
    /// into the public witness so a verifier can detect reordering.
    pub fn tab_names_hash<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Fr {
        names
            .into_iter()
            .fold(Fr::zero(), |acc, name| self.mixer.mix2(acc, self.mix_string(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CommitmentHasher {
        CommitmentHasher::default()
    }

    #[test]
    fn mix2_literal_vector() {
        let h = hasher();
        assert_eq!(h.mix2(Fr::from(1u64), Fr::from(2u64)), Fr::from(30u64));
        assert_ne!(
            h.mix2(Fr::from(1u64), Fr::from(2u64)),
            h.mix2(Fr::from(2u64), Fr::from(1u64))
        );
    }

    #[test]
    fn mix_string_absorbs_bytes_in_order() {
        let h = hasher();
        // "ab": mix2(0, 97) = 1068, mix2(1068, 98) = 7476 + 1078 + 1.
        assert_eq!(h.mix_string("ab"), Fr::from(8555u64));
        assert_eq!(h.mix_string(""), Fr::zero());
        assert_ne!(h.mix_string("ab"), h.mix_string("ba"));
    }

    #[test]
    fn tab_root_sponge() {
        let h = hasher();
        assert_eq!(h.tab_root(&[]), Fr::zero());
        // Single chunk: mix2(0, c).
        assert_eq!(h.tab_root(&[Fr::from(2u64)]), Fr::from(23u64));
    }

    #[test]
    fn merkle_identities() {
        let h = hasher();
        assert_eq!(h.merkle_root(&[]), Fr::zero());
        let x = Fr::from(123456u64);
        assert_eq!(h.merkle_root(&[x]), x);
    }

    #[test]
    fn odd_leaf_is_promoted_unchanged() {
        let h = hasher();
        let leaves = [Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];
        // Level 1 is [mix2(1,2)=30, 3]; root = mix2(30,3) = 210 + 33 + 1.
        assert_eq!(h.merkle_root(&leaves), Fr::from(244u64));
    }

    #[test]
    fn file_root_is_order_sensitive() {
        let h = hasher();
        let a = ("Revenue", Fr::from(1u64));
        let b = ("Costs", Fr::from(2u64));
        assert_ne!(h.file_root([a, b]), h.file_root([b, a]));
    }

    #[test]
    fn tab_names_hash_locks_ordering() {
        let h = hasher();
        assert_ne!(h.tab_names_hash(["A", "B"]), h.tab_names_hash(["B", "A"]));
        assert_eq!(h.tab_names_hash([]), Fr::zero());
    }

    #[test]
    fn poseidon_mixer_is_deterministic_and_order_sensitive() {
        let m = PoseidonMixer::new();
        let (a, b) = (Fr::from(3u64), Fr::from(4u64));
        assert_eq!(m.mix2(a, b), m.mix2(a, b));
        assert_ne!(m.mix2(a, b), m.mix2(b, a));
    }

    #[test]
    fn pipeline_works_with_either_mixer() {
        let leaves = [Fr::from(5u64), Fr::from(6u64)];
        let linear = CommitmentHasher::new(LinearMixer).merkle_root(&leaves);
        let poseidon = CommitmentHasher::new(PoseidonMixer::new()).merkle_root(&leaves);
        assert_ne!(linear, poseidon);
    }
}
