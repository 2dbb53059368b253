//! Crate-wide constants shared by the commitment pipeline, the witness
//! assembler, and the external circuit's fixed-capacity layout.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{find_poseidon_ark_and_mds, PoseidonConfig};
use ark_ff::PrimeField;

/// Maximum number of tabs one file commitment may cover.
///
/// Fixed by the external circuit's public-input layout; the witness
/// assembler zero-pads up to this count and rejects anything beyond it.
pub const MAX_TABS: usize = 16;

/// Maximum number of packed field chunks per tab preimage.
pub const MAX_CHUNKS_PER_TAB: usize = 100;

/// Fixed byte width of one tab-name slot in the private witness. Names
/// are right-padded with NUL bytes.
pub const TAB_NAME_WIDTH: usize = 32;

/// Bytes packed into one field element. 31 bytes (248 bits) always fall
/// below the BN254 scalar modulus, so packed values are canonical by
/// construction.
pub const BYTES_PER_FIELD: usize = 31;

// Poseidon sponge configuration for the Poseidon mixer backend.
//
// We use a width-3 sponge (rate=2, capacity=1) to efficiently absorb pairs
// of field elements. The specific round counts chosen here are consistent
// with widely used Poseidon instantiations.
//
// NOTE: This is a prototype. For production, parameters should be reviewed
// by cryptographers and ideally fixed via audited constants / standard sets.
pub const POSEIDON_RATE: usize = 2;
pub const POSEIDON_CAPACITY: usize = 1;

// Typical Poseidon parameters for width=3.
pub const POSEIDON_FULL_ROUNDS: usize = 8;
pub const POSEIDON_PARTIAL_ROUNDS: usize = 57;

/// Poseidon S-box exponent (alpha). Common choices are 5 or 17.
pub const POSEIDON_ALPHA: u64 = 5;

/// Deterministically derive Poseidon parameters for BN254::Fr.
///
/// This uses arkworks' parameter derivation helper (Ark + MDS) so the
/// host-side mixer and any in-circuit gadget agree on the same constants.
pub fn poseidon_config() -> PoseidonConfig<Fr> {
    // The helper expects the prime field size in bits.
    let prime_bits = Fr::MODULUS_BIT_SIZE as u64;

    // Derive the round constants (ARK) and MDS matrix.
    let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
        prime_bits,
        POSEIDON_RATE,
        POSEIDON_FULL_ROUNDS as u64,
        POSEIDON_PARTIAL_ROUNDS as u64,
        0,
    );

    PoseidonConfig::new(
        POSEIDON_FULL_ROUNDS,
        POSEIDON_PARTIAL_ROUNDS,
        POSEIDON_ALPHA,
        mds,
        ark,
        POSEIDON_RATE,
        POSEIDON_CAPACITY,
    )
}
