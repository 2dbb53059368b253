//! Byte-to-field packing and the decimal-string transport encoding for
//! field elements.

use crate::constants::BYTES_PER_FIELD;
use crate::errors::CommitError;
use ark_bn254::Fr;
use ark_ff::PrimeField;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Pack bytes into field elements, 31 bytes per element.
///
/// Each consecutive slice is read as a big-endian unsigned integer; the
/// final slice is interpreted over its actual length, not zero-padded.
/// 248 bits sits below the BN254 scalar modulus, so every element is
/// canonical and no reduction ever happens. Empty input yields an empty
/// sequence.
pub fn pack_bytes_to_fields(bytes: &[u8]) -> Vec<Fr> {
    bytes
        .chunks(BYTES_PER_FIELD)
        .map(Fr::from_be_bytes_mod_order)
        .collect()
}

/// A tab's packed preimage, persisted as `<name>_preimage.json`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldChunks {
    pub chunk_count: usize,
    #[serde(with = "decimal_vec")]
    pub chunks: Vec<Fr>,
}

impl FieldChunks {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let chunks = pack_bytes_to_fields(bytes);
        Self {
            chunk_count: chunks.len(),
            chunks,
        }
    }
}

/// Parse a base-10 decimal string into a field element.
///
/// Rejects anything that is not a plain non-negative decimal strictly
/// below the modulus; out-of-range values are never silently reduced.
pub fn field_from_decimal(s: &str) -> Result<Fr, CommitError> {
    let n: BigUint = s
        .parse()
        .map_err(|_| CommitError::InvalidField(format!("not a non-negative decimal: {s:?}")))?;
    if n >= BigUint::from(Fr::MODULUS) {
        return Err(CommitError::InvalidField(format!(
            "value {s} is not below the field modulus"
        )));
    }
    Ok(Fr::from(n))
}

/// Canonical base-10 string of a field element.
pub fn field_to_decimal(x: &Fr) -> String {
    BigUint::from(x.into_bigint()).to_string()
}

/// Serde helper: one field element as a decimal string.
///
/// Field elements cross every JSON boundary as base-10 strings so that
/// consumers without native big integers never lose precision.
pub mod decimal {
    use super::*;
    use serde::de::Error;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(x: &Fr, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&field_to_decimal(x))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Fr, D::Error> {
        let s = String::deserialize(d)?;
        field_from_decimal(&s).map_err(Error::custom)
    }
}

/// Serde helper: a sequence of field elements as decimal strings.
pub mod decimal_vec {
    use super::*;
    use serde::de::Error;
    use serde::ser::SerializeSeq;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(xs: &[Fr], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(xs.len()))?;
        for x in xs {
            seq.serialize_element(&field_to_decimal(x))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Fr>, D::Error> {
        let strings = Vec::<String>::deserialize(d)?;
        strings
            .iter()
            .map(|s| field_from_decimal(s).map_err(Error::custom))
            .collect()
    }
}
