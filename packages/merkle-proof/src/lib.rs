//! Allowlist membership proofs.
//!
//! Leaves are `sha256(address)` and every inner node is the hash of its two
//! children concatenated in ascending byte order. Sorting the pair means a
//! proof is just the list of siblings from leaf to root, without left/right
//! flags. Off-chain tooling must build trees with the same rule (see
//! [`tree::MerkleTree`]) or every proof fails.

use sha2::{Digest, Sha256};
use thiserror::Error;

pub mod tree;

pub type Hash = [u8; 32];

#[derive(Error, Debug, PartialEq)]
pub enum MerkleError {
    #[error("Invalid hex hash: {0}")]
    InvalidHex(String),

    #[error("Invalid hash length: expected 32 bytes, got {length}")]
    InvalidLength { length: usize },
}

pub fn leaf_hash(address: &str) -> Hash {
    Sha256::digest(address.as_bytes()).into()
}

pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Recomputes the root from `leaf` and its sibling path and compares it with
/// `root`.
pub fn verify(root: &Hash, leaf: Hash, proof: &[Hash]) -> bool {
    let computed = proof
        .iter()
        .fold(leaf, |running, sibling| hash_pair(&running, sibling));
    &computed == root
}

pub fn decode_hash(encoded: &str) -> Result<Hash, MerkleError> {
    let bytes = hex::decode(encoded).map_err(|e| MerkleError::InvalidHex(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| MerkleError::InvalidLength {
            length: bytes.len(),
        })
}

pub fn encode_hash(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Hex flavour of [`verify`] for values that travel through JSON messages.
pub fn verify_hex(root: &str, address: &str, proof: &[String]) -> Result<bool, MerkleError> {
    let root = decode_hash(root)?;
    let proof = proof
        .iter()
        .map(|sibling| decode_hash(sibling))
        .collect::<Result<Vec<Hash>, MerkleError>>()?;
    Ok(verify(&root, leaf_hash(address), &proof))
}
