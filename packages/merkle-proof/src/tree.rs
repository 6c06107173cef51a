use crate::{hash_pair, leaf_hash, Hash};

/// Tree builder matching [`crate::verify`]. A node without a sibling is
/// promoted to the next layer unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<Hash>) -> Self {
        let mut layers = vec![leaves];
        while layers[layers.len() - 1].len() > 1 {
            let next = layers[layers.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two items"),
                })
                .collect();
            layers.push(next);
        }
        MerkleTree { layers }
    }

    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            addresses
                .into_iter()
                .map(|address| leaf_hash(address.as_ref()))
                .collect(),
        )
    }

    pub fn root(&self) -> Option<Hash> {
        self.layers.last().and_then(|layer| layer.first()).copied()
    }

    pub fn proof(&self, index: usize) -> Option<Vec<Hash>> {
        if index >= self.layers[0].len() {
            return None;
        }
        let mut proof = Vec::new();
        let mut position = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = position ^ 1;
            if let Some(hash) = layer.get(sibling) {
                proof.push(*hash);
            }
            position /= 2;
        }
        Some(proof)
    }

    pub fn proof_for_address(&self, address: &str) -> Option<Vec<Hash>> {
        let leaf = leaf_hash(address);
        let index = self.layers[0].iter().position(|hash| *hash == leaf)?;
        self.proof(index)
    }
}
