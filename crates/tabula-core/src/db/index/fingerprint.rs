use crate::db::table::IndexData;
use sha2::{Digest, Sha256};

impl IndexData {
    /// SHA-256 over every key in map order, each prefixed by its byte length.
    ///
    /// Equal fingerprints mean equal key sets under equal layouts; values are
    /// excluded since secondary index values are always empty.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for key in self.map().keys() {
            let bytes = key.as_bytes();
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }

        hasher.finalize().into()
    }
}
