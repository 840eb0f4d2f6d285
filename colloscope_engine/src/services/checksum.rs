//! Checksum calculation for colloscope source deduplication.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw source bytes.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_of_empty_source() {
        assert_eq!(
            calculate_checksum(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_checksum_tracks_single_byte_changes() {
        let before = calculate_checksum(b"Maths,M. X,lundi,8h,B204,1\n");
        let after = calculate_checksum(b"Maths,M. X,lundi,8h,B204,2\n");
        assert_ne!(before, after);
        assert_eq!(before, calculate_checksum(b"Maths,M. X,lundi,8h,B204,1\n"));
    }
}
