//! Helper for validating the companion ID redundancy check.

/// Whether `inverse` is the bitwise complement of the 16-bit `id`.
pub fn is_complement(id: u16, inverse: u16) -> bool {
    id == 0xFFFF ^ inverse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complements() {
        assert!(is_complement(0x1234, 0xEDCB));
        assert!(is_complement(0x0000, 0xFFFF));
        assert!(!is_complement(0x1234, 0x1234));
        assert!(!is_complement(0x1234, 0xEDCA));
    }
}
