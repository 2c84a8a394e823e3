use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

/// Byte length of the text's UTF-8 encoding after zlib compression at the
/// default level. A complexity proxy: repetitive text compresses small, and
/// the value is the same integer on every call for the same text.
pub fn compressed_len(text: &str) -> std::io::Result<u64> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(compressed.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let text = "Some sampled text with a little structure in it.";
        assert_eq!(
            compressed_len(text).unwrap(),
            compressed_len(text).unwrap()
        );
    }

    #[test]
    fn test_repetition_compresses_smaller() {
        let repetitive = "spam ".repeat(60);
        let varied: String = (0..300)
            .map(|i| char::from(b'!' + ((i * 17 + i / 7) % 90) as u8))
            .collect();
        assert_eq!(repetitive.len(), varied.len());
        let a = compressed_len(&repetitive).unwrap();
        let b = compressed_len(&varied).unwrap();
        assert!(a < b, "repetitive {a} vs varied {b}");
    }

    #[test]
    fn test_empty_text_still_has_header_bytes() {
        // zlib wraps even an empty stream in a header and checksum.
        assert!(compressed_len("").unwrap() > 0);
    }
}
