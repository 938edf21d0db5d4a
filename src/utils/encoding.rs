//! Binary detection and text reading with encoding fallback.
//!
//! Reads try strict UTF-8 first, then an encoding guessed by `chardetng`,
//! and finally lossy UTF-8 so that include-all runs can still embed files
//! that are not valid text.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of header bytes inspected by [`is_binary_file`].
pub const BINARY_SAMPLE_SIZE: usize = 8192;

/// Detect if a file is binary (not text).
///
/// Uses two heuristics on the first `sample_size` bytes:
/// 1. Null byte check (strong binary indicator)
/// 2. Ratio of printable bytes (< 70% = likely binary)
///
/// Bytes >= 0x80 count as printable so UTF-8 text in other scripts is not
/// flagged. Unreadable files are reported as binary.
pub fn is_binary_file(path: &Path, sample_size: usize) -> bool {
    match read_sample(path, sample_size) {
        Ok(sample) => is_binary_sample(&sample),
        Err(_) => true,
    }
}

fn read_sample(path: &Path, sample_size: usize) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut sample = vec![0u8; sample_size];
    let bytes_read = file.read(&mut sample)?;
    sample.truncate(bytes_read);
    Ok(sample)
}

fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }

    // UTF-16 text carries NUL bytes, so its BOM is checked first
    if sample.starts_with(&[0xff, 0xfe]) || sample.starts_with(&[0xfe, 0xff]) {
        return false;
    }

    if sample.contains(&0) {
        return true;
    }

    let printable_count = sample
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || b >= 0x80 || b == 9 || b == 10 || b == 12 || b == 13)
        .count();

    (printable_count as f64 / sample.len() as f64) < 0.70
}

/// Read a whole file as text.
///
/// Strategy:
/// 1. Strict UTF-8 (a leading BOM is dropped)
/// 2. BOM-declared or `chardetng`-detected encoding
/// 3. UTF-8 with replacement characters
pub fn read_file_safe(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

fn decode_bytes(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(&[0xef, 0xbb, 0xbf]).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return text.to_string();
    }

    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_with_bom_removal(bytes);
        return decoded.into_owned();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if !had_errors {
        tracing::debug!("Decoded content as {}", encoding.name());
        return decoded.into_owned();
    }

    let (lossy, _, _) = UTF_8.decode(bytes);
    lossy.into_owned()
}
