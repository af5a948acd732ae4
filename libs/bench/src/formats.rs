//! File format readers for range-filtered ANN benchmark datasets.
//!
//! ## Binary formats (little-endian)
//!
//! ### fvecs (float vectors)
//! Each record: 4 bytes (dim as i32) + dim * 4 bytes (f32 values).
//!
//! ### ivecs (integer vectors)
//! Each record: 4 bytes (dim as i32) + dim * 4 bytes (i32 values).
//! Used for ground-truth neighbor indices.
//!
//! The binary readers degrade rather than fail: an unopenable file
//! yields a logged warning and an empty result, and a record whose
//! declared payload cannot be fully read terminates the scan silently,
//! dropping the partial record. A zero dimension decodes as an empty
//! record; a negative one ends the scan like a truncated tail.
//! Truncated input is caught downstream by the size checks in
//! [`crate::dataset::BenchmarkData::load`].
//!
//! ## Text formats
//!
//! - one integer per line (database attributes)
//! - `A-B` inclusive range per line (query attribute ranges)
//! - comma-separated integers per line, empty tokens skipped
//!
//! Text readers are strict: any violation is a hard error carrying the
//! 1-based line number, and an unopenable file is a hard error too.

use anyhow::{anyhow, bail, Context, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

use crate::dataset::AttributeRange;

// ============================================================================
// Binary Readers
// ============================================================================

/// Read all vectors from an fvecs file.
///
/// Returns an empty vec (with a logged warning) if the file cannot be
/// opened, and stops silently at the first incomplete record.
pub fn read_fvecs(path: &Path) -> Vec<Vec<f32>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Unable to open fvecs file {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    let mut reader = BufReader::new(file);

    let mut vectors = Vec::new();
    loop {
        let dim = match reader.read_i32::<LittleEndian>() {
            // A zero dimension is a valid empty record.
            Ok(dim) if dim >= 0 => dim as usize,
            // A negative dimension means corrupt framing; treat it like
            // a truncated tail and keep what was decoded so far.
            _ => break,
        };

        let mut vector = Vec::with_capacity(dim);
        for _ in 0..dim {
            match reader.read_f32::<LittleEndian>() {
                Ok(v) => vector.push(v),
                Err(_) => return vectors,
            }
        }
        vectors.push(vector);
    }
    vectors
}

/// Read all integer vectors from an ivecs file (ground truth).
///
/// Same degradation behavior as [`read_fvecs`].
pub fn read_ivecs(path: &Path) -> Vec<Vec<i32>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Unable to open ivecs file {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    let mut reader = BufReader::new(file);

    let mut vectors = Vec::new();
    loop {
        let dim = match reader.read_i32::<LittleEndian>() {
            Ok(dim) if dim >= 0 => dim as usize,
            _ => break,
        };

        let mut vector = Vec::with_capacity(dim);
        for _ in 0..dim {
            match reader.read_i32::<LittleEndian>() {
                Ok(v) => vector.push(v),
                Err(_) => return vectors,
            }
        }
        vectors.push(vector);
    }
    vectors
}

// ============================================================================
// Binary Writers (fixtures and round-trip tests)
// ============================================================================

/// Write vectors to a file in fvecs format.
pub fn write_fvecs(path: &Path, vectors: &[Vec<f32>]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create fvecs file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for vector in vectors {
        writer.write_i32::<LittleEndian>(vector.len() as i32)?;
        for &v in vector {
            writer.write_f32::<LittleEndian>(v)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write integer vectors to a file in ivecs format.
pub fn write_ivecs(path: &Path, vectors: &[Vec<i32>]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create ivecs file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for vector in vectors {
        writer.write_i32::<LittleEndian>(vector.len() as i32)?;
        for &v in vector {
            writer.write_i32::<LittleEndian>(v)?;
        }
    }
    writer.flush()?;
    Ok(())
}

// ============================================================================
// Text Readers
// ============================================================================

/// Read one integer per line (database attributes).
///
/// Fails if a line is empty, non-numeric, or holds more than one token.
pub fn read_ints_one_per_line(path: &Path) -> Result<Vec<i32>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open attribute file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;

        let mut tokens = line.split_whitespace();
        let token = tokens
            .next()
            .ok_or_else(|| anyhow!("Non-integer or empty line at line {}", line_number))?;
        if tokens.next().is_some() {
            bail!("More than one value on line {}", line_number);
        }
        let value: i32 = token
            .parse()
            .map_err(|_| anyhow!("Non-integer or empty line at line {}", line_number))?;
        values.push(value);
    }
    Ok(values)
}

/// Read comma-separated integer rows.
///
/// Empty tokens are skipped (neither zero nor an error); a non-numeric
/// token fails with the 1-based line number.
pub fn read_csv_int_rows(path: &Path) -> Result<Vec<Vec<i32>>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open csv file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;

        let mut row = Vec::new();
        for token in line.split(',') {
            if token.is_empty() {
                continue;
            }
            let value: i32 = token
                .parse()
                .map_err(|_| anyhow!("Invalid integer on line {}", line_number))?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Read one inclusive `A-B` range per line (query attribute ranges).
///
/// Each line must be exactly two integers joined by a single dash;
/// anything else fails with the 1-based line number.
pub fn read_range_pairs(path: &Path) -> Result<Vec<AttributeRange>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open range file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut ranges = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;

        let (first, second) = line
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid format at line {}", line_number))?;
        let low: i32 = first
            .parse()
            .map_err(|_| anyhow!("Invalid integer value at line {}", line_number))?;
        let high: i32 = second
            .parse()
            .map_err(|_| anyhow!("Invalid integer value at line {}", line_number))?;
        ranges.push(AttributeRange { low, high });
    }
    Ok(ranges)
}

/// Parse a `"[v1,v2,...]"` encoded search-effort list (CLI argument).
pub fn parse_effort_list(input: &str) -> Result<Vec<usize>> {
    let cleaned: String = input.chars().filter(|&c| c != '[' && c != ']').collect();
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }
    cleaned
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow!("Invalid search-effort value: {:?}", token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::tempdir;

    fn write_text(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_fvecs_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.fvecs");

        let vectors = vec![vec![1.0f32, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        write_fvecs(&path, &vectors).unwrap();

        let read_back = read_fvecs(&path);
        assert_eq!(read_back, vectors);
    }

    #[test]
    fn test_ivecs_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ivecs");

        let vectors = vec![vec![0i32, 1, 2, 3, 4], vec![10, 11, 12, 13, 14]];
        write_ivecs(&path, &vectors).unwrap();

        let read_back = read_ivecs(&path);
        assert_eq!(read_back, vectors);
    }

    #[test]
    fn test_fvecs_truncated_tail_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.fvecs");

        // One complete record, then a record claiming 3 values but
        // carrying only one.
        let mut file = File::create(&path).unwrap();
        file.write_all(&3i32.to_le_bytes()).unwrap();
        file.write_all(&1.0f32.to_le_bytes()).unwrap();
        file.write_all(&2.0f32.to_le_bytes()).unwrap();
        file.write_all(&3.0f32.to_le_bytes()).unwrap();
        file.write_all(&3i32.to_le_bytes()).unwrap();
        file.write_all(&9.0f32.to_le_bytes()).unwrap();
        drop(file);

        let vectors = read_fvecs(&path);
        assert_eq!(vectors, vec![vec![1.0, 2.0, 3.0]]);
    }

    #[test]
    fn test_fvecs_zero_dim_record_is_empty_vector() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.fvecs");

        // A zero-dimension record between two ordinary ones decodes as
        // an empty vector; the scan continues past it.
        let vectors = vec![vec![1.0f32, 2.0], vec![], vec![3.0, 4.0]];
        write_fvecs(&path, &vectors).unwrap();

        assert_eq!(read_fvecs(&path), vectors);
    }

    #[test]
    fn test_ivecs_negative_dim_ends_scan() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ivecs");

        let mut file = File::create(&path).unwrap();
        file.write_all(&2i32.to_le_bytes()).unwrap();
        file.write_all(&7i32.to_le_bytes()).unwrap();
        file.write_all(&8i32.to_le_bytes()).unwrap();
        file.write_all(&(-3i32).to_le_bytes()).unwrap();
        file.write_all(&9i32.to_le_bytes()).unwrap();
        drop(file);

        assert_eq!(read_ivecs(&path), vec![vec![7, 8]]);
    }

    #[test]
    fn test_fvecs_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let vectors = read_fvecs(&dir.path().join("does_not_exist.fvecs"));
        assert!(vectors.is_empty());
    }

    #[test]
    fn test_ivecs_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let vectors = read_ivecs(&dir.path().join("does_not_exist.ivecs"));
        assert!(vectors.is_empty());
    }

    #[test]
    fn test_read_ints_one_per_line() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "attrs.txt", "3\n-7\n42\n");

        let values = read_ints_one_per_line(&path).unwrap();
        assert_eq!(values, vec![3, -7, 42]);
    }

    #[test]
    fn test_read_ints_empty_line_cites_line_two() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "attrs.txt", "3\n\n5");

        let err = read_ints_one_per_line(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_read_ints_extra_token_cites_line_two() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "attrs.txt", "3\n5 6");

        let err = read_ints_one_per_line(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_read_ints_non_numeric_cites_line_two() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "attrs.txt", "3\nabc");

        let err = read_ints_one_per_line(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_read_ints_missing_file_is_hard_error() {
        let dir = tempdir().unwrap();
        assert!(read_ints_one_per_line(&dir.path().join("nope.txt")).is_err());
    }

    #[test]
    fn test_read_csv_int_rows() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "rows.csv", "1,2,3\n4,5\n");

        let rows = read_csv_int_rows(&path).unwrap();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_read_csv_skips_empty_tokens() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "rows.csv", "1,,3\n,7\n");

        let rows = read_csv_int_rows(&path).unwrap();
        assert_eq!(rows, vec![vec![1, 3], vec![7]]);
    }

    #[test]
    fn test_read_csv_non_numeric_fails_with_line() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "rows.csv", "1,2\n3,x,4\n");

        let err = read_csv_int_rows(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_read_range_pairs() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "ranges.txt", "5-10\n0-0\n");

        let ranges = read_range_pairs(&path).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!((ranges[0].low, ranges[0].high), (5, 10));
        assert_eq!((ranges[1].low, ranges[1].high), (0, 0));
    }

    #[test]
    fn test_read_range_pairs_rejects_extra_dash() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "ranges.txt", "5-10-2\n");
        assert!(read_range_pairs(&path).is_err());
    }

    #[test]
    fn test_read_range_pairs_rejects_non_numeric() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "ranges.txt", "abc-10\n");
        assert!(read_range_pairs(&path).is_err());
    }

    #[test]
    fn test_read_range_pairs_cites_line_number() {
        let dir = tempdir().unwrap();
        let path = write_text(&dir, "ranges.txt", "1-2\n3_4\n");

        let err = read_range_pairs(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_parse_effort_list() {
        assert_eq!(parse_effort_list("[10,20,50]").unwrap(), vec![10, 20, 50]);
        assert_eq!(parse_effort_list("[100]").unwrap(), vec![100]);
        assert!(parse_effort_list("[]").unwrap().is_empty());
        // Duplicates are preserved, not deduplicated.
        assert_eq!(parse_effort_list("[10,10]").unwrap(), vec![10, 10]);
        assert!(parse_effort_list("[10,abc]").is_err());
    }
}
