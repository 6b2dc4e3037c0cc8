//! # Tiktoken Rank File IO
//!
//! Lines are:
//! ```terminaloutput
//! {BASE64 SPAN} {RANK}
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::{
    errors::{BCError, BCResult},
    types::TokenType,
    vocab::SpanTokenMap,
};

/// Load a [`SpanTokenMap`] from a tiktoken rank file.
///
/// ## Arguments
/// * `path` - the path to the rank file.
pub fn load_tiktoken_rank_map_path<T, P>(path: P) -> BCResult<SpanTokenMap<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    read_tiktoken_rank_map(reader)
}

/// Read a [`SpanTokenMap`] from a tiktoken line reader.
///
/// Blank lines are skipped; anything else that is not `{base64} {rank}`
/// is a `Parse` error naming the line number.
///
/// ## Arguments
/// * `reader` - the line reader.
pub fn read_tiktoken_rank_map<T, R>(reader: R) -> BCResult<SpanTokenMap<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut span_map = SpanTokenMap::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let lineno = idx + 1;

        let (span, rank) = line
            .split_once(' ')
            .ok_or_else(|| BCError::Parse(format!("line {lineno}: expected \"<base64> <rank>\"")))?;

        let span = BASE64_STANDARD
            .decode(span)
            .map_err(|e| BCError::Parse(format!("line {lineno}: {e}")))?;

        let rank: u64 = rank
            .trim()
            .parse()
            .map_err(|e: core::num::ParseIntError| BCError::Parse(format!("line {lineno}: {e}")))?;
        let token = T::from_u64(rank).ok_or(BCError::TokenOutOfRange)?;

        span_map.insert(span, token);
    }

    Ok(span_map)
}

/// Save a [`SpanTokenMap`] to a tiktoken rank file.
///
/// ## Arguments
/// * `span_map` - the entries to save.
/// * `path` - the destination path.
pub fn save_tiktoken_rank_map_path<T, P>(
    span_map: &SpanTokenMap<T>,
    path: P,
) -> BCResult<()>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write_tiktoken_rank_map(span_map, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`SpanTokenMap`] to a [`Write`] writer, in rank order.
///
/// ## Arguments
/// * `span_map` - the entries to save.
/// * `writer` - the writer to target.
pub fn write_tiktoken_rank_map<T, W>(
    span_map: &SpanTokenMap<T>,
    writer: &mut W,
) -> BCResult<()>
where
    T: TokenType,
    W: Write,
{
    let mut items: Vec<(&Vec<u8>, T)> = span_map.iter().map(|(k, &v)| (k, v)).collect();
    items.sort_by_key(|&(span, token)| (token, span));

    for (span, token) in items {
        writeln!(writer, "{} {}", BASE64_STANDARD.encode(span), token)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_tiktoken() {
        type T = u32;

        let mut span_map = SpanTokenMap::<T>::default();
        span_map.insert("apple".as_bytes().to_vec(), 300);
        span_map.insert(vec![0xff, 0x00], 301);
        span_map.insert("pear".as_bytes().to_vec(), 302);

        tempdir::TempDir::new("vocab_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.tiktoken");

                save_tiktoken_rank_map_path(&span_map, &path).expect("Failed to save vocab");

                let loaded: SpanTokenMap<T> =
                    load_tiktoken_rank_map_path(&path).expect("Failed to load vocab");

                assert_eq!(&loaded, &span_map);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_write_format() {
        let span_map: SpanTokenMap<u32> = [(b"b".to_vec(), 1), (b"a".to_vec(), 0)]
            .into_iter()
            .collect();
        let mut buf = Vec::new();
        write_tiktoken_rank_map(&span_map, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "YQ== 0\nYg== 1\n");
    }

    #[test]
    fn test_malformed_lines() {
        let parse = |text: &str| read_tiktoken_rank_map::<u32, _>(text.as_bytes());

        assert_eq!(parse("YQ== 0\n\nYg== 1\n").unwrap().len(), 2);
        assert!(matches!(parse("YQ==\n"), Err(BCError::Parse(msg)) if msg.starts_with("line 1")));
        assert!(matches!(parse("YQ== 0\n!!! 1\n"), Err(BCError::Parse(msg)) if msg.starts_with("line 2")));
        assert!(matches!(parse("YQ== x\n"), Err(BCError::Parse(_))));
        assert!(matches!(
            read_tiktoken_rank_map::<u8, _>("YQ== 300\n".as_bytes()),
            Err(BCError::TokenOutOfRange)
        ));
    }
}
