//! # `DataGym` Vocabulary IO
//!
//! The GPT-2 release shipped its vocabulary as a "vocab.bpe" merge list
//! and an "encoder.json" token map, both written with a printable-character
//! stand-in for every byte ("mojibake"). Both files describe the same rank
//! table; [`read_datagym_rank_map`] reads the merges and cross-checks them
//! against the encoder map.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde_json::Value;

use crate::{
    errors::{BCError, BCResult},
    types::{BCHashMap, TokenType},
    vocab::SpanTokenMap,
};

/// A map from mojibake characters to the bytes they stand for.
pub type MojibakeMap = BCHashMap<char, u8>;

/// Special literals present in "encoder.json" but not part of the ranks.
const DATAGYM_SPECIALS: &[&str] = &["<|endoftext|>", "<|startoftext|>"];

/// The mojibake map and the single-byte ranks.
///
/// Printable ISO/IEC 8859-1 bytes stand for themselves and take the first
/// ranks; every other byte `b` is written as `char(256 + n)`, where `n`
/// counts the non-printable bytes below `b`.
fn datagym_base_maps<T: TokenType>() -> BCResult<(MojibakeMap, SpanTokenMap<T>)> {
    let mut rank_to_byte: Vec<u8> = Vec::with_capacity(256);
    rank_to_byte.extend(0x21..=0x7E);
    rank_to_byte.extend(0xA1..=0xAC);
    rank_to_byte.extend(0xAE..=0xFF);

    let mut mojibake: MojibakeMap = rank_to_byte.iter().map(|&b| (char::from(b), b)).collect();

    let mut n = 0u32;
    for b in 0..=255u8 {
        if rank_to_byte.contains(&b) {
            continue;
        }
        rank_to_byte.push(b);
        if let Some(c) = char::from_u32(256 + n) {
            mojibake.insert(c, b);
        }
        n += 1;
    }

    let span_map = rank_to_byte
        .into_iter()
        .enumerate()
        .map(|(rank, b)| Ok((vec![b], T::from_usize(rank).ok_or(BCError::TokenOutOfRange)?)))
        .collect::<BCResult<SpanTokenMap<T>>>()?;

    Ok((mojibake, span_map))
}

fn decode_mojibake(
    mojibake: &MojibakeMap,
    value: &str,
) -> BCResult<Vec<u8>> {
    value
        .chars()
        .map(|c| {
            mojibake
                .get(&c)
                .copied()
                .ok_or_else(|| BCError::Parse(format!("unexpected character {c:?} in {value:?}")))
        })
        .collect()
}

/// Read a "vocab.bpe" merge list.
///
/// The first line is a version header; each following line is a merge
/// `"{left} {right}"`, ranked in file order after the 256 byte ranks.
///
/// ## Returns
/// The mojibake map (for reading the matching "encoder.json") and the ranks.
pub fn read_datagym_vocab_bpe<T, R>(reader: R) -> BCResult<(MojibakeMap, SpanTokenMap<T>)>
where
    T: TokenType,
    R: BufRead,
{
    let (mojibake, mut span_map) = datagym_base_maps::<T>()?;

    let mut next = span_map.len();
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let (left, right) = line
            .split_once(' ')
            .ok_or_else(|| BCError::Parse(format!("line {}: expected a merge pair", idx + 1)))?;

        let mut span = decode_mojibake(&mojibake, left)?;
        span.extend(decode_mojibake(&mojibake, right)?);

        let token = T::from_usize(next).ok_or(BCError::TokenOutOfRange)?;
        span_map.insert(span, token);
        next += 1;
    }

    Ok((mojibake, span_map))
}

/// Read an "encoder.json" token map, dropping its special literals.
pub fn read_datagym_encoder_json<T, R>(
    reader: R,
    mojibake: &MojibakeMap,
) -> BCResult<SpanTokenMap<T>>
where
    T: TokenType,
    R: BufRead,
{
    let json: Value =
        serde_json::from_reader(reader).map_err(|e| BCError::Parse(format!("encoder.json: {e}")))?;
    let entries = json
        .as_object()
        .ok_or_else(|| BCError::Parse("encoder.json: expected an object".to_string()))?;

    let mut span_map = SpanTokenMap::default();
    for (key, value) in entries {
        if DATAGYM_SPECIALS.contains(&key.as_str()) {
            continue;
        }
        let rank = value
            .as_u64()
            .ok_or_else(|| BCError::Parse(format!("encoder.json: bad rank for {key:?}")))?;
        let token = T::from_u64(rank).ok_or(BCError::TokenOutOfRange)?;
        span_map.insert(decode_mojibake(mojibake, key)?, token);
    }
    Ok(span_map)
}

/// Read a `DataGym` vocabulary pair into a rank map.
///
/// ## Returns
/// `VocabConflict` if the two files disagree.
pub fn read_datagym_rank_map<T, VR, ER>(
    vocab_bpe_reader: VR,
    encoder_json_reader: ER,
) -> BCResult<SpanTokenMap<T>>
where
    T: TokenType,
    VR: BufRead,
    ER: BufRead,
{
    let (mojibake, span_map) = read_datagym_vocab_bpe::<T, _>(vocab_bpe_reader)?;
    let encoder = read_datagym_encoder_json::<T, _>(encoder_json_reader, &mojibake)?;

    if span_map != encoder {
        return Err(BCError::VocabConflict(format!(
            "vocab.bpe ({} entries) disagrees with encoder.json ({} entries)",
            span_map.len(),
            encoder.len()
        )));
    }
    Ok(span_map)
}

/// Load a `DataGym` vocabulary pair from disk.
///
/// ## Arguments
/// * `vocab_bpe_path` - the "vocab.bpe" merge list.
/// * `encoder_json_path` - the "encoder.json" token map.
pub fn load_datagym_rank_map_paths<T, VP, EP>(
    vocab_bpe_path: VP,
    encoder_json_path: EP,
) -> BCResult<SpanTokenMap<T>>
where
    T: TokenType,
    VP: AsRef<Path>,
    EP: AsRef<Path>,
{
    read_datagym_rank_map(
        BufReader::new(File::open(vocab_bpe_path)?),
        BufReader::new(File::open(encoder_json_path)?),
    )
}
