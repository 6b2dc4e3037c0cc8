#![allow(dead_code)]

use bytechipper::{
    Rank,
    Tokenizer,
    TokenizerOptions,
    encoders::span_encoders::SpanEncoderSelector,
    pretrained::openai::OA_CL100K_BASE_PATTERN,
    registry::SchemeDescriptor,
    tokenizer::ENDOFTEXT,
    vocab::SpanTokenMap,
};

pub const SPECIAL: &str = "<|special|>";
pub const SPECIAL_ID: Rank = 50001;

const WORDS: &[&str] = &[
    "hello",
    " world",
    " the",
    " quick",
    " brown",
    " fox",
    "ing",
    " jumps",
    " over",
    " lazy",
    " dog",
    "123",
    "\n\n",
    "  ",
    "caf\u{e9}",
];

/// Byte ranks, then every prefix (length >= 2) of each word in order.
pub fn toy_ranks() -> SpanTokenMap<Rank> {
    let mut ranks: SpanTokenMap<Rank> = (0..=255u8).map(|b| (vec![b], b as Rank)).collect();
    let mut next = 256;
    for word in WORDS {
        let bytes = word.as_bytes();
        for end in 2..=bytes.len() {
            if !ranks.contains_key(&bytes[..end]) {
                ranks.insert(bytes[..end].to_vec(), next);
                next += 1;
            }
        }
    }
    ranks
}

pub fn toy_descriptor(name: &str) -> SchemeDescriptor<Rank> {
    SchemeDescriptor::new(name, OA_CL100K_BASE_PATTERN, toy_ranks())
        .with_specials([(ENDOFTEXT, 50000), (SPECIAL, SPECIAL_ID)])
}

pub fn toy_tokenizer() -> Tokenizer<Rank> {
    toy_tokenizer_with(SpanEncoderSelector::Default)
}

pub fn toy_tokenizer_with(selector: SpanEncoderSelector) -> Tokenizer<Rank> {
    TokenizerOptions::default()
        .with_span_encoder(selector)
        .build(toy_descriptor("toy"))
        .unwrap()
}

pub const SAMPLES: &[&str] = &[
    "",
    "hello world",
    "The quick brown fox jumps over the lazy dog.",
    "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
    "  multiple   spaces  ",
    "line1\nline2\r\nline3\n\n",
    "123 + 456 = 789",
    "caf\u{e9} na\u{ef}ve \u{4f60}\u{597d}",
    "$$$!!!...---",
    "\t\ttabs\tand\tspaces ",
    "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    "mixed: hello\u{a0}world\u{2003}wide",
];
