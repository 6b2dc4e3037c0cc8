//! # Special Tokens

use crate::{tokenizer::ENDOFTEXT, types::Rank};

/// The fill-in-the-middle prefix literal.
pub const FIM_PREFIX: &str = "<|fim_prefix|>";

/// The fill-in-the-middle middle literal.
pub const FIM_MIDDLE: &str = "<|fim_middle|>";

/// The fill-in-the-middle suffix literal.
pub const FIM_SUFFIX: &str = "<|fim_suffix|>";

/// The end-of-prompt literal.
pub const ENDOFPROMPT: &str = "<|endofprompt|>";

/// The "`gpt2`" / "`r50k_base`" special tokens.
pub const OA_R50K_BASE_SPECIALS: &[(&str, Rank)] = &[(ENDOFTEXT, 50256)];

/// The "`p50k_base`" special tokens.
pub const OA_P50K_BASE_SPECIALS: &[(&str, Rank)] = &[(ENDOFTEXT, 50256)];

/// The "`p50k_edit`" special tokens.
pub const OA_P50K_EDIT_SPECIALS: &[(&str, Rank)] = &[
    (ENDOFTEXT, 50256),
    (FIM_PREFIX, 50281),
    (FIM_MIDDLE, 50282),
    (FIM_SUFFIX, 50283),
];

/// The "`cl100k_base`" special tokens.
pub const OA_CL100K_BASE_SPECIALS: &[(&str, Rank)] = &[
    (ENDOFTEXT, 100257),
    (FIM_PREFIX, 100258),
    (FIM_MIDDLE, 100259),
    (FIM_SUFFIX, 100260),
    (ENDOFPROMPT, 100276),
];

/// The "`o200k_base`" special tokens.
pub const OA_O200K_BASE_SPECIALS: &[(&str, Rank)] = &[(ENDOFTEXT, 199999), (ENDOFPROMPT, 200018)];
