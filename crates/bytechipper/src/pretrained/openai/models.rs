//! # `OpenAI` Model Names

use strum::IntoEnumIterator;

use crate::{
    pretrained::openai::{OpenaiScheme, OpenaiVocabConfig},
    registry::{EncodingRegistry, RegistryInventoryHook},
};

/// Exact model name → scheme.
pub const OA_MODEL_SCHEMES: &[(&str, OpenaiScheme)] = &[
    // chat
    ("gpt-4o", OpenaiScheme::O200kBase),
    ("gpt-4", OpenaiScheme::Cl100kBase),
    ("gpt-3.5-turbo", OpenaiScheme::Cl100kBase),
    ("gpt-3.5", OpenaiScheme::Cl100kBase),
    ("gpt-35-turbo", OpenaiScheme::Cl100kBase),
    // base
    ("davinci-002", OpenaiScheme::Cl100kBase),
    ("babbage-002", OpenaiScheme::Cl100kBase),
    // embeddings
    ("text-embedding-ada-002", OpenaiScheme::Cl100kBase),
    ("text-embedding-3-small", OpenaiScheme::Cl100kBase),
    ("text-embedding-3-large", OpenaiScheme::Cl100kBase),
    // text
    ("text-davinci-003", OpenaiScheme::P50kBase),
    ("text-davinci-002", OpenaiScheme::P50kBase),
    ("text-davinci-001", OpenaiScheme::R50kBase),
    ("text-curie-001", OpenaiScheme::R50kBase),
    ("text-babbage-001", OpenaiScheme::R50kBase),
    ("text-ada-001", OpenaiScheme::R50kBase),
    ("davinci", OpenaiScheme::R50kBase),
    ("curie", OpenaiScheme::R50kBase),
    ("babbage", OpenaiScheme::R50kBase),
    ("ada", OpenaiScheme::R50kBase),
    // code
    ("code-davinci-002", OpenaiScheme::P50kBase),
    ("code-davinci-001", OpenaiScheme::P50kBase),
    ("code-cushman-002", OpenaiScheme::P50kBase),
    ("code-cushman-001", OpenaiScheme::P50kBase),
    ("davinci-codex", OpenaiScheme::P50kBase),
    ("cushman-codex", OpenaiScheme::P50kBase),
    // edit
    ("text-davinci-edit-001", OpenaiScheme::P50kEdit),
    ("code-davinci-edit-001", OpenaiScheme::P50kEdit),
    // old embeddings
    ("text-similarity-davinci-001", OpenaiScheme::R50kBase),
    ("text-similarity-curie-001", OpenaiScheme::R50kBase),
    ("text-similarity-babbage-001", OpenaiScheme::R50kBase),
    ("text-similarity-ada-001", OpenaiScheme::R50kBase),
    ("text-search-davinci-doc-001", OpenaiScheme::R50kBase),
    ("text-search-curie-doc-001", OpenaiScheme::R50kBase),
    ("text-search-babbage-doc-001", OpenaiScheme::R50kBase),
    ("text-search-ada-doc-001", OpenaiScheme::R50kBase),
    ("code-search-babbage-code-001", OpenaiScheme::R50kBase),
    ("code-search-ada-code-001", OpenaiScheme::R50kBase),
    // open source
    ("gpt2", OpenaiScheme::Gpt2),
];

/// Model name prefix → scheme, tried in order.
pub const OA_MODEL_PREFIX_SCHEMES: &[(&str, OpenaiScheme)] = &[
    ("gpt-4o-", OpenaiScheme::O200kBase),
    ("gpt-4-", OpenaiScheme::Cl100kBase),
    ("gpt-3.5-turbo-", OpenaiScheme::Cl100kBase),
    ("gpt-35-turbo-", OpenaiScheme::Cl100kBase),
    ("ft:gpt-4", OpenaiScheme::Cl100kBase),
    ("ft:gpt-3.5-turbo", OpenaiScheme::Cl100kBase),
    ("ft:davinci-002", OpenaiScheme::Cl100kBase),
    ("ft:babbage-002", OpenaiScheme::Cl100kBase),
];

/// Register every [`OpenaiScheme`] and model name with a registry.
///
/// Rank files are located through [`OpenaiVocabConfig::default`] at
/// construction time.
pub fn register_openai_schemes(registry: &EncodingRegistry) {
    for scheme in OpenaiScheme::iter() {
        registry.register_scheme(&scheme.to_string(), move || {
            scheme.load_descriptor(&OpenaiVocabConfig::default())
        });
    }
    for (model, scheme) in OA_MODEL_SCHEMES {
        registry.register_model_alias(model, &scheme.to_string());
    }
    for (prefix, scheme) in OA_MODEL_PREFIX_SCHEMES {
        registry.register_model_prefix(prefix, &scheme.to_string());
    }
}

inventory::submit! {
    RegistryInventoryHook::new(register_openai_schemes)
}
