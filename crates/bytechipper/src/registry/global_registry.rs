//! # Global Registry
//!
//! The process-wide [`EncodingRegistry`], populated on first use by every
//! [`RegistryInventoryHook`] linked into the binary.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{
    errors::BCResult,
    registry::{EncodingRegistry, SchemeDescriptor},
    tokenizer::Tokenizer,
    types::Rank,
};

/// Global encoding registry.
static REGISTRY: OnceCell<EncodingRegistry> = OnceCell::new();

/// Hook for registering schemes and model names with the global registry.
pub struct RegistryInventoryHook {
    /// Registers schemes and model mappings.
    pub register: fn(&EncodingRegistry),
}
inventory::collect!(RegistryInventoryHook);

impl RegistryInventoryHook {
    /// Create a new inventory hook.
    pub const fn new(register: fn(&EncodingRegistry)) -> Self {
        Self { register }
    }
}

/// Get the global encoding registry.
pub fn get_registry() -> &'static EncodingRegistry {
    REGISTRY.get_or_init(init_registry)
}

fn init_registry() -> EncodingRegistry {
    let registry = EncodingRegistry::default();
    for hook in inventory::iter::<RegistryInventoryHook> {
        (hook.register)(&registry);
    }
    log::debug!(
        "initialized encoding registry: {:?}",
        registry.list_encoding_names()
    );
    registry
}

/// Get the tokenizer for a registered scheme, constructing it on first use.
///
/// ## Arguments
/// * `name` - the scheme name, e.g. `"cl100k_base"`.
///
/// ## Returns
/// The shared tokenizer; every call for the same name returns the same `Arc`.
pub fn get_encoding(name: &str) -> BCResult<Arc<Tokenizer<Rank>>> {
    get_registry().get_encoding(name)
}

/// Get the tokenizer for a model name.
pub fn encoding_for_model(model: &str) -> BCResult<Arc<Tokenizer<Rank>>> {
    get_registry().encoding_for_model(model)
}

/// Resolve the scheme name for a model name.
pub fn encoding_name_for_model(model: &str) -> BCResult<String> {
    get_registry().encoding_name_for_model(model)
}

/// Registered scheme names, sorted.
pub fn list_encoding_names() -> Vec<String> {
    get_registry().list_encoding_names()
}

/// Model names with exact aliases, sorted.
pub fn list_model_names() -> Vec<String> {
    get_registry().list_model_names()
}

/// Register a scheme with the global registry.
///
/// Replaces any scheme of the same name.
pub fn register_scheme<F>(
    name: &str,
    constructor: F,
) where
    F: Fn() -> BCResult<SchemeDescriptor<Rank>> + Send + Sync + 'static,
{
    get_registry().register_scheme(name, constructor)
}

/// Map a model name to a scheme in the global registry.
pub fn register_model_alias(
    model: &str,
    scheme: &str,
) {
    get_registry().register_model_alias(model, scheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::testing::build_test_span_map;

    #[test]
    fn test_global_registry() {
        register_scheme("global_registry_test", || {
            Ok(SchemeDescriptor::new(
                "global_registry_test",
                r"\p{L}+|\s+",
                build_test_span_map(&["abc"]),
            ))
        });
        register_model_alias("global-registry-model", "global_registry_test");

        assert!(list_encoding_names().contains(&"global_registry_test".to_string()));
        assert!(list_model_names().contains(&"global-registry-model".to_string()));
        assert_eq!(
            encoding_name_for_model("global-registry-model").unwrap(),
            "global_registry_test"
        );

        let a = get_encoding("global_registry_test").unwrap();
        let b = encoding_for_model("global-registry-model").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.encode_ordinary("abc").unwrap().len(), 1);
    }

    #[test]
    fn test_builtin_schemes_registered() {
        let names = list_encoding_names();
        for name in ["gpt2", "r50k_base", "p50k_base", "p50k_edit", "cl100k_base", "o200k_base"] {
            assert!(names.contains(&name.to_string()), "{name} missing");
        }
    }
}
