//! # Encoding Registry

use std::sync::Arc;

use once_cell::sync::OnceCell;
use spin::RwLock;

use crate::{
    errors::{BCError, BCResult},
    registry::SchemeDescriptor,
    tokenizer::{Tokenizer, TokenizerOptions},
    types::{BCHashMap, Rank},
};

/// A scheme constructor; called at most once per successful construction.
pub type SchemeConstructor = Arc<dyn Fn() -> BCResult<SchemeDescriptor<Rank>> + Send + Sync>;

type TokenizerCell = Arc<OnceCell<Arc<Tokenizer<Rank>>>>;

/// A registered scheme: its constructor and the cell caching its tokenizer.
///
/// Re-registration installs a new entry, so a cell is only ever filled by
/// the constructor it was registered with.
#[derive(Clone)]
struct SchemeEntry {
    constructor: SchemeConstructor,
    cell: TokenizerCell,
}

/// Model name → scheme name resolution.
#[derive(Debug, Default, Clone)]
struct ModelTable {
    aliases: BCHashMap<String, String>,
    prefixes: Vec<(String, String)>,
    default_scheme: Option<String>,
}

/// Scheme constructors, model aliases, and a single-flight tokenizer cache.
///
/// The first `get_encoding(name)` runs the constructor and builds the
/// [`Tokenizer`]; concurrent first callers wait for that one construction
/// and all receive the same `Arc`. A failed construction is not cached.
pub struct EncodingRegistry {
    options: TokenizerOptions,
    schemes: RwLock<BCHashMap<String, SchemeEntry>>,
    models: RwLock<ModelTable>,
}

impl Default for EncodingRegistry {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

impl core::fmt::Debug for EncodingRegistry {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("EncodingRegistry")
            .field("options", &self.options)
            .field("encodings", &self.list_encoding_names())
            .finish()
    }
}

impl EncodingRegistry {
    /// Create an empty registry.
    ///
    /// ## Arguments
    /// * `options` - used to build every tokenizer.
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            options,
            schemes: RwLock::new(Default::default()),
            models: RwLock::new(Default::default()),
        }
    }

    /// The tokenizer build options.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Register a scheme constructor.
    ///
    /// Replacing an existing scheme drops its cached tokenizer.
    pub fn register_scheme<F>(
        &self,
        name: &str,
        constructor: F,
    ) where
        F: Fn() -> BCResult<SchemeDescriptor<Rank>> + Send + Sync + 'static,
    {
        let entry = SchemeEntry {
            constructor: Arc::new(constructor),
            cell: Default::default(),
        };
        if self.schemes.write().insert(name.to_string(), entry).is_some() {
            log::debug!("replacing encoding {name:?}");
        }
    }

    /// Map an exact model name to a scheme.
    pub fn register_model_alias(
        &self,
        model: &str,
        scheme: &str,
    ) {
        self.models
            .write()
            .aliases
            .insert(model.to_string(), scheme.to_string());
    }

    /// Map every model name starting with `prefix` to a scheme.
    ///
    /// Prefixes are tried in registration order.
    pub fn register_model_prefix(
        &self,
        prefix: &str,
        scheme: &str,
    ) {
        self.models
            .write()
            .prefixes
            .push((prefix.to_string(), scheme.to_string()));
    }

    /// Set the scheme for models that match nothing else.
    pub fn set_default_scheme(
        &self,
        scheme: Option<&str>,
    ) {
        self.models.write().default_scheme = scheme.map(str::to_string);
    }

    /// Registered scheme names, sorted.
    pub fn list_encoding_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Model names with exact aliases, sorted.
    pub fn list_model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.read().aliases.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve the scheme name for a model.
    ///
    /// Exact aliases win, then prefixes in registration order, then the
    /// default scheme.
    ///
    /// ## Returns
    /// `UnknownModel` if nothing matches.
    pub fn encoding_name_for_model(
        &self,
        model: &str,
    ) -> BCResult<String> {
        let models = self.models.read();
        if let Some(scheme) = models.aliases.get(model) {
            return Ok(scheme.clone());
        }
        if let Some((_, scheme)) = models
            .prefixes
            .iter()
            .find(|(prefix, _)| model.starts_with(prefix.as_str()))
        {
            return Ok(scheme.clone());
        }
        models
            .default_scheme
            .clone()
            .ok_or_else(|| BCError::UnknownModel(model.to_string()))
    }

    /// Get (constructing on first use) the tokenizer for a scheme.
    ///
    /// ## Returns
    /// `UnknownEncoding` for unregistered names; otherwise any error of the
    /// scheme constructor or [`TokenizerOptions::build`].
    pub fn get_encoding(
        &self,
        name: &str,
    ) -> BCResult<Arc<Tokenizer<Rank>>> {
        let entry = self.schemes.read().get(name).cloned();
        let Some(SchemeEntry { constructor, cell }) = entry else {
            return Err(BCError::UnknownEncoding {
                name: name.to_string(),
                available: self.list_encoding_names(),
            });
        };

        if let Some(tokenizer) = cell.get() {
            log::debug!("encoding {name:?} cache hit");
            return Ok(tokenizer.clone());
        }

        cell.get_or_try_init(|| {
            log::info!("constructing encoding {name:?}");
            let descriptor = constructor()?;
            let tokenizer = self.options.build(descriptor)?;
            log::info!(
                "constructed encoding {name:?} ({} tokens)",
                tokenizer.n_vocab()
            );
            Ok(Arc::new(tokenizer))
        })
        .cloned()
    }

    /// Get the tokenizer for a model name.
    pub fn encoding_for_model(
        &self,
        model: &str,
    ) -> BCResult<Arc<Tokenizer<Rank>>> {
        let name = self.encoding_name_for_model(model)?;
        self.get_encoding(&name)
    }
}
