//! Module allow-lists applied at render time

use crate::error::{WriterError, WriterResult};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Decides which modules are drawn, and which of them show private functions.
///
/// An empty `modules` list draws every module. An empty `private` list keeps
/// every module to its public functions.
#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    modules: Option<GlobSet>,
    private: Option<GlobSet>,
}

impl ModuleFilter {
    /// Draw every module, public functions only.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from two lists of module-prefix glob patterns.
    pub fn new<S: AsRef<str>>(modules: &[S], private: &[S]) -> WriterResult<Self> {
        Ok(ModuleFilter {
            modules: build_set(modules)?,
            private: build_set(private)?,
        })
    }

    /// Whether the module is drawn at all.
    pub fn renders(&self, prefix: &str) -> bool {
        self.modules.as_ref().is_none_or(|set| set.is_match(prefix))
    }

    /// Whether the module's private functions are drawn.
    pub fn shows_private(&self, prefix: &str) -> bool {
        self.renders(prefix) && self.private.as_ref().is_some_and(|set| set.is_match(prefix))
    }
}

fn build_set<S: AsRef<str>>(patterns: &[S]) -> WriterResult<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    let mut seen: Vec<&str> = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let pattern: &str = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|e| WriterError::Filter(pattern.to_string(), e))?;
        builder.add(glob);
        seen.push(pattern);
    }
    let set = builder
        .build()
        .map_err(|e| WriterError::Filter(seen.join(","), e))?;
    Ok(Some(set))
}
