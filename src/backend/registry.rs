//! The backend catalog and the resolution policy.
//!
//! Registration order is preserved so resolution stays deterministic given
//! the same catalog: buckets are tiered (lightweight, flagship, everything
//! else), concatenated in that order, and the first two win. This avoids
//! defaulting to the most expensive backends when cheaper ones exist.

use crate::backend::client::{BackendClient, BackendIdentity, TierClass};
use crate::backend::scripted::ScriptedBackend;
use crate::backend::vendor::{AnthropicBackend, GeminiBackend, OpenAiBackend};
use crate::error::ParleyError;
use std::sync::Arc;
use std::time::Duration;

pub struct BackendRegistry {
    backends: Vec<Arc<dyn BackendClient>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Register a backend. A later registration with the same id replaces the
    /// earlier one in place, keeping its catalog position.
    pub fn register(&mut self, backend: Arc<dyn BackendClient>) {
        let id = backend.identify().id;
        if let Some(slot) = self
            .backends
            .iter_mut()
            .find(|b| b.identify().id == id)
        {
            *slot = backend;
        } else {
            self.backends.push(backend);
        }
    }

    pub fn get(&self, backend_id: &str) -> Option<Arc<dyn BackendClient>> {
        self.backends
            .iter()
            .find(|b| b.identify().id == backend_id)
            .cloned()
    }

    pub fn catalog(&self) -> Vec<BackendIdentity> {
        self.backends.iter().map(|b| b.identify()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Resolve the backends for a fan-out. An explicit preference list is
    /// honored in its own order, silently skipping ids the catalog does not
    /// know (the caller reports them); an empty list falls back to the tier
    /// policy. Fewer than two resolvable backends is a refusal.
    pub fn resolve(&self, preferred: &[String]) -> Result<Vec<Arc<dyn BackendClient>>, ParleyError> {
        let resolved: Vec<Arc<dyn BackendClient>> = if preferred.is_empty() {
            self.resolve_default()
        } else {
            preferred.iter().filter_map(|id| self.get(id)).collect()
        };

        if resolved.len() < 2 {
            return Err(ParleyError::InsufficientBackends {
                found: resolved.len(),
            });
        }
        Ok(resolved)
    }

    /// Tier policy: lightweight first, then flagship, then the rest; take the
    /// first two. Stable within tiers (registration order).
    fn resolve_default(&self) -> Vec<Arc<dyn BackendClient>> {
        let mut ordered = self.backends.clone();
        ordered.sort_by_key(|b| b.identify().tier);
        ordered.truncate(2);
        ordered
    }

    /// Catalog entries not present in a session, offered for incremental
    /// addition.
    pub fn unused(&self, used_ids: &[&str]) -> Vec<BackendIdentity> {
        self.catalog()
            .into_iter()
            .filter(|identity| !used_ids.contains(&identity.id.as_str()))
            .collect()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the catalog from vendor API keys in the environment. Each vendor
/// contributes an economical and a flagship model; `include_optional` also
/// registers the standard-tier extras.
pub fn registry_from_env(include_optional: bool) -> BackendRegistry {
    let mut registry = BackendRegistry::new();

    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        registry.register(Arc::new(OpenAiBackend::new(key.clone(), "gpt-5-mini")));
        registry.register(Arc::new(OpenAiBackend::new(key.clone(), "gpt-5")));
        if include_optional {
            registry.register(Arc::new(OpenAiBackend::new(key, "gpt-4o")));
        }
    }

    if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
        registry.register(Arc::new(AnthropicBackend::new(key.clone(), "claude-haiku-4-5")));
        registry.register(Arc::new(AnthropicBackend::new(key.clone(), "claude-opus-4-1")));
        if include_optional {
            registry.register(Arc::new(AnthropicBackend::new(key, "claude-sonnet-4-5")));
        }
    }

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        registry.register(Arc::new(GeminiBackend::new(key.clone(), "gemini-2.5-flash")));
        registry.register(Arc::new(GeminiBackend::new(key, "gemini-2.5-pro")));
    }

    registry
}

/// A canned catalog for running without keys: three scripted backends whose
/// answers diverge enough to exercise the whole analysis surface.
pub fn offline_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();

    registry.register(Arc::new(
        ScriptedBackend::new(
            "demo-lite",
            "Demo Lite",
            "A recursive function is the simplest approach here. It is \
             important to cache intermediate results, since naive recursion \
             repeats work.\n\n\
             ```python\n\
             def fib(n, memo={}):\n\
             \x20   if n in memo:\n\
             \x20       return memo[n]\n\
             \x20   if n < 2:\n\
             \x20       return n\n\
             \x20   memo[n] = fib(n - 1, memo) + fib(n - 2, memo)  # recursive\n\
             \x20   return memo[n]\n\
             ```\n\
             For example, fib(40) returns instantly with the cache in place.",
        )
        .with_tier(TierClass::Lightweight)
        .with_delay(Duration::from_millis(120)),
    ));

    registry.register(Arc::new(
        ScriptedBackend::new(
            "demo-flagship",
            "Demo Flagship",
            "# Iterative solution\n\n\
             First, note the time complexity: the iterative algorithm runs in \
             linear time with constant memory, which beats the recursive \
             variant for large inputs. The approach below is procedural, \
             step-by-step:\n\n\
             - keep two accumulator variables\n\
             - loop from 2 up to n\n\
             - swap the accumulators each iteration\n\n\
             ```python\n\
             def fib(n):\n\
             \x20   a, b = 0, 1\n\
             \x20   for _ in range(n):\n\
             \x20       a, b = b, a + b\n\
             \x20   return a\n\
             ```\n\
             Finally, wrap the function in a small cache if callers repeat \
             arguments.",
        )
        .with_tier(TierClass::Flagship)
        .with_delay(Duration::from_millis(250)),
    ));

    registry.register(Arc::new(
        ScriptedBackend::new(
            "demo-standard",
            "Demo Standard",
            "Both recursion and iteration work; the key difference is memory \
             usage. An object-oriented wrapper class can hide the choice \
             behind a method and switch strategies at runtime.\n\n\
             ```javascript\n\
             class Fib {\n\
             \x20 compute(n) {\n\
             \x20   if (n < 2) return n;\n\
             \x20   let [a, b] = [0, 1];\n\
             \x20   for (let i = 2; i <= n; i++) [a, b] = [b, a + b];\n\
             \x20   return b;\n\
             \x20 }\n\
             }\n\
             ```",
        )
        .with_tier(TierClass::Standard)
        .with_delay(Duration::from_millis(180)),
    ));

    registry
}
