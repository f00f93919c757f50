//! Explicit startup phase for registrations contributed by independently compiled modules.
//!
//! Modules submit a `Plugin` with `plugin!`, the linker collects them, and the application
//! runs them with `load_plugins` before its first lookup. Plugins run in ascending name order
//! regardless of link order, and each runs at most once per process.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::BTreeSet;

/// A named registration function contributed by a module.
#[derive(Debug)]
pub struct Plugin {
    name: &'static str,
    register: fn(),
}

impl Plugin {
    pub const fn new(name: &'static str, register: fn()) -> Self {
        Self { name, register }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

inventory::collect!(Plugin);

/// Names of the plugins that already ran
static LOADED: Lazy<Mutex<BTreeSet<&'static str>>> = Lazy::new(|| Mutex::new(BTreeSet::new()));

/// Serializes `load_plugins` calls, held while plugins run
static LOADING: Mutex<()> = parking_lot::const_mutex(());

/// Runs every submitted plugin that hasn't run yet, in ascending name order.
/// Returns how many ran during this call.
///
/// Plugins sharing a name are treated as one: only the first in name order runs.
/// A plugin counts as loaded once its registration function returns. If it panics, the
/// panic propagates, the plugins after it don't run, and a later call retries it.
/// A plugin may inspect `loaded_plugins` but must not call `load_plugins` itself.
pub fn load_plugins() -> usize {
    let mut plugins: Vec<&'static Plugin> = inventory::iter::<Plugin>.into_iter().collect();
    plugins.sort_by_key(|plugin| plugin.name);

    let _loading = LOADING.lock();
    let mut count = 0;
    for plugin in plugins {
        if LOADED.lock().contains(plugin.name) {
            tracing::debug!(plugin = plugin.name, "plugin already loaded");
            continue;
        }
        tracing::info!(plugin = plugin.name, "loading plugin");
        (plugin.register)();
        LOADED.lock().insert(plugin.name);
        count += 1;
    }
    count
}

/// Names of the plugins that already ran, in ascending order
pub fn loaded_plugins() -> Vec<&'static str> {
    LOADED.lock().iter().copied().collect()
}

/// Names of every submitted plugin, loaded or not, in ascending order
pub fn available_plugins() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = inventory::iter::<Plugin>
        .into_iter()
        .map(Plugin::name)
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}
