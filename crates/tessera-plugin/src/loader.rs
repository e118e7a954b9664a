//! Dynamic plugin loader using `libloading` (feature-gated).
//!
//! The default build ships compiled-in plugins listed by the bootstrap;
//! deployments that need out-of-tree plugins enable the `dynamic` feature
//! and drop shared libraries into the configured plugin roots.

#[cfg(feature = "dynamic")]
pub mod dynamic_loader {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use tracing::{error, info, warn};

    use tessera_core::error::AppError;

    use crate::registry::Plugin;

    /// Type of the plugin creation function exported by dynamic plugins.
    ///
    /// Dynamic plugins must export: `extern "C" fn create_plugin() -> *mut dyn Plugin`
    pub type CreatePluginFn = unsafe extern "C" fn() -> *mut dyn Plugin;

    /// Loads plugins from shared libraries (.so / .dll / .dylib).
    pub struct DynamicLoader {
        /// Loaded libraries (kept alive for the lifetime of the loader).
        _libraries: Vec<libloading::Library>,
    }

    impl DynamicLoader {
        /// Creates a new dynamic loader.
        pub fn new() -> Self {
            Self {
                _libraries: Vec::new(),
            }
        }

        /// Loads a plugin from the given shared library path.
        ///
        /// # Safety
        /// This function loads arbitrary code from a shared library.
        /// Only load trusted plugins.
        pub unsafe fn load_from_path(&mut self, path: &Path) -> Result<Arc<dyn Plugin>, AppError> {
            let lib = libloading::Library::new(path).map_err(|e| {
                AppError::plugin(format!(
                    "Failed to load plugin library '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            let create_fn: libloading::Symbol<CreatePluginFn> =
                lib.get(b"create_plugin").map_err(|e| {
                    AppError::plugin(format!(
                        "Plugin '{}' missing 'create_plugin' symbol: {}",
                        path.display(),
                        e
                    ))
                })?;

            let raw_plugin = create_fn();
            let plugin = Arc::from_raw(raw_plugin);

            info!(path = %path.display(), "Dynamic plugin loaded");

            self._libraries.push(lib);

            Ok(plugin)
        }

        /// Discovers plugins under the given roots, in root order.
        ///
        /// Directory entries are sorted by path so that discovery order, and
        /// therefore route/provider ordering, is stable across runs. Load
        /// failures are logged and skipped.
        ///
        /// # Safety
        /// See [`DynamicLoader::load_from_path`].
        pub unsafe fn discover(&mut self, roots: &[PathBuf]) -> Vec<Arc<dyn Plugin>> {
            let mut plugins = Vec::new();

            for root in roots {
                let entries = match std::fs::read_dir(root) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!(root = %root.display(), error = %e, "Skipping unreadable plugin root");
                        continue;
                    }
                };

                let mut paths: Vec<PathBuf> = entries
                    .filter_map(|e| e.ok().map(|e| e.path()))
                    .filter(|p| {
                        matches!(
                            p.extension().and_then(|e| e.to_str()),
                            Some("so") | Some("dylib") | Some("dll")
                        )
                    })
                    .collect();
                paths.sort();

                for path in paths {
                    match self.load_from_path(&path) {
                        Ok(plugin) => plugins.push(plugin),
                        Err(e) => {
                            error!(path = %path.display(), error = %e, "Skipping broken plugin library");
                        }
                    }
                }
            }

            plugins
        }
    }

    impl Default for DynamicLoader {
        fn default() -> Self {
            Self::new()
        }
    }

    impl std::fmt::Debug for DynamicLoader {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("DynamicLoader")
                .field("loaded_count", &self._libraries.len())
                .finish()
        }
    }
}

/// Stub loader when the dynamic feature is not enabled.
#[cfg(not(feature = "dynamic"))]
pub mod dynamic_loader {
    /// Stub dynamic loader.
    #[derive(Debug, Default)]
    pub struct DynamicLoader;

    impl DynamicLoader {
        /// Creates a stub loader.
        pub fn new() -> Self {
            Self
        }
    }
}

pub use dynamic_loader::DynamicLoader;
