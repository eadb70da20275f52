//! Optional volumetric-data engine.
//!
//! Compiled in with the `volume` cargo feature. Without it, initialization is
//! a no-op and every other bootstrap phase behaves the same.

/// Outcome of [`init_if_present`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeModule {
    /// The build does not include the volumetric engine.
    Absent,
    /// The engine is compiled in and initialized for this process.
    Initialized,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "volume")] {
        use std::sync::OnceLock;

        /// Grid value types the volumetric engine can read.
        const GRID_TYPES: &[&str] = &["bool", "float", "double", "int32", "int64", "vec3s", "vec3d"];

        static REGISTRY: OnceLock<Vec<&'static str>> = OnceLock::new();

        /// Initializes the volumetric engine once per process. Later calls
        /// return immediately.
        pub fn init_if_present() -> VolumeModule {
            REGISTRY.get_or_init(|| {
                log::info!("Volumetric engine initialized with {} grid types", GRID_TYPES.len());
                GRID_TYPES.to_vec()
            });
            VolumeModule::Initialized
        }

        /// Grid types registered by initialization, empty before it ran.
        pub fn registered_grid_types() -> &'static [&'static str] {
            REGISTRY.get().map(Vec::as_slice).unwrap_or(&[])
        }
    } else {
        /// The volumetric engine is not part of this build.
        pub fn init_if_present() -> VolumeModule {
            log::debug!("Volumetric engine not compiled in");
            VolumeModule::Absent
        }

        pub fn registered_grid_types() -> &'static [&'static str] {
            &[]
        }
    }
}
