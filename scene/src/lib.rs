//! # Scene
//!
//! Reads scene description files for the editor. A scene file is TOML with a
//! required `[camera]` table and optional `materials`, `textures`,
//! `background`, `spheres` and `3d_model_paths` sections.
//!
//! Only the description is loaded and validated here; building render data
//! from it is the ray-tracing engine's job.
//!
//! ## Usage
//!
//! ```no_run
//! use scene::SceneDocument;
//!
//! let scene = SceneDocument::load("data/materialtest/materialtest.toml".as_ref()).unwrap();
//! println!("{} materials", scene.materials.len());
//! ```
mod document;

pub use document::{Background, CameraSettings, Material, ModelPaths, SceneDocument, SceneError, Sphere, Textureset};
