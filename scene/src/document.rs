use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("could not read scene file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse scene: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("texture set {0} names no texture files")]
    EmptyTextureset(usize),

    #[error("sphere {index} uses material {material_id}, but the scene defines {count} materials")]
    MissingMaterial {
        index: usize,
        material_id: i64,
        count: usize,
    },

    #[error("sphere {index} uses texture set {texture_id}, but the scene defines {count} texture sets")]
    MissingTexture {
        index: usize,
        texture_id: i64,
        count: usize,
    },
}

fn default_near_far() -> [f32; 2] {
    [0.1, 100.0]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub rotation: [f32; 2],
    // Near and far only matter in edge cases, so they may be left out
    #[serde(default = "default_near_far")]
    pub near_far: [f32; 2],
    pub fov: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Material {
    pub color: [f32; 3],
    pub attenuation: [f32; 3],
    #[serde(default)]
    pub roughness: f32,
    #[serde(default)]
    pub emission: f32,
    #[serde(default)]
    pub ior: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Textureset {
    #[serde(rename = "diffuse")]
    pub diffuse_path: Option<String>,
    #[serde(rename = "normal")]
    pub normal_path: Option<String>,
    #[serde(rename = "roughness")]
    pub roughness_path: Option<String>,
}

impl Textureset {
    fn is_empty(&self) -> bool {
        self.diffuse_path.is_none() && self.normal_path.is_none() && self.roughness_path.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Background {
    pub material_id: i64,
    pub intensity: f32,
    pub background_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sphere {
    pub position: [f32; 3],
    pub radius: f32,
    pub material_id: i64,
    #[serde(default = "Sphere::no_textures")]
    pub texture_id: [i64; 3],
}

impl Sphere {
    fn no_textures() -> [i64; 3] {
        [-1, -1, -1]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelPaths {
    pub gltf_path: Option<String>,
    pub obj_path: Option<String>,
    pub obj_material_id: Option<i64>,
}

impl ModelPaths {
    /// Model files named in the scene, skipping empty entries.
    pub fn files(&self) -> Vec<&str> {
        [self.gltf_path.as_deref(), self.obj_path.as_deref()]
            .into_iter()
            .flatten()
            .filter(|path| !path.is_empty())
            .collect()
    }
}

/// A scene description as written on disk.
///
/// Only the camera is required; every other section may be omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneDocument {
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Textureset>,
    pub background: Option<Background>,
    #[serde(default)]
    pub spheres: Vec<Sphere>,
    #[serde(rename = "3d_model_paths", default)]
    pub model_paths: ModelPaths,
}

impl SceneDocument {
    /// Reads and validates the scene file at `path`.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let toml_str = fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&toml_str)?;
        log::info!(
            "Loaded scene {}: {} materials, {} spheres, {} texture sets",
            path.display(),
            document.materials.len(),
            document.spheres.len(),
            document.textures.len()
        );
        Ok(document)
    }

    pub fn parse(toml_str: &str) -> Result<Self, SceneError> {
        let document: SceneDocument = toml::from_str(toml_str)?;
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<(), SceneError> {
        if let Some(index) = self.textures.iter().position(Textureset::is_empty) {
            return Err(SceneError::EmptyTextureset(index));
        }

        let count = self.materials.len();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let in_range = usize::try_from(sphere.material_id).is_ok_and(|id| id < count);
            if !in_range {
                return Err(SceneError::MissingMaterial {
                    index,
                    material_id: sphere.material_id,
                    count,
                });
            }
        }

        // -1 marks an unused slot
        let count = self.textures.len();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let dangling = sphere
                .texture_id
                .iter()
                .find(|&&id| id >= 0 && usize::try_from(id).map_or(true, |id| id >= count));
            if let Some(&texture_id) = dangling {
                return Err(SceneError::MissingTexture {
                    index,
                    texture_id,
                    count,
                });
            }
        }
        Ok(())
    }
}
