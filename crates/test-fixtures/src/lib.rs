//! Fixture loading for golden retrieval datasets, plus the stub
//! embedding providers shared by tests across crates.

use std::collections::HashMap;
use std::path::PathBuf;

use lectern_core::errors::{LecternResult, SignalError};
use lectern_core::models::{Material, MaterialType};
use lectern_core::traits::IEmbeddingProvider;
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up until the
    // test-fixtures directory is visible.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as a raw JSON value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect()
}

/// A document-type material with the given id, title, and content.
pub fn material(id: &str, title: &str, content: &str) -> Material {
    Material::new(id, title, MaterialType::Document, content)
}

/// A material with an explicit type.
pub fn material_of(
    id: &str,
    title: &str,
    material_type: MaterialType,
    content: &str,
) -> Material {
    Material::new(id, title, material_type, content)
}

/// Embedding provider that returns pre-seeded vectors by exact text.
///
/// Texts without a seeded vector embed to the zero vector, which
/// cosine treats as dissimilar to everything.
#[derive(Debug, Clone)]
pub struct StubEmbedding {
    dimensions: usize,
    vectors: HashMap<String, Vec<f32>>,
    available: bool,
}

impl StubEmbedding {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: HashMap::new(),
            available: true,
        }
    }

    /// Seed the vector returned for an exact text.
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// Mark the provider as offline.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl IEmbeddingProvider for StubEmbedding {
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>> {
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dimensions]))
    }

    fn embed_batch(&self, texts: &[String]) -> LecternResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Embedding provider that reports itself available but fails every
/// call. Exercises the skip-on-failure path.
#[derive(Debug, Clone)]
pub struct BrokenEmbedding;

impl IEmbeddingProvider for BrokenEmbedding {
    fn embed(&self, _text: &str) -> LecternResult<Vec<f32>> {
        Err(SignalError::EmbeddingFailed {
            reason: "stub backend down".to_string(),
        }
        .into())
    }

    fn embed_batch(&self, texts: &[String]) -> LecternResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn name(&self) -> &str {
        "broken"
    }

    fn is_available(&self) -> bool {
        true
    }
}
