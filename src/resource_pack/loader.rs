//! Resource pack loading from ZIP files and directories.

use super::{BlockModel, ResourcePack};
use crate::error::{MesherError, Result};
use std::io::Read;
use std::path::Path;

/// Load a resource pack from a file path.
///
/// Supports both ZIP files and directories.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ResourcePack> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)
    }
}

/// Load a resource pack from bytes (ZIP data).
pub fn load_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut pack = ResourcePack::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let file_path = file.name().to_string();

        let Some((namespace, "models", asset_path)) = parse_asset_path(&file_path) else {
            continue;
        };
        let Some(model_path) = asset_path.strip_suffix(".json") else {
            continue;
        };

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        add_model_json(&mut pack, namespace, model_path, &contents);
    }

    log::debug!("Loaded {} models from archive", pack.model_count());
    Ok(pack)
}

/// Load a resource pack from a directory.
fn load_from_directory(path: &Path) -> Result<ResourcePack> {
    let mut pack = ResourcePack::new();

    // Look for assets directory
    let assets_path = path.join("assets");
    if !assets_path.exists() {
        return Err(MesherError::InvalidResourcePack(
            "No assets directory found".to_string(),
        ));
    }

    // Iterate through namespaces
    for namespace_entry in std::fs::read_dir(&assets_path)? {
        let namespace_entry = namespace_entry?;
        if !namespace_entry.file_type()?.is_dir() {
            continue;
        }

        let namespace = namespace_entry.file_name().to_string_lossy().to_string();
        let models_path = namespace_entry.path().join("models");
        if models_path.exists() {
            load_json_files_recursive(&models_path, &models_path, &mut |model_path, contents| {
                add_model_json(&mut pack, &namespace, model_path, contents);
            })?;
        }
    }

    log::debug!(
        "Loaded {} models from {}",
        pack.model_count(),
        path.display()
    );
    Ok(pack)
}

/// Parse one model file; a malformed or non-UTF-8 model is skipped rather than failing the pack.
fn add_model_json(pack: &mut ResourcePack, namespace: &str, model_path: &str, contents: &[u8]) {
    match serde_json::from_slice::<BlockModel>(contents) {
        Ok(model) => pack.add_model(namespace, model_path, model),
        Err(e) => log::warn!(
            "Failed to parse model {}:{}: {}",
            namespace,
            model_path,
            e
        ),
    }
}

/// Parse an asset path from a ZIP file.
/// Returns (namespace, asset_type, asset_path) if valid.
fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() >= 4 && parts[0] == "assets" {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Load JSON files recursively from a directory.
fn load_json_files_recursive<F>(base: &Path, dir: &Path, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, &[u8]),
{
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            load_json_files_recursive(base, &path, handler)?;
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            let relative = relative
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/");

            let contents = std::fs::read(&path)?;
            handler(&relative, &contents);
        }
    }
    Ok(())
}
