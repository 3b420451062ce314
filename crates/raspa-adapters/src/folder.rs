//! Utilidades de carpeta: listado, hash de contenido y copia recursiva.
use std::fs;
use std::path::{Path, PathBuf};

use raspa_core::hashing::hash_bytes;
use raspa_core::ResultFolder;

use crate::AdapterError;

/// Rutas relativas (con `/`) de todos los ficheros bajo `root`, ordenadas.
pub fn list_files(root: &Path) -> Result<Vec<String>, AdapterError> {
    let mut out = Vec::new();
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| AdapterError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| AdapterError::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| AdapterError::io(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if let Ok(rel) = path.strip_prefix(root) {
                let parts: Vec<String> = rel.components()
                                            .map(|c| c.as_os_str().to_string_lossy().into_owned())
                                            .collect();
                out.push(parts.join("/"));
            }
        }
    }
    out.sort();
    Ok(out)
}

/// Hash del contenido: cada fichero contribuye con su ruta relativa y el hash
/// de sus bytes, en orden.
pub fn content_hash(root: &Path, files: &[String]) -> Result<String, AdapterError> {
    let mut manifest = String::new();
    for rel in files {
        let path = root.join(rel);
        let bytes = fs::read(&path).map_err(|e| AdapterError::io(&path, e))?;
        manifest.push_str(rel);
        manifest.push('\t');
        manifest.push_str(&hash_bytes(&bytes));
        manifest.push('\n');
    }
    Ok(hash_bytes(manifest.as_bytes()))
}

/// Construye la `ResultFolder` de un directorio existente.
pub fn scan_folder(root: &Path) -> Result<ResultFolder, AdapterError> {
    let files = list_files(root)?;
    let hash = content_hash(root, &files)?;
    Ok(ResultFolder::new(root, files, hash))
}

pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<u64, AdapterError> {
    let mut copied = 0;
    fs::create_dir_all(dst).map_err(|e| AdapterError::io(dst, e))?;
    for rel in list_files(src)? {
        let from = src.join(&rel);
        let to = dst.join(&rel);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| AdapterError::io(parent, e))?;
        }
        fs::copy(&from, &to).map_err(|e| AdapterError::io(&from, e))?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_lists_nested_files_and_hash_tracks_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("Output/System_0")).expect("mkdir");
        fs::write(dir.path().join("Output/System_0/output.data"), "loading 1.0").expect("write");
        fs::write(dir.path().join("simulation.input"), "NumberOfCycles 10").expect("write");

        let folder = scan_folder(dir.path()).expect("scan");
        assert_eq!(folder.files, vec!["Output/System_0/output.data".to_string(), "simulation.input".to_string()]);
        assert!(folder.contains("simulation.input"));

        fs::write(dir.path().join("simulation.input"), "NumberOfCycles 20").expect("rewrite");
        let again = scan_folder(dir.path()).expect("rescan");
        assert_ne!(folder.hash, again.hash);
    }

    #[test]
    fn copy_preserves_layout() {
        let src = tempfile::tempdir().expect("src");
        let dst = tempfile::tempdir().expect("dst");
        fs::create_dir_all(src.path().join("System_0")).expect("mkdir");
        fs::write(src.path().join("System_0/restart_IRMOF-1"), "state").expect("write");

        let n = copy_dir_recursive(src.path(), &dst.path().join("RestartInitial")).expect("copy");
        assert_eq!(n, 1);
        let copied = fs::read_to_string(dst.path().join("RestartInitial/System_0/restart_IRMOF-1")).expect("read");
        assert_eq!(copied, "state");
    }
}
