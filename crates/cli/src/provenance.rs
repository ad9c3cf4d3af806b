use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to a replay artifact.
pub struct Payload {
    /// Command-line parameters that produced the artifact.
    pub params: Value,
    /// Effective `DiagramCfg` (defaults merged with `--config`).
    pub config: Value,
}

impl Payload {
    pub fn new(params: Value, config: Value) -> Self {
        Self { params, config }
    }
}

/// Write `<artifact>.provenance.json` with the library version, git commit,
/// callsite, params, config and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "tool": "planimetry",
        "version": planimetry::VERSION,
        "code_rev": current_git_rev(),
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "config": payload.config,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("replay"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit recorded in the sidecar: `GIT_COMMIT` if set, else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            Command::new("git")
                .args(["rev-parse", "HEAD"])
                .output()
                .ok()
                .filter(|output| output.status.success())
                .and_then(|output| String::from_utf8(output.stdout).ok())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/replays/drag.json");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/replays/drag.provenance.json")
        );
    }

    #[test]
    fn git_rev_is_never_empty() {
        assert!(!current_git_rev().is_empty());
    }

    #[test]
    fn sidecar_records_config_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("session.json");
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new(
            json!({"kind": "triangle", "events": 3}),
            json!({"zoom_factor": 1.2}),
        );
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert_eq!(prov_path, dir.path().join("session.provenance.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["kind"], "triangle");
        assert_eq!(parsed["config"]["zoom_factor"], 1.2);
        assert_eq!(parsed["version"], planimetry::VERSION);
    }
}
