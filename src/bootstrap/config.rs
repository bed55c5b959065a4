//! Resolve the effective picker configuration for a run.

use std::path::Path;

use mp_core::PickerConfig;
use mp_infra::{default_config_path, load_picker_config};
use tracing::{info, warn};

use crate::cli::RunOptions;

/// Pick the config file: an explicit `--config` must load, the default
/// location is used only when present, otherwise defaults apply.
pub fn resolve_config(options: &RunOptions) -> anyhow::Result<PickerConfig> {
    let mut config = match &options.config {
        Some(path) => load_picker_config(path)?,
        None => load_default_config(default_config_path().as_deref()),
    };

    if let Some(album) = &options.album {
        config.album = Some(album.clone());
    }
    if let Some(kind) = options.kind {
        config.asset_kind = kind;
    }

    Ok(config)
}

fn load_default_config(path: Option<&Path>) -> PickerConfig {
    let Some(path) = path.filter(|path| path.exists()) else {
        info!("No picker config found, using defaults");
        return PickerConfig::default();
    };

    match load_picker_config(path) {
        Ok(config) => {
            info!(path = %path.display(), "Loaded picker config");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Ignoring unreadable picker config");
            PickerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::{AlbumName, AssetKindFilter};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn options(config: Option<PathBuf>) -> RunOptions {
        RunOptions {
            manifest: PathBuf::from("gallery.json"),
            config,
            album: None,
            kind: None,
            extra_pages: Some(0),
            taps: Vec::new(),
        }
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[picker]\npage_size = 12\nalbum = \"Camera\"\n")
            .unwrap();

        let mut options = options(Some(file.path().to_path_buf()));
        options.album = Some(AlbumName::from("Screenshots"));
        options.kind = Some(AssetKindFilter::Photo);

        let config = resolve_config(&options).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.album, Some(AlbumName::from("Screenshots")));
        assert_eq!(config.asset_kind, AssetKindFilter::Photo);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let options = options(Some(PathBuf::from("/nonexistent/picker.toml")));
        assert!(resolve_config(&options).is_err());
    }

    #[test]
    fn test_unreadable_default_config_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not = [valid").unwrap();

        assert_eq!(load_default_config(Some(file.path())), PickerConfig::default());
        assert_eq!(load_default_config(None), PickerConfig::default());
    }
}
