use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::quality::Quality;
use crate::translator::BackendKind;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub backends: Option<BackendsConfig>,
    pub translation: Option<TranslationConfig>,
    pub storage: Option<StorageConfig>,
    pub ocr: Option<OcrConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Fallback order, e.g. `["transformers", "mlx", "macos"]`.
    pub order: Option<Vec<String>>,
    pub transformers_url: Option<String>,
    pub mlx_url: Option<String>,
    pub macos_shortcut: Option<String>,
    pub shortcuts_bin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationConfig {
    pub default_quality: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub glossary_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrConfig {
    pub tesseract_bin: Option<String>,
    pub mutool_bin: Option<String>,
}

/// Platform config directory path: `<config_dir>/honyaku/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("honyaku").join("config.toml"))
}

/// Load config by cascading CWD `.honyaku.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".honyaku.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let server = ServerConfig {
        host: pick(&overlay.server, &base.server, |s| s.host.clone()),
        port: pick(&overlay.server, &base.server, |s| s.port),
    };
    let backends = BackendsConfig {
        order: pick(&overlay.backends, &base.backends, |b| b.order.clone()),
        transformers_url: pick(&overlay.backends, &base.backends, |b| {
            b.transformers_url.clone()
        }),
        mlx_url: pick(&overlay.backends, &base.backends, |b| b.mlx_url.clone()),
        macos_shortcut: pick(&overlay.backends, &base.backends, |b| {
            b.macos_shortcut.clone()
        }),
        shortcuts_bin: pick(&overlay.backends, &base.backends, |b| {
            b.shortcuts_bin.clone()
        }),
    };
    let translation = TranslationConfig {
        default_quality: pick(&overlay.translation, &base.translation, |t| {
            t.default_quality.clone()
        }),
        request_timeout_secs: pick(&overlay.translation, &base.translation, |t| {
            t.request_timeout_secs
        }),
    };
    let storage = StorageConfig {
        glossary_path: pick(&overlay.storage, &base.storage, |s| s.glossary_path.clone()),
    };
    let ocr = OcrConfig {
        tesseract_bin: pick(&overlay.ocr, &base.ocr, |o| o.tesseract_bin.clone()),
        mutool_bin: pick(&overlay.ocr, &base.ocr, |o| o.mutool_bin.clone()),
    };

    ConfigFile {
        server: Some(server),
        backends: Some(backends),
        translation: Some(translation),
        storage: Some(storage),
        ocr: Some(ocr),
    }
}

fn pick<S, T>(
    overlay: &Option<S>,
    base: &Option<S>,
    get: impl Fn(&S) -> Option<T>,
) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&get)
        .or_else(|| base.as_ref().and_then(&get))
}

/// Fully-resolved runtime settings: the config file with defaults applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub backend_order: Vec<BackendKind>,
    pub transformers_url: String,
    pub mlx_url: String,
    pub macos_shortcut: String,
    pub shortcuts_bin: String,
    pub default_quality: Quality,
    pub request_timeout_secs: u64,
    pub glossary_path: PathBuf,
    pub tesseract_bin: String,
    pub mutool_bin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8002,
            backend_order: vec![BackendKind::Transformers],
            transformers_url: "http://localhost:8000".to_string(),
            mlx_url: "http://localhost:8080".to_string(),
            macos_shortcut: "Translate Text".to_string(),
            shortcuts_bin: "shortcuts".to_string(),
            default_quality: Quality::Balanced,
            request_timeout_secs: 600,
            glossary_path: PathBuf::from("glossary.json"),
            tesseract_bin: "tesseract".to_string(),
            mutool_bin: "mutool".to_string(),
        }
    }
}

impl Settings {
    /// Apply a parsed config file over the defaults. Unknown backend names
    /// and quality tiers are logged and skipped rather than failing startup.
    pub fn from_file(file: ConfigFile) -> Self {
        let mut settings = Settings::default();

        if let Some(server) = file.server {
            if let Some(host) = server.host {
                settings.host = host;
            }
            if let Some(port) = server.port {
                settings.port = port;
            }
        }
        if let Some(backends) = file.backends {
            if let Some(order) = backends.order {
                let parsed: Vec<BackendKind> = order
                    .iter()
                    .filter_map(|name| match name.parse() {
                        Ok(kind) => Some(kind),
                        Err(e) => {
                            tracing::warn!(error = %e, "ignoring backend in config");
                            None
                        }
                    })
                    .collect();
                if !parsed.is_empty() {
                    settings.backend_order = parsed;
                }
            }
            if let Some(url) = backends.transformers_url {
                settings.transformers_url = url;
            }
            if let Some(url) = backends.mlx_url {
                settings.mlx_url = url;
            }
            if let Some(name) = backends.macos_shortcut {
                settings.macos_shortcut = name;
            }
            if let Some(bin) = backends.shortcuts_bin {
                settings.shortcuts_bin = bin;
            }
        }
        if let Some(translation) = file.translation {
            if let Some(quality) = translation.default_quality {
                match quality.parse() {
                    Ok(q) => settings.default_quality = q,
                    Err(e) => tracing::warn!(error = %e, "ignoring default_quality in config"),
                }
            }
            if let Some(secs) = translation.request_timeout_secs {
                settings.request_timeout_secs = secs;
            }
        }
        if let Some(storage) = file.storage {
            if let Some(path) = storage.glossary_path {
                settings.glossary_path = PathBuf::from(path);
            }
        }
        if let Some(ocr) = file.ocr {
            if let Some(bin) = ocr.tesseract_bin {
                settings.tesseract_bin = bin;
            }
            if let Some(bin) = ocr.mutool_bin {
                settings.mutool_bin = bin;
            }
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_file(ConfigFile::default());
        assert_eq!(settings.port, 8002);
        assert_eq!(settings.backend_order, vec![BackendKind::Transformers]);
        assert_eq!(settings.default_quality, Quality::Balanced);
    }

    #[test]
    fn parses_backend_order() {
        let file: ConfigFile = toml::from_str(
            r#"
            [backends]
            order = ["mlx", "macos"]
            mlx_url = "http://127.0.0.1:9999"
            "#,
        )
        .unwrap();
        let settings = Settings::from_file(file);
        assert_eq!(
            settings.backend_order,
            vec![BackendKind::Mlx, BackendKind::Macos]
        );
        assert_eq!(settings.mlx_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn unknown_backend_is_skipped() {
        let file: ConfigFile = toml::from_str(
            r#"
            [backends]
            order = ["gpu-cluster", "transformers"]
            "#,
        )
        .unwrap();
        let settings = Settings::from_file(file);
        assert_eq!(settings.backend_order, vec![BackendKind::Transformers]);
    }

    #[test]
    fn overlay_wins_in_merge() {
        let base: ConfigFile = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            "#,
        )
        .unwrap();
        let overlay: ConfigFile = toml::from_str(
            r#"
            [server]
            port = 9100
            "#,
        )
        .unwrap();
        let merged = merge(base, overlay);
        let server = merged.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(9100));
    }
}
