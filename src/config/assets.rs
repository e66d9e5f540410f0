//! Asset pipeline configuration types.

use std::path::PathBuf;

use serde::Deserialize;

/// Build-time asset pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Stylesheet entry point and output directory.
    pub stylesheet: AssetPaths,
    /// Script to minify and its output directory.
    pub script: AssetPaths,
    /// Icon sprite to compress. Skipped when absent.
    pub icons: Option<AssetPaths>,
    /// External tools.
    pub tools: AssetTools,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            stylesheet: AssetPaths {
                source: PathBuf::from("style/style.scss"),
                dest: PathBuf::from("static"),
            },
            script: AssetPaths {
                source: PathBuf::from("static/js/accessibility.js"),
                dest: PathBuf::from("static/js"),
            },
            icons: None,
            tools: AssetTools::default(),
        }
    }
}

/// Source file and output directory of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetPaths {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Executables the pipeline shells out to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetTools {
    pub sass: String,
    pub terser: String,
    pub svgo: String,
}

impl Default for AssetTools {
    fn default() -> Self {
        Self {
            sass: "sass".to_string(),
            terser: "terser".to_string(),
            svgo: "svgo".to_string(),
        }
    }
}
