//! Contents.json data model for an Xcode `AppIcon.appiconset`
//!
//! Only the four per-image keys Xcode needs for a classic app icon set are
//! modelled. Field order matches the order Xcode itself writes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONTENTS_FILE_NAME: &str = "Contents.json";

/// Root structure of a Contents.json file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentsFile {
    /// One entry per generated icon, in generation order
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within the icon set
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// The PNG file name, relative to the icon set directory
    pub filename: String,

    /// The device family the icon targets
    pub idiom: Idiom,

    /// The scale factor (e.g. "1x", "2x", "3x")
    pub scale: String,

    /// The size in points (e.g. "60x60", "83.5x83.5")
    pub size: String,
}

/// Device family an icon is made for
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Idiom {
    Iphone,
    Ipad,
    /// App Store listing artwork
    IosMarketing,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// The application or tool that authored the asset catalog
    pub author: String,

    /// The format version of the asset catalog
    pub version: u8,
}

impl Idiom {
    pub fn as_str(self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
        }
    }
}

impl Default for Info {
    /// Xcode's own authorship tag, version 1
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

impl Default for ContentsFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentsFile {
    /// Creates an empty Contents.json with the default `info` block
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            info: Info::default(),
        }
    }

    /// Adds an image entry to the contents file
    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Serializes as JSON indented by two spaces
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")
    }

    /// Writes `Contents.json` into `dir`, replacing any existing file
    ///
    /// # Returns
    /// The path of the written file
    ///
    /// # Errors
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONTENTS_FILE_NAME);
        let json = self.to_json_pretty()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl ImageEntry {
    pub fn new(filename: String, idiom: Idiom, scale: String, size: String) -> Self {
        Self {
            filename,
            idiom,
            scale,
            size,
        }
    }
}
