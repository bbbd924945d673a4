use crate::compose::compose;
use crate::contents_json::{ContentsFile, Idiom, ImageEntry};
use anyhow::{bail, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage,
};
use std::{
    collections::HashSet,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// A logical icon name and the edge length it is rendered at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub name: &'static str,
    pub pixels: u32,
}

const fn icon(name: &'static str, pixels: u32) -> IconSpec {
    IconSpec { name, pixels }
}

/// Every icon the app icon set needs, in manifest order
///
/// The iPad notification, settings and spotlight sizes repeat names that
/// already appear in the iPhone block.
pub const ICON_SPECS: [IconSpec; 18] = [
    // iPhone notification
    icon("20x20@2x", 40),
    icon("20x20@3x", 60),
    // iPhone settings
    icon("29x29@2x", 58),
    icon("29x29@3x", 87),
    // iPhone spotlight
    icon("40x40@2x", 80),
    icon("40x40@3x", 120),
    // iPhone app
    icon("60x60@2x", 120),
    icon("60x60@3x", 180),
    // iPad notification
    icon("20x20@1x", 20),
    icon("20x20@2x", 40),
    // iPad settings
    icon("29x29@1x", 29),
    icon("29x29@2x", 58),
    // iPad spotlight
    icon("40x40@1x", 40),
    icon("40x40@2x", 80),
    // iPad app
    icon("76x76@1x", 76),
    icon("76x76@2x", 152),
    // iPad Pro app
    icon("83.5x83.5@2x", 167),
    // App Store
    icon("1024x1024@1x", 1024),
];

/// What to do with table entries whose logical name was already seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep only the first occurrence of each name
    #[default]
    Skip,
    /// Render every entry; later duplicates overwrite the earlier PNG and
    /// get their own manifest entry
    Keep,
}

/// The icon table filtered by `policy`, in table order
pub fn icon_specs(policy: DuplicatePolicy) -> Vec<IconSpec> {
    match policy {
        DuplicatePolicy::Keep => ICON_SPECS.to_vec(),
        DuplicatePolicy::Skip => {
            let mut seen = HashSet::new();
            ICON_SPECS
                .iter()
                .copied()
                .filter(|spec| seen.insert(spec.name))
                .collect()
        }
    }
}

/// A logical name such as `83.5x83.5@2x`, split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalName<'a> {
    /// Point size without the scale suffix, e.g. `83.5x83.5`
    pub size: &'a str,
    /// Scale suffix, `1x` when the name has none
    pub scale: &'a str,
    pub width: &'a str,
    pub height: &'a str,
}

impl<'a> LogicalName<'a> {
    pub fn parse(name: &'a str) -> Result<Self> {
        let mut parts = name.split('@');
        let size = parts.next().unwrap_or_default();
        let scale = parts.next().unwrap_or("1x");

        let halves: Vec<&str> = size.split('x').collect();
        let &[width, height] = halves.as_slice() else {
            bail!("Icon name {name:?} must start with <width>x<height>");
        };

        Ok(Self {
            size,
            scale,
            width,
            height,
        })
    }

    /// App Store artwork is 1024x1024; anything at least 76pt wide is
    /// an iPad icon, the rest are iPhone icons.
    pub fn idiom(&self) -> Result<Idiom> {
        if self.size.contains("1024x1024") {
            return Ok(Idiom::IosMarketing);
        }

        let width: u32 = self
            .width
            .replace(".5", "")
            .parse()
            .with_context(|| format!("Invalid icon width {:?} in {:?}", self.width, self.size))?;

        if width >= 76 {
            Ok(Idiom::Ipad)
        } else {
            Ok(Idiom::Iphone)
        }
    }
}

/// Determine the device idiom for a logical icon name
pub fn determine_idiom(name: &str) -> Result<Idiom> {
    LogicalName::parse(name)?.idiom()
}

pub fn icon_filename(name: &str) -> String {
    format!("icon_{name}.png")
}

/// Build the Contents.json entry describing `name`
pub fn manifest_entry(name: &str) -> Result<ImageEntry> {
    let logical = LogicalName::parse(name)?;
    let idiom = logical
        .idiom()
        .with_context(|| format!("Can't determine idiom for {name}"))?;

    Ok(ImageEntry::new(
        icon_filename(name),
        idiom,
        logical.scale.to_string(),
        logical.size.to_string(),
    ))
}

/// Render every icon in `specs` into `out_dir` and write its Contents.json
///
/// Files are written in order and existing files are overwritten. The
/// first failure aborts the run; files already written are left in place.
///
/// # Returns
/// The manifest that was written
pub fn generate_icon_set(out_dir: &Path, specs: &[IconSpec]) -> Result<ContentsFile> {
    create_dir_all(out_dir)
        .with_context(|| format!("Can't create output directory {}", out_dir.display()))?;

    let mut contents = ContentsFile::new();

    for spec in specs {
        let icon = compose(spec.pixels);
        let entry = manifest_entry(spec.name)?;

        write_png(&icon, &out_dir.join(&entry.filename))?;
        println!(
            "  ✓ Generated {} ({}x{}px)",
            entry.filename, spec.pixels, spec.pixels
        );

        contents.add_image(entry);
    }

    let contents_path = contents.write_to_dir(out_dir)?;
    println!("  ✓ Generated Contents.json at: {}", contents_path.display());

    Ok(contents)
}

/// Generate the full app icon set into `out_dir`
pub fn generate(out_dir: &Path, policy: DuplicatePolicy) -> Result<ContentsFile> {
    generate_icon_set(out_dir, &icon_specs(policy))
}

// Encode as RGB PNG with the best compression
fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;

    out.flush()
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_idiom_derivation() {
        assert_eq!(determine_idiom("1024x1024@1x").unwrap(), Idiom::IosMarketing);
        assert_eq!(determine_idiom("76x76@1x").unwrap(), Idiom::Ipad);
        assert_eq!(determine_idiom("83.5x83.5@2x").unwrap(), Idiom::Ipad);
        assert_eq!(determine_idiom("60x60@3x").unwrap(), Idiom::Iphone);
        assert_eq!(determine_idiom("20x20@2x").unwrap(), Idiom::Iphone);
    }

    #[test]
    fn test_logical_name_parsing() {
        let name = LogicalName::parse("83.5x83.5@2x").unwrap();
        assert_eq!(name.size, "83.5x83.5");
        assert_eq!(name.scale, "2x");
        assert_eq!(name.width, "83.5");
        assert_eq!(name.height, "83.5");
    }

    #[test]
    fn test_scale_defaults_to_1x() {
        let name = LogicalName::parse("40x40").unwrap();
        assert_eq!(name.size, "40x40");
        assert_eq!(name.scale, "1x");

        let entry = manifest_entry("40x40").unwrap();
        assert_eq!(entry.filename, "icon_40x40.png");
        assert_eq!(entry.scale, "1x");
        assert_eq!(entry.size, "40x40");
    }

    #[test]
    fn test_malformed_names_are_rejected() {
        assert!(LogicalName::parse("20@2x").is_err());
        assert!(LogicalName::parse("20x20x20@2x").is_err());

        let err = manifest_entry("wide x tall@2x").unwrap_err();
        assert!(format!("{err:#}").contains("Invalid icon width"));
    }

    #[test]
    fn test_manifest_entry_fields() {
        let entry = manifest_entry("1024x1024@1x").unwrap();
        assert_eq!(entry.filename, "icon_1024x1024@1x.png");
        assert_eq!(entry.idiom, Idiom::IosMarketing);
        assert_eq!(entry.scale, "1x");
        assert_eq!(entry.size, "1024x1024");
    }

    #[test]
    fn test_icon_table_duplicates() {
        let all = icon_specs(DuplicatePolicy::Keep);
        assert_eq!(all.len(), 18);
        assert_eq!(all, ICON_SPECS.to_vec());

        let unique = icon_specs(DuplicatePolicy::Skip);
        let names: Vec<&str> = unique.iter().map(|spec| spec.name).collect();
        assert_eq!(
            names,
            [
                "20x20@2x",
                "20x20@3x",
                "29x29@2x",
                "29x29@3x",
                "40x40@2x",
                "40x40@3x",
                "60x60@2x",
                "60x60@3x",
                "20x20@1x",
                "29x29@1x",
                "40x40@1x",
                "76x76@1x",
                "76x76@2x",
                "83.5x83.5@2x",
                "1024x1024@1x",
            ]
        );
    }

    #[test]
    fn test_every_table_entry_has_a_manifest_entry() {
        for spec in ICON_SPECS {
            let entry = manifest_entry(spec.name).unwrap();
            assert!(entry.filename.starts_with("icon_"));
            assert_ne!(entry.scale, "");
        }
    }

    #[test]
    fn test_generate_small_icon_set() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("nested").join("AppIcon.appiconset");
        let specs = [icon("20x20@1x", 20), icon("20x20@2x", 40), icon("20x20@1x", 20)];

        let contents = generate_icon_set(&out_dir, &specs).unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents.images[0].filename, "icon_20x20@1x.png");
        assert_eq!(contents.images[2].filename, "icon_20x20@1x.png");

        let png = image::open(out_dir.join("icon_20x20@2x.png")).unwrap();
        assert_eq!((png.width(), png.height()), (40, 40));

        let mut files: Vec<String> = std::fs::read_dir(&out_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        assert_eq!(
            files,
            ["Contents.json", "icon_20x20@1x.png", "icon_20x20@2x.png"]
        );
    }

    #[test]
    fn test_generate_rejects_file_as_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("occupied");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = generate_icon_set(&blocker, &[icon("20x20@1x", 20)]).unwrap_err();
        assert!(err.to_string().contains("Can't create output directory"));
    }
}
