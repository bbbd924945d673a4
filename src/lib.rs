//! Draws the Format Finder app icon at every size an iOS
//! `AppIcon.appiconset` needs and writes the matching Contents.json.

pub mod compose;
pub mod contents_json;
pub mod icon_set;
