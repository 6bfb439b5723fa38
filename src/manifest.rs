//! Reading and rewriting the version recorded in a project manifest
//!
//! Supports Node.js `package.json` and Maven `pom.xml`. Writes replace only
//! the version text and leave the rest of the file untouched.

use crate::error::{ResolverError, Result};
use roxmltree::Document;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    PackageJson,
    PomXml,
}

impl ManifestFormat {
    /// Detect the format from the file name
    pub fn detect(path: &Path) -> Result<Self> {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        match file_name {
            "package.json" => Ok(ManifestFormat::PackageJson),
            "pom.xml" => Ok(ManifestFormat::PomXml),
            _ if file_name.ends_with(".json") => Ok(ManifestFormat::PackageJson),
            _ if file_name.ends_with(".xml") => Ok(ManifestFormat::PomXml),
            _ => Err(ResolverError::manifest(format!(
                "Unsupported manifest '{}': expected package.json or pom.xml",
                path.display()
            ))),
        }
    }
}

/// A manifest file loaded into memory
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    format: ManifestFormat,
    contents: String,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ManifestFormat::detect(path)?;
        let contents = fs::read_to_string(path)?;
        Ok(Manifest {
            path: path.to_path_buf(),
            format,
            contents,
        })
    }

    pub fn from_contents(format: ManifestFormat, contents: impl Into<String>) -> Self {
        Manifest {
            path: PathBuf::new(),
            format,
            contents: contents.into(),
        }
    }

    pub fn format(&self) -> ManifestFormat {
        self.format
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Version string recorded in the manifest
    pub fn version(&self) -> Result<String> {
        let range = self.version_range()?;
        Ok(self.contents[range].trim().to_string())
    }

    /// Replace the recorded version
    pub fn set_version(&mut self, version: &str) -> Result<()> {
        let range = self.version_range()?;
        debug!(
            manifest = %self.path.display(),
            from = %self.contents[range.clone()].trim(),
            to = version,
            "rewriting manifest version"
        );
        self.contents.replace_range(range, version);
        Ok(())
    }

    /// Write the contents back to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ResolverError::manifest("Manifest has no file path"));
        }
        fs::write(&self.path, &self.contents)?;
        Ok(())
    }

    fn version_range(&self) -> Result<Range<usize>> {
        match self.format {
            ManifestFormat::PackageJson => package_json_version_range(&self.contents),
            ManifestFormat::PomXml => pom_version_range(&self.contents),
        }
    }
}

/// Byte range of the top-level `"version"` value
fn package_json_version_range(contents: &str) -> Result<Range<usize>> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    if !value.get("version").is_some_and(|v| v.is_string()) {
        return Err(ResolverError::manifest("package.json has no string \"version\" field"));
    }

    root_member_string_range(contents, "version")
        .ok_or_else(|| ResolverError::manifest("Cannot locate \"version\" field in package.json"))
}

/// Range between the quotes of the string value of `key` in the root object.
///
/// Members of nested objects and arrays are skipped by tracking nesting depth.
/// Expects a document that already parsed as JSON.
fn root_member_string_range(contents: &str, key: &str) -> Option<Range<usize>> {
    let bytes = contents.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            b'"' => {
                let close = string_end(bytes, pos)?;
                if depth == 1 && &contents[pos + 1..close] == key {
                    let colon = skip_whitespace(bytes, close + 1);
                    if bytes.get(colon) == Some(&b':') {
                        let open = skip_whitespace(bytes, colon + 1);
                        if bytes.get(open) != Some(&b'"') {
                            return None;
                        }
                        let value_close = string_end(bytes, open)?;
                        return Some(open + 1..value_close);
                    }
                }
                pos = close;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Index of the quote closing the string opened at `open`
fn string_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut pos = open + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

/// Byte range of the text inside `<project><version>`, ignoring `<parent>`
fn pom_version_range(contents: &str) -> Result<Range<usize>> {
    let doc = Document::parse(contents)
        .map_err(|e| ResolverError::manifest(format!("Invalid pom.xml: {}", e)))?;
    let root = doc.root_element();
    if !root.has_tag_name("project") {
        return Err(ResolverError::manifest("pom.xml root element is not <project>"));
    }

    // Only look at direct children of <project>
    let version = root
        .children()
        .find(|child| child.has_tag_name("version"))
        .ok_or_else(|| {
            ResolverError::manifest("pom.xml has no project <version> (inherited from parent?)")
        })?;

    let text = version
        .first_child()
        .filter(|node| node.is_text())
        .ok_or_else(|| ResolverError::manifest("pom.xml <version> is empty"))?;

    let range = text.range();
    let raw = &contents[range.clone()];
    let leading = raw.len() - raw.trim_start().len();
    let trailing = raw.len() - raw.trim_end().len();
    Ok(range.start + leading..range.end - trailing)
}
