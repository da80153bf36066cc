//! Static site building.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()   ──► optional clean, create output dir
//!     │
//!     ├── DocumentStore::resolve()
//!     │       │
//!     │       └── render_public() ──► minify ──► <output>/index.html
//!     │
//!     ├── write_script()     ──► <output>/_folio/site.js
//!     │
//!     └── copy_assets()      ──► <output>/<assets>/...
//! ```

use crate::{
    config::SiteConfig,
    log,
    render::{ProjectFilter, SITE_SCRIPT, load_template, missing_containers, render_public},
    utils::minify::minify,
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Output subdirectory holding generated scripts.
pub const SCRIPT_DIR: &str = "_folio";

/// Files never copied from the assets directory.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Render the public page and copy assets into the output directory.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    let clean = config.build.clean;

    prepare_output(output, clean)?;

    let doc = config.store().resolve();
    let uploads = doc.ephemeral_handles().count();
    if uploads > 0 {
        log!("warn"; "{uploads} session upload(s) referenced, they will not load in the built site");
    }

    let template = load_template(config)?;
    let missing = missing_containers(&template);
    if !missing.is_empty() {
        log!("warn"; "template has no #{}, those sections are skipped", missing.join(", #"));
    }
    let html = render_public(&doc, &template, config, &ProjectFilter::All)?;
    let html = minify(html.as_bytes(), config);
    let index = output.join("index.html");
    fs::write(&index, &*html).with_context(|| format!("Failed to write {}", index.display()))?;
    log!("build"; "index.html");

    write_script(output)?;
    let copied = copy_assets(&config.build.assets, output, clean)?;
    if copied > 0 {
        log!("build"; "copied {copied} asset(s)");
    }

    log!("build"; "done");
    Ok(())
}

/// Create the output directory, removing old content when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn write_script(output: &Path) -> Result<()> {
    let dir = output.join(SCRIPT_DIR);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("site.js"), SITE_SCRIPT)?;
    Ok(())
}

/// Mirror `assets` into `output/<assets dir name>`, skipping up-to-date files.
///
/// Returns how many files were written.
fn copy_assets(assets: &Path, output: &Path, clean: bool) -> Result<usize> {
    if !assets.is_dir() {
        return Ok(0);
    }
    let dest_root = match assets.file_name() {
        Some(name) => output.join(name),
        None => output.to_path_buf(),
    };

    let mut copied = 0;
    for source in collect_all_files(assets) {
        let relative = source.strip_prefix(assets)?;
        let dest = dest_root.join(relative);

        if !clean && is_up_to_date(&source, &dest) {
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&source, &dest)
            .with_context(|| format!("Failed to copy {}", source.display()))?;
        copied += 1;
    }
    Ok(copied)
}

/// All regular files under `dir`, minus OS clutter.
fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Whether `dst` exists and is at least as new as `src`.
fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let mtime = |p: &Path| p.metadata().and_then(|m| m.modified()).ok();
    match (mtime(src), mtime(dst)) {
        (Some(src), Some(dst)) => dst >= src,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::data::{AssetUri, Document};
    use clap::Parser;
    use tempfile::TempDir;

    fn site(toml: &str) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("folio.toml"), toml).unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["folio", "-r", root.as_str(), "build"]).unwrap();

        let mut config = SiteConfig::from_str(toml).unwrap();
        config.update_with_cli(&cli);
        (dir, config)
    }

    #[test]
    fn test_build_writes_page_and_script() {
        let (_dir, config) = site("[build]\nminify = false\n");
        build_site(&config).unwrap();

        let html = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(html.contains("Company C"));
        assert!(html.contains(r#"class="project-item branding""#));
        assert!(config.build.output.join("_folio/site.js").is_file());
    }

    #[test]
    fn test_build_uses_stored_document() {
        let (_dir, config) = site("");
        let doc = Document {
            clients: vec![AssetUri::remote("https://x.com/only-logo.png")],
            ..Document::default()
        };
        config.store().write(&doc).unwrap();

        build_site(&config).unwrap();

        let html = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(html.contains("only-logo.png"));
        assert!(!html.contains("Company C"));
    }

    #[test]
    fn test_build_copies_assets() {
        let (dir, config) = site("");
        let images = dir.path().join("assets/images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("logo1.png"), b"png").unwrap();
        fs::write(images.join(".DS_Store"), b"").unwrap();

        build_site(&config).unwrap();

        let copied = config.build.output.join("assets/images/logo1.png");
        assert_eq!(fs::read(copied).unwrap(), b"png");
        assert!(!config.build.output.join("assets/images/.DS_Store").exists());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let (_dir, mut config) = site("");
        fs::create_dir_all(&config.build.output).unwrap();
        let stale = config.build.output.join("stale.html");
        fs::write(&stale, "old").unwrap();

        config.build.clean = true;
        build_site(&config).unwrap();

        assert!(!stale.exists());
        assert!(config.build.output.join("index.html").is_file());
    }

    #[test]
    fn test_is_up_to_date() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a");
        let dst = dir.path().join("b");
        fs::write(&src, "x").unwrap();
        assert!(!is_up_to_date(&src, &dst));
        fs::write(&dst, "x").unwrap();
        assert!(is_up_to_date(&src, &dst));
    }
}
