// src/fetch.rs

//! Source archive fetching
//!
//! Archives are downloaded into a cache keyed by their pinned
//! checksum, verified with SHA-256, and unpacked with the single
//! top-level directory stripped (upstream release tarballs wrap
//! everything in `name-version/`). A cache hit skips the download but
//! is still verified, so a corrupted cache entry is re-fetched rather
//! than trusted.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Fetch a source archive into the cache, verifying its checksum
///
/// Returns the path of the cached archive. The checksum doubles as
/// the cache key, so two recipes pinning the same archive share one
/// cache entry.
pub fn fetch_source(url: &str, checksum: &str, cache_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(cache_dir)?;

    let cache_key = checksum.replace(':', "_");
    let cached_path = cache_dir.join(&cache_key);

    if cached_path.exists() {
        debug!("Using cached source: {}", cached_path.display());
        match verify_file_checksum(&cached_path, checksum) {
            Ok(()) => return Ok(cached_path),
            Err(_) => {
                warn!("Cached file checksum mismatch, re-downloading");
                fs::remove_file(&cached_path)?;
            }
        }
    }

    info!("Downloading: {}", url);
    let temp_path = cache_dir.join(format!("{}.tmp", cache_key));

    download_file(url, &temp_path)?;

    if let Err(e) = verify_file_checksum(&temp_path, checksum) {
        fs::remove_file(&temp_path)?;
        return Err(e);
    }

    fs::rename(&temp_path, &cached_path)?;
    Ok(cached_path)
}

/// Unpack a gzip-compressed tar archive, stripping the root directory
///
/// Release tarballs wrap everything in a single `name-version/`
/// directory, which is dropped. An archive with more than one
/// top-level directory, an absolute member path, or a `..` component
/// anywhere is rejected: nothing may land outside `dest`.
pub fn unpack_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive)
        .map_err(|e| Error::IoError(format!("Failed to open archive: {}", e)))?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);

    fs::create_dir_all(dest)?;

    let mut root: Option<std::ffi::OsString> = None;
    for entry in tar
        .entries()
        .map_err(|e| Error::IoError(format!("Failed to read archive: {}", e)))?
    {
        let mut entry =
            entry.map_err(|e| Error::IoError(format!("Corrupt archive entry: {}", e)))?;
        let path = entry
            .path()
            .map_err(|e| Error::IoError(format!("Invalid path in archive: {}", e)))?
            .into_owned();

        let mut components = path.components();
        let first = match components.next() {
            Some(Component::Normal(c)) => c.to_os_string(),
            None => continue,
            Some(_) => {
                return Err(Error::IoError(format!(
                    "Unsafe path in archive: {}",
                    path.display()
                )))
            }
        };

        match &root {
            None => root = Some(first),
            Some(r) if *r == first => {}
            Some(r) => {
                return Err(Error::IoError(format!(
                    "Archive has multiple top-level directories: '{}' and '{}'",
                    Path::new(r).display(),
                    Path::new(&first).display()
                )))
            }
        }

        // Drop the leading `name-version/` component; everything left
        // must stay strictly below dest.
        let mut stripped = PathBuf::new();
        for component in components {
            match component {
                Component::Normal(c) => stripped.push(c),
                Component::CurDir => {}
                _ => {
                    return Err(Error::IoError(format!(
                        "Unsafe path in archive: {}",
                        path.display()
                    )))
                }
            }
        }
        if stripped.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(&stripped);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        entry
            .unpack(&target)
            .map_err(|e| Error::IoError(format!("Failed to unpack {}: {}", stripped.display(), e)))?;
    }

    Ok(())
}

/// Download a file from a URL
fn download_file(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| Error::DownloadError(format!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::DownloadError(format!(
            "Failed to download {}: HTTP {}",
            url,
            response.status()
        )));
    }

    let mut file = fs::File::create(dest)?;
    let mut body = response;
    std::io::copy(&mut body, &mut file)
        .map_err(|e| Error::DownloadError(format!("Failed to write {}: {}", dest.display(), e)))?;

    Ok(())
}

/// Verify a file against a `sha256:<hex>` checksum
fn verify_file_checksum(path: &Path, expected: &str) -> Result<()> {
    let (algorithm, expected_hash) = expected
        .split_once(':')
        .ok_or_else(|| Error::ParseError("Invalid checksum format".to_string()))?;

    if algorithm != "sha256" {
        return Err(Error::ParseError(format!(
            "Unsupported checksum algorithm: {} (supported: sha256)",
            algorithm
        )));
    }

    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let actual = hex::encode(hasher.finalize());
    if actual != expected_hash.to_ascii_lowercase() {
        return Err(Error::ChecksumMismatch {
            expected: expected.to_string(),
            actual: format!("sha256:{}", actual),
        });
    }

    Ok(())
}
