use std::fs;
use std::io::{self, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::catalog::AUDIO_SUFFIX;
use crate::error::SfxError;

pub fn find_audio_member<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Option<usize> {
    (0..archive.len()).find(|&index| {
        archive
            .by_index(index)
            .map(|entry| !entry.is_dir() && is_audio_name(entry.name()))
            .unwrap_or(false)
    })
}

pub fn is_audio_name(name: &str) -> bool {
    name.to_lowercase().ends_with(AUDIO_SUFFIX)
}

pub fn extract_audio(zip_path: &Path, destination: &Path) -> Result<String, SfxError> {
    let file = fs::File::open(zip_path)
        .map_err(|err| SfxError::Filesystem(format!("open zip {}: {err}", zip_path.display())))?;
    let mut archive = ZipArchive::new(file).map_err(|err| SfxError::Archive(err.to_string()))?;

    let index = find_audio_member(&mut archive).ok_or(SfxError::NoAudioMember)?;
    let mut entry = archive
        .by_index(index)
        .map_err(|err| SfxError::Archive(err.to_string()))?;
    let member = entry.name().to_string();

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut extracted = tempfile::Builder::new()
        .prefix(".sfx-extract")
        .tempfile_in(parent)
        .map_err(|err| SfxError::Filesystem(err.to_string()))?;
    io::copy(&mut entry, extracted.as_file_mut())
        .map_err(|err| SfxError::Archive(format!("extract {member}: {err}")))?;

    extracted
        .persist(destination)
        .map_err(|err| SfxError::Filesystem(err.to_string()))?;
    Ok(member)
}
