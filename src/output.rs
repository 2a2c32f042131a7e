use crate::extract::ClipEntry;
use crate::segment::WordSegment;
use anyhow::Result;
use std::fs::File;
use std::path::Path;

pub fn save_manifest_json(path: &Path, entries: &[ClipEntry]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, entries)?;
    Ok(())
}

pub fn save_segments_json(path: &Path, segments: &[WordSegment]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, segments)?;
    Ok(())
}
