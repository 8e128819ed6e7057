//! Batch orchestration: validate → decode → XMP extract → tag → JSON write.
//!
//! Processing is strictly sequential: one image is fully decoded, tagged,
//! and written before the next begins. There is no retry and no
//! partial-batch recovery; every input is validated up front so a bad path
//! or a non-image aborts the run before any output file is written.

use std::path::{Path, PathBuf};

use crate::config::LimitsConfig;
use crate::error::Result;
use crate::llm::ImageInput;
use crate::tagger::{PlayerTagger, Task};
use crate::xmp;

use super::decode::ImageDecoder;
use super::validate::Validator;

/// Output file name for one input image: `<original_basename>_imagetags.json`.
pub fn tag_file_name(path: &Path) -> String {
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    format!("{base}_imagetags.json")
}

/// Tag a batch of image files, writing one JSON tag file per input into
/// `tags_dir`. Existing tag files are overwritten. Returns the written paths
/// in input order.
pub async fn run_batch(
    files: &[PathBuf],
    tagger: &PlayerTagger,
    task: Task,
    tags_dir: &Path,
    limits: &LimitsConfig,
) -> Result<Vec<PathBuf>> {
    // Fail fast: validate every input before tagging any of them.
    let validator = Validator::new(limits.clone());
    for path in files {
        validator.validate(path)?;
    }

    std::fs::create_dir_all(tags_dir)?;
    let decoder = ImageDecoder::new(limits.clone());

    let mut written = Vec::with_capacity(files.len());
    for path in files {
        let output_path = process_one(path, tagger, task, tags_dir, &decoder).await?;
        written.push(output_path);
    }
    Ok(written)
}

/// Process a single image end to end and write its tag file.
async fn process_one(
    path: &Path,
    tagger: &PlayerTagger,
    task: Task,
    tags_dir: &Path,
    decoder: &ImageDecoder,
) -> Result<PathBuf> {
    let start = std::time::Instant::now();
    let bytes = tokio::fs::read(path).await?;

    // Decode proves the pixels are readable; the model request carries the
    // original encoded bytes.
    let decoded = decoder.decode_from_bytes(bytes.clone(), path).await?;
    tracing::debug!(
        "Decoded {:?} ({}x{}, {})",
        path,
        decoded.width,
        decoded.height,
        decoded.format
    );

    // Missing or malformed XMP degrades to an empty headline rather than
    // failing the batch.
    let metadata = xmp::extract(&bytes);
    let headline = xmp::headline(&metadata);

    let image = ImageInput::from_bytes(&bytes, &decoded.format);
    let tags = tagger.tag(&image, &headline, task).await?;

    let output_path = tags_dir.join(tag_file_name(path));
    let json = serde_json::to_vec(&tags)?;
    std::fs::write(&output_path, json)?;

    tracing::info!(
        "Tagged {:?} -> {:?} in {:?}",
        path,
        output_path,
        start.elapsed()
    );
    Ok(output_path)
}
