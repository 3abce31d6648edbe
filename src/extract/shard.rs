//! Batched shard output in JSON-lines format.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::types::{ArticleRecord, ExtractError};

/// Accumulates accepted articles and writes them out as numbered shard files.
///
/// Shards are named `wiki_NNNN.json` with a 1-based, zero-padded index; each line of a
/// shard is one serialized [`ArticleRecord`]. Indices stay contiguous no matter how many
/// pages were skipped between flushes. Shard files are write-once; a failed write leaves
/// the partial file in place and aborts the run.
pub struct ShardWriter {
    output_dir: PathBuf,
    pages_per_shard: usize,
    pending: Vec<ArticleRecord>,
    next_index: u64,
    shards_written: u64,
}

impl ShardWriter {
    /// Create a writer targeting `output_dir`, creating the directory if needed.
    pub fn create(output_dir: &Path, pages_per_shard: usize) -> Result<Self, ExtractError> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            pages_per_shard,
            pending: Vec::new(),
            next_index: 1,
            shards_written: 0,
        })
    }

    /// Add an accepted article to the pending batch. Always succeeds in memory.
    pub fn append(&mut self, record: ArticleRecord) {
        self.pending.push(record);
    }

    /// Write the pending batch out if it has reached the shard size; a no-op below it.
    pub fn flush_if_full(&mut self) -> Result<(), ExtractError> {
        if self.pending.len() >= self.pages_per_shard {
            self.write_shard()?;
        }
        Ok(())
    }

    /// Write any pending articles regardless of batch size; called once at end of stream.
    pub fn flush_remainder(&mut self) -> Result<(), ExtractError> {
        if !self.pending.is_empty() {
            self.write_shard()?;
        }
        Ok(())
    }

    /// Number of shard files written so far.
    pub fn shards_written(&self) -> u64 {
        self.shards_written
    }

    fn write_shard(&mut self) -> Result<(), ExtractError> {
        let path = self
            .output_dir
            .join(format!("wiki_{:04}.json", self.next_index));
        let mut writer = BufWriter::new(File::create(&path)?);
        for record in &self.pending {
            serde_json::to_writer(&mut writer, record).map_err(std::io::Error::from)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        tracing::info!(
            shard = %path.display(),
            articles = self.pending.len(),
            "Shard written"
        );
        self.pending.clear();
        self.next_index += 1;
        self.shards_written += 1;
        Ok(())
    }
}
