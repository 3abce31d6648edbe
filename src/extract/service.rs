//! Extraction service driving the full dump pass.

use crate::config::ExtractConfig;

use super::parse::{ParseOutcome, parse_page};
use super::scan::PageScanner;
use super::shard::ShardWriter;
use super::source::DumpLines;
use super::types::{ExtractError, ExtractSummary};

/// Coordinates one full extraction pass: decompression, page scanning, per-page parsing,
/// and shard writing.
///
/// Scanner, batch writer, and run counters are created per pass, so an extractor carries
/// no state between runs and instances can be constructed freely in tests. Pages are
/// processed strictly in archive order and shard indices reflect that order.
pub struct DumpExtractor {
    config: ExtractConfig,
}

impl DumpExtractor {
    /// Create an extractor for one run over `config`.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Run the forward pass to completion, or to the configured page cap.
    ///
    /// Malformed pages are logged and skipped; only I/O and decode failures abort the
    /// run. The counters accumulated up to an abort are logged alongside the error.
    pub fn run(&self) -> Result<ExtractSummary, ExtractError> {
        tracing::info!(
            dump = %self.config.dump_path.display(),
            output = %self.config.output_dir.display(),
            pages_per_shard = self.config.pages_per_shard,
            max_pages = ?self.config.max_pages,
            "Starting extraction"
        );

        let mut writer = ShardWriter::create(&self.config.output_dir, self.config.pages_per_shard)?;
        let mut pages_seen = 0u64;
        let result = self.drive(&mut writer, &mut pages_seen);

        let summary = ExtractSummary {
            pages_seen,
            shards_written: writer.shards_written(),
        };
        match result {
            Ok(()) => {
                tracing::info!(
                    pages_seen = summary.pages_seen,
                    shards_written = summary.shards_written,
                    "Extraction complete"
                );
                Ok(summary)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    pages_seen = summary.pages_seen,
                    shards_written = summary.shards_written,
                    "Extraction aborted"
                );
                Err(err)
            }
        }
    }

    fn drive(&self, writer: &mut ShardWriter, pages_seen: &mut u64) -> Result<(), ExtractError> {
        let mut scanner = PageScanner::new();
        let lines = DumpLines::open(&self.config.dump_path)?;

        for line in lines {
            let Some(span) = scanner.feed(line?) else {
                continue;
            };
            *pages_seen += 1;

            match parse_page(&span) {
                Ok(ParseOutcome::Article(record)) => {
                    writer.append(record);
                    writer.flush_if_full()?;
                }
                Ok(ParseOutcome::Skipped) => {
                    tracing::trace!(page = *pages_seen, "Page filtered");
                }
                Err(err) => {
                    tracing::warn!(page = *pages_seen, error = %err, "Skipping malformed page");
                }
            }

            // The cap is checked once per completed page; there is no mid-page cancellation.
            if self
                .config
                .max_pages
                .is_some_and(|cap| *pages_seen >= cap)
            {
                tracing::debug!(pages_seen = *pages_seen, "Page cap reached; stopping early");
                break;
            }
        }

        writer.flush_remainder()
    }
}
