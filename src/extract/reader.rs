//! Reading previously written shards back as article records.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use super::types::{ArticleRecord, ExtractError};

/// Iterates the shard files of an output directory in index order.
///
/// Consumers read shards the same way they were written: one JSON record per line. Lines
/// that fail to parse are skipped rather than aborting the read, so a shard truncated by
/// an interrupted run does not poison everything after it.
pub struct ShardReader {
    paths: VecDeque<PathBuf>,
    lines: Option<Lines<BufReader<File>>>,
}

impl ShardReader {
    /// Open a reader over every `.json` shard in `output_dir`, sorted by file name.
    ///
    /// The zero-padded shard naming makes lexicographic order equal index order.
    pub fn open(output_dir: &Path) -> Result<Self, ExtractError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(output_dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        Ok(Self {
            paths: paths.into(),
            lines: None,
        })
    }
}

impl Iterator for ShardReader {
    type Item = Result<ArticleRecord, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(lines) = &mut self.lines {
                match lines.next() {
                    Some(Ok(line)) => match serde_json::from_str(&line) {
                        Ok(record) => return Some(Ok(record)),
                        // Unparseable line, skip it and keep reading.
                        Err(_) => continue,
                    },
                    Some(Err(err)) => return Some(Err(ExtractError::Io(err))),
                    None => self.lines = None,
                }
            } else {
                let path = self.paths.pop_front()?;
                match File::open(&path) {
                    Ok(file) => self.lines = Some(BufReader::new(file).lines()),
                    Err(err) => return Some(Err(ExtractError::Io(err))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_shard(dir: &Path, name: &str, lines: &[&str]) {
        let mut file = File::create(dir.join(name)).expect("create shard");
        for line in lines {
            writeln!(file, "{line}").expect("write line");
        }
    }

    #[test]
    fn reads_shards_in_index_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_shard(dir.path(), "wiki_0002.json", &[r#"{"title":"B","text":"b"}"#]);
        write_shard(dir.path(), "wiki_0001.json", &[r#"{"title":"A","text":"a"}"#]);

        let titles: Vec<Option<String>> = ShardReader::open(dir.path())
            .expect("open reader")
            .map(|record| record.expect("record parses").title)
            .collect();
        assert_eq!(
            titles,
            vec![Some("A".to_string()), Some("B".to_string())]
        );
    }

    #[test]
    fn unparseable_lines_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_shard(
            dir.path(),
            "wiki_0001.json",
            &[
                r#"{"title":"A","text":"a"}"#,
                "{truncated",
                r#"{"title":"C","text":"c"}"#,
            ],
        );

        let records: Vec<ArticleRecord> = ShardReader::open(dir.path())
            .expect("open reader")
            .collect::<Result<_, _>>()
            .expect("read shards");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title.as_deref(), Some("C"));
    }

    #[test]
    fn non_shard_files_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_shard(dir.path(), "wiki_0001.json", &[r#"{"title":"A","text":"a"}"#]);
        fs::write(dir.path().join("notes.txt"), "not a shard").expect("write file");

        let records: Vec<ArticleRecord> = ShardReader::open(dir.path())
            .expect("open reader")
            .collect::<Result<_, _>>()
            .expect("read shards");
        assert_eq!(records.len(), 1);
    }
}
