//! Streaming access to the listing snapshot.

use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

const READ_CHUNK: usize = 64 * 1024;

/// Counts newline bytes in `path` without holding the file in memory.
///
/// Matches `wc -l`: a final line with no trailing newline is not counted.
pub async fn count_lines(path: &Path) -> std::io::Result<usize> {
    let mut file = File::open(path).await?;
    let mut buf = vec![0u8; READ_CHUNK];
    let mut count = 0;

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        count += buf[..n].iter().filter(|&&b| b == b'\n').count();
    }

    Ok(count)
}

/// Yields the snapshot lines with index in `[header, line_count - footer)`.
pub struct SnapshotWindow {
    reader: BufReader<File>,
    index: usize,
    start: usize,
    end: usize,
    buf: Vec<u8>,
}

impl SnapshotWindow {
    /// Opens `path`, counting its lines first to locate the footer.
    pub async fn open(path: &Path, header: usize, footer: usize) -> std::io::Result<Self> {
        let line_count = count_lines(path).await?;
        Self::with_line_count(path, header, footer, line_count).await
    }

    /// Opens `path` using a line count obtained elsewhere.
    pub async fn with_line_count(
        path: &Path,
        header: usize,
        footer: usize,
        line_count: usize,
    ) -> std::io::Result<Self> {
        let file = File::open(path).await?;
        Ok(Self {
            reader: BufReader::new(file),
            index: 0,
            start: header,
            end: line_count.saturating_sub(footer),
            buf: Vec::new(),
        })
    }

    /// Number of lines the window will yield.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next line in the window, or `None` once the footer is reached.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        while self.index < self.end {
            self.buf.clear();
            let n = self.reader.read_until(b'\n', &mut self.buf).await?;
            if n == 0 {
                return Ok(None);
            }

            let index = self.index;
            self.index += 1;
            if index >= self.start {
                return Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn numbered_lines(n: usize) -> String {
        (0..n).map(|i| format!("line{}\n", i)).collect()
    }

    async fn collect(window: &mut SnapshotWindow) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = window.next_line().await.unwrap() {
            lines.push(line.trim_end().to_string());
        }
        lines
    }

    #[tokio::test]
    async fn test_count_lines_matches_newlines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("radio");

        std::fs::write(&path, "a\nb\nc\n").unwrap();
        assert_eq!(count_lines(&path).await.unwrap(), 3);

        std::fs::write(&path, "a\nb\nc").unwrap();
        assert_eq!(count_lines(&path).await.unwrap(), 2);

        std::fs::write(&path, "").unwrap();
        assert_eq!(count_lines(&path).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_lines_missing_file() {
        let result = count_lines(Path::new("/nonexistent/radio")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_nine_lines_yield_one() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("radio");
        std::fs::write(&path, numbered_lines(9)).unwrap();

        let mut window = SnapshotWindow::open(&path, 6, 2).await.unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(collect(&mut window).await, vec!["line6"]);
    }

    #[tokio::test]
    async fn test_short_snapshot_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("radio");

        for n in [0, 1, 2, 7, 8] {
            std::fs::write(&path, numbered_lines(n)).unwrap();
            let mut window = SnapshotWindow::open(&path, 6, 2).await.unwrap();
            assert!(window.is_empty(), "{} lines", n);
            assert!(collect(&mut window).await.is_empty(), "{} lines", n);
        }
    }

    #[tokio::test]
    async fn test_unterminated_last_line_shifts_footer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("radio");
        // 10 lines, last one without newline: wc -l says 9
        let mut content = numbered_lines(9);
        content.push_str("line9");
        std::fs::write(&path, content).unwrap();

        let mut window = SnapshotWindow::open(&path, 6, 2).await.unwrap();
        assert_eq!(collect(&mut window).await, vec!["line6"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_lossy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("radio");
        let mut content = numbered_lines(1).into_bytes();
        content.extend_from_slice(b"pid1,Caf\xe9,Ep\n");
        content.extend_from_slice(b"footer\n");
        std::fs::write(&path, content).unwrap();

        let mut window = SnapshotWindow::open(&path, 1, 1).await.unwrap();
        let lines = collect(&mut window).await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("pid1,Caf"));
    }
}
