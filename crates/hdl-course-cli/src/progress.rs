//! Progress display while the course tree is written.

use std::path::Path;

use hdl_course_core::error::Result;
use hdl_course_core::writer::TreeWriter;
use indicatif::{ProgressBar, ProgressStyle};

/// Wraps a [`TreeWriter`] and ticks a spinner for every file it writes.
pub struct ProgressWriter<W> {
    inner: W,
    bar: ProgressBar,
}

impl<W: TreeWriter> ProgressWriter<W> {
    /// `hidden` suppresses the bar, e.g. when log lines would interleave with it.
    pub fn new(inner: W, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {pos:>4} files  {wide_msg:.dim}") {
            bar.set_style(style);
        }
        Self { inner, bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl<W: TreeWriter> TreeWriter for ProgressWriter<W> {
    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        self.bar.set_message(path.display().to_string());
        self.inner.write(path, content)?;
        self.bar.inc(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdl_course_core::writer::MemoryTree;

    #[test]
    fn test_progress_writer_forwards() {
        let mut writer = ProgressWriter::new(MemoryTree::new(), true);
        writer.write(Path::new("a/b.txt"), "hello").unwrap();
        writer.finish();
        assert_eq!(writer.inner.get("a/b.txt"), Some("hello"));
        assert_eq!(writer.bar.position(), 1);
    }
}
