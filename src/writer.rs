use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::renderer::RenderedPage;

/// What happened to a page on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Skipped,
    DryRun,
}

/// Persists rendered pages as `<output_dir>/<name>.<suffix>`.
#[derive(Debug, Clone)]
pub struct PageWriter {
    output_dir: PathBuf,
    suffix: String,
    force: bool,
    dry_run: bool,
}

impl PageWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            suffix: String::from("rst"),
            force: false,
            dry_run: false,
        }
    }

    /// File suffix without the leading dot; a leading dot is tolerated.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = suffix.trim_start_matches('.').to_string();
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Page names become file names directly, so they must not contain path
    /// separators or be `.`/`..`.
    pub fn check_name(&self, name: &str) -> Result<()> {
        let unsafe_name = name.is_empty()
            || name == "."
            || name == ".."
            || name.chars().any(|c| c == '\\' || std::path::is_separator(c));
        if unsafe_name {
            return Err(Error::UnsafePageName(name.to_string()));
        }
        Ok(())
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", name, self.suffix))
    }

    /// Write one page. Existing files are left alone unless `force` is set.
    pub fn write_page(&self, name: &str, contents: &str) -> Result<WriteOutcome> {
        self.check_name(name)?;
        let path = self.path_for(name);
        let exists = path.exists();

        if self.dry_run {
            info!("Would create file {}.", path.display());
            return Ok(WriteOutcome::DryRun);
        }

        if exists && !self.force {
            info!("File {} already exists, skipping.", path.display());
            return Ok(WriteOutcome::Skipped);
        }

        if !self.output_dir.is_dir() {
            debug!(dir = %self.output_dir.display(), "creating output directory");
            fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;
        }

        info!("Creating file {}.", path.display());
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;

        Ok(if exists {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        })
    }

    /// Write every page after checking all names, so a bad name leaves no
    /// files behind.
    pub fn write_pages(&self, pages: &[RenderedPage]) -> Result<Vec<WriteOutcome>> {
        for page in pages {
            self.check_name(&page.name)?;
        }
        pages
            .iter()
            .map(|page| self.write_page(&page.name, &page.contents))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_uses_suffix() {
        let writer = PageWriter::new("out").with_suffix(".txt");
        assert_eq!(writer.path_for("pkg.mod"), PathBuf::from("out").join("pkg.mod.txt"));
        assert_eq!(
            PageWriter::new("out").path_for("pkg"),
            PathBuf::from("out").join("pkg.rst")
        );
    }

    #[test]
    fn test_creates_missing_output_dir() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let writer = PageWriter::new(temp.path().join("api").join("nested"));

        assert_eq!(writer.write_page("pkg", "body\n")?, WriteOutcome::Created);
        assert_eq!(fs::read_to_string(writer.path_for("pkg"))?, "body\n");
        Ok(())
    }

    #[test]
    fn test_existing_file_is_skipped_without_force() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let writer = PageWriter::new(temp.path());
        fs::write(writer.path_for("pkg"), "old\n")?;

        assert_eq!(writer.write_page("pkg", "new\n")?, WriteOutcome::Skipped);
        assert_eq!(fs::read_to_string(writer.path_for("pkg"))?, "old\n");

        let writer = writer.with_force(true);
        assert_eq!(writer.write_page("pkg", "new\n")?, WriteOutcome::Overwritten);
        assert_eq!(fs::read_to_string(writer.path_for("pkg"))?, "new\n");
        Ok(())
    }

    #[test]
    fn test_names_with_separators_are_rejected() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let out = temp.path().join("api");
        let writer = PageWriter::new(&out).with_force(true);

        for name in ["../x", "a/b", "a\\b", "..", "."] {
            assert!(matches!(
                writer.write_page(name, "body\n"),
                Err(Error::UnsafePageName(ref rejected)) if rejected == name
            ));
        }
        assert!(!temp.path().join("x.rst").exists());
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn test_write_pages_checks_every_name_first() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let writer = PageWriter::new(temp.path());
        let page = |name: &str| RenderedPage {
            name: name.to_string(),
            contents: String::from("body\n"),
        };

        let pages = vec![page("pkg"), page("../escape")];
        assert!(writer.write_pages(&pages).is_err());
        assert!(!writer.path_for("pkg").exists());

        let pages = vec![page("pkg"), page("pkg.sub")];
        assert_eq!(
            writer.write_pages(&pages)?,
            vec![WriteOutcome::Created, WriteOutcome::Created]
        );
        Ok(())
    }

    #[test]
    fn test_dry_run_touches_nothing() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let out = temp.path().join("api");
        let writer = PageWriter::new(&out).with_dry_run(true);

        assert_eq!(writer.write_page("pkg", "body\n")?, WriteOutcome::DryRun);
        assert!(!out.exists());
        Ok(())
    }
}
