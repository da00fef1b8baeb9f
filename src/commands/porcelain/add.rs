use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Hash a file's content, store the blob, and stage the path
    ///
    /// The blob is written before the index entry so the index never names
    /// a digest the object store cannot resolve.
    pub fn add(&self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (digest, content) = self.workspace().hash_file(path)?;

        if self.index().get(path) == Some(&digest) {
            writeln!(self.writer(), "File already up to date in staging: {}", path)?;
            return Ok(());
        }

        self.database().put(&content)?;
        self.index_mut().stage(path.to_string(), digest.clone());

        writeln!(
            self.writer(),
            "Added file to staging: {} ({})",
            path,
            digest.to_short()
        )?;

        Ok(())
    }
}
