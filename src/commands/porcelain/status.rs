use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::UnstagedChange;
use crate::artifacts::status::status_info::StatusReport;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let report = self.status_report()?;
        self.print_status_report(&report)
    }

    /// Render a status report; also used by checkout when it refuses to
    /// touch a dirty working directory
    pub(crate) fn print_status_report(&self, report: &StatusReport) -> anyhow::Result<()> {
        let head = self.head().clone();

        match head.branch() {
            Some(branch) => {
                writeln!(self.writer(), "On branch {}", branch.as_str().green())?;
            }
            None => {
                writeln!(self.writer(), "On branch {}", "(detached HEAD)".yellow())?;
            }
        }
        match head.commit() {
            Some(digest) => {
                writeln!(self.writer(), "HEAD points to: {}", digest.to_short().yellow())?;
            }
            None => {
                writeln!(self.writer(), "HEAD points to: No commits yet")?;
            }
        }
        writeln!(self.writer())?;

        if report.has_staged() {
            writeln!(self.writer(), "Changes to be committed:")?;
            for (path, change) in report.staged() {
                writeln!(self.writer(), "{}", change.render(path))?;
            }
            writeln!(self.writer())?;
        }

        if report.has_unstaged_changes() {
            writeln!(self.writer(), "Changes not staged for commit:")?;
            for (path, change) in report.unstaged_changes() {
                writeln!(self.writer(), "{}", change.render(path))?;
            }
            writeln!(self.writer())?;
        }

        if report.has_untracked() {
            writeln!(self.writer(), "Untracked files:")?;
            writeln!(
                self.writer(),
                "  (use \"minigit add <file>...\" to include in what will be committed)"
            )?;
            for path in report.untracked() {
                writeln!(self.writer(), "{}", UnstagedChange::Untracked.render(path))?;
            }
            writeln!(self.writer())?;
        }

        if report.is_clean() {
            writeln!(self.writer(), "Your working directory is clean.")?;
        }

        Ok(())
    }
}
