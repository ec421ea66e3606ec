use std::io::{self, Write};

use dvornik_model::Flag;

const HEADER: &str = "The following pods have been deleted:";
const DRY_RUN_HEADER: &str = "The following pods would be deleted (dry run):";

/// Line-oriented progress report: one header, then one pod name per line.
///
/// The header is written lazily, at most once.
#[derive(Debug)]
pub struct Report<W: Write> {
    out: W,
    dry_run: Flag,
    header_written: bool,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            dry_run: Flag::disabled(),
            header_written: false,
        }
    }

    /// Switch the header wording for dry runs.
    pub fn dry_run(mut self, dry_run: Flag) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Write the header if it has not been written yet.
    pub fn header(&mut self) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        let header = if self.dry_run.is_enabled() {
            DRY_RUN_HEADER
        } else {
            HEADER
        };
        writeln!(self.out, "{header}")?;
        self.header_written = true;
        Ok(())
    }

    pub fn removed(&mut self, pod: &str) -> io::Result<()> {
        writeln!(self.out, "{pod}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
