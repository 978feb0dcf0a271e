use std::{path::Path, process::Command};

use log::{debug, info};

use crate::error::{Error, Result};

/// External source formatter run over a rewritten file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formatter {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            program: "zig".into(),
            args: vec!["fmt".into()],
        }
    }
}

impl Formatter {
    /// Parses a whitespace-separated command line such as `zig fmt`.
    ///
    /// There is no quoting: a program or argument containing spaces cannot be
    /// expressed this way. Build the struct directly for those.
    pub fn parse(cmd: &str) -> Result<Self> {
        let mut words = cmd.split_whitespace().map(String::from);
        let program = words.next().ok_or(Error::EmptyFormatterCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Runs the formatter with `path` appended and checks its exit status.
    pub fn run(&self, path: &Path) -> Result<()> {
        debug!("running {} {:?} {}", self.program, self.args, path.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| Error::FormatterSpawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(Error::FormatterFailed {
                program: self.program.clone(),
                status,
            });
        }
        info!("formatted {} with {}", path.display(), self.program);
        Ok(())
    }
}
