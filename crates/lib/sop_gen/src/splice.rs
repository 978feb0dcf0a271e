//! Replace-between-markers splicing of a target source file.

use std::{fs, path::Path};

use log::{debug, info};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "START GEN".into(),
            end: "END GEN".into(),
        }
    }
}

/// Preserved parts of a target file. The header runs through the first line
/// containing the start marker, the footer from the first line containing
/// the end marker to EOF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Document<'a> {
    pub header: &'a str,
    pub footer: &'a str,
}

impl<'a> Document<'a> {
    pub fn split(content: &'a str, markers: &Markers) -> Result<Self> {
        let mut header_end = None;
        let mut footer_start = None;
        let mut offset = 0;
        for line in content.split_inclusive('\n') {
            if header_end.is_none() && line.contains(markers.start.as_str()) {
                header_end = Some(offset + line.len());
            }
            if footer_start.is_none() && line.contains(markers.end.as_str()) {
                footer_start = Some(offset);
            }
            offset += line.len();
        }
        let header_end = header_end.ok_or_else(|| Error::MissingMarker {
            marker: markers.start.clone(),
        })?;
        let footer_start = footer_start.ok_or_else(|| Error::MissingMarker {
            marker: markers.end.clone(),
        })?;
        if footer_start < header_end {
            return Err(Error::MarkersOutOfOrder {
                start: markers.start.clone(),
                end: markers.end.clone(),
            });
        }
        Ok(Self {
            header: &content[..header_end],
            footer: &content[footer_start..],
        })
    }

    pub fn assemble(&self, body: Option<&str>) -> String {
        let body = body.unwrap_or("");
        let mut s = String::with_capacity(self.header.len() + body.len() + self.footer.len());
        s.push_str(self.header);
        s.push_str(body);
        s.push_str(self.footer);
        s
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpliceOutcome {
    pub changed: bool,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Content `path` would hold after splicing `body` between its markers.
pub fn spliced_content(
    path: &Path,
    markers: &Markers,
    body: Option<&str>,
) -> Result<(String, String)> {
    let current = read(path)?;
    let next = Document::split(&current, markers)?.assemble(body);
    Ok((current, next))
}

/// Rewrites `path` in full with `body` between the markers, or with nothing
/// between them when `body` is `None`.
pub fn splice_file(path: &Path, markers: &Markers, body: Option<&str>) -> Result<SpliceOutcome> {
    let (current, next) = spliced_content(path, markers, body)?;
    let changed = current != next;
    fs::write(path, &next).map_err(|e| Error::io(path, e))?;
    if changed {
        info!("updated {}", path.display());
    } else {
        debug!("{} already up to date", path.display());
    }
    Ok(SpliceOutcome { changed })
}

/// Whether `path` already holds what [`splice_file`] would write.
pub fn check_file(path: &Path, markers: &Markers, body: Option<&str>) -> Result<bool> {
    let (current, next) = spliced_content(path, markers, body)?;
    Ok(current == next)
}

/// Writes `content` to `path`, failing if the file already exists.
pub fn create_file(path: &Path, content: &str) -> Result<()> {
    use std::io::Write;
    let mut f = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                Error::AlreadyExists(path.to_path_buf())
            } else {
                Error::io(path, e)
            }
        })?;
    f.write_all(content.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    info!("created {}", path.display());
    Ok(())
}
