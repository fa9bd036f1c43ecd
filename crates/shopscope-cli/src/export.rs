use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Local;
use chrono::TimeZone;

pub fn export_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("scope-{}.md", at.format("%Y%m%d-%H%M%S"))
}

/// Writes the brief into `dir` and returns the path written.
pub fn export_document(dir: &Path, text: &str) -> io::Result<PathBuf> {
    let path = dir.join(export_file_name(&Local::now()));
    let mut body = text.to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    fs::write(&path, body)?;
    Ok(path)
}
