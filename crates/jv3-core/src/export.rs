//! Clipboard and download-as-file glue for generated code.
//!
//! Both actions can fail for reasons outside the app (no clipboard helper
//! installed, unwritable directory). Callers surface the error as a
//! notification and carry on; application state is never touched here.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::error::{Jv3Error, Result};
use crate::template::TemplateId;

/// Something that can take text for the system clipboard
pub trait ClipboardSink {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Pipes text into the platform's clipboard helper
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

type Helper = (&'static str, &'static [&'static str]);

const MACOS_HELPERS: &[Helper] = &[("pbcopy", &[])];
const WINDOWS_HELPERS: &[Helper] = &[("clip", &[])];
const UNIX_HELPERS: &[Helper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl SystemClipboard {
    fn candidates() -> &'static [Helper] {
        if cfg!(target_os = "macos") {
            MACOS_HELPERS
        } else if cfg!(target_os = "windows") {
            WINDOWS_HELPERS
        } else {
            UNIX_HELPERS
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut tried = Vec::new();

        for (program, args) in Self::candidates() {
            let child = Command::new(program)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let mut child = match child {
                Ok(child) => child,
                Err(_) => {
                    tried.push(*program);
                    continue;
                }
            };

            let status = feed_and_wait(&mut child, text)?;
            if !status.success() {
                return Err(Jv3Error::clipboard(format!("{} exited with {}", program, status)));
            }
            tracing::debug!(program, bytes = text.len(), "copied to clipboard");
            return Ok(());
        }

        Err(Jv3Error::NoClipboardTool(tried.join(", ")))
    }
}

/// Write `text` to the child's stdin, close it, and reap the child. The
/// child is waited on even when the write fails.
fn feed_and_wait(child: &mut Child, text: &str) -> Result<ExitStatus> {
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    written?;
    Ok(status)
}

/// Default file name for downloading the generated code
pub fn generated_file_name(template: Option<TemplateId>) -> &'static str {
    match template {
        Some(TemplateId::Website) => "website.html",
        Some(TemplateId::Button) => "Button.jsx",
        Some(TemplateId::Card) => "Card.jsx",
        Some(TemplateId::Default) | None => "MyComponent.jsx",
    }
}

/// Save `contents` as `file_name` in `dir`. An existing file is never
/// overwritten; a numeric suffix is added instead.
pub fn download(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = unique_path(dir, file_name);
    fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "downloaded code");
    Ok(path)
}

fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };

    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{}-{}.{}", stem, n, ext)),
            None => dir.join(format!("{}-{}", stem, n)),
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
