use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::PreprocessOpts;
use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::error::{BeeswarmError, BeeswarmResult};

/// Re-encode `input` into `output` with a `frame / pts` counter burned in at the bottom center.
///
/// Frame numbering starts at 1. Audio is stream-copied.
#[tracing::instrument(skip(opts), fields(input = %input.display(), output = %output.display()))]
pub fn burn_frame_counter(input: &Path, output: &Path, opts: &PreprocessOpts) -> BeeswarmResult<()> {
    if !input.is_file() {
        return Err(BeeswarmError::preprocess(format!(
            "source video '{}' does not exist",
            input.display()
        )));
    }
    ensure_parent_dir(output)?;

    let out = Command::new("ffmpeg")
        .args(burn_in_args(input, output, opts))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            BeeswarmError::preprocess(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !out.status.success() {
        return Err(BeeswarmError::preprocess(format!(
            "ffmpeg burn-in of '{}' exited with status {}: {}",
            input.display(),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    tracing::debug!("frame counter burned in");
    Ok(())
}

pub(crate) fn drawtext_filter(opts: &PreprocessOpts) -> String {
    let mut filter = String::from("drawtext=");
    if let Some(font) = opts.font_file.as_deref() {
        filter.push_str("fontfile=");
        filter.push_str(&escape_filter_value(&font.to_string_lossy()));
        filter.push(':');
    }
    filter.push_str(
        "text='%{frame_num} / %{pts}':start_number=1:x=(w-tw)/2:y=h-lh:\
         fontcolor=black:fontsize=(h/20):box=1:boxcolor=white:boxborderw=5",
    );
    filter
}

pub(crate) fn burn_in_args(input: &Path, output: &Path, opts: &PreprocessOpts) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_owned());
    args.push("-vf".into());
    args.push(drawtext_filter(opts).into());
    for a in ["-c:a", "copy", "-c:v", "libx264", "-crf"] {
        args.push(a.into());
    }
    args.push(opts.crf.to_string().into());
    args.push(output.as_os_str().to_owned());
    args
}

// Option values are unescaped twice: once by the filtergraph parser, once by the
// filter's option parser.
fn escape_filter_value(s: &str) -> String {
    backslash_escape(&backslash_escape(s, "\\':"), "\\'[],;")
}

fn backslash_escape(s: &str, special: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/media/preprocess.rs"]
mod tests;
