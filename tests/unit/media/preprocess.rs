use super::*;
use std::path::PathBuf;

#[test]
fn filter_without_font_uses_default_font() {
    let f = drawtext_filter(&PreprocessOpts::default());
    assert!(f.starts_with("drawtext=text='%{frame_num} / %{pts}'"));
    assert!(f.contains("start_number=1"));
    assert!(f.contains("x=(w-tw)/2:y=h-lh"));
    assert!(f.contains("boxborderw=5"));
    assert!(!f.contains("fontfile"));
}

// Drops one level of backslash escaping and quoting, as ffmpeg's token reader does.
fn unescape_once(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    let mut quoted = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' if !quoted => out.extend(chars.next()),
            '\'' => quoted = !quoted,
            _ => out.push(c),
        }
    }
    out
}

// The graph parser unescapes the filter arguments first, then drawtext reads `fontfile`
// up to the next unescaped `:`.
fn font_option(f: &str) -> String {
    let args = unescape_once(f.strip_prefix("drawtext=").unwrap());
    let rest = args.strip_prefix("fontfile=").unwrap();
    let mut out = String::new();
    let mut chars = rest.chars();
    let mut quoted = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' if !quoted => out.extend(chars.next()),
            '\'' => quoted = !quoted,
            ':' if !quoted => break,
            _ => out.push(c),
        }
    }
    out
}

#[test]
fn filter_escapes_colon_in_font_path() {
    let opts = PreprocessOpts {
        font_file: Some(PathBuf::from("C:/fonts/Arial.ttf")),
        ..PreprocessOpts::default()
    };
    let f = drawtext_filter(&opts);
    assert!(f.starts_with("drawtext=fontfile=C\\\\:/fonts/Arial.ttf:text="));
    assert_eq!(font_option(&f), "C:/fonts/Arial.ttf");
}

#[test]
fn font_path_survives_both_unescaping_levels() {
    for path in [r"C:\fonts\it's.ttf", "/opt/fonts/[mono],bold;1.ttf"] {
        let opts = PreprocessOpts {
            font_file: Some(PathBuf::from(path)),
            ..PreprocessOpts::default()
        };
        let f = drawtext_filter(&opts);
        assert_eq!(font_option(&f), path);
    }
}

#[test]
fn args_copy_audio_and_set_crf() {
    let opts = PreprocessOpts {
        crf: 18,
        ..PreprocessOpts::default()
    };
    let args: Vec<String> = burn_in_args(Path::new("in.mp4"), Path::new("out.mp4"), &opts)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let joined = args.join(" ");
    assert!(joined.starts_with("-y -loglevel error -i in.mp4 -vf drawtext="));
    assert!(joined.ends_with("-c:a copy -c:v libx264 -crf 18 out.mp4"));
}

#[test]
fn missing_input_is_a_preprocess_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = burn_frame_counter(
        &dir.path().join("nope.mp4"),
        &dir.path().join("out.mp4"),
        &PreprocessOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, BeeswarmError::Preprocess(_)));
}
