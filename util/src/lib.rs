use std::{
    fs,
    io::{self, Read},
    ops::Range,
    path::Path,
};

use anyhow::{Context, Result};
use miette::GraphicalReportHandler;

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("{reason}")]
struct BadInput<'a> {
    #[source_code]
    src: &'a str,

    #[label("here")]
    bad_bit: miette::SourceSpan,

    reason: String,
}

// No span marks the whole line
pub fn render_bad_input(src: &str, span: Option<Range<usize>>, reason: impl Into<String>) -> String {
    let reason = reason.into();
    let span = match span {
        // miette won't draw an empty label past the last character
        Some(span) if span.is_empty() && span.start >= src.len() => src
            .char_indices()
            .last()
            .map(|(i, c)| i..i + c.len_utf8())
            .unwrap_or(span),
        Some(span) => span,
        None => 0..src.len(),
    };
    let err = BadInput {
        src,
        bad_bit: (span.start, span.len()).into(),
        reason: reason.clone(),
    };

    let mut s = String::new();
    match GraphicalReportHandler::new().render_report(&mut s, &err) {
        Ok(()) => s,
        Err(_) => format!("bad input: {reason}: {src:?}"),
    }
}

pub fn read_input_as_string(path: Option<impl AsRef<Path>>) -> Result<String> {
    match path {
        Some(path) => {
            let path = path.as_ref();
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut s = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut s)
                .context("reading stdin")?;
            Ok(s)
        }
    }
}

// RUST_LOG overrides the warn default
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_bad_input_mentions_reason() {
        let s = render_bad_input("rect 3", Some(5..6), "expected <W>x<H>");
        assert!(s.contains("expected <W>x<H>"));
        assert!(s.contains("rect 3"));
    }

    #[test]
    fn render_bad_input_at_end_of_line() {
        let s = render_bad_input("rect 3x", Some(7..7), "`` is not a number");
        assert!(s.contains("`` is not a number"));
        assert!(s.contains("rect 3x"));
    }

    #[test]
    fn render_bad_input_without_span() {
        let s = render_bad_input("", None, "no command provided");
        assert!(s.contains("no command provided"));
    }

    #[test]
    fn read_missing_file_fails() {
        let res = read_input_as_string(Some("/definitely/not/here"));
        assert!(res.is_err());
        assert!(format!("{:#}", res.unwrap_err()).contains("/definitely/not/here"));
    }
}
