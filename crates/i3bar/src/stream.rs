//! Line framing of the status stream.

use std::io::{self, BufRead, Lines, Write};

use serde_json::Value;
use tracing::{debug, trace};

use crate::{Error, Placement, Result, TitleOptions};

/// Insert the title block into one status line.
///
/// The line may carry the leading `,` that separates array elements in the
/// endless i3bar array; it is preserved on the output.
pub fn transform_line(line: &str, title: &str, opts: &TitleOptions) -> Result<String> {
    let line = line.trim();
    let (prefix, body) = match line.strip_prefix(',') {
        Some(rest) => (",", rest.trim_start()),
        None => ("", line),
    };

    let blocks: Vec<Value> = serde_json::from_str(body).map_err(Error::BadInput)?;
    let title_block = serde_json::to_value(opts.block(title)).map_err(Error::Encode)?;

    let mut all = Vec::with_capacity(blocks.len() + 1);
    match opts.placement {
        Placement::Start => {
            all.push(title_block);
            all.extend(blocks);
        }
        Placement::End => {
            all.extend(blocks);
            all.push(title_block);
        }
    }

    let json = serde_json::to_string(&all).map_err(Error::Encode)?;
    Ok(format!("{prefix}{json}"))
}

/// Pass one framing line through unchanged apart from trimming.
fn copy_framing<R, W>(
    lines: &mut Lines<R>,
    output: &mut W,
    missing: fn(Option<io::Error>) -> Error,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let line = match lines.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => return Err(missing(Some(e))),
        None => return Err(missing(None)),
    };
    writeln!(output, "{}", line.trim())?;
    Ok(())
}

/// Copy `input` to `output`, adding the current title to every status line.
///
/// `title` is asked for the active window title once per status line. The
/// version header and the array opener pass through untouched, blank lines are
/// skipped, and `output` is flushed after every line so the bar sees each
/// update immediately. Returns `Ok(())` at end of input.
pub fn run<R, W, F>(input: R, mut output: W, mut title: F, opts: &TitleOptions) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> String,
{
    let mut lines = input.lines();
    copy_framing(&mut lines, &mut output, Error::MissingHeader)?;
    copy_framing(&mut lines, &mut output, Error::MissingArrayStart)?;
    output.flush()?;
    debug!("status stream header passed through");

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            trace!("skipping blank status line");
            continue;
        }
        let out = transform_line(&line, &title(), opts)?;
        writeln!(output, "{out}")?;
        output.flush()?;
    }
    debug!("status stream ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPU: &str = r#"[{"full_text":"CPU 3%","name":"cpu_usage"}]"#;

    #[test]
    fn prepends_by_default() {
        let out = transform_line(CPU, "foo", &TitleOptions::default()).unwrap();
        assert_eq!(
            out,
            r##"[{"color":"#00FF00","full_text":"foo","name":"window_title"},{"full_text":"CPU 3%","name":"cpu_usage"}]"##
        );
    }

    #[test]
    fn appends_when_placed_at_end() {
        let opts = TitleOptions {
            placement: Placement::End,
            color: "#112233".into(),
            fixed_width: None,
        };
        let out = transform_line(CPU, "foo", &opts).unwrap();
        assert_eq!(
            out,
            r##"[{"full_text":"CPU 3%","name":"cpu_usage"},{"color":"#112233","full_text":"foo","name":"window_title"}]"##
        );
    }

    #[test]
    fn keeps_leading_comma() {
        let out = transform_line(&format!("  ,{CPU}  "), "foo", &TitleOptions::default()).unwrap();
        assert!(out.starts_with(r#",[{"color""#), "{out}");
    }

    #[test]
    fn empty_array_gets_only_title() {
        let out = transform_line("[]", "", &TitleOptions::default()).unwrap();
        assert_eq!(
            out,
            r##"[{"color":"#00FF00","full_text":"","name":"window_title"}]"##
        );
    }

    #[test]
    fn title_is_json_escaped() {
        let out = transform_line("[]", r#"say "hi" \ bye"#, &TitleOptions::default()).unwrap();
        assert!(out.contains(r#""full_text":"say \"hi\" \\ bye""#), "{out}");
    }

    #[test]
    fn non_array_line_is_bad_input() {
        let err = transform_line(r#"{"full_text":"x"}"#, "foo", &TitleOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::BadInput(_)));
        assert_eq!(err.exit_code(), 5);
    }
}
