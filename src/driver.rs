use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use tracing::debug;

use crate::constants::defaults::INITIAL_SEED;
use crate::errors::SampleError;
use crate::printing::write_table;
use crate::session::SamplingSession;
use crate::source::RowSource;
use crate::source::sources::{DelimitedSource, DelimitedSourceConfig};
use crate::sql;
use crate::types::Seed;

#[derive(Debug, Parser)]
#[command(
    name = "rowpick",
    disable_help_subcommand = true,
    about = "Interactive without-replacement row sampling",
    long_about = "Draw successive simple random samples, without replacement, from the rows of a delimited text file. A row drawn in one round is never drawn again within the same session.",
    after_help = "Prompts are answered on standard input. Set RUST_LOG=debug for round-by-round logging."
)]
struct Cli {
    #[arg(long, value_name = "PATH", help = "Delimited text file to sample rows from")]
    file: PathBuf,
    #[arg(
        long,
        default_value = "\\t",
        value_parser = parse_delimiter_arg,
        help = "Field delimiter; the literal string \\t selects a tab"
    )]
    delimiter: char,
    #[arg(long, help = "Treat the first line as a row instead of column names")]
    no_header: bool,
    #[arg(
        long,
        help = "Also print the statements a relational backend would need per round"
    )]
    show_sql: bool,
    #[arg(
        long,
        value_name = "QUERY",
        help = "Query text used in --show-sql statements; defaults to selecting the whole file"
    )]
    query: Option<String>,
}

/// Options controlling the interactive loop, separated from the CLI surface
/// so scripted callers can drive [`run_session`] directly.
#[derive(Debug, Clone, Default)]
pub struct DriverOptions {
    /// Print backend statements alongside the session and each round.
    pub show_sql: bool,
    /// Query text used in printed statements.
    pub query: String,
}

enum Destination {
    Screen,
    File(PathBuf),
}

/// Entry point wrapped by the binary: parses arguments, loads the delimited
/// source, and runs the interactive loop over the given streams.
pub fn run_cli<I, R, W>(args_iter: I, input: &mut R, out: &mut W) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
    R: BufRead,
    W: Write,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<Cli, _>(std::iter::once("rowpick".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let source = DelimitedSource::load(
        DelimitedSourceConfig::new(&cli.file)
            .with_delimiter(cli.delimiter)
            .with_header(!cli.no_header),
    )?;

    let query = match &cli.query {
        Some(query) => {
            let query = sql::normalize_query(query);
            if query.is_empty() {
                return Err(
                    SampleError::Configuration("--query must not be empty".into()).into(),
                );
            }
            query
        }
        None => sql::table_query(&file_stem(&cli.file)),
    };
    let options = DriverOptions {
        show_sql: cli.show_sql,
        query,
    };

    run_session(&source, &options, input, out)?;
    Ok(())
}

/// Interactive sampling loop over one row source.
///
/// Each session draws rounds until the user stops or the source is
/// exhausted; ending a session offers a fresh one over the same source with
/// an empty exclusion set. The previous seed is remembered here, across
/// sessions, starting at 0. All malformed answers re-prompt.
pub fn run_session<S, R, W>(
    source: &S,
    options: &DriverOptions,
    input: &mut R,
    out: &mut W,
) -> Result<(), SampleError>
where
    S: RowSource,
    R: BufRead,
    W: Write,
{
    let total = source.row_count();
    writeln!(
        out,
        "source '{}': {} rows, {} columns",
        source.id(),
        total,
        source.column_names().len()
    )?;
    if total == 0 {
        writeln!(out, "the source has no rows to sample")?;
        return Ok(());
    }
    let mut previous_seed = INITIAL_SEED;
    loop {
        if options.show_sql {
            writeln!(
                out,
                "count statement: {}",
                sql::count_statement(&options.query)
            )?;
        }
        let mut session = SamplingSession::new(total);
        loop {
            if session.is_exhausted() {
                writeln!(
                    out,
                    "every row of '{}' has been sampled this session",
                    source.id()
                )?;
                break;
            }
            let requested = prompt_sample_size(input, out)?;
            let seed = prompt_seed(input, out, previous_seed)?;
            previous_seed = seed;

            let outcome = session.draw_round(requested, seed)?;
            if outcome.clamped() {
                writeln!(
                    out,
                    "only {} unsampled rows remained; reducing the sample from {} to {}",
                    outcome.actual(),
                    requested,
                    outcome.actual()
                )?;
            }

            let rows = source.fetch_rows(outcome.positions())?;
            if options.show_sql {
                writeln!(
                    out,
                    "selection statement: {}",
                    sql::selection_statement(&options.query, outcome.positions())
                )?;
            }
            match prompt_destination(input, out)? {
                Destination::Screen => {
                    write_table(out, source.column_names(), &rows)?;
                }
                Destination::File(path) => {
                    let file = File::create(&path)?;
                    let mut writer = BufWriter::new(file);
                    write_table(&mut writer, source.column_names(), &rows)?;
                    writer.flush()?;
                    writeln!(out, "wrote {} rows to {}", rows.len(), path.display())?;
                }
            }
            debug!(seed, rows = rows.len(), "round delivered");

            if !prompt_yes_no(input, out, "Draw another sample from this source? [y/n]: ")? {
                break;
            }
        }
        if !prompt_yes_no(input, out, "Start a fresh session over the same source? [y/n]: ")? {
            break;
        }
    }
    writeln!(out, "done")?;
    Ok(())
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<String, SampleError> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SampleError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended while a prompt was waiting for an answer",
        )));
    }
    Ok(line.trim().to_string())
}

fn prompt_sample_size<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<u64, SampleError> {
    loop {
        let answer = prompt_line(
            input,
            out,
            "Enter the sample size (a whole number of at least 1): ",
        )?;
        match answer.parse::<u64>() {
            Ok(value) if value >= 1 => return Ok(value),
            _ => writeln!(out, "'{answer}' is not a whole number of at least 1")?,
        }
    }
}

fn prompt_seed<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    previous: Seed,
) -> Result<Seed, SampleError> {
    let reuse = prompt_yes_no(
        input,
        out,
        &format!("Reuse the previous seed value ({previous})? [y/n]: "),
    )?;
    if reuse {
        return Ok(previous);
    }
    loop {
        let answer = prompt_line(input, out, "Enter the seed value: ")?;
        match answer.parse::<Seed>() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(out, "'{answer}' is not an unsigned number")?,
        }
    }
}

fn prompt_destination<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Destination, SampleError> {
    loop {
        let answer = prompt_line(
            input,
            out,
            "Send the sample to the [s]creen or to a [f]ile? ",
        )?
        .to_lowercase();
        match answer.as_str() {
            "s" | "screen" => return Ok(Destination::Screen),
            "f" | "file" => loop {
                let path = prompt_line(input, out, "Enter the output file path: ")?;
                if path.is_empty() {
                    writeln!(out, "the output file path cannot be empty")?;
                    continue;
                }
                return Ok(Destination::File(PathBuf::from(path)));
            },
            _ => writeln!(out, "please answer s or f")?,
        }
    }
}

fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<bool, SampleError> {
    loop {
        let answer = prompt_line(input, out, prompt)?.to_lowercase();
        match answer.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "please answer y or n")?,
        }
    }
}

fn parse_delimiter_arg(raw: &str) -> Result<char, String> {
    if raw == "\\t" {
        return Ok('\t');
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(format!(
            "--delimiter expects a single character or \\t, got '{raw}'"
        )),
    }
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn delimiter_arg_accepts_tab_escape_and_single_chars() {
        assert_eq!(parse_delimiter_arg("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter_arg(",").unwrap(), ',');
        assert_eq!(parse_delimiter_arg(";").unwrap(), ';');
        assert!(parse_delimiter_arg("ab").is_err());
        assert!(parse_delimiter_arg("").is_err());
    }

    #[test]
    fn sample_size_prompt_rejects_zero_and_garbage() {
        let mut input = Cursor::new("0\nthree\n-2\n3\n");
        let mut out = Vec::new();
        let size = prompt_sample_size(&mut input, &mut out).unwrap();
        assert_eq!(size, 3);
        let transcript = String::from_utf8(out).unwrap();
        assert!(
            transcript.contains("'0' is not a whole number"),
            "transcript: {transcript}"
        );
        assert!(transcript.contains("'three' is not a whole number"));
    }

    #[test]
    fn seed_prompt_reuses_previous_value() {
        let mut input = Cursor::new("y\n");
        let mut out = Vec::new();
        assert_eq!(prompt_seed(&mut input, &mut out, 42).unwrap(), 42);

        let mut input = Cursor::new("n\n1234\n");
        let mut out = Vec::new();
        assert_eq!(prompt_seed(&mut input, &mut out, 42).unwrap(), 1234);
    }

    #[test]
    fn yes_no_prompt_retries_until_answered() {
        let mut input = Cursor::new("maybe\nY\n");
        let mut out = Vec::new();
        assert!(prompt_yes_no(&mut input, &mut out, "continue? ").unwrap());
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("please answer y or n"));
    }

    #[test]
    fn exhausted_input_is_an_eof_error() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        let err = prompt_yes_no(&mut input, &mut out, "continue? ").unwrap_err();
        match err {
            SampleError::Io(io_err) => {
                assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn destination_prompt_requires_a_file_path() {
        let mut input = Cursor::new("f\n\nout.tsv\n");
        let mut out = Vec::new();
        match prompt_destination(&mut input, &mut out).unwrap() {
            Destination::File(path) => assert_eq!(path, PathBuf::from("out.tsv")),
            Destination::Screen => panic!("expected file destination"),
        }
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("cannot be empty"));
        assert_eq!(
            transcript.matches("Enter the output file path: ").count(),
            2,
            "an empty path should re-ask the path prompt: {transcript}"
        );
        assert!(
            !transcript.contains("please answer s or f"),
            "an empty path must not fall back to the destination question: {transcript}"
        );
    }
}
