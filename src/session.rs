//! One-shot and interactive analysis runs.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{error, info, warn};

use crate::analyzers::analyzer::analyze;
use crate::analyzers::types::CityReport;
use crate::config::DatasetSource;
use crate::filter::Selection;
use crate::loader::load_data;
use crate::output::{print_json, print_pretty, render_report};
use crate::prompt::Prompter;
use crate::viewer::{DEFAULT_PAGE_SIZE, show_raw_data};

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Emit reports as JSON instead of text.
    pub json: bool,
    /// Rows per page in the raw data viewer.
    pub page_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            json: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn emit(report: &CityReport, out: &mut impl Write, options: &SessionOptions) -> Result<()> {
    print_pretty(report);
    if options.json {
        print_json(report, out)
    } else {
        Ok(render_report(report, out)?)
    }
}

/// Loads, filters and reports on one city without prompting.
///
/// Loader and aggregator errors are returned to the caller.
pub fn run_once(
    source: &DatasetSource,
    city: &str,
    selection: &Selection,
    out: &mut impl Write,
    options: &SessionOptions,
) -> Result<CityReport> {
    let dataset = load_data(source, city, selection)?;
    let report = analyze(dataset.city(), selection, &dataset.view())?;
    emit(&report, out, options)?;
    Ok(report)
}

/// Prompt loop: choose filters, view raw rows, read the reports, restart.
///
/// Data errors are shown as one-line messages and the user may restart;
/// only I/O failures on the prompt streams end the session early.
pub fn run_interactive<R: BufRead, W: Write>(
    source: &DatasetSource,
    prompter: &mut Prompter<R, W>,
    options: &SessionOptions,
) -> Result<()> {
    writeln!(prompter.output(), "Hello! Let's explore some US bikeshare data!")?;

    loop {
        let (city, selection) = prompter.ask_selection(source)?;
        writeln!(prompter.output(), "\nRetrieving requested data...")?;

        match load_data(source, &city, &selection) {
            Ok(dataset) => {
                let view = dataset.view();
                show_raw_data(&view, prompter, options.page_size)?;
                match analyze(dataset.city(), &selection, &view) {
                    Ok(report) => emit(&report, prompter.output(), options)?,
                    Err(e) => {
                        warn!(error = %e, "Analysis failed");
                        writeln!(prompter.output(), "\n{e}")?;
                    }
                }
            }
            Err(e) => {
                error!(error = %e, city = %city, "Failed to load trip data");
                writeln!(prompter.output(), "\n{e}")?;
            }
        }

        if !prompter.confirm("Would you like to restart the program?")? {
            break;
        }
        info!("Restarting session");
    }

    writeln!(prompter.output(), "\nGoodbye!")?;
    Ok(())
}

/// `true` when `err` means the prompt input was closed.
pub fn is_closed_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_is_closed_input() {
        let eof: anyhow::Error = io::Error::new(io::ErrorKind::UnexpectedEof, "closed").into();
        assert!(is_closed_input(&eof));

        let other: anyhow::Error = io::Error::other("disk on fire").into();
        assert!(!is_closed_input(&other));
    }

    #[test]
    fn test_interactive_reports_missing_file_and_ends() {
        let dir = tempfile::tempdir().unwrap();
        let source = DatasetSource::builtin(dir.path());
        let mut p = Prompter::new(Cursor::new(b"washington\nall\nall\nno\n".to_vec()), Vec::new());

        run_interactive(&source, &mut p, &SessionOptions::default()).unwrap();

        let text = String::from_utf8(p.into_output()).unwrap();
        assert!(text.contains("Could not read trip data from"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_run_once_unknown_city() {
        let source = DatasetSource::builtin(".");
        let mut out = Vec::new();
        let err = run_once(
            &source,
            "gotham",
            &Selection::default(),
            &mut out,
            &SessionOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown city: gotham");
    }

    #[test]
    fn test_run_once_errors_display_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chicago.csv"), ",Start Time\n0,2017-01-02 08:00:00\n").unwrap();
        let source = DatasetSource::builtin(dir.path());

        for city in ["chicago", "washington"] {
            let err = run_once(
                &source,
                city,
                &Selection::default(),
                &mut Vec::new(),
                &SessionOptions::default(),
            )
            .unwrap_err();
            let message = format!("{err}");
            assert!(!message.contains('\n'), "multi-line message: {message}");
            assert!(message.contains(&format!("{city}.csv")));
        }
    }
}
