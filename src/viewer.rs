use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::output::{render_trip, separator};
use crate::prompt::Prompter;
use crate::trips::TripView;

/// Rows shown per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Offers to page through the raw trips in `view`, `page_size` at a time.
///
/// Returns how many trips were shown.
pub fn show_raw_data<R: BufRead, W: Write>(
    view: &TripView,
    prompter: &mut Prompter<R, W>,
    page_size: usize,
) -> io::Result<usize> {
    let page_size = page_size.max(1);
    let mut shown = 0;
    let mut question = "Do you want to view the raw data?";

    while shown < view.len() && prompter.confirm(question)? {
        let page = view.page(shown, page_size);
        for trip in page {
            writeln!(prompter.output(), "{}", render_trip(trip))?;
        }
        shown += page.len();
        question = "Do you want to view more of the raw data?";
    }

    if shown > 0 && shown >= view.len() {
        writeln!(prompter.output(), "\nNo more trips to show.")?;
    }
    writeln!(prompter.output(), "{}", separator())?;
    debug!(shown, total = view.len(), "Raw data viewer closed");
    Ok(shown)
}
