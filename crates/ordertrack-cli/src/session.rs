//! Line-oriented interactive tracker: one view, reused for every search.

use std::io::Write;

use ordertrack_client::OrderSearch;
use ordertrack_view::{DateFormatter, Submission, TrackerView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const PROMPT: &str = "> ";

/// Renders the idle screen, then submits each input line as an order number
/// and re-renders until `input` is exhausted.
///
/// Lines that are not valid UTF-8 are decoded lossily and submitted like any
/// other input.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails.
pub(crate) async fn run<R, W, C>(
    mut input: R,
    mut output: W,
    view: &mut TrackerView,
    client: &C,
    dates: &DateFormatter,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    C: OrderSearch,
{
    write!(output, "{}{PROMPT}", view.screen(dates))?;
    output.flush()?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        view.set_input(line.trim_end_matches(['\n', '\r']));

        writeln!(output)?;
        search_and_render(view, client, dates, &mut output).await?;
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

/// Submits the view's current input. When a search starts, the loading
/// screen is written before the search runs; the settled screen is written
/// last in every case.
///
/// # Errors
///
/// Returns an error if writing `output` fails.
pub(crate) async fn search_and_render<W, C>(
    view: &mut TrackerView,
    client: &C,
    dates: &DateFormatter,
    output: &mut W,
) -> anyhow::Result<Submission>
where
    W: Write,
    C: OrderSearch,
{
    let submission = view.submit();
    tracing::debug!(?submission, "search submitted");

    if let Submission::Started(pending) = &submission {
        write!(output, "{}", view.screen(dates))?;
        writeln!(output)?;
        output.flush()?;

        let outcome = client.fetch_order(&pending.order_number).await;
        view.resolve(pending.seq, outcome);
    }

    write!(output, "{}", view.screen(dates))?;
    output.flush()?;
    Ok(submission)
}
