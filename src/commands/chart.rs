//! Chart command handler.

use crate::args::ChartArgs;
use crate::chart::PieChart;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};

/// Prints a text pie chart of spending by category and writes the SVG rendering.
///
/// # Errors
///
/// - Returns an error if there are no expenses, or they all total zero.
/// - Returns an error if the SVG file cannot be written.
pub fn chart(config: Config, args: ChartArgs) -> Result<Out<PieChart>> {
    let tracker = config.load_expenses().pub_result(ErrorType::Io)?;
    let chart = PieChart::new(&tracker).pub_result(ErrorType::Validation)?;

    let output = args
        .output()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| config.chart_path());
    chart.write_svg(&output).pub_result(ErrorType::Io)?;

    let message = format!(
        "{}\n\nPie chart written to {}",
        chart.render_text(),
        output.display()
    );
    Ok(Out::new(message, chart))
}
