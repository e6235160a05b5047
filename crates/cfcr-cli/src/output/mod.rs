use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;
pub mod views;

/// How a value looks in `--format table`.
pub trait TableView {
    fn render_table(&self, options: table::TableOptions) -> String;
}

/// Render a response to a string in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> anyhow::Result<String>
where
    T: Serialize + TableView + ?Sized,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(value.render_table(ui::table_options())),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T>(value: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + TableView + ?Sized,
{
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}
