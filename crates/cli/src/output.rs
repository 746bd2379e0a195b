use crate::error::CliError;
use engine::report::RunSummary;

fn render(summary: &RunSummary) -> Result<String, CliError> {
    serde_json::to_string_pretty(summary).map_err(CliError::JsonSerialize)
}

pub async fn write_report(summary: &RunSummary, path: String) -> Result<(), CliError> {
    let json = render(summary)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

pub fn print_report(summary: &RunSummary) -> Result<(), CliError> {
    let json = render(summary)?;
    println!("{json}");
    Ok(())
}
