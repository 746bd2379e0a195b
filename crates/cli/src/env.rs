use crate::error::CliError;
use engine::config::Environment;

/// Merges `KEY=VALUE` lines from an env file into the captured environment.
///
/// Lines starting with `#` and blank lines are skipped; values may be
/// wrapped in single or double quotes.
pub async fn apply_env_file(env: &mut Environment, path: &str) -> Result<(), CliError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_env_content(env, &content)
}

fn parse_env_content(env: &mut Environment, content: &str) -> Result<(), CliError> {
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(CliError::EnvFile(format!(
                "malformed line {} (expected KEY=VALUE)",
                line_num + 1
            )));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::EnvFile(format!(
                "empty key at line {}",
                line_num + 1
            )));
        }

        env.set(key, unquote(value.trim()));
    }

    Ok(())
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            return inner;
        }
        if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            return inner;
        }
    }
    value
}
