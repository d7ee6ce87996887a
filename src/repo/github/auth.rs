use anyhow::{Result, anyhow};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

fn token_from_env_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(raw) => Ok(clean_token(&raw)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(anyhow!("failed to read env {name}: {e}")),
    }
}

fn clean_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Read the API token from `GITHUB_TOKEN`.
///
/// A missing or blank variable is not an error here: the client is built
/// without credentials and the API rejects the first call instead.
pub fn resolve_github_token() -> Result<Option<String>> {
    token_from_env_var(TOKEN_ENV)
}
