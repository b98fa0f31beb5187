use anyhow::Result;

/// Resolve an optional leading `~/` to the current user's HOME path.
pub fn resolve_home(path: &str) -> Result<String> {
    if path.starts_with("~/") {
        let home = home_dir()?;
        Ok(path.replacen('~', &home, 1))
    } else {
        Ok(path.to_string())
    }
}

/// Return the path to the current user home directory.
fn home_dir() -> Result<String> {
    match std::env::var("HOME") {
        Err(std::env::VarError::NotPresent) => anyhow::bail!("unable to lookup the $HOME path"),
        Err(std::env::VarError::NotUnicode(_)) => anyhow::bail!("unable to UTF-8 decode $HOME"),
        Ok(path) => Ok(path),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_home;

    #[test]
    fn absolute_paths_are_unchanged() {
        assert_eq!(resolve_home("/etc/verifyctl").unwrap(), "/etc/verifyctl");
        assert_eq!(resolve_home("relative/~/path").unwrap(), "relative/~/path");
    }
}
