//! Errors detected by the client before or after talking to the tenant.

/// A resource document is missing required fields.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub struct ValidationError {
    /// Kind of resource the document describes.
    pub kind: &'static str,

    /// List of problems found with the document.
    pub violations: Vec<String>,
}

impl ValidationError {
    /// Collect violations for a document, returning an error only if any were found.
    pub fn check(kind: &'static str, violations: Vec<String>) -> Result<(), ValidationError> {
        if violations.is_empty() {
            return Ok(());
        }
        Err(ValidationError { kind, violations })
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let violations = self.violations.join("\n  - ");
        write!(f, "invalid {} document:\n  - {}", self.kind, violations)
    }
}

/// More than one resource matched a name that must be unique.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("found {matches} {kind} resources named '{name}'")]
pub struct AmbiguousName {
    /// Kind of resource that was searched.
    pub kind: String,

    /// Name that was searched for.
    pub name: String,

    /// Number of resources matching the name.
    pub matches: usize,
}

/// The tenant refused to issue a token.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub struct LoginRejected {
    /// OAuth error code returned by the tenant.
    pub error: String,

    /// Human readable description returned by the tenant, if any.
    pub description: Option<String>,
}

impl std::fmt::Display for LoginRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "login rejected by the tenant: {}", self.error)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

/// The device authorization expired before the user approved it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("the login request expired before it was approved")]
pub struct LoginExpired;

#[cfg(test)]
mod tests {
    use super::LoginRejected;
    use super::ValidationError;

    #[test]
    fn validation_without_violations() {
        assert!(ValidationError::check("apiclient", Vec::new()).is_ok());
    }

    #[test]
    fn validation_lists_violations() {
        let error = ValidationError::check(
            "apiclient",
            vec!["clientName is required".into(), "entitlements is required".into()],
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid apiclient document:\n  - clientName is required\n  - entitlements is required",
        );
    }

    #[test]
    fn login_rejected_message() {
        let error = LoginRejected {
            error: "access_denied".into(),
            description: Some("user declined".into()),
        };
        assert_eq!(
            error.to_string(),
            "login rejected by the tenant: access_denied (user declined)",
        );
        let error = LoginRejected {
            error: "invalid_client".into(),
            description: None,
        };
        assert_eq!(error.to_string(), "login rejected by the tenant: invalid_client");
    }
}
