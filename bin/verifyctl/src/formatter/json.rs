//! Format output to JSON.
use anyhow::Result;
use serde::Serialize;

use verifyctl_client::Session;

use super::ops::Ops;
use super::ops::Responses;
use super::FormatterStrategy;
use crate::globals::Globals;

/// Format output to JSON.
pub struct JsonFormatter;

impl FormatterStrategy for JsonFormatter {
    fn format(&self, _: &Globals, op: Ops) -> Result<Responses> {
        match op {
            Ops::Document(document) => {
                println!("{}", serde_json::to_string_pretty(&document)?);
                Ok(Responses::Success)
            }
            Ops::TenantList => Ok(Responses::from(TenantList::default())),
        }
    }
}

/// Pretty print a list of tenant sessions.
#[derive(Default)]
struct TenantList(Vec<TenantInfo>);

impl super::TenantList for TenantList {
    fn append(&mut self, session: &Session, current: bool) -> Result<()> {
        self.0.push(TenantInfo {
            tenant: session.tenant.clone(),
            user: session.kind.is_user(),
            current,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let value = serde_json::to_string_pretty(&self.0)?;
        println!("{}", value);
        Ok(())
    }
}

/// Container for tenant entries to list, without the tokens.
#[derive(Serialize)]
struct TenantInfo {
    tenant: String,
    user: bool,
    current: bool,
}
