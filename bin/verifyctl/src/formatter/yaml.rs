//! Format output as YAML documents and tables, for people to read.
use anyhow::Result;
use serde_json::Value as Json;

use verifyctl_client::Session;

use super::ops::Ops;
use super::ops::Responses;
use super::FormatterStrategy;
use crate::globals::Globals;

/// Format output as YAML documents and tables, for people to read.
pub struct YamlFormatter;

impl FormatterStrategy for YamlFormatter {
    fn format(&self, _: &Globals, op: Ops) -> Result<Responses> {
        match op {
            Ops::Document(document) => {
                print!("{}", to_yaml(&document)?);
                Ok(Responses::Success)
            }
            Ops::TenantList => Ok(Responses::from(TenantTable::new())),
        }
    }
}

fn to_yaml(document: &Json) -> Result<String> {
    let document = serde_yaml::to_string(document)?;
    Ok(document)
}

/// Format a list of tenant sessions into a table.
struct TenantTable {
    table: comfy_table::Table,
}

impl TenantTable {
    fn new() -> TenantTable {
        let mut table = comfy_table::Table::new();
        table.set_header(vec!["CURRENT", "TENANT", "SESSION"]);
        TenantTable { table }
    }
}

impl super::TenantList for TenantTable {
    fn append(&mut self, session: &Session, current: bool) -> Result<()> {
        let kind = match session.kind.is_user() {
            true => "user",
            false => "client",
        };
        self.table.add_row(vec![
            if current { "*" } else { "" },
            session.tenant.as_str(),
            kind,
        ]);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        println!("{}", self.table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::to_yaml;

    #[test]
    fn documents_are_block_yaml() {
        let document = json!({"clientName": "app1", "entitlements": ["read"]});
        let yaml = to_yaml(&document).unwrap();
        assert_eq!(yaml, "clientName: app1\nentitlements:\n- read\n");
    }
}
