//! Allow-list filter and name remapper

use std::collections::HashMap;

use crate::error::ToolError;

/// Tool names a variant accepts, in catalog order
#[derive(Debug, Clone)]
pub struct AllowList {
    names: Vec<&'static str>,
}

impl AllowList {
    pub fn new(names: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|allowed| *allowed == name)
    }

    /// Accept `name` or produce the scope error listing every allowed tool
    pub fn check(&self, name: &str, endpoint: &str) -> Result<(), ToolError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(ToolError::OutOfScope {
                tool: name.to_string(),
                endpoint: endpoint.to_string(),
                allowed: self.names.iter().map(|n| n.to_string()).collect(),
            })
        }
    }
}

/// Published tool name → canonical operation name
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    entries: HashMap<&'static str, &'static str>,
}

impl NameMap {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Canonical name for `name`; identity when unmapped
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        self.entries.get(name).copied().unwrap_or(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_members_and_lists_all_on_rejection() {
        let allow = AllowList::new(["fakt_get_products", "fakt_get_product"]);
        assert!(allow.check("fakt_get_product", "fakturownia-products").is_ok());

        let err = allow.check("fakt_delete_invoice", "fakturownia-products").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("fakt_delete_invoice"));
        assert!(message.contains("fakt_get_products, fakt_get_product"));
    }

    #[test]
    fn resolve_is_identity_for_unmapped_names() {
        let map = NameMap::new([("fakt_inv_get_invoice", "fakt_get_invoice")]);
        assert_eq!(map.resolve("fakt_inv_get_invoice"), "fakt_get_invoice");
        assert_eq!(map.resolve("fakt_get_client"), "fakt_get_client");
    }
}
