//! Upstream REST APIs
//!
//! The static operation tables, the credential resolver, the HTTP client
//! factory and the dispatcher that ties them together.

pub mod client;
pub mod credentials;
pub mod dispatch;
pub mod fakturownia;
pub mod meta;
pub mod operation;
pub mod wordpress;

pub use dispatch::call;
pub use operation::{Family, Operation};

/// A locally dispatching backend and the operations it can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Invoicing API
    Fakturownia,
    /// WordPress core plus WooCommerce
    WordPress,
}

impl Backend {
    pub fn operations(self) -> impl Iterator<Item = &'static Operation> {
        let (primary, secondary): (&'static [Operation], &'static [Operation]) = match self {
            Backend::Fakturownia => (fakturownia::OPERATIONS, &[]),
            Backend::WordPress => (wordpress::WP_OPERATIONS, wordpress::WOO_OPERATIONS),
        };
        primary.iter().chain(secondary.iter())
    }

    pub fn find(self, name: &str) -> Option<&'static Operation> {
        self.operations().find(|op| op.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backends_resolve_their_own_operations_only() {
        assert!(Backend::Fakturownia.find("fakt_get_invoice").is_some());
        assert!(Backend::Fakturownia.find("get_products").is_none());
        assert_eq!(Backend::WordPress.find("get_products").unwrap().family, Family::WooCommerce);
        assert_eq!(Backend::WordPress.find("create_post").unwrap().family, Family::WordPress);
        assert_eq!(Backend::WordPress.operations().count(), 82);
    }
}
