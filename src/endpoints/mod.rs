//! Endpoint variants
//!
//! Every variant served under `/.netlify/functions/{slug}` is one static
//! [`Endpoint`] record. Its allow-list, name map and tool catalog are all
//! derived from [`Endpoint::tools`], so they cannot disagree.

pub mod catalog;
pub mod scope;

use crate::upstream::{Backend, Operation};

pub use scope::{AllowList, NameMap};

/// How a variant executes accepted tool calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Dispatch directly against the backend's REST API
    Local,
    /// Relay the envelope to the canonical endpoint
    Forward,
}

/// A published tool name and the canonical operation it stands for
#[derive(Debug, Clone, Copy)]
pub struct ToolEntry {
    pub published: &'static str,
    pub target: &'static str,
}

impl ToolEntry {
    pub const fn same(name: &'static str) -> Self {
        Self {
            published: name,
            target: name,
        }
    }

    pub const fn renamed(published: &'static str, target: &'static str) -> Self {
        Self { published, target }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ToolSet {
    /// Every operation of the backend under its canonical name
    All,
    Curated(&'static [ToolEntry]),
}

/// One endpoint variant
#[derive(Debug)]
pub struct Endpoint {
    pub slug: &'static str,
    /// Human-readable name reported by the status check
    pub title: &'static str,
    pub focus: &'static str,
    /// `serverInfo.name` in the handshake
    pub server_name: &'static str,
    pub mode: Mode,
    pub backend: Backend,
    pub tool_set: ToolSet,
}

impl Endpoint {
    /// Published tools with the operation each one resolves to
    ///
    /// Curated entries whose target is not in the backend are skipped; the
    /// registry tests guarantee there are none.
    pub fn tools(&self) -> Vec<(&'static str, &'static Operation)> {
        match self.tool_set {
            ToolSet::All => self.backend.operations().map(|op| (op.name, op)).collect(),
            ToolSet::Curated(entries) => entries
                .iter()
                .filter_map(|entry| self.backend.find(entry.target).map(|op| (entry.published, op)))
                .collect(),
        }
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.tools().into_iter().map(|(name, _)| name))
    }

    pub fn name_map(&self) -> NameMap {
        NameMap::new(self.tools().into_iter().filter_map(|(name, op)| {
            (name != op.name).then_some((name, op.name))
        }))
    }
}

const CATEGORY_TOOLS: [ToolEntry; 5] = [
    ToolEntry::same("fakt_get_categories"),
    ToolEntry::same("fakt_get_category"),
    ToolEntry::same("fakt_create_category"),
    ToolEntry::same("fakt_update_category"),
    ToolEntry::same("fakt_delete_category"),
];

const DEPARTMENT_TOOLS: [ToolEntry; 5] = [
    ToolEntry::same("fakt_get_departments"),
    ToolEntry::same("fakt_get_department"),
    ToolEntry::same("fakt_create_department"),
    ToolEntry::same("fakt_update_department"),
    ToolEntry::same("fakt_delete_department"),
];

const INVOICE_ASSIGNMENT_TOOLS: [ToolEntry; 2] = [
    ToolEntry::same("fakt_get_invoice"),
    ToolEntry::same("fakt_update_invoice"),
];

const CATEGORIES: &[ToolEntry] = &[
    CATEGORY_TOOLS[0],
    CATEGORY_TOOLS[1],
    CATEGORY_TOOLS[2],
    CATEGORY_TOOLS[3],
    CATEGORY_TOOLS[4],
    DEPARTMENT_TOOLS[0],
    DEPARTMENT_TOOLS[1],
    DEPARTMENT_TOOLS[2],
    DEPARTMENT_TOOLS[3],
    DEPARTMENT_TOOLS[4],
    INVOICE_ASSIGNMENT_TOOLS[0],
    INVOICE_ASSIGNMENT_TOOLS[1],
];

const DEPARTMENTS: &[ToolEntry] = &[
    DEPARTMENT_TOOLS[0],
    DEPARTMENT_TOOLS[1],
    DEPARTMENT_TOOLS[2],
    DEPARTMENT_TOOLS[3],
    DEPARTMENT_TOOLS[4],
    CATEGORY_TOOLS[0],
    CATEGORY_TOOLS[1],
    CATEGORY_TOOLS[2],
    CATEGORY_TOOLS[3],
    CATEGORY_TOOLS[4],
    INVOICE_ASSIGNMENT_TOOLS[0],
    INVOICE_ASSIGNMENT_TOOLS[1],
];

const CLIENTS: &[ToolEntry] = &[
    ToolEntry::same("fakt_get_clients"),
    ToolEntry::same("fakt_get_client"),
    ToolEntry::same("fakt_create_client"),
    ToolEntry::same("fakt_update_client"),
    ToolEntry::same("fakt_delete_client"),
];

const INVOICES: &[ToolEntry] = &[
    ToolEntry::renamed("fakt_inv_get_invoices", "fakt_get_invoices"),
    ToolEntry::renamed("fakt_inv_get_invoice", "fakt_get_invoice"),
    ToolEntry::renamed("fakt_inv_create_invoice", "fakt_create_invoice"),
    ToolEntry::renamed("fakt_inv_update_invoice", "fakt_update_invoice"),
    ToolEntry::renamed("fakt_inv_delete_invoice", "fakt_delete_invoice"),
    ToolEntry::renamed("fakt_inv_send_invoice_by_email", "fakt_send_invoice_by_email"),
    ToolEntry::renamed("fakt_inv_change_invoice_status", "fakt_change_invoice_status"),
    ToolEntry::renamed("fakt_inv_get_invoice_pdf", "fakt_get_invoice_pdf"),
];

const PAYMENTS: &[ToolEntry] = &[
    ToolEntry::renamed("fakt_pay_get_payments", "fakt_get_payments"),
    ToolEntry::renamed("fakt_pay_get_payment", "fakt_get_payment"),
    ToolEntry::renamed("fakt_pay_create_payment", "fakt_create_payment"),
    ToolEntry::renamed("fakt_pay_update_payment", "fakt_update_payment"),
    ToolEntry::renamed("fakt_pay_delete_payment", "fakt_delete_payment"),
];

const PRODUCTS: &[ToolEntry] = &[
    ToolEntry::same("fakt_get_products"),
    ToolEntry::same("fakt_get_product"),
    ToolEntry::same("fakt_create_product"),
    ToolEntry::same("fakt_update_product"),
];

const SIMPLE: &[ToolEntry] = &[
    ToolEntry::same("fakt_get_invoices"),
    ToolEntry::same("fakt_create_invoice"),
    ToolEntry::same("fakt_get_clients"),
    ToolEntry::same("fakt_create_client"),
    ToolEntry::same("fakt_get_products"),
    ToolEntry::same("fakt_send_invoice_by_email"),
    ToolEntry::same("fakt_change_invoice_status"),
    ToolEntry::same("fakt_get_invoice"),
];

/// The variant every forwarding endpoint relays to
pub const CANONICAL_SLUG: &str = "fakturownia-server";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        slug: CANONICAL_SLUG,
        title: "Fakturownia MCP Server",
        focus: "Complete invoicing API",
        server_name: "fakturownia-server",
        mode: Mode::Local,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::All,
    },
    Endpoint {
        slug: "fakturownia-categories",
        title: "Fakturownia MCP Server - Categories & Departments",
        focus: "Category and department management + invoice assignment",
        server_name: "fakturownia-categories",
        mode: Mode::Forward,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::Curated(CATEGORIES),
    },
    Endpoint {
        slug: "fakturownia-departments",
        title: "Fakturownia MCP Server - Departments & Categories",
        focus: "Department and category management + invoice assignment",
        server_name: "fakturownia-departments",
        mode: Mode::Forward,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::Curated(DEPARTMENTS),
    },
    Endpoint {
        slug: "fakturownia-clients",
        title: "Fakturownia MCP Server - Clients Only",
        focus: "Client management only",
        server_name: "fakturownia-clients",
        mode: Mode::Forward,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::Curated(CLIENTS),
    },
    Endpoint {
        slug: "fakturownia-invoices",
        title: "Fakturownia MCP Server - Invoices Only",
        focus: "Invoice management only",
        server_name: "fakturownia-invoices",
        mode: Mode::Forward,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::Curated(INVOICES),
    },
    Endpoint {
        slug: "fakturownia-payments",
        title: "Fakturownia MCP Server - Payments Only",
        focus: "Payment management only",
        server_name: "fakturownia-payments",
        mode: Mode::Forward,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::Curated(PAYMENTS),
    },
    Endpoint {
        slug: "fakturownia-products",
        title: "Fakturownia MCP Server - Products Only",
        focus: "Product management only",
        server_name: "fakturownia-products",
        mode: Mode::Forward,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::Curated(PRODUCTS),
    },
    Endpoint {
        slug: "fakturownia-simple",
        title: "Fakturownia MCP Server - Essential Tools",
        focus: "Most frequently used invoicing tools",
        server_name: "fakturownia-simple",
        mode: Mode::Forward,
        backend: Backend::Fakturownia,
        tool_set: ToolSet::Curated(SIMPLE),
    },
    Endpoint {
        slug: "mcp-server",
        title: "WooCommerce MCP Server",
        focus: "WordPress posts and WooCommerce store management",
        server_name: "woocommerce-mcp-server",
        mode: Mode::Local,
        backend: Backend::WordPress,
        tool_set: ToolSet::All,
    },
];

pub fn find(slug: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|endpoint| endpoint.slug == slug)
}
