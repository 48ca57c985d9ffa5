//! Invoicing API operations
//!
//! Paths are relative to `https://{domain}.fakturownia.pl`; the API token is
//! appended as `api_token` to every call by the client.

use super::operation::{
    ArgKind::{Boolean, Number, Text},
    Body, DefaultValue, Family, Operation, Param, PathId, ResponseKind,
    Verb::{self, Delete, Get, Patch, Post, Put},
};

const fn op(name: &'static str, verb: Verb, path: &'static str, summary: &'static str) -> Operation {
    Operation::new(name, Family::Fakturownia, verb, path, summary)
}

const PAGE: Param = Param::new("page", "page", Number).or(DefaultValue::Int(1));
const PER_PAGE: Param = Param::new("perPage", "per_page", Number).or(DefaultValue::Int(10));
const PAGING: &[Param] = &[PAGE, PER_PAGE];

// Identifiers
const INVOICE_ID: &[PathId] = &[PathId::number("invoiceId", "Invoice ID")];
const CLIENT_ID: &[PathId] = &[PathId::number("clientId", "Client ID")];
const PRODUCT_ID: &[PathId] = &[PathId::number("productId", "Product ID")];
const PAYMENT_ID: &[PathId] = &[PathId::number("paymentId", "Payment ID")];
const CATEGORY_ID: &[PathId] = &[PathId::number("categoryId", "Category ID")];
const WAREHOUSE_ID: &[PathId] = &[PathId::number("warehouseId", "Warehouse ID")];
const DOCUMENT_ID: &[PathId] = &[PathId::number("documentId", "Document ID")];
const DEPARTMENT_ID: &[PathId] = &[PathId::number("departmentId", "Department ID")];

// Payloads
const INVOICE_DATA: Body = Body::Wrapped {
    arg: "invoiceData",
    label: "Invoice data",
    key: "invoice",
};
const CLIENT_DATA: Body = Body::Wrapped {
    arg: "clientData",
    label: "Client data",
    key: "client",
};
const PRODUCT_DATA: Body = Body::Wrapped {
    arg: "productData",
    label: "Product data",
    key: "product",
};
const PAYMENT_DATA: Body = Body::Wrapped {
    arg: "paymentData",
    label: "Payment data",
    key: "banking_payment",
};
const CATEGORY_DATA: Body = Body::Wrapped {
    arg: "categoryData",
    label: "Category data",
    key: "category",
};
const WAREHOUSE_DATA: Body = Body::Wrapped {
    arg: "warehouseData",
    label: "Warehouse data",
    key: "warehouse",
};
const DOCUMENT_DATA: Body = Body::Wrapped {
    arg: "documentData",
    label: "Document data",
    key: "warehouse_document",
};
const DEPARTMENT_DATA: Body = Body::Wrapped {
    arg: "departmentData",
    label: "Department data",
    key: "department",
};

// Query parameters
const INVOICE_LIST_QUERY: &[Param] = &[
    PAGE,
    PER_PAGE,
    Param::new("period", "period", Text).or(DefaultValue::Text("this_month")),
    Param::new("includePositions", "include_positions", Boolean).or(DefaultValue::Bool(false)),
];
const SEND_EMAIL_QUERY: &[Param] = &[
    Param::new("emailTo", "email_to", Text),
    Param::new("emailCc", "email_cc", Text),
    Param::new("emailPdf", "email_pdf", Boolean).or(DefaultValue::Bool(true)),
];
const CHANGE_STATUS_QUERY: &[Param] = &[Param::new("status", "status", Text).required("Status")];
const CLIENT_LIST_QUERY: &[Param] = &[
    PAGE,
    PER_PAGE,
    Param::new("name", "name", Text),
    Param::new("email", "email", Text),
    Param::new("taxNo", "tax_no", Text),
];
const WAREHOUSE_QUERY: &[Param] = &[Param::new("warehouseId", "warehouse_id", Number)];
const PRODUCT_LIST_QUERY: &[Param] = &[PAGE, PER_PAGE, Param::new("warehouseId", "warehouse_id", Number)];
const PAYMENT_LIST_QUERY: &[Param] = &[PAGE, PER_PAGE, Param::new("include", "include", Text)];

// Filter keys accepted in `filters`
const INVOICE_FILTERS: &[&str] = &[
    "date_from",
    "date_to",
    "search_date_type",
    "client_id",
    "kind",
    "number",
    "status",
    "income",
    "category_id",
    "department_id",
    "order",
];
const CLIENT_FILTERS: &[&str] = &["external_id", "shortcut", "city", "country", "tag", "order"];
const PRODUCT_FILTERS: &[&str] = &["name", "code", "ean_code", "tag", "category_id", "order"];
const PAYMENT_FILTERS: &[&str] = &["invoice_id", "client_id", "date_from", "date_to", "kind", "order"];
const NAME_FILTERS: &[&str] = &["name", "order"];
const WAREHOUSE_FILTERS: &[&str] = &["name", "kind", "order"];
const DOCUMENT_FILTERS: &[&str] = &[
    "kind",
    "warehouse_id",
    "client_id",
    "date_from",
    "date_to",
    "order",
];
const DEPARTMENT_FILTERS: &[&str] = &["name", "shortcut", "order"];

pub static OPERATIONS: &[Operation] = &[
    // Invoices
    op("fakt_get_invoices", Get, "/invoices.json", "Get list of invoices from Fakturownia")
        .query(INVOICE_LIST_QUERY)
        .filters(INVOICE_FILTERS),
    op("fakt_get_invoice", Get, "/invoices/{invoiceId}.json", "Get single invoice by ID").ids(INVOICE_ID),
    op("fakt_create_invoice", Post, "/invoices.json", "Create new invoice")
        .body(INVOICE_DATA)
        .purpose("creating an invoice"),
    op("fakt_update_invoice", Put, "/invoices/{invoiceId}.json", "Update existing invoice")
        .ids(INVOICE_ID)
        .body(INVOICE_DATA)
        .purpose("updating an invoice"),
    op("fakt_delete_invoice", Delete, "/invoices/{invoiceId}.json", "Delete invoice")
        .ids(INVOICE_ID)
        .purpose("deleting an invoice"),
    op(
        "fakt_send_invoice_by_email",
        Post,
        "/invoices/{invoiceId}/send_by_email.json",
        "Send invoice by email to client",
    )
    .ids(INVOICE_ID)
    .query(SEND_EMAIL_QUERY)
    .purpose("sending by email"),
    op(
        "fakt_change_invoice_status",
        Post,
        "/invoices/{invoiceId}/change_status.json",
        "Change invoice status",
    )
    .ids(INVOICE_ID)
    .query(CHANGE_STATUS_QUERY)
    .purpose("changing status"),
    op("fakt_get_invoice_pdf", Get, "/invoices/{invoiceId}.pdf", "Get invoice PDF file")
        .ids(INVOICE_ID)
        .response(ResponseKind::Binary {
            content_type: "application/pdf",
        })
        .purpose("getting PDF"),
    // Clients
    op("fakt_get_clients", Get, "/clients.json", "Get list of clients")
        .query(CLIENT_LIST_QUERY)
        .filters(CLIENT_FILTERS),
    op("fakt_get_client", Get, "/clients/{clientId}.json", "Get single client by ID").ids(CLIENT_ID),
    op("fakt_create_client", Post, "/clients.json", "Create new client")
        .body(CLIENT_DATA)
        .purpose("creating a client"),
    op("fakt_update_client", Put, "/clients/{clientId}.json", "Update existing client")
        .ids(CLIENT_ID)
        .body(CLIENT_DATA)
        .purpose("updating a client"),
    op("fakt_delete_client", Delete, "/clients/{clientId}.json", "Delete client")
        .ids(CLIENT_ID)
        .purpose("deleting a client"),
    // Products
    op("fakt_get_products", Get, "/products.json", "Get list of products")
        .query(PRODUCT_LIST_QUERY)
        .filters(PRODUCT_FILTERS),
    op("fakt_get_product", Get, "/products/{productId}.json", "Get single product by ID")
        .ids(PRODUCT_ID)
        .query(WAREHOUSE_QUERY),
    op("fakt_create_product", Post, "/products.json", "Create new product")
        .body(PRODUCT_DATA)
        .purpose("creating a product"),
    op("fakt_update_product", Put, "/products/{productId}.json", "Update existing product")
        .ids(PRODUCT_ID)
        .body(PRODUCT_DATA)
        .purpose("updating a product"),
    // Payments
    op("fakt_get_payments", Get, "/banking/payments.json", "Get list of payments")
        .query(PAYMENT_LIST_QUERY)
        .filters(PAYMENT_FILTERS),
    op("fakt_get_payment", Get, "/banking/payment/{paymentId}.json", "Get single payment by ID").ids(PAYMENT_ID),
    op("fakt_create_payment", Post, "/banking/payments.json", "Create new payment")
        .body(PAYMENT_DATA)
        .purpose("creating a payment"),
    op("fakt_update_payment", Patch, "/banking/payments/{paymentId}.json", "Update existing payment")
        .ids(PAYMENT_ID)
        .body(PAYMENT_DATA)
        .purpose("updating a payment"),
    op("fakt_delete_payment", Delete, "/banking/payments/{paymentId}.json", "Delete payment")
        .ids(PAYMENT_ID)
        .purpose("deleting a payment"),
    // Categories
    op("fakt_get_categories", Get, "/categories.json", "Get list of categories").filters(NAME_FILTERS),
    op("fakt_get_category", Get, "/categories/{categoryId}.json", "Get single category by ID").ids(CATEGORY_ID),
    op("fakt_create_category", Post, "/categories.json", "Create new category")
        .body(CATEGORY_DATA)
        .purpose("creating a category"),
    op("fakt_update_category", Put, "/categories/{categoryId}.json", "Update existing category")
        .ids(CATEGORY_ID)
        .body(CATEGORY_DATA)
        .purpose("updating a category"),
    op("fakt_delete_category", Delete, "/categories/{categoryId}.json", "Delete category")
        .ids(CATEGORY_ID)
        .purpose("deleting a category"),
    // Warehouses
    op("fakt_get_warehouses", Get, "/warehouses.json", "Get list of warehouses").filters(WAREHOUSE_FILTERS),
    op("fakt_get_warehouse", Get, "/warehouses/{warehouseId}.json", "Get single warehouse by ID")
        .ids(WAREHOUSE_ID),
    op("fakt_create_warehouse", Post, "/warehouses.json", "Create new warehouse")
        .body(WAREHOUSE_DATA)
        .purpose("creating a warehouse"),
    op("fakt_update_warehouse", Put, "/warehouses/{warehouseId}.json", "Update existing warehouse")
        .ids(WAREHOUSE_ID)
        .body(WAREHOUSE_DATA)
        .purpose("updating a warehouse"),
    op("fakt_delete_warehouse", Delete, "/warehouses/{warehouseId}.json", "Delete warehouse")
        .ids(WAREHOUSE_ID)
        .purpose("deleting a warehouse"),
    // Warehouse documents
    op(
        "fakt_get_warehouse_documents",
        Get,
        "/warehouse_documents.json",
        "Get list of warehouse documents",
    )
    .query(PAGING)
    .filters(DOCUMENT_FILTERS),
    op(
        "fakt_get_warehouse_document",
        Get,
        "/warehouse_documents/{documentId}.json",
        "Get single warehouse document by ID",
    )
    .ids(DOCUMENT_ID),
    op(
        "fakt_create_warehouse_document",
        Post,
        "/warehouse_documents.json",
        "Create new warehouse document",
    )
    .body(DOCUMENT_DATA)
    .purpose("creating a warehouse document"),
    op(
        "fakt_update_warehouse_document",
        Put,
        "/warehouse_documents/{documentId}.json",
        "Update existing warehouse document",
    )
    .ids(DOCUMENT_ID)
    .body(DOCUMENT_DATA)
    .purpose("updating a warehouse document"),
    op(
        "fakt_delete_warehouse_document",
        Delete,
        "/warehouse_documents/{documentId}.json",
        "Delete warehouse document",
    )
    .ids(DOCUMENT_ID)
    .purpose("deleting a warehouse document"),
    // Departments
    op("fakt_get_departments", Get, "/departments.json", "Get list of departments").filters(DEPARTMENT_FILTERS),
    op("fakt_get_department", Get, "/departments/{departmentId}.json", "Get single department by ID")
        .ids(DEPARTMENT_ID),
    op("fakt_create_department", Post, "/departments.json", "Create new department")
        .body(DEPARTMENT_DATA)
        .purpose("creating a department"),
    op("fakt_update_department", Put, "/departments/{departmentId}.json", "Update existing department")
        .ids(DEPARTMENT_ID)
        .body(DEPARTMENT_DATA)
        .purpose("updating a department"),
    op("fakt_delete_department", Delete, "/departments/{departmentId}.json", "Delete department")
        .ids(DEPARTMENT_ID)
        .purpose("deleting a department"),
];
