//! WordPress core and WooCommerce operations
//!
//! WordPress paths are relative to `{siteUrl}/wp-json/wp/v2`, WooCommerce
//! paths to `{siteUrl}/wp-json/wc/v3`.

use super::operation::{
    ArgKind::{Boolean, Number, Text},
    Body, DefaultValue, Family, MetaAction, MetaShape, Operation, Param, PathId,
    Verb::{self, Delete, Get, Post, Put},
};

const fn wp(name: &'static str, verb: Verb, path: &'static str, summary: &'static str) -> Operation {
    Operation::new(name, Family::WordPress, verb, path, summary)
}

const fn woo(name: &'static str, verb: Verb, path: &'static str, summary: &'static str) -> Operation {
    Operation::new(name, Family::WooCommerce, verb, path, summary)
}

const PER_PAGE: Param = Param::new("perPage", "per_page", Number).or(DefaultValue::Int(10));
const PAGE: Param = Param::new("page", "page", Number).or(DefaultValue::Int(1));
const PAGING: &[Param] = &[PER_PAGE, PAGE];

const POST_META: MetaShape = MetaShape::Map { field: "meta" };
const WOO_META: MetaShape = MetaShape::List { field: "meta_data" };

// WordPress

const POST_ID: &[PathId] = &[PathId::number("postId", "Post ID")];
const NEW_POST_FIELDS: &[Param] = &[
    Param::new("title", "title", Text).required("Title"),
    Param::new("content", "content", Text).required("Content"),
    Param::new("status", "status", Text).or(DefaultValue::Text("draft")),
];
const POST_FIELDS: &[Param] = &[
    Param::new("title", "title", Text),
    Param::new("content", "content", Text),
    Param::new("status", "status", Text),
];

pub static WP_OPERATIONS: &[Operation] = &[
    wp("create_post", Post, "/posts", "Create WordPress post")
        .body(Body::Fields(NEW_POST_FIELDS))
        .purpose("creating a post"),
    wp("get_posts", Get, "/posts", "Get WordPress posts").query(PAGING),
    wp("update_post", Post, "/posts/{postId}", "Update WordPress post")
        .ids(POST_ID)
        .body(Body::Fields(POST_FIELDS))
        .purpose("updating a post"),
    wp("get_post_meta", Get, "/posts/{postId}", "Get WordPress post meta")
        .ids(POST_ID)
        .meta(MetaAction::Read, POST_META, Post),
    wp("create_post_meta", Post, "/posts/{postId}", "Create WordPress post meta")
        .ids(POST_ID)
        .meta(MetaAction::Upsert, POST_META, Post),
    wp("update_post_meta", Post, "/posts/{postId}", "Update WordPress post meta")
        .ids(POST_ID)
        .meta(MetaAction::Upsert, POST_META, Post),
    wp("delete_post_meta", Post, "/posts/{postId}", "Delete WordPress post meta")
        .ids(POST_ID)
        .meta(MetaAction::Remove, POST_META, Post),
];

// WooCommerce

const PRODUCT_ID: &[PathId] = &[PathId::number("productId", "Product ID")];
const ORDER_ID: &[PathId] = &[PathId::number("orderId", "Order ID")];
const CUSTOMER_ID: &[PathId] = &[PathId::number("customerId", "Customer ID")];
const CATEGORY_ID: &[PathId] = &[PathId::number("categoryId", "Category ID")];
const TAG_ID: &[PathId] = &[PathId::number("tagId", "Tag ID")];
const COUPON_ID: &[PathId] = &[PathId::number("couponId", "Coupon ID")];
const ATTRIBUTE_ID: &[PathId] = &[PathId::number("attributeId", "Attribute ID")];
const ZONE_ID: &[PathId] = &[PathId::number("zoneId", "Zone ID")];
const RATE_ID: &[PathId] = &[PathId::number("rateId", "Rate ID")];
const ORDER_NOTE_ID: &[PathId] = &[
    PathId::number("orderId", "Order ID"),
    PathId::number("noteId", "Note ID"),
];
const VARIATION_ID: &[PathId] = &[
    PathId::number("productId", "Product ID"),
    PathId::number("variationId", "Variation ID"),
];
const GATEWAY_ID: &[PathId] = &[PathId::text("gatewayId", "Gateway ID")];

const fn payload(arg: &'static str, label: &'static str) -> Body {
    Body::Raw { arg, label }
}

const PRODUCT_DATA: Body = payload("productData", "Product data");
const ORDER_DATA: Body = payload("orderData", "Order data");
const CUSTOMER_DATA: Body = payload("customerData", "Customer data");
const CATEGORY_DATA: Body = payload("categoryData", "Category data");
const TAG_DATA: Body = payload("tagData", "Tag data");
const COUPON_DATA: Body = payload("couponData", "Coupon data");
const ATTRIBUTE_DATA: Body = payload("attributeData", "Attribute data");
const ZONE_DATA: Body = payload("zoneData", "Zone data");
const TAX_RATE_DATA: Body = payload("taxRateData", "Tax rate data");
const NOTE_DATA: Body = payload("noteData", "Note data");
const VARIATION_DATA: Body = payload("variationData", "Variation data");
const GATEWAY_DATA: Body = payload("gatewayData", "Gateway data");

// Trashable resources default to a soft delete; the rest reject anything but force=true.
const SOFT_DELETE: &[Param] = &[Param::new("force", "force", Boolean).or(DefaultValue::Bool(false))];
const HARD_DELETE: &[Param] = &[Param::new("force", "force", Boolean).or(DefaultValue::Bool(true))];

const PERIOD: Param = Param::new("period", "period", Text).or(DefaultValue::Text("month"));
const DATE_MIN: Param = Param::new("dateMin", "date_min", Text);
const DATE_MAX: Param = Param::new("dateMax", "date_max", Text);
const SALES_REPORT_QUERY: &[Param] = &[PERIOD, DATE_MIN, DATE_MAX];
const RANGED_REPORT_QUERY: &[Param] = &[PERIOD, DATE_MIN, DATE_MAX, PER_PAGE, PAGE];
const LIST_NOTES_QUERY: &[Param] = &[Param::new("perPage", "per_page", Number)];

const PRODUCT_FILTERS: &[&str] = &[
    "search",
    "status",
    "type",
    "sku",
    "featured",
    "category",
    "tag",
    "on_sale",
    "min_price",
    "max_price",
    "stock_status",
    "orderby",
    "order",
];
const ORDER_FILTERS: &[&str] = &[
    "search", "status", "customer", "product", "after", "before", "orderby", "order",
];
const CUSTOMER_FILTERS: &[&str] = &["search", "email", "role", "orderby", "order"];
const REPORT_FILTERS: &[&str] = &["context"];
const TERM_FILTERS: &[&str] = &["search", "parent", "hide_empty", "product", "orderby", "order"];
const COUPON_FILTERS: &[&str] = &["search", "code", "orderby", "order"];

pub static WOO_OPERATIONS: &[Operation] = &[
    // Products
    woo("get_products", Get, "/products", "Get WooCommerce products")
        .query(PAGING)
        .filters(PRODUCT_FILTERS),
    woo("get_product", Get, "/products/{productId}", "Get single WooCommerce product").ids(PRODUCT_ID),
    woo("create_product", Post, "/products", "Create new WooCommerce product")
        .body(PRODUCT_DATA)
        .purpose("creating a product"),
    woo("update_product", Put, "/products/{productId}", "Update WooCommerce product")
        .ids(PRODUCT_ID)
        .body(PRODUCT_DATA)
        .purpose("updating a product"),
    woo("delete_product", Delete, "/products/{productId}", "Delete WooCommerce product")
        .ids(PRODUCT_ID)
        .query(SOFT_DELETE)
        .purpose("deleting a product"),
    // Orders
    woo("get_orders", Get, "/orders", "Get WooCommerce orders")
        .query(PAGING)
        .filters(ORDER_FILTERS),
    woo("get_order", Get, "/orders/{orderId}", "Get single WooCommerce order").ids(ORDER_ID),
    woo("create_order", Post, "/orders", "Create new WooCommerce order")
        .body(ORDER_DATA)
        .purpose("creating an order"),
    woo("update_order", Put, "/orders/{orderId}", "Update WooCommerce order")
        .ids(ORDER_ID)
        .body(ORDER_DATA)
        .purpose("updating an order"),
    woo("delete_order", Delete, "/orders/{orderId}", "Delete WooCommerce order")
        .ids(ORDER_ID)
        .query(SOFT_DELETE)
        .purpose("deleting an order"),
    // Customers
    woo("get_customers", Get, "/customers", "Get WooCommerce customers")
        .query(PAGING)
        .filters(CUSTOMER_FILTERS),
    woo("get_customer", Get, "/customers/{customerId}", "Get single WooCommerce customer").ids(CUSTOMER_ID),
    woo("create_customer", Post, "/customers", "Create new WooCommerce customer")
        .body(CUSTOMER_DATA)
        .purpose("creating a customer"),
    woo("update_customer", Put, "/customers/{customerId}", "Update WooCommerce customer")
        .ids(CUSTOMER_ID)
        .body(CUSTOMER_DATA)
        .purpose("updating a customer"),
    woo("delete_customer", Delete, "/customers/{customerId}", "Delete WooCommerce customer")
        .ids(CUSTOMER_ID)
        .query(HARD_DELETE)
        .purpose("deleting a customer"),
    // Reports
    woo("get_sales_report", Get, "/reports/sales", "Get WooCommerce sales report")
        .query(SALES_REPORT_QUERY)
        .filters(REPORT_FILTERS),
    woo("get_products_report", Get, "/reports/products", "Get WooCommerce products report")
        .query(RANGED_REPORT_QUERY)
        .filters(REPORT_FILTERS),
    woo("get_orders_report", Get, "/reports/orders", "Get WooCommerce orders report")
        .query(RANGED_REPORT_QUERY)
        .filters(REPORT_FILTERS),
    woo("get_categories_report", Get, "/reports/categories", "Get WooCommerce categories report")
        .query(PAGING),
    woo("get_customers_report", Get, "/reports/customers", "Get WooCommerce customers report")
        .query(PAGING),
    woo("get_stock_report", Get, "/reports/stock", "Get WooCommerce stock report").query(PAGING),
    // Product categories
    woo(
        "get_product_categories",
        Get,
        "/products/categories",
        "Get WooCommerce product categories",
    )
    .query(PAGING)
    .filters(TERM_FILTERS),
    woo(
        "get_product_category",
        Get,
        "/products/categories/{categoryId}",
        "Get single product category",
    )
    .ids(CATEGORY_ID),
    woo("create_product_category", Post, "/products/categories", "Create product category")
        .body(CATEGORY_DATA)
        .purpose("creating a product category"),
    woo(
        "update_product_category",
        Put,
        "/products/categories/{categoryId}",
        "Update product category",
    )
    .ids(CATEGORY_ID)
    .body(CATEGORY_DATA)
    .purpose("updating a product category"),
    woo(
        "delete_product_category",
        Delete,
        "/products/categories/{categoryId}",
        "Delete product category",
    )
    .ids(CATEGORY_ID)
    .query(HARD_DELETE)
    .purpose("deleting a product category"),
    // Product tags
    woo("get_product_tags", Get, "/products/tags", "Get WooCommerce product tags")
        .query(PAGING)
        .filters(TERM_FILTERS),
    woo("get_product_tag", Get, "/products/tags/{tagId}", "Get single product tag").ids(TAG_ID),
    woo("create_product_tag", Post, "/products/tags", "Create product tag")
        .body(TAG_DATA)
        .purpose("creating a product tag"),
    woo("update_product_tag", Put, "/products/tags/{tagId}", "Update product tag")
        .ids(TAG_ID)
        .body(TAG_DATA)
        .purpose("updating a product tag"),
    woo("delete_product_tag", Delete, "/products/tags/{tagId}", "Delete product tag")
        .ids(TAG_ID)
        .query(HARD_DELETE)
        .purpose("deleting a product tag"),
    // Coupons
    woo("get_coupons", Get, "/coupons", "Get WooCommerce coupons")
        .query(PAGING)
        .filters(COUPON_FILTERS),
    woo("get_coupon", Get, "/coupons/{couponId}", "Get single coupon").ids(COUPON_ID),
    woo("create_coupon", Post, "/coupons", "Create new coupon")
        .body(COUPON_DATA)
        .purpose("creating a coupon"),
    woo("update_coupon", Put, "/coupons/{couponId}", "Update coupon")
        .ids(COUPON_ID)
        .body(COUPON_DATA)
        .purpose("updating a coupon"),
    woo("delete_coupon", Delete, "/coupons/{couponId}", "Delete coupon")
        .ids(COUPON_ID)
        .query(SOFT_DELETE)
        .purpose("deleting a coupon"),
    // Order notes
    woo("get_order_notes", Get, "/orders/{orderId}/notes", "Get order notes")
        .ids(ORDER_ID)
        .query(LIST_NOTES_QUERY),
    woo("get_order_note", Get, "/orders/{orderId}/notes/{noteId}", "Get single order note").ids(ORDER_NOTE_ID),
    woo("create_order_note", Post, "/orders/{orderId}/notes", "Create order note")
        .ids(ORDER_ID)
        .body(NOTE_DATA)
        .purpose("creating an order note"),
    woo("delete_order_note", Delete, "/orders/{orderId}/notes/{noteId}", "Delete order note")
        .ids(ORDER_NOTE_ID)
        .query(HARD_DELETE)
        .purpose("deleting an order note"),
    // Product variations
    woo(
        "get_product_variations",
        Get,
        "/products/{productId}/variations",
        "Get product variations",
    )
    .ids(PRODUCT_ID)
    .query(PAGING),
    woo(
        "get_product_variation",
        Get,
        "/products/{productId}/variations/{variationId}",
        "Get single product variation",
    )
    .ids(VARIATION_ID),
    woo(
        "create_product_variation",
        Post,
        "/products/{productId}/variations",
        "Create product variation",
    )
    .ids(PRODUCT_ID)
    .body(VARIATION_DATA)
    .purpose("creating a product variation"),
    woo(
        "update_product_variation",
        Put,
        "/products/{productId}/variations/{variationId}",
        "Update product variation",
    )
    .ids(VARIATION_ID)
    .body(VARIATION_DATA)
    .purpose("updating a product variation"),
    woo(
        "delete_product_variation",
        Delete,
        "/products/{productId}/variations/{variationId}",
        "Delete product variation",
    )
    .ids(VARIATION_ID)
    .query(SOFT_DELETE)
    .purpose("deleting a product variation"),
    // Product attributes
    woo("get_product_attributes", Get, "/products/attributes", "Get product attributes").query(PAGING),
    woo(
        "get_product_attribute",
        Get,
        "/products/attributes/{attributeId}",
        "Get single product attribute",
    )
    .ids(ATTRIBUTE_ID),
    woo("create_product_attribute", Post, "/products/attributes", "Create product attribute")
        .body(ATTRIBUTE_DATA)
        .purpose("creating a product attribute"),
    woo(
        "update_product_attribute",
        Put,
        "/products/attributes/{attributeId}",
        "Update product attribute",
    )
    .ids(ATTRIBUTE_ID)
    .body(ATTRIBUTE_DATA)
    .purpose("updating a product attribute"),
    woo(
        "delete_product_attribute",
        Delete,
        "/products/attributes/{attributeId}",
        "Delete product attribute",
    )
    .ids(ATTRIBUTE_ID)
    .query(HARD_DELETE)
    .purpose("deleting a product attribute"),
    // Shipping zones
    woo("get_shipping_zones", Get, "/shipping/zones", "Get shipping zones"),
    woo("get_shipping_zone", Get, "/shipping/zones/{zoneId}", "Get single shipping zone").ids(ZONE_ID),
    woo("create_shipping_zone", Post, "/shipping/zones", "Create shipping zone")
        .body(ZONE_DATA)
        .purpose("creating a shipping zone"),
    woo("update_shipping_zone", Put, "/shipping/zones/{zoneId}", "Update shipping zone")
        .ids(ZONE_ID)
        .body(ZONE_DATA)
        .purpose("updating a shipping zone"),
    woo("delete_shipping_zone", Delete, "/shipping/zones/{zoneId}", "Delete shipping zone")
        .ids(ZONE_ID)
        .query(HARD_DELETE)
        .purpose("deleting a shipping zone"),
    // Tax rates
    woo("get_tax_rates", Get, "/taxes", "Get tax rates").query(PAGING),
    woo("get_tax_rate", Get, "/taxes/{rateId}", "Get single tax rate").ids(RATE_ID),
    woo("create_tax_rate", Post, "/taxes", "Create tax rate")
        .body(TAX_RATE_DATA)
        .purpose("creating a tax rate"),
    woo("update_tax_rate", Put, "/taxes/{rateId}", "Update tax rate")
        .ids(RATE_ID)
        .body(TAX_RATE_DATA)
        .purpose("updating a tax rate"),
    woo("delete_tax_rate", Delete, "/taxes/{rateId}", "Delete tax rate")
        .ids(RATE_ID)
        .query(HARD_DELETE)
        .purpose("deleting a tax rate"),
    // Payment gateways
    woo("get_payment_gateways", Get, "/payment_gateways", "Get payment gateways"),
    woo(
        "get_payment_gateway",
        Get,
        "/payment_gateways/{gatewayId}",
        "Get single payment gateway",
    )
    .ids(GATEWAY_ID),
    woo(
        "update_payment_gateway",
        Put,
        "/payment_gateways/{gatewayId}",
        "Update payment gateway",
    )
    .ids(GATEWAY_ID)
    .body(GATEWAY_DATA)
    .purpose("updating a payment gateway"),
    // Meta data
    woo("get_product_meta", Get, "/products/{productId}", "Get product meta data")
        .ids(PRODUCT_ID)
        .meta(MetaAction::Read, WOO_META, Put),
    woo("create_product_meta", Put, "/products/{productId}", "Create product meta data")
        .ids(PRODUCT_ID)
        .meta(MetaAction::Upsert, WOO_META, Put),
    woo("update_product_meta", Put, "/products/{productId}", "Update product meta data")
        .ids(PRODUCT_ID)
        .meta(MetaAction::Upsert, WOO_META, Put),
    woo("delete_product_meta", Put, "/products/{productId}", "Delete product meta data")
        .ids(PRODUCT_ID)
        .meta(MetaAction::Remove, WOO_META, Put),
    woo("get_order_meta", Get, "/orders/{orderId}", "Get order meta data")
        .ids(ORDER_ID)
        .meta(MetaAction::Read, WOO_META, Put),
    woo("create_order_meta", Put, "/orders/{orderId}", "Create order meta data")
        .ids(ORDER_ID)
        .meta(MetaAction::Upsert, WOO_META, Put),
    woo("update_order_meta", Put, "/orders/{orderId}", "Update order meta data")
        .ids(ORDER_ID)
        .meta(MetaAction::Upsert, WOO_META, Put),
    woo("delete_order_meta", Put, "/orders/{orderId}", "Delete order meta data")
        .ids(ORDER_ID)
        .meta(MetaAction::Remove, WOO_META, Put),
    woo("get_customer_meta", Get, "/customers/{customerId}", "Get customer meta data")
        .ids(CUSTOMER_ID)
        .meta(MetaAction::Read, WOO_META, Put),
    woo("create_customer_meta", Put, "/customers/{customerId}", "Create customer meta data")
        .ids(CUSTOMER_ID)
        .meta(MetaAction::Upsert, WOO_META, Put),
    woo("update_customer_meta", Put, "/customers/{customerId}", "Update customer meta data")
        .ids(CUSTOMER_ID)
        .meta(MetaAction::Upsert, WOO_META, Put),
    woo("delete_customer_meta", Put, "/customers/{customerId}", "Delete customer meta data")
        .ids(CUSTOMER_ID)
        .meta(MetaAction::Remove, WOO_META, Put),
];
