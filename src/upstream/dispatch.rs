//! Method dispatch
//!
//! Turns an operation descriptor plus caller arguments into one upstream call
//! (two for meta read-modify-write). Validation runs entirely in [`prepare`],
//! before any credential lookup or network I/O.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{
    client::{parse_body, UpstreamClient},
    credentials, meta,
    operation::{
        ArgKind, Body, MetaAction, MetaSpec, Operation, Param, PathId, ResponseKind, FILTERS_ARG,
        META_KEY_ARG, META_VALUE_ARG,
    },
    Backend,
};
use crate::{
    error::{ToolError, ToolResult},
    state::AppState,
};

/// A validated call, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    /// Path segments after id substitution, not yet percent-encoded
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub meta_key: Option<String>,
    pub meta_value: Option<Value>,
}

/// Look up `name` in `backend` and execute it
pub async fn call(state: &AppState, backend: Backend, name: &str, args: &Map<String, Value>) -> ToolResult<Value> {
    let operation = backend
        .find(name)
        .ok_or_else(|| ToolError::UnknownMethod(name.to_string()))?;
    execute(state, operation, args).await
}

pub async fn execute(state: &AppState, operation: &Operation, args: &Map<String, Value>) -> ToolResult<Value> {
    let call = prepare(operation, args)?;
    let target = credentials::resolve(operation.family, args, &state.config)?;
    let client = UpstreamClient::new(&state.http, target, state.config.upstream_timeout);

    debug!(
        operation = operation.name,
        verb = ?operation.verb,
        path = operation.path,
        "Calling upstream"
    );

    match operation.response {
        ResponseKind::Json => {
            let bytes = client
                .send(operation.verb.as_method(), &call.segments, &call.query, call.body.as_ref())
                .await?;
            Ok(parse_body(&bytes))
        }
        ResponseKind::Binary { content_type } => {
            let bytes = client
                .send(operation.verb.as_method(), &call.segments, &call.query, None)
                .await?;
            Ok(json!({
                "data": STANDARD.encode(&bytes),
                "contentType": content_type,
            }))
        }
        ResponseKind::Meta(spec) => read_modify_write(&client, operation, &call, spec).await,
    }
}

/// GET the parent entity, edit its meta collection, write the whole collection back
///
/// Not atomic: a concurrent writer between the GET and the write is overwritten
/// (last write wins).
async fn read_modify_write(
    client: &UpstreamClient<'_>,
    operation: &Operation,
    call: &PreparedCall,
    spec: MetaSpec,
) -> ToolResult<Value> {
    let entity = parse_body(&client.send(Method::GET, &call.segments, &call.query, None).await?);
    let key = call.meta_key.as_deref();

    let collection = match (spec.action, key) {
        (MetaAction::Read, key) => return Ok(meta::read(spec.shape, &entity, key)),
        (MetaAction::Upsert, Some(key)) => {
            let value = call.meta_value.clone().unwrap_or(Value::Null);
            meta::upsert(spec.shape, &entity, key, value)
        }
        (MetaAction::Remove, Some(key)) => {
            meta::remove(spec.shape, &entity, key).ok_or_else(|| ToolError::InvalidArgument {
                operation: operation.name.to_string(),
                field: META_KEY_ARG.to_string(),
                reason: format!("meta key '{}' not found", key),
            })?
        }
        (_, None) => return Err(ToolError::missing("Meta key", None)),
    };

    let field = spec.shape.field();
    let written = client
        .send(
            spec.write.as_method(),
            &call.segments,
            &call.query,
            Some(&json!({ field: collection })),
        )
        .await?;
    Ok(parse_body(&written).get(field).cloned().unwrap_or(Value::Null))
}

/// Validate arguments and render path, query and body
pub fn prepare(operation: &Operation, args: &Map<String, Value>) -> ToolResult<PreparedCall> {
    let purpose = operation.purpose;

    let mut ids = Vec::with_capacity(operation.ids.len());
    for id in operation.ids {
        let value = present(args, id.arg).ok_or_else(|| ToolError::missing(id.label, purpose))?;
        ids.push((id.arg, render_id(operation, id, value)?));
    }

    // Required query flags are reported without the purpose phrase
    for param in operation.query {
        if let Some(label) = param.required {
            if present(args, param.arg).is_none() {
                return Err(ToolError::missing(label, None));
            }
        }
    }

    let body = match operation.body {
        Body::None => None,
        Body::Wrapped { arg, label, key } => {
            let payload = present(args, arg).ok_or_else(|| ToolError::missing(label, purpose))?;
            Some(json!({ key: payload }))
        }
        Body::Raw { arg, label } => {
            let payload = present(args, arg).ok_or_else(|| ToolError::missing(label, purpose))?;
            Some(payload.clone())
        }
        Body::Fields(fields) => Some(Value::Object(collect_fields(operation, fields, args)?)),
    };

    let (meta_key, meta_value) = meta_arguments(operation, args)?;

    let mut query = Vec::new();
    for param in operation.query {
        let value = match present(args, param.arg) {
            Some(value) => scalar(operation, param.arg, value)?,
            None => match param.default {
                Some(default) => scalar(operation, param.arg, &default.to_json())?,
                None => continue,
            },
        };
        query.push((param.key.to_string(), value));
    }
    apply_filters(operation, args, &mut query)?;

    Ok(PreparedCall {
        segments: render_path(operation.path, &ids),
        query,
        body,
        meta_key,
        meta_value,
    })
}

fn collect_fields(
    operation: &Operation,
    fields: &[Param],
    args: &Map<String, Value>,
) -> ToolResult<Map<String, Value>> {
    let required: Vec<&str> = fields.iter().filter_map(|field| field.required).collect();
    let incomplete = fields
        .iter()
        .any(|field| field.required.is_some() && present(args, field.arg).is_none());
    if incomplete {
        return Err(ToolError::missing_together(&required, operation.purpose));
    }

    let mut object = Map::new();
    for field in fields {
        match present(args, field.arg) {
            Some(value) => {
                object.insert(field.key.to_string(), value.clone());
            }
            None => {
                if let Some(default) = field.default {
                    object.insert(field.key.to_string(), default.to_json());
                }
            }
        }
    }
    Ok(object)
}

fn meta_arguments(operation: &Operation, args: &Map<String, Value>) -> ToolResult<(Option<String>, Option<Value>)> {
    let ResponseKind::Meta(spec) = operation.response else {
        return Ok((None, None));
    };

    let key = match present(args, META_KEY_ARG) {
        Some(Value::String(key)) => Some(key.clone()),
        Some(_) => {
            return Err(ToolError::InvalidArgument {
                operation: operation.name.to_string(),
                field: META_KEY_ARG.to_string(),
                reason: "expected a string".to_string(),
            })
        }
        None => None,
    };

    match spec.action {
        MetaAction::Read => Ok((key, None)),
        MetaAction::Remove => {
            let key = key.ok_or_else(|| ToolError::missing("Meta key", None))?;
            Ok((Some(key), None))
        }
        MetaAction::Upsert => {
            let key = key.ok_or_else(|| ToolError::missing("Meta key", None))?;
            // Any value is accepted, including null; only the argument itself must exist.
            let value = args
                .get(META_VALUE_ARG)
                .cloned()
                .ok_or_else(|| ToolError::missing("Meta value", None))?;
            Ok((Some(key), Some(value)))
        }
    }
}

fn apply_filters(operation: &Operation, args: &Map<String, Value>, query: &mut Vec<(String, String)>) -> ToolResult<()> {
    let filters = match args.get(FILTERS_ARG) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(filters)) => filters,
        Some(_) => {
            return Err(ToolError::InvalidArgument {
                operation: operation.name.to_string(),
                field: FILTERS_ARG.to_string(),
                reason: "expected an object".to_string(),
            })
        }
    };

    for (key, value) in filters {
        if !operation.filters.contains(&key.as_str()) {
            return Err(ToolError::UnsupportedFilter {
                operation: operation.name.to_string(),
                key: key.clone(),
            });
        }
        if value.is_null() {
            continue;
        }
        let rendered = scalar(operation, &format!("{}.{}", FILTERS_ARG, key), value)?;
        query.retain(|(existing, _)| existing != key);
        query.push((key.clone(), rendered));
    }
    Ok(())
}

/// Argument value unless missing, null or an empty string
fn present<'a>(args: &'a Map<String, Value>, arg: &str) -> Option<&'a Value> {
    match args.get(arg) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    }
}

fn scalar(operation: &Operation, field: &str, value: &Value) -> ToolResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ToolError::InvalidArgument {
            operation: operation.name.to_string(),
            field: field.to_string(),
            reason: "expected a string, number or boolean".to_string(),
        }),
    }
}

fn render_id(operation: &Operation, id: &PathId, value: &Value) -> ToolResult<String> {
    let invalid = |reason: &str| ToolError::InvalidArgument {
        operation: operation.name.to_string(),
        field: id.arg.to_string(),
        reason: reason.to_string(),
    };

    match (id.kind, value) {
        (ArgKind::Number, Value::Number(n)) => n
            .as_u64()
            .map(|n| n.to_string())
            .ok_or_else(|| invalid("expected a non-negative integer identifier")),
        (ArgKind::Number, Value::String(s)) => {
            let s = s.trim();
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                Ok(s.to_string())
            } else {
                Err(invalid("expected a numeric identifier"))
            }
        }
        (ArgKind::Number, _) => Err(invalid("expected a numeric identifier")),
        (_, Value::String(s)) => Ok(s.clone()),
        (_, Value::Number(n)) => Ok(n.to_string()),
        _ => Err(invalid("expected a string identifier")),
    }
}

/// Split the template into segments, substituting `{arg}` placeholders
fn render_path(template: &str, ids: &[(&str, String)]) -> Vec<String> {
    template
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            ids.iter().fold(segment.to_string(), |acc, (arg, value)| {
                acc.replace(&format!("{{{}}}", arg), value)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::operation::Family;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn op(backend: Backend, name: &str) -> &'static Operation {
        backend.find(name).unwrap()
    }

    #[test]
    fn missing_id_without_purpose() {
        let err = prepare(op(Backend::Fakturownia, "fakt_get_client"), &Map::new()).unwrap_err();
        assert_eq!(err.to_string(), "Client ID is required");
    }

    #[test]
    fn missing_id_and_payload_with_purpose() {
        let update = op(Backend::Fakturownia, "fakt_update_client");
        let err = prepare(update, &args(json!({ "clientData": {} }))).unwrap_err();
        assert_eq!(err.to_string(), "Client ID is required for updating a client");

        let err = prepare(update, &args(json!({ "clientId": 5 }))).unwrap_err();
        assert_eq!(err.to_string(), "Client data is required for updating a client");
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let err = prepare(op(Backend::Fakturownia, "fakt_get_invoice"), &args(json!({ "invoiceId": "" }))).unwrap_err();
        assert_eq!(err.to_string(), "Invoice ID is required");
    }

    #[test]
    fn list_defaults_are_applied() {
        let call = prepare(op(Backend::Fakturownia, "fakt_get_invoices"), &Map::new()).unwrap();
        assert_eq!(call.segments, vec!["invoices.json"]);
        assert_eq!(
            call.query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "10".to_string()),
                ("period".to_string(), "this_month".to_string()),
                ("include_positions".to_string(), "false".to_string()),
            ]
        );
        assert!(call.body.is_none());
    }

    #[test]
    fn filters_are_allow_listed_and_override_query() {
        let list = op(Backend::Fakturownia, "fakt_get_invoices");
        let call = prepare(
            list,
            &args(json!({ "filters": { "period": null, "client_id": 42, "status": "paid" } })),
        );
        // `period` is not a filter key for invoices
        assert!(matches!(call, Err(ToolError::UnsupportedFilter { .. })));

        let call = prepare(list, &args(json!({ "page": 3, "filters": { "client_id": 42 } }))).unwrap();
        assert!(call.query.contains(&("page".to_string(), "3".to_string())));
        assert!(call.query.contains(&("client_id".to_string(), "42".to_string())));

        let err = prepare(list, &args(json!({ "filters": { "client_id": [1, 2] } }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));

        let err = prepare(list, &args(json!({ "filters": "client_id=1" }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn operation_without_filters_rejects_any_filter_key() {
        let err = prepare(op(Backend::WordPress, "get_stock_report"), &args(json!({ "filters": { "x": 1 } }))).unwrap_err();
        assert_eq!(err.to_string(), "Filter 'x' is not supported by get_stock_report");
    }

    #[test]
    fn wrapped_payload_and_path_ids() {
        let call = prepare(
            op(Backend::Fakturownia, "fakt_update_payment"),
            &args(json!({ "paymentId": "12", "paymentData": { "price": 10 } })),
        )
        .unwrap();
        assert_eq!(call.segments, vec!["banking", "payments", "12.json"]);
        assert_eq!(call.body, Some(json!({ "banking_payment": { "price": 10 } })));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let err = prepare(op(Backend::Fakturownia, "fakt_get_invoice"), &args(json!({ "invoiceId": "1/../2" }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn email_defaults_respect_explicit_false() {
        let send = op(Backend::Fakturownia, "fakt_send_invoice_by_email");
        let call = prepare(send, &args(json!({ "invoiceId": 9 }))).unwrap();
        assert_eq!(call.segments, vec!["invoices", "9", "send_by_email.json"]);
        assert_eq!(call.query, vec![("email_pdf".to_string(), "true".to_string())]);
        assert!(call.body.is_none());

        let call = prepare(send, &args(json!({ "invoiceId": 9, "emailPdf": false, "emailTo": "a@b.c" }))).unwrap();
        assert!(call.query.contains(&("email_pdf".to_string(), "false".to_string())));
        assert!(call.query.contains(&("email_to".to_string(), "a@b.c".to_string())));
    }

    #[test]
    fn change_status_requires_status() {
        let change = op(Backend::Fakturownia, "fakt_change_invoice_status");
        let err = prepare(change, &args(json!({ "invoiceId": 9 }))).unwrap_err();
        assert_eq!(err.to_string(), "Status is required");

        let err = prepare(change, &args(json!({ "status": "paid" }))).unwrap_err();
        assert_eq!(err.to_string(), "Invoice ID is required for changing status");
    }

    #[test]
    fn post_fields_with_defaults() {
        let create = op(Backend::WordPress, "create_post");
        let err = prepare(create, &args(json!({ "title": "Hi" }))).unwrap_err();
        assert_eq!(err.to_string(), "Title and content are required for creating a post");

        let call = prepare(create, &args(json!({ "title": "Hi", "content": "Body" }))).unwrap();
        assert_eq!(
            call.body,
            Some(json!({ "title": "Hi", "content": "Body", "status": "draft" }))
        );
        assert_eq!(create.family, Family::WordPress);
    }

    #[test]
    fn meta_arguments_are_validated_in_order() {
        let upsert = op(Backend::WordPress, "update_product_meta");
        let err = prepare(upsert, &args(json!({ "metaKey": "color" }))).unwrap_err();
        assert_eq!(err.to_string(), "Product ID is required");

        let err = prepare(upsert, &args(json!({ "productId": 1 }))).unwrap_err();
        assert_eq!(err.to_string(), "Meta key is required");

        let err = prepare(upsert, &args(json!({ "productId": 1, "metaKey": "color" }))).unwrap_err();
        assert_eq!(err.to_string(), "Meta value is required");

        let call = prepare(upsert, &args(json!({ "productId": 1, "metaKey": "color", "metaValue": null }))).unwrap();
        assert_eq!(call.meta_value, Some(Value::Null));
        assert_eq!(call.segments, vec!["products", "1"]);
    }

    #[test]
    fn woo_delete_sends_force_default() {
        let call = prepare(op(Backend::WordPress, "delete_customer"), &args(json!({ "customerId": 4 }))).unwrap();
        assert_eq!(call.query, vec![("force".to_string(), "true".to_string())]);

        let call = prepare(op(Backend::WordPress, "delete_product"), &args(json!({ "productId": 4 }))).unwrap();
        assert_eq!(call.query, vec![("force".to_string(), "false".to_string())]);
    }

    fn sample(kind: ArgKind) -> Value {
        match kind {
            ArgKind::Number => json!(1),
            ArgKind::Text => json!("x"),
            ArgKind::Boolean => json!(true),
            ArgKind::Object | ArgKind::Any => json!({ "name": "x" }),
        }
    }

    /// Every argument `operation` cannot run without, with the label its error must name
    fn required_arguments(operation: &Operation) -> Vec<(&'static str, &'static str, Value)> {
        let mut required = Vec::new();
        for id in operation.ids {
            required.push((id.arg, id.label, sample(id.kind)));
        }
        for param in operation.query {
            if let Some(label) = param.required {
                required.push((param.arg, label, sample(param.kind)));
            }
        }
        match operation.body {
            Body::None => {}
            Body::Wrapped { arg, label, .. } | Body::Raw { arg, label } => {
                required.push((arg, label, sample(ArgKind::Object)));
            }
            Body::Fields(fields) => {
                for field in fields {
                    if let Some(label) = field.required {
                        required.push((field.arg, label, sample(field.kind)));
                    }
                }
            }
        }
        if let ResponseKind::Meta(spec) = operation.response {
            match spec.action {
                MetaAction::Read => {}
                MetaAction::Remove => required.push((META_KEY_ARG, "Meta key", json!("color"))),
                MetaAction::Upsert => {
                    required.push((META_KEY_ARG, "Meta key", json!("color")));
                    required.push((META_VALUE_ARG, "Meta value", json!("blue")));
                }
            }
        }
        required
    }

    #[test]
    fn every_required_argument_is_enforced() {
        let mut checked = 0;
        for backend in [Backend::Fakturownia, Backend::WordPress] {
            for operation in backend.operations() {
                let required = required_arguments(operation);
                let complete: Map<String, Value> = required
                    .iter()
                    .map(|(arg, _, value)| (arg.to_string(), value.clone()))
                    .collect();
                assert!(
                    prepare(operation, &complete).is_ok(),
                    "{} rejected its complete arguments",
                    operation.name
                );

                for (arg, label, _) in &required {
                    let mut partial = complete.clone();
                    partial.remove(*arg);
                    let err = prepare(operation, &partial).unwrap_err();
                    assert!(
                        matches!(err, ToolError::MissingField(_)),
                        "{} without {}: {}",
                        operation.name,
                        arg,
                        err
                    );
                    assert!(
                        err.to_string().to_lowercase().contains(&label.to_lowercase()),
                        "{} without {}: {}",
                        operation.name,
                        arg,
                        err
                    );
                    checked += 1;
                }
            }
        }
        assert!(checked > 100, "only {} required arguments found", checked);
    }

    #[test]
    fn numeric_ids_must_be_non_negative_integers() {
        let get = op(Backend::Fakturownia, "fakt_get_client");
        for bad in [json!(-1.5), json!(-3), json!(2.5)] {
            let err = prepare(get, &args(json!({ "clientId": bad }))).unwrap_err();
            assert!(matches!(err, ToolError::InvalidArgument { .. }), "{}", err);
        }

        let call = prepare(get, &args(json!({ "clientId": 17 }))).unwrap();
        assert_eq!(call.segments, vec!["clients", "17.json"]);
    }
}
