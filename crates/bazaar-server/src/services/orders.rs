use bazaar_model::{NewOrder, ProductId};
use bazaar_store::{
    normalize, Collection, DocumentFilter, DocumentGateway, FilterClause, StoreError,
};
use bson::{Bson, Document};
use serde_json::{json, Value};

/// A page of normalized, enriched orders plus the total number of
/// matches for the user.
pub struct OrderWindow {
    pub items: Vec<Value>,
    pub total: u64,
}

/// Places an order: resolves and validates every line, inserts the
/// order document, then deducts inventory. Validation happens in full
/// before anything is written.
pub async fn create_order(
    gateway: &dyn DocumentGateway,
    input: &NewOrder,
) -> Result<String, StoreError> {
    let mut lines = Vec::with_capacity(input.items.len());
    for item in &input.items {
        let id = ProductId::parse(&item.productid)
            .map_err(|err| StoreError::validation(err.to_string()))?;
        lines.push((id, item.qty));
    }

    for (id, qty) in &lines {
        let document = gateway
            .find_one(Collection::Products, id.as_object_id())
            .await?
            .ok_or_else(|| StoreError::not_found(format!("product {} not found", id.to_hex())))?;
        let available: i64 = bucket_quantities(&document).iter().sum();
        if available < *qty {
            return Err(StoreError::conflict(format!(
                "insufficient inventory for product {}. available: {available}, requested: {qty}",
                id.to_hex()
            )));
        }
    }

    let mut document =
        bson::to_document(input).map_err(|err| StoreError::internal(err.to_string()))?;
    document.insert("created_at", bson::DateTime::now());
    let order_id = gateway.insert(Collection::Orders, document).await?;

    for (id, qty) in &lines {
        deduct_inventory(gateway, *id, *qty).await?;
    }

    Ok(order_id.to_hex())
}

/// Windowed listing of one user's orders, each normalized and with
/// every line annotated with the referenced product's name and id.
pub async fn list_orders_for_user(
    gateway: &dyn DocumentGateway,
    user_id: &str,
    offset: u64,
    limit: i64,
) -> Result<OrderWindow, StoreError> {
    let filter = DocumentFilter::all().with(FilterClause::UserIdIs(user_id.to_string()));
    let total = gateway.count(Collection::Orders, &filter).await?;
    let documents = gateway
        .find(Collection::Orders, &filter, offset, limit)
        .await?;

    let mut items = Vec::with_capacity(documents.len());
    for document in documents {
        let mut order = normalize(document);
        enrich_lines(gateway, &mut order).await;
        items.push(order);
    }
    Ok(OrderWindow { items, total })
}

/// Greedy deduction in bucket array order. Every bucket decrement is
/// conditional on the bucket still holding the amount, so a raced
/// order can never push a quantity below zero; the product is re-read
/// until the full quantity is deducted, and a pass that makes no
/// progress fails the order instead of overdrawing.
async fn deduct_inventory(
    gateway: &dyn DocumentGateway,
    id: ProductId,
    qty: i64,
) -> Result<(), StoreError> {
    let mut remaining = qty;
    while remaining > 0 {
        let document = gateway
            .find_one(Collection::Products, id.as_object_id())
            .await?
            .ok_or_else(|| {
                StoreError::conflict(format!(
                    "product {} disappeared while placing the order",
                    id.to_hex()
                ))
            })?;

        let mut deducted_this_pass = 0;
        for (index, available) in bucket_quantities(&document).into_iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let want = available.min(remaining);
            if want <= 0 {
                continue;
            }
            let path = format!("sizes.{index}.quantity");
            if gateway
                .decrement_checked(Collection::Products, id.as_object_id(), &path, want)
                .await?
            {
                remaining -= want;
                deducted_this_pass += want;
            }
        }

        if remaining > 0 && deducted_this_pass == 0 {
            return Err(StoreError::conflict(format!(
                "inventory for product {} changed while placing the order. undeducted: {remaining}",
                id.to_hex()
            )));
        }
    }
    Ok(())
}

/// Per-bucket quantities as stored. Legacy-shaped documents have no
/// `sizes` array and therefore no deductible inventory.
fn bucket_quantities(document: &Document) -> Vec<i64> {
    let Ok(sizes) = document.get_array("sizes") else {
        return Vec::new();
    };
    sizes
        .iter()
        .map(|entry| {
            entry
                .as_document()
                .and_then(|bucket| numeric(bucket.get("quantity")?))
                .unwrap_or(0)
        })
        .collect()
}

fn numeric(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) => Some(*v as i64),
        _ => None,
    }
}

async fn enrich_lines(gateway: &dyn DocumentGateway, order: &mut Value) {
    let Some(lines) = order.get_mut("items").and_then(Value::as_array_mut) else {
        return;
    };
    for line in lines {
        let Some(requested) = line
            .get("productid")
            .and_then(Value::as_str)
            .map(str::to_string)
        else {
            continue;
        };
        let details = resolve_details(gateway, &requested).await.unwrap_or_else(|| {
            json!({"name": "Unknown Product", "id": requested})
        });
        if let Some(entry) = line.as_object_mut() {
            entry.insert("productDetails".to_string(), details);
        }
    }
}

/// `None` for any failure along the way: malformed id, deleted
/// product, or a store error. The caller substitutes the placeholder.
async fn resolve_details(gateway: &dyn DocumentGateway, requested: &str) -> Option<Value> {
    let id = ProductId::parse(requested).ok()?;
    let document = gateway
        .find_one(Collection::Products, id.as_object_id())
        .await
        .ok()??;
    let name = document.get_str("name").unwrap_or("Unknown Product");
    Some(json!({"name": name, "id": id.to_hex()}))
}
