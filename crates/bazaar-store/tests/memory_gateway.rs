use bazaar_store::{
    Collection, DocumentFilter, DocumentGateway, FilterClause, MemoryGateway, StoreErrorCode,
};
use bson::{doc, Document};

fn shirt(name: &str) -> Document {
    doc! {"name": name, "price": 25.0, "sizes": [{"size": "medium", "quantity": 10_i64}]}
}

#[tokio::test]
async fn insert_assigns_an_id_and_find_one_returns_the_document() {
    let gateway = MemoryGateway::default();
    let id = gateway
        .insert(Collection::Products, shirt("Plain Tee"))
        .await
        .expect("insert");

    let found = gateway
        .find_one(Collection::Products, id)
        .await
        .expect("find_one")
        .expect("present");
    assert_eq!(found.get_str("name"), Ok("Plain Tee"));
    assert_eq!(found.get_object_id("_id"), Ok(id));
}

#[tokio::test]
async fn find_applies_filter_skip_and_limit_in_insertion_order() {
    let gateway = MemoryGateway::default();
    for index in 0..5 {
        gateway
            .insert(Collection::Products, shirt(&format!("Tee {index}")))
            .await
            .expect("insert");
    }
    gateway
        .insert(Collection::Products, doc! {"name": "Mug", "price": 8.0, "sizes": []})
        .await
        .expect("insert");

    let filter = DocumentFilter::all().with(FilterClause::NameContains("tee".to_string()));
    assert_eq!(
        gateway.count(Collection::Products, &filter).await.expect("count"),
        5
    );

    let window = gateway
        .find(Collection::Products, &filter, 2, 2)
        .await
        .expect("find");
    assert_eq!(window.len(), 2);
    assert_eq!(window[0].get_str("name"), Ok("Tee 2"));
    assert_eq!(window[1].get_str("name"), Ok("Tee 3"));
}

#[tokio::test]
async fn decrement_checked_applies_only_when_enough_remains() {
    let gateway = MemoryGateway::default();
    let id = gateway
        .insert(Collection::Products, shirt("Tee"))
        .await
        .expect("insert");

    let applied = gateway
        .decrement_checked(Collection::Products, id, "sizes.0.quantity", 7)
        .await
        .expect("decrement");
    assert!(applied);

    // only 3 left now, so another 7 must be refused
    let refused = gateway
        .decrement_checked(Collection::Products, id, "sizes.0.quantity", 7)
        .await
        .expect("decrement");
    assert!(!refused);

    let document = gateway
        .find_one(Collection::Products, id)
        .await
        .expect("find_one")
        .expect("present");
    let sizes = document.get_array("sizes").expect("sizes");
    let bucket = sizes[0].as_document().expect("bucket");
    assert_eq!(bucket.get_i64("quantity"), Ok(3));
}

#[tokio::test]
async fn decrement_checked_refuses_missing_paths_and_documents() {
    let gateway = MemoryGateway::default();
    let id = gateway
        .insert(Collection::Products, doc! {"name": "Relic", "size": "medium", "inventory_count": 9_i64})
        .await
        .expect("insert");

    // legacy documents have no sizes array to decrement
    let applied = gateway
        .decrement_checked(Collection::Products, id, "sizes.0.quantity", 1)
        .await
        .expect("decrement");
    assert!(!applied);

    let absent = gateway
        .decrement_checked(Collection::Products, bson::oid::ObjectId::new(), "sizes.0.quantity", 1)
        .await
        .expect("decrement");
    assert!(!absent);
}

#[tokio::test]
async fn unavailable_mode_short_circuits_every_operation() {
    let gateway = MemoryGateway::default();
    gateway.set_unavailable(true);

    let err = gateway
        .insert(Collection::Orders, doc! {"total_amount": 1.0})
        .await
        .expect_err("unavailable");
    assert_eq!(err.code, StoreErrorCode::Unavailable);

    let err = gateway.ping().await.expect_err("unavailable");
    assert_eq!(err.code, StoreErrorCode::Unavailable);

    gateway.set_unavailable(false);
    assert!(gateway.ping().await.is_ok());
}
