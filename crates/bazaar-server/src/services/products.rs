use bazaar_model::{NewProduct, Product, ProductShape};
use bazaar_store::{normalize, Collection, DocumentFilter, DocumentGateway, FilterClause, StoreError};
use bson::Document;

/// A page of products plus the total number of matches, from which
/// the handler builds the pagination envelope.
#[derive(Debug)]
pub struct ProductWindow {
    pub items: Vec<Product>,
    pub total: u64,
}

/// Stamps `created_at` and performs the single insert. Payload
/// validation is a precondition enforced at the HTTP boundary.
pub async fn create_product(
    gateway: &dyn DocumentGateway,
    input: &NewProduct,
) -> Result<String, StoreError> {
    let mut document =
        bson::to_document(input).map_err(|err| StoreError::internal(err.to_string()))?;
    document.insert("created_at", bson::DateTime::now());
    let id = gateway.insert(Collection::Products, document).await?;
    Ok(id.to_hex())
}

/// Filtered, windowed listing in creation order. Both filters combine
/// with AND when supplied.
pub async fn list_products(
    gateway: &dyn DocumentGateway,
    name: Option<&str>,
    size: Option<&str>,
    offset: u64,
    limit: i64,
) -> Result<ProductWindow, StoreError> {
    let mut filter = DocumentFilter::all();
    if let Some(name) = name {
        filter = filter.with(FilterClause::NameContains(name.to_string()));
    }
    if let Some(size) = size {
        filter = filter.with(FilterClause::SizeIs(size.to_string()));
    }

    let total = gateway.count(Collection::Products, &filter).await?;
    let documents = gateway
        .find(Collection::Products, &filter, offset, limit)
        .await?;

    let mut items = Vec::with_capacity(documents.len());
    for document in documents {
        items.push(public_product(document)?);
    }
    Ok(ProductWindow { items, total })
}

/// Runs a stored document through the normalizer and resolves the
/// legacy/current shape union into the unified public product.
pub(crate) fn public_product(document: Document) -> Result<Product, StoreError> {
    let value = normalize(document);
    let shape: ProductShape = serde_json::from_value(value)
        .map_err(|err| StoreError::internal(format!("malformed product document: {err}")))?;
    Ok(shape.into_product())
}
