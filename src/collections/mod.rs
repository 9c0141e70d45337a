mod dialog;
mod section;

pub(crate) use dialog::CreateRecordDialog;
pub(crate) use section::CollectionSection;

use crate::api::{ApiError, ApiResult, Gateway, UploadObject, UploadOptions};
use crate::models::{Category, CollectionItem, CollectionKind, Occasion};
use leptos::logging::error;
use serde::de::DeserializeOwned;

async fn select_items<G, T>(gateway: &G, table: &str) -> ApiResult<Vec<CollectionItem>>
where
    G: Gateway,
    T: DeserializeOwned + Into<CollectionItem>,
{
    let rows: Vec<T> = gateway.select_all(table).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Read the whole collection. A failed read is logged and shows as an empty list.
pub(crate) async fn fetch_collection<G: Gateway>(
    gateway: &G,
    kind: CollectionKind,
) -> Vec<CollectionItem> {
    let result = match kind {
        CollectionKind::Category => select_items::<G, Category>(gateway, kind.table()).await,
        CollectionKind::Occasion => select_items::<G, Occasion>(gateway, kind.table()).await,
    };

    result.unwrap_or_else(|e| {
        error!("Error fetching {}: {e}", kind.plural());
        Vec::new()
    })
}

/// Single-row lookup for the detail view; failures read as "not found".
pub(crate) async fn fetch_record<G: Gateway>(
    gateway: &G,
    kind: CollectionKind,
    id: &str,
) -> Option<CollectionItem> {
    let result = match kind {
        CollectionKind::Category => gateway
            .select_one::<Category>(kind.table(), kind.id_column(), id)
            .await
            .map(|r| r.map(CollectionItem::from)),
        CollectionKind::Occasion => gateway
            .select_one::<Occasion>(kind.table(), kind.id_column(), id)
            .await
            .map(|r| r.map(CollectionItem::from)),
    };

    result.unwrap_or_else(|e| {
        error!("Error fetching {} {id}: {e}", kind.as_ref());
        None
    })
}

/// Storage key for an uploaded image: random prefix plus the original file name.
pub(crate) fn object_key(random_id: &str, file_name: &str) -> String {
    format!("{random_id}-{file_name}")
}

/// Upload the optional image, then insert the row that references it.
///
/// The insert is never issued before the upload has succeeded. If the insert
/// fails after a successful upload the stored object is left in place.
/// Returns the public image URL written to the row.
pub(crate) async fn submit_new_record<G: Gateway>(
    gateway: &G,
    kind: CollectionKind,
    name: &str,
    image: Option<&UploadObject>,
    random_id: &str,
) -> ApiResult<Option<String>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::invalid("Name is required"));
    }

    let image_url = match image {
        Some(object) => {
            let key = object_key(random_id, &object.file_name);
            gateway
                .upload(kind.bucket(), &key, object, &UploadOptions::default())
                .await?;
            Some(gateway.public_url(kind.bucket(), &key))
        }
        None => None,
    };

    gateway
        .insert(kind.table(), &kind.new_row(name, image_url.clone()))
        .await?;

    Ok(image_url)
}
