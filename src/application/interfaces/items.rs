/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::model::envelope::Envelope;
use crate::model::items::{ItemId, ItemKeys, ItemQuery};
use async_trait::async_trait;
use serde_json::Value;

/// Interface for item CRUD on a collection
///
/// Every operation returns the envelope of its single call. Transport
/// failures show up as `errors` in that envelope, and non-success statuses
/// are left for the caller to inspect.
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Reads items
    ///
    /// # Arguments
    /// * `collection` - Collection name
    /// * `query` - Every item, one item by key, or query parameters
    async fn get_items(&self, collection: &str, query: ItemQuery) -> Envelope;

    /// Creates one item (object) or several (array)
    async fn create_items(&self, collection: &str, fields: Value) -> Envelope;

    /// Updates one item when `id` is given, otherwise sends a collection-level
    /// update with `fields` as body
    async fn update_items(&self, collection: &str, fields: Value, id: Option<ItemId>) -> Envelope;

    /// Deletes one item, or several with a single collection-level call
    async fn delete_items(&self, collection: &str, keys: ItemKeys) -> Envelope;
}
