/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Primary key of an item, numeric or string (e.g. UUID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Integer key
    Int(i64),
    /// String key
    Str(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{id}"),
            ItemId::Str(id) => write!(f, "{}", urlencoding::encode(id)),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Int(id)
    }
}

impl From<i32> for ItemId {
    fn from(id: i32) -> Self {
        ItemId::Int(i64::from(id))
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId::Int(i64::from(id))
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Str(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId::Str(id)
    }
}

/// Selection of `get_items`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemQuery {
    /// Every item of the collection
    #[default]
    All,
    /// A single item
    Id(ItemId),
    /// Query parameters (`filter`, `fields`, `limit`, `sort`, ...)
    Filter(Value),
}

macro_rules! impl_from_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ItemQuery {
                fn from(id: $t) -> Self {
                    ItemQuery::Id(id.into())
                }
            }

            impl From<$t> for ItemKeys {
                fn from(id: $t) -> Self {
                    ItemKeys::One(id.into())
                }
            }
        )*
    };
}

impl_from_key!(ItemId, i64, i32, u32, &str, String);

impl From<Option<Value>> for ItemQuery {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => ItemQuery::All,
            Some(Value::Number(n)) => match n.as_i64() {
                Some(id) => ItemQuery::Id(ItemId::Int(id)),
                None => ItemQuery::Filter(Value::Number(n)),
            },
            Some(Value::String(s)) => ItemQuery::Id(ItemId::Str(s)),
            Some(other) => ItemQuery::Filter(other),
        }
    }
}

/// Keys targeted by `delete_items`
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKeys {
    /// One item, deleted through its own path
    One(ItemId),
    /// Several items, sent as the body of a collection-level delete
    Many(Vec<ItemId>),
}

impl<T: Into<ItemId>> From<Vec<T>> for ItemKeys {
    fn from(ids: Vec<T>) -> Self {
        ItemKeys::Many(ids.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ItemId>, const N: usize> From<[T; N]> for ItemKeys {
    fn from(ids: [T; N]) -> Self {
        ItemKeys::Many(ids.into_iter().map(Into::into).collect())
    }
}

/// Path of a collection, or of one item in it
#[must_use]
pub fn items_path(collection: &str, id: Option<&ItemId>) -> String {
    match id {
        Some(id) => format!("/items/{collection}/{id}"),
        None => format!("/items/{collection}"),
    }
}
