use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's watchlist of products
///
/// One per user. A nil `id` means the watchlist has not been stored yet;
/// submitting it creates one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProductObserver {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Uuid,
    #[serde(default)]
    pub product_list: Vec<Uuid>,
}

impl ProductObserver {
    /// An unsaved, empty watchlist for `user_id`
    pub fn empty_for(user_id: Uuid) -> Self {
        Self {
            id: Uuid::nil(),
            user_id,
            product_list: Vec::new(),
        }
    }

    pub fn is_unsaved(&self) -> bool {
        self.id.is_nil()
    }
}
