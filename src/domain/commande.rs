//! Commande entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// An order line: description, quantity, order date, amount, and an
/// optional reference to a produit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commande {
    /// Store-assigned identity; `None` until first save.
    #[serde(default)]
    pub id: Option<i64>,

    pub description: String,

    pub quantite: i32,

    /// Order date. When absent at save time the service fills in today.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    pub montant: f64,

    /// Unchecked foreign reference to a produit.
    #[serde(default, rename = "idProduit")]
    pub id_produit: Option<i64>,
}

impl Entity for Commande {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}
