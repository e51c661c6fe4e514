//! Produit entity.

use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A product: name and unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Produit {
    /// Store-assigned identity; `None` until first save.
    #[serde(default)]
    pub id: Option<i64>,

    pub nom: String,

    pub prix: f64,
}

impl Entity for Produit {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_id() {
        let p: Produit = serde_json::from_str(r#"{"nom":"Clavier","prix":49.9}"#).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.nom, "Clavier");
        assert_eq!(p.prix, 49.9);
    }
}
