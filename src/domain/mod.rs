//! Domain entities shared by the services and the gateway.
//!
//! # Design Decisions
//! - Wire format (JSON field names) matches what the frontend already
//!   consumes: `id`, `nom`, `prix`, `description`, `quantite`, `date`,
//!   `montant`, `idProduit`
//! - `id` is `Option<i64>`: unset until the store assigns one
//! - `idProduit` on a commande is an unchecked foreign reference; nothing
//!   validates it against the produits store

pub mod commande;
pub mod produit;

pub use commande::Commande;
pub use produit::Produit;
