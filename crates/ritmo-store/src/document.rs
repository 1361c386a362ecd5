//! # Storage Document
//!
//! The single JSON object holding every company and offer, plus the pure
//! in-memory operations over it. Nothing in this module touches the disk;
//! see [`crate::store`] for loading and persisting.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        storage.json                                     │
//! │                                                                         │
//! │  {                                                                      │
//! │    "companies": [ {"ID": "...", "Name": "...", ...}, ... ],             │
//! │    "offers":    [ {"ID": "...", "CompanyID": "...", ...}, ... ]         │
//! │  }                                                                      │
//! │                                                                         │
//! │  Sequences keep insertion order. Lookup maps are projections built     │
//! │  on demand and never stored.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::Path;

use ritmo_core::{Company, Offer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{StoreError, StoreResult};

/// The persisted document.
///
/// Missing or `null` arrays decode as empty sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStorage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub companies: Vec<Company>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub offers: Vec<Offer>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// What an upsert did to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    Replaced,
}

impl LocalStorage {
    // =========================================================================
    // Codec
    // =========================================================================

    /// Decodes a document read from `path`.
    pub fn decode(bytes: &[u8], path: &Path) -> StoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Encodes the document as indented JSON.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(StoreError::Encode)
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Company ID → company. The first occurrence wins on duplicate IDs.
    pub fn company_index(&self) -> HashMap<String, Company> {
        let mut index = HashMap::with_capacity(self.companies.len());
        for company in &self.companies {
            index
                .entry(company.id.clone())
                .or_insert_with(|| company.clone());
        }
        index
    }

    /// Offer ID → offer. The first occurrence wins on duplicate IDs.
    pub fn offer_index(&self) -> HashMap<String, Offer> {
        let mut index = HashMap::with_capacity(self.offers.len());
        for offer in &self.offers {
            index.entry(offer.id.clone()).or_insert_with(|| offer.clone());
        }
        index
    }

    /// Company ID → offer, first offer in sequence order per company.
    pub fn offers_by_company(&self) -> HashMap<String, Offer> {
        let mut index = HashMap::with_capacity(self.offers.len());
        for offer in &self.offers {
            index
                .entry(offer.company_id.clone())
                .or_insert_with(|| offer.clone());
        }
        index
    }

    pub fn find_company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn find_company_mut(&mut self, id: &str) -> Option<&mut Company> {
        self.companies.iter_mut().find(|c| c.id == id)
    }

    pub fn find_offer(&self, id: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.id == id)
    }

    pub fn find_offer_mut(&mut self, id: &str) -> Option<&mut Offer> {
        self.offers.iter_mut().find(|o| o.id == id)
    }

    /// First offer belonging to `company_id`.
    pub fn find_offer_by_company(&self, company_id: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.company_id == company_id)
    }

    /// Company IDs that more than one offer points at.
    ///
    /// Only documents written before one-offer-per-company was enforced can
    /// contain these.
    pub fn companies_with_multiple_offers(&self) -> Vec<String> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for offer in &self.offers {
            *seen.entry(offer.company_id.as_str()).or_default() += 1;
        }
        let mut duplicated: Vec<String> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect();
        duplicated.sort();
        duplicated
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces the company with the same ID in place, or appends it.
    pub fn upsert_company(&mut self, company: Company) -> Upserted {
        match self.find_company_mut(&company.id) {
            Some(existing) => {
                *existing = company;
                Upserted::Replaced
            }
            None => {
                self.companies.push(company);
                Upserted::Inserted
            }
        }
    }

    /// Replaces the offer with the same ID in place, or appends it.
    pub fn upsert_offer(&mut self, offer: Offer) -> Upserted {
        match self.find_offer_mut(&offer.id) {
            Some(existing) => {
                *existing = offer;
                Upserted::Replaced
            }
            None => {
                self.offers.push(offer);
                Upserted::Inserted
            }
        }
    }

    /// Whether `id` is taken by any company or offer.
    pub fn contains_id(&self, id: &str) -> bool {
        self.find_company(id).is_some() || self.find_offer(id).is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
