//! # Offer Repository
//!
//! Document operations for offers.
//!
//! ## One Offer Per Company
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create(NewOffer)                                     │
//! │                                                                         │
//! │  lock ──► company exists? ──no──► NotFound   (nothing written)         │
//! │               │                                                         │
//! │              yes                                                        │
//! │               ▼                                                         │
//! │           company already has an offer? ──yes──► Conflict              │
//! │               │                                                         │
//! │              no                                                         │
//! │               ▼                                                         │
//! │           append PENDING offer ──► rewrite document ──► unlock         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Documents written before the rule was enforced may still hold several
//! offers for one company. Lookups by company resolve to the first one in
//! sequence order.

use std::collections::HashMap;

use ritmo_core::{generate_id, CoreError, NewOffer, Offer, OfferStatus};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Repository for offer operations.
#[derive(Debug, Clone)]
pub struct OfferRepository {
    store: Store,
}

impl OfferRepository {
    /// Creates a new OfferRepository.
    pub fn new(store: Store) -> Self {
        OfferRepository { store }
    }

    /// Returns every offer keyed by ID.
    pub async fn all(&self) -> HashMap<String, Offer> {
        self.store.read(|doc| doc.offer_index()).await
    }

    /// Returns offers keyed by the company they belong to.
    pub async fn by_company(&self) -> HashMap<String, Offer> {
        self.store.read(|doc| doc.offers_by_company()).await
    }

    /// Gets an offer by its ID.
    pub async fn get_by_id(&self, id: &str) -> Option<Offer> {
        debug!(id = %id, "Getting offer by ID");
        self.store.read(|doc| doc.find_offer(id).cloned()).await
    }

    /// Gets the offer of a company.
    pub async fn get_by_company(&self, company_id: &str) -> Option<Offer> {
        debug!(company_id = %company_id, "Getting offer by company");
        self.store
            .read(|doc| doc.find_offer_by_company(company_id).cloned())
            .await
    }

    /// Number of stored offers.
    pub async fn count(&self) -> usize {
        self.store.read(|doc| doc.offers.len()).await
    }

    /// Inserts the offer, or replaces the one with the same ID, then
    /// rewrites the document.
    ///
    /// No referential check: this is the raw persistence primitive.
    pub async fn upsert(&self, offer: Offer) -> StoreResult<()> {
        let id = offer.id.clone();
        let outcome = self
            .store
            .commit(move |doc| Ok(doc.upsert_offer(offer)))
            .await?;

        debug!(id = %id, ?outcome, "Offer upserted");
        Ok(())
    }

    /// Creates a PENDING offer for an existing company.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Unknown company (nothing written)
    /// * `Err(StoreError::Conflict)` - The company already has an offer
    pub async fn create(&self, new_offer: NewOffer) -> StoreResult<Offer> {
        let offer = self
            .store
            .commit(move |doc| {
                let company_id = new_offer.company_id.as_str();
                if doc.find_company(company_id).is_none() {
                    return Err(StoreError::not_found("company", company_id));
                }
                if let Some(existing) = doc.find_offer_by_company(company_id) {
                    return Err(StoreError::Conflict(format!(
                        "company {} already has an offer: {}",
                        company_id, existing.id
                    )));
                }

                let mut id = generate_id();
                while doc.contains_id(&id) {
                    id = generate_id();
                }

                let offer = Offer::new(id, new_offer);
                doc.upsert_offer(offer.clone());
                Ok(offer)
            })
            .await?;

        info!(
            id = %offer.id,
            company_id = %offer.company_id,
            advance = %offer.raw_advance,
            "Offer created"
        );
        Ok(offer)
    }

    /// Moves an offer into a new status.
    ///
    /// PENDING is rejected before the document is touched.
    pub async fn update_status(&self, id: &str, status: OfferStatus) -> StoreResult<Offer> {
        if !status.is_settable() {
            return Err(CoreError::InvalidStatus(status.to_string()).into());
        }

        let offer = self
            .store
            .commit(|doc| {
                let offer = doc
                    .find_offer_mut(id)
                    .ok_or_else(|| StoreError::not_found("offer", id))?;
                offer.status = status;
                Ok(offer.clone())
            })
            .await?;

        info!(id = %id, status = %status, "Offer status changed");
        Ok(offer)
    }

    /// Records whether the company accepted the offer.
    pub async fn set_accepted(&self, id: &str, accepted: bool) -> StoreResult<Offer> {
        let offer = self
            .store
            .commit(|doc| {
                let offer = doc
                    .find_offer_mut(id)
                    .ok_or_else(|| StoreError::not_found("offer", id))?;
                offer.accepted = accepted;
                Ok(offer.clone())
            })
            .await?;

        debug!(id = %id, accepted, "Offer acceptance changed");
        Ok(offer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use ritmo_core::{CompanyFields, Money};
    use tempfile::TempDir;

    async fn store_with_company(dir: &TempDir) -> (Store, String) {
        let store =
            Store::open(StoreConfig::new(dir.path().join("storage.json")).create_if_missing(true))
                .await
                .unwrap();
        let company = store
            .companies()
            .create(CompanyFields {
                name: "Acme".to_string(),
                fiscal_id: "B12345678".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        (store, company.id)
    }

    fn new_offer(company_id: &str) -> NewOffer {
        NewOffer {
            company_id: company_id.to_string(),
            charges: 3,
            sales_percentage: 10,
            advance: Money::parse("100.00").unwrap(),
            refund: Money::zero(),
        }
    }

    #[tokio::test]
    async fn test_create_offer() {
        let dir = TempDir::new().unwrap();
        let (store, company_id) = store_with_company(&dir).await;
        let repo = store.offers();

        let offer = repo.create(new_offer(&company_id)).await.unwrap();

        assert_eq!(offer.status, OfferStatus::Pending);
        assert!(!offer.accepted);
        assert_eq!(offer.raw_advance, "100.00");
        assert_eq!(offer.raw_refund, "0.00");
        assert_eq!(repo.get_by_id(&offer.id).await, Some(offer.clone()));
        assert_eq!(repo.get_by_company(&company_id).await, Some(offer.clone()));
        assert_eq!(repo.by_company().await[&company_id].id, offer.id);
        assert_eq!(repo.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_for_unknown_company_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_with_company(&dir).await;
        let before = std::fs::read(store.path()).unwrap();

        let err = store.offers().create(new_offer("ghost")).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound { entity: "company", .. }));
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
        assert_eq!(store.offers().count().await, 0);
    }

    #[tokio::test]
    async fn test_second_offer_for_company_conflicts() {
        let dir = TempDir::new().unwrap();
        let (store, company_id) = store_with_company(&dir).await;
        let repo = store.offers();

        let first = repo.create(new_offer(&company_id)).await.unwrap();
        let err = repo.create(new_offer(&company_id)).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(repo.count().await, 1);
        assert_eq!(repo.get_by_company(&company_id).await.unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_legacy_duplicates_resolve_to_first() {
        let dir = TempDir::new().unwrap();
        let (store, company_id) = store_with_company(&dir).await;
        let repo = store.offers();

        for id in ["o1", "o2"] {
            repo.upsert(Offer {
                id: id.to_string(),
                company_id: company_id.clone(),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.by_company().await[&company_id].id, "o1");
        assert_eq!(repo.get_by_company(&company_id).await.unwrap().id, "o1");
    }

    #[tokio::test]
    async fn test_update_status() {
        let dir = TempDir::new().unwrap();
        let (store, company_id) = store_with_company(&dir).await;
        let repo = store.offers();
        let offer = repo.create(new_offer(&company_id)).await.unwrap();

        let updated = repo
            .update_status(&offer.id, OfferStatus::Approved)
            .await
            .unwrap();
        assert_eq!(updated.status, OfferStatus::Approved);
        assert_eq!(repo.get_by_company(&company_id).await.unwrap().status, OfferStatus::Approved);
    }

    #[tokio::test]
    async fn test_update_status_rejects_pending_and_unknown_offer() {
        let dir = TempDir::new().unwrap();
        let (store, company_id) = store_with_company(&dir).await;
        let repo = store.offers();
        let offer = repo.create(new_offer(&company_id)).await.unwrap();

        let err = repo
            .update_status(&offer.id, OfferStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::InvalidStatus(_))));

        let err = repo
            .update_status("missing", OfferStatus::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "offer", .. }));
    }

    #[tokio::test]
    async fn test_set_accepted_persists() {
        let dir = TempDir::new().unwrap();
        let (store, company_id) = store_with_company(&dir).await;
        let offer = store.offers().create(new_offer(&company_id)).await.unwrap();

        store.offers().set_accepted(&offer.id, true).await.unwrap();

        let reopened = Store::open(StoreConfig::new(store.path())).await.unwrap();
        assert!(reopened.offers().get_by_id(&offer.id).await.unwrap().accepted);
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_one_offer() {
        let dir = TempDir::new().unwrap();
        let (store, company_id) = store_with_company(&dir).await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = store.offers();
            let company_id = company_id.clone();
            handles.push(tokio::spawn(async move {
                repo.create(new_offer(&company_id)).await.is_ok()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.offers().count().await, 1);
    }
}
