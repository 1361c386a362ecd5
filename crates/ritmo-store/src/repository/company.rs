//! # Company Repository
//!
//! Document operations for companies.
//!
//! ## Key Operations
//! - Exact-key lookup and the ID → company projection
//! - Upsert by identity (replace in place or append)
//! - Create with a server-generated ID, wholesale update

use std::collections::HashMap;

use ritmo_core::{generate_id, Company, CompanyFields};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Repository for company operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.companies();
///
/// let company = repo.create(fields).await?;
/// let same = repo.get_by_id(&company.id).await;
/// ```
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    store: Store,
}

impl CompanyRepository {
    /// Creates a new CompanyRepository.
    pub fn new(store: Store) -> Self {
        CompanyRepository { store }
    }

    /// Returns every company keyed by ID.
    ///
    /// Built fresh on each call from the stored sequence.
    pub async fn all(&self) -> HashMap<String, Company> {
        self.store.read(|doc| doc.company_index()).await
    }

    /// Gets a company by its ID.
    ///
    /// ## Returns
    /// * `Some(Company)` - Company found
    /// * `None` - No company with that ID
    pub async fn get_by_id(&self, id: &str) -> Option<Company> {
        debug!(id = %id, "Getting company by ID");
        self.store.read(|doc| doc.find_company(id).cloned()).await
    }

    /// Number of stored companies.
    pub async fn count(&self) -> usize {
        self.store.read(|doc| doc.companies.len()).await
    }

    /// Inserts the company, or replaces the one with the same ID, then
    /// rewrites the document.
    pub async fn upsert(&self, company: Company) -> StoreResult<()> {
        let id = company.id.clone();
        let outcome = self
            .store
            .commit(move |doc| Ok(doc.upsert_company(company)))
            .await?;

        debug!(id = %id, ?outcome, "Company upserted");
        Ok(())
    }

    /// Creates a company with a fresh ID.
    pub async fn create(&self, fields: CompanyFields) -> StoreResult<Company> {
        let company = self
            .store
            .commit(move |doc| {
                let mut id = generate_id();
                while doc.contains_id(&id) {
                    id = generate_id();
                }

                let company = Company::new(id, fields);
                doc.upsert_company(company.clone());
                Ok(company)
            })
            .await?;

        debug!(id = %company.id, name = %company.name, "Company created");
        Ok(company)
    }

    /// Replaces every mutable field of an existing company.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - No company with that ID (nothing written)
    pub async fn update(&self, id: &str, fields: CompanyFields) -> StoreResult<Company> {
        let company = self
            .store
            .commit(|doc| {
                let company = doc
                    .find_company_mut(id)
                    .ok_or_else(|| StoreError::not_found("company", id))?;
                company.apply(fields);
                Ok(company.clone())
            })
            .await?;

        debug!(id = %id, "Company updated");
        Ok(company)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir) -> Store {
        Store::open(StoreConfig::new(dir.path().join("storage.json")).create_if_missing(true))
            .await
            .unwrap()
    }

    fn acme() -> CompanyFields {
        CompanyFields {
            name: "Acme".to_string(),
            fiscal_id: "B12345678".to_string(),
            city: "Madrid".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_then_lookup() {
        let dir = TempDir::new().unwrap();
        let repo = open_store(&dir).await.companies();

        let company = Company::new("c1", acme());
        repo.upsert(company.clone()).await.unwrap();

        let all = repo.all().await;
        assert_eq!(all["c1"].id, "c1");
        assert_eq!(repo.get_by_id("c1").await, Some(company));
        assert_eq!(repo.get_by_id("missing").await, None);
    }

    #[tokio::test]
    async fn test_upsert_existing_id_replaces_record() {
        let dir = TempDir::new().unwrap();
        let repo = open_store(&dir).await.companies();

        repo.upsert(Company::new("c1", acme())).await.unwrap();

        let mut renamed = Company::new("c1", acme());
        renamed.name = "Acme Ltd".to_string();
        repo.upsert(renamed).await.unwrap();

        assert_eq!(repo.count().await, 1);
        assert_eq!(repo.get_by_id("c1").await.unwrap().name, "Acme Ltd");
    }

    #[tokio::test]
    async fn test_create_generates_unique_ids() {
        let dir = TempDir::new().unwrap();
        let repo = open_store(&dir).await.companies();

        let a = repo.create(acme()).await.unwrap();
        let b = repo.create(acme()).await.unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(repo.count().await, 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let dir = TempDir::new().unwrap();
        let repo = open_store(&dir).await.companies();
        let created = repo.create(acme()).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                CompanyFields {
                    name: "Globex".to_string(),
                    fiscal_id: "A0000000".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Globex");
        assert_eq!(updated.city, "");
    }

    #[tokio::test]
    async fn test_update_unknown_company() {
        let dir = TempDir::new().unwrap();
        let repo = open_store(&dir).await.companies();

        let err = repo.update("nope", acme()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "company", .. }));
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_reopen_reproduces_document() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let created = store.companies().create(acme()).await.unwrap();
        let before = store.snapshot().await;

        let reopened = Store::open(StoreConfig::new(dir.path().join("storage.json")))
            .await
            .unwrap();

        assert_eq!(reopened.snapshot().await, before);
        assert_eq!(reopened.companies().get_by_id(&created.id).await, Some(created));
    }
}
