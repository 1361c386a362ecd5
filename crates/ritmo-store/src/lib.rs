//! # ritmo-store: Repository Layer for the Ritmo Offers API
//!
//! This crate owns the single JSON document every company and offer lives
//! in. The document is loaded once, kept in memory behind one lock, and
//! rewritten whole after every change.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ritmo Data Flow                                  │
//! │                                                                         │
//! │  HTTP handler (POST /offers)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   ritmo-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │   Document   │  │   │
//! │  │   │  (store.rs)   │    │ (company.rs)  │    │(document.rs) │  │   │
//! │  │   │               │    │ (offer.rs)    │    │              │  │   │
//! │  │   │ Mutex + file  │◄───│ CompanyRepo   │───►│ LocalStorage │  │   │
//! │  │   │ atomic write  │    │ OfferRepo     │    │ projections  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     storage/storage.json                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Opening, locking and persisting the document
//! - [`document`] - The document type and its in-memory operations
//! - [`error`] - Store error types
//! - [`repository`] - Company and offer repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ritmo_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("storage/storage.json")).await?;
//!
//! let company = store.companies().create(fields).await?;
//! let offer = store.offers().get_by_company(&company.id).await;
//!
//! store.close().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{LocalStorage, Upserted};
pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::company::CompanyRepository;
pub use repository::offer::OfferRepository;
