//! # Repository Module
//!
//! Repository implementations over the storage document.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  store.offers().create(new_offer)                              │
//! │       ▼                                                                 │
//! │  OfferRepository                                                       │
//! │  ├── all / by_company / get_by_id / get_by_company                     │
//! │  ├── upsert(&self, offer)                                              │
//! │  └── create / update_status / set_accepted                             │
//! │       │                                                                 │
//! │       │  Store::read / Store::commit (one lock)                        │
//! │       ▼                                                                 │
//! │  LocalStorage ──► storage.json                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CompanyRepository`](company::CompanyRepository) - Company lookup, upsert, create, update
//! - [`OfferRepository`](offer::OfferRepository) - Offer lookup, upsert, creation and status changes

pub mod company;
pub mod offer;
