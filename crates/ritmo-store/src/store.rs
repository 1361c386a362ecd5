//! # Store Management
//!
//! Opening, locking and persisting the storage document.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Lifecycle                                 │
//! │                                                                         │
//! │  API Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← Configure storage location                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config).await ← Read + decode storage.json once           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │     Arc<Mutex<LocalStorage>>            │                           │
//! │  │  companies: [..]   offers: [..]         │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ One request at a time inside the lock                          │
//! │       ▼                                                                 │
//! │  clone ──► mutate clone ──► write tmp ──► fsync ──► rename ──► swap    │
//! │                                                                         │
//! │  Shutdown: Store::close().await ← final flush                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Replace
//! The document is first written to a sibling `<name>.tmp` file, synced to
//! disk, then renamed over the target. A crash mid-write leaves the old file
//! intact. The in-memory document is only swapped after the rename succeeds,
//! so memory and disk never disagree after a failed write.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::document::LocalStorage;
use crate::error::{StoreError, StoreResult};
use crate::repository::company::CompanyRepository;
use crate::repository::offer::OfferRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("storage/storage.json")
///     .create_if_missing(true);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the JSON storage document.
    pub storage_path: PathBuf,

    /// Whether to write an empty document when the file is absent.
    /// Default: false (a missing file is an error)
    pub create_if_missing: bool,
}

impl StoreConfig {
    /// Creates a configuration for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            storage_path: path.into(),
            create_if_missing: false,
        }
    }

    /// Sets whether a missing file is created empty on open.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the loaded storage document.
///
/// Cheap to clone; every clone shares the same document and lock.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn get_company(
///     State(state): State<AppState>,
///     Path(id): Path<String>,
/// ) -> Result<Json<CompanyView>, ApiError> {
///     let company = state.store.companies().get_by_id(&id).await
///         .ok_or_else(|| StoreError::not_found("company", &id))?;
///     Ok(Json(CompanyView::from(company)))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    document: Arc<Mutex<LocalStorage>>,
    path: Arc<PathBuf>,
}

impl Store {
    /// Loads the document once from disk.
    ///
    /// ## Returns
    /// * `Ok(Store)` - Document loaded (or created empty)
    /// * `Err(StoreError::StorageUnavailable)` - File could not be read
    /// * `Err(StoreError::Decode)` - File is not a valid document
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let path = config.storage_path;
        info!(path = %path.display(), "Opening storage document");

        let document = match fs::read(&path).await {
            Ok(bytes) => LocalStorage::decode(&bytes, &path)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && config.create_if_missing => {
                info!(path = %path.display(), "Storage document missing, creating it empty");
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::io("create directory", parent, e))?;
                }
                let document = LocalStorage::default();
                write_atomic(&path, &document.encode()?).await?;
                document
            }
            Err(e) => return Err(StoreError::io("read", &path, e)),
        };

        for company_id in document.companies_with_multiple_offers() {
            warn!(
                company_id = %company_id,
                "Company has more than one stored offer, lookups use the first"
            );
        }

        info!(
            companies = document.companies.len(),
            offers = document.offers.len(),
            "Storage document loaded"
        );

        Ok(Store {
            document: Arc::new(Mutex::new(document)),
            path: Arc::new(path),
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the company repository.
    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository::new(self.clone())
    }

    /// Returns the offer repository.
    pub fn offers(&self) -> OfferRepository {
        OfferRepository::new(self.clone())
    }

    /// Returns a copy of the whole document.
    pub async fn snapshot(&self) -> LocalStorage {
        self.document.lock().await.clone()
    }

    /// Writes the current in-memory document to disk.
    pub async fn flush(&self) -> StoreResult<()> {
        let document = self.document.lock().await;
        self.persist(&document).await
    }

    /// Final flush on shutdown.
    ///
    /// The store stays usable afterwards; every later mutation still
    /// persists on its own.
    pub async fn close(&self) -> StoreResult<()> {
        info!(path = %self.path.display(), "Closing storage document");
        self.flush().await
    }

    /// Checks that the directory holding the document still exists.
    ///
    /// ## Returns
    /// * `true` - The next write has somewhere to go
    /// * `false` - The directory was removed or is not a directory
    pub async fn health_check(&self) -> bool {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };
        match fs::metadata(&dir).await {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    // =========================================================================
    // Critical Sections (used by the repositories)
    // =========================================================================

    /// Runs `read` against the document while holding the lock.
    pub(crate) async fn read<T>(&self, read: impl FnOnce(&LocalStorage) -> T) -> T {
        let document = self.document.lock().await;
        read(&document)
    }

    /// Check, mutate and persist as one critical section.
    ///
    /// `change` runs against a copy of the document. If it fails, nothing is
    /// written. If the write fails, the in-memory document is left untouched.
    pub(crate) async fn commit<T>(
        &self,
        change: impl FnOnce(&mut LocalStorage) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut document = self.document.lock().await;

        let mut next = document.clone();
        let output = change(&mut next)?;

        self.persist(&next).await?;
        *document = next;

        Ok(output)
    }

    async fn persist(&self, document: &LocalStorage) -> StoreResult<()> {
        let bytes = document.encode()?;
        match write_atomic(&self.path, &bytes).await {
            Ok(()) => {
                debug!(
                    path = %self.path.display(),
                    bytes = bytes.len(),
                    "Storage document written"
                );
                Ok(())
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to write storage document");
                Err(e)
            }
        }
    }
}

// =============================================================================
// File Helpers
// =============================================================================

/// `storage.json` → `storage.json.tmp`, in the same directory so the rename
/// stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("storage"));
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = temp_path(path);

    let result = async {
        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| StoreError::io("create", &tmp, e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| StoreError::io("write", &tmp, e))?;
        file.sync_all()
            .await
            .map_err(|e| StoreError::io("sync", &tmp, e))?;
        drop(file);

        fs::rename(&tmp, path)
            .await
            .map_err(|e| StoreError::io("rename", path, e))
    }
    .await;

    if result.is_err() {
        // Leftover temp file is harmless but noisy.
        let _ = fs::remove_file(&tmp).await;
    }
    result
}

// =============================================================================
// Unit Tests
// =============================================================================
