//! # Evidence Proofs & Store Adapter
//!
//! Proof artifacts attached to a dossier: door photos, venue clips. The
//! engine treats the artifact bytes as opaque — it hands them to the
//! [`EvidenceStore`] collaborator and persists only the returned
//! [`FileRef`]. Proof records are immutable and purely additive.
//!
//! The bundled [`InMemoryEvidenceStore`] content-addresses blobs, so the
//! same upload always resolves to the same reference; production deploys
//! swap in the hosted blob backend behind the same trait.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use nocta_core::{sha256_digest, MemberId, Timestamp};

use crate::dossier::DossierId;

// ── Identifiers ────────────────────────────────────────────────────────

/// A unique identifier for an evidence proof record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofId(Uuid);

impl ProofId {
    /// Create a new random proof identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a proof identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProofId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProofId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "proof:{}", self.0)
    }
}

/// An opaque reference to a stored artifact, minted by the evidence store.
///
/// The engine never interprets the contents; equality is the only
/// operation it relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef(String);

impl FileRef {
    /// Wrap a store-minted reference string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Proof Records ──────────────────────────────────────────────────────

/// The media kind of a proof artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

impl ProofKind {
    /// The canonical string tag for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for ProofKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proof artifact attached to a dossier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceProof {
    /// Unique proof identifier.
    pub id: ProofId,
    /// The dossier this proof belongs to.
    pub dossier_id: DossierId,
    /// Store-minted reference to the artifact bytes.
    pub file_ref: FileRef,
    /// Media kind of the artifact.
    pub kind: ProofKind,
    /// The member who attached the proof.
    pub submitted_by: MemberId,
    /// When the proof was attached (UTC).
    pub created_at: Timestamp,
}

// ── Store Adapter ──────────────────────────────────────────────────────

/// Errors arising from the evidence store.
#[derive(Error, Debug)]
pub enum EvidenceStoreError {
    /// The artifact could not be persisted.
    #[error("evidence store rejected the artifact: {0}")]
    StoreFailed(String),
}

/// Contract fulfilled by the platform's blob storage service.
///
/// The engine persists only the returned reference; retrieval, CDN
/// distribution, and retention are the store's concern.
pub trait EvidenceStore: Send + Sync {
    /// Persist an artifact and mint a reference to it.
    fn store(&self, bytes: &[u8], kind: ProofKind) -> Result<FileRef, EvidenceStoreError>;
}

/// In-memory, content-addressed evidence store.
///
/// References have the form `cas:<sha256-hex>`. Re-storing identical bytes
/// returns the same reference, which keeps duplicate uploads harmless.
#[derive(Debug, Default)]
pub struct InMemoryEvidenceStore {
    blobs: DashMap<String, Vec<u8>>,
}

impl InMemoryEvidenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch stored bytes back by reference.
    pub fn fetch(&self, file_ref: &FileRef) -> Option<Vec<u8>> {
        let key = file_ref.as_str().strip_prefix("cas:")?;
        self.blobs.get(key).map(|b| b.value().clone())
    }

    /// Number of distinct blobs held.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl EvidenceStore for InMemoryEvidenceStore {
    fn store(&self, bytes: &[u8], _kind: ProofKind) -> Result<FileRef, EvidenceStoreError> {
        let hex = sha256_digest(bytes).to_hex();
        self.blobs.entry(hex.clone()).or_insert_with(|| bytes.to_vec());
        Ok(FileRef::new(format!("cas:{hex}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_mints_cas_reference() {
        let store = InMemoryEvidenceStore::new();
        let file_ref = store.store(b"door photo", ProofKind::Image).unwrap();
        assert!(file_ref.as_str().starts_with("cas:"));
        assert_eq!(store.fetch(&file_ref).unwrap(), b"door photo");
    }

    #[test]
    fn identical_bytes_resolve_to_same_reference() {
        let store = InMemoryEvidenceStore::new();
        let a = store.store(b"same clip", ProofKind::Video).unwrap();
        let b = store.store(b"same clip", ProofKind::Video).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn different_bytes_resolve_to_different_references() {
        let store = InMemoryEvidenceStore::new();
        let a = store.store(b"clip one", ProofKind::Video).unwrap();
        let b = store.store(b"clip two", ProofKind::Video).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn fetch_unknown_reference_is_none() {
        let store = InMemoryEvidenceStore::new();
        assert!(store.fetch(&FileRef::new("cas:deadbeef")).is_none());
        assert!(store.fetch(&FileRef::new("s3://bucket/key")).is_none());
    }

    #[test]
    fn proof_kind_display() {
        assert_eq!(format!("{}", ProofKind::Image), "image");
        assert_eq!(format!("{}", ProofKind::Video), "video");
    }

    #[test]
    fn proof_id_display() {
        let id = ProofId::new();
        assert!(format!("{id}").starts_with("proof:"));
    }

    #[test]
    fn proof_record_serde_roundtrip() {
        let proof = EvidenceProof {
            id: ProofId::new(),
            dossier_id: DossierId::new(),
            file_ref: FileRef::new("cas:00ff"),
            kind: ProofKind::Image,
            submitted_by: MemberId::new(),
            created_at: Timestamp::now(),
        };
        let json = serde_json::to_string(&proof).unwrap();
        let deser: EvidenceProof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, deser);
    }
}
