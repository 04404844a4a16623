use crate::collection::persistence::CollectionSnapshot;
use crate::core::{CommandError, Result};
use crate::model::{BandPayload, MusicBand};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// The one shared mutable resource of the server: an ordered collection of
/// bands keyed by id, behind a single writer-exclusive lock.
///
/// Every operation takes the lock exactly once, so each is indivisible from
/// the point of view of every other: a `remove_where` sweep can never be
/// interleaved with an insert, and `snapshot` always reflects one consistent
/// point in time. Ids are assigned by a monotonic counter and never reused.
pub struct BandCollection {
    inner: RwLock<Inner>,
}

struct Inner {
    bands: BTreeMap<u64, MusicBand>,
    next_id: u64,
    created_at: DateTime<Utc>,
}

impl BandCollection {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                bands: BTreeMap::new(),
                next_id: 1,
                created_at: Utc::now(),
            }),
        }
    }

    /// Rebuilds a collection from a persisted snapshot. The id counter is
    /// bumped past every restored id so ids are never reused across restarts.
    pub fn restore(snapshot: CollectionSnapshot) -> Self {
        let max_id = snapshot.bands.iter().map(|b| b.id).max().unwrap_or(0);
        let bands = snapshot.bands.into_iter().map(|b| (b.id, b)).collect();
        Self {
            inner: RwLock::new(Inner {
                bands,
                next_id: snapshot.next_id.max(max_id + 1),
                created_at: snapshot.metadata.collection_created_at,
            }),
        }
    }

    /// Validates the payload, assigns the next id and stamps the owner.
    pub async fn insert(&self, payload: &BandPayload, owner: &str) -> Result<u64> {
        payload.validate()?;
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.bands.insert(id, MusicBand::from_payload(id, payload, owner));
        Ok(id)
    }

    /// Removes one band, iff it exists and belongs to the requester.
    pub async fn remove_by_id(&self, id: u64, requester: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let band = inner.bands.get(&id).ok_or(CommandError::NotFound(id))?;
        if band.owner != requester {
            return Err(CommandError::NotOwner(id));
        }
        inner.bands.remove(&id);
        Ok(())
    }

    /// Atomically removes every band owned by the requester that satisfies
    /// the predicate; returns how many were removed. Bands of other owners
    /// are never touched, even when they match.
    pub async fn remove_where<F>(&self, requester: &str, predicate: F) -> usize
    where
        F: Fn(&MusicBand) -> bool,
    {
        let mut inner = self.inner.write().await;
        let before = inner.bands.len();
        inner
            .bands
            .retain(|_, band| band.owner != requester || !predicate(band));
        before - inner.bands.len()
    }

    /// Replaces the business fields of an existing band. Id, owner and
    /// creation date are preserved.
    pub async fn update(&self, id: u64, payload: &BandPayload, requester: &str) -> Result<()> {
        payload.validate()?;
        let mut inner = self.inner.write().await;
        let band = inner
            .bands
            .get_mut(&id)
            .ok_or(CommandError::NotFound(id))?;
        if band.owner != requester {
            return Err(CommandError::NotOwner(id));
        }
        band.name = payload.name.clone();
        band.coordinates = payload.coordinates.clone();
        band.number_of_participants = payload.number_of_participants;
        band.genre = payload.genre;
        Ok(())
    }

    /// Removes every band owned by the requester; returns the count.
    pub async fn clear_owned(&self, requester: &str) -> usize {
        self.remove_where(requester, |_| true).await
    }

    /// Copy-out of the whole collection in iteration order:
    /// participants, then name, then id.
    pub async fn snapshot(&self) -> Vec<MusicBand> {
        let inner = self.inner.read().await;
        let mut bands: Vec<MusicBand> = inner.bands.values().cloned().collect();
        bands.sort_by(|a, b| a.ordering(b));
        bands
    }

    /// The first band in iteration order, if any.
    pub async fn head(&self) -> Option<MusicBand> {
        let inner = self.inner.read().await;
        inner
            .bands
            .values()
            .min_by(|a, b| a.ordering(*b))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.bands.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.bands.is_empty()
    }

    pub async fn created_at(&self) -> DateTime<Utc> {
        self.inner.read().await.created_at
    }

    /// Consistent copy for persistence; taken under the read lock, written
    /// to disk outside of it.
    pub async fn to_snapshot(&self) -> CollectionSnapshot {
        let inner = self.inner.read().await;
        CollectionSnapshot::new(
            inner.bands.values().cloned().collect(),
            inner.next_id,
            inner.created_at,
        )
    }
}

impl Default for BandCollection {
    fn default() -> Self {
        Self::new()
    }
}
