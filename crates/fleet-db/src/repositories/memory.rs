//! In-memory implementation of BannerRepository
//!
//! Used when no database is configured and throughout the test suites.
//! Failures can be injected per operation to exercise error paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use fleet_core::{Banner, BannerId, BannerKind, BannerRepository, DomainError, RepoResult};

use super::error::banner_not_found;

/// Process-local banner store for one banner kind
#[derive(Debug)]
pub struct MemoryBannerRepository {
    kind: BannerKind,
    banners: RwLock<HashMap<BannerId, Banner>>,
    fail_list_scheduled: RwLock<Option<String>>,
    failing_writes: RwLock<HashSet<BannerId>>,
    update_active_calls: AtomicUsize,
}

impl MemoryBannerRepository {
    pub fn new(kind: BannerKind) -> Self {
        Self {
            kind,
            banners: RwLock::new(HashMap::new()),
            fail_list_scheduled: RwLock::new(None),
            failing_writes: RwLock::new(HashSet::new()),
            update_active_calls: AtomicUsize::new(0),
        }
    }

    /// Seed the store. Banners of another kind are re-tagged.
    pub fn with_banners(kind: BannerKind, banners: impl IntoIterator<Item = Banner>) -> Self {
        let repo = Self::new(kind);
        repo.insert_all(banners);
        repo
    }

    /// Insert or replace banners without going through the port
    pub fn insert_all(&self, banners: impl IntoIterator<Item = Banner>) {
        let mut map = self.banners.write();
        for mut banner in banners {
            banner.kind = self.kind;
            map.insert(banner.id, banner);
        }
    }

    /// Current copy of a banner
    pub fn get(&self, id: BannerId) -> Option<Banner> {
        self.banners.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.banners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.read().is_empty()
    }

    /// Make `list_scheduled` fail with `message` until cleared with `None`
    pub fn fail_list_scheduled(&self, message: Option<&str>) {
        *self.fail_list_scheduled.write() = message.map(str::to_string);
    }

    /// Make every write to `id` fail
    pub fn fail_writes_for(&self, id: BannerId) {
        self.failing_writes.write().insert(id);
    }

    /// Number of `update_active` calls received, failed ones included
    pub fn update_active_calls(&self) -> usize {
        self.update_active_calls.load(Ordering::SeqCst)
    }

    fn check_write(&self, id: BannerId) -> RepoResult<()> {
        if self.failing_writes.read().contains(&id) {
            return Err(DomainError::DatabaseError(format!(
                "write rejected for banner {id}"
            )));
        }
        Ok(())
    }

    fn collect(&self, filter: impl Fn(&Banner) -> bool) -> Vec<Banner> {
        let mut banners: Vec<Banner> = self
            .banners
            .read()
            .values()
            .filter(|b| filter(b))
            .cloned()
            .collect();
        banners.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        banners
    }

    fn modify(&self, id: BannerId, apply: impl FnOnce(&mut Banner)) -> RepoResult<()> {
        self.check_write(id)?;
        let mut map = self.banners.write();
        let banner = map
            .get_mut(&id)
            .ok_or_else(|| banner_not_found(self.kind, id))?;
        apply(banner);
        Ok(())
    }
}

#[async_trait]
impl BannerRepository for MemoryBannerRepository {
    fn kind(&self) -> BannerKind {
        self.kind
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }

    async fn find_by_id(&self, id: BannerId) -> RepoResult<Option<Banner>> {
        Ok(self.get(id))
    }

    async fn list(&self) -> RepoResult<Vec<Banner>> {
        Ok(self.collect(|_| true))
    }

    async fn list_active(&self) -> RepoResult<Vec<Banner>> {
        Ok(self.collect(|b| b.active))
    }

    #[instrument(skip(self))]
    async fn list_scheduled(&self) -> RepoResult<Vec<Banner>> {
        if let Some(message) = self.fail_list_scheduled.read().clone() {
            return Err(DomainError::DatabaseError(message));
        }
        Ok(self.collect(|b| b.start_date.is_some() || b.end_date.is_some()))
    }

    async fn create(&self, banner: &Banner) -> RepoResult<()> {
        self.check_write(banner.id)?;
        let mut map = self.banners.write();
        if map.contains_key(&banner.id) {
            return Err(DomainError::ValidationError(format!(
                "banner {} already exists",
                banner.id
            )));
        }
        let mut stored = banner.clone();
        stored.kind = self.kind;
        map.insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, banner: &Banner) -> RepoResult<()> {
        self.modify(banner.id, |stored| {
            *stored = Banner {
                kind: stored.kind,
                created_at: stored.created_at,
                ..banner.clone()
            };
        })
    }

    #[instrument(skip(self))]
    async fn update_active(&self, id: BannerId, active: bool, at: DateTime<Utc>) -> RepoResult<()> {
        self.update_active_calls.fetch_add(1, Ordering::SeqCst);
        self.modify(id, |stored| {
            stored.active = active;
            stored.updated_at = at;
        })
    }

    async fn set_active_manual(
        &self,
        id: BannerId,
        active: bool,
        manually_deactivated_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.modify(id, |stored| {
            stored.active = active;
            stored.manually_deactivated_at = manually_deactivated_at;
            stored.updated_at = at;
        })
    }

    async fn delete(&self, id: BannerId) -> RepoResult<()> {
        self.check_write(id)?;
        self.banners
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| banner_not_found(self.kind, id))
    }
}
