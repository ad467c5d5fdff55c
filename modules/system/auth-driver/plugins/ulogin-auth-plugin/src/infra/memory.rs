//! In-memory stores for the standalone binary and tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use auth_driver_sdk::{ResourceHandle, ResourceStore, StoreError, UserAccount, UserStore};
use modkit_security::SecurityContext;
use parking_lot::Mutex;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

/// Source marker of the picture every new account starts with.
pub const DEFAULT_PICTURE_SOURCE: &str = "default://avatar";

/// Resources recorded by id. Nothing is downloaded.
#[derive(Default)]
pub struct InMemoryResourceStore {
    resources: Mutex<HashMap<Uuid, ResourceHandle>>,
}

impl InMemoryResourceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resource coming from `source`.
    pub fn insert(&self, source: &str) -> ResourceHandle {
        let handle = ResourceHandle {
            id: Uuid::new_v4(),
            source: source.to_owned(),
        };
        self.resources.lock().insert(handle.id, handle.clone());
        handle
    }

    fn remove(&self, handle: &ResourceHandle) -> Option<ResourceHandle> {
        self.resources.lock().remove(&handle.id)
    }

    #[must_use]
    pub fn contains(&self, handle: &ResourceHandle) -> bool {
        self.resources.lock().contains_key(&handle.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.lock().is_empty()
    }
}

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn store_from_url(
        &self,
        _ctx: &SecurityContext,
        url: &str,
    ) -> Result<ResourceHandle, StoreError> {
        Ok(self.insert(url))
    }

    async fn delete(
        &self,
        _ctx: &SecurityContext,
        handle: &ResourceHandle,
    ) -> Result<(), StoreError> {
        self.remove(handle)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("resource {}", handle.id)))
    }
}

/// Accounts keyed by exact email.
///
/// Creation and deletion are reserved to the system actor. An account may be
/// saved by the system actor or by its owner.
pub struct InMemoryUserStore {
    accounts: Mutex<HashMap<String, UserAccount>>,
    resources: Arc<InMemoryResourceStore>,
    saves: AtomicUsize,
}

impl InMemoryUserStore {
    /// New accounts get their default picture from `resources`.
    #[must_use]
    pub fn new(resources: Arc<InMemoryResourceStore>) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            resources,
            saves: AtomicUsize::new(0),
        }
    }

    /// Insert an account directly, bypassing access checks.
    pub fn seed(&self, email: &str, edit: impl FnOnce(&mut UserAccount)) -> UserAccount {
        let mut account = self.new_account(email);
        edit(&mut account);
        self.accounts
            .lock()
            .insert(email.to_owned(), account.clone());
        account
    }

    #[must_use]
    pub fn get(&self, email: &str) -> Option<UserAccount> {
        self.accounts.lock().get(email).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.lock().is_empty()
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    fn new_account(&self, email: &str) -> UserAccount {
        let mut account = UserAccount::new(Uuid::new_v4(), email);
        account.picture = Some(self.resources.insert(DEFAULT_PICTURE_SOURCE));
        account
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(
        &self,
        _ctx: &SecurityContext,
        email: &str,
    ) -> Result<Option<UserAccount>, StoreError> {
        Ok(self.get(email))
    }

    async fn create_account(
        &self,
        ctx: &SecurityContext,
        email: &str,
    ) -> Result<UserAccount, StoreError> {
        if !ctx.is_system() {
            return Err(StoreError::Forbidden(
                "only the system actor may create accounts".to_owned(),
            ));
        }

        let mut accounts = self.accounts.lock();
        if accounts.contains_key(email) {
            return Err(StoreError::Conflict(format!("email '{email}' is taken")));
        }
        let account = self.new_account(email);
        accounts.insert(email.to_owned(), account.clone());
        debug!(account_id = %account.id, "stored new account");
        Ok(account)
    }

    async fn save(&self, ctx: &SecurityContext, account: &UserAccount) -> Result<(), StoreError> {
        if !ctx.is_system() && ctx.subject_id() != account.id {
            return Err(StoreError::Forbidden(format!(
                "subject {} may not modify account {}",
                ctx.subject_id(),
                account.id
            )));
        }

        let mut accounts = self.accounts.lock();
        let stored = accounts
            .get_mut(account.email())
            .filter(|stored| stored.id == account.id)
            .ok_or_else(|| StoreError::NotFound(format!("account {}", account.id)))?;

        let mut updated = account.clone();
        updated.created_at = stored.created_at;
        updated.updated_at = OffsetDateTime::now_utc();
        *stored = updated;
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn delete_account(
        &self,
        ctx: &SecurityContext,
        account: &UserAccount,
    ) -> Result<(), StoreError> {
        if !ctx.is_system() {
            return Err(StoreError::Forbidden(
                "only the system actor may delete accounts".to_owned(),
            ));
        }

        let mut accounts = self.accounts.lock();
        if accounts
            .get(account.email())
            .is_none_or(|stored| stored.id != account.id)
        {
            return Err(StoreError::NotFound(format!("account {}", account.id)));
        }
        let removed = accounts.remove(account.email());
        drop(accounts);

        if let Some(picture) = removed.and_then(|a| a.picture) {
            self.resources.remove(&picture);
        }
        debug!(account_id = %account.id, "deleted account");
        Ok(())
    }
}
