//! Account reconciliation service.

use std::sync::Arc;

use auth_driver_sdk::{
    AuthRequest, RegistrationPolicy, ResourceHandle, ResourceStore, Translator, UserAccount,
    UserStore,
};
use modkit_security::constants::{DEFAULT_TENANT_ID, SUBJECT_TYPE_USER};
use modkit_security::{ActorSession, SecurityContext};
use tracing::field::{Empty, display};
use tracing::{Span, debug, info, instrument, warn};

use super::error::DomainError;
use super::ports::ProfileProvider;
use super::profile::ProviderProfile;
use super::reconcile::apply_profile;
use super::token::extract_token;

/// Translation key of the message shown when an unknown email may not sign up.
pub const SIGN_UP_DISABLED_KEY: &str = "signup_is_disabled";

/// Collaborators of the service.
pub struct ServiceDeps {
    pub provider: Arc<dyn ProfileProvider>,
    pub users: Arc<dyn UserStore>,
    pub resources: Arc<dyn ResourceStore>,
    pub translator: Arc<dyn Translator>,
    pub policy: Arc<dyn RegistrationPolicy>,
}

/// uLogin account reconciliation.
///
/// One call handles one submission: fetch the profile for the submitted
/// token, find or create the account, merge the profile in and save.
pub struct Service {
    provider: Arc<dyn ProfileProvider>,
    users: Arc<dyn UserStore>,
    resources: Arc<dyn ResourceStore>,
    translator: Arc<dyn Translator>,
    policy: Arc<dyn RegistrationPolicy>,
}

impl Service {
    #[must_use]
    pub fn new(deps: ServiceDeps) -> Self {
        Self {
            provider: deps.provider,
            users: deps.users,
            resources: deps.resources,
            translator: deps.translator,
            policy: deps.policy,
        }
    }

    /// Sign in (or up) the user behind the submitted uLogin token.
    ///
    /// On success `session` is switched to the account. On failure it is
    /// left as it was and the stores hold what they held before the call: an
    /// account created by this call is removed again and a freshly stored
    /// picture is deleted.
    ///
    /// # Errors
    ///
    /// - `MissingToken` if the submission carries no token
    /// - provider errors (`ProviderStatus`, `ProviderRejected`,
    ///   `MalformedResponse`, `EmailNotVerified`, `ProviderUnreachable`)
    /// - `SignUpDisabled` for an unknown email without self-registration
    /// - `Store` on collaborator failure
    #[instrument(
        skip_all,
        fields(host = %request.host, account_id = Empty, is_new = Empty)
    )]
    pub async fn authenticate(
        &self,
        session: &mut ActorSession,
        request: &AuthRequest,
    ) -> Result<UserAccount, DomainError> {
        let token = extract_token(&request.fields)?;
        let profile = self.provider.fetch_profile(token, &request.host).await?;
        let email = profile.verified_email()?;

        let existing = self.users.find_by_email(session.current(), email).await?;
        let (account, created) = match existing {
            Some(account) => (account, None),
            None => {
                let account = self.register(session, email).await?;
                (account.clone(), Some(account))
            }
        };
        let is_new = created.is_some();
        Span::current()
            .record("account_id", display(account.id))
            .record("is_new", is_new);

        let outcome = self.reconcile(session, account, &profile, token, is_new).await;
        match outcome {
            Ok(account) => {
                info!("uLogin sign-in completed");
                Ok(account)
            }
            Err(e) => {
                if let Some(created) = created {
                    self.discard_account(session, &created).await;
                }
                Err(e)
            }
        }
    }

    /// Create the account for `email` as the system actor.
    async fn register(
        &self,
        session: &mut ActorSession,
        email: &str,
    ) -> Result<UserAccount, DomainError> {
        if !self.policy.is_self_registration_enabled() {
            debug!("unknown email and self-registration is disabled");
            return Err(DomainError::SignUpDisabled {
                message: self.translator.translate(SIGN_UP_DISABLED_KEY),
            });
        }

        let elevated = session.elevate_to_system();
        let account = self.users.create_account(elevated.context(), email).await?;
        drop(elevated);

        info!(account_id = %account.id, "created account for uLogin user");
        Ok(account)
    }

    /// Merge the profile into `account` and save it as the account itself.
    ///
    /// The actor switch is committed only after the save went through.
    async fn reconcile(
        &self,
        session: &mut ActorSession,
        mut account: UserAccount,
        profile: &ProviderProfile,
        token: &str,
        is_new: bool,
    ) -> Result<UserAccount, DomainError> {
        let actor = session.switch_to(account_context(&account, token));

        let replaced = if is_new {
            self.store_picture(actor.context(), &mut account, profile)
                .await?
        } else {
            None
        };
        apply_profile(&mut account, profile, is_new);

        if let Err(e) = self.users.save(actor.context(), &account).await {
            if let Some(replaced) = &replaced {
                self.discard_resource(actor.context(), &replaced.stored).await;
            }
            return Err(e.into());
        }

        // The old picture is unreferenced only once the save went through.
        if let Some(previous) = replaced.and_then(|r| r.previous) {
            self.discard_resource(actor.context(), &previous).await;
        }

        actor.commit();
        Ok(account)
    }

    /// Store the profile picture, if any, and point `account` at it.
    async fn store_picture(
        &self,
        ctx: &SecurityContext,
        account: &mut UserAccount,
        profile: &ProviderProfile,
    ) -> Result<Option<ReplacedPicture>, DomainError> {
        let Some(url) = profile.picture_url() else {
            return Ok(None);
        };

        let stored = self.resources.store_from_url(ctx, url).await?;
        let previous = account.picture.replace(stored.clone());
        Ok(Some(ReplacedPicture { stored, previous }))
    }

    /// Remove an account created by a sign-in that did not complete.
    async fn discard_account(&self, session: &mut ActorSession, account: &UserAccount) {
        let elevated = session.elevate_to_system();
        match self.users.delete_account(elevated.context(), account).await {
            Ok(()) => debug!(account_id = %account.id, "discarded account of failed sign-in"),
            Err(e) => warn!(
                account_id = %account.id,
                error = %e,
                "failed to discard account of failed sign-in"
            ),
        }
    }

    async fn discard_resource(&self, ctx: &SecurityContext, handle: &ResourceHandle) {
        if let Err(e) = self.resources.delete(ctx, handle).await {
            warn!(resource_id = %handle.id, error = %e, "failed to delete picture");
        }
    }
}

/// Picture swap performed for a new account.
struct ReplacedPicture {
    stored: ResourceHandle,
    previous: Option<ResourceHandle>,
}

fn account_context(account: &UserAccount, token: &str) -> SecurityContext {
    SecurityContext::builder()
        .subject_id(account.id)
        .subject_type(SUBJECT_TYPE_USER)
        .subject_tenant_id(DEFAULT_TENANT_ID)
        .bearer_token(token.to_owned())
        .build()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use async_trait::async_trait;
    use auth_driver_sdk::{Gender, StoreError, SubmittedFields};
    use parking_lot::Mutex;
    use secrecy::ExposeSecret;
    use serde_json::{Value, json};
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::infra::{
        InMemoryResourceStore, InMemoryUserStore, LangCatalog, StaticRegistrationPolicy,
    };

    const TOKEN: &str = "c0ffee-token-value";

    /// Provider returning a canned response and recording the calls.
    struct StubProvider {
        response: Result<Value, fn() -> DomainError>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl StubProvider {
        fn returning(value: Value) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(value),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(e: fn() -> DomainError) -> Arc<Self> {
            Arc::new(Self {
                response: Err(e),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ProfileProvider for StubProvider {
        async fn fetch_profile(
            &self,
            token: &str,
            host: &str,
        ) -> Result<ProviderProfile, DomainError> {
            self.calls.lock().push((token.to_owned(), host.to_owned()));
            match &self.response {
                Ok(value) => ProviderProfile::from_json(&value.to_string()),
                Err(make) => Err(make()),
            }
        }
    }

    /// Resource store that cannot fetch anything.
    struct UnreachableResources;

    #[async_trait]
    impl ResourceStore for UnreachableResources {
        async fn store_from_url(
            &self,
            _ctx: &SecurityContext,
            url: &str,
        ) -> Result<ResourceHandle, StoreError> {
            Err(StoreError::Internal(format!("cannot fetch {url}")))
        }

        async fn delete(
            &self,
            _ctx: &SecurityContext,
            _handle: &ResourceHandle,
        ) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Account store whose `save` always fails.
    struct RejectingSaves(Arc<InMemoryUserStore>);

    #[async_trait]
    impl UserStore for RejectingSaves {
        async fn find_by_email(
            &self,
            ctx: &SecurityContext,
            email: &str,
        ) -> Result<Option<UserAccount>, StoreError> {
            self.0.find_by_email(ctx, email).await
        }

        async fn create_account(
            &self,
            ctx: &SecurityContext,
            email: &str,
        ) -> Result<UserAccount, StoreError> {
            self.0.create_account(ctx, email).await
        }

        async fn save(
            &self,
            _ctx: &SecurityContext,
            _account: &UserAccount,
        ) -> Result<(), StoreError> {
            Err(StoreError::Internal("disk full".to_owned()))
        }

        async fn delete_account(
            &self,
            ctx: &SecurityContext,
            account: &UserAccount,
        ) -> Result<(), StoreError> {
            self.0.delete_account(ctx, account).await
        }
    }

    fn service_with(
        users: Arc<dyn UserStore>,
        resources: Arc<dyn ResourceStore>,
        profile: Value,
    ) -> Service {
        Service::new(ServiceDeps {
            provider: StubProvider::returning(profile),
            users,
            resources,
            translator: Arc::new(LangCatalog::embedded("en").unwrap()),
            policy: Arc::new(StaticRegistrationPolicy::new(true)),
        })
    }

    struct Fixture {
        service: Service,
        provider: Arc<StubProvider>,
        users: Arc<InMemoryUserStore>,
        resources: Arc<InMemoryResourceStore>,
    }

    fn fixture(provider: Arc<StubProvider>, self_registration: bool) -> Fixture {
        let resources = Arc::new(InMemoryResourceStore::new());
        let users = Arc::new(InMemoryUserStore::new(resources.clone()));
        let service = Service::new(ServiceDeps {
            provider: provider.clone(),
            users: users.clone(),
            resources: resources.clone(),
            translator: Arc::new(LangCatalog::embedded("en").unwrap()),
            policy: Arc::new(StaticRegistrationPolicy::new(self_registration)),
        });
        Fixture {
            service,
            provider,
            users,
            resources,
        }
    }

    fn request() -> AuthRequest {
        let mut fields = SubmittedFields::new();
        fields.push("login-widget-ulogin-token", TOKEN);
        AuthRequest::new(fields, "example.com")
    }

    fn verified(extra: Value) -> Value {
        let mut base = json!({
            "email": "ivan@example.com",
            "verified_email": "1",
            "first_name": "Ivan",
            "last_name": "Petrov",
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut base, extra) {
            base.extend(extra);
        }
        base
    }

    #[tokio::test]
    async fn passes_token_and_host_to_provider() {
        let f = fixture(StubProvider::returning(verified(json!({}))), true);
        let mut session = ActorSession::anonymous();

        f.service.authenticate(&mut session, &request()).await.unwrap();

        assert_eq!(
            f.provider.calls.lock().as_slice(),
            &[(TOKEN.to_owned(), "example.com".to_owned())]
        );
    }

    #[tokio::test]
    async fn new_account_is_created_and_session_switched() {
        let f = fixture(
            StubProvider::returning(verified(json!({
                "photo_big": "http://img/big.jpg",
                "photo": "http://img/small.jpg",
            }))),
            true,
        );
        let mut session = ActorSession::anonymous();

        let account = f.service.authenticate(&mut session, &request()).await.unwrap();

        assert_eq!(account.email(), "ivan@example.com");
        assert_eq!(account.nickname, "Ivan Petrov");
        assert_eq!(
            account.picture.as_ref().map(|p| p.source.as_str()),
            Some("http://img/big.jpg")
        );
        assert_eq!(f.users.len(), 1);
        assert_eq!(f.users.saves(), 1);
        // Only the fetched picture remains; the default one was deleted.
        assert_eq!(f.resources.len(), 1);

        let actor = session.current();
        assert_eq!(actor.subject_id(), account.id);
        assert!(!actor.is_system());
        assert_eq!(
            actor.bearer_token().map(ExposeSecret::expose_secret),
            Some(TOKEN)
        );
    }

    #[tokio::test]
    async fn sign_up_disabled_uses_translated_message() {
        let f = fixture(StubProvider::returning(verified(json!({}))), false);
        let mut session = ActorSession::anonymous();

        let err = f
            .service
            .authenticate(&mut session, &request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::SignUpDisabled { message }
                if message == "Sign up of new users is disabled on this site."
        ));
        assert_eq!(f.users.len(), 0);
        assert!(session.current().is_anonymous());
    }

    #[tokio::test]
    async fn provider_failure_leaves_store_untouched() {
        let f = fixture(
            StubProvider::failing(|| DomainError::ProviderStatus { status: 502 }),
            true,
        );
        let mut session = ActorSession::anonymous();

        let err = f
            .service
            .authenticate(&mut session, &request())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ProviderStatus { status: 502 }));
        assert_eq!(f.users.len(), 0);
        assert_eq!(f.users.saves(), 0);
    }

    #[tokio::test]
    async fn missing_token_never_calls_provider() {
        let f = fixture(StubProvider::returning(verified(json!({}))), true);
        let mut session = ActorSession::anonymous();
        let request = AuthRequest::new(
            [("email", "ivan@example.com")].into_iter().collect(),
            "example.com",
        );

        let err = f
            .service
            .authenticate(&mut session, &request)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::MissingToken));
        assert!(f.provider.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_picture_fetch_restores_caller_and_skips_save() {
        let resources = Arc::new(InMemoryResourceStore::new());
        let users = Arc::new(InMemoryUserStore::new(resources.clone()));
        let service = service_with(
            users.clone(),
            Arc::new(UnreachableResources),
            verified(json!({"photo": "http://img/a.jpg"})),
        );
        let caller = SecurityContext::for_user(Uuid::new_v4());
        let mut session = ActorSession::new(caller.clone());

        let err = service
            .authenticate(&mut session, &request())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Store(StoreError::Internal(_))));
        assert_eq!(session.current().subject_id(), caller.subject_id());
        assert_eq!(users.saves(), 0);
        assert_eq!(users.len(), 0);
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn retry_after_failed_picture_fetch_signs_up_fully() {
        let resources = Arc::new(InMemoryResourceStore::new());
        let users = Arc::new(InMemoryUserStore::new(resources.clone()));
        let profile = verified(json!({"photo": "http://img/a.jpg"}));
        let mut session = ActorSession::anonymous();

        service_with(users.clone(), Arc::new(UnreachableResources), profile.clone())
            .authenticate(&mut session, &request())
            .await
            .unwrap_err();
        let account = service_with(users.clone(), resources.clone(), profile)
            .authenticate(&mut session, &request())
            .await
            .unwrap();

        assert_eq!(account.nickname, "Ivan Petrov");
        assert_eq!(
            account.picture.as_ref().map(|p| p.source.as_str()),
            Some("http://img/a.jpg")
        );
        let stored = users.get("ivan@example.com").unwrap();
        assert_eq!(stored.id, account.id);
        assert_eq!(stored.nickname, account.nickname);
        assert_eq!(stored.picture, account.picture);
        assert_eq!(users.saves(), 1);
        assert_eq!(resources.len(), 1);
    }

    #[tokio::test]
    async fn failed_save_discards_new_account_and_picture() {
        let resources = Arc::new(InMemoryResourceStore::new());
        let users = Arc::new(InMemoryUserStore::new(resources.clone()));
        let service = service_with(
            Arc::new(RejectingSaves(users.clone())),
            resources.clone(),
            verified(json!({"photo": "http://img/a.jpg"})),
        );
        let mut session = ActorSession::anonymous();

        let err = service
            .authenticate(&mut session, &request())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Store(StoreError::Internal(_))));
        assert!(session.current().is_anonymous());
        assert!(users.is_empty());
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_existing_account() {
        let resources = Arc::new(InMemoryResourceStore::new());
        let users = Arc::new(InMemoryUserStore::new(resources.clone()));
        let existing = users.seed("ivan@example.com", |_| {});
        let service = service_with(
            Arc::new(RejectingSaves(users.clone())),
            resources.clone(),
            verified(json!({"sex": "2"})),
        );
        let mut session = ActorSession::anonymous();

        service
            .authenticate(&mut session, &request())
            .await
            .unwrap_err();

        assert_eq!(users.get("ivan@example.com"), Some(existing));
        assert_eq!(resources.len(), 1);
    }

    #[tokio::test]
    async fn existing_account_keeps_picture_and_nickname() {
        let f = fixture(
            StubProvider::returning(verified(json!({
                "photo_big": "http://img/big.jpg",
                "sex": "1",
            }))),
            true,
        );
        let existing = f.users.seed("ivan@example.com", |a| {
            a.nickname = "vanya".to_owned();
        });
        let mut session = ActorSession::anonymous();

        let account = f.service.authenticate(&mut session, &request()).await.unwrap();

        assert_eq!(account.id, existing.id);
        assert_eq!(account.nickname, "vanya");
        assert_eq!(account.picture, existing.picture);
        assert_eq!(account.gender, Gender::Female);
        assert_eq!(f.users.len(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn token_is_not_logged() {
        let f = fixture(StubProvider::returning(verified(json!({}))), true);
        let mut session = ActorSession::anonymous();

        f.service.authenticate(&mut session, &request()).await.unwrap();

        assert!(logs_contain("uLogin sign-in completed"));
        assert!(!logs_contain(TOKEN));
    }
}
