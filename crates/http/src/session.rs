//! Session token lifecycle: storage, expiry tracking, single-flight renewal.
//!
//! The coordinator is the one writer of the stored token outside of login
//! and logout. Concurrency here is browser-event-loop interleaving, not
//! parallelism, so "only one renewal call at a time" is enforced by
//! memoizing the in-flight future rather than locking: everyone who asks
//! while a renewal is running awaits the same shared future and sees the
//! same resolved token.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;

use jobdeck_core::claims::ClaimsDecoder;
use jobdeck_core::{
    Clock, Durability, Role, SessionConfig, SessionError, TokenKind, TokenVault,
};

use crate::client::{ClientError, PublicJobdeckClient, TypedClientBuilder};

type RefreshFuture = Shared<LocalBoxFuture<'static, Result<String, SessionError>>>;

/// Invoked when a renewal fails for good and the stored session has been
/// erased. The argument is the last role we knew about, so the caller can
/// pick a login surface.
pub type SessionExpiredHook = Rc<dyn Fn(Option<Role>)>;

/// Coordinates the stored token, its decoded claims, and renewal calls.
///
/// Cheap to clone; clones share the vault and the in-flight renewal.
#[derive(Clone)]
pub struct SessionCoordinator {
    inner: Rc<CoordinatorInner>,
}

struct CoordinatorInner {
    vault: TokenVault,
    decoder: ClaimsDecoder,
    clock: Box<dyn Clock>,
    config: SessionConfig,
    client: PublicJobdeckClient,
    on_expired: Option<SessionExpiredHook>,
    inflight: RefCell<Option<RefreshFuture>>,
}

impl SessionCoordinator {
    pub fn builder() -> SessionCoordinatorBuilder {
        SessionCoordinatorBuilder::new()
    }

    /// The stored token, live or not.
    pub fn current_token(&self) -> Option<String> {
        self.inner.vault.token()
    }

    /// Role of the current session. The stored kind tag wins; the claims
    /// are the fallback for tokens stored before tags existed.
    pub fn current_role(&self) -> Option<Role> {
        if let Some(kind) = self.inner.vault.kind() {
            return Some(kind.role());
        }
        let token = self.inner.vault.token()?;
        self.inner.decoder.role_of(&token)
    }

    /// Seconds of life left on the stored token. `None` when there is no
    /// token or it carries no decodable expiry.
    pub fn remaining_secs(&self) -> Option<i64> {
        let token = self.inner.vault.token()?;
        self.inner
            .decoder
            .remaining_secs(&token, self.inner.clock.now_secs())
    }

    /// Whether a stored, unexpired token exists.
    pub fn has_live_token(&self) -> bool {
        match self.inner.vault.token() {
            Some(token) => !self
                .inner
                .decoder
                .is_expired(&token, self.inner.clock.now_secs()),
            None => false,
        }
    }

    /// Persist a token obtained from a login, honoring the caller's
    /// durability choice.
    pub fn store_login(&self, token: &str, remember: bool, kind: Option<TokenKind>) {
        self.inner.vault.store_token(token, remember, kind);
    }

    /// Drop the stored session without touching the server.
    pub fn clear_session(&self) {
        self.inner.vault.clear();
    }

    /// Proactive path: hand back the stored token, renewing first when it
    /// is about to expire.
    ///
    /// Renewal failure here is non-fatal for the caller's request: the old
    /// token may still have seconds of life left, so it is returned instead
    /// of failing outright. A genuinely dead token then surfaces as a 401
    /// and takes the reactive path.
    pub async fn valid_token(&self) -> Option<String> {
        let token = self.inner.vault.token()?;
        let now = self.inner.clock.now_secs();
        if !self
            .inner
            .decoder
            .is_expiring_soon(&token, now, self.inner.config.proactive_buffer_secs)
        {
            return Some(token);
        }
        match self.refresh().await {
            Ok(fresh) => Some(fresh),
            Err(err) => {
                tracing::warn!(%err, "proactive renewal failed, continuing with current token");
                Some(token)
            }
        }
    }

    /// Reactive/explicit renewal.
    ///
    /// Concurrent callers join the in-flight renewal instead of starting
    /// another; all of them resolve to the identical token. The handle is
    /// cleared on completion either way, so the next call starts fresh.
    pub async fn refresh(&self) -> Result<String, SessionError> {
        let fut = {
            let mut slot = self.inner.inflight.borrow_mut();
            match slot.as_ref() {
                Some(inflight) => inflight.clone(),
                None => {
                    let inner = Rc::clone(&self.inner);
                    let fresh: RefreshFuture = async move {
                        let outcome = inner.try_renew().await;
                        if let Err(err) = &outcome {
                            inner.handle_renewal_failure(err);
                        }
                        inner.inflight.borrow_mut().take();
                        outcome
                    }
                    .boxed_local()
                    .shared();
                    *slot = Some(fresh.clone());
                    fresh
                }
            }
        };
        fut.await
    }
}

impl CoordinatorInner {
    async fn try_renew(&self) -> Result<String, SessionError> {
        let token = self.vault.token().ok_or(SessionError::MissingToken)?;
        let role = self.role_for(&token).ok_or(SessionError::UndeterminedRole)?;
        let durability = self.vault.durability();

        let response = self
            .client
            .refresh(role)
            .await
            .map_err(|err| SessionError::renewal(err.to_string()))?;
        let grant = response
            .into_grant()
            .ok_or_else(|| SessionError::malformed_grant("no token field in renewal response"))?;

        // A renewal replaces the token in whichever tier the user chose at
        // login; the tag is kept when the response omits one.
        let remember = !matches!(durability, Some(Durability::Session));
        let kind = grant.kind.or_else(|| self.vault.kind());
        self.vault.store_token(&grant.token, remember, kind);
        tracing::debug!(%role, "session token renewed");
        Ok(grant.token)
    }

    fn handle_renewal_failure(&self, err: &SessionError) {
        tracing::error!(%err, "session renewal failed, clearing stored credentials");
        let role = self.last_known_role();
        self.vault.clear();
        if let Some(hook) = &self.on_expired {
            hook(role);
        }
    }

    fn role_for(&self, token: &str) -> Option<Role> {
        if let Some(kind) = self.vault.kind() {
            return Some(kind.role());
        }
        self.decoder.role_of(token)
    }

    fn last_known_role(&self) -> Option<Role> {
        self.vault.kind().map(|kind| kind.role()).or_else(|| {
            self.vault
                .token()
                .and_then(|token| self.decoder.role_of(&token))
        })
    }
}

/// Builder for [`SessionCoordinator`].
///
/// The coordinator is constructed explicitly at the application's
/// composition root; tests build isolated instances per case.
pub struct SessionCoordinatorBuilder {
    base_url: Option<String>,
    vault: Option<TokenVault>,
    clock: Option<Box<dyn Clock>>,
    config: SessionConfig,
    on_expired: Option<SessionExpiredHook>,
}

impl SessionCoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            vault: None,
            clock: None,
            config: SessionConfig::default(),
            on_expired: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn vault(mut self, vault: TokenVault) -> Self {
        self.vault = Some(vault);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Hook invoked after an unrecoverable renewal failure has erased the
    /// session (typically: redirect to the role's login page).
    pub fn on_session_expired(mut self, hook: impl Fn(Option<Role>) + 'static) -> Self {
        self.on_expired = Some(Rc::new(hook));
        self
    }

    pub fn build(self) -> Result<SessionCoordinator, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let vault = self
            .vault
            .ok_or_else(|| ClientError::Configuration("token vault is required".into()))?;
        let clock = self
            .clock
            .ok_or_else(|| ClientError::Configuration("clock is required".into()))?;

        let builder = TypedClientBuilder::new().base_url(base_url);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(self.config.request_timeout);
        let client = builder.build_public()?;

        Ok(SessionCoordinator {
            inner: Rc::new(CoordinatorInner {
                decoder: ClaimsDecoder::new(self.config.decode_cache_capacity),
                vault,
                clock,
                config: self.config,
                client,
                on_expired: self.on_expired,
                inflight: RefCell::new(None),
            }),
        })
    }
}

impl Default for SessionCoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
