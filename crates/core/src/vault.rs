//! Two-tier token persistence.
//!
//! The browser offers a durable store (localStorage) and a tab-scoped one
//! (sessionStorage); "remember me" decides which of the two holds the
//! session. The vault enforces the single invariant that matters: the token
//! and its kind tag live together in exactly one tier, so the two stores can
//! never diverge.

use crate::token::TokenKind;

/// Key under which the access token is stored.
pub const TOKEN_KEY: &str = "jobdeck.access_token";
/// Key under which the token kind tag is stored.
pub const TOKEN_KIND_KEY: &str = "jobdeck.token_kind";

/// One key-value storage tier (localStorage, sessionStorage, memory).
///
/// Writes are best-effort: browser storage can reject them (quota, private
/// mode), and the session layer treats a lost write the same as an absent
/// value on the next read.
#[cfg_attr(test, mockall::automock)]
pub trait StorageTier {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Which tier currently holds the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    Durable,
    Session,
}

/// Token storage spanning a durable and a session-scoped tier.
pub struct TokenVault {
    durable: Box<dyn StorageTier>,
    session: Box<dyn StorageTier>,
}

impl TokenVault {
    pub fn new(durable: Box<dyn StorageTier>, session: Box<dyn StorageTier>) -> Self {
        Self { durable, session }
    }

    /// Write `token` (and `kind`, when given) into the tier chosen by
    /// `remember`, and delete any copy from the other tier.
    pub fn store_token(&self, token: &str, remember: bool, kind: Option<TokenKind>) {
        let (target, other) = if remember {
            (&self.durable, &self.session)
        } else {
            (&self.session, &self.durable)
        };
        target.set(TOKEN_KEY, token);
        if let Some(kind) = kind {
            target.set(TOKEN_KIND_KEY, kind.as_str());
        }
        other.remove(TOKEN_KEY);
        other.remove(TOKEN_KIND_KEY);
    }

    /// The stored token, durable tier first.
    pub fn token(&self) -> Option<String> {
        self.durable
            .get(TOKEN_KEY)
            .or_else(|| self.session.get(TOKEN_KEY))
    }

    /// The kind tag co-located with the stored token.
    pub fn kind(&self) -> Option<TokenKind> {
        let tier: &dyn StorageTier = match self.durability()? {
            Durability::Durable => self.durable.as_ref(),
            Durability::Session => self.session.as_ref(),
        };
        tier.get(TOKEN_KIND_KEY).as_deref().and_then(TokenKind::parse)
    }

    /// Which tier holds the live token, used to preserve the user's
    /// durability choice across a renewal.
    pub fn durability(&self) -> Option<Durability> {
        if self.durable.get(TOKEN_KEY).is_some() {
            Some(Durability::Durable)
        } else if self.session.get(TOKEN_KEY).is_some() {
            Some(Durability::Session)
        } else {
            None
        }
    }

    /// Delete token and kind from both tiers. Idempotent.
    pub fn clear(&self) {
        for tier in [self.durable.as_ref(), self.session.as_ref()] {
            tier.remove(TOKEN_KEY);
            tier.remove(TOKEN_KIND_KEY);
        }
    }
}

/// In-memory tier for tests. Clones share the underlying map, so a test can
/// keep a handle and inspect what a vault wrote.
#[cfg(any(test, feature = "tests"))]
#[derive(Clone, Default)]
pub struct MemoryTier {
    values: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(any(test, feature = "tests"))]
impl StorageTier for MemoryTier {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn vault() -> (TokenVault, MemoryTier, MemoryTier) {
        let durable = MemoryTier::default();
        let session = MemoryTier::default();
        let vault = TokenVault::new(Box::new(durable.clone()), Box::new(session.clone()));
        (vault, durable, session)
    }

    #[test]
    fn remembered_token_lands_in_the_durable_tier_only() {
        let (vault, durable, session) = vault();
        vault.store_token("tok", true, Some(TokenKind::Access));

        assert_eq!(vault.token().as_deref(), Some("tok"));
        assert_eq!(durable.get(TOKEN_KEY).as_deref(), Some("tok"));
        assert_eq!(session.get(TOKEN_KEY), None);
        assert_eq!(vault.durability(), Some(Durability::Durable));
    }

    #[test]
    fn session_token_lands_in_the_session_tier_only() {
        let (vault, durable, session) = vault();
        vault.store_token("tok", false, Some(TokenKind::CompanyAccess));

        assert_eq!(vault.token().as_deref(), Some("tok"));
        assert_eq!(session.get(TOKEN_KEY).as_deref(), Some("tok"));
        assert_eq!(durable.get(TOKEN_KEY), None);
        assert_eq!(vault.durability(), Some(Durability::Session));
        assert_eq!(vault.kind(), Some(TokenKind::CompanyAccess));
    }

    #[test]
    fn switching_durability_moves_token_and_kind_together() {
        let (vault, durable, session) = vault();
        vault.store_token("tok", true, Some(TokenKind::Access));
        vault.store_token("tok2", false, Some(TokenKind::Access));

        assert_eq!(durable.get(TOKEN_KEY), None);
        assert_eq!(durable.get(TOKEN_KIND_KEY), None);
        assert_eq!(session.get(TOKEN_KEY).as_deref(), Some("tok2"));
        assert_eq!(session.get(TOKEN_KIND_KEY).as_deref(), Some("access"));
    }

    #[test]
    fn storing_without_kind_keeps_the_existing_tag() {
        let (vault, _, _) = vault();
        vault.store_token("tok", true, Some(TokenKind::AdminAccess));
        vault.store_token("tok2", true, None);

        assert_eq!(vault.token().as_deref(), Some("tok2"));
        assert_eq!(vault.kind(), Some(TokenKind::AdminAccess));
    }

    #[test]
    fn clear_wipes_both_tiers_and_both_keys() {
        let (vault, durable, session) = vault();
        vault.store_token("tok", true, Some(TokenKind::Access));
        vault.clear();
        // clearing an already-empty vault is fine
        vault.clear();

        assert_eq!(vault.token(), None);
        assert_eq!(vault.kind(), None);
        assert_eq!(vault.durability(), None);
        for tier in [durable, session] {
            assert_eq!(tier.get(TOKEN_KEY), None);
            assert_eq!(tier.get(TOKEN_KIND_KEY), None);
        }
    }

    #[test]
    fn unknown_kind_tag_reads_as_absent() {
        let (vault, durable, _) = vault();
        vault.store_token("tok", true, None);
        durable.set(TOKEN_KIND_KEY, "something_else");
        assert_eq!(vault.kind(), None);
    }

    #[test]
    fn store_always_scrubs_the_other_tier() {
        let mut durable = MockStorageTier::new();
        durable
            .expect_set()
            .with(eq(TOKEN_KEY), eq("tok"))
            .times(1)
            .return_const(());
        durable
            .expect_set()
            .with(eq(TOKEN_KIND_KEY), eq("access"))
            .times(1)
            .return_const(());

        let mut session = MockStorageTier::new();
        session
            .expect_remove()
            .with(eq(TOKEN_KEY))
            .times(1)
            .return_const(());
        session
            .expect_remove()
            .with(eq(TOKEN_KIND_KEY))
            .times(1)
            .return_const(());

        let vault = TokenVault::new(Box::new(durable), Box::new(session));
        vault.store_token("tok", true, Some(TokenKind::Access));
    }
}
