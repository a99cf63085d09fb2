//! In-memory port implementations for service-level tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::application::domain::entities::{CodePurpose, UserId, VerificationCode};
use crate::auth::application::ports::outgoing::{
    CreateUserData, HashError, NewVerificationCode, PasswordHasher, UserQuery, UserQueryError,
    UserQueryResult, UserRepository, UserRepositoryError, UserResult, VerificationCodeRepository,
    VerificationCodeRepositoryError,
};
use crate::email::application::ports::outgoing::{AccountNotifier, NotificationError, Recipient};

pub struct UserSeed {
    name: String,
    email: String,
    password_hash: String,
    is_verified: bool,
    is_superuser: bool,
    is_deleted: bool,
    referral_code: Option<String>,
}

impl UserSeed {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hashed:password".to_string(),
            is_verified: false,
            is_superuser: false,
            is_deleted: false,
            referral_code: None,
        }
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password_hash = format!("hashed:{}", password);
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    pub fn referral_code(mut self, code: &str) -> Self {
        self.referral_code = Some(code.to_string());
        self
    }
}

#[derive(Default)]
struct UsersInner {
    rows: Vec<UserQueryResult>,
    referrals: HashMap<UserId, UserId>,
    next_id: i32,
    referral_collisions: usize,
}

/// Users table and referrals table behind one lock.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    inner: Arc<Mutex<UsersInner>>,
    failure: Option<String>,
}

impl InMemoryUsers {
    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn seed(&self, seed: UserSeed) -> UserId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = UserId::from(inner.next_id);
        let now = Utc::now();
        inner.rows.push(UserQueryResult {
            id,
            name: seed.name,
            email: seed.email,
            password_hash: seed.password_hash,
            is_verified: seed.is_verified,
            referral_code: seed.referral_code,
            is_superuser: seed.is_superuser,
            is_deleted: seed.is_deleted,
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// The next `count` inserts fail as if another writer took the referral code first.
    pub fn collide_referral_codes(&self, count: usize) {
        self.inner.lock().unwrap().referral_collisions = count;
    }

    pub fn snapshot(&self, email: &str) -> Option<UserQueryResult> {
        let inner = self.inner.lock().unwrap();
        inner.rows.iter().find(|u| u.email == email).cloned()
    }

    pub fn referrer_of(&self, user_id: UserId) -> Option<UserId> {
        self.inner.lock().unwrap().referrals.get(&user_id).copied()
    }

    fn query_guard(&self) -> Result<(), UserQueryError> {
        match &self.failure {
            Some(msg) => Err(UserQueryError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }

    fn repo_guard(&self) -> Result<(), UserRepositoryError> {
        match &self.failure {
            Some(msg) => Err(UserRepositoryError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }

    fn find<P>(&self, pred: P) -> Option<UserQueryResult>
    where
        P: Fn(&UserQueryResult) -> bool,
    {
        let inner = self.inner.lock().unwrap();
        inner.rows.iter().find(|u| pred(u)).cloned()
    }

    fn update<F>(&self, user_id: UserId, apply: F) -> Result<(), UserRepositoryError>
    where
        F: FnOnce(&mut UserQueryResult),
    {
        self.repo_guard()?;
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .rows
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        apply(row);
        row.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.query_guard()?;
        Ok(self.find(|u| u.id == user_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.query_guard()?;
        Ok(self.find(|u| u.email == email))
    }

    async fn find_by_referral_code(
        &self,
        referral_code: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.query_guard()?;
        Ok(self.find(|u| u.referral_code.as_deref() == Some(referral_code)))
    }

    async fn referral_code_exists(&self, referral_code: &str) -> Result<bool, UserQueryError> {
        self.query_guard()?;
        Ok(self
            .find(|u| u.referral_code.as_deref() == Some(referral_code))
            .is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, data: CreateUserData) -> Result<UserResult, UserRepositoryError> {
        self.repo_guard()?;
        if self.find(|u| u.email == data.email).is_some() {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.referral_collisions > 0 {
                inner.referral_collisions -= 1;
                return Err(UserRepositoryError::ReferralCodeTaken);
            }
        }
        if self
            .find(|u| u.referral_code.as_deref() == Some(data.referral_code.as_str()))
            .is_some()
        {
            return Err(UserRepositoryError::ReferralCodeTaken);
        }

        let mut seed = UserSeed::new(&data.name, &data.email).referral_code(&data.referral_code);
        seed.password_hash = data.password_hash;
        let id = self.seed(seed);

        if let Some(referrer) = data.referred_by {
            self.inner.lock().unwrap().referrals.insert(id, referrer);
        }

        Ok(UserResult {
            id,
            name: data.name,
            email: data.email,
            is_verified: false,
            referral_code: Some(data.referral_code),
        })
    }

    async fn mark_verified(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| u.is_verified = true)
    }

    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| u.password_hash = password_hash)
    }
}

#[derive(Default)]
struct CodesInner {
    rows: Vec<VerificationCode>,
    next_id: i32,
}

#[derive(Clone, Default)]
pub struct InMemoryVerificationCodes {
    inner: Arc<Mutex<CodesInner>>,
    failure: Option<String>,
}

impl InMemoryVerificationCodes {
    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::default()
        }
    }

    /// Unused codes held for the user and purpose.
    pub fn live_count(&self, user_id: UserId, purpose: CodePurpose) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .rows
            .iter()
            .filter(|c| c.user_id == user_id && c.purpose == purpose && !c.is_used)
            .count()
    }

    fn guard(&self) -> Result<(), VerificationCodeRepositoryError> {
        match &self.failure {
            Some(msg) => Err(VerificationCodeRepositoryError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryVerificationCodes {
    async fn delete_unused(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
    ) -> Result<u64, VerificationCodeRepositoryError> {
        self.guard()?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner
            .rows
            .retain(|c| !(c.user_id == user_id && c.purpose == purpose && !c.is_used));
        Ok((before - inner.rows.len()) as u64)
    }

    async fn insert(
        &self,
        code: NewVerificationCode,
    ) -> Result<VerificationCode, VerificationCodeRepositoryError> {
        self.guard()?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let record = VerificationCode {
            id: inner.next_id,
            user_id: code.user_id,
            code: code.code,
            purpose: code.purpose,
            expires_at: code.expires_at,
            is_used: false,
        };
        inner.rows.push(record.clone());
        Ok(record)
    }

    async fn find_unused(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<Option<VerificationCode>, VerificationCodeRepositoryError> {
        self.guard()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .rev()
            .find(|c| c.user_id == user_id && c.purpose == purpose && c.code == code && !c.is_used)
            .cloned())
    }

    async fn mark_used(&self, code_id: i32) -> Result<(), VerificationCodeRepositoryError> {
        self.guard()?;
        let mut inner = self.inner.lock().unwrap();
        if let Some(row) = inner.rows.iter_mut().find(|c| c.id == code_id) {
            row.is_used = true;
        }
        Ok(())
    }
}

/// Prefixes instead of hashing so tests can read stored passwords.
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{}", password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{}", password))
    }
}

#[derive(Clone, Default)]
pub struct CapturingNotifier {
    sent: Arc<Mutex<Vec<(String, CodePurpose, String)>>>,
    fail: bool,
}

impl CapturingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last_code(&self, email: &str, purpose: CodePurpose) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        sent.iter()
            .rev()
            .find(|(to, p, _)| to == email && *p == purpose)
            .map(|(_, _, code)| code.clone())
    }

    fn record(
        &self,
        to: &Recipient,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::EmailSendingFailed(
                "smtp unavailable".to_string(),
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.email.clone(), purpose, code.to_string()));
        Ok(())
    }
}

#[async_trait]
impl AccountNotifier for CapturingNotifier {
    async fn send_verification_code(
        &self,
        to: &Recipient,
        code: &str,
    ) -> Result<(), NotificationError> {
        self.record(to, CodePurpose::EmailVerification, code)
    }

    async fn send_password_reset_code(
        &self,
        to: &Recipient,
        code: &str,
    ) -> Result<(), NotificationError> {
        self.record(to, CodePurpose::ForgotPassword, code)
    }
}
