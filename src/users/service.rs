use log::info;
use std::sync::Arc;

use super::model::{NewUser, User, UserDefaults, UserLookup};
use super::repository::UserRepository;
use crate::db::{self, DbPool};
use crate::errors::Result;
use crate::secrets;

pub struct UserService {
    user_repo: UserRepository,
    pool: Arc<DbPool>,
}

impl UserService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserService {
            user_repo: UserRepository::new(),
            pool,
        }
    }

    /// Registers a new user. The password is hashed before it ever reaches
    /// the store; a duplicate email propagates as a unique violation.
    pub fn register(&self, username: &str, email: &str, password: Option<&str>) -> Result<User> {
        let password_hash = match password {
            Some(plain) => Some(secrets::hash_secret(plain)?),
            None => None,
        };

        let mut conn = db::get_connection(&self.pool)?;
        let user = self.user_repo.insert_new_user(
            &mut conn,
            NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                is_anonymous: false,
            },
        )?;

        info!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Checks credentials. Returns `None` for an unknown email, a missing
    /// hash, or a wrong password; the caller cannot tell the cases apart.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let mut conn = db::get_connection(&self.pool)?;
        let user = match self.user_repo.find_by_email(&mut conn, email)? {
            Some(user) => user,
            None => return Ok(None),
        };

        if user.verify_password(password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub fn get_user(&self, user_id: i32) -> Result<User> {
        let mut conn = db::get_connection(&self.pool)?;
        self.user_repo.find_by_id(&mut conn, user_id)
    }

    pub fn get_or_create(&self, lookup: &UserLookup, defaults: &UserDefaults) -> Result<(User, bool)> {
        let mut conn = db::get_connection(&self.pool)?;
        self.user_repo.get_or_create(&mut conn, lookup, defaults)
    }

    pub fn change_password(&self, user_id: i32, new_password: &str) -> Result<User> {
        let new_hash = secrets::hash_secret(new_password)?;
        let mut conn = db::get_connection(&self.pool)?;
        self.user_repo
            .update_password_hash(&mut conn, user_id, new_hash)
    }
}
