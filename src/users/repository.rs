use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::model::{NewUser, User, UserDefaults, UserLookup};
use crate::acquire::{self, LookupKey};
use crate::errors::{Error, Result, ValidationError};
use crate::schema::users;

impl LookupKey for UserLookup {
    type Record = User;
    type Defaults = UserDefaults;

    fn find(&self, conn: &mut SqliteConnection) -> QueryResult<Option<User>> {
        let mut query = users::table.into_boxed();
        if let Some(ref name) = self.username {
            query = query.filter(users::username.eq(name.clone()));
        }
        if let Some(ref address) = self.email {
            query = query.filter(users::email.eq(address.clone()));
        }
        query.first::<User>(conn).optional()
    }

    fn insert(&self, defaults: &UserDefaults, conn: &mut SqliteConnection) -> Result<User> {
        let new_user = self.merged_row(defaults)?;
        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        UserRepository
    }

    pub fn find_by_id(&self, conn: &mut SqliteConnection, user_id: i32) -> Result<User> {
        users::table
            .find(user_id)
            .first::<User>(conn)
            .map_err(Error::from)
    }

    pub fn find_by_email(
        &self,
        conn: &mut SqliteConnection,
        address: &str,
    ) -> Result<Option<User>> {
        users::table
            .filter(users::email.eq(address))
            .first::<User>(conn)
            .optional()
            .map_err(Error::from)
    }

    /// Direct insert path; a duplicate email surfaces as a unique violation.
    pub fn insert_new_user(&self, conn: &mut SqliteConnection, new_user: NewUser) -> Result<User> {
        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn get_or_create(
        &self,
        conn: &mut SqliteConnection,
        lookup: &UserLookup,
        defaults: &UserDefaults,
    ) -> Result<(User, bool)> {
        if lookup.username.is_none() && lookup.email.is_none() {
            return Err(ValidationError::InvalidInput(
                "user lookup requires at least one predicate".to_string(),
            )
            .into());
        }
        acquire::get_or_create(conn, lookup, defaults)
    }

    /// Replaces the stored password hash. The only mutation path for users.
    pub fn update_password_hash(
        &self,
        conn: &mut SqliteConnection,
        user_id: i32,
        new_hash: String,
    ) -> Result<User> {
        diesel::update(users::table.find(user_id))
            .set(users::password_hash.eq(Some(new_hash)))
            .execute(conn)
            .map_err(Error::from)?;

        self.find_by_id(conn, user_id)
    }
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}
