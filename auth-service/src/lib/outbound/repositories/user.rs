use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str =
    "id, email, password_hash, firstname, lastname, created_at, updated_at, deleted_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    firstname: Option<String>,
    lastname: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            firstname: PersonName::optional(row.firstname)?,
            lastname: PersonName::optional(row.lastname)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

fn map_write_error(err: sqlx::Error, email: &EmailAddress) -> UserError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return UserError::EmailAlreadyExists(email.to_string());
        }
    }
    UserError::DatabaseError(err.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, firstname, lastname, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.firstname.as_ref().map(PersonName::as_str))
        .bind(user.lastname.as_ref().map(PersonName::as_str))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.email))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn update_by_id(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, firstname = $4, lastname = $5, updated_at = $6
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.firstname.as_ref().map(PersonName::as_str))
        .bind(user.lastname.as_ref().map(PersonName::as_str))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
