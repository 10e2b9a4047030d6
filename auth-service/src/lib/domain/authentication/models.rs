use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;

/// Command to open a new account with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub firstname: Option<PersonName>,
    pub lastname: Option<PersonName>,
}

impl RegisterCommand {
    pub fn new(
        email: EmailAddress,
        password: Password,
        firstname: Option<PersonName>,
        lastname: Option<PersonName>,
    ) -> Self {
        Self {
            email,
            password,
            firstname,
            lastname,
        }
    }
}

/// Command to exchange credentials for a token.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Outcome of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}
