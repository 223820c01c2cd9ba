//! User domain: identity owning zero or more model records

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::{NewUser, UserRepository};
pub use validation::{
    validate_email, validate_name, validate_password, UserValidationError, MIN_PASSWORD_LENGTH,
};
