//! `create-admin` command — seed an administrator account.

use dialoguer::Password;

use stepflow_auth::password::{PasswordHasher, PasswordValidator};
use stepflow_core::config::AppConfig;
use stepflow_core::error::AppError;
use stepflow_core::result::AppResult;
use stepflow_database::postgres::PostgresCredentialStore;
use stepflow_database::store::CredentialStore;
use stepflow_entity::user::{NewUser, Role};

/// Create an admin user, prompting for the password interactively so it
/// never lands in shell history.
pub async fn create_admin(config: &AppConfig, username: &str) -> AppResult<()> {
    if config.database.provider != "postgres" {
        return Err(AppError::configuration(
            "Admin seeding requires the postgres provider",
        ));
    }

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Password prompt failed: {e}")))?;

    PasswordValidator::new(&config.auth).validate(&password)?;

    let pool = stepflow_database::connection::create_pool(&config.database).await?;
    let store = PostgresCredentialStore::new(pool);

    let password_hash = PasswordHasher::new().hash(&password)?;
    let user = store
        .insert_user(&NewUser {
            username: username.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    println!("Admin '{}' created ({})", user.username, user.id);
    Ok(())
}
