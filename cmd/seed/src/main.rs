//! Provisions an initial user, or re-keys an existing one.
//! Run with: cargo run --bin seed

use auth_adapters::Argon2PasswordHasher;
use domains::{PasswordHasher, User, UserStore};
use storage_adapters::mongo::{connect, MongoUserStore};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let uri = std::env::var("DATABASE__URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let name = std::env::var("DATABASE__NAME").unwrap_or_else(|_| "inkcap".to_string());
    let username = std::env::var("SEED_USERNAME").unwrap_or_else(|_| "editor".to_string());
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "change-me-please".to_string());

    println!("Connecting to database '{name}'...");
    let db = connect(&uri, &name).await?;
    let users = MongoUserStore::new_with(&db).await?;
    println!("Connected.");

    println!("Hashing password...");
    let password_hash = Argon2PasswordHasher.hash(&password)?;

    match users.find_by_username(&username).await? {
        Some(existing) => {
            users.set_password_hash(existing.id, &password_hash).await?;
            println!("Updated password for existing user '{username}'.");
        }
        None => {
            let user = User {
                id: Uuid::now_v7(),
                username: username.clone(),
                password_hash,
                bookmarks: Default::default(),
            };
            users.insert(user).await?;
            println!("Created user '{username}'.");
        }
    }

    println!("\n========================================");
    println!("Account ready!");
    println!("========================================");
    println!("Username: {username}");
    println!("Password: {password}");
    println!("========================================");

    Ok(())
}
