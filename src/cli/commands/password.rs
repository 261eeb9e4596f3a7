use anyhow::Context;

use crate::auth::credentials::hash_password;

pub fn handle(password: &str) -> anyhow::Result<()> {
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let hash = hash_password(password).context("failed to hash password")?;
    println!("{}", hash);
    Ok(())
}
