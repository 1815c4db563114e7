//! Generate a bcrypt hash for the gallery admin password.
//!
//! The output goes into `ADMIN_PASSWORD_HASH`. Together with `JWT_SECRET` it
//! switches the API to local admin sign-in instead of the hosted auth service.
//!
//! Usage:
//!     cargo run --bin generate_admin_hash

use std::io::{self, Write};

const HASH_COST: u32 = 12;

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> io::Result<()> {
    println!("Gallery admin password hash");

    let password = prompt("Password")?;
    if password.is_empty() {
        eprintln!("Error: password cannot be empty");
        return Ok(());
    }

    if prompt("Confirm password")? != password {
        eprintln!("Error: passwords do not match");
        return Ok(());
    }

    match bcrypt::hash(&password, HASH_COST) {
        Ok(hash) => {
            println!("\nAdd this line to your .env or deployment config:\n");
            println!("ADMIN_PASSWORD_HASH=\"{}\"", hash);
        }
        Err(e) => eprintln!("Error: failed to hash password: {}", e),
    }

    Ok(())
}
