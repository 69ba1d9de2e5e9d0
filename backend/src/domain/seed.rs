//! Starter accounts written when no directory snapshot exists yet.

use super::{
    Directory, Email, Error, PasswordHasher, Role, User, UserId, UserRecord, Username,
};

struct SeedAccount {
    id: &'static str,
    username: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
}

const SEED_ACCOUNTS: [SeedAccount; 3] = [
    SeedAccount {
        id: "0b7f3c1e-5a2d-4c8e-9f10-000000000001",
        username: "Admin",
        email: "admin@coursehub.com",
        password: "adminpassword",
        role: Role::Admin,
    },
    SeedAccount {
        id: "0b7f3c1e-5a2d-4c8e-9f10-000000000002",
        username: "Phó Admin",
        email: "subadmin@coursehub.com",
        password: "subadminpassword",
        role: Role::SubAdmin,
    },
    SeedAccount {
        id: "0b7f3c1e-5a2d-4c8e-9f10-000000000003",
        username: "ChungHo",
        email: "chung@coursehub.com",
        password: "password123",
        role: Role::Member,
    },
];

/// Build the starter directory: one admin, one sub-admin, one member and no
/// courses.
///
/// This hashes three passwords, so callers on an async runtime should run it
/// on a blocking thread.
pub fn seed_directory(hasher: &PasswordHasher) -> Result<Directory, Error> {
    let records = SEED_ACCOUNTS
        .iter()
        .map(|account| seed_record(account, hasher))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Directory::from_parts(records, []))
}

fn seed_record(account: &SeedAccount, hasher: &PasswordHasher) -> Result<UserRecord, Error> {
    let invalid = |err: &dyn std::fmt::Display| {
        Error::internal(format!("invalid seed account {}: {err}", account.email))
    };
    let id = UserId::new(account.id).map_err(|err| invalid(&err))?;
    let username = Username::new(account.username).map_err(|err| invalid(&err))?;
    let email = Email::new(account.email).map_err(|err| invalid(&err))?;
    let password = hasher.hash(account.password).map_err(|err| invalid(&err))?;
    Ok(UserRecord::new(
        User::new(id, username, email, account.role),
        password,
    ))
}
