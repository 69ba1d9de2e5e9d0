//! Serialised shape of the directory file.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain. The document keeps users in an object keyed by email and
//! courses in an array, with the credential stored as an argon2 hash.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Course, Directory, Email, PasswordHash, Role, User, UserId, UserRecord, Username,
};

/// Whole-file document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DirectoryDocument {
    #[serde(default)]
    pub users: BTreeMap<String, UserRow>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// One stored user, credential included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRow {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub role: Role,
    pub password_hash: String,
}

impl From<&Directory> for DirectoryDocument {
    fn from(directory: &Directory) -> Self {
        let users = directory
            .user_records()
            .map(|record| {
                let user = record.user();
                let row = UserRow {
                    id: user.id().clone(),
                    username: user.username().clone(),
                    email: user.email().clone(),
                    role: user.role(),
                    password_hash: record.password().as_encoded().to_owned(),
                };
                (user.email().as_ref().to_owned(), row)
            })
            .collect();
        Self {
            users,
            courses: directory.courses().to_vec(),
        }
    }
}

impl TryFrom<DirectoryDocument> for Directory {
    type Error = String;

    fn try_from(document: DirectoryDocument) -> Result<Self, Self::Error> {
        let users = document
            .users
            .into_iter()
            .map(|(key, row)| {
                if key != row.email.as_ref() {
                    return Err(format!(
                        "user key {key} does not match email {}",
                        row.email
                    ));
                }
                let password = PasswordHash::from_encoded(row.password_hash)
                    .map_err(|err| format!("user {key}: {err}"))?;
                let user = User::new(row.id, row.username, row.email, row.role);
                Ok(UserRecord::new(user, password))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Directory::from_parts(users, document.courses))
    }
}
