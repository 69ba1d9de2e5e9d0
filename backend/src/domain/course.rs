//! Course listings shared by members.
//!
//! A course carries a snapshot of its owner's username and role taken at
//! upload time. The snapshot is never refreshed, so a later promotion of the
//! owner does not change `owner_role`.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Role, UserId, Username};

/// Icon shown for every uploaded course.
pub const DEFAULT_COURSE_ICON: &str = "fas fa-book";

/// Validation errors raised while building a [`NewCourse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// Title was blank once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Link was blank once trimmed.
    #[error("link must not be empty")]
    EmptyLink,
    /// Link was not an absolute http(s) URL.
    #[error("link must be an absolute http or https URL")]
    InvalidLink,
    /// Category was blank once trimmed.
    #[error("category must not be empty")]
    EmptyCategory,
    /// Course id was not a positive integer.
    #[error("course id must be a positive integer")]
    InvalidId,
}

impl CourseValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyLink | Self::InvalidLink => "link",
            Self::EmptyCategory => "category",
            Self::InvalidId => "id",
        }
    }

    /// Machine-readable reason reported alongside [`Self::field`].
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::EmptyLink => "empty_link",
            Self::InvalidLink => "invalid_link",
            Self::EmptyCategory => "empty_category",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Course identifier, ordered by creation time.
///
/// Derived from the creation timestamp in milliseconds and bumped past the
/// previous identifier when two uploads land in the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(u64);

impl CourseId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Next identifier given the clock and the newest existing identifier.
    ///
    /// # Examples
    /// ```
    /// use coursehub::domain::CourseId;
    ///
    /// let last = CourseId::new(1_700_000_000_000);
    /// assert_eq!(CourseId::next(1_700_000_000_000, Some(last)).get(), 1_700_000_000_001);
    /// assert_eq!(CourseId::next(1_700_000_000_500, Some(last)).get(), 1_700_000_000_500);
    /// ```
    pub fn next(now_millis: u64, newest: Option<Self>) -> Self {
        match newest {
            Some(last) if now_millis <= last.0 => Self(last.0.saturating_add(1)),
            _ => Self(now_millis),
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for CourseId {
    type Err = CourseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(raw) if raw > 0 => Ok(Self(raw)),
            _ => Err(CourseValidationError::InvalidId),
        }
    }
}

/// Validated upload payload, before the directory assigns owner and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    title: String,
    link: Url,
    category: String,
}

impl NewCourse {
    /// Validate raw form fields. Fields are checked in the order title,
    /// link, category.
    pub fn try_from_parts(
        title: &str,
        link: &str,
        category: &str,
    ) -> Result<Self, CourseValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }

        let link = link.trim();
        if link.is_empty() {
            return Err(CourseValidationError::EmptyLink);
        }
        let link = Url::parse(link).map_err(|_| CourseValidationError::InvalidLink)?;
        if !matches!(link.scheme(), "http" | "https") {
            return Err(CourseValidationError::InvalidLink);
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(CourseValidationError::EmptyCategory);
        }

        Ok(Self {
            title: title.to_owned(),
            link,
            category: category.to_owned(),
        })
    }

    /// Course title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// External link to the course.
    pub fn link(&self) -> &Url {
        &self.link
    }

    /// Free-form category label.
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Owner details copied onto a course at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSnapshot {
    /// Owning user.
    pub id: UserId,
    /// Owner's username when the course was created.
    pub username: Username,
    /// Owner's role when the course was created.
    pub role: Role,
}

/// Shared course listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    owner_id: UserId,
    owner_username: Username,
    owner_role: Role,
    title: String,
    author: String,
    views: u64,
    category: String,
    icon: String,
    link: String,
}

impl Course {
    /// Assemble a course from an upload and the owner snapshot.
    pub fn create(id: CourseId, owner: OwnerSnapshot, upload: NewCourse) -> Self {
        let OwnerSnapshot { id: owner_id, username, role } = owner;
        let NewCourse {
            title,
            link,
            category,
        } = upload;
        Self {
            id,
            owner_id,
            author: username.as_ref().to_owned(),
            owner_username: username,
            owner_role: role,
            title,
            views: 0,
            category,
            icon: DEFAULT_COURSE_ICON.to_owned(),
            link: link.into(),
        }
    }

    /// Identifier, also the creation-order sort key.
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Owning user.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Owner username at upload time.
    pub fn owner_username(&self) -> &Username {
        &self.owner_username
    }

    /// Owner role at upload time.
    pub fn owner_role(&self) -> Role {
        self.owner_role
    }

    /// Course title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author label shown on cards.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// View counter. Nothing increments it yet.
    pub fn views(&self) -> u64 {
        self.views
    }

    /// Category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Icon class.
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// External link.
    pub fn link(&self) -> &str {
        &self.link
    }
}
