//! Authorisation rules for course deletion and user promotion.
//!
//! Both checks are pure: callers resolve the actor and the target from the
//! directory first, and a missing course is reported as not found before the
//! policy is consulted.

use super::{Course, Role, UserId};

/// Acting user as resolved from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor<'a> {
    /// Acting user's identifier.
    pub id: &'a UserId,
    /// Acting user's current role.
    pub role: Role,
}

/// Decide whether `actor` may delete `course`.
///
/// Rules, first match wins:
/// 1. admins may delete anything;
/// 2. sub-admins may delete courses whose owner was not an admin at upload;
/// 3. owners may always delete their own course;
/// 4. everything else is denied.
///
/// # Examples
/// ```
/// use coursehub::domain::access_policy::{can_delete_course, Actor};
/// use coursehub::domain::{Course, CourseId, NewCourse, OwnerSnapshot, Role, UserId, Username};
///
/// let owner = UserId::random();
/// let course = Course::create(
///     CourseId::new(1),
///     OwnerSnapshot {
///         id: owner.clone(),
///         username: Username::new("Admin").unwrap(),
///         role: Role::Admin,
///     },
///     NewCourse::try_from_parts("Rust", "https://x.dev", "Programming").unwrap(),
/// );
/// let moderator = UserId::random();
/// assert!(!can_delete_course(Actor { id: &moderator, role: Role::SubAdmin }, &course));
/// assert!(can_delete_course(Actor { id: &owner, role: Role::Admin }, &course));
/// ```
pub fn can_delete_course(actor: Actor<'_>, course: &Course) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::SubAdmin if course.owner_role() != Role::Admin => true,
        _ => course.owner_id() == actor.id,
    }
}

/// Decide whether an actor with `actor_role` may promote a user currently
/// holding `target_role`. Only admins promote, and only members are eligible.
pub fn can_promote(actor_role: Role, target_role: Role) -> bool {
    actor_role == Role::Admin && target_role == Role::Member
}
