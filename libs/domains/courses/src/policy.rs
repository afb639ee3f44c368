//! Ownership scoping policy.
//!
//! Courses and lessons are visible to their owner only, unless the actor
//! is staff. The policy is evaluated to an [`OwnerScope`] once per request
//! and applied by every repository at query construction time, never as a
//! post-filter on fetched rows.

use domain_users::Actor;
use uuid::Uuid;

/// Ownership restriction for a query. `None` means unrestricted access.
pub type OwnerScope = Option<Uuid>;

/// Derive the ownership scope for an actor. Staff actors see everything.
pub fn owner_scope(actor: Actor) -> OwnerScope {
    if actor.is_staff {
        None
    } else {
        Some(actor.user_id)
    }
}

/// Whether a row owned by `owner_id` falls inside `scope`
pub fn in_scope(scope: OwnerScope, owner_id: Uuid) -> bool {
    match scope {
        None => true,
        Some(user_id) => owner_id == user_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_actor_is_scoped_to_own_rows() {
        let actor = Actor::user(Uuid::now_v7());
        let scope = owner_scope(actor);

        assert_eq!(scope, Some(actor.user_id));
        assert!(in_scope(scope, actor.user_id));
        assert!(!in_scope(scope, Uuid::now_v7()));
    }

    #[test]
    fn test_staff_actor_is_unrestricted() {
        let actor = Actor::staff(Uuid::now_v7());
        let scope = owner_scope(actor);

        assert_eq!(scope, None);
        assert!(in_scope(scope, Uuid::now_v7()));
    }
}
