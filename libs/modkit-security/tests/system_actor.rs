#![allow(clippy::unwrap_used, clippy::expect_used)]

use modkit_security::constants::{DEFAULT_TENANT_ID, SUBJECT_TYPE_SYSTEM, SYSTEM_SUBJECT_ID};
use modkit_security::{ActorSession, SecurityContext};
use uuid::Uuid;

#[test]
fn system_context_uses_well_known_ids() {
    let ctx = SecurityContext::system();

    assert_eq!(ctx.subject_id(), SYSTEM_SUBJECT_ID);
    assert_eq!(ctx.subject_type(), Some(SUBJECT_TYPE_SYSTEM));
    assert_eq!(ctx.subject_tenant_id(), DEFAULT_TENANT_ID);
}

#[test]
fn elevation_then_commit_switch_leaves_the_user_current() {
    let mut session = ActorSession::anonymous();
    let new_user = Uuid::new_v4();

    {
        let elevated = session.elevate_to_system();
        assert!(elevated.context().is_system());
    }
    assert!(session.current().is_anonymous());

    session.switch_to(SecurityContext::for_user(new_user)).commit();

    let final_actor = session.into_current();
    assert_eq!(final_actor.subject_id(), new_user);
    assert!(!final_actor.is_system());
}

#[test]
fn elevation_is_restored_after_panic() {
    let mut session = ActorSession::anonymous();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = session.elevate_to_system();
        panic!("store exploded");
    }));

    assert!(result.is_err());
    assert!(!session.current().is_system());
}
