use super::*;

use crate::{
    data::assigned_role::AssignedRoleRepository, model::reconcile::RoleChange,
    service::role_assignment::RoleAssignmentService,
};

const USER_ID: u64 = 42;

fn member() -> MemberHandle {
    MemberHandle {
        guild_id: GUILD_ID,
        user_id: USER_ID,
    }
}

/// Tests that applying the role a user already holds makes no gateway calls.
///
/// Expected: RoleChange::Unchanged and no calls
#[tokio::test]
async fn same_role_is_a_no_op() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_user_role(db, USER_ID, GUILD_ID, SILVER).await?;
    let gateway = FakeGateway::default().with_member(GUILD_ID, USER_ID);

    let change = RoleAssignmentService::new(db, &gateway)
        .apply(&member(), Some(SILVER))
        .await?;

    assert_eq!(change, RoleChange::Unchanged);
    assert!(gateway.calls().is_empty());

    Ok(())
}

/// Tests that moving tiers revokes the old role before granting the new one.
///
/// Expected: remove then add, new role persisted
#[tokio::test]
async fn revokes_old_role_then_grants_new() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_user_role(db, USER_ID, GUILD_ID, BRONZE).await?;
    let gateway = FakeGateway::default().with_member(GUILD_ID, USER_ID);

    let change = RoleAssignmentService::new(db, &gateway)
        .apply(&member(), Some(GOLD))
        .await?;

    assert_eq!(
        change,
        RoleChange::Changed {
            from: Some(BRONZE),
            to: Some(GOLD)
        }
    );
    assert_eq!(
        gateway.calls(),
        vec![
            GatewayCall::Remove {
                user_id: USER_ID,
                role_id: BRONZE
            },
            GatewayCall::Add {
                user_id: USER_ID,
                role_id: GOLD
            },
        ]
    );

    let stored = AssignedRoleRepository::new(db)
        .get_current(USER_ID, GUILD_ID)
        .await?;
    assert_eq!(stored.map(|role| role.role_id), Some(GOLD));

    Ok(())
}

/// Tests that losing every tier revokes the role and clears the assignment.
///
/// Expected: one remove call and no stored assignment
#[tokio::test]
async fn no_tier_clears_assignment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_user_role(db, USER_ID, GUILD_ID, BRONZE).await?;
    let gateway = FakeGateway::default().with_member(GUILD_ID, USER_ID);

    RoleAssignmentService::new(db, &gateway)
        .apply(&member(), None)
        .await?;

    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::Remove {
            user_id: USER_ID,
            role_id: BRONZE
        }]
    );
    let stored = AssignedRoleRepository::new(db)
        .get_current(USER_ID, GUILD_ID)
        .await?;
    assert!(stored.is_none());

    Ok(())
}

/// Tests that a rejected grant is not recorded as held.
///
/// Expected: no stored assignment so the next pass retries the grant
#[tokio::test]
async fn failed_grant_is_not_persisted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::default()
        .with_member(GUILD_ID, USER_ID)
        .with_failing_role(GOLD);

    let change = RoleAssignmentService::new(db, &gateway)
        .apply(&member(), Some(GOLD))
        .await?;

    assert_eq!(
        change,
        RoleChange::Changed {
            from: None,
            to: None
        }
    );
    let stored = AssignedRoleRepository::new(db)
        .get_current(USER_ID, GUILD_ID)
        .await?;
    assert!(stored.is_none());

    Ok(())
}
