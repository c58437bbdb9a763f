//! Friends, DMs, invites, and account flows

use std::sync::Arc;

use beacon_core::FriendStatus;
use beacon_service::{
    AuthService, DmService, FriendService, InviteService, LoginRequest, RegisterRequest,
};
use integration_tests::fixtures::{parse_id, TEST_PASSWORD};
use integration_tests::TestApp;

fn tag_of(auth: &beacon_service::AuthResponse) -> String {
    format!("{}#{}", auth.user.username, auth.user.discriminator)
}

#[tokio::test]
async fn friend_request_projections_are_role_relative() {
    let app = TestApp::new();
    let (a, _) = app.register("alice").await;
    let (b, b_auth) = app.register("bob").await;

    let friends = FriendService::new(&app.ctx);
    friends.request(a, &tag_of(&b_auth)).await.unwrap();

    let a_list = friends.list(a).await.unwrap();
    assert_eq!(a_list.len(), 1);
    assert_eq!(a_list[0].status, FriendStatus::PendingOutgoing);
    assert_eq!(a_list[0].user.username, "bob");

    let b_list = friends.list(b).await.unwrap();
    assert_eq!(b_list.len(), 1);
    assert_eq!(b_list[0].status, FriendStatus::PendingIncoming);
    assert_eq!(b_list[0].user.username, "alice");
}

#[tokio::test]
async fn accept_makes_both_sides_friends_and_blocks_re_request() {
    let app = TestApp::new();
    let (a, a_auth) = app.register("alice").await;
    let (b, b_auth) = app.register("bob").await;

    let friends = FriendService::new(&app.ctx);
    friends.request(a, &tag_of(&b_auth)).await.unwrap();
    friends.accept(b, a).await.unwrap();

    for user in [a, b] {
        let list = friends.list(user).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].status, FriendStatus::Accepted);
    }

    // A second request in either direction is a conflict
    let again = friends.request(a, &tag_of(&b_auth)).await;
    match again {
        Err(e) => assert_eq!(e.status_code(), 409),
        Ok(()) => panic!("re-request after acceptance must conflict"),
    }
    assert!(friends.request(b, &tag_of(&a_auth)).await.is_err());
}

#[tokio::test]
async fn only_the_target_may_accept() {
    let app = TestApp::new();
    let (a, _) = app.register("alice").await;
    let (b, b_auth) = app.register("bob").await;

    let friends = FriendService::new(&app.ctx);
    friends.request(a, &tag_of(&b_auth)).await.unwrap();

    // The requester cannot accept their own request
    let result = friends.accept(a, b).await;
    match result {
        Err(e) => assert_eq!(e.status_code(), 404),
        Ok(()) => panic!("requester must not be able to accept"),
    }

    // Accepting a request that was never sent is the same error
    let (c, _) = app.register("carol").await;
    assert!(friends.accept(c, a).await.is_err());
}

#[tokio::test]
async fn decline_is_repeatable_and_reopens_the_pair() {
    let app = TestApp::new();
    let (a, _) = app.register("alice").await;
    let (b, b_auth) = app.register("bob").await;

    let friends = FriendService::new(&app.ctx);
    friends.request(a, &tag_of(&b_auth)).await.unwrap();

    friends.remove(b, a).await.unwrap();
    // Removing again is a no-op, not an error
    friends.remove(b, a).await.unwrap();
    assert!(friends.list(a).await.unwrap().is_empty());

    // The pair is back to `none`, so a fresh request works
    friends.request(a, &tag_of(&b_auth)).await.unwrap();
}

#[tokio::test]
async fn bad_friend_targets_are_rejected() {
    let app = TestApp::new();
    let (a, a_auth) = app.register("alice").await;

    let friends = FriendService::new(&app.ctx);

    assert!(friends.request(a, "no-discriminator").await.is_err());
    assert!(friends.request(a, "ghost#9999").await.is_err());
    // Befriending yourself is refused
    assert!(friends.request(a, &tag_of(&a_auth)).await.is_err());
}

#[tokio::test]
async fn open_dm_is_idempotent_across_directions() {
    let app = TestApp::new();
    let (a, _) = app.register("alice").await;
    let (b, _) = app.register("bob").await;

    let dms = DmService::new(&app.ctx);
    let first = dms.open_dm(a, b).await.unwrap();
    let second = dms.open_dm(b, a).await.unwrap();
    assert_eq!(first.id, second.id);

    assert_eq!(dms.list_dms(a).await.unwrap().len(), 1);
    assert_eq!(dms.list_dms(b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_open_dm_converges_on_one_channel() {
    let app = Arc::new(TestApp::new());
    let (a, _) = app.register("alice").await;
    let (b, _) = app.register("bob").await;

    let mut handles = Vec::new();
    for n in 0..12 {
        let app = Arc::clone(&app);
        let (x, y) = if n % 2 == 0 { (a, b) } else { (b, a) };
        handles.push(tokio::spawn(async move {
            DmService::new(&app.ctx).open_dm(x, y).await.unwrap().id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 1, "every caller observes the same DM channel");
}

#[tokio::test]
async fn dm_channels_admit_only_their_participants() {
    let app = TestApp::new();
    let (a, _) = app.register("alice").await;
    let (b, _) = app.register("bob").await;
    let (outsider, _) = app.register("carol").await;

    let dm = DmService::new(&app.ctx).open_dm(a, b).await.unwrap();
    let channel = parse_id(&dm.id);

    app.send(channel, a, "psst").await.unwrap();
    app.send(channel, b, "heard").await.unwrap();

    let denied = app.send(channel, outsider, "let me in").await;
    match denied {
        Err(e) => assert!(e.is_permission_denied()),
        Ok(_) => panic!("non-participant must be denied"),
    }
}

#[tokio::test]
async fn invite_lookup_shows_summary_and_unknown_codes_404() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (server, _) = app.create_server(owner, "lounge").await;

    let invites = InviteService::new(&app.ctx);
    let invite = invites
        .create_invite(owner, server, Default::default())
        .await
        .unwrap();
    assert_eq!(invite.server_id, server.to_string());

    let summary = invites.lookup(&invite.code).await.unwrap();
    assert_eq!(summary.server_name, "lounge");
    assert_eq!(summary.member_count, 1);

    let missing = invites.lookup("deadbeef").await;
    match missing {
        Err(e) => assert_eq!(e.status_code(), 404),
        Ok(_) => panic!("unknown code must be not-found"),
    }
}

#[tokio::test]
async fn invite_creation_requires_membership() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (stranger, _) = app.register("sage").await;
    let (server, _) = app.create_server(owner, "lounge").await;

    let result = InviteService::new(&app.ctx)
        .create_invite(stranger, server, Default::default())
        .await;
    match result {
        Err(e) => assert!(e.is_permission_denied()),
        Ok(_) => panic!("non-member must not mint invites"),
    }
}

#[tokio::test]
async fn duplicate_email_conflicts_and_tags_increment() {
    let app = TestApp::new();
    let (_, first) = app.register("river").await;
    assert_eq!(first.user.discriminator, "0001");

    // Same username, different email: next tag
    let second = AuthService::new(&app.ctx)
        .register(RegisterRequest {
            email: "other@example.com".to_string(),
            username: "river".to_string(),
            display_name: "River".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(second.user.discriminator, "0002");

    // Same email: conflict
    let dupe = AuthService::new(&app.ctx)
        .register(RegisterRequest {
            email: "river@example.com".to_string(),
            username: "somebody".to_string(),
            display_name: "Somebody".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await;
    match dupe {
        Err(e) => assert_eq!(e.status_code(), 409),
        Ok(_) => panic!("duplicate email must conflict"),
    }
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = TestApp::new();
    let (id, _) = app.register("river").await;

    let auth = AuthService::new(&app.ctx);

    let ok = auth
        .login(LoginRequest {
            email: "river@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(parse_id(&ok.user.id), id);
    // The token is honored by the provider
    assert_eq!(auth.authenticate(&ok.token).unwrap(), id);

    let wrong = auth
        .login(LoginRequest {
            email: "river@example.com".to_string(),
            password: "not the password".to_string(),
        })
        .await;
    match wrong {
        Err(e) => assert_eq!(e.status_code(), 401),
        Ok(_) => panic!("wrong password must be rejected"),
    }

    let unknown = auth
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await;
    match unknown {
        Err(e) => assert_eq!(e.status_code(), 401),
        Ok(_) => panic!("unknown account must look like bad credentials"),
    }
}
