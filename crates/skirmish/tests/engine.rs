//! End-to-end smoke test through the public prelude: fleet, game,
//! sessions, combat, respawn.

use std::time::Duration;

use skirmish::prelude::*;

const DUEL_BOARD: &str = "\
####
#  #
####
";

#[tokio::test]
async fn test_full_match_lifecycle() {
    let fleet = Fleet::new(FleetConfig {
        max_games: Some(4),
    });
    fleet
        .create_game(
            "duel",
            GameOptions::new().board(Board::parse(DUEL_BOARD).unwrap()),
            GameConfig::with_respawn_delay(Duration::from_millis(100)),
        )
        .await
        .unwrap();

    let alice = PlaySession::start(
        fleet.clone(),
        "duel",
        PlayerId::new("alice"),
        SessionConfig::default(),
    )
    .await
    .unwrap();
    let bob = PlaySession::start(
        fleet.clone(),
        "duel",
        PlayerId::new("bob"),
        SessionConfig::default(),
    )
    .await
    .unwrap();

    // Alice attacks; on this board bob is always in range.
    alice.attack().await.unwrap();

    let mut bob_died = false;
    for _ in 0..50 {
        let state = bob.player_state().await.unwrap();
        if state.status == Some(PlayerStatus::Dead) {
            bob_died = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(bob_died, "bob should die to alice's attack");
    assert!(bob.render().await.unwrap().contains('&'));

    // Bob respawns after the delay and can act again.
    let mut bob_back = false;
    for _ in 0..50 {
        let state = bob.player_state().await.unwrap();
        if state.status == Some(PlayerStatus::Alive) {
            bob_back = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(bob_back, "bob should respawn");

    // Both viewers see themselves; each hides the other behind their own
    // glyph or sees them as a count.
    let picture = alice.render().await.unwrap();
    assert!(picture.contains('@'), "alice sees herself: {picture}");

    // The fleet still knows the game; a second game under the same name
    // is rejected.
    assert!(fleet.whereis("duel").await.is_some());
    let result = fleet
        .create_game("duel", GameOptions::default(), GameConfig::default())
        .await;
    assert!(matches!(result, Err(FleetError::NameTaken(_))));
}
