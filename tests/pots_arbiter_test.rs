//! Tests for the move arbiter against in-process and scripted services.

use async_trait::async_trait;
use pots_of_gold::{
    Claimant, Difficulty, Frontier, GameError, GameSession, LocalServices, MoveArbiter, MoveService,
    OptimalMoveRequest, OptimalMoveResponse, PotRange, ServiceError, SharedSession, best_end,
};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Holds its answer until released, so the session can change underneath it.
struct Gated {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl MoveService for Gated {
    async fn optimal_move(
        &self,
        _request: &OptimalMoveRequest,
    ) -> Result<OptimalMoveResponse, ServiceError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(OptimalMoveResponse { chosen_index: 0 })
    }
}

fn narrowed_session() -> GameSession {
    let mut session = GameSession::new();
    session.start_game(vec![3, 9, 1, 2, 7, 4], Claimant::User).unwrap();
    session.apply_move(5, Claimant::User).unwrap();
    session.apply_move(0, Claimant::Computer).unwrap();
    session.apply_move(1, Claimant::User).unwrap();
    session
}

#[tokio::test]
async fn test_hard_local_solver_maps_to_absolute_index() {
    let arbiter = MoveArbiter::new(Arc::new(LocalServices::seeded(PotRange::default(), 3)));
    let mut session = narrowed_session();
    assert_eq!(session.frontier(), Some(Frontier::new(2, 4)));

    let result = arbiter
        .request_computer_move(&mut session, Difficulty::Hard)
        .await
        .unwrap();

    // The solver answers 1 for [1, 2, 7]; that is absolute index 4.
    assert_eq!(result.claimed.index, 4);
    assert_eq!(result.claimed.claimant, Claimant::Computer);
}

#[tokio::test]
async fn test_hard_computer_never_loses_even_rows() {
    let services = Arc::new(LocalServices::seeded(PotRange::default(), 17));
    let arbiter = MoveArbiter::new(services);

    for row in [vec![3, 9, 1, 2, 7, 4], vec![8, 15, 3, 7], vec![2, 2, 2, 2, 9, 1, 1, 5]] {
        let mut session = GameSession::new();
        session.start_game(row, Claimant::Computer).unwrap();
        while !session.is_done() {
            if session.turn_owner() == Claimant::Computer {
                arbiter.request_computer_move(&mut session, Difficulty::Hard).await.unwrap();
            } else {
                // The user greedily takes the larger end.
                let live = session.live_pots();
                let frontier = session.frontier().unwrap();
                let index = if live[0] >= live[live.len() - 1] {
                    frontier.low
                } else {
                    frontier.high
                };
                session.apply_move(index, Claimant::User).unwrap();
            }
        }
        let scores = session.scores();
        assert!(scores.computer >= scores.user, "{:?}", scores);
    }
}

#[test]
fn test_solver_prefers_low_on_ties() {
    assert_eq!(best_end(&[5, 5]).unwrap(), pots_of_gold::End::Low);
}

#[tokio::test]
async fn test_shared_move_discarded_after_reset() {
    let gated = Arc::new(Gated {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let arbiter = MoveArbiter::new(gated.clone());
    let shared: SharedSession = Arc::new(Mutex::new(narrowed_session()));

    let task = {
        let arbiter = arbiter.clone();
        let shared = shared.clone();
        tokio::spawn(async move { arbiter.request_shared_move(&shared, Difficulty::Easy).await })
    };

    gated.entered.notified().await;
    {
        let mut session = shared.lock().await;
        session.reset();
        session.start_game(vec![1, 2, 3, 4], Claimant::Computer).unwrap();
    }
    gated.release.notify_one();

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, GameError::StaleMove(_)));

    let session = shared.lock().await;
    assert_eq!(session.history().len(), 0);
    assert_eq!(session.turn_owner(), Claimant::Computer);
}
