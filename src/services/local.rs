//! In-process implementation of both services.

use super::{
    MAX_POTS, MoveService, OptimalMoveRequest, OptimalMoveResponse, PotService, ServiceError,
    StartGameRequest, StartGameResponse, check_pot_count,
};
use crate::games::pots::rules::{PotRange, choose_end, generate_pots};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Generates pots and chooses moves without leaving the process.
///
/// Backs the HTTP server and offline play.
#[derive(Debug)]
pub struct LocalServices {
    range: PotRange,
    rng: Mutex<StdRng>,
}

impl LocalServices {
    /// Creates services seeded from the operating system.
    pub fn new(range: PotRange) -> Self {
        Self {
            range,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates services with a fixed seed, for reproducible games.
    pub fn seeded(range: PotRange, seed: u64) -> Self {
        Self {
            range,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Range generated pot values fall in.
    pub fn range(&self) -> PotRange {
        self.range
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, ServiceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ServiceError::new("random number generator lock poisoned"))?;
        Ok(f(&mut rng))
    }
}

#[async_trait::async_trait]
impl PotService for LocalServices {
    #[instrument(skip(self))]
    async fn start_game(
        &self,
        request: &StartGameRequest,
    ) -> Result<StartGameResponse, ServiceError> {
        check_pot_count(request.pot_count)?;
        let pots = self.with_rng(|rng| generate_pots(request.pot_count, self.range, rng))?;
        debug!(?pots, "Generated pots");
        Ok(StartGameResponse { pots })
    }
}

#[async_trait::async_trait]
impl MoveService for LocalServices {
    #[instrument(skip(self))]
    async fn optimal_move(
        &self,
        request: &OptimalMoveRequest,
    ) -> Result<OptimalMoveResponse, ServiceError> {
        if request.pots.len() > MAX_POTS {
            return Err(ServiceError::new(format!(
                "{} pots exceed the maximum of {}",
                request.pots.len(),
                MAX_POTS
            )));
        }
        let end = self
            .with_rng(|rng| choose_end(&request.pots, request.level, rng))?
            .map_err(|e| ServiceError::new(e.to_string()))?;
        debug!(?end, "Chose end");
        Ok(OptimalMoveResponse {
            chosen_index: end.relative(),
        })
    }
}
