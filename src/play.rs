//! Line-oriented game on a pair of async streams (stdin/stdout in the binary).

use crate::controller::GameController;
use crate::games::pots::{Claimant, End, GameSession, MoveResult, Outcome, PotStatus};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{info, instrument, warn};

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Take(End),
    Index(usize),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Command::Take(End::Low)),
            "h" | "high" => Some(Command::Take(End::High)),
            "q" | "quit" | "exit" => Some(Command::Quit),
            other => other.parse().ok().map(Command::Index),
        }
    }
}

/// Renders the row: `[v]` for an edge, `u:v` / `c:v` for claimed pots.
pub fn render_row(session: &GameSession) -> String {
    let cells: Vec<String> = session
        .pots()
        .iter()
        .zip(session.statuses())
        .enumerate()
        .map(|(i, (value, status))| {
            let cell = match status {
                PotStatus::Interior => format!(" {} ", value),
                PotStatus::Edge => format!("[{}]", value),
                PotStatus::ClaimedByUser => format!("u:{}", value),
                PotStatus::ClaimedByComputer => format!("c:{}", value),
            };
            format!("{}={}", i, cell)
        })
        .collect();
    cells.join("  ")
}

fn describe(result: &MoveResult, session: &GameSession) -> String {
    let who = match result.claimed.claimant {
        Claimant::User => "You take",
        Claimant::Computer => "Computer takes",
    };
    let value = session.pots().get(result.claimed.index).copied().unwrap_or_default();
    format!(
        "{} pot {} ({}). Score: you {}, computer {}",
        who, result.claimed.index, value, result.scores.user, result.scores.computer
    )
}

fn announce(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Winner(Claimant::User) => "You win!",
        Outcome::Winner(Claimant::Computer) => "The computer wins.",
        Outcome::Draw => "It's a draw.",
    }
}

struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    /// Prompts and reads one line; `None` at end of input.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        self.lines.next_line().await.context("Failed to read input")
    }
}

/// Plays games until the user quits or input ends.
///
/// Illegal input is reported and asked again. A failed computer move can be
/// retried; other errors end the loop.
#[instrument(skip_all)]
pub async fn run<R, W>(controller: &mut GameController, input: R, output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut console = Console {
        lines: input.lines(),
        out: output,
    };
    let think = controller.settings().think_delay();

    controller.new_game().await?;
    console
        .say(&format!(
            "New game: {} pots, difficulty {}, {} moves first.",
            controller.session().pots().len(),
            controller.settings().difficulty(),
            controller.session().first_turn()
        ))
        .await?;

    loop {
        if controller.session().is_done() {
            let scores = controller.session().scores();
            let verdict = controller.session().outcome().map(announce).unwrap_or_default();
            console
                .say(&format!(
                    "Game over. You {} - {} computer. {}",
                    scores.user, scores.computer, verdict
                ))
                .await?;
            info!(user = scores.user, computer = scores.computer, "Game finished");

            match console.ask("Play again? [y/n] ").await? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                    controller.play_again().await?;
                    continue;
                }
                _ => return Ok(()),
            }
        }

        console.say(&render_row(controller.session())).await?;

        if controller.awaits_computer() {
            if !think.is_zero() {
                tokio::time::sleep(think).await;
            }
            match controller.computer_move().await {
                Ok(result) => {
                    let line = describe(&result, controller.session());
                    console.say(&line).await?;
                }
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Computer move failed");
                    console.say(&format!("{}", e)).await?;
                    match console.ask("Press enter to retry or q to quit: ").await? {
                        Some(answer) if Command::parse(&answer) != Some(Command::Quit) => continue,
                        _ => return Ok(()),
                    }
                }
                Err(e) => return Err(e.into()),
            }
            continue;
        }

        let Some(line) = console.ask("Your move [l/h/index/q]: ").await? else {
            return Ok(());
        };
        let outcome = match Command::parse(&line) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Take(end)) => controller.user_take(end),
            Some(Command::Index(index)) => controller.user_move(index),
            None => {
                console.say("Enter l, h, a pot index, or q.").await?;
                continue;
            }
        };
        match outcome {
            Ok(result) => {
                let line = describe(&result, controller.session());
                console.say(&line).await?;
            }
            Err(e) => console.say(&format!("{}", e)).await?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::games::pots::Difficulty;
    use crate::services::{
        MoveService, OptimalMoveRequest, OptimalMoveResponse, PotService, ServiceError,
        StartGameRequest, StartGameResponse,
    };
    use std::sync::Arc;

    struct Row(Vec<u32>);

    #[async_trait::async_trait]
    impl PotService for Row {
        async fn start_game(
            &self,
            _request: &StartGameRequest,
        ) -> Result<StartGameResponse, ServiceError> {
            Ok(StartGameResponse { pots: self.0.clone() })
        }
    }

    struct High;

    #[async_trait::async_trait]
    impl MoveService for High {
        async fn optimal_move(
            &self,
            _request: &OptimalMoveRequest,
        ) -> Result<OptimalMoveResponse, ServiceError> {
            Ok(OptimalMoveResponse { chosen_index: 1 })
        }
    }

    fn controller(pots: Vec<u32>) -> GameController {
        let settings = GameSettings::default().with_difficulty(Difficulty::Hard);
        GameController::new(settings, Arc::new(Row(pots)), Arc::new(High))
    }

    async fn transcript(controller: &mut GameController, input: &str) -> String {
        let mut output = Vec::new();
        run(controller, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("l"), Some(Command::Take(End::Low)));
        assert_eq!(Command::parse(" HIGH \n"), Some(Command::Take(End::High)));
        assert_eq!(Command::parse("3"), Some(Command::Index(3)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("middle"), None);
    }

    #[tokio::test]
    async fn test_plays_to_the_end() {
        let mut controller = controller(vec![3, 9, 1, 2]);
        let text = transcript(&mut controller, "l\nl\nn\n").await;

        assert!(text.contains("You take pot 0 (3)"));
        assert!(text.contains("Computer takes pot 3 (2)"));
        assert!(text.contains("You take pot 1 (9)"));
        assert!(text.contains("Game over. You 12 - 3 computer. You win!"));
        assert!(controller.session().is_done());
    }

    #[tokio::test]
    async fn test_illegal_index_is_reported() {
        let mut controller = controller(vec![3, 9, 1, 2]);
        let text = transcript(&mut controller, "2\nwhat\nq\n").await;
        assert!(text.contains("Pot 2 is not selectable"));
        assert!(text.contains("Enter l, h, a pot index, or q."));
        assert_eq!(controller.session().history().len(), 0);
    }

    #[tokio::test]
    async fn test_end_of_input_stops() {
        let mut controller = controller(vec![3, 9]);
        let text = transcript(&mut controller, "").await;
        assert!(text.contains("New game: 2 pots"));
    }

    #[test]
    fn test_render_row_marks_edges_and_claims() {
        let mut session = GameSession::new();
        session.start_game(vec![3, 9, 1, 2], Claimant::User).unwrap();
        session.apply_move(0, Claimant::User).unwrap();
        assert_eq!(render_row(&session), "0=u:3  1=[9]  2= 1   3=[2]");
    }
}
