use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::config::SessionConfig;
use crate::engine::{PlacementEngine, Preview};
use crate::gesture::{GestureDriver, GestureEvent, GestureOutcome};
use crate::location::Location;
use crate::question::Question;
use crate::state::PuzzleState;

/// Builds the driver for a question: shuffle (unless disabled), size the slots.
pub fn start_session(question: &Question, cfg: &SessionConfig) -> Result<GestureDriver> {
    let pool = if cfg.no_shuffle { question.keywords.clone() } else { question.shuffled_keywords(cfg.seed) };
    let slots = cfg.slot_count.unwrap_or(pool.len());
    let engine = PlacementEngine::new(pool, slots)?;
    Ok(GestureDriver::new(engine, cfg.on_occupied))
}

pub fn render(state: &PuzzleState) -> String {
    let slots: Vec<String> = state
        .slots()
        .iter()
        .map(|s| match s { Some(t) => format!("[{}]", t.text), None => "[ ]".to_string() })
        .collect();
    let pool: Vec<String> = state.pool().iter().map(|t| format!("[{}]", t.text)).collect();
    format!("answer: {}\npool:   {}", slots.join(" "), pool.join(" "))
}

/// Line-oriented driver: `begin <loc>`, `over <loc>`, `drop <loc>`, `cancel`,
/// `show`, `json`, `quit`. Locations are `pool N` / `slot N`.
pub struct Repl {
    driver: GestureDriver,
    question: Question,
}

impl Repl {
    pub fn new(driver: GestureDriver, question: Question) -> Self { Self { driver, question } }

    pub fn driver(&self) -> &GestureDriver { &self.driver }

    fn cmd_begin(&mut self, arg: &str) -> Result<String> {
        let origin: Location = arg.parse()?;
        self.driver.state().check_range(origin)?;
        // Hit-testing stand-in: whatever sits at `origin` is what the pointer grabbed.
        let Some(token) = self.driver.state().token_at(origin).map(|t| t.id) else {
            return Ok(format!("nothing at {origin}"));
        };
        self.driver.apply(GestureEvent::Begin { token, origin })?;
        Ok(format!("holding #{token} from {origin}"))
    }

    fn cmd_over(&mut self, arg: &str) -> Result<String> {
        let candidate: Location = arg.parse()?;
        match self.driver.apply(GestureEvent::Over { candidate })? {
            GestureOutcome::Previewed(Preview::Accepted(next)) => Ok(render(&next)),
            GestureOutcome::Previewed(Preview::Rejected(e)) => Ok(format!("would reject: {e}")),
            _ => Ok("no change".to_string()),
        }
    }

    fn cmd_drop(&mut self, arg: &str) -> Result<String> {
        let destination: Location = arg.parse()?;
        let outcome = self.driver.apply(GestureEvent::Drop { destination })?;
        let mut out = match outcome {
            GestureOutcome::Bounced { occupant } => format!("#{occupant} returned to pool\n{}", render(self.driver.state())),
            _ => render(self.driver.state()),
        };
        if self.question.is_solved(self.driver.state()) {
            out.push_str("\nsolved!");
        }
        Ok(out)
    }

    /// Returns `None` when the session should end.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        let (cmd, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let res: Result<String> = match cmd {
            "" => return Some(String::new()),
            "quit" => return None,
            "begin" => self.cmd_begin(arg),
            "over" => self.cmd_over(arg),
            "drop" => self.cmd_drop(arg),
            "cancel" => self.driver.apply(GestureEvent::Cancel).map(|_| "cancelled".to_string()).map_err(Into::into),
            "show" => Ok(render(self.driver.state())),
            "json" => serde_json::to_string(self.driver.state()).map_err(Into::into),
            other => Ok(format!("unknown command `{other}`")),
        };
        Some(res.unwrap_or_else(|e| format!("error: {e}")))
    }

    pub fn run_loop(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        writeln!(stdout, "{}\n{}", self.question.name, render(self.driver.state()))?;
        for line in stdin.lock().lines() {
            let line = line?;
            match self.handle_line(&line) {
                Some(out) if out.is_empty() => continue,
                Some(out) => writeln!(stdout, "{out}")?,
                None => break,
            }
        }
        Ok(())
    }
}

/// Replays JSON-lines gesture events, reporting each outcome.
pub fn run_script<R: BufRead, W: Write>(driver: &mut GestureDriver, input: R, mut out: W) -> Result<()> {
    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') { continue; }
        let ev: GestureEvent = serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("line {}: {e}", n + 1))?;
        match driver.apply(ev) {
            Ok(outcome) => writeln!(out, "{}: {}", n + 1, outcome_label(&outcome))?,
            Err(e) => writeln!(out, "{}: error: {e}", n + 1)?,
        }
    }
    writeln!(out, "{}", serde_json::to_string(driver.state())?)?;
    Ok(())
}

fn outcome_label(o: &GestureOutcome) -> &'static str {
    match o {
        GestureOutcome::Began => "began",
        GestureOutcome::Previewed(Preview::Unchanged) => "preview unchanged",
        GestureOutcome::Previewed(Preview::Accepted(_)) => "preview accepted",
        GestureOutcome::Previewed(Preview::Rejected(_)) => "preview rejected",
        GestureOutcome::Committed => "committed",
        GestureOutcome::Bounced { .. } => "bounced",
        GestureOutcome::Cancelled => "cancelled",
    }
}
