use crate::core::race_mod::RaceStats;
use crate::core::state_handler::Phase;

/// SessionResult contains all session information that is required for post-processing.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub race_name: String,
    pub no_frames: u32,
    pub stats: RaceStats,
    pub start_wins: i32,
    pub end_wins: i32,
    pub final_phase: Phase,
    pub final_progress: f64,
}

impl SessionResult {
    /// get_no_restarts returns the number of race starts after the initial selection.
    pub fn get_no_restarts(&self) -> u32 {
        self.stats.no_starts.saturating_sub(1)
    }

    /// print_summary prints the session summary to the console output.
    pub fn print_summary(&self) {
        println!("RESULT: Session summary for race {}", self.race_name);
        println!("frames:   {:8}", self.no_frames);
        println!("finishes: {:8}", self.stats.no_finishes);
        println!("deaths:   {:8}", self.stats.no_deaths);
        println!("restarts: {:8}", self.get_no_restarts());
        println!(
            "wins:     {:8} -> {} ({:+})",
            self.start_wins,
            self.end_wins,
            self.end_wins as i64 - self.start_wins as i64
        );
        println!(
            "final:    {:>8} at {:.0}%",
            self.final_phase.name(),
            self.final_progress * 100.0
        );
    }
}
