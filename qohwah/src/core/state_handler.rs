use crate::core::race_catalog::{Pose, RaceCatalog, RaceDef};
use crate::pre::read_config::Config;
use helpers::general::clamp_unit;
use helpers::geometry::Point3d;

/// (m) Distance to the finish point below which the finish countdown starts
pub const FINISH_RADIUS: f64 = 5.0;
/// (s) Time the player must stay within the finish radius for the race to count as won
pub const FINISH_COUNTDOWN: f64 = 10.0;
/// Number of frames between a death and the automatic restart
pub const DEATH_COOLDOWN_FRAMES: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Racing,
    FinishCountdown,
    DeathCooldown,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Racing => "Racing",
            Phase::FinishCountdown => "FinishCountdown",
            Phase::DeathCooldown => "DeathCooldown",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

/// Side effects requested by the state handler. They are executed against the host by the frame
/// handler in the order they were emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    PlacePlayer(Pose),
    /// health to max health, armor to zero
    ResetVitals,
    ClearPlayerTasks,
    ResurrectPlayer,
    /// delete the previous race vehicle, spawn a new one and seat the player as driver
    RespawnVehicle(Pose),
    RemoveVehicle,
    /// delete the previous beacon and create a new one guiding to the given point
    SetBeacon(Point3d),
    RemoveBeacon,
    AwardWin,
    DeductWin,
    ShowSubtitle(String),
}

/// FrameInput is the part of the world the state handler looks at in each frame.
///
/// * `player_position` - (m) Current player position
/// * `player_dead` - Death flag of the player
/// * `frame_time` - (s) Duration of the last frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub player_position: Point3d,
    pub player_dead: bool,
    pub frame_time: f64,
}

/// The StateHandler contains the race state machine. It owns the current race selection, the
/// finish countdown and the death cooldown, and decides on all transitions. It never touches the
/// host itself but returns the side effects as commands.
///
/// Possible statemachine states:
/// * `Idle` -> no race active, the last selection is kept
/// * `Racing` -> driving toward the finish point
/// * `FinishCountdown` -> within the finish radius, the race is won once the countdown ran out
/// * `DeathCooldown` -> the player died, the race restarts after a fixed number of frames
///
/// Every active state can be left toward `Racing` of the same race by a restart (countdown ran
/// out, cooldown elapsed) or toward `Racing` of any race by a new selection. Leaving the finish
/// radius during the countdown cancels it without penalty.
#[derive(Debug, Clone)]
pub struct StateHandler {
    // parameters
    finish_radius: f64,
    finish_countdown: f64,
    death_cooldown_frames: u32,
    // statemachine variables
    phase: Phase,
    current_race_idx: Option<usize>,
    countdown_remaining: f64,
    death_cooldown_frames_remaining: u32,
    has_died_this_attempt: bool,
    // display variables, updated in every frame of an active race
    distance_to_finish: f64,
    progress: f64,
}

impl StateHandler {
    pub fn new(finish_radius: f64, finish_countdown: f64, death_cooldown_frames: u32) -> Self {
        StateHandler {
            finish_radius,
            finish_countdown,
            death_cooldown_frames,
            ..Default::default()
        }
    }

    // ---------------------------------------------------------------------------------------------
    // DISCRETE COMMANDS ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// select_race starts the race with the given catalog index from any phase. An invalid index
    /// leaves the state untouched.
    pub fn select_race(&mut self, race_idx: usize, catalog: &RaceCatalog) -> Vec<Command> {
        let race = match catalog.get(race_idx) {
            Some(race) => race,
            None => {
                tracing::warn!(
                    race_idx,
                    no_races = catalog.len(),
                    "Ignored selection of unknown race"
                );
                return vec![];
            }
        };

        tracing::info!(race_idx, name = %race.name, "Race selected");
        self.current_race_idx = Some(race_idx);
        self.restart(race, Some("Start Racing!"))
    }

    /// stop_race returns to Idle from any phase and removes the race entities. The selection is
    /// kept such that the HUD can still refer to it.
    pub fn stop_race(&mut self) -> Vec<Command> {
        if !self.phase.is_active() {
            return vec![];
        }

        tracing::info!(race_idx = ?self.current_race_idx, "Race stopped");
        self.phase = Phase::Idle;
        self.countdown_remaining = 0.0;
        self.death_cooldown_frames_remaining = 0;

        vec![
            Command::RemoveBeacon,
            Command::RemoveVehicle,
            Command::ShowSubtitle(String::from("Race stopped.")),
        ]
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHOD ---------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// update advances the state machine by one frame. Execution order:
    /// 1. Update distance to finish and progress of the current race.
    /// 2. Racing/FinishCountdown: a first death in the current attempt switches to
    /// DeathCooldown, nothing else is checked in that frame.
    /// 3. Racing: entering the finish radius starts the finish countdown.
    /// 4. FinishCountdown: leaving the radius cancels the countdown, otherwise it is decremented
    /// and the race is won and restarted as soon as it runs out.
    /// 5. DeathCooldown: the frame counter is decremented, the race is restarted at zero.
    pub fn update(
        &mut self,
        input: &FrameInput,
        catalog: &RaceCatalog,
        config: &Config,
    ) -> Vec<Command> {
        if !self.phase.is_active() {
            return vec![];
        }

        let race = match self.current_race_idx.and_then(|idx| catalog.get(idx)) {
            Some(race) => race,
            None => {
                // cannot happen as long as the catalog is not replaced during a race
                tracing::warn!(race_idx = ?self.current_race_idx, "Active race vanished");
                self.phase = Phase::Idle;
                return vec![Command::RemoveBeacon, Command::RemoveVehicle];
            }
        };

        self.update_race_prog(&input.player_position, race);

        match self.phase {
            // IDLE --------------------------------------------------------------------------------
            Phase::Idle => vec![],

            // RACING ------------------------------------------------------------------------------
            Phase::Racing => {
                if let Some(cmds) = self.check_death(input, config) {
                    return cmds;
                }

                if self.distance_to_finish < self.finish_radius {
                    tracing::info!(
                        name = %race.name,
                        distance = self.distance_to_finish,
                        "Finish radius reached, countdown started"
                    );
                    self.phase = Phase::FinishCountdown;
                    self.countdown_remaining = self.finish_countdown;

                    return vec![
                        Command::RemoveBeacon,
                        Command::ShowSubtitle(format!(
                            "Finish reached! Stay for {:.0} seconds...",
                            self.finish_countdown
                        )),
                    ];
                }
                vec![]
            }

            // FINISH COUNTDOWN --------------------------------------------------------------------
            Phase::FinishCountdown => {
                if let Some(cmds) = self.check_death(input, config) {
                    return cmds;
                }

                if self.distance_to_finish > self.finish_radius {
                    tracing::info!(
                        name = %race.name,
                        distance = self.distance_to_finish,
                        "Left finish radius, countdown cancelled"
                    );
                    self.phase = Phase::Racing;
                    self.countdown_remaining = 0.0;

                    return vec![
                        Command::SetBeacon(race.finish.position),
                        Command::ShowSubtitle(String::from("Back on track!")),
                    ];
                }

                self.countdown_remaining -= input.frame_time;

                if self.countdown_remaining <= 0.0 {
                    tracing::info!(name = %race.name, "Race won");
                    let mut cmds = vec![Command::AwardWin];
                    cmds.extend(self.restart(race, None));
                    return cmds;
                }
                vec![]
            }

            // DEATH COOLDOWN ----------------------------------------------------------------------
            Phase::DeathCooldown => {
                self.death_cooldown_frames_remaining =
                    self.death_cooldown_frames_remaining.saturating_sub(1);

                if self.death_cooldown_frames_remaining == 0 {
                    tracing::info!(name = %race.name, "Death cooldown elapsed, restarting race");
                    return self.restart(race, Some("Restarted!"));
                }
                vec![]
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // STATEMACHINE PARTS --------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// restart resets the attempt and returns the full restart sequence for the given race.
    /// current_race_idx must already point to it.
    fn restart(&mut self, race: &RaceDef, subtitle: Option<&str>) -> Vec<Command> {
        self.phase = Phase::Racing;
        self.countdown_remaining = 0.0;
        self.death_cooldown_frames_remaining = 0;
        self.has_died_this_attempt = false;
        self.distance_to_finish = race.start.position.distance_to(&race.finish.position);
        self.progress = 0.0;

        let mut cmds = vec![
            Command::PlacePlayer(race.start),
            Command::ResetVitals,
            Command::ClearPlayerTasks,
            Command::RespawnVehicle(race.start),
            Command::SetBeacon(race.finish.position),
        ];

        if let Some(text) = subtitle {
            cmds.push(Command::ShowSubtitle(text.to_owned()));
        }
        cmds
    }

    /// check_death handles the first death of the current attempt. Further deaths are ignored
    /// until the next restart.
    fn check_death(&mut self, input: &FrameInput, config: &Config) -> Option<Vec<Command>> {
        if !input.player_dead || self.has_died_this_attempt {
            return None;
        }

        tracing::info!(
            race_idx = ?self.current_race_idx,
            phase = self.phase.name(),
            "Player died"
        );
        self.has_died_this_attempt = true;
        self.phase = Phase::DeathCooldown;
        self.countdown_remaining = 0.0;
        self.death_cooldown_frames_remaining = self.death_cooldown_frames;

        let mut cmds = vec![Command::ResurrectPlayer, Command::ResetVitals];

        if config.auto_decrement_wins_on_death {
            cmds.push(Command::DeductWin);
        }

        cmds.push(Command::ShowSubtitle(format!(
            "You died! Respawning in {} frames...",
            self.death_cooldown_frames
        )));
        Some(cmds)
    }

    /// update_race_prog calculates the distance to the finish and the displayed progress. The
    /// progress is the straight-line distance from the start relative to the straight-line course
    /// length and therefore only a rough indicator.
    fn update_race_prog(&mut self, player_position: &Point3d, race: &RaceDef) {
        self.distance_to_finish = player_position.distance_to(&race.finish.position);

        let course_length = race.course_length();
        self.progress = if course_length > f64::EPSILON {
            clamp_unit(player_position.distance_to(&race.start.position) / course_length)
        } else {
            1.0
        };
    }

    // ---------------------------------------------------------------------------------------------
    // GETTERS -------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn get_phase(&self) -> Phase {
        self.phase
    }

    pub fn get_current_race_idx(&self) -> Option<usize> {
        self.current_race_idx
    }

    /// get_countdown_remaining returns the remaining finish countdown (s), only meaningful in
    /// FinishCountdown.
    pub fn get_countdown_remaining(&self) -> f64 {
        self.countdown_remaining
    }

    pub fn get_death_cooldown_frames_remaining(&self) -> u32 {
        self.death_cooldown_frames_remaining
    }

    pub fn get_has_died_this_attempt(&self) -> bool {
        self.has_died_this_attempt
    }

    pub fn get_distance_to_finish(&self) -> f64 {
        self.distance_to_finish
    }

    /// get_progress returns the displayed race progress in [0.0, 1.0].
    pub fn get_progress(&self) -> f64 {
        self.progress
    }

    /// is_consistent checks that an active phase refers to an existing race.
    pub fn is_consistent(&self, catalog: &RaceCatalog) -> bool {
        match self.phase {
            Phase::Idle => true,
            _ => self
                .current_race_idx
                .map_or(false, |idx| catalog.contains_idx(idx)),
        }
    }
}

impl Default for StateHandler {
    fn default() -> Self {
        StateHandler {
            finish_radius: FINISH_RADIUS,
            finish_countdown: FINISH_COUNTDOWN,
            death_cooldown_frames: DEATH_COOLDOWN_FRAMES,
            phase: Phase::Idle,
            current_race_idx: None,
            countdown_remaining: 0.0,
            death_cooldown_frames_remaining: 0,
            has_died_this_attempt: false,
            distance_to_finish: 0.0,
            progress: 0.0,
        }
    }
}
