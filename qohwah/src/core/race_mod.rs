use crate::core::input::{InputCommand, InputDispatcher};
use crate::core::presentation::{build_hud, menu_items, PlayerVitals, MENU_SUBTITLE, MENU_TITLE};
use crate::core::race_catalog::{Pose, RaceCatalog};
use crate::core::state_handler::{Command, FrameInput, StateHandler};
use crate::interfaces::gui_interface::DrawCmd;
use crate::interfaces::host::{BlipHandle, BlipStyle, Host, MenuUi, VehicleHandle, RACE_VEHICLE_MODEL};
use crate::post::win_counter::WinCounter;
use crate::pre::mod_paths::ModPaths;
use crate::pre::read_config::{read_config, Config};
use crate::pre::read_races::read_races;
use helpers::geometry::Point3d;

pub const SUBTITLE_DURATION_MS: u32 = 3000;

/// RaceStats counts the race events of the current game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaceStats {
    pub no_starts: u32,
    pub no_finishes: u32,
    pub no_deaths: u32,
}

/// RaceMod is the frame handler of the mod. It owns the loaded race catalog, the config, the
/// state handler, the win counter and the handles of the entities it created, and it is the only
/// part of the mod that talks to the host.
#[derive(Debug)]
pub struct RaceMod {
    catalog: RaceCatalog,
    config: Config,
    sh: StateHandler,
    wins: WinCounter,
    input: InputDispatcher,
    race_vehicle: Option<VehicleHandle>,
    race_blip: Option<BlipHandle>,
    stats: RaceStats,
}

impl RaceMod {
    pub fn new(catalog: RaceCatalog, config: Config, wins: WinCounter) -> RaceMod {
        let input = InputDispatcher::new(&config);

        RaceMod {
            catalog,
            config,
            sh: StateHandler::default(),
            wins,
            input,
            race_vehicle: None,
            race_blip: None,
            stats: RaceStats::default(),
        }
    }

    /// load reads races, config and win counter. Missing or broken files result in defaults.
    pub fn load(paths: &ModPaths) -> RaceMod {
        let catalog = RaceCatalog::new(read_races(&paths.races));
        let config = read_config(&paths.config);
        let wins = WinCounter::load(&paths.wins);

        RaceMod::new(catalog, config, wins)
    }

    /// setup fills the menu and greets the player. It must be called once before the first tick.
    pub fn setup<H: Host, M: MenuUi>(&mut self, host: &mut H, menu: &mut M) {
        menu.set_title(MENU_TITLE, MENU_SUBTITLE);
        for item in menu_items(&self.catalog) {
            menu.add_item(&item);
        }
        menu.set_visible(false);

        host.show_subtitle("Qohwah Mod Loaded!", SUBTITLE_DURATION_MS);
        tracing::info!(
            no_races = self.catalog.len(),
            wins = self.wins.get(),
            "Qohwah mod ready"
        );
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHOD ---------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// on_tick is called from the host's frame callback. Execution order:
    /// 1. Dispatch key presses (menu toggle, manual win decrement).
    /// 2. Process the menu and handle a race selection.
    /// 3. Advance the state machine and execute its side effects.
    /// 4. Draw the HUD.
    pub fn on_tick<H: Host, M: MenuUi>(&mut self, host: &mut H, menu: &mut M) {
        let input_cmds = self.input.poll(|key| host.is_key_pressed(key));
        for input_cmd in input_cmds {
            match input_cmd {
                InputCommand::ToggleMenu => menu.set_visible(!menu.is_visible()),
                InputCommand::DecrementWins => self.decrement_wins(host),
            }
        }

        if let Some(item_idx) = menu.process() {
            menu.set_visible(false);

            if self.catalog.contains_idx(item_idx) {
                self.select_race(host, item_idx);
            } else {
                self.stop_race(host);
            }
        }

        let frame_input = FrameInput {
            player_position: host.player_position(),
            player_dead: host.is_player_dead(),
            frame_time: host.last_frame_time(),
        };
        let cmds = self.sh.update(&frame_input, &self.catalog, &self.config);
        self.execute(host, cmds);

        self.draw_hud(host);
    }

    // ---------------------------------------------------------------------------------------------
    // DISCRETE COMMANDS ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn select_race<H: Host>(&mut self, host: &mut H, race_idx: usize) {
        let cmds = self.sh.select_race(race_idx, &self.catalog);
        self.execute(host, cmds);
    }

    pub fn stop_race<H: Host>(&mut self, host: &mut H) {
        let cmds = self.sh.stop_race();
        self.execute(host, cmds);
    }

    /// decrement_wins removes one win and persists the counter, independent of the race phase.
    pub fn decrement_wins<H: Host>(&mut self, host: &mut H) {
        let wins = self.wins.add(-1);
        tracing::info!(wins, "Win counter decremented manually");
        host.show_subtitle(&format!("Wins: {}", wins), SUBTITLE_DURATION_MS);
    }

    // ---------------------------------------------------------------------------------------------
    // HOST SIDE EFFECTS ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    fn execute<H: Host>(&mut self, host: &mut H, cmds: Vec<Command>) {
        for cmd in cmds {
            match cmd {
                Command::PlacePlayer(pose) => {
                    self.stats.no_starts += 1;
                    host.set_player_pose(&pose)
                }
                Command::ResetVitals => {
                    let max_health = host.player_max_health();
                    host.set_player_health(max_health);
                    host.set_player_armor(0.0);
                }
                Command::ClearPlayerTasks => host.clear_player_tasks(),
                Command::ResurrectPlayer => {
                    self.stats.no_deaths += 1;
                    host.resurrect_player()
                }
                Command::RespawnVehicle(pose) => self.respawn_vehicle(host, &pose),
                Command::RemoveVehicle => self.remove_vehicle(host),
                Command::SetBeacon(at) => self.set_beacon(host, &at),
                Command::RemoveBeacon => self.remove_beacon(host),
                Command::AwardWin => {
                    self.stats.no_finishes += 1;
                    let wins = self.wins.add(1);
                    tracing::info!(wins, "Race finished");
                    host.show_subtitle(&format!("Finish! Wins: {}", wins), SUBTITLE_DURATION_MS);
                }
                Command::DeductWin => {
                    let wins = self.wins.add(-1);
                    tracing::info!(wins, "Win deducted for dying");
                }
                Command::ShowSubtitle(text) => host.show_subtitle(&text, SUBTITLE_DURATION_MS),
            }
        }
    }

    /// respawn_vehicle deletes the previous race vehicle before creating a new one, such that at
    /// most one race vehicle exists at any time.
    fn respawn_vehicle<H: Host>(&mut self, host: &mut H, pose: &Pose) {
        self.remove_vehicle(host);

        match host.spawn_vehicle(RACE_VEHICLE_MODEL, pose) {
            Some(vehicle) => {
                host.set_player_into_vehicle(vehicle);
                self.race_vehicle = Some(vehicle);
            }
            None => tracing::warn!(
                model = RACE_VEHICLE_MODEL,
                "Race vehicle could not be spawned, racing on foot"
            ),
        }
    }

    fn remove_vehicle<H: Host>(&mut self, host: &mut H) {
        if let Some(vehicle) = self.race_vehicle.take() {
            host.delete_vehicle(vehicle);
        }
    }

    fn set_beacon<H: Host>(&mut self, host: &mut H, at: &Point3d) {
        self.remove_beacon(host);
        self.race_blip = Some(host.create_blip(at, &BlipStyle::race_finish()));
    }

    fn remove_beacon<H: Host>(&mut self, host: &mut H) {
        if let Some(blip) = self.race_blip.take() {
            host.delete_blip(blip);
        }
    }

    fn draw_hud<H: Host>(&self, host: &mut H) {
        let vitals = PlayerVitals {
            health: host.player_health(),
            max_health: host.player_max_health(),
        };

        for draw_cmd in build_hud(&self.sh, &self.catalog, self.wins.get(), &vitals) {
            match draw_cmd {
                DrawCmd::Rect { rect, color } => host.draw_rect(&rect, color),
                DrawCmd::Text(label) => host.draw_text(&label),
                DrawCmd::Marker { at, scale, color } => host.draw_marker(&at, scale, color),
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // GETTERS -------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn get_state_handler(&self) -> &StateHandler {
        &self.sh
    }

    pub fn get_catalog(&self) -> &RaceCatalog {
        &self.catalog
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_wins(&self) -> i32 {
        self.wins.get()
    }

    pub fn get_race_vehicle(&self) -> Option<VehicleHandle> {
        self.race_vehicle
    }

    pub fn get_race_blip(&self) -> Option<BlipHandle> {
        self.race_blip
    }

    pub fn get_stats(&self) -> RaceStats {
        self.stats
    }
}
