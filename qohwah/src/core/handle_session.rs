use crate::core::race_mod::RaceMod;
use crate::interfaces::gui_interface::{HudFrame, MAX_GUI_UPDATE_FREQUENCY};
use crate::interfaces::host::MenuUi;
use crate::post::session_result::SessionResult;
use crate::pre::read_scenario::Scenario;
use crate::pre::sim_opts::SimOpts;
use crate::sim::sim_host::SimHost;
use crate::sim::sim_menu::SimMenu;
use anyhow::Context;
use flume::Sender;
use std::thread::sleep;
use std::time::{Duration, Instant};

/// handle_session runs the mod against a simulated host for the number of frames given in the
/// options. The race with the inserted index is selected from the menu in the first frame, the
/// rest of the session follows the scenario. If a sender is inserted, the session is simulated in
/// real-time and the HUD frames are sent to the GUI.
pub fn handle_session(
    mut race_mod: RaceMod,
    scenario: &Scenario,
    sim_opts: &SimOpts,
    tx: Option<&Sender<HudFrame>>,
) -> anyhow::Result<SessionResult> {
    let mut host = SimHost::new(scenario.clone(), sim_opts.timestep_size);
    let mut menu = SimMenu::new();

    race_mod.setup(&mut host, &mut menu);
    let start_wins = race_mod.get_wins();

    // the player opens the menu and picks the race right away
    menu.set_visible(true);
    menu.activate_at(0, sim_opts.race_idx);

    // check if sender was inserted -> in that case use real-time simulation for GUI
    let sim_realtime = tx.is_some();
    let mut t_update_print = 0.0;
    let mut t_update_gui = f64::NEG_INFINITY;
    let mut phase_prev = race_mod.get_state_handler().get_phase();

    for frame_idx in 0..sim_opts.no_frames {
        let t_start = Instant::now();
        let t_session = frame_idx as f64 * sim_opts.timestep_size;

        // simulate frame
        host.begin_frame(frame_idx);
        menu.set_frame(frame_idx);
        race_mod.on_tick(&mut host, &mut menu);

        let phase = race_mod.get_state_handler().get_phase();
        if phase != phase_prev {
            tracing::debug!(
                frame_idx,
                from = phase_prev.name(),
                to = phase.name(),
                "Phase changed"
            );
            phase_prev = phase;
        }

        if !sim_realtime {
            continue;
        }

        // REAL-TIME SIMULATION --------------------------------------------------------------------
        // print status (with a maximum of 1 Hz)
        if t_session > t_update_print + 0.9999 {
            tracing::info!(
                t_session,
                phase = phase.name(),
                progress = race_mod.get_state_handler().get_progress(),
                "Simulating..."
            );
            t_update_print = t_session;
        }

        // update GUI
        if let Some(tx) = tx {
            if t_session > t_update_gui + 1.0 / MAX_GUI_UPDATE_FREQUENCY - 0.001 {
                let menu_items = if menu.is_visible() {
                    Some(menu.get_items().to_vec())
                } else {
                    None
                };

                tx.send(host.end_frame(menu_items))
                    .context("Failed to send HUD frame to GUI!")?;
                t_update_gui = t_session;
            }
        }

        // sleep until the frame is finished in real-time as well (calculation in ms)
        let t_sleep = (sim_opts.timestep_size * 1000.0 / sim_opts.realtime_factor) as i64
            - t_start.elapsed().as_millis() as i64;

        if t_sleep > 0 {
            sleep(Duration::from_millis(t_sleep as u64));
        } else {
            tracing::warn!(frame_idx, "Could not keep up with real-time!");
        }
    }

    // print debug information if indicated
    if sim_opts.debug {
        println!(
            "DEBUG: Vehicles spawned: {}, alive: {}, beacons alive: {}, subtitles shown: {}",
            host.get_no_vehicles_spawned(),
            host.get_no_vehicles(),
            host.get_no_blips(),
            host.get_subtitles().len()
        );
    }

    let sh = race_mod.get_state_handler();
    let race_name = sh
        .get_current_race_idx()
        .and_then(|idx| race_mod.get_catalog().get(idx))
        .map(|race| race.name.to_owned())
        .unwrap_or_default();

    Ok(SessionResult {
        race_name,
        no_frames: sim_opts.no_frames,
        stats: race_mod.get_stats(),
        start_wins,
        end_wins: race_mod.get_wins(),
        final_phase: sh.get_phase(),
        final_progress: sh.get_progress(),
    })
}
