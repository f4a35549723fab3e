mod logging;

use clap::Parser;
use gui::core::gui::HudPlot;
use qohwah::core::handle_session::handle_session;
use qohwah::core::race_mod::RaceMod;
use qohwah::pre::check_sim_opts::check_sim_opts;
use qohwah::pre::mod_paths::ModPaths;
use qohwah::pre::read_scenario::{read_scenario, Scenario};
use qohwah::pre::sim_opts::SimOpts;
use std::thread;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get simulation options from the command line arguments, load the mod files and the scenario
    let sim_opts: SimOpts = SimOpts::parse();
    let paths = ModPaths::from_scripts_dir(&sim_opts.scripts_dir);
    let race_mod = RaceMod::load(&paths);
    let scenario = match &sim_opts.scenario_path {
        Some(scenario_path) => read_scenario(scenario_path)?,
        None => Scenario::default(),
    };

    // check simulation options and scenario
    check_sim_opts(&sim_opts, &scenario, race_mod.get_catalog())?;

    let race = race_mod.get_catalog().get(sim_opts.race_idx).cloned();

    tracing::info!(
        race = race.as_ref().map(|race| race.name.as_str()).unwrap_or_default(),
        no_frames = sim_opts.no_frames,
        timestep_size = sim_opts.timestep_size,
        "Simulating session"
    );

    // EXECUTION -----------------------------------------------------------------------------------
    if !sim_opts.gui {
        // NON-GUI CASE ----------------------------------------------------------------------------
        let t_start = Instant::now();
        let session_result = handle_session(race_mod, &scenario, &sim_opts, None)?;

        tracing::info!(
            t_exec_ms = t_start.elapsed().as_millis() as u64,
            "Execution time (total)"
        );

        // POST-PROCESSING -------------------------------------------------------------------------
        session_result.print_summary();
    } else {
        // GUI CASE --------------------------------------------------------------------------------
        // create channel for communication between GUI and session
        let (tx, rx) = flume::unbounded();

        // create a separate thread for the session (executed in real-time) -> sim_opts and
        // scenario get moved and must therefore be copied to be still available afterwards
        let sim_opts_thread = sim_opts.clone();
        let scenario_thread = scenario.clone();

        let _ = thread::spawn(move || {
            match handle_session(race_mod, &scenario_thread, &sim_opts_thread, Some(&tx)) {
                Ok(session_result) => session_result.print_summary(),
                Err(e) => tracing::error!(error = ?e, "Session failed"),
            }
        });

        // start GUI (must be done in the main thread)
        let gui = HudPlot::new(rx, race.as_ref());
        let native_options = eframe::NativeOptions::default();
        eframe::run_native(Box::new(gui), native_options);
    }

    Ok(())
}
