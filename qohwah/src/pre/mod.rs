pub mod check_sim_opts;
pub mod mod_paths;
pub mod read_config;
pub mod read_races;
pub mod read_scenario;
pub mod read_text;
pub mod sim_opts;
