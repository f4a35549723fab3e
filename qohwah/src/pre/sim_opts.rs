use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    name = "qohwah",
    about = "Headless session runner for the Qohwah race mod"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug printing (not usable in case GUI/real-time simulation is activated)
    #[clap(short, long, conflicts_with = "gui")]
    pub debug: bool,

    /// Activate GUI (session is then simulated in real-time with the inserted real-time factor)
    #[clap(short, long, conflicts_with = "debug")]
    pub gui: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the directory containing QohwahRaces.ini, QohwahConfig.ini and QohwahWins.ini
    #[clap(parse(from_os_str), short, long, default_value = "scripts")]
    pub scripts_dir: PathBuf,

    /// Set index of the race that is selected from the menu in the first frame
    #[clap(short = 'i', long, default_value = "0")]
    pub race_idx: usize,

    /// Set number of frames to simulate
    #[clap(short, long, default_value = "3000")]
    pub no_frames: u32,

    /// Set path to the scenario file (optional, a default driver is used otherwise)
    #[clap(parse(from_os_str), short = 'p', long)]
    pub scenario_path: Option<PathBuf>,

    /// Set real-time factor (only relevant in case GUI/real-time simulation is activated)
    #[clap(short, long, default_value = "1.0")]
    pub realtime_factor: f64,

    /// Set frame time in seconds, should be in the range [0.001, 1.0]
    #[clap(short, long, default_value = "0.016")]
    pub timestep_size: f64,
}
