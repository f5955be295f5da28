use crate::config::DEFAULT_CONFIG_PATH;

pub struct App {
    conf_path: String,
}

impl App {
    /// Only `--help` and `--version` are recognised; the tool itself takes
    /// no arguments.
    pub fn new() -> App {
        clap::App::new("ROI Tracker")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Records investments and reports their return on investment")
            .after_help("Reads optional settings from ./roi.yaml (export_path, log_filter).")
            .get_matches();

        App {
            conf_path: DEFAULT_CONFIG_PATH.to_string(),
        }
    }

    pub fn get_config_path(&self) -> &str { &self.conf_path }
}
