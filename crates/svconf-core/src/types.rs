use serde::{Deserialize, Serialize};

/// Settings for the supervisor daemon itself (the `[supervisord]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalSettings {
    /// Path of the daemon's own log file
    pub log_file: String,
    /// Maximum size of the daemon log in megabytes before rotation
    pub log_file_max_mb: u32,
    /// Number of rotated daemon logs to keep
    pub log_file_backups: u32,
    /// Daemon log level (e.g., "info", "debug"), passed through verbatim
    pub log_level: String,
    /// Path of the daemon's pid file
    pub pidfile: String,
    /// OS user the daemon runs as
    pub user: String,
}

impl GlobalSettings {
    /// Create settings for the given daemon user with the usual provisioning defaults
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            log_file: "/var/log/supervisord.log".to_string(),
            log_file_max_mb: 50,
            log_file_backups: 10,
            log_level: "info".to_string(),
            pidfile: "/var/run/supervisord.pid".to_string(),
            user: user.into(),
        }
    }

    /// Set the daemon log file path
    pub fn with_log_file(mut self, log_file: impl Into<String>) -> Self {
        self.log_file = log_file.into();
        self
    }

    /// Set the daemon log size limit (MB) and backup count
    pub fn with_log_rotation(mut self, max_mb: u32, backups: u32) -> Self {
        self.log_file_max_mb = max_mb;
        self.log_file_backups = backups;
        self
    }

    /// Set the daemon log level
    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    /// Set the pid file path
    pub fn with_pidfile(mut self, pidfile: impl Into<String>) -> Self {
        self.pidfile = pidfile.into();
        self
    }
}

/// A managed process group (one `[program:<name>]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSpec {
    /// Program name, used in the section header and log file names
    pub name: String,
    /// Command line to execute
    pub command: String,
    /// Working directory of the process
    pub directory: String,
    /// Number of instances to spawn
    pub number_of_processes: u32,
    /// Start priority; the daemon default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    pub auto_start: bool,
    pub auto_restart: bool,
    pub start_retries: u32,
    /// Signal name used to stop the process (e.g., "TERM")
    pub stop_signal: String,
    /// User override; the process inherits the daemon user when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Directory for the stdout/stderr logs
    pub log_folder: String,
    /// Maximum size of each stream log in megabytes
    pub log_file_max_mb: u32,
    /// Number of rotated logs kept per stream
    pub log_file_backups: u32,
    /// Pre-formatted environment, e.g. `KEY="VAL",KEY2="VAL2"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl ProgramSpec {
    /// Create a program with the usual provisioning defaults
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            directory: "/".to_string(),
            number_of_processes: 1,
            priority: None,
            auto_start: true,
            auto_restart: true,
            start_retries: 3,
            stop_signal: "TERM".to_string(),
            user: None,
            log_folder: "/var/log".to_string(),
            log_file_max_mb: 1,
            log_file_backups: 10,
            environment: None,
        }
    }

    /// Set the working directory
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set how many instances are spawned
    pub fn with_processes(mut self, number_of_processes: u32) -> Self {
        self.number_of_processes = number_of_processes;
        self
    }

    /// Set the start priority
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Start the program when the daemon starts
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Restart the program when it exits
    pub fn with_auto_restart(mut self, auto_restart: bool) -> Self {
        self.auto_restart = auto_restart;
        self
    }

    /// Set the number of start attempts before giving up
    pub fn with_start_retries(mut self, start_retries: u32) -> Self {
        self.start_retries = start_retries;
        self
    }

    /// Set the signal name used to stop the program
    pub fn with_stop_signal(mut self, stop_signal: impl Into<String>) -> Self {
        self.stop_signal = stop_signal.into();
        self
    }

    /// Run the program as a different user
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the directory for stdout/stderr logs
    pub fn with_log_folder(mut self, log_folder: impl Into<String>) -> Self {
        self.log_folder = log_folder.into();
        self
    }

    /// Set the per-stream log size limit (MB) and backup count
    pub fn with_log_rotation(mut self, max_mb: u32, backups: u32) -> Self {
        self.log_file_max_mb = max_mb;
        self.log_file_backups = backups;
        self
    }

    /// Set an already formatted environment string
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Format key/value pairs into the environment string
    ///
    /// An empty list clears the environment, so no empty `environment=` line is rendered.
    pub fn with_environment_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.environment = format_environment(vars);
        self
    }
}

/// Format environment variables as `KEY="VAL",KEY2="VAL2"`, keeping input order
///
/// Values are quoted but not escaped. Returns `None` for an empty list.
pub fn format_environment<I, K, V>(vars: I) -> Option<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let pairs: Vec<String> = vars
        .into_iter()
        .map(|(key, value)| format!("{}=\"{}\"", key.as_ref(), value.as_ref()))
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join(","))
    }
}
