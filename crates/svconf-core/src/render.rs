use crate::types::{GlobalSettings, ProgramSpec};
use tracing::debug;

/// Socket shared by the HTTP server and the control client
pub const SOCKET_PATH: &str = "/tmp/supervisor.sock";

/// RPC interface factory registered with the daemon
pub const RPC_INTERFACE_FACTORY: &str = "supervisor.rpcinterface:make_main_rpcinterface";

/// Expanded by the daemon to the instance index of each spawned process
pub const PROCESS_NUM_TOKEN: &str = "%(process_num)s";

/// Render a complete supervisor configuration file
///
/// Sections are emitted in a fixed order: socket server, daemon settings,
/// RPC interface, control client, then one program section per entry of
/// `programs` in input order. Values are passed through without validation.
pub fn render(settings: &GlobalSettings, programs: &[ProgramSpec]) -> String {
    debug!("Rendering supervisor config with {} program(s)", programs.len());

    let mut sections = vec![
        unix_http_server_section(),
        supervisord_section(settings),
        rpcinterface_section(),
        supervisorctl_section(),
    ];
    sections.extend(programs.iter().map(program_section));

    let mut text = sections
        .iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    text.push('\n');
    text
}

fn unix_http_server_section() -> Vec<String> {
    vec![
        "[unix_http_server]".to_string(),
        format!("file={}", SOCKET_PATH),
    ]
}

fn supervisord_section(settings: &GlobalSettings) -> Vec<String> {
    vec![
        "[supervisord]".to_string(),
        format!("logfile={}", settings.log_file),
        format!("logfile_maxbytes={}MB", settings.log_file_max_mb),
        format!("logfile_backups={}", settings.log_file_backups),
        format!("loglevel={}", settings.log_level),
        format!("pidfile={}", settings.pidfile),
        "nodaemon=false".to_string(),
        "minfds=1024".to_string(),
        "minprocs=200".to_string(),
        format!("user={}", settings.user),
    ]
}

fn rpcinterface_section() -> Vec<String> {
    vec![
        "[rpcinterface:supervisor]".to_string(),
        format!("supervisor.rpcinterface_factory={}", RPC_INTERFACE_FACTORY),
    ]
}

fn supervisorctl_section() -> Vec<String> {
    vec![
        "[supervisorctl]".to_string(),
        format!("serverurl=unix://{}", SOCKET_PATH),
    ]
}

fn program_section(program: &ProgramSpec) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("[program:{}]", program.name));
    lines.push(format!("command={}", program.command));
    if program.number_of_processes == 1 {
        lines.push(format!("process_name={}", program.name));
    } else {
        lines.push(format!(
            "process_name={}{}",
            program.name, PROCESS_NUM_TOKEN
        ));
    }
    lines.push(format!("numprocs={}", program.number_of_processes));
    lines.push(format!("directory={}", program.directory));

    if let Some(priority) = program.priority {
        lines.push(format!("priority={}", priority));
    }

    lines.push(format!("autostart={}", program.auto_start));
    lines.push(format!("autorestart={}", program.auto_restart));
    lines.push(format!("startretries={}", program.start_retries));
    lines.push(format!("stopsignal={}", program.stop_signal));

    if let Some(user) = program.user.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("user={}", user));
    }

    lines.push("redirect_stderr=false".to_string());

    for stream in ["stdout", "stderr"] {
        lines.push(format!(
            "{stream}_logfile={}/{}.{stream}.{}.log",
            program.log_folder, program.name, PROCESS_NUM_TOKEN
        ));
        lines.push(format!(
            "{stream}_logfile_maxbytes={}MB",
            program.log_file_max_mb
        ));
        lines.push(format!(
            "{stream}_logfile_backups={}",
            program.log_file_backups
        ));
    }

    if let Some(environment) = program.environment.as_deref().filter(|e| !e.is_empty()) {
        lines.push(format!("environment={}", environment));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_settings() -> GlobalSettings {
        GlobalSettings {
            log_file: "/var/log/sv.log".to_string(),
            log_file_max_mb: 10,
            log_file_backups: 3,
            log_level: "info".to_string(),
            pidfile: "/var/run/sv.pid".to_string(),
            user: "deploy".to_string(),
        }
    }

    fn web_program() -> ProgramSpec {
        ProgramSpec {
            name: "web".to_string(),
            command: "/usr/bin/web".to_string(),
            directory: "/srv/web".to_string(),
            number_of_processes: 1,
            priority: None,
            auto_start: true,
            auto_restart: true,
            start_retries: 3,
            stop_signal: "TERM".to_string(),
            user: None,
            log_folder: "/var/log/web".to_string(),
            log_file_max_mb: 5,
            log_file_backups: 2,
            environment: None,
        }
    }

    fn program_sections(text: &str) -> Vec<&str> {
        text.split("\n\n")
            .filter(|section| section.starts_with("[program:"))
            .collect()
    }

    #[test]
    fn test_render_without_programs() {
        let result = render(&scenario_settings(), &[]);

        let expected = "\
[unix_http_server]
file=/tmp/supervisor.sock

[supervisord]
logfile=/var/log/sv.log
logfile_maxbytes=10MB
logfile_backups=3
loglevel=info
pidfile=/var/run/sv.pid
nodaemon=false
minfds=1024
minprocs=200
user=deploy

[rpcinterface:supervisor]
supervisor.rpcinterface_factory=supervisor.rpcinterface:make_main_rpcinterface

[supervisorctl]
serverurl=unix:///tmp/supervisor.sock
";
        assert_eq!(result, expected);
        assert!(!result.contains("[program:"));
    }

    #[test]
    fn test_render_single_program_omits_optional_lines() {
        let result = render(&scenario_settings(), &[web_program()]);

        let sections = program_sections(&result);
        assert_eq!(sections.len(), 1);

        let expected = "\
[program:web]
command=/usr/bin/web
process_name=web
numprocs=1
directory=/srv/web
autostart=true
autorestart=true
startretries=3
stopsignal=TERM
redirect_stderr=false
stdout_logfile=/var/log/web/web.stdout.%(process_num)s.log
stdout_logfile_maxbytes=5MB
stdout_logfile_backups=2
stderr_logfile=/var/log/web/web.stderr.%(process_num)s.log
stderr_logfile_maxbytes=5MB
stderr_logfile_backups=2
";
        assert_eq!(sections[0], expected);
        assert!(!sections[0].contains("priority="));
        assert!(!sections[0].contains("user="));
        assert!(!sections[0].contains("environment="));
    }

    #[test]
    fn test_render_priority_only_when_present() {
        let mut first = web_program();
        first.name = "first".to_string();
        first.priority = Some(10);
        let mut second = web_program();
        second.name = "second".to_string();

        let result = render(&scenario_settings(), &[first, second]);
        let sections = program_sections(&result);

        assert_eq!(sections.len(), 2);
        assert!(sections[0].contains("\npriority=10\n"));
        assert!(!sections[1].contains("priority="));
    }

    #[test]
    fn test_render_user_and_environment_when_present() {
        let program = web_program()
            .with_user("www-data")
            .with_environment("PORT=\"8000\",APP_ENV=\"prod\"");

        let result = render(&scenario_settings(), &[program]);
        let section = program_sections(&result)[0];

        assert!(section.contains("\nuser=www-data\n"));
        assert!(section.ends_with("environment=PORT=\"8000\",APP_ENV=\"prod\"\n"));
    }

    #[test]
    fn test_render_booleans_lowercase() {
        let program = web_program().with_auto_start(true).with_auto_restart(false);

        let result = render(&scenario_settings(), &[program]);
        assert!(result.contains("autostart=true"));
        assert!(result.contains("autorestart=false"));
        assert!(!result.contains("True"));
        assert!(!result.contains("False"));
    }

    #[test]
    fn test_render_multi_instance_naming() {
        let single = ProgramSpec::new("worker", "/usr/bin/worker");
        let result = render(&scenario_settings(), &[single]);
        assert!(result.contains("process_name=worker\n"));
        assert!(result.contains("numprocs=1\n"));

        let multi = ProgramSpec::new("worker", "/usr/bin/worker").with_processes(3);
        let result = render(&scenario_settings(), &[multi]);
        assert!(result.contains("process_name=worker%(process_num)s\n"));
        assert!(result.contains("numprocs=3\n"));
        assert!(result.contains("stdout_logfile=/var/log/worker.stdout.%(process_num)s.log"));
    }

    #[test]
    fn test_render_preserves_program_order() {
        let names = ["zeta", "alpha", "mid"];
        let programs: Vec<ProgramSpec> = names
            .iter()
            .map(|name| ProgramSpec::new(*name, "/bin/true"))
            .collect();

        let result = render(&scenario_settings(), &programs);
        let headers: Vec<&str> = result
            .lines()
            .filter(|line| line.starts_with("[program:"))
            .collect();

        assert_eq!(
            headers,
            vec!["[program:zeta]", "[program:alpha]", "[program:mid]"]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let programs = vec![
            web_program().with_priority(5),
            ProgramSpec::new("worker", "/usr/bin/worker").with_processes(2),
        ];

        let first = render(&scenario_settings(), &programs);
        let second = render(&scenario_settings(), &programs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_passes_values_through() {
        let settings = scenario_settings().with_log_level("LOUD");
        let program = web_program()
            .with_stop_signal("NOT_A_SIGNAL")
            .with_environment("A=\"x,y\"");

        let result = render(&settings, &[program]);
        assert!(result.contains("loglevel=LOUD"));
        assert!(result.contains("stopsignal=NOT_A_SIGNAL"));
        assert!(result.contains("environment=A=\"x,y\""));
    }

    #[test]
    fn test_render_omits_empty_user_and_environment() {
        let program = web_program().with_user("").with_environment("");

        let result = render(&scenario_settings(), &[program]);
        let section = program_sections(&result)[0];

        assert!(!section.contains("user="));
        assert!(!section.contains("environment="));
        assert!(!result.lines().any(|line| line.ends_with('=')));
    }

    #[test]
    fn test_render_priority_zero_and_wide_values() {
        let zero = web_program().with_priority(0);
        let result = render(&scenario_settings(), &[zero]);
        assert!(result.contains("\npriority=0\n"));

        let wide = web_program().with_priority(i64::from(i32::MAX) + 1);
        let result = render(&scenario_settings(), &[wide]);
        assert!(result.contains("\npriority=2147483648\n"));
    }
}
