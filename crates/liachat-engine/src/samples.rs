//! Canned data backing the simulated engine.

use crate::format::QueryRows;

pub const HELP_TEXT: &str = "I'm here to help! I can execute OS commands, run security \
queries with osquery, or just chat. Try asking me to 'show running processes', \
'list files', or 'show security dashboard'.";

pub const PROCESSES_SQL: &str = "SELECT pid, name, cmdline FROM processes LIMIT 10;";

pub const LISTENING_PORTS_SQL: &str =
    "SELECT port, protocol, address FROM listening_ports LIMIT 10;";

pub const LIST_COMMAND: &str = "ls -la";

pub const DIRECTORY_LISTING: &str = "total 48\n\
drwxr-xr-x  8 user  staff   256 Dec  6 10:30 .\n\
drwxr-xr-x  5 user  staff   160 Dec  5 14:20 ..\n\
-rw-r--r--  1 user  staff  1234 Dec  6 09:15 app.py";

pub fn processes() -> QueryRows {
    let mut rows = QueryRows::new(&["pid", "name", "cmdline"]);
    rows.push_row(&["1", "systemd", "/sbin/init"]);
    rows.push_row(&["234", "chrome", "/opt/google/chrome/chrome"]);
    rows.push_row(&["567", "python3", "python3 app.py"]);
    rows.push_row(&["890", "firefox", "/usr/lib/firefox/firefox"]);
    rows.push_row(&["1234", "code", "/usr/share/code/code"]);
    rows
}

pub fn listening_ports() -> QueryRows {
    let mut rows = QueryRows::new(&["port", "protocol", "address"]);
    rows.push_row(&["22", "TCP", "0.0.0.0"]);
    rows.push_row(&["80", "TCP", "0.0.0.0"]);
    rows.push_row(&["443", "TCP", "0.0.0.0"]);
    rows.push_row(&["3000", "TCP", "127.0.0.1"]);
    rows
}
