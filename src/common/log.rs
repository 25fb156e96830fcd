//! Logging backend emitting JSON lines.
//!
//! Everything in the crate logs through the `log` facade; this module only
//! installs the `env_logger` sink with the documented line schema.

use std::io::Write;

use serde_json::json;

use crate::common::config::AppCfg;

/// Install the JSON-line logger. Safe to call more than once.
pub fn init(cfg: &AppCfg) {
    let _ = env_logger::Builder::new()
        .parse_filters(&cfg.log_filter)
        .format(|buf, record| {
            let line = json!({
                "ts": buf.timestamp_millis().to_string(),
                "level": record.level().as_str(),
                "mod": record.target(),
                "msg": record.args().to_string(),
            });
            writeln!(buf, "{line}")
        })
        .try_init();
}
