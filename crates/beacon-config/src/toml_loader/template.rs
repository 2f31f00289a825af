//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Beacon Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[chat]
# base_url = "http://localhost:8000"   # overridden by BEACON_API_URL
# request_timeout_secs = 45            # 1-600
# cooldown_secs = 15                   # 0-3600
# countdown_tick_ms = 500              # 50-10000
# max_input_chars = 250                # 1-10000
# connect_timeout_secs = 10            # 1-120

[storage]
# persist = true
# history_key = "chatHistory"
# directory = "/path/to/history"       # default: <data_dir>/beacon

[logging]
# level = "info"                       # trace, debug, info, warn, error
"##
}
