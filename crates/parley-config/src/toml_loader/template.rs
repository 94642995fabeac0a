//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Parley Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[backend]
# base_url = "https://claude.ai"   # chat service or mirroring gateway
# session_key = ""                 # or set PARLEY_SESSION_KEY
# session_data = ""                # gateway session-data cookie, or PARLEY_SESSION_DATA
# proxy = ""                       # e.g. "http://127.0.0.1:7890"
# connect_timeout_secs = 10        # 1-120
# request_timeout_secs = 300       # 10-3600

[session]
# model = "claude-sonnet-4-20250514"   # append "-think" for extended reasoning
# reasoning = "unset"                  # unset, off, extended
# locale = "en-US"
# timezone = "America/New_York"
# stream = true
# delete_after_completion = true

[logging]
# level = "INFO"                   # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
