//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# R3ÆLƎR client configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# base_url = "http://localhost:3000/api"
# connect_timeout_ms = 10000   # 100-60000

[chat]
# max_attempts = 3             # 1-10, first try included
# attempt_timeout_ms = 8000    # 100-120000
# initial_backoff_ms = 1000    # 0-60000, doubles per retry
# max_backoff_ms = 30000
# welcome_message = "R3ÆLƎR TƎCH™ Authorization complete. Welcome to R3ÆLƎR AI."

[voice]
# enabled = true
# output_enabled = false
# rate = 0.9                   # 0.1-10.0
# pitch = 0.8                  # 0.0-2.0
# volume = 0.8                 # 0.0-1.0
# lang = "en-US"
# preferred_voices = ["Google", "Microsoft", "Alex"]

[storage]
# token_path = "/path/to/auth_token"

[logging]
# level = "INFO"               # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
