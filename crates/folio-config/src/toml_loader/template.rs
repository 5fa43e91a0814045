//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Folio Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Theme mode, accent color and background selection live in
# preferences.toml next to this file.

[background]
# density = 500          # 10-5000, particle count
# speed = 1.0            # 0.0-5.0
# interactive = true     # pointer pushes particles and nodes
# opacity = 0.6          # 0.0-1.0
# secondary_color = "#333333"

[background.video]
# path = "assets/background-video.mp4"
# max_retries = 3        # 0-10
# retry_delay_ms = 2000  # 0-60000
# playback_rate = 0.75   # 0.1-4.0

[background.gradient]
# angle = 135            # 0-360
# cycle_secs = 15.0      # 1-600

[render]
# width = 1280
# height = 720
# pixel_ratio = 1.0      # 0.5-4.0
# fps = 60               # 1-240

[contact]
# bind = "127.0.0.1:5000"
"##
    .to_string()
}
