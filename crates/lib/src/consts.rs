//! Fixed values baked into the generated packaging artifacts.

/// Manifest file name, relative to the platform directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Desktop entry file name, relative to the platform directory.
pub const DESKTOP_FILENAME: &str = "cordova.desktop";

/// AppArmor policy file name, relative to the platform directory.
pub const APPARMOR_FILENAME: &str = "apparmor.json";

/// Suffix appended to an artifact path while it is staged.
pub const STAGING_SUFFIX: &str = ".tmp";

/// Framework written to the manifest when none is set yet.
pub const DEFAULT_FRAMEWORK: &str = "ubuntu-sdk-13.10";

/// Icon used when the descriptor has no usable icon.
pub const DEFAULT_ICON: &str = "qmlscene";

/// Command line launched by the desktop entry.
pub const DESKTOP_EXEC: &str = "./cordova-ubuntu www/";

/// Policy groups every application is granted, in this order.
pub const DEFAULT_POLICY_GROUPS: [&str; 2] = ["networking", "audio"];

pub const POLICY_VERSION: f64 = 1.2;

/// Name of the hook table under `manifest.hooks`.
pub const HOOK_NAME: &str = "cordova";

/// Platform name used for the `merges/<platform>` override layer.
pub const PLATFORM_NAME: &str = "ubuntu";

/// Marker directory that identifies a project root.
pub const PROJECT_MARKER_DIR: &str = ".cordova";

/// Directory names stripped from an assembled asset tree.
pub const VCS_DIRS: [&str; 4] = [".svn", ".git", ".hg", ".bzr"];
