//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SG_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use scenegroup_core::{Material, ToggleState, Vec3};
use scenegroup_render::pipeline::SceneLights;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Scene contents
    #[serde(default)]
    pub scene: SceneConfig,
    /// Group rotation
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Control panel configuration
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SG_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SG_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SG_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Starting values of the panel flags
    pub fn initial_toggles(&self) -> ToggleState {
        ToggleState {
            group_objects: self.scene.group_objects,
            rotate_group: self.animation.rotate_group,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Scene Group".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub position: [f32; 3],
    /// Point the camera is aimed at once, on startup and reset
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 5.0],
            look_at: [0.0, 0.0, 0.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Scene contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Cube center
    pub cube_position: [f32; 3],
    /// Cube side length
    pub cube_size: f32,
    /// Face colours as 0xRRGGBB in +X, -X, +Y, -Y, +Z, -Z order
    pub cube_face_colors: [u32; 6],
    /// Sphere center
    pub sphere_position: [f32; 3],
    pub sphere_radius: f32,
    /// [width segments, height segments]
    pub sphere_segments: [u32; 2],
    /// Sphere colour as 0xRRGGBB
    pub sphere_color: u32,
    /// Start with the cube and sphere under the group
    pub group_objects: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cube_position: [-1.5, 0.0, 0.0],
            cube_size: 1.0,
            cube_face_colors: [0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff, 0x00ffff],
            sphere_position: [2.0, 0.0, 0.0],
            sphere_radius: 0.5,
            sphere_segments: [32, 32],
            sphere_color: 0x800080,
            group_objects: true,
        }
    }
}

impl SceneConfig {
    pub fn cube_materials(&self) -> Vec<Material> {
        self.cube_face_colors.iter().map(|&c| Material::from_hex(c)).collect()
    }

    pub fn sphere_material(&self) -> Material {
        Material::from_hex(self.sphere_color)
    }
}

/// Group rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Start with the group spinning
    pub rotate_group: bool,
    /// Radians added to each axis per frame
    pub rotation_step: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotate_group: false,
            rotation_step: scenegroup_core::ROTATION_STEP,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub point_light_color: [f32; 3],
    pub point_light_intensity: f32,
    pub point_light_position: [f32; 3],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.5,
            point_light_color: [1.0, 1.0, 1.0],
            point_light_intensity: 20.0,
            point_light_position: [3.0, 3.0, 3.0],
        }
    }
}

impl RenderingConfig {
    /// Light setup for the renderer
    pub fn lights(&self) -> SceneLights {
        SceneLights {
            ambient_color: self.ambient_color,
            ambient_intensity: self.ambient_intensity,
            point_color: self.point_light_color,
            point_intensity: self.point_light_intensity,
            point_position: Vec3::from_array(self.point_light_position),
        }
    }
}

/// Control panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Position sliders span [-range, range]
    pub position_range: f32,
    /// Log the whole panel once at startup
    pub print_panel_on_start: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            position_range: 10.0,
            print_panel_on_start: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log each panel edit at info level
    pub log_panel_edits: bool,
    /// Log a frame summary every N frames (0 = never)
    pub frame_log_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_panel_edits: true,
            frame_log_interval: 0,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
