// Shader and effect property names shared by the animators and the render adapters.

pub const DISSOLVE_AMOUNT: &str = "dissolve_amount";
pub const NOISE_SCALE: &str = "noise_scale";
pub const DISSOLVE_COLOR: &str = "dissolve_color";
pub const ALBEDO: &str = "albedo";

pub const EFFECT_BASE_COLOR: &str = "base_color";
pub const EFFECT_DURATION: &str = "duration";
pub const EFFECT_MESH: &str = "mesh";

pub const TRAIL_MAIN_COLOR: &str = "main_color";
pub const TRAIL_FRESNEL_POWER: &str = "fresnel_power";
pub const TRAIL_ALPHA: &str = "alpha";
