mod info;
mod render;
mod shells;

pub use info::cmd_info;
pub use render::{PhaseArg, RenderOptions, cmd_render};
pub use shells::cmd_shells;
