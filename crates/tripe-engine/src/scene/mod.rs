//! Scene types.
//!
//! Responsibilities:
//! - the `SceneObject` contract (identity, draw, update)
//! - the id-keyed object registry, plain and shared across threads
//! - the renderer-agnostic draw stream objects record into
//! - concrete objects under `scene::objects`

mod cmd;
mod list;
mod object;
mod registry;

pub mod objects;

pub use cmd::{CircleCmd, DrawCmd};
pub use list::{DrawList, ZIndex};
pub use object::{ObjectId, SceneObject};
pub use registry::{ObjectRegistry, SharedRegistry};
