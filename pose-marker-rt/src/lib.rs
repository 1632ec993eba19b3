//! # pose-marker-rt: a small Zenoh-native ROS 2 runtime
//!
//! Provides the pieces a single ROS 2 style node needs on top of
//! [Zenoh](https://zenoh.io): a context, nodes, typed publishers and
//! subscribers speaking CDR, a wall timer, and the rmw_zenoh key expression
//! and liveliness conventions so the node shows up in the ROS graph.
//!
//! ```rust,ignore
//! use pose_marker_rt::{Builder, context::ZContextBuilder};
//!
//! let ctx = ZContextBuilder::default().build()?;
//! let node = ctx.create_node("talker").build()?;
//! let publisher = node.create_pub::<MyMsg>("/chatter").build()?;
//! publisher.publish(&msg)?;
//! ```

pub mod attachment;
pub mod context;
pub mod entity;
pub mod msg;
pub mod node;
pub mod pubsub;
pub mod qos;
pub mod queue;
pub mod timer;
pub mod topic_name;
pub mod type_info;

pub use entity::{TypeHash, TypeInfo};
pub use type_info::MessageTypeInfo;
pub use zenoh::Result;

/// Builds a configured object, consuming the builder.
///
/// Every builder in this crate implements it; bring it into scope to call
/// `.build()`.
pub trait Builder {
    type Output;
    fn build(self) -> Result<Self::Output>;
}
