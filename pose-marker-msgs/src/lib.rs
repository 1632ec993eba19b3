//! ROS 2 message types used by the pose marker node.
//!
//! Field order and types follow the ROS 2 interface definitions exactly, so
//! the CDR encoding and the RIHS01 type hashes agree with any other ROS 2
//! participant.

pub mod builtin_interfaces;
pub mod geometry_msgs;
pub mod sensor_msgs;
pub mod std_msgs;
pub mod visualization_msgs;

pub use pose_marker_rt::MessageTypeInfo;
pub use pose_marker_rt::entity::{TypeHash, TypeInfo};
