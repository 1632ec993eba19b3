//! Caches the last `geometry_msgs/Pose` seen on `pose_communication` and
//! republishes it once per second as a red cube `visualization_msgs/Marker`
//! on `marker_topic`.

pub mod bridge;
pub mod cli;
pub mod node;

pub use bridge::{MarkerSink, PoseMarkerBridge, TickOutcome, cube_marker};
pub use pose_marker_rt::Result;
