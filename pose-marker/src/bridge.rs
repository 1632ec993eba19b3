//! Last-pose cache republished as an RViz cube marker.
//!
//! Poses arrive on Zenoh callback threads while ticks come from the timer
//! task, so the cache sits behind a mutex. A tick copies the pose out under
//! the lock and builds and publishes after releasing it.

use std::future::Future;

use parking_lot::Mutex;
use pose_marker_msgs::{
    builtin_interfaces::{Duration, Time},
    geometry_msgs::{Pose, PoseStamped, Vector3},
    std_msgs::{ColorRGBA, Header},
    visualization_msgs::Marker,
};
use pose_marker_rt::{Result, pubsub::ZPub};
use tracing::{info, warn};

/// Frame every marker is expressed in.
pub const MAP_FRAME: &str = "map";
/// Box dimensions in meters.
pub const MARKER_SCALE: Vector3 = Vector3::new(1.0, 2.0, 0.5);
/// Opaque red.
pub const MARKER_COLOR: ColorRGBA = ColorRGBA::new(1.0, 0.0, 0.0, 1.0);
/// Matches the tick period so a marker fades once the poses stop.
pub const MARKER_LIFETIME: Duration = Duration::new(1, 0);
pub const TICK_PERIOD: std::time::Duration = std::time::Duration::from_secs(1);

/// Where finished markers go.
pub trait MarkerSink {
    fn publish_marker(&self, marker: &Marker) -> impl Future<Output = Result<()>> + Send;
}

impl MarkerSink for ZPub<Marker> {
    async fn publish_marker(&self, marker: &Marker) -> Result<()> {
        self.async_publish(marker).await
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing received yet, nothing published.
    NoPose,
    Published(Marker),
}

pub struct PoseMarkerBridge<P> {
    sink: P,
    pose: Mutex<Option<Pose>>,
}

impl<P: MarkerSink> PoseMarkerBridge<P> {
    pub fn new(sink: P) -> Self {
        Self {
            sink,
            pose: Mutex::new(None),
        }
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn cached_pose(&self) -> Option<Pose> {
        *self.pose.lock()
    }

    /// Replace the cached pose. The newest pose always wins.
    pub fn on_pose_received(&self, pose: Pose) {
        info!("Received pose message");
        *self.pose.lock() = Some(pose);
    }

    pub async fn on_tick(&self) -> Result<TickOutcome> {
        info!("Publish marker called");
        self.on_tick_at(Time::now()).await
    }

    /// Publish a marker stamped with `now` at the cached pose, if any.
    pub async fn on_tick_at(&self, now: Time) -> Result<TickOutcome> {
        let Some(pose) = self.cached_pose() else {
            warn!("No pose message available");
            return Ok(TickOutcome::NoPose);
        };

        let marker = cube_marker(&stamped_pose(pose, now));
        self.sink.publish_marker(&marker).await?;
        info!("Published marker");
        Ok(TickOutcome::Published(marker))
    }
}

pub fn stamped_pose(pose: Pose, stamp: Time) -> PoseStamped {
    PoseStamped {
        header: Header {
            stamp,
            frame_id: MAP_FRAME.to_string(),
        },
        pose,
    }
}

/// Red 1 x 2 x 0.5 box at the stamped pose, living for one second.
pub fn cube_marker(pose: &PoseStamped) -> Marker {
    Marker {
        header: pose.header.clone(),
        r#type: Marker::CUBE,
        action: Marker::ADD,
        pose: pose.pose,
        scale: MARKER_SCALE,
        color: MARKER_COLOR,
        lifetime: MARKER_LIFETIME,
        ..Default::default()
    }
}
