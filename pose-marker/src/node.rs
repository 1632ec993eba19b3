use std::future::Future;
use std::sync::Arc;

use pose_marker_msgs::{geometry_msgs::Pose, visualization_msgs::Marker};
use pose_marker_rt::{
    Builder, Result,
    context::ZContext,
    qos::{QosHistory, QosProfile},
};
use tracing::{error, info};

use crate::bridge::{PoseMarkerBridge, TICK_PERIOD};

pub const NODE_NAME: &str = "marker_publisher";

/// History depth for both topics.
pub const QUEUE_DEPTH: usize = 10;

/// Where the node lives and which topics it bridges.
#[derive(Debug, Clone)]
pub struct NodeOptions {
    pub namespace: String,
    pub pose_topic: String,
    pub marker_topic: String,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            pose_topic: "pose_communication".to_string(),
            marker_topic: "marker_topic".to_string(),
        }
    }
}

impl From<&crate::cli::Args> for NodeOptions {
    fn from(args: &crate::cli::Args) -> Self {
        Self {
            namespace: args.namespace.clone(),
            pose_topic: args.pose_topic.clone(),
            marker_topic: args.marker_topic.clone(),
        }
    }
}

/// Run the marker publisher node until `shutdown` resolves.
///
/// Tick failures are logged and the node keeps going; only setup errors
/// end the run early.
pub async fn run_marker_publisher<F>(ctx: ZContext, options: NodeOptions, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let node = ctx
        .create_node(NODE_NAME)
        .with_namespace(&options.namespace)
        .build()?;

    let qos = QosProfile {
        history: QosHistory::KeepLast(QUEUE_DEPTH),
        ..Default::default()
    };
    let publisher = node
        .create_pub::<Marker>(&options.marker_topic)
        .with_qos(qos)
        .build()?;
    let bridge = Arc::new(PoseMarkerBridge::new(publisher));

    let _subscriber = {
        let bridge = bridge.clone();
        node.create_sub::<Pose>(&options.pose_topic)
            .with_qos(qos)
            .build_with_callback(move |pose: Pose| bridge.on_pose_received(pose))?
    };

    let mut timer = node.create_timer(TICK_PERIOD);
    info!(
        "Bridging {} -> {} every {:?}",
        options.pose_topic, options.marker_topic, TICK_PERIOD
    );

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = timer.tick() => {
                if let Err(e) = bridge.on_tick().await {
                    error!("Failed to publish marker: {e}");
                }
            }
            _ = &mut shutdown => {
                info!("Shutting down {}", NODE_NAME);
                break;
            }
        }
    }

    Ok(())
}
