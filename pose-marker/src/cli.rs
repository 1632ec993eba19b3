use std::path::PathBuf;

use pose_marker_rt::context::ZContextBuilder;

#[derive(Debug, Clone, clap::Parser)]
#[command(
    name = "pose_marker",
    about = "Republishes the latest pose as a red cube marker once per second"
)]
pub struct Args {
    /// Zenoh session mode (peer, client, router). Zenoh defaults to peer.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Zenoh endpoint to connect to (e.g., tcp/localhost:7447)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Zenoh configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// ROS domain ID
    #[arg(long, default_value_t = 0)]
    pub domain_id: usize,

    /// Node namespace
    #[arg(long, default_value = "")]
    pub namespace: String,

    /// Topic to read poses from
    #[arg(long, default_value = "pose_communication")]
    pub pose_topic: String,

    /// Topic to publish markers on
    #[arg(long, default_value = "marker_topic")]
    pub marker_topic: String,
}

impl Args {
    pub fn context_builder(&self) -> ZContextBuilder {
        let mut builder = ZContextBuilder::default().with_domain_id(self.domain_id);
        if let Some(mode) = &self.mode {
            builder = builder.with_mode(mode.as_str());
        }
        if let Some(path) = &self.config {
            builder = builder.with_config_file(path);
        }
        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_connect_endpoints([endpoint.as_str()]);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_the_ros_node() {
        let args = Args::parse_from(["pose_marker"]);
        assert!(args.mode.is_none());
        assert_eq!(args.domain_id, 0);
        assert_eq!(args.namespace, "");
        assert_eq!(args.pose_topic, "pose_communication");
        assert_eq!(args.marker_topic, "marker_topic");
        assert!(args.endpoint.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn topics_can_be_remapped() {
        let args = Args::parse_from([
            "pose_marker",
            "--pose-topic",
            "/robot/pose",
            "--marker-topic",
            "viz",
            "--domain-id",
            "7",
            "-e",
            "tcp/127.0.0.1:7447",
        ]);
        assert_eq!(args.pose_topic, "/robot/pose");
        assert_eq!(args.marker_topic, "viz");
        assert_eq!(args.domain_id, 7);
        assert_eq!(args.endpoint.as_deref(), Some("tcp/127.0.0.1:7447"));
    }

    #[test]
    fn config_file_mode_is_not_overridden_by_default() {
        let args = Args::parse_from(["pose_marker", "--config", "client.json5"]);
        let builder = format!("{:?}", args.context_builder());
        assert!(builder.contains("client.json5"));
        assert!(!builder.contains("\"mode\""));
    }

    #[test]
    fn explicit_mode_is_applied() {
        let args = Args::parse_from(["pose_marker", "-m", "client"]);
        let builder = format!("{:?}", args.context_builder());
        assert!(builder.contains("(\"mode\", String(\"client\"))"));
    }

    #[test]
    fn rejects_non_numeric_domain() {
        assert!(Args::try_parse_from(["pose_marker", "--domain-id", "x"]).is_err());
    }
}
