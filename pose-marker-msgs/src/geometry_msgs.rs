use std::collections::BTreeMap;

use pose_marker_rt::MessageTypeInfo;
use pose_marker_rt::type_info::{Field, FieldType, TypeDescription, TypeId};
use serde::{Deserialize, Serialize};

use crate::std_msgs::Header;

fn float64_fields(names: &[&str]) -> Vec<Field> {
    names
        .iter()
        .map(|name| Field::new(*name, FieldType::primitive(TypeId::FLOAT64)))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MessageTypeInfo for Point {
    const TYPE_NAME: &'static str = "geometry_msgs/msg/Point";

    fn fields() -> Vec<Field> {
        float64_fields(&["x", "y", "z"])
    }
}

/// Defaults to the identity rotation, as the ROS definition does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

impl MessageTypeInfo for Quaternion {
    const TYPE_NAME: &'static str = "geometry_msgs/msg/Quaternion";

    fn fields() -> Vec<Field> {
        float64_fields(&["x", "y", "z", "w"])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

impl MessageTypeInfo for Pose {
    const TYPE_NAME: &'static str = "geometry_msgs/msg/Pose";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("position", FieldType::nested::<Point>()),
            Field::new("orientation", FieldType::nested::<Quaternion>()),
        ]
    }

    fn register_referenced(out: &mut BTreeMap<String, TypeDescription>) {
        Point::register(out);
        Quaternion::register(out);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseStamped {
    pub header: Header,
    pub pose: Pose,
}

impl MessageTypeInfo for PoseStamped {
    const TYPE_NAME: &'static str = "geometry_msgs/msg/PoseStamped";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("header", FieldType::nested::<Header>()),
            Field::new("pose", FieldType::nested::<Pose>()),
        ]
    }

    fn register_referenced(out: &mut BTreeMap<String, TypeDescription>) {
        Header::register(out);
        Pose::register(out);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl MessageTypeInfo for Vector3 {
    const TYPE_NAME: &'static str = "geometry_msgs/msg/Vector3";

    fn fields() -> Vec<Field> {
        float64_fields(&["x", "y", "z"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orientation_is_identity() {
        let pose = Pose::default();
        assert_eq!(pose.orientation.w, 1.0);
        assert_eq!(pose.position, Point::default());
    }

    #[test]
    fn pose_stamped_references_are_transitive() {
        let mut out = BTreeMap::new();
        PoseStamped::register(&mut out);
        let names: Vec<_> = out.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [
                "builtin_interfaces/msg/Time",
                "geometry_msgs/msg/Point",
                "geometry_msgs/msg/Pose",
                "geometry_msgs/msg/PoseStamped",
                "geometry_msgs/msg/Quaternion",
                "std_msgs/msg/Header",
            ]
        );
    }
}
