use std::collections::BTreeMap;

use pose_marker_rt::MessageTypeInfo;
use pose_marker_rt::type_info::{Field, FieldType, TypeDescription, TypeId};
use serde::{Deserialize, Serialize};

use crate::builtin_interfaces::Duration;
use crate::geometry_msgs::{Point, Pose, Vector3};
use crate::sensor_msgs::CompressedImage;
use crate::std_msgs::{ColorRGBA, Header};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UVCoordinate {
    pub u: f32,
    pub v: f32,
}

impl MessageTypeInfo for UVCoordinate {
    const TYPE_NAME: &'static str = "visualization_msgs/msg/UVCoordinate";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("u", FieldType::primitive(TypeId::FLOAT32)),
            Field::new("v", FieldType::primitive(TypeId::FLOAT32)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl MessageTypeInfo for MeshFile {
    const TYPE_NAME: &'static str = "visualization_msgs/msg/MeshFile";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("filename", FieldType::primitive(TypeId::STRING)),
            Field::new("data", FieldType::sequence(TypeId::UINT8)),
        ]
    }
}

/// A renderable primitive for RViz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub header: Header,
    pub ns: String,
    pub id: i32,
    pub r#type: i32,
    pub action: i32,
    pub pose: Pose,
    pub scale: Vector3,
    pub color: ColorRGBA,
    /// Zero means forever.
    pub lifetime: Duration,
    pub frame_locked: bool,
    pub points: Vec<Point>,
    pub colors: Vec<ColorRGBA>,
    pub texture_resource: String,
    pub texture: CompressedImage,
    pub uv_coordinates: Vec<UVCoordinate>,
    pub text: String,
    pub mesh_resource: String,
    pub mesh_file: MeshFile,
    pub mesh_use_embedded_materials: bool,
}

impl Marker {
    pub const ARROW: i32 = 0;
    pub const CUBE: i32 = 1;
    pub const SPHERE: i32 = 2;
    pub const CYLINDER: i32 = 3;
    pub const LINE_STRIP: i32 = 4;
    pub const LINE_LIST: i32 = 5;
    pub const CUBE_LIST: i32 = 6;
    pub const SPHERE_LIST: i32 = 7;
    pub const POINTS: i32 = 8;
    pub const TEXT_VIEW_FACING: i32 = 9;
    pub const MESH_RESOURCE: i32 = 10;
    pub const TRIANGLE_LIST: i32 = 11;
    pub const ARROW_STRIP: i32 = 12;

    pub const ADD: i32 = 0;
    pub const MODIFY: i32 = 0;
    pub const DELETE: i32 = 2;
    pub const DELETEALL: i32 = 3;
}

impl MessageTypeInfo for Marker {
    const TYPE_NAME: &'static str = "visualization_msgs/msg/Marker";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("header", FieldType::nested::<Header>()),
            Field::new("ns", FieldType::primitive(TypeId::STRING)),
            Field::new("id", FieldType::primitive(TypeId::INT32)),
            Field::new("type", FieldType::primitive(TypeId::INT32)),
            Field::new("action", FieldType::primitive(TypeId::INT32)),
            Field::new("pose", FieldType::nested::<Pose>()),
            Field::new("scale", FieldType::nested::<Vector3>()),
            Field::new("color", FieldType::nested::<ColorRGBA>()),
            Field::new("lifetime", FieldType::nested::<Duration>()),
            Field::new("frame_locked", FieldType::primitive(TypeId::BOOL)),
            Field::new("points", FieldType::nested_sequence::<Point>()),
            Field::new("colors", FieldType::nested_sequence::<ColorRGBA>()),
            Field::new("texture_resource", FieldType::primitive(TypeId::STRING)),
            Field::new("texture", FieldType::nested::<CompressedImage>()),
            Field::new("uv_coordinates", FieldType::nested_sequence::<UVCoordinate>()),
            Field::new("text", FieldType::primitive(TypeId::STRING)),
            Field::new("mesh_resource", FieldType::primitive(TypeId::STRING)),
            Field::new("mesh_file", FieldType::nested::<MeshFile>()),
            Field::new("mesh_use_embedded_materials", FieldType::primitive(TypeId::BOOL)),
        ]
    }

    fn register_referenced(out: &mut BTreeMap<String, TypeDescription>) {
        Header::register(out);
        Pose::register(out);
        Vector3::register(out);
        ColorRGBA::register(out);
        Duration::register(out);
        Point::register(out);
        CompressedImage::register(out);
        UVCoordinate::register(out);
        MeshFile::register(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_references_every_nested_type() {
        let mut out = BTreeMap::new();
        Marker::register_referenced(&mut out);
        assert_eq!(out.len(), 11);
        assert!(out.contains_key("sensor_msgs/msg/CompressedImage"));
        assert!(out.contains_key("builtin_interfaces/msg/Time"));
        assert!(!out.contains_key(Marker::TYPE_NAME));
    }

    #[test]
    fn default_marker_is_an_arrow_add() {
        let marker = Marker::default();
        assert_eq!(marker.r#type, Marker::ARROW);
        assert_eq!(marker.action, Marker::ADD);
        assert_eq!(marker.lifetime, Duration::default());
    }
}
