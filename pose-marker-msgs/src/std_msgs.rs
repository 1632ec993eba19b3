use std::collections::BTreeMap;

use pose_marker_rt::MessageTypeInfo;
use pose_marker_rt::type_info::{Field, FieldType, TypeDescription, TypeId};
use serde::{Deserialize, Serialize};

use crate::builtin_interfaces::Time;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

impl MessageTypeInfo for Header {
    const TYPE_NAME: &'static str = "std_msgs/msg/Header";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("stamp", FieldType::nested::<Time>()),
            Field::new("frame_id", FieldType::primitive(TypeId::STRING)),
        ]
    }

    fn register_referenced(out: &mut BTreeMap<String, TypeDescription>) {
        Time::register(out);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRGBA {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRGBA {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl MessageTypeInfo for ColorRGBA {
    const TYPE_NAME: &'static str = "std_msgs/msg/ColorRGBA";

    fn fields() -> Vec<Field> {
        ["r", "g", "b", "a"]
            .into_iter()
            .map(|name| Field::new(name, FieldType::primitive(TypeId::FLOAT32)))
            .collect()
    }
}
