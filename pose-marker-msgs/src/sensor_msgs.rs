use std::collections::BTreeMap;

use pose_marker_rt::MessageTypeInfo;
use pose_marker_rt::type_info::{Field, FieldType, TypeDescription, TypeId};
use serde::{Deserialize, Serialize};

use crate::std_msgs::Header;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressedImage {
    pub header: Header,
    /// `jpeg` or `png`, optionally prefixed with the original encoding.
    pub format: String,
    pub data: Vec<u8>,
}

impl MessageTypeInfo for CompressedImage {
    const TYPE_NAME: &'static str = "sensor_msgs/msg/CompressedImage";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("header", FieldType::nested::<Header>()),
            Field::new("format", FieldType::primitive(TypeId::STRING)),
            Field::new("data", FieldType::sequence(TypeId::UINT8)),
        ]
    }

    fn register_referenced(out: &mut BTreeMap<String, TypeDescription>) {
        Header::register(out);
    }
}
