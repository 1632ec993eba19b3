use std::time::{SystemTime, UNIX_EPOCH};

use pose_marker_rt::MessageTypeInfo;
use pose_marker_rt::type_info::{Field, FieldType, TypeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

impl Time {
    pub const fn new(sec: i32, nanosec: u32) -> Self {
        Self { sec, nanosec }
    }

    /// Wall clock time since the UNIX epoch.
    ///
    /// A clock set before the epoch reads as zero.
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            sec: since_epoch.as_secs() as i32,
            nanosec: since_epoch.subsec_nanos(),
        }
    }
}

impl MessageTypeInfo for Time {
    const TYPE_NAME: &'static str = "builtin_interfaces/msg/Time";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("sec", FieldType::primitive(TypeId::INT32)),
            Field::new("nanosec", FieldType::primitive(TypeId::UINT32)),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub sec: i32,
    pub nanosec: u32,
}

impl Duration {
    pub const fn new(sec: i32, nanosec: u32) -> Self {
        Self { sec, nanosec }
    }
}

impl MessageTypeInfo for Duration {
    const TYPE_NAME: &'static str = "builtin_interfaces/msg/Duration";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("sec", FieldType::primitive(TypeId::INT32)),
            Field::new("nanosec", FieldType::primitive(TypeId::UINT32)),
        ]
    }
}
