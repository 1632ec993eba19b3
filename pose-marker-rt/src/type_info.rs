//! ROS 2 type descriptions and RIHS01 type hashing.
//!
//! A message type describes its fields with RIHS01 type ids. The type hash is
//! the SHA-256 of the description serialized as JSON with Python's default
//! separators (`", "` and `": "`), together with every referenced type sorted
//! by name. Default values and constants take no part in the hash.

use std::collections::BTreeMap;
use std::io;

use serde::Serialize;
use sha2::Digest;

use crate::entity::{TypeHash, TypeInfo};

/// RIHS01 field type ids.
///
/// Single values use the base id; fixed arrays add 48, bounded sequences 96
/// and unbounded sequences 144.
pub struct TypeId;

impl TypeId {
    pub const NESTED_TYPE: u8 = 1;
    pub const INT8: u8 = 2;
    pub const UINT8: u8 = 3;
    pub const INT16: u8 = 4;
    pub const UINT16: u8 = 5;
    pub const INT32: u8 = 6;
    pub const UINT32: u8 = 7;
    pub const INT64: u8 = 8;
    pub const UINT64: u8 = 9;
    pub const FLOAT32: u8 = 10;
    pub const FLOAT64: u8 = 11;
    pub const BOOL: u8 = 15;
    pub const BYTE: u8 = 16;
    pub const STRING: u8 = 17;

    const ARRAY_OFFSET: u8 = 48;
    const BOUNDED_SEQUENCE_OFFSET: u8 = 96;
    const UNBOUNDED_SEQUENCE_OFFSET: u8 = 144;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldType {
    pub type_id: u8,
    pub capacity: u64,
    pub string_capacity: u64,
    pub nested_type_name: String,
}

impl FieldType {
    pub fn primitive(type_id: u8) -> Self {
        Self {
            type_id,
            capacity: 0,
            string_capacity: 0,
            nested_type_name: String::new(),
        }
    }

    /// `T[]` of a primitive.
    pub fn sequence(type_id: u8) -> Self {
        Self::primitive(type_id + TypeId::UNBOUNDED_SEQUENCE_OFFSET)
    }

    /// `T[N]` of a primitive.
    pub fn array(type_id: u8, capacity: u64) -> Self {
        Self {
            capacity,
            ..Self::primitive(type_id + TypeId::ARRAY_OFFSET)
        }
    }

    /// `T[<=N]` of a primitive.
    pub fn bounded_sequence(type_id: u8, capacity: u64) -> Self {
        Self {
            capacity,
            ..Self::primitive(type_id + TypeId::BOUNDED_SEQUENCE_OFFSET)
        }
    }

    pub fn nested<T: MessageTypeInfo>() -> Self {
        Self {
            nested_type_name: T::TYPE_NAME.to_string(),
            ..Self::primitive(TypeId::NESTED_TYPE)
        }
    }

    pub fn nested_sequence<T: MessageTypeInfo>() -> Self {
        Self {
            nested_type_name: T::TYPE_NAME.to_string(),
            ..Self::sequence(TypeId::NESTED_TYPE)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Matches `type_description_interfaces/msg/IndividualTypeDescription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescription {
    pub type_name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Serialize)]
struct TypeDescriptionMsg<'a> {
    type_description: &'a TypeDescription,
    referenced_type_descriptions: Vec<&'a TypeDescription>,
}

/// Type identity of a ROS message.
pub trait MessageTypeInfo {
    /// ROS interface name, e.g. `geometry_msgs/msg/Pose`.
    const TYPE_NAME: &'static str;

    fn fields() -> Vec<Field>;

    /// Insert the descriptions of every type this one refers to.
    fn register_referenced(_out: &mut BTreeMap<String, TypeDescription>) {}

    fn type_description() -> TypeDescription {
        TypeDescription {
            type_name: Self::TYPE_NAME.to_string(),
            fields: Self::fields(),
        }
    }

    /// Insert this type and, transitively, its references.
    fn register(out: &mut BTreeMap<String, TypeDescription>) {
        if out.contains_key(Self::TYPE_NAME) {
            return;
        }
        out.insert(Self::TYPE_NAME.to_string(), Self::type_description());
        Self::register_referenced(out);
    }

    /// DDS-mangled name used in key expressions, e.g.
    /// `geometry_msgs::msg::dds_::Pose_`.
    fn dds_name() -> String {
        let mut parts = Self::TYPE_NAME.rsplitn(2, '/');
        let name = parts.next().unwrap_or_default();
        let package = parts.next().unwrap_or_default().replace('/', "::");
        format!("{package}::dds_::{name}_")
    }

    fn type_hash() -> TypeHash {
        let mut referenced = BTreeMap::new();
        Self::register_referenced(&mut referenced);
        calculate_hash(&Self::type_description(), referenced.values())
    }

    fn type_info() -> TypeInfo {
        TypeInfo::new(Self::dds_name(), Self::type_hash())
    }
}

/// Python `json.dumps` separators: `", "` between items and `": "` after keys.
struct RosJsonFormatter;

impl serde_json::ser::Formatter for RosJsonFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

pub fn to_ros2_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, RosJsonFormatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Compute the RIHS01 hash. `referenced` must already be sorted by type name.
pub fn calculate_hash<'a>(
    description: &'a TypeDescription,
    referenced: impl IntoIterator<Item = &'a TypeDescription>,
) -> TypeHash {
    let msg = TypeDescriptionMsg {
        type_description: description,
        referenced_type_descriptions: referenced.into_iter().collect(),
    };
    // Plain structs of strings and integers cannot fail to serialize
    let json = to_ros2_json(&msg).unwrap_or_default();
    TypeHash(sha2::Sha256::digest(json.as_bytes()).into())
}
