use std::fmt::{self, Display};

use sha2::Digest;
use zenoh::{Result, key_expr::KeyExpr, session::ZenohId};

use crate::{attachment::GidArray, qos::QosProfile};

const EMPTY_NAMESPACE: &str = "%";
const EMPTY_ENCLAVE: &str = "%";
const EMPTY_TOPIC_TYPE: &str = "EMPTY_TOPIC_TYPE";
const EMPTY_TOPIC_HASH: &str = "EMPTY_TOPIC_HASH";
pub const ADMIN_SPACE: &str = "@ros2_lv";

/// RIHS01 type hash (SHA-256 over the canonical type description).
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy)]
pub struct TypeHash(pub [u8; 32]);

impl TypeHash {
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn to_rihs_string(&self) -> String {
        let hex: String = self.0.iter().map(|b| format!("{:02x}", b)).collect();
        format!("RIHS01_{hex}")
    }
}

impl Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rihs_string())
    }
}

/// DDS type name plus type hash, as advertised in key expressions.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct TypeInfo {
    pub name: String,
    pub hash: TypeHash,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, hash: TypeHash) -> Self {
        TypeInfo {
            name: name.into(),
            hash,
        }
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.hash)
    }
}

#[derive(Default, Debug, Hash, strum::EnumString, strum::Display, Eq, PartialEq, Clone, Copy)]
pub enum EntityKind {
    #[default]
    #[strum(serialize = "NN")]
    Node,
    #[strum(serialize = "MP")]
    Publisher,
    #[strum(serialize = "MS")]
    Subscription,
}

#[derive(Default, Debug, Hash, Clone, PartialEq, Eq)]
pub struct NodeEntity {
    pub domain_id: usize,
    pub z_id: ZenohId,
    pub id: usize,
    pub name: String,
    pub namespace: String,
}

fn mangle_name(name: &str) -> String {
    name.replace('/', "%")
}

fn mangled_namespace(namespace: &str) -> String {
    if namespace.is_empty() {
        EMPTY_NAMESPACE.to_string()
    } else {
        mangle_name(namespace)
    }
}

impl NodeEntity {
    pub fn new(
        domain_id: usize,
        z_id: ZenohId,
        id: usize,
        name: String,
        namespace: String,
    ) -> Self {
        Self {
            domain_id,
            z_id,
            id,
            name,
            namespace,
        }
    }

    /// Fully qualified node name, e.g. `/robot1/marker_publisher`.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    // <ADMIN_SPACE>/<domain_id>/<zid>/<nid>/<eid>/<entity_kind>/<enclave>/<namespace>/<node_name>
    fn liveliness_prefix(&self, entity_id: usize, kind: EntityKind) -> String {
        let NodeEntity {
            domain_id,
            z_id,
            id,
            name,
            namespace,
        } = self;
        let namespace = mangled_namespace(namespace);
        format!("{ADMIN_SPACE}/{domain_id}/{z_id}/{id}/{entity_id}/{kind}/{EMPTY_ENCLAVE}/{namespace}/{name}")
    }

    pub fn lv_token_key_expr(&self) -> Result<KeyExpr<'static>> {
        let ke = self.liveliness_prefix(self.id, EntityKind::Node);
        Ok(KeyExpr::try_from(ke)?)
    }
}

#[derive(Default, Debug, Hash, PartialEq, Eq, Clone)]
pub struct EndpointEntity {
    pub id: usize,
    pub node: NodeEntity,
    pub kind: EntityKind,
    pub topic: String,
    pub type_info: Option<TypeInfo>,
    pub qos: QosProfile,
}

impl EndpointEntity {
    fn type_segments(&self) -> String {
        self.type_info
            .as_ref()
            .map_or(format!("{EMPTY_TOPIC_TYPE}/{EMPTY_TOPIC_HASH}"), |x| {
                format!("{}/{}", x.name, x.hash)
            })
    }

    // <domain_id>/<topic_name>/<topic_type>/<topic_type_hash>
    pub fn topic_key_expr(&self) -> Result<KeyExpr<'static>> {
        let topic = self.topic.trim_matches('/');
        let ke = format!("{}/{}/{}", self.node.domain_id, topic, self.type_segments());
        Ok(KeyExpr::try_from(ke)?)
    }

    // <node liveliness prefix>/<topic_name>/<topic_type>/<topic_type_hash>/<topic_qos>
    pub fn lv_token_key_expr(&self) -> Result<KeyExpr<'static>> {
        let ke = format!(
            "{}/{}/{}/{}",
            self.node.liveliness_prefix(self.id, self.kind),
            mangle_name(&self.topic),
            self.type_segments(),
            self.qos.encode()
        );
        Ok(KeyExpr::try_from(ke)?)
    }

    /// Stable 16-byte id derived from the endpoint's liveliness key.
    pub fn gid(&self) -> GidArray {
        let mut gid = GidArray::default();
        let seed = self.lv_token_key_expr().map(|ke| ke.to_string()).unwrap_or_default();
        let hash = sha2::Sha256::digest(seed.as_bytes());
        let len = gid.len();
        gid.copy_from_slice(&hash[..len]);
        gid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(namespace: &str) -> NodeEntity {
        NodeEntity::new(
            0,
            ZenohId::default(),
            1,
            "marker_publisher".to_string(),
            namespace.to_string(),
        )
    }

    fn endpoint(kind: EntityKind) -> EndpointEntity {
        EndpointEntity {
            id: 2,
            node: node(""),
            kind,
            topic: "/marker_topic".to_string(),
            type_info: Some(TypeInfo::new(
                "visualization_msgs::msg::dds_::Marker_",
                TypeHash::zero(),
            )),
            qos: QosProfile::default(),
        }
    }

    #[test]
    fn rihs_string_is_lowercase_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xcc;
        bytes[31] = 0x0f;
        let s = TypeHash(bytes).to_rihs_string();
        assert_eq!(s.len(), "RIHS01_".len() + 64);
        assert!(s.starts_with("RIHS01_cc00"));
        assert!(s.ends_with("000f"));
        assert_eq!(TypeHash(bytes).to_string(), s);
    }

    #[test]
    fn topic_key_expr_strips_slashes() {
        let ke = endpoint(EntityKind::Publisher).topic_key_expr().unwrap();
        assert_eq!(
            ke.as_str(),
            format!(
                "0/marker_topic/visualization_msgs::msg::dds_::Marker_/{}",
                TypeHash::zero()
            )
        );
    }

    #[test]
    fn node_liveliness_uses_empty_namespace_marker() {
        let ke = node("").lv_token_key_expr().unwrap();
        assert!(ke.as_str().starts_with("@ros2_lv/0/"));
        assert!(ke.as_str().ends_with("/1/1/NN/%/%/marker_publisher"));

        let ke = node("/robot1").lv_token_key_expr().unwrap();
        assert!(ke.as_str().ends_with("/NN/%/%robot1/marker_publisher"));
    }

    #[test]
    fn endpoint_liveliness_carries_topic_and_qos() {
        let ke = endpoint(EntityKind::Subscription).lv_token_key_expr().unwrap();
        assert!(ke.as_str().contains("/1/2/MS/%/%/marker_publisher/%marker_topic/"));
        assert!(ke.as_str().ends_with(&QosProfile::default().encode()));
    }

    #[test]
    fn gid_differs_per_kind() {
        let publisher = endpoint(EntityKind::Publisher);
        let subscriber = endpoint(EntityKind::Subscription);
        assert_eq!(publisher.gid(), publisher.clone().gid());
        assert_ne!(publisher.gid(), subscriber.gid());
    }
}
