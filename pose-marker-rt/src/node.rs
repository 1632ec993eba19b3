use std::sync::Arc;
use std::time::Duration;

use zenoh::liveliness::LivelinessToken;
use zenoh::{Result, Session, Wait};

use crate::{
    Builder,
    context::GlobalCounter,
    entity::{EndpointEntity, EntityKind, NodeEntity},
    msg::ZMessage,
    pubsub::{ZPubBuilder, ZSubBuilder},
    timer::ZTimer,
    topic_name,
    type_info::MessageTypeInfo,
};

pub struct ZNode {
    pub entity: NodeEntity,
    session: Arc<Session>,
    counter: Arc<GlobalCounter>,
    _lv_token: LivelinessToken,
}

pub struct ZNodeBuilder {
    pub domain_id: usize,
    pub name: String,
    pub namespace: String,
    pub session: Arc<Session>,
    pub counter: Arc<GlobalCounter>,
}

impl ZNodeBuilder {
    pub fn with_namespace<S: AsRef<str>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.as_ref().to_owned();
        self
    }
}

impl Builder for ZNodeBuilder {
    type Output = ZNode;

    fn build(self) -> Result<ZNode> {
        topic_name::validate_node_name(&self.name)?;
        let namespace = topic_name::normalize_namespace(&self.namespace)?;

        let id = self.counter.increment();
        let node = NodeEntity::new(self.domain_id, self.session.zid(), id, self.name, namespace);
        let lv_token = self
            .session
            .liveliness()
            .declare_token(node.lv_token_key_expr()?)
            .wait()?;
        tracing::info!("Node ready: {}", node.fully_qualified_name());

        Ok(ZNode {
            entity: node,
            session: self.session,
            counter: self.counter,
            _lv_token: lv_token,
        })
    }
}

impl ZNode {
    fn endpoint<T: MessageTypeInfo>(&self, topic: &str, kind: EntityKind) -> EndpointEntity {
        EndpointEntity {
            id: self.counter.increment(),
            node: self.entity.clone(),
            topic: topic.to_string(),
            kind,
            type_info: Some(T::type_info()),
            ..Default::default()
        }
    }

    /// Create a publisher for the given topic
    pub fn create_pub<T>(&self, topic: &str) -> ZPubBuilder<T>
    where
        T: ZMessage + MessageTypeInfo,
    {
        ZPubBuilder {
            entity: self.endpoint::<T>(topic, EntityKind::Publisher),
            session: self.session.clone(),
            _phantom_data: Default::default(),
        }
    }

    /// Create a subscriber for the given topic
    pub fn create_sub<T>(&self, topic: &str) -> ZSubBuilder<T>
    where
        T: ZMessage + MessageTypeInfo,
    {
        ZSubBuilder {
            entity: self.endpoint::<T>(topic, EntityKind::Subscription),
            session: self.session.clone(),
            _phantom_data: Default::default(),
        }
    }

    /// Create a wall timer firing every `period`
    pub fn create_timer(&self, period: Duration) -> ZTimer {
        ZTimer::new(period)
    }
}
