use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use tracing::{debug, info, trace};
use zenoh::bytes::ZBytes;
use zenoh::liveliness::LivelinessToken;
use zenoh::{Result, Session, Wait};

pub use zenoh::sample::Sample;

use crate::Builder;
use crate::attachment::{Attachment, GidArray};
use crate::entity::EndpointEntity;
use crate::msg::{CdrSerdes, ZDeserializer, ZMessage, ZSerializer};
use crate::qos::{QosDurability, QosProfile, QosReliability};
use crate::queue::BoundedQueue;
use crate::topic_name;

/// Resolve the endpoint's topic against its node, in place.
fn qualify(entity: &mut EndpointEntity) -> Result<()> {
    entity.topic =
        topic_name::qualify_topic_name(&entity.topic, &entity.node.namespace, &entity.node.name)?;
    Ok(())
}

pub struct ZPub<T, S = CdrSerdes<T>> {
    pub entity: EndpointEntity,
    sn: AtomicI64,
    gid: GidArray,
    inner: zenoh::pubsub::Publisher<'static>,
    _lv_token: LivelinessToken,
    _phantom_data: PhantomData<(T, S)>,
}

pub struct ZPubBuilder<T, S = CdrSerdes<T>> {
    pub entity: EndpointEntity,
    pub session: Arc<Session>,
    pub _phantom_data: PhantomData<(T, S)>,
}

impl<T, S> ZPubBuilder<T, S> {
    pub fn with_qos(mut self, qos: QosProfile) -> Self {
        self.entity.qos = qos;
        self
    }
}

impl<T, S> Builder for ZPubBuilder<T, S>
where
    T: ZMessage + 'static,
    S: for<'a> ZSerializer<Input<'a> = &'a T> + 'static,
{
    type Output = ZPub<T, S>;

    #[tracing::instrument(name = "pub_build", skip(self), fields(
        topic = %self.entity.topic,
        qos = %self.entity.qos
    ))]
    fn build(mut self) -> Result<Self::Output> {
        qualify(&mut self.entity)?;
        let key_expr = self.entity.topic_key_expr()?;
        debug!("[PUB] Key expression: {}", key_expr);

        // Reliable blocks under congestion, best effort drops
        let congestion_control = match self.entity.qos.reliability {
            QosReliability::Reliable => zenoh::qos::CongestionControl::Block,
            QosReliability::BestEffort => zenoh::qos::CongestionControl::Drop,
        };
        let express = self.entity.qos.durability == QosDurability::TransientLocal;

        let inner = self
            .session
            .declare_publisher(key_expr)
            .congestion_control(congestion_control)
            .express(express)
            .wait()?;

        let lv_token = self
            .session
            .liveliness()
            .declare_token(self.entity.lv_token_key_expr()?)
            .wait()?;
        let gid = self.entity.gid();
        info!("[PUB] Publisher ready: topic={}", self.entity.topic);

        Ok(ZPub {
            entity: self.entity,
            sn: AtomicI64::new(0),
            gid,
            inner,
            _lv_token: lv_token,
            _phantom_data: PhantomData,
        })
    }
}

impl<T, S> ZPub<T, S>
where
    T: ZMessage + 'static,
    S: for<'a> ZSerializer<Input<'a> = &'a T> + 'static,
{
    fn next_attachment(&self) -> ZBytes {
        let sn = self.sn.fetch_add(1, Ordering::Relaxed);
        trace!("[PUB] Attachment sn={}", sn);
        Attachment::new(sn, self.gid).into()
    }

    #[tracing::instrument(name = "publish", skip(self, msg), fields(
        topic = %self.entity.topic,
        payload_len = tracing::field::Empty
    ))]
    pub fn publish(&self, msg: &T) -> Result<()> {
        let payload = S::serialize(msg)?;
        tracing::Span::current().record("payload_len", payload.len());
        self.inner
            .put(payload)
            .attachment(self.next_attachment())
            .wait()
    }

    pub async fn async_publish(&self, msg: &T) -> Result<()> {
        let payload = S::serialize(msg)?;
        self.inner
            .put(payload)
            .attachment(self.next_attachment())
            .await
    }
}

pub struct ZSubBuilder<T, S = CdrSerdes<T>> {
    pub entity: EndpointEntity,
    pub session: Arc<Session>,
    pub _phantom_data: PhantomData<(T, S)>,
}

impl<T, S> ZSubBuilder<T, S> {
    pub fn with_qos(mut self, qos: QosProfile) -> Self {
        self.entity.qos = qos;
        self
    }

    fn build_internal<Q, F>(mut self, handler: F, queue: Option<Arc<BoundedQueue<Q>>>) -> Result<ZSub<T, Q, S>>
    where
        F: Fn(Sample) + Send + Sync + 'static,
    {
        qualify(&mut self.entity)?;
        let key_expr = self.entity.topic_key_expr()?;
        debug!("[SUB] Key expression: {}, qos={}", key_expr, self.entity.qos);

        let inner = self
            .session
            .declare_subscriber(key_expr)
            .callback(handler)
            .wait()?;

        let lv_token = self
            .session
            .liveliness()
            .declare_token(self.entity.lv_token_key_expr()?)
            .wait()?;
        info!("[SUB] Subscriber ready: topic={}", self.entity.topic);

        Ok(ZSub {
            entity: self.entity,
            queue,
            _inner: inner,
            _lv_token: lv_token,
            _phantom_data: PhantomData,
        })
    }

    /// Build a subscriber that hands each decoded message to `callback`.
    ///
    /// The callback runs on a Zenoh thread. Payloads that fail to decode are
    /// logged and dropped.
    pub fn build_with_callback<F>(self, callback: F) -> Result<ZSub<T, (), S>>
    where
        F: Fn(S::Output) + Send + Sync + 'static,
        T: 'static,
        S: for<'a> ZDeserializer<Input<'a> = &'a [u8]> + 'static,
    {
        let topic = self.entity.topic.clone();
        self.build_internal(
            move |sample: Sample| {
                let payload = sample.payload().to_bytes();
                match S::deserialize(&payload[..]) {
                    Ok(msg) => callback(msg),
                    Err(e) => tracing::error!("Dropping sample on {}: {}", topic, e),
                }
            },
            None,
        )
    }
}

impl<T, S> Builder for ZSubBuilder<T, S>
where
    T: ZMessage + 'static,
    S: ZDeserializer + 'static,
{
    type Output = ZSub<T, Sample, S>;

    fn build(self) -> Result<Self::Output> {
        let queue = Arc::new(BoundedQueue::new(self.entity.qos.history.depth()));
        let sink = queue.clone();
        self.build_internal(
            move |sample| {
                if sink.push(sample) {
                    trace!("[SUB] Queue full, dropped oldest sample");
                }
            },
            Some(queue),
        )
    }
}

pub struct ZSub<T, Q, S = CdrSerdes<T>> {
    pub entity: EndpointEntity,
    queue: Option<Arc<BoundedQueue<Q>>>,
    _inner: zenoh::pubsub::Subscriber<()>,
    _lv_token: LivelinessToken,
    _phantom_data: PhantomData<(T, S)>,
}

impl<T, Q, S> ZSub<T, Q, S> {
    fn queue(&self) -> Result<&BoundedQueue<Q>> {
        self.queue
            .as_deref()
            .ok_or_else(|| "Subscriber was built with callback, no queue available".into())
    }

    /// Check if there are messages waiting in the queue
    pub fn is_ready(&self) -> bool {
        self.queue.as_ref().is_some_and(|q| !q.is_empty())
    }
}

impl<T, S> ZSub<T, Sample, S>
where
    S: for<'a> ZDeserializer<Input<'a> = &'a [u8]>,
{
    fn decode(sample: Sample) -> Result<S::Output> {
        let payload = sample.payload().to_bytes();
        Ok(S::deserialize(&payload[..])?)
    }

    /// Block until the next message arrives and decode it
    pub fn recv(&self) -> Result<S::Output> {
        Self::decode(self.queue()?.recv())
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<S::Output> {
        let sample = self
            .queue()?
            .recv_timeout(timeout)
            .ok_or_else(|| zenoh::Error::from("Receive timed out"))?;
        Self::decode(sample)
    }

    pub async fn async_recv(&self) -> Result<S::Output> {
        let sample = self.queue()?.recv_async().await;
        Self::decode(sample)
    }
}
