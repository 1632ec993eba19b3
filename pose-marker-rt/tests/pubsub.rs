use std::sync::{Arc, Mutex};
use std::time::Duration;

use pose_marker_rt::{
    Builder,
    context::{ZContext, ZContextBuilder},
    qos::{QosHistory, QosProfile},
    type_info::{Field, FieldType, TypeId},
    MessageTypeInfo,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestMessage {
    data: Vec<u8>,
    counter: u64,
}

impl MessageTypeInfo for TestMessage {
    const TYPE_NAME: &'static str = "test_msgs/msg/TestMessage";

    fn fields() -> Vec<Field> {
        vec![
            Field::new("data", FieldType::sequence(TypeId::UINT8)),
            Field::new("counter", FieldType::primitive(TypeId::UINT64)),
        ]
    }
}

fn isolated_context() -> ZContext {
    ZContextBuilder::default()
        .disable_multicast_scouting()
        .build()
        .expect("Failed to create context")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_basic_pubsub() {
    let ctx = isolated_context();
    let node = ctx
        .create_node("test_node")
        .build()
        .expect("Failed to create node");

    let publisher = node
        .create_pub::<TestMessage>("/test_topic")
        .build()
        .unwrap();
    let subscriber = node
        .create_sub::<TestMessage>("/test_topic")
        .build()
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;

    let msg = TestMessage {
        data: vec![1, 2, 3, 4, 5],
        counter: 42,
    };
    publisher.publish(&msg).unwrap();

    let received = subscriber.recv_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(received, msg);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_relative_topic_resolves_against_namespace() {
    let ctx = isolated_context();
    let node = ctx
        .create_node("ns_node")
        .with_namespace("robot1")
        .build()
        .unwrap();

    let publisher = node.create_pub::<TestMessage>("chatter").build().unwrap();
    let subscriber = node
        .create_sub::<TestMessage>("/robot1/chatter")
        .build()
        .unwrap();
    assert_eq!(publisher.entity.topic, "/robot1/chatter");

    tokio::time::sleep(Duration::from_millis(100)).await;

    let msg = TestMessage {
        data: vec![],
        counter: 7,
    };
    publisher.async_publish(&msg).await.unwrap();
    let received = subscriber.async_recv().await.unwrap();
    assert_eq!(received.counter, 7);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_callback_subscriber() {
    let ctx = isolated_context();
    let node = ctx.create_node("callback_node").build().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscriber = node
        .create_sub::<TestMessage>("/callback_topic")
        .build_with_callback(move |msg: TestMessage| {
            sink.lock().unwrap().push(msg.counter);
        })
        .unwrap();
    assert!(!subscriber.is_ready());

    let publisher = node
        .create_pub::<TestMessage>("/callback_topic")
        .build()
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    for counter in 0..3 {
        publisher
            .publish(&TestMessage {
                data: vec![0xAB],
                counter,
            })
            .unwrap();
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_keep_last_drops_oldest() {
    let ctx = isolated_context();
    let node = ctx.create_node("depth_node").build().unwrap();

    let publisher = node
        .create_pub::<TestMessage>("/depth_topic")
        .build()
        .unwrap();
    let subscriber = node
        .create_sub::<TestMessage>("/depth_topic")
        .with_qos(QosProfile {
            history: QosHistory::KeepLast(2),
            ..Default::default()
        })
        .build()
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    for counter in 0..5 {
        publisher
            .publish(&TestMessage {
                data: vec![],
                counter,
            })
            .unwrap();
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    let first = subscriber.recv_timeout(Duration::from_millis(100)).unwrap();
    let second = subscriber.recv_timeout(Duration::from_millis(100)).unwrap();
    assert_eq!((first.counter, second.counter), (3, 4));
    assert!(subscriber.recv_timeout(Duration::from_millis(50)).is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_invalid_node_name_is_rejected() {
    let ctx = isolated_context();
    assert!(ctx.create_node("bad-name").build().is_err());
    assert!(ctx.create_node("").build().is_err());
}
