//! Keep-last queue backing queued subscribers.
//!
//! When full, the oldest element is dropped so readers always see the most
//! recent `capacity` samples, matching ROS 2 history depth.

use std::collections::VecDeque;
use std::time::Duration;

use event_listener::Event;
use parking_lot::{Condvar, Mutex};

pub struct BoundedQueue<T> {
    data: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    event: Event,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// `usize::MAX` makes the queue effectively unbounded (KeepAll).
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            not_empty: Condvar::new(),
            event: Event::new(),
            capacity,
        }
    }

    /// Returns `true` when an older element had to be dropped.
    pub fn push(&self, item: T) -> bool {
        let mut data = self.data.lock();
        let dropped = data.len() >= self.capacity && data.pop_front().is_some();
        data.push_back(item);
        drop(data);
        self.not_empty.notify_one();
        self.event.notify(1);
        dropped
    }

    pub fn recv(&self) -> T {
        let mut data = self.data.lock();
        loop {
            if let Some(item) = data.pop_front() {
                return item;
            }
            self.not_empty.wait(&mut data);
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        let mut data = self.data.lock();
        if data.is_empty() {
            let _ = self.not_empty.wait_for(&mut data, timeout);
        }
        data.pop_front()
    }

    pub fn try_recv(&self) -> Option<T> {
        self.data.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    /// Cancel-safe: dropping the future never loses an element.
    pub async fn recv_async(&self) -> T {
        loop {
            // Listen before checking so a concurrent push is not missed
            let listener = self.event.listen();
            if let Some(item) = self.try_recv() {
                return item;
            }
            listener.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn keeps_the_newest_elements() {
        let queue = BoundedQueue::new(2);
        assert!(!queue.push(1));
        assert!(!queue.push(2));
        assert!(queue.push(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.try_recv(), Some(2));
        assert_eq!(queue.try_recv(), Some(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn recv_timeout_expires_on_empty_queue() {
        let queue = BoundedQueue::<u8>::new(1);
        assert_eq!(queue.recv_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn recv_wakes_on_push_from_other_thread() {
        let queue = Arc::new(BoundedQueue::new(4));
        let producer = queue.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            producer.push(42);
        });
        assert_eq!(queue.recv(), 42);
        handle.join().unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn recv_async_wakes_on_push() {
        let queue = Arc::new(BoundedQueue::new(4));
        let producer = queue.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            producer.push("pose");
        });
        assert_eq!(queue.recv_async().await, "pose");
    }
}
