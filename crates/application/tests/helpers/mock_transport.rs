#![allow(dead_code)]

use async_trait::async_trait;
use mdns_responder_application::ports::DatagramTransport;
use mdns_responder_domain::DomainError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport fed from a queue of datagrams; an exhausted queue reads as
/// an empty datagram.
#[derive(Clone, Default)]
pub struct MockTransport {
    incoming: Arc<Mutex<VecDeque<Vec<u8>>>>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    fail_send: Arc<Mutex<bool>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_datagram(&self, bytes: Vec<u8>) {
        self.incoming.lock().unwrap().push_back(bytes);
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_fail_send(&self, fail: bool) {
        *self.fail_send.lock().unwrap() = fail;
    }
}

#[async_trait]
impl DatagramTransport for MockTransport {
    async fn receive(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        let next = self.incoming.lock().unwrap().pop_front();
        let Some(datagram) = next else {
            return Ok(0);
        };
        let n = datagram.len().min(buf.len());
        buf[..n].copy_from_slice(&datagram[..n]);
        Ok(n)
    }

    async fn send_multicast(&self, bytes: &[u8]) -> Result<(), DomainError> {
        if *self.fail_send.lock().unwrap() {
            return Err(DomainError::Transport("network unreachable".to_string()));
        }
        self.sent.lock().unwrap().push(bytes.to_vec());
        Ok(())
    }
}

/// Single-question query for `name` (dotted, no trailing dot).
pub fn query_for(name: &str, qtype: u16) -> Vec<u8> {
    let mut packet = vec![0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0];
    for label in name.split('.') {
        packet.push(label.len() as u8);
        packet.extend(label.as_bytes());
    }
    packet.push(0);
    packet.extend(qtype.to_be_bytes());
    packet.extend(1u16.to_be_bytes());
    packet
}
