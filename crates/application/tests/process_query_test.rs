mod helpers;

use helpers::{query_for, MockTransport};
use mdns_responder_application::use_cases::ProcessQueryUseCase;
use mdns_responder_domain::{DomainError, Responder, ScanStatus};
use std::net::Ipv4Addr;
use std::sync::Arc;

const TYPE_A: u16 = 1;
const TYPE_PTR: u16 = 12;

fn responder() -> Responder {
    let mut responder = Responder::new(Ipv4Addr::new(192, 168, 1, 20));
    responder.set_hostname("desk").unwrap();
    responder
        .add_service("tcp", "http", 80, "My Printer", &[] as &[&str])
        .unwrap();
    responder
}

fn use_case(transport: &MockTransport, buffer_size: usize) -> ProcessQueryUseCase {
    ProcessQueryUseCase::new(responder(), Arc::new(transport.clone()), buffer_size)
}

#[tokio::test]
async fn test_answer_is_sent_to_group() {
    let transport = MockTransport::new();
    transport.push_datagram(query_for("desk.local", TYPE_A));
    let mut use_case = use_case(&transport, 512);

    let report = use_case.execute().await.unwrap().unwrap();

    assert_eq!(report.answers, 1);
    assert_eq!(report.additional, 1);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].len(), report.response_len);
    assert_eq!(&sent[0][2..4], &[0x84, 0x00]);
    assert_eq!(&sent[0][6..8], &[0, 1]);
}

#[tokio::test]
async fn test_unknown_name_sends_nothing() {
    let transport = MockTransport::new();
    transport.push_datagram(query_for("laptop.local", TYPE_A));
    let mut use_case = use_case(&transport, 512);

    let report = use_case.execute().await.unwrap().unwrap();

    assert_eq!(report.questions, 1);
    assert!(!report.has_response());
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_empty_read_is_skipped() {
    let transport = MockTransport::new();
    let mut use_case = use_case(&transport, 512);

    assert!(use_case.execute().await.unwrap().is_none());
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_buffer_reused_across_cycles() {
    let transport = MockTransport::new();
    transport.push_datagram(query_for("_http._tcp.local", TYPE_PTR));
    transport.push_datagram(query_for("desk.local", TYPE_A));
    transport.push_datagram(query_for("_http._tcp.local", TYPE_PTR));
    let mut use_case = use_case(&transport, 512);

    for _ in 0..3 {
        use_case.execute().await.unwrap();
    }

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0], sent[2]);
    assert_ne!(sent[0], sent[1]);
}

#[tokio::test]
async fn test_truncated_response_still_sent() {
    let transport = MockTransport::new();
    transport.push_datagram(query_for("_http._tcp.local", TYPE_PTR));
    let mut use_case = use_case(&transport, 48);

    let report = use_case.execute().await.unwrap().unwrap();

    assert!(report.truncated);
    assert_eq!(transport.sent()[0].len(), 48);
}

#[tokio::test]
async fn test_underflow_reported() {
    let transport = MockTransport::new();
    let mut packet = query_for("desk.local", TYPE_A);
    packet.truncate(packet.len() - 3);
    transport.push_datagram(packet);
    let mut use_case = use_case(&transport, 512);

    let report = use_case.execute().await.unwrap().unwrap();

    assert_eq!(report.status, ScanStatus::BufferUnderflow { offset: 24 });
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_send_failure_propagates() {
    let transport = MockTransport::new();
    transport.set_fail_send(true);
    transport.push_datagram(query_for("desk.local", TYPE_A));
    let mut use_case = use_case(&transport, 512);

    let result = use_case.execute().await;

    assert!(matches!(result, Err(DomainError::Transport(_))));
}
