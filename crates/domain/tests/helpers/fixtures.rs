#![allow(dead_code)]

use mdns_responder_domain::{ByteCursor, CycleReport, Responder, ServiceHandle};
use std::net::Ipv4Addr;

pub const DESK_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 20);

pub const TYPE_A: u16 = 1;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_SRV: u16 = 33;
pub const TYPE_NSEC: u16 = 47;
pub const TYPE_ANY: u16 = 255;
pub const CLASS_IN: u16 = 1;

/// Responder for `desk.local` with no services.
pub fn desk_responder() -> Responder {
    let mut responder = Responder::new(DESK_ADDRESS);
    responder.set_hostname("desk").unwrap();
    responder
}

/// `desk.local` plus `My Printer._http._tcp.local` on port 80.
pub fn printer_responder() -> (Responder, ServiceHandle) {
    let mut responder = desk_responder();
    let handle = responder
        .add_service("tcp", "http", 80, "My Printer", &[] as &[&str])
        .unwrap();
    (responder, handle)
}

/// Runs one cycle over `query` and returns the report with the response
/// bytes.
pub fn exchange(responder: &mut Responder, query: &[u8], capacity: usize) -> (CycleReport, Vec<u8>) {
    let mut cursor = ByteCursor::new(capacity);
    cursor.load(query);
    let report = responder.respond(&mut cursor);
    (report, cursor.written().to_vec())
}
