use crate::ports::DatagramTransport;
use mdns_responder_domain::{ByteCursor, CycleReport, DomainError, Responder, ScanStatus};
use std::sync::Arc;
use tracing::{debug, warn};

/// One receive → respond → send cycle over a single reusable buffer.
pub struct ProcessQueryUseCase {
    responder: Responder,
    transport: Arc<dyn DatagramTransport>,
    cursor: ByteCursor,
}

impl ProcessQueryUseCase {
    pub fn new(
        responder: Responder,
        transport: Arc<dyn DatagramTransport>,
        buffer_size: usize,
    ) -> Self {
        Self {
            responder,
            transport,
            cursor: ByteCursor::new(buffer_size),
        }
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Handles the next datagram. Returns `None` when the transport handed
    /// back an empty read.
    pub async fn execute(&mut self) -> Result<Option<CycleReport>, DomainError> {
        let received = self
            .transport
            .receive(self.cursor.receive_buffer())
            .await?;
        if received == 0 {
            return Ok(None);
        }
        self.cursor.set_received(received);

        let report = self.responder.respond(&mut self.cursor);

        if let ScanStatus::BufferUnderflow { offset } = report.status {
            warn!(
                offset,
                received,
                questions = report.questions,
                "Question cut short by end of datagram"
            );
        }
        if report.truncated {
            warn!(
                answers = report.answers,
                additional = report.additional,
                capacity = self.cursor.capacity(),
                "Response exceeded buffer, sending truncated"
            );
        }

        if report.has_response() {
            self.transport
                .send_multicast(self.cursor.written())
                .await?;
        }

        debug!(
            received,
            questions = report.questions,
            matched = report.matched,
            answers = report.answers,
            additional = report.additional,
            sent = report.response_len,
            "Query processed"
        );
        Ok(Some(report))
    }
}
