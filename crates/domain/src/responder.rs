//! Name/record registry and the per-datagram query cycle.

mod registry;
mod validation;

pub use registry::Registry;

use std::net::Ipv4Addr;

use crate::dns_record::{RecordData, RecordId, ResourceRecord, TxtEntry};
use crate::errors::DomainError;
use crate::name::{InstanceRecords, LabelId, LabelKind, NameLabel};
use crate::wire::{ByteCursor, QueryHeader, ResponseHeader, QUESTION_TRAILER_LEN};
use validation::{validate_hostname, validate_instance, validate_service_label};

/// Identifies the service instance created by [`Responder::add_service`],
/// so TXT entries can be attached to it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceHandle {
    instance: LabelId,
    txt: RecordId,
}

impl ServiceHandle {
    pub fn instance(&self) -> LabelId {
        self.instance
    }
}

#[derive(Debug, Clone, Copy)]
struct Host {
    label: LabelId,
    a: RecordId,
}

/// How far question parsing got in one datagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStatus {
    #[default]
    Complete,
    /// A question's type/class did not fit in the datagram; later questions
    /// were skipped, earlier ones still count.
    BufferUnderflow { offset: usize },
}

/// Outcome of one [`Responder::respond`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub header: QueryHeader,
    pub questions: u16,
    pub matched: u16,
    pub answers: u16,
    pub additional: u16,
    pub status: ScanStatus,
    /// The response did not fit the buffer and was cut short.
    pub truncated: bool,
    pub response_len: usize,
}

impl CycleReport {
    pub fn has_response(&self) -> bool {
        self.response_len > 0
    }
}

/// mDNS responder for one host and its DNS-SD services.
///
/// Registration happens first and is done through `&mut self`; once the
/// responder is handed to the query loop nothing else can reach it.
#[derive(Debug, Clone)]
pub struct Responder {
    address: Ipv4Addr,
    registry: Registry,
    host: Option<Host>,
}

impl Responder {
    pub fn new(address: Ipv4Addr) -> Self {
        Self {
            address,
            registry: Registry::new(),
            host: None,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn hostname(&self) -> Option<String> {
        self.host
            .map(|host| self.registry.labels().to_text(host.label))
    }

    pub fn set_hostname(&mut self, name: &str) -> Result<(), DomainError> {
        if self.host.is_some() {
            return Err(DomainError::DuplicateHostname);
        }
        validate_hostname(name)?;

        let key = format!("{}.local", name.to_ascii_lowercase());
        let local = self.registry.local();
        let label = self
            .registry
            .insert_name(key, NameLabel::new(name, Some(local), false, LabelKind::Plain)?);

        let a = self
            .registry
            .push_record(ResourceRecord::new(label, RecordData::Address(self.address)));
        let nsec = self
            .registry
            .push_record(ResourceRecord::new(label, RecordData::HostNsec));
        *self.registry.labels_mut().get_mut(label).kind_mut() = LabelKind::Host { a, nsec };

        self.host = Some(Host { label, a });
        Ok(())
    }

    /// Registers `instance._service._protocol.local` with PTR, SRV, TXT and
    /// NSEC records. An already registered `_service._protocol` is shared,
    /// and each subtype gets a `_subtype._sub._service._protocol` PTR.
    pub fn add_service<S: AsRef<str>>(
        &mut self,
        protocol: &str,
        service_type: &str,
        port: u16,
        instance: &str,
        subtypes: &[S],
    ) -> Result<ServiceHandle, DomainError> {
        let host = self.host.ok_or(DomainError::HostnameNotSet)?;
        validate_service_label("protocol", protocol)?;
        validate_service_label("service type", service_type)?;
        validate_instance(instance)?;
        for subtype in subtypes {
            validate_service_label("subtype", subtype.as_ref())?;
        }

        let protocol_text = format!("_{}", protocol);
        let service_text = format!("_{}", service_type);
        let protocol_key = format!("{}.local", protocol_text).to_ascii_lowercase();
        let service_key = format!("{}.{}", service_text, protocol_key).to_ascii_lowercase();
        let instance_key = format!("{}.{}", instance.replace('.', "\\."), service_key);
        if self.registry.contains(&instance_key) {
            return Err(DomainError::DuplicateServiceInstance(instance_key));
        }

        let local = self.registry.local();
        let protocol_label = self.registry.tail(protocol_key, &protocol_text, local)?;
        let service_label = match self.registry.lookup(&service_key) {
            Some(id) => id,
            None => self.service_type_label(service_key.clone(), &service_text, protocol_label, host)?,
        };

        let instance_label = self.registry.insert_name(
            instance_key,
            NameLabel::new(instance, Some(service_label), true, LabelKind::Plain)?,
        );

        let ptr = self.registry.push_record(ResourceRecord::new(
            service_label,
            RecordData::Pointer {
                instance: instance_label,
            },
        ));
        let srv = self.registry.push_record(ResourceRecord::new(
            instance_label,
            RecordData::Service {
                host: host.label,
                port,
            },
        ));
        let txt = self.registry.push_record(ResourceRecord::new(
            instance_label,
            RecordData::Text {
                entries: Vec::new(),
            },
        ));
        let nsec = self
            .registry
            .push_record(ResourceRecord::new(instance_label, RecordData::InstanceNsec));

        *self.registry.labels_mut().get_mut(instance_label).kind_mut() =
            LabelKind::ServiceInstance {
                srv,
                txt,
                nsec,
                a: host.a,
            };
        self.attach_instance(service_label, InstanceRecords { ptr, srv, txt });

        for subtype in subtypes {
            let subtype_text = format!("_{}", subtype.as_ref());
            let sub_key = format!("_sub.{}", service_key);
            let subtype_key = format!("{}.{}", subtype_text, sub_key).to_ascii_lowercase();

            let sub_label = self.registry.tail(sub_key, "_sub", service_label)?;
            let subtype_label = match self.registry.lookup(&subtype_key) {
                Some(id) => id,
                None => self.service_type_label(subtype_key, &subtype_text, sub_label, host)?,
            };
            if self.has_instance(subtype_label, srv) {
                continue;
            }

            let sub_ptr = self.registry.push_record(ResourceRecord::new(
                subtype_label,
                RecordData::Pointer {
                    instance: instance_label,
                },
            ));
            self.attach_instance(
                subtype_label,
                InstanceRecords {
                    ptr: sub_ptr,
                    srv,
                    txt,
                },
            );
        }

        Ok(ServiceHandle {
            instance: instance_label,
            txt,
        })
    }

    /// Appends `key[=value]` to the TXT record of `service`.
    pub fn add_txt_entry(
        &mut self,
        service: ServiceHandle,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), DomainError> {
        let entry = TxtEntry::new(key, value)?;
        let records = self.registry.records_mut();
        if !records.contains(service.txt) {
            return Err(DomainError::InvalidTxtEntry(
                "service handle does not belong to this responder".to_string(),
            ));
        }
        records.get_mut(service.txt).push_txt_entry(entry)
    }

    /// Answers the query datagram loaded in `cursor`, leaving the response
    /// (possibly empty) written into the same cursor.
    ///
    /// Per-packet state on names and records is reset before returning,
    /// whether or not a response was produced.
    pub fn respond(&mut self, cursor: &mut ByteCursor) -> CycleReport {
        let header = QueryHeader::read(cursor);
        let mut report = CycleReport {
            header,
            ..CycleReport::default()
        };

        if header.has_questions() {
            self.scan_questions(cursor, &mut report);
        }

        cursor.clear();

        let records = self.registry.records();
        report.answers = saturating_count(records.answer_count());
        report.additional = saturating_count(records.additional_count());

        if report.answers > 0 {
            ResponseHeader {
                ancount: report.answers,
                arcount: report.additional,
            }
            .write(cursor);
            self.registry.write_sections(cursor);
        }

        self.registry.reset();

        report.truncated = cursor.overflowed();
        report.response_len = cursor.written().len();
        report
    }

    fn scan_questions(&mut self, cursor: &mut ByteCursor, report: &mut CycleReport) {
        while report.questions < report.header.qdcount && cursor.available() > 0 {
            report.questions += 1;
            let matched = self.registry.find(cursor);

            if cursor.available() < QUESTION_TRAILER_LEN {
                report.status = ScanStatus::BufferUnderflow {
                    offset: cursor.position(),
                };
                return;
            }
            let qtype = cursor.read_u16().unwrap_or_default();
            let qclass = cursor.read_u16().unwrap_or_default();

            if let Some(label) = matched {
                report.matched += 1;
                self.registry.apply_question(label, qtype, qclass);
            }
        }
    }

    fn service_type_label(
        &mut self,
        key: String,
        text: &str,
        next: LabelId,
        host: Host,
    ) -> Result<LabelId, DomainError> {
        let label = NameLabel::new(
            text,
            Some(next),
            false,
            LabelKind::ServiceType {
                a: host.a,
                instances: Vec::new(),
            },
        )?;
        Ok(self.registry.insert_name(key, label))
    }

    fn attach_instance(&mut self, service: LabelId, records: InstanceRecords) {
        if let LabelKind::ServiceType { instances, .. } =
            self.registry.labels_mut().get_mut(service).kind_mut()
        {
            instances.push(records);
        }
    }

    fn has_instance(&self, service: LabelId, srv: RecordId) -> bool {
        match self.registry.labels().get(service).kind() {
            LabelKind::ServiceType { instances, .. } => {
                instances.iter().any(|instance| instance.srv == srv)
            }
            _ => false,
        }
    }
}

fn saturating_count(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}
