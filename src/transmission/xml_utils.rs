use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::{GlogDate, OtmError};

fn xml_io(e: std::io::Error) -> OtmError {
    OtmError::Xml(format!("XML write error: {e}"))
}

/// Writer for OTM GLog XML. Every element lives in the `otm:` namespace, so
/// element names are passed unprefixed and qualified here.
pub(crate) struct GlogWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl GlogWriter {
    pub fn new() -> Result<Self, OtmError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(quick_xml::events::BytesDecl::new(
                "1.0",
                Some("UTF-8"),
                None,
            )))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, OtmError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| OtmError::Xml(format!("XML UTF-8 error: {e}")))
    }

    fn qualified(name: &str) -> String {
        format!("otm:{name}")
    }

    pub fn start(&mut self, name: &str) -> Result<&mut Self, OtmError> {
        let elem = BytesStart::new(Self::qualified(name));
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, OtmError> {
        let mut elem = BytesStart::new(Self::qualified(name));
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end(&mut self, name: &str) -> Result<&mut Self, OtmError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(Self::qualified(name))))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// Element with text content. Reserved characters are escaped by the
    /// underlying writer.
    pub fn text(&mut self, name: &str, text: &str) -> Result<&mut Self, OtmError> {
        self.start(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end(name)
    }

    /// Element with no content (OTM schemas use empty marker blocks).
    pub fn empty(&mut self, name: &str) -> Result<&mut Self, OtmError> {
        self.start(name)?;
        self.end(name)
    }

    /// The ubiquitous OTM Gid block:
    /// `<wrapper><Gid>[<DomainName>…</DomainName>]<Xid>…</Xid></Gid></wrapper>`.
    pub fn gid(
        &mut self,
        wrapper: &str,
        domain: Option<&str>,
        xid: &str,
    ) -> Result<&mut Self, OtmError> {
        self.start(wrapper)?;
        self.start("Gid")?;
        if let Some(domain) = domain {
            self.text("DomainName", domain)?;
        }
        self.text("Xid", xid)?;
        self.end("Gid")?;
        self.end(wrapper)
    }

    /// A location reference:
    /// `<wrapper><LocationRef><LocationGid><Gid>…</Gid></LocationGid></LocationRef></wrapper>`.
    pub fn location_ref(
        &mut self,
        wrapper: &str,
        domain: &str,
        xid: &str,
    ) -> Result<&mut Self, OtmError> {
        self.start(wrapper)?;
        self.start("LocationRef")?;
        self.gid("LocationGid", Some(domain), xid)?;
        self.end("LocationRef")?;
        self.end(wrapper)
    }

    /// A timestamp element wrapping a `GLogDate`.
    pub fn glog_date(&mut self, wrapper: &str, date: &GlogDate) -> Result<&mut Self, OtmError> {
        self.start(wrapper)?;
        self.text("GLogDate", &date.format())?;
        self.end(wrapper)
    }
}

/// Canonical decimal rendering for XML output: normalized, no exponent, no
/// separators, trailing fractional zeros stripped ("9720.00" → "9720").
pub fn format_decimal(d: Decimal) -> String {
    d.normalize().to_string()
}
