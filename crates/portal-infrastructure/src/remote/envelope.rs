// ============================================================================
// Portal Infrastructure - SOAP Envelope
// File: crates/portal-infrastructure/src/remote/envelope.rs
// ============================================================================
//! Request envelopes and reply parsing for the legacy SOAP service

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

use portal_core::error::RemoteFault;
use portal_core::SecurityContext;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Fault code or detail element names that mean the session or the credentials were refused
const AUTH_FAULT_MARKERS: [&str; 4] = ["session", "authenticat", "unauthori", "logon"];

/// Minimal element tree of a reply (namespace prefixes dropped)
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Depth-first search, self included
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name.eq_ignore_ascii_case(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Leaf → string, repeated child names → array, otherwise object
    pub fn to_value(&self) -> Value {
        if self.children.is_empty() {
            return match self.text.as_str() {
                "" => Value::Null,
                text => Value::String(text.to_string()),
            };
        }

        let mut map = Map::new();
        for child in &self.children {
            let value = child.to_value();
            match map.get_mut(&child.name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }
        Value::Object(map)
    }
}

pub fn security_context_xml(context: &SecurityContext) -> String {
    format!(
        "<sc><SessionId>{}</SessionId><IsAuthenticated>{}</IsAuthenticated></sc>",
        escape(context.session_id.as_str()),
        context.authenticated
    )
}

/// Serialize named parameters as child elements
pub fn params_xml(params: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (name, value) in params {
        write_value(&mut out, name, value);
    }
    out
}

fn write_value(out: &mut String, name: &str, value: &Value) {
    match value {
        Value::Null => out.push_str(&format!("<{}/>", name)),
        Value::Array(items) => {
            for item in items {
                write_value(out, name, item);
            }
        }
        Value::Object(fields) => {
            out.push_str(&format!("<{}>", name));
            for (child, child_value) in fields {
                write_value(out, child, child_value);
            }
            out.push_str(&format!("</{}>", name));
        }
        Value::String(s) => out.push_str(&format!("<{0}>{1}</{0}>", name, escape(s.as_str()))),
        other => out.push_str(&format!("<{0}>{1}</{0}>", name, other)),
    }
}

pub fn request(namespace: &str, operation: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:soap="{env}"><soap:Body>"#,
            r#"<{op} xmlns="{ns}">{body}</{op}>"#,
            r#"</soap:Body></soap:Envelope>"#
        ),
        env = SOAP_ENV_NS,
        op = operation,
        ns = escape(namespace),
        body = body
    )
}

pub fn parse(xml: &str) -> Result<XmlElement, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(XmlElement::new(
                String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            )),
            Ok(Event::Empty(e)) => {
                let element = XmlElement::new(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(t)) => {
                if let Some(top) = stack.last_mut() {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| "unbalanced closing tag".to_string())?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(format!("malformed XML at {}: {}", reader.buffer_position(), e)),
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }
    root.ok_or_else(|| "empty document".to_string())
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// First element inside `Body`, or the fault it carries
pub fn body_payload(envelope: &XmlElement) -> Result<&XmlElement, RemoteFault> {
    let body = envelope
        .find("Body")
        .ok_or_else(|| RemoteFault::transport("reply has no SOAP Body"))?;
    let payload = body
        .children
        .first()
        .ok_or_else(|| RemoteFault::transport("reply Body is empty"))?;

    if payload.name == "Fault" {
        return Err(classify_fault(payload));
    }
    Ok(payload)
}

/// Classify a `Fault` by its structure.
///
/// A typed detail element (`<NotFoundFault>`) decides on its own: it is an
/// authentication fault only when its name refers to the session or the logon.
/// Without one, the fault code's local part decides the same way. Free text in
/// `faultstring` and nested detail content never affect the classification.
pub fn classify_fault(fault: &XmlElement) -> RemoteFault {
    let text_of = |name: &str| fault.child(name).map(|c| c.text.clone()).unwrap_or_default();
    let fault_code = text_of("faultcode");
    let code_name = fault_code.rsplit(':').next().unwrap_or_default().trim().to_string();
    let message = match text_of("faultstring") {
        s if s.is_empty() => "remote fault".to_string(),
        s => s,
    };
    let detail = fault.child("detail").filter(|d| !d.children.is_empty() || !d.text.is_empty());
    let detail_element = detail.and_then(|d| d.children.first());

    let authentication = match detail_element {
        Some(element) if element.name.ends_with("Fault") => names_session_or_logon(&element.name),
        _ => names_session_or_logon(&code_name),
    };
    if authentication {
        return RemoteFault::Authentication { message };
    }

    let code = detail_element
        .map(|element| element.name.trim_end_matches("Fault").to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or(code_name);

    RemoteFault::Business {
        code,
        message,
        detail: detail.map(XmlElement::to_value),
    }
}

fn names_session_or_logon(name: &str) -> bool {
    let name = name.to_lowercase();
    AUTH_FAULT_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Value of an operation reply: the `<Op>Result` element when present
pub fn result_value(payload: &XmlElement) -> Value {
    match payload.children.as_slice() {
        [only] if only.name.ends_with("Result") => only.to_value(),
        _ => payload.to_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::SessionId;
    use serde_json::json;

    fn envelope(body: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><s:Envelope xmlns:s="{}"><s:Body>{}</s:Body></s:Envelope>"#,
            SOAP_ENV_NS, body
        )
    }

    #[test]
    fn test_request_escapes_parameters() {
        let mut params = Map::new();
        params.insert("Description".into(), json!("pipes & <leaks>"));
        params.insert("Page".into(), json!(2));
        let context = SecurityContext {
            session_id: SessionId::from("abc"),
            authenticated: true,
        };

        let body = format!("{}{}", security_context_xml(&context), params_xml(&params));
        let xml = request("http://tempuri.org/", "GetClaims", &body);

        assert!(xml.contains("<SessionId>abc</SessionId><IsAuthenticated>true</IsAuthenticated>"));
        assert!(xml.contains("<Description>pipes &amp; &lt;leaks&gt;</Description>"));
        assert!(xml.contains("<Page>2</Page>"));
        assert!(parse(&xml).is_ok());
    }

    #[test]
    fn test_result_value_collects_repeated_records() {
        let xml = envelope(
            "<GetClaimsResponse><GetClaimsResult>\
             <Claim><Id>CLM001</Id></Claim><Claim><Id>CLM002</Id></Claim>\
             </GetClaimsResult></GetClaimsResponse>",
        );
        let root = parse(&xml).unwrap();
        let payload = body_payload(&root).unwrap();

        assert_eq!(
            result_value(payload),
            json!({"Claim": [{"Id": "CLM001"}, {"Id": "CLM002"}]})
        );
    }

    fn classify(body: &str) -> RemoteFault {
        let root = parse(&envelope(body)).unwrap();
        body_payload(&root).unwrap_err()
    }

    #[test]
    fn test_session_detail_element_is_authentication() {
        let fault = classify(
            "<s:Fault><faultcode>s:Client</faultcode><faultstring>Access denied</faultstring>\
             <detail><InvalidSessionFault><SessionId>abc</SessionId></InvalidSessionFault></detail></s:Fault>",
        );

        assert_eq!(fault, RemoteFault::authentication("Access denied"));
    }

    #[test]
    fn test_session_fault_code_is_authentication() {
        let fault = classify(
            "<s:Fault><faultcode>a:SessionExpired</faultcode>\
             <faultstring>The session has expired</faultstring></s:Fault>",
        );

        assert_eq!(fault, RemoteFault::authentication("The session has expired"));
    }

    #[test]
    fn test_session_word_inside_business_detail_stays_business() {
        let fault = classify(
            "<s:Fault><faultcode>s:Client</faultcode><faultstring>Claim not found</faultstring>\
             <detail><NotFoundFault><ClaimId>CLM404</ClaimId><SessionYear>2024</SessionYear>\
             </NotFoundFault></detail></s:Fault>",
        );

        match fault {
            RemoteFault::Business { code, .. } => assert_eq!(code, "NotFound"),
            other => panic!("business fault classified as {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_wording_in_business_message_stays_business() {
        let fault = classify(
            "<s:Fault><faultcode>s:Client</faultcode><faultstring>Unauthorized claim type for this session</faultstring>\
             <detail><ValidationFault><Field>Type</Field></ValidationFault></detail></s:Fault>",
        );

        assert_eq!(
            fault,
            RemoteFault::Business {
                code: "Validation".into(),
                message: "Unauthorized claim type for this session".into(),
                detail: Some(json!({"ValidationFault": {"Field": "Type"}})),
            }
        );
    }

    #[test]
    fn test_plain_fault_mentioning_logon_is_business() {
        let fault = classify(
            "<s:Fault><faultcode>s:Server</faultcode>\
             <faultstring>Logon history unavailable</faultstring></s:Fault>",
        );

        assert_eq!(fault, RemoteFault::business("Server", "Logon history unavailable"));
    }

    #[test]
    fn test_business_fault_keeps_detail() {
        let xml = envelope(
            "<s:Fault><faultcode>s:Client</faultcode><faultstring>Claim not found</faultstring>\
             <detail><NotFoundFault><ClaimId>CLM404</ClaimId></NotFoundFault></detail></s:Fault>",
        );
        let root = parse(&xml).unwrap();

        match body_payload(&root).unwrap_err() {
            RemoteFault::Business { code, message, detail } => {
                assert_eq!(code, "NotFound");
                assert_eq!(message, "Claim not found");
                assert_eq!(detail, Some(json!({"NotFoundFault": {"ClaimId": "CLM404"}})));
            }
            other => panic!("unexpected fault: {:?}", other),
        }
    }

    #[test]
    fn test_fault_without_detail_uses_fault_code() {
        let xml = envelope(
            "<s:Fault><faultcode>s:Server</faultcode><faultstring>Quota exceeded</faultstring></s:Fault>",
        );
        let root = parse(&xml).unwrap();

        assert_eq!(
            body_payload(&root).unwrap_err(),
            RemoteFault::business("Server", "Quota exceeded")
        );
    }

    #[test]
    fn test_truncated_document_is_rejected() {
        assert!(parse("<a><b>text</b>").is_err());
        assert!(parse("").is_err());
    }
}
