//! Lenient event walk over raw policy markup
//!
//! This stage only mirrors the element tree into optional fields; it never
//! judges completeness. Missing pieces are reported by the validation stage
//! so that all defects surface together. Unknown elements are skipped, and
//! the `type` attribute is matched by local name so namespace-prefixed
//! variants (`xsi:type`) are accepted as well.

use crate::error::ValidationError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Debug, Default)]
pub(super) struct RawPolicy {
    pub owner: Option<RawOwner>,
    pub acl: Option<RawAcl>,
}

#[derive(Debug, Default)]
pub(super) struct RawOwner {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default)]
pub(super) struct RawAcl {
    pub grants: Vec<RawGrant>,
}

#[derive(Debug, Default)]
pub(super) struct RawGrant {
    pub grantee: Option<RawGrantee>,
    pub permission: Option<String>,
}

#[derive(Debug, Default)]
pub(super) struct RawGrantee {
    /// Value of the `type` attribute, verbatim.
    pub kind: Option<String>,
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub uri: Option<String>,
}

type Result<T> = std::result::Result<T, ValidationError>;

/// Read the raw policy tree. `Ok(None)` means the markup was well-formed but
/// the root element is not `<AccessControlPolicy>`.
pub(super) fn read_document(text: &str) -> Result<Option<RawPolicy>> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"AccessControlPolicy" => {
                return Ok(Some(read_policy(&mut reader)?));
            }
            Event::Empty(e) if e.local_name().as_ref() == b"AccessControlPolicy" => {
                return Ok(Some(RawPolicy::default()));
            }
            Event::Start(_) | Event::Empty(_) | Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn read_policy(reader: &mut Reader<&[u8]>) -> Result<RawPolicy> {
    let mut policy = RawPolicy::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Owner" => policy.owner = Some(read_owner(reader)?),
                b"AccessControlList" => policy.acl = Some(read_grant_list(reader)?),
                _ => skip(reader, &e)?,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"Owner" => policy.owner = Some(RawOwner::default()),
                b"AccessControlList" => policy.acl = Some(RawAcl::default()),
                _ => {}
            },
            Event::End(_) => return Ok(policy),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

fn read_owner(reader: &mut Reader<&[u8]>) -> Result<RawOwner> {
    let mut owner = RawOwner::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"ID" => owner.id = Some(read_text(reader)?),
                b"DisplayName" => owner.display_name = Some(read_text(reader)?),
                _ => skip(reader, &e)?,
            },
            Event::End(_) => return Ok(owner),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

fn read_grant_list(reader: &mut Reader<&[u8]>) -> Result<RawAcl> {
    let mut acl = RawAcl::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Grant" => acl.grants.push(read_grant(reader)?),
                _ => skip(reader, &e)?,
            },
            Event::Empty(e) if e.local_name().as_ref() == b"Grant" => {
                acl.grants.push(RawGrant::default());
            }
            Event::End(_) => return Ok(acl),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

fn read_grant(reader: &mut Reader<&[u8]>) -> Result<RawGrant> {
    let mut grant = RawGrant::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Grantee" => {
                    let kind = grantee_kind(&e)?;
                    let mut grantee = read_grantee(reader)?;
                    grantee.kind = kind;
                    grant.grantee = Some(grantee);
                }
                b"Permission" => grant.permission = Some(read_text(reader)?),
                _ => skip(reader, &e)?,
            },
            Event::Empty(e) if e.local_name().as_ref() == b"Grantee" => {
                grant.grantee = Some(RawGrantee {
                    kind: grantee_kind(&e)?,
                    ..RawGrantee::default()
                });
            }
            Event::End(_) => return Ok(grant),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

fn read_grantee(reader: &mut Reader<&[u8]>) -> Result<RawGrantee> {
    let mut grantee = RawGrantee::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"ID" => grantee.id = Some(read_text(reader)?),
                b"DisplayName" => grantee.display_name = Some(read_text(reader)?),
                b"URI" => grantee.uri = Some(read_text(reader)?),
                _ => skip(reader, &e)?,
            },
            Event::End(_) => return Ok(grantee),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

/// Collect the text content of the current leaf element.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut value = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => value.push_str(&t.unescape()?),
            Event::CData(t) => value.push_str(&String::from_utf8_lossy(&t)),
            Event::Start(e) => skip(reader, &e)?,
            Event::End(_) => return Ok(value),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

fn grantee_kind(e: &BytesStart) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"type" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn skip(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<()> {
    reader.read_to_end(start.name())?;
    Ok(())
}

fn unexpected_eof() -> ValidationError {
    ValidationError::Malformed("unexpected end of document".to_string())
}
