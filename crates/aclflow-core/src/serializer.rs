//! Rendering ACL documents back to policy XML
//!
//! Produces the human-diffable canonical text uploaded by the store layer.
//! The equivalence checker compares typed documents directly and never goes
//! through this rendering.

use crate::model::{AclDocument, Grantee};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Render a document in the policy schema, indented with two spaces.
/// Total over well-formed documents; writing into a `String` cannot fail.
pub fn serialize(doc: &AclDocument) -> String {
    let mut out = String::new();
    out.push_str("<AccessControlPolicy>\n");

    out.push_str("  <Owner>\n");
    leaf(&mut out, 4, "ID", &doc.owner.id);
    if let Some(name) = &doc.owner.display_name {
        leaf(&mut out, 4, "DisplayName", name);
    }
    out.push_str("  </Owner>\n");

    out.push_str("  <AccessControlList>\n");
    for grant in &doc.grants {
        out.push_str("    <Grant>\n");
        let _ = writeln!(
            out,
            "      <Grantee type=\"{}\">",
            grant.grantee.grantee_type().as_attr()
        );
        match &grant.grantee {
            Grantee::CanonicalUser { id, display_name } => {
                leaf(&mut out, 8, "ID", id);
                if let Some(name) = display_name {
                    leaf(&mut out, 8, "DisplayName", name);
                }
            }
            Grantee::AnonymousGroup { uri } => leaf(&mut out, 8, "URI", uri),
        }
        out.push_str("      </Grantee>\n");
        leaf(&mut out, 6, "Permission", grant.permission.as_str());
        out.push_str("    </Grant>\n");
    }
    out.push_str("  </AccessControlList>\n");

    out.push_str("</AccessControlPolicy>\n");
    out
}

fn leaf(out: &mut String, indent: usize, tag: &str, value: &str) {
    let _ = writeln!(out, "{:indent$}<{tag}>{}</{tag}>", "", escape(value));
}
