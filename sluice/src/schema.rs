//! Record shape and the XML <-> record converter.
//!
//! The converter is deliberately not a general XML parser: records are flat
//! `<user>` fragments with a known field set and no nested structure, so
//! field values are the literal text between the first matching tag pair.

use serde::{Deserialize, Serialize};

/// Element wrapping the whole document.
pub const ROOT_ELEMENT: &str = "users";

/// Element wrapping one record.
pub const RECORD_ELEMENT: &str = "user";

/// Known record fields, in mapping order.
pub const FIELDS: [&str; 4] = ["id", "name", "email", "age"];

/// One structured record extracted at the capture depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: String,
}

impl UserRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age: age.into(),
        }
    }

    /// Ordered field name -> value mapping.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("id", self.id.as_str()),
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("age", self.age.as_str()),
        ]
    }

    /// Decode one record fragment.
    ///
    /// Whitespace strictly between adjacent tags is collapsed first, so
    /// pretty-printed and minified fragments decode identically. Returns
    /// `None` when the `<user>` wrapper is absent; a missing field decodes
    /// as an empty string.
    pub fn from_xml(xml: &str) -> Option<UserRecord> {
        let compact = collapse_between_tags(xml);
        let body = content_between(&compact, RECORD_ELEMENT)?;

        Some(UserRecord {
            id: content_between(body, "id").unwrap_or("").to_string(),
            name: content_between(body, "name").unwrap_or("").to_string(),
            email: content_between(body, "email").unwrap_or("").to_string(),
            age: content_between(body, "age").unwrap_or("").to_string(),
        })
    }

    /// Encode as an XML fragment, one element per field in mapping order.
    ///
    /// A non-empty indent string pretty-prints (fields at double indent, one
    /// element per line); an empty indent emits a single line.
    pub fn to_xml(&self, indent: &str) -> String {
        let eol = if indent.is_empty() { "" } else { "\n" };

        let mut xml = format!("{}<{}>{}", indent, RECORD_ELEMENT, eol);
        for (name, value) in self.fields() {
            xml.push_str(&format!(
                "{}{}<{}>{}</{}>{}",
                indent, indent, name, value, name, eol
            ));
        }
        xml.push_str(&format!("{}</{}>{}", indent, RECORD_ELEMENT, eol));
        xml
    }
}

/// Remove whitespace runs that sit strictly between a `>` and a `<`.
fn collapse_between_tags(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;

    while let Some(pos) = rest.find('>') {
        out.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('<') {
            rest = trimmed;
        }
    }
    out.push_str(rest);
    out
}

/// Literal text between the first `<tag>` and the first `</tag>` after it.
fn content_between<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = xml.find(&open)? + open.len();
    let end = start + xml[start..].find(&close)?;
    Some(&xml[start..end])
}
