//! Attachment references substituted for resolved mentions.

use crate::error::MentionResult;
use crate::sgid::SgidSigner;

/// Capability trait for entity types that can appear as rich-text
/// attachments. Implemented by the user entity today; any other entity can
/// opt in without the resolver knowing about it.
pub trait Attachable {
    /// Entity kind recorded in the signed identifier, e.g. "user"
    fn reference_kind(&self) -> &'static str;

    /// Stable identifier for the entity
    fn reference_id(&self) -> String;

    /// Cached display fragment shown in place of the mention token
    fn display_fragment(&self) -> String;
}

/// A structured placeholder substituted in place of a resolved mention.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentReference {
    /// Opaque signed identifier for the referenced entity
    pub sgid: String,
    /// Display fragment cached at resolution time
    pub fragment: String,
}

impl AttachmentReference {
    /// Build a reference for an attachable entity
    pub fn for_entity<A: Attachable>(signer: &SgidSigner, entity: &A) -> MentionResult<Self> {
        let sgid = signer.sign(entity.reference_kind(), &entity.reference_id())?;
        Ok(Self {
            sgid,
            fragment: entity.display_fragment(),
        })
    }

    /// Serialize the reference to its markup form.
    ///
    /// The fragment is entity-escaped, including `@`, so the mention
    /// pattern can never match inside the generated markup and resolution
    /// stays idempotent.
    pub fn to_markup(&self) -> String {
        format!(
            "<mention-attachment sgid=\"{}\" content=\"{}\"></mention-attachment>",
            self.sgid,
            escape_fragment(&self.fragment)
        )
    }
}

/// Escape a display fragment for embedding in attachment markup.
fn escape_fragment(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '@' => escaped.push_str("&#64;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        id: String,
        label: String,
    }

    impl Attachable for Widget {
        fn reference_kind(&self) -> &'static str {
            "widget"
        }

        fn reference_id(&self) -> String {
            self.id.clone()
        }

        fn display_fragment(&self) -> String {
            self.label.clone()
        }
    }

    #[test]
    fn test_markup_encodes_sgid_and_fragment() {
        let signer = SgidSigner::new("test-secret", "corkboard");
        let widget = Widget {
            id: "w1".to_string(),
            label: "Ada Lovelace".to_string(),
        };

        let reference = AttachmentReference::for_entity(&signer, &widget).unwrap();
        let markup = reference.to_markup();

        assert!(markup.starts_with("<mention-attachment sgid=\""));
        assert!(markup.contains("content=\"Ada Lovelace\""));
        assert!(markup.ends_with("</mention-attachment>"));

        let claims = signer.verify(&reference.sgid).unwrap();
        assert_eq!(claims.sub, "w1");
        assert_eq!(claims.kind, "widget");
    }

    #[test]
    fn test_fragment_escaping_keeps_markup_inert() {
        let signer = SgidSigner::new("test-secret", "corkboard");
        let widget = Widget {
            id: "w2".to_string(),
            label: "<b>@ada</b> & \"friends\"".to_string(),
        };

        let markup = AttachmentReference::for_entity(&signer, &widget)
            .unwrap()
            .to_markup();

        assert!(!markup.contains('@'));
        assert!(markup.contains("&lt;b&gt;&#64;ada&lt;/b&gt; &amp; &quot;friends&quot;"));
    }
}
