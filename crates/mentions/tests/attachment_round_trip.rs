//! Round-trip contract between resolution and the rendering layer: the
//! sgid embedded in generated markup must verify back to the referenced
//! entity unchanged.

use corkboard_mentions::{
    Attachable, InMemoryDirectory, MentionResolver, SgidSigner,
};

struct Person {
    id: &'static str,
    name: &'static str,
}

impl Attachable for Person {
    fn reference_kind(&self) -> &'static str {
        "user"
    }

    fn reference_id(&self) -> String {
        self.id.to_string()
    }

    fn display_fragment(&self) -> String {
        self.name.to_string()
    }
}

#[test]
fn sgid_in_markup_verifies_to_the_referenced_user() {
    let signer = SgidSigner::new("round-trip-secret", "corkboard");
    let resolver = MentionResolver::new(&signer);

    let mut directory = InMemoryDirectory::new();
    directory.insert(
        "ada",
        Person {
            id: "usr_ada",
            name: "Ada Lovelace",
        },
    );

    let output = resolver.resolve("welcome @ada!", &directory).unwrap();

    let start = output.find("sgid=\"").unwrap() + "sgid=\"".len();
    let end = output[start..].find('"').unwrap() + start;
    let sgid = &output[start..end];

    let claims = signer.verify(sgid).unwrap();
    assert_eq!(claims.sub, "usr_ada");
    assert_eq!(claims.kind, "user");
    assert_eq!(claims.iss, "corkboard");
}
