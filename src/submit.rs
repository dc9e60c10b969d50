use std::rc::Rc;

use crate::digest::ContentHasher;
use crate::surface::TextField;

/// Plaintext password input and the hidden field that carries its digest.
pub struct PasswordFields {
    pub plain: Rc<dyn TextField>,
    pub digest: Rc<dyn TextField>,
}

pub struct SubmitFields {
    pub note: Rc<dyn TextField>,
    /// Placed by the server; read only.
    pub session: Rc<dyn TextField>,
    pub signature: Rc<dyn TextField>,
    pub password: Option<PasswordFields>,
}

/// What a single submit pass wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub signature: String,
    /// `None` when the password field was left empty and the digest field was
    /// not touched.
    pub password_digest: Option<String>,
}

pub struct SubmitPreparer {
    fields: SubmitFields,
    hasher: Box<dyn ContentHasher>,
}

impl SubmitPreparer {
    pub fn new(fields: SubmitFields, hasher: Box<dyn ContentHasher>) -> Self {
        Self { fields, hasher }
    }

    pub fn on_submit(&self) -> SubmissionPayload {
        let password_digest = self.fields.password.as_ref().and_then(|password| {
            let plain = password.plain.value();
            if plain.is_empty() {
                return None;
            }
            let digest = self.hasher.digest(&plain);
            password.digest.set_value(&digest);
            password.plain.set_value("");
            Some(digest)
        });

        let mut signed = self.fields.session.value();
        signed.push_str(&self.fields.note.value());
        let signature = self.hasher.digest(&signed);
        self.fields.signature.set_value(&signature);

        SubmissionPayload {
            signature,
            password_digest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{Md5Hasher, Sha256Hasher};
    use crate::surface::memory::MemoryField;

    struct Form {
        note: MemoryField,
        session: MemoryField,
        signature: MemoryField,
        plain: MemoryField,
        digest: MemoryField,
    }

    impl Form {
        fn new(note: &str, session: &str) -> Self {
            Self {
                note: MemoryField::with_value(note),
                session: MemoryField::with_value(session),
                signature: MemoryField::default(),
                plain: MemoryField::default(),
                digest: MemoryField::default(),
            }
        }

        fn preparer(&self) -> SubmitPreparer {
            SubmitPreparer::new(
                SubmitFields {
                    note: Rc::new(self.note.clone()),
                    session: Rc::new(self.session.clone()),
                    signature: Rc::new(self.signature.clone()),
                    password: Some(PasswordFields {
                        plain: Rc::new(self.plain.clone()),
                        digest: Rc::new(self.digest.clone()),
                    }),
                },
                Box::new(Md5Hasher::new()),
            )
        }
    }

    #[test]
    fn signs_session_and_note_together() {
        let form = Form::new("hello", "sess-42");
        let payload = form.preparer().on_submit();

        let expected = Md5Hasher::new().digest("sess-42hello");
        assert_eq!(payload.signature, expected);
        assert_eq!(form.signature.get(), expected);
    }

    #[test]
    fn signature_is_deterministic() {
        let form = Form::new("same text", "sess");
        let preparer = form.preparer();
        let first = preparer.on_submit().signature;
        let second = preparer.on_submit().signature;
        assert_eq!(first, second);
    }

    #[test]
    fn signature_changes_with_either_input() {
        let form = Form::new("note", "session-a");
        let preparer = form.preparer();
        let base = preparer.on_submit().signature;

        form.note.set_value("note!");
        let edited_note = preparer.on_submit().signature;
        assert_ne!(base, edited_note);

        form.note.set_value("note");
        form.session.set_value("session-b");
        let other_session = preparer.on_submit().signature;
        assert_ne!(base, other_session);
    }

    #[test]
    fn signature_ignores_line_breaks() {
        let form = Form::new("line one\r\nline two\n", "s");
        let payload = form.preparer().on_submit();
        assert_eq!(
            payload.signature,
            Md5Hasher::new().digest("sline oneline two")
        );
    }

    #[test]
    fn signs_the_live_note_value() {
        let form = Form::new("draft", "s");
        let preparer = form.preparer();
        form.note.set_value("final");
        assert_eq!(
            preparer.on_submit().signature,
            Md5Hasher::new().digest("sfinal")
        );
    }

    #[test]
    fn hashes_and_clears_plaintext_password() {
        let form = Form::new("n", "s");
        form.plain.set_value("hunter2\n");
        let payload = form.preparer().on_submit();

        let expected = Md5Hasher::new().digest("hunter2");
        assert_eq!(form.digest.get(), expected);
        assert_eq!(payload.password_digest.as_deref(), Some(expected.as_str()));
        assert_eq!(form.plain.get(), "");
    }

    #[test]
    fn empty_password_preserves_existing_digest() {
        let form = Form::new("n", "s");
        form.digest.set_value("previously-set-digest");
        let payload = form.preparer().on_submit();

        assert_eq!(form.digest.get(), "previously-set-digest");
        assert_eq!(payload.password_digest, None);
        assert_eq!(form.plain.get(), "");
    }

    #[test]
    fn works_without_password_fields() {
        let form = Form::new("n", "s");
        let preparer = SubmitPreparer::new(
            SubmitFields {
                note: Rc::new(form.note.clone()),
                session: Rc::new(form.session.clone()),
                signature: Rc::new(form.signature.clone()),
                password: None,
            },
            Box::new(Sha256Hasher::new()),
        );
        let payload = preparer.on_submit();
        assert_eq!(payload.signature, Sha256Hasher::new().digest("sn"));
        assert_eq!(payload.password_digest, None);
    }
}
